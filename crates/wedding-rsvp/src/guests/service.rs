use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{GuestResponse, ResponseFilter, ResponseId, WeddingContext};
use super::duplicates::DuplicateDetector;
use super::intake::{RsvpSubmission, SubmissionError};
use super::report::GuestListReport;
use super::repository::{RepositoryError, ResponseRepository};

/// Service composing the response store with duplicate detection and statistics.
pub struct GuestListService<R> {
    repository: Arc<R>,
    detector: Arc<DuplicateDetector>,
}

static RESPONSE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_response_id() -> ResponseId {
    let id = RESPONSE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ResponseId(format!("rsvp-{id:06}"))
}

/// Result of the bulk "delete duplicates" action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurgeOutcome {
    pub deleted: Vec<ResponseId>,
    /// Flagged ids the store no longer had when the delete ran.
    pub missing: Vec<ResponseId>,
}

impl<R> GuestListService<R>
where
    R: ResponseRepository + 'static,
{
    pub fn new(repository: Arc<R>, detector: Arc<DuplicateDetector>) -> Self {
        Self {
            repository,
            detector,
        }
    }

    /// Admin dashboard for the wedding in `context`.
    pub fn dashboard(
        &self,
        context: &WeddingContext,
        filter: &ResponseFilter,
    ) -> Result<GuestListReport, GuestListServiceError> {
        require_admin(context)?;
        let responses = self.repository.responses(&context.wedding_id)?;
        let report = GuestListReport::build(&responses, filter, &self.detector);

        debug!(
            wedding = %context.wedding_id,
            access = context.access.label(),
            responses = responses.len(),
            flagged = report.duplicates.flagged_count(),
            "guest dashboard computed"
        );
        Ok(report)
    }

    /// Validate and store a guest's RSVP.
    pub fn submit(
        &self,
        context: &WeddingContext,
        submission: RsvpSubmission,
    ) -> Result<GuestResponse, GuestListServiceError> {
        let response = submission.into_response(next_response_id(), Utc::now())?;
        let stored = self.repository.insert(&context.wedding_id, response)?;

        info!(
            wedding = %context.wedding_id,
            response = %stored.id,
            attending = stored.attending,
            "rsvp recorded"
        );
        Ok(stored)
    }

    /// Delete every response currently flagged as a possible duplicate, group openers
    /// included.
    pub fn purge_duplicates(
        &self,
        context: &WeddingContext,
    ) -> Result<PurgeOutcome, GuestListServiceError> {
        require_admin(context)?;
        let responses = self.repository.responses(&context.wedding_id)?;
        let duplicates = self.detector.detect(&responses);

        let mut outcome = PurgeOutcome::default();
        for id in duplicates.flagged_ids() {
            if self.repository.delete(&context.wedding_id, id)? {
                outcome.deleted.push(id.clone());
            } else {
                warn!(wedding = %context.wedding_id, response = %id, "flagged response already gone");
                outcome.missing.push(id.clone());
            }
        }

        if !outcome.deleted.is_empty() {
            warn!(
                wedding = %context.wedding_id,
                deleted = outcome.deleted.len(),
                "duplicate responses purged"
            );
        }
        Ok(outcome)
    }
}

fn require_admin(context: &WeddingContext) -> Result<(), GuestListServiceError> {
    if context.is_admin() {
        Ok(())
    } else {
        Err(GuestListServiceError::Forbidden {
            access: context.access.label(),
        })
    }
}

/// Error raised by the guest list service.
#[derive(Debug, thiserror::Error)]
pub enum GuestListServiceError {
    #[error("{access} access cannot manage guest responses")]
    Forbidden { access: &'static str },
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
