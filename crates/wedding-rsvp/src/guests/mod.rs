//! Guest response analysis: duplicate detection, attendance statistics, and the
//! collaborator seams (storage, intake, import) that feed them.

pub mod domain;
pub mod duplicates;
pub mod import;
pub mod intake;
pub mod normalizer;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod statistics;
pub mod variants;

#[cfg(test)]
mod tests;

pub use domain::{
    AccessLevel, GuestResponse, ResponseFilter, ResponseId, WeddingContext, WeddingId,
    DEFAULT_CONNECTION_OPTIONS,
};
pub use duplicates::{find_duplicates, DuplicateDetector, DuplicateGroup, DuplicateReport};
pub use import::{GuestImportError, GuestListFormat, GuestListImporter};
pub use intake::{RsvpSubmission, SubmissionError};
pub use normalizer::{full_name, normalized_full_name, NameKey};
pub use report::{GuestListReport, GuestRow};
pub use repository::{RepositoryError, ResponseRepository};
pub use router::{guest_report_router, GuestReportRequest};
pub use service::{GuestListService, GuestListServiceError, PurgeOutcome};
pub use statistics::StatisticsSummary;
pub use variants::{name_variants, NameAlias, VariantGenerator};
