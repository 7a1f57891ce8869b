use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::guests::domain::{GuestResponse, ResponseId, WeddingContext, WeddingId};
use crate::guests::duplicates::DuplicateDetector;
use crate::guests::intake::RsvpSubmission;
use crate::guests::repository::{RepositoryError, ResponseRepository};
use crate::guests::service::GuestListService;

pub(super) fn wedding() -> WeddingId {
    WeddingId("wedding-TEST0001".to_string())
}

pub(super) fn admin() -> WeddingContext {
    WeddingContext::wedding_admin(wedding())
}

pub(super) fn response(
    id: &str,
    first: &str,
    last: &str,
    attending: bool,
    connection: Option<&str>,
    guests: Option<u32>,
) -> GuestResponse {
    GuestResponse {
        id: ResponseId(id.to_string()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        attending,
        connection_type: connection.map(str::to_string),
        guest_count: guests,
        submitted_at: None,
    }
}

pub(super) fn guest_list() -> Vec<GuestResponse> {
    vec![
        response("1", "John", "Smith", true, Some("Friend of the Bride"), Some(2)),
        response("2", "Alice", "Lee", true, Some("Family of the Groom"), Some(1)),
        response("3", "john", "smith", true, Some("Friend of the Bride"), Some(2)),
        response("4", "Bob", "Chen", false, None, None),
    ]
}

pub(super) fn submission(first: &str, last: &str) -> RsvpSubmission {
    RsvpSubmission {
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        attending: Some(true),
        connection_type: Some("Friend of the Groom".to_string()),
        guest_count: Some(2),
    }
}

pub(super) fn build_service() -> (GuestListService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::seeded(&wedding(), guest_list()));
    let service = GuestListService::new(repository.clone(), Arc::new(DuplicateDetector::default()));
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) weddings: Arc<Mutex<HashMap<WeddingId, Vec<GuestResponse>>>>,
}

impl MemoryRepository {
    pub(super) fn seeded(wedding: &WeddingId, responses: Vec<GuestResponse>) -> Self {
        let repository = Self::default();
        repository
            .weddings
            .lock()
            .expect("repository mutex poisoned")
            .insert(wedding.clone(), responses);
        repository
    }
}

impl ResponseRepository for MemoryRepository {
    fn responses(&self, wedding: &WeddingId) -> Result<Vec<GuestResponse>, RepositoryError> {
        let guard = self.weddings.lock().expect("repository mutex poisoned");
        guard
            .get(wedding)
            .cloned()
            .ok_or_else(|| RepositoryError::UnknownWedding(wedding.clone()))
    }

    fn insert(
        &self,
        wedding: &WeddingId,
        response: GuestResponse,
    ) -> Result<GuestResponse, RepositoryError> {
        let mut guard = self.weddings.lock().expect("repository mutex poisoned");
        let rows = guard
            .get_mut(wedding)
            .ok_or_else(|| RepositoryError::UnknownWedding(wedding.clone()))?;
        if rows.iter().any(|row| row.id == response.id) {
            return Err(RepositoryError::Conflict);
        }
        rows.push(response.clone());
        Ok(response)
    }

    fn delete(&self, wedding: &WeddingId, id: &ResponseId) -> Result<bool, RepositoryError> {
        let mut guard = self.weddings.lock().expect("repository mutex poisoned");
        let rows = guard
            .get_mut(wedding)
            .ok_or_else(|| RepositoryError::UnknownWedding(wedding.clone()))?;
        let before = rows.len();
        rows.retain(|row| &row.id != id);
        Ok(rows.len() != before)
    }
}

/// Hands out the seeded list but reports every delete as a miss.
pub(super) struct StaleRepository;

impl ResponseRepository for StaleRepository {
    fn responses(&self, _wedding: &WeddingId) -> Result<Vec<GuestResponse>, RepositoryError> {
        Ok(guest_list())
    }

    fn insert(
        &self,
        _wedding: &WeddingId,
        _response: GuestResponse,
    ) -> Result<GuestResponse, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn delete(&self, _wedding: &WeddingId, _id: &ResponseId) -> Result<bool, RepositoryError> {
        Ok(false)
    }
}

pub(super) struct UnavailableRepository;

impl ResponseRepository for UnavailableRepository {
    fn responses(&self, _wedding: &WeddingId) -> Result<Vec<GuestResponse>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(
        &self,
        _wedding: &WeddingId,
        _response: GuestResponse,
    ) -> Result<GuestResponse, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _wedding: &WeddingId, _id: &ResponseId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
