use super::domain::{GuestResponse, ResponseId, WeddingId};

/// Storage seam for RSVP responses. Schema and connection handling live behind it.
pub trait ResponseRepository: Send + Sync {
    /// Every response for the wedding, in storage order.
    fn responses(&self, wedding: &WeddingId) -> Result<Vec<GuestResponse>, RepositoryError>;
    fn insert(
        &self,
        wedding: &WeddingId,
        response: GuestResponse,
    ) -> Result<GuestResponse, RepositoryError>;
    /// Returns `false` when no such response exists for the wedding.
    fn delete(&self, wedding: &WeddingId, id: &ResponseId) -> Result<bool, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("wedding {0} not found")]
    UnknownWedding(WeddingId),
    #[error("response already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
