use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use wedding_rsvp::config::parse_aliases;
use wedding_rsvp::guests::{
    GuestListFormat, GuestResponse, NameAlias, RepositoryError, ResponseFilter, ResponseId,
    ResponseRepository, WeddingId,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local response store backing the CLI report.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResponseRepository {
    weddings: Arc<Mutex<HashMap<WeddingId, Vec<GuestResponse>>>>,
}

impl InMemoryResponseRepository {
    pub(crate) fn seed(&self, wedding: &WeddingId, responses: Vec<GuestResponse>) {
        let mut guard = self.weddings.lock().expect("repository mutex poisoned");
        guard.insert(wedding.clone(), responses);
    }
}

impl ResponseRepository for InMemoryResponseRepository {
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
        let Some(rows) = guard.get_mut(wedding) else {
            return Err(RepositoryError::UnknownWedding(wedding.clone()));
        };
        let before = rows.len();
        rows.retain(|row| &row.id != id);
        Ok(rows.len() < before)
    }
}

pub(crate) fn parse_filter(raw: &str) -> Result<ResponseFilter, String> {
    Ok(ResponseFilter::parse(raw))
}

pub(crate) fn parse_format(raw: &str) -> Result<GuestListFormat, String> {
    GuestListFormat::parse(raw).ok_or_else(|| format!("unsupported format '{raw}' (csv or json)"))
}

pub(crate) fn parse_alias(raw: &str) -> Result<NameAlias, String> {
    let mut aliases = parse_aliases(raw).map_err(|err| err.to_string())?;
    match (aliases.pop(), aliases.is_empty()) {
        (Some(alias), true) => Ok(alias),
        _ => Err(format!("expected a single from=to alias, got '{raw}'")),
    }
}
