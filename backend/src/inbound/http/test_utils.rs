//! Test helpers for inbound HTTP components.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{IncidentRepository, IncidentRepositoryError, LoginService};
use crate::domain::{
    ConfiguredLoginService, Incident, IncidentChanges, IncidentDraft, IncidentId,
    IncidentListQuery, IncidentService, IncidentSort, LoginCredentials, NewIncident, Patch,
};
use crate::inbound::http::state::HttpState;

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "password";

/// `Authorization` header value for the given credentials.
pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Login service accepting [`TEST_USERNAME`] / [`TEST_PASSWORD`].
pub fn test_login_service() -> Arc<dyn LoginService> {
    Arc::new(ConfiguredLoginService::new(LoginCredentials::new(
        TEST_USERNAME,
        TEST_PASSWORD,
    )))
}

/// Clock that advances one second on every reading.
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 1, 8, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        Self::starting_at(start)
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().expect("clock lock");
        let now = *next;
        *next = now + Duration::seconds(1);
        now
    }
}

/// Vec-backed repository mirroring the SQLite adapter's semantics.
#[derive(Default)]
pub struct InMemoryIncidentRepository {
    rows: Mutex<Vec<Incident>>,
    next_id: Mutex<i64>,
}

impl InMemoryIncidentRepository {
    pub fn len(&self) -> usize {
        self.rows.lock().expect("rows lock").len()
    }
}

#[async_trait]
impl IncidentRepository for InMemoryIncidentRepository {
    async fn insert(
        &self,
        incident: &NewIncident,
        created_at: DateTime<Utc>,
    ) -> Result<Incident, IncidentRepositoryError> {
        let id = {
            let mut next_id = self.next_id.lock().expect("id lock");
            *next_id += 1;
            *next_id
        };
        let stored = Incident::from(IncidentDraft {
            id: IncidentId::new(id),
            title: incident.title.clone(),
            description: incident.description.clone(),
            status: incident.status,
            priority: incident.priority,
            created_at,
            updated_at: None,
        });
        self.rows.lock().expect("rows lock").push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: IncidentId,
    ) -> Result<Option<Incident>, IncidentRepositoryError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn list(
        &self,
        query: &IncidentListQuery,
    ) -> Result<Vec<Incident>, IncidentRepositoryError> {
        let mut rows: Vec<Incident> = self
            .rows
            .lock()
            .expect("rows lock")
            .iter()
            .filter(|row| query.status.matches(row.status()))
            .cloned()
            .collect();
        if query.sort == IncidentSort::CreatedAtDesc {
            rows.sort_by(|a, b| (b.created_at(), b.id()).cmp(&(a.created_at(), a.id())));
        }
        Ok(rows
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn update(
        &self,
        id: IncidentId,
        changes: &IncidentChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Incident>, IncidentRepositoryError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let Some(row) = rows.iter_mut().find(|row| row.id() == id) else {
            return Ok(None);
        };
        let updated = Incident::from(IncidentDraft {
            id,
            title: changes.title.clone().unwrap_or_else(|| row.title().clone()),
            description: match &changes.description {
                Patch::Absent => row.description().map(str::to_owned),
                Patch::Null => None,
                Patch::Value(text) => Some(text.clone()),
            },
            status: changes.status.unwrap_or(row.status()),
            priority: changes.priority.unwrap_or(row.priority()),
            created_at: row.created_at(),
            updated_at: Some(updated_at.max(row.created_at())),
        });
        *row = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: IncidentId) -> Result<bool, IncidentRepositoryError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok(rows.len() < before)
    }
}

/// HTTP state backed by a fresh in-memory repository.
pub fn in_memory_state() -> (HttpState, Arc<InMemoryIncidentRepository>) {
    let repo = Arc::new(InMemoryIncidentRepository::default());
    let service = Arc::new(IncidentService::new(
        Arc::clone(&repo),
        Arc::new(SteppingClock::default()),
    ));
    (HttpState::new(service.clone(), service), repo)
}
