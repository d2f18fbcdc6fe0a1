use crate::domain::application::{ApplicationId, LoanApplication, LoanSubmission, Status};
use crate::domain::decision::DecisionEngine;
use crate::domain::ports::BlobStorage;
use crate::error::{LoanError, Result};
use crate::infrastructure::in_memory::InMemoryBlobStorage;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Key the application list is persisted under.
pub const STORAGE_KEY: &str = "loanApplications";

/// Ordered collection of submitted loan applications.
///
/// The store owns the in-memory sequence and the blob storage it persists
/// to. Nothing is written until [`ApplicationStore::save`] is called, and
/// [`ApplicationStore::load`] replaces the in-memory sequence wholesale.
///
/// There is no internal locking; callers sharing a store between clients
/// must serialize access themselves.
pub struct ApplicationStore<S: BlobStorage = InMemoryBlobStorage> {
    applications: Vec<LoanApplication>,
    storage: S,
}

impl Default for ApplicationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationStore {
    pub fn new() -> Self {
        Self::with_storage(InMemoryBlobStorage::new())
    }
}

impl<S: BlobStorage> ApplicationStore<S> {
    pub fn with_storage(storage: S) -> Self {
        Self {
            applications: Vec::new(),
            storage,
        }
    }

    /// Validates a submission and appends the resulting `Pending`
    /// application to the end of the sequence.
    ///
    /// On a `ValidationError` the store is left untouched.
    pub fn add(&mut self, submission: LoanSubmission) -> Result<&LoanApplication> {
        let application = LoanApplication::submit(submission)?;
        if self.position(application.id()).is_some() {
            return Err(LoanError::ValidationError(format!(
                "duplicate application id {}",
                application.id()
            )));
        }

        debug!(id = %application.id(), "application submitted");
        let index = self.applications.len();
        self.applications.push(application);
        Ok(&self.applications[index])
    }

    /// Sets the status of an existing application, keeping its position.
    pub fn update(&mut self, id: ApplicationId, status: Status) -> Result<&LoanApplication> {
        let index = self.position(id).ok_or(LoanError::NotFoundError(id))?;
        let application = &mut self.applications[index];

        let current = application.status();
        if !current.can_transition_to(status) {
            return Err(LoanError::ValidationError(format!(
                "application {id} is already {current} and cannot become {status}"
            )));
        }

        if current != status {
            debug!(%id, from = %current, to = %status, "application status changed");
        }
        application.set_status(status);
        Ok(application)
    }

    /// Evaluates a stored application and records the resulting status.
    pub fn decide(
        &mut self,
        id: ApplicationId,
        engine: &DecisionEngine,
    ) -> Result<&LoanApplication> {
        let application = self.get(id).ok_or(LoanError::NotFoundError(id))?;
        let status = engine.evaluate(application);
        self.update(id, status)
    }

    pub fn get(&self, id: ApplicationId) -> Option<&LoanApplication> {
        self.applications.iter().find(|a| a.id() == id)
    }

    /// All applications in submission order.
    pub fn all(&self) -> &[LoanApplication] {
        &self.applications
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }

    /// Replaces the in-memory sequence with the persisted one and returns how
    /// many applications were loaded.
    ///
    /// Missing, unreadable or corrupt data yields an empty store; the cause
    /// is logged and never returned.
    pub fn load(&mut self) -> usize {
        self.applications = match self.storage.read(STORAGE_KEY) {
            Ok(Some(bytes)) => decode(&bytes).unwrap_or_else(|e| {
                warn!(error = %e, "discarding corrupt application data");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "unable to read application data");
                Vec::new()
            }
        };
        debug!(count = self.applications.len(), "applications loaded");
        self.applications.len()
    }

    /// Writes the full ordered sequence to storage as a JSON array.
    pub fn save(&mut self) -> Result<()> {
        let bytes = serde_json::to_vec(&self.applications)
            .map_err(|e| LoanError::PersistenceError(format!("Serialization error: {e}")))?;
        self.storage
            .write(STORAGE_KEY, &bytes)
            .map_err(|e| match e {
                LoanError::PersistenceError(_) => e,
                other => LoanError::PersistenceError(other.to_string()),
            })?;
        debug!(count = self.applications.len(), "applications saved");
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, handing back its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, id: ApplicationId) -> Option<usize> {
        self.applications.iter().position(|a| a.id() == id)
    }
}

fn decode(bytes: &[u8]) -> Result<Vec<LoanApplication>> {
    let applications: Vec<LoanApplication> = serde_json::from_slice(bytes)
        .map_err(|e| LoanError::PersistenceError(format!("Deserialization error: {e}")))?;

    let mut seen = HashSet::with_capacity(applications.len());
    for application in &applications {
        application
            .check_invariants()
            .map_err(|e| LoanError::PersistenceError(e.to_string()))?;
        if !seen.insert(application.id()) {
            return Err(LoanError::PersistenceError(format!(
                "duplicate application id {}",
                application.id()
            )));
        }
    }
    Ok(applications)
}
