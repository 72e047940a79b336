//! In-memory [`UserStore`] backing the demo mode and tests.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::DirectoryError;
use crate::store::UserStore;
use crate::types::DbId;
use crate::user::{NewUser, User, UserPatch};

/// Mutex-guarded user table with the same observable semantics as the SQL
/// store: monotonic ids, exact-value email uniqueness, insertion-order
/// listing. Data does not survive the process.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Vec<User>,
    last_id: DbId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("store mutex poisoned")
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, input: &NewUser) -> Result<User, DirectoryError> {
        let mut inner = self.lock();
        if inner.rows.iter().any(|u| u.email == input.email) {
            return Err(DirectoryError::DuplicateEmail);
        }
        inner.last_id += 1;
        let user = User {
            id: inner.last_id,
            name: input.name.clone(),
            email: input.email.clone(),
            group: input.group.clone(),
            created_at: Utc::now(),
        };
        inner.rows.push(user.clone());
        Ok(user)
    }

    async fn get(&self, id: DbId) -> Result<User, DirectoryError> {
        self.lock()
            .rows
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(DirectoryError::NotFound(id))
    }

    async fn update(&self, id: DbId, patch: &UserPatch) -> Result<User, DirectoryError> {
        let mut inner = self.lock();
        // Unknown ids 404 before the uniqueness check, matching the SQL
        // store where an update that matches no row never hits the
        // constraint.
        if !inner.rows.iter().any(|u| u.id == id) {
            return Err(DirectoryError::NotFound(id));
        }
        if let Some(email) = &patch.email {
            if inner.rows.iter().any(|u| u.id != id && &u.email == email) {
                return Err(DirectoryError::DuplicateEmail);
            }
        }
        let row = inner
            .rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DirectoryError::NotFound(id))?;
        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        if let Some(email) = &patch.email {
            row.email = email.clone();
        }
        if let Some(group) = &patch.group {
            row.group = group.clone();
        }
        Ok(row.clone())
    }

    async fn list(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.lock().rows.clone())
    }

    async fn distinct_groups(&self) -> Result<Vec<String>, DirectoryError> {
        let groups: BTreeSet<String> = self
            .lock()
            .rows
            .iter()
            .filter_map(|u| u.group.clone())
            .collect();
        Ok(groups.into_iter().collect())
    }
}
