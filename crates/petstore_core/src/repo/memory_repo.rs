//! In-memory pet repository.
//!
//! # Responsibility
//! - Provide a storage-free `PetRepository` for tests and embedding.
//!
//! # Invariants
//! - Ids start at 1, grow monotonically and are never reused, even after delete.
//! - Same validation and not-found semantics as the SQLite backend.

use crate::model::pet::{Pet, PetId};
use crate::repo::pet_repo::{PetListQuery, PetRepository, RepoError, RepoResult};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
struct MemoryState {
    next_id: PetId,
    rows: BTreeMap<PetId, Pet>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

/// `BTreeMap`-backed pet repository.
#[derive(Debug, Default)]
pub struct InMemoryPetRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryPetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pets.
    pub fn len(&self) -> RepoResult<usize> {
        Ok(self.read()?.rows.len())
    }

    pub fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.read()?.rows.is_empty())
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| RepoError::Storage("lock poisoned".to_string()))
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| RepoError::Storage("lock poisoned".to_string()))
    }
}

impl PetRepository for InMemoryPetRepository {
    fn insert(&self, pet: &Pet) -> RepoResult<PetId> {
        if let Some(id) = pet.id {
            return Err(RepoError::AlreadyPersisted(id));
        }
        pet.validate()?;

        let mut state = self.write()?;
        let id = state.next_id;
        state.next_id += 1;
        state.rows.insert(
            id,
            Pet {
                id: Some(id),
                ..pet.clone()
            },
        );

        Ok(id)
    }

    fn update(&self, pet: &Pet) -> RepoResult<()> {
        let id = pet.id.ok_or(RepoError::NotPersisted)?;
        pet.validate()?;

        let mut state = self.write()?;
        match state.rows.get_mut(&id) {
            Some(stored) => {
                stored.clone_from(pet);
                Ok(())
            }
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn delete(&self, id: PetId) -> RepoResult<()> {
        let mut state = self.write()?;
        state
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound(id))
    }

    fn get(&self, id: PetId) -> RepoResult<Option<Pet>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    fn list(&self, query: &PetListQuery) -> RepoResult<Vec<Pet>> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|pet| query.matches(pet))
            .cloned()
            .collect())
    }
}
