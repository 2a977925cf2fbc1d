//! Pet use-case service.
//!
//! # Responsibility
//! - Provide save/delete and finder entry points for pet callers.
//! - Delegate persistence to an injected repository.
//!
//! # Invariants
//! - Saving an unpersisted pet inserts it and assigns `id`; saving a
//!   persisted pet updates it and never changes `id`.
//! - Store errors are returned unchanged.
//! - Log events carry ids, filter kinds and counts only, never caller text.

use crate::model::pet::{Pet, PetId};
use crate::repo::pet_repo::{PetListQuery, PetRepository, RepoError, RepoResult};
use log::info;

/// Use-case service wrapper for pet persistence.
pub struct PetService<R: PetRepository> {
    repo: R,
}

impl<R: PetRepository> PetService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Inserts or updates `pet` depending on whether it has an id.
    ///
    /// # Contract
    /// - `id == None`: insert, then `pet.id` holds the new id.
    /// - `id == Some(_)`: update in place; `NotFound` if the row is gone.
    pub fn save(&self, pet: &mut Pet) -> RepoResult<()> {
        match pet.id {
            None => {
                let id = self.repo.insert(pet)?;
                pet.id = Some(id);
                info!("event=pet_save module=service status=ok op=insert id={id}");
            }
            Some(id) => {
                self.repo.update(pet)?;
                info!("event=pet_save module=service status=ok op=update id={id}");
            }
        }
        Ok(())
    }

    /// Removes a persisted pet from the store.
    ///
    /// Deleting the same pet twice returns `NotFound` on the second call.
    pub fn delete(&self, pet: &Pet) -> RepoResult<()> {
        let id = pet.id.ok_or(RepoError::NotPersisted)?;
        self.repo.delete(id)?;
        info!("event=pet_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Returns every stored pet in id order.
    pub fn all(&self) -> RepoResult<Vec<Pet>> {
        self.query("all", &PetListQuery::default())
    }

    /// Finds a pet by id; `None` when it does not exist.
    pub fn find(&self, id: PetId) -> RepoResult<Option<Pet>> {
        let pet = self.repo.get(id)?;
        info!(
            "event=pet_lookup module=service status=ok id={id} found={}",
            pet.is_some()
        );
        Ok(pet)
    }

    /// Finds a pet by id, failing with `RepoError::NotFound` when missing.
    pub fn find_or_404(&self, id: PetId) -> RepoResult<Pet> {
        match self.repo.get(id)? {
            Some(pet) => {
                info!("event=pet_lookup module=service status=ok id={id} required=true");
                Ok(pet)
            }
            None => {
                info!("event=pet_lookup module=service status=not_found id={id} required=true");
                Err(RepoError::NotFound(id))
            }
        }
    }

    /// Returns all pets whose name equals `name` exactly.
    pub fn find_by_name(&self, name: &str) -> RepoResult<Vec<Pet>> {
        self.query("name", &PetListQuery::by_name(name))
    }

    /// Returns all pets in `category`.
    pub fn find_by_category(&self, category: &str) -> RepoResult<Vec<Pet>> {
        self.query("category", &PetListQuery::by_category(category))
    }

    /// Returns all pets whose availability equals `available`.
    pub fn find_by_availability(&self, available: bool) -> RepoResult<Vec<Pet>> {
        let filter = if available {
            "available=true"
        } else {
            "available=false"
        };
        self.query(filter, &PetListQuery::by_availability(available))
    }

    /// Shorthand for `find_by_availability(true)`.
    pub fn find_available(&self) -> RepoResult<Vec<Pet>> {
        self.find_by_availability(true)
    }

    // Only the filter kind is logged; caller-supplied text stays out of the log.
    fn query(&self, filter: &'static str, query: &PetListQuery) -> RepoResult<Vec<Pet>> {
        let pets = self.repo.list(query)?;
        info!(
            "event=pet_query module=service status=ok filter={filter} count={}",
            pets.len()
        );
        Ok(pets)
    }
}
