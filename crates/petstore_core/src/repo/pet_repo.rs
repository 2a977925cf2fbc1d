//! Pet repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the store contract consumed by `PetService`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Pet::validate()` before SQL mutations.
//! - Every mutation runs in its own transaction and commits before returning.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - List results are ordered by `id ASC`.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::pet::{Pet, PetId, PetValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PET_SELECT_SQL: &str = "SELECT
    id,
    name,
    category,
    available
FROM pets";

const PET_COLUMNS: [&str; 4] = ["id", "name", "category", "available"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for pet persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Record failed write-path validation.
    Validation(PetValidationError),
    /// Underlying SQLite/bootstrap error, passed through untranslated.
    Db(DbError),
    /// No stored row has this id.
    NotFound(PetId),
    /// Operation needs a persisted record but `id` is unset.
    NotPersisted,
    /// Insert was given a record that already carries an id.
    AlreadyPersisted(PetId),
    /// Persisted row cannot be converted into a valid `Pet`.
    InvalidData(String),
    /// Non-SQL backend failure.
    Storage(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// HTTP-equivalent status for boundary layers.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::NotPersisted | Self::AlreadyPersisted(_) => 409,
            _ => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "pet not found: {id}"),
            Self::NotPersisted => write!(f, "pet has not been saved yet"),
            Self::AlreadyPersisted(id) => write!(f, "pet {id} is already persisted"),
            Self::InvalidData(message) => write!(f, "invalid persisted pet data: {message}"),
            Self::Storage(message) => write!(f, "pet storage failure: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "pet repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "pet repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "pet repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PetValidationError> for RepoError {
    fn from(value: PetValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Equality filters for listing pets. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetListQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

impl PetListQuery {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn by_availability(available: bool) -> Self {
        Self {
            available: Some(available),
            ..Self::default()
        }
    }

    /// Returns whether `pet` satisfies every set filter.
    ///
    /// String comparison is exact and case-sensitive, matching SQLite's
    /// default `BINARY` collation.
    pub fn matches(&self, pet: &Pet) -> bool {
        self.name.as_deref().map_or(true, |name| pet.name == name)
            && self
                .category
                .as_deref()
                .map_or(true, |category| pet.category == category)
            && self
                .available
                .map_or(true, |available| pet.available == available)
    }
}

/// Store contract for pet records.
pub trait PetRepository {
    /// Adds a new row and commits; returns the store-assigned id.
    fn insert(&self, pet: &Pet) -> RepoResult<PetId>;
    /// Commits field changes of an already persisted pet.
    fn update(&self, pet: &Pet) -> RepoResult<()>;
    /// Removes a row and commits.
    fn delete(&self, id: PetId) -> RepoResult<()>;
    fn get(&self, id: PetId) -> RepoResult<Option<Pet>>;
    /// Lists pets matching `query`, ordered by id.
    fn list(&self, query: &PetListQuery) -> RepoResult<Vec<Pet>>;
}

/// SQLite-backed pet repository.
pub struct SqlitePetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePetRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_pet_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PetRepository for SqlitePetRepository<'_> {
    fn insert(&self, pet: &Pet) -> RepoResult<PetId> {
        if let Some(id) = pet.id {
            return Err(RepoError::AlreadyPersisted(id));
        }
        pet.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO pets (name, category, available) VALUES (?1, ?2, ?3);",
            params![
                pet.name.as_str(),
                pet.category.as_str(),
                bool_to_int(pet.available),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    fn update(&self, pet: &Pet) -> RepoResult<()> {
        let id = pet.id.ok_or(RepoError::NotPersisted)?;
        pet.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE pets
             SET
                name = ?1,
                category = ?2,
                available = ?3
             WHERE id = ?4;",
            params![
                pet.name.as_str(),
                pet.category.as_str(),
                bool_to_int(pet.available),
                id,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;

        Ok(())
    }

    fn delete(&self, id: PetId) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute("DELETE FROM pets WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;

        Ok(())
    }

    fn get(&self, id: PetId) -> RepoResult<Option<Pet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PET_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(parse_pet_row(row)))
            .optional()?;

        row.transpose()
    }

    fn list(&self, query: &PetListQuery) -> RepoResult<Vec<Pet>> {
        let mut sql = format!("{PET_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(name) = &query.name {
            sql.push_str(" AND name = ?");
            bind_values.push(Value::Text(name.clone()));
        }
        if let Some(category) = &query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.clone()));
        }
        if let Some(available) = query.available {
            sql.push_str(" AND available = ?");
            bind_values.push(Value::Integer(bool_to_int(available)));
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut pets = Vec::new();

        while let Some(row) = rows.next()? {
            pets.push(parse_pet_row(row)?);
        }

        Ok(pets)
    }
}

fn parse_pet_row(row: &Row<'_>) -> RepoResult<Pet> {
    let id: PetId = row.get("id")?;

    let name = row
        .get::<_, Option<String>>("name")?
        .ok_or_else(|| null_column(id, "name"))?;
    let category = row
        .get::<_, Option<String>>("category")?
        .ok_or_else(|| null_column(id, "category"))?;

    let available = match row.get::<_, Option<i64>>("available")? {
        Some(0) => false,
        Some(1) => true,
        Some(other) => {
            return Err(RepoError::InvalidData(format!(
                "invalid available value `{other}` in pets.available for id {id}"
            )));
        }
        None => return Err(null_column(id, "available")),
    };

    Ok(Pet {
        id: Some(id),
        name,
        category,
        available,
    })
}

fn null_column(id: PetId, column: &str) -> RepoError {
    RepoError::InvalidData(format!("NULL in pets.{column} for id {id}"))
}

fn ensure_pet_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "pets")? {
        return Err(RepoError::MissingRequiredTable("pets"));
    }

    for column in PET_COLUMNS {
        if !table_has_column(conn, "pets", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "pets",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
