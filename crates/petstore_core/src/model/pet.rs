//! Pet domain model.
//!
//! # Responsibility
//! - Define the canonical record for one adoptable pet.
//! - Own the wire (JSON) shape: serialization and validated deserialization.
//!
//! # Invariants
//! - `id` is `None` until the store assigns it on first insert.
//! - Deserialization never default-fills `name`, `category` or `available`.
//! - `name` and `category` never exceed `MAX_TEXT_CHARS` on write paths.

use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned surrogate key.
pub type PetId = i64;

/// Column width of `pets.name` and `pets.category`.
pub const MAX_TEXT_CHARS: usize = 63;

/// Failure to build a pet from untrusted input data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataValidationError {
    /// Required key is absent from the input object.
    MissingField(&'static str),
    /// Input is not a JSON object.
    MalformedBody,
    /// Key is present but holds the wrong JSON type.
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

impl Display for DataValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Invalid pet: missing {field}"),
            Self::MalformedBody => {
                write!(f, "Invalid pet: body of request contained bad or no data")
            }
            Self::InvalidField { field, expected } => {
                write!(f, "Invalid pet: field {field} must be a {expected}")
            }
        }
    }
}

impl Error for DataValidationError {}

/// Write-path validation failure for a pet record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetValidationError {
    /// Text field does not fit its column.
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl Display for PetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldTooLong { field, max, actual } => write!(
                f,
                "pet {field} is {actual} characters long; at most {max} allowed"
            ),
        }
    }
}

impl Error for PetValidationError {}

/// One adoptable pet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pet {
    /// `None` means the record has never been persisted.
    pub id: Option<PetId>,
    pub name: String,
    /// Kind of animal, e.g. `dog` or `cat`.
    pub category: String,
    /// `true` when the pet can be adopted.
    pub available: bool,
}

impl Pet {
    /// Creates an unpersisted pet.
    pub fn new(name: impl Into<String>, category: impl Into<String>, available: bool) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: category.into(),
            available,
        }
    }

    /// Builds an unpersisted pet from a JSON object.
    pub fn from_json(data: &Value) -> Result<Self, DataValidationError> {
        let mut pet = Self::default();
        pet.deserialize(data)?;
        Ok(pet)
    }

    /// Returns whether the store has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the wire shape: exactly `id`, `name`, `category`, `available`.
    pub fn serialize(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), self.id.map_or(Value::Null, Value::from));
        map.insert("name".to_string(), Value::from(self.name.as_str()));
        map.insert("category".to_string(), Value::from(self.category.as_str()));
        map.insert("available".to_string(), Value::Bool(self.available));
        map
    }

    /// Populates `name`, `category` and `available` from a JSON object.
    ///
    /// `id` and unknown keys in `data` are ignored. On error `self` is left
    /// untouched.
    ///
    /// # Errors
    /// - `MalformedBody` when `data` is not an object.
    /// - `MissingField` naming the first absent key.
    /// - `InvalidField` when a key holds the wrong JSON type.
    pub fn deserialize(&mut self, data: &Value) -> Result<&mut Self, DataValidationError> {
        let object = data.as_object().ok_or(DataValidationError::MalformedBody)?;

        let name = required_str(object, "name")?;
        let category = required_str(object, "category")?;
        let available = match object.get("available") {
            None => return Err(DataValidationError::MissingField("available")),
            Some(value) => value.as_bool().ok_or(DataValidationError::InvalidField {
                field: "available",
                expected: "boolean",
            })?,
        };

        self.name = name.to_string();
        self.category = category.to_string();
        self.available = available;
        Ok(self)
    }

    /// Checks column widths before persistence.
    pub fn validate(&self) -> Result<(), PetValidationError> {
        check_width("name", &self.name)?;
        check_width("category", &self.category)
    }
}

impl Display for Pet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Pet '{}'>", self.name)
    }
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, DataValidationError> {
    match object.get(field) {
        None => Err(DataValidationError::MissingField(field)),
        Some(value) => value.as_str().ok_or(DataValidationError::InvalidField {
            field,
            expected: "string",
        }),
    }
}

fn check_width(field: &'static str, value: &str) -> Result<(), PetValidationError> {
    let actual = value.chars().count();
    if actual > MAX_TEXT_CHARS {
        return Err(PetValidationError::FieldTooLong {
            field,
            max: MAX_TEXT_CHARS,
            actual,
        });
    }
    Ok(())
}
