//! User domain entity and statement parameters.

use serde::{Deserialize, Serialize};

/// User domain entity
///
/// `id` is assigned by the storage engine on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub age: i32,
}

impl User {
    pub fn new(id: i32, name: impl Into<String>, age: i32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} ({})", self.id, self.name, self.age)
    }
}

/// Parameters bound to the insert statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    /// User display name
    pub name: String,
    /// User age, constraint checks are left to the schema
    pub age: i32,
}

impl CreateUser {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

/// Parameters bound to the `SET` clause of the update statement.
///
/// Both fields are always written (last write wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUser {
    pub name: String,
    pub age: i32,
}

impl UpdateUser {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}
