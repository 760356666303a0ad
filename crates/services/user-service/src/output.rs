//! Rendering of command results for stdout.

use serde::Serialize;
use serde_json::json;

use common::{AppError, AppResult};
use domain::User;

use crate::startup::StartupReport;

/// Write operations that report an affected-row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Update,
    Delete,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Mutation::Update => "update",
            Mutation::Delete => "delete",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Mutation::Update => "Updated",
            Mutation::Delete => "Deleted",
        }
    }
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    pub fn users(self, users: &[User]) -> AppResult<String> {
        match self {
            OutputFormat::Json => to_json(&users),
            OutputFormat::Text if users.is_empty() => Ok("No users".to_string()),
            OutputFormat::Text => Ok(users
                .iter()
                .map(User::to_string)
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    pub fn user(self, user: &User) -> AppResult<String> {
        match self {
            OutputFormat::Json => to_json(user),
            OutputFormat::Text => Ok(user.to_string()),
        }
    }

    pub fn created(self, id: i32) -> AppResult<String> {
        match self {
            OutputFormat::Json => to_json(&json!({ "id": id })),
            OutputFormat::Text => Ok(format!("Inserted user #{}", id)),
        }
    }

    /// Result of an update or delete. Zero rows is reported, not treated as failure.
    pub fn affected(self, mutation: Mutation, id: i32, rows: u64) -> AppResult<String> {
        match self {
            OutputFormat::Json => to_json(&json!({ "id": id, "rows_affected": rows })),
            OutputFormat::Text if rows == 0 => {
                Ok(format!("No user #{} to {}", id, mutation.verb()))
            }
            OutputFormat::Text => Ok(format!("{} user #{}", mutation.past_tense(), id)),
        }
    }

    pub fn databases(self, names: &[String]) -> AppResult<String> {
        match self {
            OutputFormat::Json => to_json(&names),
            OutputFormat::Text => Ok(format!("Databases: {}", names.join(", "))),
        }
    }

    pub fn startup(self, report: &StartupReport) -> AppResult<String> {
        match self {
            OutputFormat::Json => to_json(report),
            OutputFormat::Text => Ok(format!(
                "Users:\n{}\nUser by ID: {}\n{}",
                self.users(&report.users)?,
                report.user,
                self.databases(&report.databases)?
            )),
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::internal(e.to_string()))
}
