/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Primary key type for templates and employees
pub type DbId = i64;

/// The authenticated user a mutation is attributed to.
/// Passed explicitly into every store call that creates data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub user_id: Uuid,
    pub username: String,
}

impl Owner {
    pub fn new(user_id: Uuid, username: impl Into<String>) -> Self {
        Self { user_id, username: username.into() }
    }
}

/// Mutations recorded in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Update,
    Deactivate,
}
