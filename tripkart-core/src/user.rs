use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal account record; identity is otherwise delegated, this exists to
/// exercise the ownership rules on payments and bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    pub fn new(email: &str, name: Option<String>, password_hash: String) -> Self {
        Self {
            id: format!("USR-{}", Uuid::new_v4()),
            email: email.to_string(),
            name,
            password_hash,
        }
    }
}
