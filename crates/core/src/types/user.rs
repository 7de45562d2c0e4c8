//! User profile carried inside the session record.

use serde::{Deserialize, Serialize};

use crate::types::{Email, Role, UserId};

/// Profile of the logged-in user.
///
/// This is the `user` object the backend returns on login and the shape
/// persisted inside the session record. `id`, `email`, and `role` are
/// mandatory; a record missing any of them fails deserialization and is
/// treated as no session at all. Display fields are optional and unknown
/// backend fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User's backend ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Role governing authorization decisions.
    pub role: Role,
    /// Given name, if the backend provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name, if the backend provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Name of the company the account belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// URL of the company logo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
}

impl UserProfile {
    /// Display name: "first last" when available, otherwise the email.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.to_string(),
        }
    }
}
