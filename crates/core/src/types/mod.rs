//! Shared type definitions.

mod email;
mod id;
mod role;
mod user;

pub use email::{Email, EmailError};
pub use id::UserId;
pub use role::Role;
pub use user::UserProfile;
