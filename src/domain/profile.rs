use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The authenticated user's stored profile. Delivery details for checkout
/// are prefilled from here.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an account; the password is already hashed by the
/// time it reaches the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
}

/// Stored credentials, for sign-in verification.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub profile: UserProfile,
    pub password_hash: String,
}

/// Editable profile fields.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}
