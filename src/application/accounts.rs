use uuid::Uuid;

use crate::auth;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::profile::{NewUser, ProfileUpdate, UserProfile};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration, sign-in and profile management over a [`UserRepository`].
pub struct AccountService<U> {
    users: U,
}

impl<U: UserRepository> AccountService<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    pub fn sign_up(&self, input: SignUpInput) -> Result<UserProfile, DomainError> {
        let email = input.email.trim().to_string();
        let password = input.password.trim().to_string();
        let confirm = input.confirm_password.trim();

        if input.name.is_empty()
            || input.address.is_empty()
            || input.phone.is_empty()
            || email.is_empty()
            || password.is_empty()
            || confirm.is_empty()
        {
            return Err(DomainError::validation("Please fill all fields"));
        }
        if password != confirm {
            return Err(DomainError::validation("Passwords do not match"));
        }
        if !valid_email(&email) {
            return Err(DomainError::validation(
                "Please enter a valid email address",
            ));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(
                "Password should be at least 6 characters",
            ));
        }
        if self.users.find_by_email(&email)?.is_some() {
            return Err(DomainError::EmailTaken);
        }

        let profile = self.users.create(NewUser {
            name: input.name,
            address: input.address,
            phone: input.phone,
            email,
            password_hash: auth::hash_password(&password)?,
        })?;
        log::info!("registered user {}", profile.id);
        Ok(profile)
    }

    /// Wrong email and wrong password are indistinguishable to the caller.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, DomainError> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::validation("Please enter email and password"));
        }

        let credentials = self
            .users
            .find_by_email(email)?
            .ok_or(DomainError::InvalidCredentials)?;
        if !auth::verify_password(&credentials.password_hash, password)? {
            return Err(DomainError::InvalidCredentials);
        }
        Ok(credentials.profile)
    }

    pub fn profile(&self, user_id: Uuid) -> Result<UserProfile, DomainError> {
        self.users.find_by_id(user_id)?.ok_or(DomainError::NotFound)
    }

    pub fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<UserProfile, DomainError> {
        if update.name.is_empty()
            || update.address.is_empty()
            || update.phone.is_empty()
            || update.email.is_empty()
        {
            return Err(DomainError::validation(
                "Please fill all fields before saving",
            ));
        }
        if !valid_email(update.email.trim()) {
            return Err(DomainError::validation(
                "Please enter a valid email address",
            ));
        }
        self.users.update_profile(user_id, update)
    }
}

/// Same shape check the storefront has always applied: one `@`, no
/// whitespace, and a dot with something on both sides in the domain part.
fn valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::UserCredentials;
    use chrono::Utc;
    use std::sync::Mutex;

    /// In-memory user store.
    #[derive(Default)]
    struct FakeUsers {
        rows: Mutex<Vec<UserCredentials>>,
    }

    impl UserRepository for FakeUsers {
        fn create(&self, user: NewUser) -> Result<UserProfile, DomainError> {
            let profile = UserProfile {
                id: Uuid::new_v4(),
                name: user.name,
                address: user.address,
                phone: user.phone,
                email: user.email,
                created_at: Utc::now(),
            };
            self.rows
                .lock()
                .expect("lock")
                .push(UserCredentials {
                    profile: profile.clone(),
                    password_hash: user.password_hash,
                });
            Ok(profile)
        }

        fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self
                .rows
                .lock()
                .expect("lock")
                .iter()
                .find(|c| c.profile.email == email)
                .cloned())
        }

        fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, DomainError> {
            Ok(self
                .rows
                .lock()
                .expect("lock")
                .iter()
                .find(|c| c.profile.id == id)
                .map(|c| c.profile.clone()))
        }

        fn update_profile(
            &self,
            id: Uuid,
            update: ProfileUpdate,
        ) -> Result<UserProfile, DomainError> {
            let mut rows = self.rows.lock().expect("lock");
            let row = rows
                .iter_mut()
                .find(|c| c.profile.id == id)
                .ok_or(DomainError::NotFound)?;
            row.profile.name = update.name;
            row.profile.address = update.address;
            row.profile.phone = update.phone;
            row.profile.email = update.email;
            Ok(row.profile.clone())
        }
    }

    fn input() -> SignUpInput {
        SignUpInput {
            name: "Amal Perera".to_string(),
            address: "12 Galle Road, Colombo".to_string(),
            phone: "0771234567".to_string(),
            email: "amal@example.com".to_string(),
            password: "secret99".to_string(),
            confirm_password: "secret99".to_string(),
        }
    }

    #[test]
    fn sign_up_then_sign_in_round_trip() {
        let service = AccountService::new(FakeUsers::default());
        let profile = service.sign_up(input()).expect("sign up failed");

        let back = service
            .sign_in(" amal@example.com ", " secret99 ")
            .expect("sign in failed");
        assert_eq!(back.id, profile.id);
    }

    #[test]
    fn sign_up_rejects_missing_fields_and_mismatched_passwords() {
        let service = AccountService::new(FakeUsers::default());

        let mut missing = input();
        missing.phone = String::new();
        assert!(matches!(
            service.sign_up(missing),
            Err(DomainError::Validation(_))
        ));

        let mut mismatch = input();
        mismatch.confirm_password = "different".to_string();
        assert!(matches!(
            service.sign_up(mismatch),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn sign_up_rejects_short_passwords_and_bad_emails() {
        let service = AccountService::new(FakeUsers::default());

        let mut short = input();
        short.password = "abc".to_string();
        short.confirm_password = "abc".to_string();
        assert!(matches!(
            service.sign_up(short),
            Err(DomainError::Validation(_))
        ));

        for bad in ["plainaddress", "a @b.c", "a@b", "a@b.", "@b.c"] {
            let mut invalid = input();
            invalid.email = bad.to_string();
            assert!(
                matches!(service.sign_up(invalid), Err(DomainError::Validation(_))),
                "email {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn duplicate_email_is_a_distinct_error() {
        let service = AccountService::new(FakeUsers::default());
        service.sign_up(input()).expect("first sign up failed");
        assert!(matches!(
            service.sign_up(input()),
            Err(DomainError::EmailTaken)
        ));
    }

    #[test]
    fn sign_in_with_wrong_password_or_unknown_email_is_invalid_credentials() {
        let service = AccountService::new(FakeUsers::default());
        service.sign_up(input()).expect("sign up failed");

        assert!(matches!(
            service.sign_in("amal@example.com", "wrong-password"),
            Err(DomainError::InvalidCredentials)
        ));
        assert!(matches!(
            service.sign_in("nobody@example.com", "secret99"),
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[test]
    fn profile_update_requires_every_field() {
        let service = AccountService::new(FakeUsers::default());
        let profile = service.sign_up(input()).expect("sign up failed");

        let result = service.update_profile(
            profile.id,
            ProfileUpdate {
                name: "Amal P.".to_string(),
                address: String::new(),
                phone: "0771234567".to_string(),
                email: "amal@example.com".to_string(),
            },
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let updated = service
            .update_profile(
                profile.id,
                ProfileUpdate {
                    name: "Amal P.".to_string(),
                    address: "7 Lake Drive".to_string(),
                    phone: "0719876543".to_string(),
                    email: "amal@example.com".to_string(),
                },
            )
            .expect("update failed");
        assert_eq!(updated.address, "7 Lake Drive");
    }
}
