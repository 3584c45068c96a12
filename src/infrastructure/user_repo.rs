use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::profile::{NewUser, ProfileUpdate, UserCredentials, UserProfile};
use crate::schema::users;

use super::models::{NewUserRow, UserRow};

#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for DieselUserRepository {
    fn create(&self, user: NewUser) -> Result<UserProfile, DomainError> {
        let mut conn = self.pool.get()?;

        let id = Uuid::new_v4();
        let row = NewUserRow {
            id,
            name: user.name,
            address: user.address,
            phone: user.phone,
            email: user.email,
            password_hash: user.password_hash,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| match e {
                // The unique index on email backs up the pre-insert check.
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    DomainError::EmailTaken
                }
                other => other.into(),
            })?;

        let stored = users::table
            .filter(users::id.eq(id))
            .select(UserRow::as_select())
            .first(&mut conn)?;
        Ok(profile(stored))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(|r| UserCredentials {
            password_hash: r.password_hash.clone(),
            profile: profile(r),
        }))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = users::table
            .filter(users::id.eq(id))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(profile))
    }

    fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<UserProfile, DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(users::table.filter(users::id.eq(id)))
            .set((
                users::name.eq(update.name),
                users::address.eq(update.address),
                users::phone.eq(update.phone),
                users::email.eq(update.email),
            ))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        updated.map(profile).ok_or(DomainError::NotFound)
    }
}

fn profile(row: UserRow) -> UserProfile {
    UserProfile {
        id: row.id,
        name: row.name,
        address: row.address,
        phone: row.phone,
        email: row.email,
        created_at: row.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::setup_db;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Amal Perera".to_string(),
            address: "12 Galle Road, Colombo".to_string(),
            phone: "0771234567".to_string(),
            email: email.to_string(),
            password_hash: "$2b$12$fakehash".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_look_up_by_email_and_id() {
        let (_container, pool) = setup_db().await;
        let repo = DieselUserRepository::new(pool);

        let created = repo.create(new_user("amal@example.com")).expect("create failed");
        assert_eq!(created.email, "amal@example.com");

        let by_email = repo
            .find_by_email("amal@example.com")
            .expect("find failed")
            .expect("user should exist");
        assert_eq!(by_email.profile.id, created.id);
        assert_eq!(by_email.password_hash, "$2b$12$fakehash");

        let by_id = repo
            .find_by_id(created.id)
            .expect("find failed")
            .expect("user should exist");
        assert_eq!(by_id.email, "amal@example.com");
    }

    #[tokio::test]
    async fn duplicate_email_maps_to_email_taken() {
        let (_container, pool) = setup_db().await;
        let repo = DieselUserRepository::new(pool);

        repo.create(new_user("amal@example.com")).expect("create failed");
        let result = repo.create(new_user("amal@example.com"));
        assert!(matches!(result, Err(DomainError::EmailTaken)));
    }

    #[tokio::test]
    async fn update_profile_persists_and_missing_user_is_not_found() {
        let (_container, pool) = setup_db().await;
        let repo = DieselUserRepository::new(pool);

        let created = repo.create(new_user("amal@example.com")).expect("create failed");
        let updated = repo
            .update_profile(
                created.id,
                ProfileUpdate {
                    name: "Amal P.".to_string(),
                    address: "7 Lake Drive, Kandy".to_string(),
                    phone: "0719876543".to_string(),
                    email: "amal@example.com".to_string(),
                },
            )
            .expect("update failed");
        assert_eq!(updated.address, "7 Lake Drive, Kandy");

        let missing = repo.update_profile(
            Uuid::new_v4(),
            ProfileUpdate {
                name: "Nobody".to_string(),
                address: "Nowhere".to_string(),
                phone: "0".to_string(),
                email: "nobody@example.com".to_string(),
            },
        );
        assert!(matches!(missing, Err(DomainError::NotFound)));
    }
}
