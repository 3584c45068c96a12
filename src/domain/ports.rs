use uuid::Uuid;

use super::catalog::CatalogSnapshot;
use super::errors::DomainError;
use super::order::{ListResult, OrderDraft, OrderView};
use super::profile::{NewUser, ProfileUpdate, UserCredentials, UserProfile};

/// Write side of order persistence.
///
/// `submit` is a single atomic-or-failed call: the order history append and
/// the payments record are committed together or not at all. A failure
/// leaves nothing behind, so the caller may simply submit again.
pub trait OrderSink: Send + Sync + 'static {
    fn submit(&self, user_id: Uuid, draft: &OrderDraft) -> Result<Uuid, DomainError>;
}

/// Read side of order persistence, scoped to the owning user.
pub trait OrderHistory: Send + Sync + 'static {
    fn find_for_user(&self, user_id: Uuid, order_id: Uuid)
        -> Result<Option<OrderView>, DomainError>;
    fn list_for_user(&self, user_id: Uuid, page: i64, limit: i64)
        -> Result<ListResult, DomainError>;
}

pub trait UserRepository: Send + Sync + 'static {
    fn create(&self, user: NewUser) -> Result<UserProfile, DomainError>;
    fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, DomainError>;
    fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<UserProfile, DomainError>;
}

/// Source the catalog feed is loaded from.
pub trait CatalogSource: Send + Sync + 'static {
    fn snapshot(&self) -> Result<CatalogSnapshot, DomainError>;
}
