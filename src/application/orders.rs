use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{ListResult, OrderView};
use crate::domain::ports::OrderHistory;

/// Read access to a user's own order history.
pub struct OrderQueryService<H> {
    history: H,
}

impl<H: OrderHistory> OrderQueryService<H> {
    pub fn new(history: H) -> Self {
        Self { history }
    }

    /// An order is only visible to the user who placed it.
    pub fn get_order(&self, user_id: Uuid, order_id: Uuid) -> Result<OrderView, DomainError> {
        self.history
            .find_for_user(user_id, order_id)?
            .ok_or(DomainError::NotFound)
    }

    pub fn list_orders(
        &self,
        user_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError> {
        self.history.list_for_user(user_id, page, limit)
    }
}
