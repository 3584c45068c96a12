use diesel::prelude::*;
use serde_json::json;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::display_quantity;
use crate::domain::errors::DomainError;
use crate::domain::order::{BuyerContact, ListResult, OrderDraft, OrderLineView, OrderView};
use crate::domain::ports::{OrderHistory, OrderSink};
use crate::schema::{order_lines, orders, payments};

use super::models::{NewOrderLineRow, NewOrderRow, NewPaymentRow, OrderLineRow, OrderRow};

/// Order persistence over Postgres.
///
/// A submission appends to the buyer's order history (order + line rows)
/// and to the global payments ledger in one transaction, so the two
/// records can never disagree.
#[derive(Clone)]
pub struct DieselOrderStore {
    pool: DbPool,
}

impl DieselOrderStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderSink for DieselOrderStore {
    fn submit(&self, user_id: Uuid, draft: &OrderDraft) -> Result<Uuid, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::SinkWrite(e.to_string()))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let order_id = Uuid::new_v4();
            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    user_id,
                    buyer_name: draft.buyer.name.clone(),
                    buyer_address: draft.buyer.address.clone(),
                    buyer_phone: draft.buyer.phone.clone(),
                    payment_method: draft.payment_method.as_str().to_string(),
                    total_amount: draft.total.clone(),
                })
                .execute(conn)?;

            let line_rows: Vec<NewOrderLineRow> = draft
                .lines
                .iter()
                .map(|l| NewOrderLineRow {
                    id: Uuid::new_v4(),
                    order_id,
                    product_id: l.product.id,
                    name: l.product.name.clone(),
                    unit_price: l.product.price.clone(),
                    quantity: l.quantity,
                })
                .collect();
            diesel::insert_into(order_lines::table)
                .values(&line_rows)
                .execute(conn)?;

            // Payments record carries the full cart snapshot as JSON, the
            // way the payments ledger has always stored it.
            let cart_payload: Vec<serde_json::Value> = draft
                .lines
                .iter()
                .map(|l| {
                    json!({
                        "id": l.product.id,
                        "name": l.product.name,
                        "price": l.product.price.to_string(),
                        "image": l.product.image,
                        "quantity": l.quantity,
                        "display_quantity": display_quantity(l.quantity),
                    })
                })
                .collect();

            diesel::insert_into(payments::table)
                .values(&NewPaymentRow {
                    id: Uuid::new_v4(),
                    buyer_name: draft.buyer.name.clone(),
                    buyer_address: draft.buyer.address.clone(),
                    buyer_phone: draft.buyer.phone.clone(),
                    amount: draft.total.clone(),
                    cart: serde_json::Value::Array(cart_payload),
                })
                .execute(conn)?;

            Ok(order_id)
        })
        .map_err(|e| DomainError::SinkWrite(e.to_string()))
    }
}

impl OrderHistory for DieselOrderStore {
    fn find_for_user(
        &self,
        user_id: Uuid,
        order_id: Uuid,
    ) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::id.eq(order_id))
            .filter(orders::user_id.eq(user_id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = order_lines::table
            .filter(order_lines::order_id.eq(order.id))
            .select(OrderLineRow::as_select())
            .load(&mut conn)?;

        Ok(Some(order_view(order, lines)))
    }

    fn list_for_user(
        &self,
        user_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = (page - 1) * limit;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders::table
                .filter(orders::user_id.eq(user_id))
                .count()
                .get_result(conn)?;

            let rows = orders::table
                .filter(orders::user_id.eq(user_id))
                .select(OrderRow::as_select())
                .order(orders::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ListResult {
                items: rows.into_iter().map(|o| order_view(o, vec![])).collect(),
                total,
            })
        })
    }
}

fn order_view(order: OrderRow, lines: Vec<OrderLineRow>) -> OrderView {
    OrderView {
        id: order.id,
        user_id: order.user_id,
        buyer: BuyerContact {
            name: order.buyer_name,
            address: order.buyer_address,
            phone: order.buyer_phone,
        },
        payment_method: order.payment_method,
        total_amount: order.total_amount,
        created_at: order.created_at,
        lines: lines
            .into_iter()
            .map(|l| OrderLineView {
                id: l.id,
                product_id: l.product_id,
                name: l.name,
                unit_price: l.unit_price,
                quantity: l.quantity,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use diesel::prelude::*;
    use uuid::Uuid;

    use super::DieselOrderStore;
    use crate::domain::cart::Cart;
    use crate::domain::catalog::Product;
    use crate::domain::order::{BuyerContact, OrderDraft, PaymentMethod};
    use crate::domain::ports::{OrderHistory, OrderSink};
    use crate::infrastructure::models::{NewUserRow, PaymentRow};
    use crate::infrastructure::testing::setup_db;
    use crate::schema::{payments, users};

    fn insert_user(pool: &crate::db::DbPool) -> Uuid {
        let id = Uuid::new_v4();
        let mut conn = pool.get().expect("Failed to get connection");
        diesel::insert_into(users::table)
            .values(&NewUserRow {
                id,
                name: "Amal Perera".to_string(),
                address: "12 Galle Road, Colombo".to_string(),
                phone: "0771234567".to_string(),
                email: format!("{id}@example.com"),
                password_hash: "x".to_string(),
            })
            .execute(&mut conn)
            .expect("insert user failed");
        id
    }

    fn draft(prices_and_quantities: &[(i64, i32)]) -> OrderDraft {
        let mut cart = Cart::new();
        for (price, quantity) in prices_and_quantities {
            cart.add_quantity(
                Product {
                    id: Uuid::new_v4(),
                    name: "Mango".to_string(),
                    price: BigDecimal::from(*price),
                    image: "https://images.example.com/fruits/mango.jpg".to_string(),
                    description: None,
                },
                *quantity,
            );
        }
        OrderDraft::begin(
            &cart,
            BuyerContact {
                name: "Amal Perera".to_string(),
                address: "12 Galle Road, Colombo".to_string(),
                phone: "0771234567".to_string(),
            },
            PaymentMethod::CashOnDelivery,
        )
    }

    #[tokio::test]
    async fn submit_writes_history_and_payment_together() {
        let (_container, pool) = setup_db().await;
        let store = DieselOrderStore::new(pool.clone());
        let user_id = insert_user(&pool);

        let draft = draft(&[(100, 100), (50, 300)]);
        let order_id = store.submit(user_id, &draft).expect("submit failed");

        let order = store
            .find_for_user(user_id, order_id)
            .expect("find failed")
            .expect("order should exist");
        assert_eq!(order.total_amount, BigDecimal::from(250));
        assert_eq!(order.payment_method, "CASH");
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.buyer.phone, "0771234567");

        let mut conn = pool.get().expect("Failed to get connection");
        let payment_rows: Vec<PaymentRow> = payments::table
            .select(PaymentRow::as_select())
            .load(&mut conn)
            .expect("query failed");
        assert_eq!(payment_rows.len(), 1, "exactly one payment per order");
        assert_eq!(payment_rows[0].amount, BigDecimal::from(250));
        let cart_json = payment_rows[0].cart.as_array().expect("cart is an array");
        assert_eq!(cart_json.len(), 2);
        assert_eq!(cart_json[1]["quantity"], 300);
        assert_eq!(cart_json[1]["display_quantity"], "300g");
    }

    #[tokio::test]
    async fn orders_are_invisible_to_other_users() {
        let (_container, pool) = setup_db().await;
        let store = DieselOrderStore::new(pool.clone());
        let owner = insert_user(&pool);
        let stranger = insert_user(&pool);

        let order_id = store
            .submit(owner, &draft(&[(200, 100)]))
            .expect("submit failed");

        assert!(store
            .find_for_user(stranger, order_id)
            .expect("find failed")
            .is_none());
        assert_eq!(
            store
                .list_for_user(stranger, 1, 20)
                .expect("list failed")
                .total,
            0
        );
    }

    #[tokio::test]
    async fn find_returns_none_for_unknown_id() {
        let (_container, pool) = setup_db().await;
        let store = DieselOrderStore::new(pool.clone());
        let user_id = insert_user(&pool);

        let result = store
            .find_for_user(user_id, Uuid::new_v4())
            .expect("find should not error");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn history_paginates_newest_first() {
        let (_container, pool) = setup_db().await;
        let store = DieselOrderStore::new(pool.clone());
        let user_id = insert_user(&pool);

        for _ in 0..5 {
            store
                .submit(user_id, &draft(&[(100, 100)]))
                .expect("submit failed");
        }

        let page1 = store.list_for_user(user_id, 1, 3).expect("list failed");
        assert_eq!(page1.total, 5);
        assert_eq!(page1.items.len(), 3);

        let page2 = store.list_for_user(user_id, 2, 3).expect("list failed");
        assert_eq!(page2.total, 5);
        assert_eq!(page2.items.len(), 2);
    }

    #[tokio::test]
    async fn submit_fails_cleanly_for_unknown_user() {
        let (_container, pool) = setup_db().await;
        let store = DieselOrderStore::new(pool.clone());

        // No user row: the FK rejects the order insert and the transaction
        // rolls back, leaving no payment behind.
        let result = store.submit(Uuid::new_v4(), &draft(&[(100, 100)]));
        assert!(matches!(
            result,
            Err(crate::domain::errors::DomainError::SinkWrite(_))
        ));

        let mut conn = pool.get().expect("Failed to get connection");
        let count: i64 = payments::table
            .count()
            .get_result(&mut conn)
            .expect("count failed");
        assert_eq!(count, 0);
    }
}
