//! Order Repository
//!
//! Header + items are written and deleted inside a single transaction, so a
//! mid-loop failure cannot leave a headless item trail behind.

use super::{RepoError, RepoResult};
use crate::db::models::{
    NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, OrderWithItems, ShippingAddress,
};
use sqlx::{FromRow, SqlitePool};

/// Order row joined with the best-effort user profile (LEFT JOIN on email)
#[derive(Debug, FromRow)]
struct OrderJoinRow {
    id: i64,
    user_email: String,
    total_amount: f64,
    status: OrderStatus,
    address: String,
    payment_id: String,
    created_at: String,
    profile_name: Option<String>,
    profile_phone: Option<String>,
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist one order header plus its items, all-or-nothing.
    ///
    /// Returns the new order id only after every row is committed.
    pub async fn create(&self, order: NewOrder, items: &[NewOrderItem]) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO orders (user_email, total_amount, address, status, payment_id) \
             VALUES (?, ?, ?, 'Pending', ?)",
        )
        .bind(&order.user_email)
        .bind(order.total_amount)
        .bind(&order.address)
        .bind(&order.payment_id)
        .execute(&mut *tx)
        .await?;

        let order_id = result.last_insert_rowid();

        for item in items {
            sqlx::query(
                "INSERT INTO order_items (order_id, product_name, variant_info, quantity, price) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(order_id)
            .bind(&item.product_name)
            .bind(&item.variant_info)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(order_id)
    }

    /// Every order, newest first, joined with items and display fields.
    ///
    /// `final_phone` prefers the phone embedded in the checkout address JSON,
    /// falls back to the user's profile phone, else "N/A".
    pub async fn find_all_with_items(&self) -> RepoResult<Vec<OrderWithItems>> {
        let rows = sqlx::query_as::<_, OrderJoinRow>(
            "SELECT o.id, o.user_email, o.total_amount, o.status, o.address, o.payment_id, \
                    o.created_at, u.name AS profile_name, u.phone AS profile_phone \
             FROM orders o \
             LEFT JOIN users u ON u.email = o.user_email \
             ORDER BY o.created_at DESC, o.id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let items = sqlx::query_as::<_, OrderItem>(
                "SELECT id, order_id, product_name, variant_info, quantity, price \
                 FROM order_items WHERE order_id = ? ORDER BY id",
            )
            .bind(row.id)
            .fetch_all(&self.pool)
            .await?;

            let checkout_phone = serde_json::from_str::<ShippingAddress>(&row.address)
                .ok()
                .map(|a| a.phone)
                .filter(|p| !p.is_empty());
            let final_phone = checkout_phone
                .or_else(|| row.profile_phone.clone().filter(|p| !p.is_empty()))
                .unwrap_or_else(|| "N/A".to_string());

            out.push(OrderWithItems {
                order: Order {
                    id: row.id,
                    user_email: row.user_email,
                    total_amount: row.total_amount,
                    status: row.status,
                    address: row.address,
                    payment_id: row.payment_id,
                    created_at: row.created_at,
                },
                user_name: row.profile_name,
                final_phone,
                items,
            });
        }
        Ok(out)
    }

    /// Fetch one order header
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, user_email, total_amount, status, address, payment_id, created_at \
             FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    /// Set the order status; unknown id is an error, not a silent success
    pub async fn update_status(&self, id: i64, status: OrderStatus) -> RepoResult<()> {
        let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }
        Ok(())
    }

    /// Delete items first, then the header, inside one transaction
    pub async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_items WHERE order_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back the (empty) item delete
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("PRAGMA foreign_keys = ON;")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    fn sample_order(email: &str) -> NewOrder {
        let address = ShippingAddress {
            name: "Asha".into(),
            phone: "9000000000".into(),
            street: "12 Main Rd".into(),
            city: "Pune".into(),
            state: "MH".into(),
            pincode: "411001".into(),
        };
        NewOrder {
            user_email: email.into(),
            total_amount: 1000.0,
            address: serde_json::to_string(&address).unwrap(),
            payment_id: "COD".into(),
        }
    }

    fn sample_items() -> Vec<NewOrderItem> {
        vec![
            NewOrderItem {
                product_name: "Shoe".into(),
                variant_info: "red/42".into(),
                quantity: 2,
                price: 500.0,
            },
            NewOrderItem {
                product_name: "Cap".into(),
                variant_info: "/M".into(),
                quantity: 1,
                price: 0.0,
            },
        ]
    }

    #[tokio::test]
    async fn create_persists_header_and_items() {
        let pool = test_pool().await;
        let repo = OrderRepository::new(pool.clone());

        let id = repo
            .create(sample_order("a@example.com"), &sample_items())
            .await
            .unwrap();

        let orders = repo.find_all_with_items().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order.id, id);
        assert_eq!(orders[0].order.status, OrderStatus::Pending);
        assert_eq!(orders[0].order.payment_id, "COD");
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[0].items[0].variant_info, "red/42");
    }

    #[tokio::test]
    async fn list_is_newest_first_and_resolves_phone() {
        let pool = test_pool().await;
        let repo = OrderRepository::new(pool.clone());

        let first = repo
            .create(sample_order("a@example.com"), &sample_items())
            .await
            .unwrap();
        let second = repo
            .create(sample_order("b@example.com"), &sample_items())
            .await
            .unwrap();

        let orders = repo.find_all_with_items().await.unwrap();
        assert_eq!(orders[0].order.id, second);
        assert_eq!(orders[1].order.id, first);
        // Phone comes from the checkout address JSON
        assert_eq!(orders[0].final_phone, "9000000000");
    }

    #[tokio::test]
    async fn phone_falls_back_to_profile_then_na() {
        let pool = test_pool().await;
        let repo = OrderRepository::new(pool.clone());

        sqlx::query("INSERT INTO users (name, email, phone) VALUES ('Ravi', 'r@example.com', '8111111111')")
            .execute(&pool)
            .await
            .unwrap();

        let mut order = sample_order("r@example.com");
        order.address = serde_json::to_string(&ShippingAddress::default()).unwrap();
        repo.create(order, &sample_items()).await.unwrap();

        let mut orphan = sample_order("nobody@example.com");
        orphan.address = "not json".into();
        repo.create(orphan, &sample_items()).await.unwrap();

        let orders = repo.find_all_with_items().await.unwrap();
        let by_profile = orders
            .iter()
            .find(|o| o.order.user_email == "r@example.com")
            .unwrap();
        assert_eq!(by_profile.final_phone, "8111111111");
        assert_eq!(by_profile.user_name.as_deref(), Some("Ravi"));

        let orphan = orders
            .iter()
            .find(|o| o.order.user_email == "nobody@example.com")
            .unwrap();
        assert_eq!(orphan.final_phone, "N/A");
    }

    #[tokio::test]
    async fn update_status_unknown_id_is_not_found() {
        let pool = test_pool().await;
        let repo = OrderRepository::new(pool.clone());

        let err = repo
            .update_status(7, OrderStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_status_roundtrip() {
        let pool = test_pool().await;
        let repo = OrderRepository::new(pool.clone());

        let id = repo
            .create(sample_order("a@example.com"), &sample_items())
            .await
            .unwrap();
        repo.update_status(id, OrderStatus::Confirmed).await.unwrap();

        let order = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn delete_removes_items_and_header() {
        let pool = test_pool().await;
        let repo = OrderRepository::new(pool.clone());

        let id = repo
            .create(sample_order("a@example.com"), &sample_items())
            .await
            .unwrap();
        repo.delete(id).await.unwrap();

        assert!(repo.find_by_id(id).await.unwrap().is_none());
        let remaining: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE order_id = ?")
                .bind(id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(remaining, 0);

        let err = repo.delete(id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
