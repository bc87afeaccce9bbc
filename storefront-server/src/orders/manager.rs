//! Order Lifecycle Manager
//!
//! 订单生命周期的唯一入口：创建、列表、状态迁移、删除。
//!
//! 主写路径 (数据库) 失败会作为请求失败向上传播；旁路扇出
//! (导出镜像、确认邮件) 是 best-effort — 失败只写日志，
//! 绝不影响主操作的结果。

use std::sync::Arc;

use crate::db::models::{NewOrder, OrderStatus, OrderWithItems};
use crate::db::repository::OrderRepository;
use crate::ledger::{LedgerExporter, LedgerRow};
use crate::notify::EmailNotifier;
use crate::orders::normalize::{CheckoutPayload, NormalizedCheckout, normalize};
use crate::utils::{AppError, AppResult};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct OrdersManager {
    repo: OrderRepository,
    ledger: Arc<LedgerExporter>,
    notifier: Arc<EmailNotifier>,
}

impl OrdersManager {
    pub fn new(pool: SqlitePool, ledger: Arc<LedgerExporter>, notifier: Arc<EmailNotifier>) -> Self {
        Self {
            repo: OrderRepository::new(pool),
            ledger,
            notifier,
        }
    }

    /// Place an order from a raw checkout submission.
    ///
    /// Validation failures short-circuit before any write; the id is
    /// returned only after header and items are committed.
    pub async fn place_order(&self, payload: CheckoutPayload) -> AppResult<i64> {
        let checkout = normalize(payload).map_err(|e| AppError::validation(e.to_string()))?;

        let address_json = serde_json::to_string(&checkout.address)
            .map_err(|e| AppError::internal(format!("address encode failed: {e}")))?;

        let order = NewOrder {
            user_email: checkout.email.clone(),
            total_amount: checkout.total,
            address: address_json,
            payment_id: checkout.payment_id.clone(),
        };
        let order_id = self.repo.create(order, &checkout.items).await?;
        tracing::info!(order_id, email = %checkout.email, "Order placed");

        // 旁路: 导出镜像追加一行，失败不回传
        if let Err(e) = self.ledger.append(ledger_row(order_id, &checkout)).await {
            tracing::warn!(error = %e, order_id, "Ledger append failed, mirror may lag");
        }

        Ok(order_id)
    }

    /// Every order with nested items, newest first
    pub async fn list_orders(&self) -> AppResult<Vec<OrderWithItems>> {
        Ok(self.repo.find_all_with_items().await?)
    }

    /// Transition an order to the given status.
    ///
    /// Any current→new combination is accepted; only set membership is
    /// validated (at deserialization). `Confirmed` additionally fires the
    /// customer notification, fire-and-forget.
    pub async fn update_status(&self, id: i64, status: OrderStatus) -> AppResult<()> {
        self.repo.update_status(id, status).await?;
        tracing::info!(order_id = id, status = %status, "Order status updated");

        if let Err(e) = self
            .ledger
            .update_status(&id.to_string(), status.as_str())
            .await
        {
            tracing::warn!(error = %e, order_id = id, "Ledger status update failed, mirror may lag");
        }

        if status == OrderStatus::Confirmed {
            match self.repo.find_by_id(id).await {
                Ok(Some(order)) => {
                    self.notifier
                        .notify_confirmed(&order.user_email, id, order.total_amount);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, order_id = id, "Could not load order for notification");
                }
            }
        }

        Ok(())
    }

    /// Delete an order (items, header, then mirror row)
    pub async fn delete_order(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(order_id = id, "Order deleted");

        if let Err(e) = self.ledger.delete_row(&id.to_string()).await {
            tracing::warn!(error = %e, order_id = id, "Ledger row delete failed, mirror may lag");
        }

        Ok(())
    }
}

/// Flatten one order into its single human-readable mirror row
fn ledger_row(order_id: i64, checkout: &NormalizedCheckout) -> LedgerRow {
    let items = checkout
        .items
        .iter()
        .map(|i| format!("{} {} x{}", i.product_name, i.variant_info, i.quantity))
        .collect::<Vec<_>>()
        .join(", ");

    LedgerRow {
        order_id: order_id.to_string(),
        date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        customer: checkout.address.name.clone(),
        email: checkout.email.clone(),
        phone: checkout.address.phone.clone(),
        address: checkout.address.flat_line(),
        items,
        total: format!("₹{}", checkout.total),
        status: OrderStatus::Pending.as_str().to_string(),
    }
}
