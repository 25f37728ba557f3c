use skincart_core::{DomainError, OrderId, OrderStatus};

use crate::dto::{NewOrder, Order, StatusUpdate};
use crate::error::ClientError;
use crate::http::{ApiClient, segment};

impl ApiClient {
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ClientError> {
        if order.items.is_empty() {
            return Err(DomainError::validation("order has no items").into());
        }
        self.post_json("/orders", order).await
    }

    /// Orders of the signed-in customer.
    pub async fn my_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.get_json("/orders").await
    }

    /// Every order; staff and managers only.
    pub async fn all_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.get_json("/orders/all").await
    }

    pub async fn get_order(&self, id: &OrderId) -> Result<Order, ClientError> {
        self.get_json(&format!("/orders/{}", segment(id.as_str()))).await
    }

    /// Move `order` to `status`, refusing transitions the workflow forbids.
    pub async fn update_order_status(&self, order: &Order, status: OrderStatus) -> Result<Order, ClientError> {
        order.status.ensure_transition(status)?;
        tracing::info!(order = %order.id, from = %order.status, to = %status, "updating order status");
        self.put_json(
            &format!("/orders/{}/status", segment(order.id.as_str())),
            &StatusUpdate { status },
        )
        .await
    }

    pub async fn cancel_order(&self, order: &Order) -> Result<Order, ClientError> {
        if !order.status.customer_can_cancel() {
            return Err(DomainError::invariant(format!(
                "order {} can no longer be cancelled ({})",
                order.id, order.status
            ))
            .into());
        }
        self.post_empty(&format!("/orders/{}/cancel", segment(order.id.as_str())))
            .await
    }
}
