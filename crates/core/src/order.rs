use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Fulfilment status of an order as reported by the backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Customers may cancel until the parcel leaves the warehouse.
    pub fn customer_can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Paid)
    }

    /// Statuses staff may move an order to from `self`.
    pub fn next_statuses(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Paid, OrderStatus::Cancelled],
            OrderStatus::Paid => &[OrderStatus::Shipped, OrderStatus::Cancelled],
            OrderStatus::Shipped => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }

    pub fn ensure_transition(&self, to: OrderStatus) -> DomainResult<()> {
        if self.next_statuses().contains(&to) {
            Ok(())
        } else {
            Err(DomainError::invariant(format!(
                "order cannot move from {} to {}",
                self.as_str(),
                to.as_str()
            )))
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses_have_no_successors() {
        for status in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(status.is_terminal());
            assert!(status.next_statuses().is_empty());
        }
    }

    #[test]
    fn shipped_orders_cannot_be_cancelled() {
        assert!(!OrderStatus::Shipped.customer_can_cancel());
        assert!(OrderStatus::Shipped.ensure_transition(OrderStatus::Cancelled).is_err());
        assert!(OrderStatus::Shipped.ensure_transition(OrderStatus::Delivered).is_ok());
    }

    #[test]
    fn pending_can_be_paid_or_cancelled() {
        assert!(OrderStatus::Pending.ensure_transition(OrderStatus::Paid).is_ok());
        assert!(OrderStatus::Pending.customer_can_cancel());
        assert!(OrderStatus::Pending.ensure_transition(OrderStatus::Delivered).is_err());
    }
}
