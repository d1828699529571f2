use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderFilter, OrderStats, OrderStatus};
use crate::domain::ports::AdminApi;

/// Orders as shown to the operator after a load.
#[derive(Debug, Clone)]
pub struct OrderBoard {
    pub orders: Vec<Order>,
    pub stats: OrderStats,
}

/// Result of a successful status change: the notice for the operator and
/// the freshly reloaded list.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub message: String,
    pub status: OrderStatus,
    pub board: OrderBoard,
}

pub struct OrderWorkflow<A: ?Sized> {
    api: Arc<A>,
}

impl<A: AdminApi + ?Sized> OrderWorkflow<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Load all orders, newest first. Stats cover the whole list; the
    /// filter only narrows what is returned.
    pub async fn load(&self, filter: &OrderFilter) -> Result<OrderBoard, DomainError> {
        let mut orders = self.api.list_orders().await.map_err(|e| {
            log::error!("Failed to load orders: {}", e);
            e
        })?;
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.order_number.cmp(&a.order_number))
        });

        let stats = OrderStats::from_orders(&orders);
        orders.retain(|o| filter.matches(o));
        Ok(OrderBoard { orders, stats })
    }

    pub async fn details(&self, id: &str) -> Result<Order, DomainError> {
        self.api.get_order(id).await
    }

    /// Move the order one step along the fulfilment chain.
    ///
    /// `current` is the status the operator saw. Terminal orders are
    /// rejected before any request is made.
    pub async fn advance(&self, id: &str, current: OrderStatus) -> Result<StatusChange, DomainError> {
        let Some(next) = current.next_status() else {
            log::warn!("Rejected advance of order {} in status {}", id, current);
            return Err(DomainError::InvalidTransition(current));
        };

        self.write_status(id, next).await?;
        Ok(StatusChange {
            message: format!("Status changed to \"{}\"", next.label()),
            status: next,
            board: self.load(&OrderFilter::default()).await?,
        })
    }

    /// Force the order into `CANCELLED` from any non-terminal status.
    pub async fn cancel(&self, id: &str, current: OrderStatus) -> Result<StatusChange, DomainError> {
        if !current.can_cancel() {
            log::warn!("Rejected cancel of order {} in status {}", id, current);
            return Err(DomainError::NotCancellable(current));
        }

        self.write_status(id, OrderStatus::Cancelled).await?;
        Ok(StatusChange {
            message: "Order cancelled".to_string(),
            status: OrderStatus::Cancelled,
            board: self.load(&OrderFilter::default()).await?,
        })
    }

    async fn write_status(&self, id: &str, status: OrderStatus) -> Result<(), DomainError> {
        match self.api.set_order_status(id, status).await {
            Ok(_) => {
                log::info!("Order {} moved to {}", id, status);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to set order {} to {}: {}", id, status, e);
                Err(e)
            }
        }
    }
}
