use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Ready,
    InDelivery,
    Completed,
    Cancelled,
}

/// Forward edges of the fulfilment chain. `Completed` and `Cancelled` have
/// no entry and therefore no successor.
const NEXT_STATUS: [(OrderStatus, OrderStatus); 5] = [
    (OrderStatus::Pending, OrderStatus::Confirmed),
    (OrderStatus::Confirmed, OrderStatus::Processing),
    (OrderStatus::Processing, OrderStatus::Ready),
    (OrderStatus::Ready, OrderStatus::InDelivery),
    (OrderStatus::InDelivery, OrderStatus::Completed),
];

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Ready,
        OrderStatus::InDelivery,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn next_status(self) -> Option<OrderStatus> {
        NEXT_STATUS
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, to)| *to)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn can_cancel(self) -> bool {
        !self.is_terminal()
    }

    /// Orders that are accepted but not yet delivered.
    pub fn is_in_progress(self) -> bool {
        matches!(
            self,
            OrderStatus::Confirmed
                | OrderStatus::Processing
                | OrderStatus::Ready
                | OrderStatus::InDelivery
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Ready => "READY",
            OrderStatus::InDelivery => "IN_DELIVERY",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Human readable name shown to the operator.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Ready => "Ready",
            OrderStatus::InDelivery => "In delivery",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown order status '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Processing,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Processing => "PROCESSING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PROCESSING" => Ok(PaymentStatus::Processing),
            "PAID" => Ok(PaymentStatus::Paid),
            "FAILED" => Ok(PaymentStatus::Failed),
            "REFUNDED" => Ok(PaymentStatus::Refunded),
            other => Err(DomainError::InvalidInput(format!(
                "unknown payment status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderItem {
    pub product_id: Option<String>,
    pub name: String,
    pub variant: Option<String>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct PromoCode {
    pub code: String,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: String,
    pub order_number: i64,
    pub status: OrderStatus,
    pub payment_status: Option<PaymentStatus>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_type: Option<String>,
    pub items: Vec<OrderItem>,
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub total: BigDecimal,
    pub promo_code: Option<PromoCode>,
    pub created_at: DateTime<Utc>,
}

/// Counters shown above the order table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        orders.iter().fold(Self::default(), |mut stats, order| {
            stats.total += 1;
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Completed => stats.completed += 1,
                s if s.is_in_progress() => stats.in_progress += 1,
                _ => {}
            }
            stats
        })
    }
}

/// Search and status filter applied to a loaded order list.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        let status_ok = self.status.map_or(true, |s| order.status == s);
        status_ok && self.matches_search(order)
    }

    fn matches_search(&self, order: &Order) -> bool {
        let term = match self.search.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return true,
        };
        let needle = term.to_lowercase();

        order.order_number.to_string().contains(term)
            || order
                .customer_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
            || order
                .customer_phone
                .as_deref()
                .is_some_and(|phone| phone.contains(term))
    }
}
