use thiserror::Error;

use super::order::OrderStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Cannot change status: order is already {}", .0.label())]
    InvalidTransition(OrderStatus),
    #[error("Cannot cancel an order that is {}", .0.label())]
    NotCancellable(OrderStatus),
    #[error("Cannot delete category \"{name}\": it still contains {products} products")]
    CategoryNotEmpty { name: String, products: u32 },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Authentication required")]
    Unauthorized,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Remote request failed: {0}")]
    Remote(String),
}
