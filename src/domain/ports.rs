use async_trait::async_trait;

use super::catalog::{Banner, Category, EntityKind, EntityPatch};
use super::dashboard::DashboardStats;
use super::errors::DomainError;
use super::order::{Order, OrderStatus};

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The backend this console drives. Every call is a remote operation; the
/// backend is the source of truth for all state.
#[async_trait]
pub trait AdminApi: Send + Sync + 'static {
    /// Exchange credentials for a session token.
    async fn login(&self, credentials: &Credentials) -> Result<String, DomainError>;
    async fn dashboard_stats(&self) -> Result<DashboardStats, DomainError>;

    async fn list_orders(&self) -> Result<Vec<Order>, DomainError>;
    async fn get_order(&self, id: &str) -> Result<Order, DomainError>;
    async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<Order, DomainError>;

    /// Categories sorted ascending by position.
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
    /// Banners sorted ascending by position.
    async fn list_banners(&self) -> Result<Vec<Banner>, DomainError>;
    async fn update_entity(
        &self,
        kind: EntityKind,
        id: &str,
        patch: &EntityPatch,
    ) -> Result<(), DomainError>;
    async fn delete_entity(&self, kind: EntityKind, id: &str) -> Result<(), DomainError>;
}
