//! In-memory `AdminApi` that records every remote call.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::catalog::{sort_by_position, Banner, Category, EntityKind, EntityPatch};
use crate::domain::dashboard::DashboardStats;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::ports::{AdminApi, Credentials};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login(String),
    DashboardStats,
    ListOrders,
    GetOrder(String),
    SetOrderStatus(String, OrderStatus),
    ListCategories,
    ListBanners,
    Update(EntityKind, String, EntityPatch),
    Delete(EntityKind, String),
}

#[derive(Default)]
struct State {
    orders: Vec<Order>,
    categories: Vec<Category>,
    banners: Vec<Banner>,
    calls: Vec<Call>,
    failing_ids: HashSet<String>,
    fail_lists: bool,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

impl FakeApi {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().orders = orders;
        api
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().categories = categories;
        api
    }

    pub fn with_banners(banners: Vec<Banner>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().banners = banners;
        api
    }

    /// Writes touching `id` fail with a remote error.
    pub fn fail_writes_for(&self, id: &str) {
        self.state.lock().unwrap().failing_ids.insert(id.to_string());
    }

    pub fn fail_lists(&self) {
        self.state.lock().unwrap().fail_lists = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::SetOrderStatus(..) | Call::Update(..) | Call::Delete(..)
                )
            })
            .collect()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.state.lock().unwrap().orders.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.lock().unwrap().categories.clone()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn check_write(&self, id: &str) -> Result<(), DomainError> {
        if self.state.lock().unwrap().failing_ids.contains(id) {
            return Err(DomainError::Remote(format!("write to {} rejected", id)));
        }
        Ok(())
    }

    fn check_list(&self) -> Result<(), DomainError> {
        if self.state.lock().unwrap().fail_lists {
            return Err(DomainError::Remote("connection refused".to_string()));
        }
        Ok(())
    }
}

fn apply_patch(position: &mut i32, is_active: &mut bool, patch: &EntityPatch) {
    if let Some(p) = patch.position {
        *position = p;
    }
    if let Some(a) = patch.is_active {
        *is_active = a;
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<String, DomainError> {
        self.record(Call::Login(credentials.username.clone()));
        if credentials.password == "secret" {
            Ok(format!("token-{}", credentials.username))
        } else {
            Err(DomainError::Unauthorized)
        }
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, DomainError> {
        self.record(Call::DashboardStats);
        self.check_list()?;
        let orders = self.state.lock().unwrap().orders.len() as u64;
        Ok(DashboardStats {
            total_orders: orders,
            ..DashboardStats::default()
        })
    }

    async fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.record(Call::ListOrders);
        self.check_list()?;
        Ok(self.orders())
    }

    async fn get_order(&self, id: &str) -> Result<Order, DomainError> {
        self.record(Call::GetOrder(id.to_string()));
        self.orders()
            .into_iter()
            .find(|o| o.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("order {}", id)))
    }

    async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<Order, DomainError> {
        self.record(Call::SetOrderStatus(id.to_string(), status));
        self.check_write(id)?;
        let mut state = self.state.lock().unwrap();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("order {}", id)))?;
        order.status = status;
        Ok(order.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.record(Call::ListCategories);
        self.check_list()?;
        let mut items = self.categories();
        sort_by_position(&mut items);
        Ok(items)
    }

    async fn list_banners(&self) -> Result<Vec<Banner>, DomainError> {
        self.record(Call::ListBanners);
        self.check_list()?;
        let mut items = self.state.lock().unwrap().banners.clone();
        sort_by_position(&mut items);
        Ok(items)
    }

    async fn update_entity(
        &self,
        kind: EntityKind,
        id: &str,
        patch: &EntityPatch,
    ) -> Result<(), DomainError> {
        self.record(Call::Update(kind, id.to_string(), patch.clone()));
        self.check_write(id)?;
        let mut state = self.state.lock().unwrap();
        let found = match kind {
            EntityKind::Categories => state.categories.iter_mut().find(|c| c.id == id).map(|c| {
                apply_patch(&mut c.position, &mut c.is_active, patch);
            }),
            EntityKind::Banners => state.banners.iter_mut().find(|b| b.id == id).map(|b| {
                apply_patch(&mut b.position, &mut b.is_active, patch);
            }),
        };
        found.ok_or_else(|| DomainError::NotFound(format!("{} {}", kind, id)))
    }

    async fn delete_entity(&self, kind: EntityKind, id: &str) -> Result<(), DomainError> {
        self.record(Call::Delete(kind, id.to_string()));
        self.check_write(id)?;
        let mut state = self.state.lock().unwrap();
        match kind {
            EntityKind::Categories => state.categories.retain(|c| c.id != id),
            EntityKind::Banners => state.banners.retain(|b| b.id != id),
        }
        Ok(())
    }
}
