use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::catalog::{Banner, Category, EntityKind, EntityPatch};
use crate::domain::dashboard::DashboardStats;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::ports::{AdminApi, Credentials};
use crate::session::Session;

use super::models::{
    BannerRow, CategoryRow, DashboardRow, Envelope, LoginBody, LoginRow, OrderRow, PatchBody,
    StatusBody,
};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::Remote(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Remote(format!("malformed response: {}", e))
    }
}

// ── Client ────────────────────────────────────────────────────────────────────

/// `AdminApi` over the backend's JSON REST API.
#[derive(Debug, Clone)]
pub struct HttpAdminApi {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpAdminApi {
    pub fn new(base_url: &str, timeout: Duration, session: Session) -> Result<Self, DomainError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        log::debug!("{} {}", method, url);
        let request = self.client.request(method, url);
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: Response) -> Result<Response, DomainError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED => DomainError::Unauthorized,
            StatusCode::NOT_FOUND => DomainError::NotFound(text),
            _ => DomainError::Remote(format!("{}: {}", status, text)),
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DomainError> {
        let response = Self::check(request.send().await?).await?;
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<(), DomainError> {
        Self::check(request.send().await?).await.map(|_| ())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DomainError> {
        self.fetch(self.request(Method::GET, path)).await
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T, DomainError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.fetch(self.request(method, path).json(body)).await
    }

    /// Lists whose payload is not an array are treated as empty.
    async fn get_list<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>, DomainError> {
        let data: serde_json::Value = self.get(path).await?;
        if !data.is_array() {
            log::warn!("GET {} returned a non-list payload; treating as empty", path);
            return Ok(vec![]);
        }
        Ok(serde_json::from_value(data)?)
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn login(&self, credentials: &Credentials) -> Result<String, DomainError> {
        let body = LoginBody {
            username: &credentials.username,
            password: &credentials.password,
        };
        let row: LoginRow = self.send_json(Method::POST, "auth/login", &body).await?;
        Ok(row.token)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, DomainError> {
        let row: Option<DashboardRow> = self.get("dashboard/stats").await?;
        Ok(row.unwrap_or_default().into())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.get_list::<OrderRow>("orders")
            .await?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }

    async fn get_order(&self, id: &str) -> Result<Order, DomainError> {
        let row: OrderRow = self.get(&format!("orders/{}", id)).await?;
        row.try_into()
    }

    async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<Order, DomainError> {
        let body = StatusBody {
            status: status.as_str(),
        };
        let row: OrderRow = self
            .send_json(Method::PATCH, &format!("orders/{}/status", id), &body)
            .await?;
        row.try_into()
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let rows = self.get_list::<CategoryRow>("categories").await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_banners(&self) -> Result<Vec<Banner>, DomainError> {
        let rows = self.get_list::<BannerRow>("banners").await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_entity(
        &self,
        kind: EntityKind,
        id: &str,
        patch: &EntityPatch,
    ) -> Result<(), DomainError> {
        let path = format!("{}/{}", kind.as_path(), id);
        self.execute(self.request(Method::PUT, &path).json(&PatchBody::from(patch)))
            .await
    }

    async fn delete_entity(&self, kind: EntityKind, id: &str) -> Result<(), DomainError> {
        let path = format!("{}/{}", kind.as_path(), id);
        self.execute(self.request(Method::DELETE, &path)).await
    }
}
