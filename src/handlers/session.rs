use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::dashboard::DashboardStats;
use crate::domain::ports::Credentials;
use crate::errors::AppError;

use super::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub total_orders: u64,
    /// Decimal as a string
    pub revenue: String,
    pub products: u64,
    pub users: u64,
}

impl From<DashboardStats> for DashboardResponse {
    fn from(s: DashboardStats) -> Self {
        DashboardResponse {
            total_orders: s.total_orders,
            revenue: s.revenue.to_string(),
            products: s.products,
            users: s.users,
        }
    }
}

/// GET /session
#[utoipa::path(
    get,
    path = "/session",
    responses((status = 200, description = "Whether a backend token is held", body = SessionResponse)),
    tag = "session"
)]
pub async fn session_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        authenticated: state.auth.is_authenticated(),
    })
}

/// POST /session
///
/// Logs in against the backend; the token is used for every later request.
#[utoipa::path(
    post,
    path = "/session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = SessionResponse),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Invalid username or password"),
        (status = 502, description = "Backend request failed"),
    ),
    tag = "session"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "username and password are required".to_string(),
        ));
    }

    let credentials = Credentials {
        username: req.username.trim().to_string(),
        password: req.password,
    };
    state.auth.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(SessionResponse {
        authenticated: true,
    }))
}

/// DELETE /session
#[utoipa::path(
    delete,
    path = "/session",
    responses((status = 204, description = "Token discarded")),
    tag = "session"
)]
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    state.auth.logout();
    HttpResponse::NoContent().finish()
}

/// GET /dashboard
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Store-wide totals", body = DashboardResponse),
        (status = 401, description = "Not logged in"),
        (status = 502, description = "Backend request failed"),
    ),
    tag = "session"
)]
pub async fn dashboard(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let stats = state.auth.dashboard().await?;
    Ok(HttpResponse::Ok().json(DashboardResponse::from(stats)))
}
