use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::catalog_service::Refreshed;
use crate::application::reorder::{Direction, ReorderOutcome};
use crate::domain::catalog::{Banner, Category};
use crate::errors::AppError;

use super::AppState;

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub products_count: u32,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        CategoryResponse {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            position: c.position,
            is_active: c.is_active,
            products_count: c.products_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BannerResponse {
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    pub link_type: String,
    pub link_value: Option<String>,
    pub position: i32,
    pub is_active: bool,
}

impl From<Banner> for BannerResponse {
    fn from(b: Banner) -> Self {
        BannerResponse {
            id: b.id,
            title: b.title,
            image: b.image,
            link_type: b.link_type,
            link_value: b.link_value,
            position: b.position,
            is_active: b.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub active: usize,
}

/// Outcome of a mutating action together with the reloaded list.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse<T> {
    pub message: String,
    pub items: Vec<T>,
    /// Writes the backend refused; only set by position moves.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

fn list_response<E, T>(items: Vec<E>, is_active: impl Fn(&E) -> bool) -> ListResponse<T>
where
    T: From<E>,
{
    let active = items.iter().filter(|e| is_active(e)).count();
    ListResponse {
        total: items.len(),
        active,
        items: items.into_iter().map(T::from).collect(),
    }
}

fn refreshed_response<E, T: From<E> + Serialize>(refreshed: Refreshed<E>) -> HttpResponse {
    HttpResponse::Ok().json(ActionResponse::<T> {
        message: refreshed.message,
        items: refreshed.items.into_iter().map(T::from).collect(),
        errors: vec![],
    })
}

/// A swap where a write failed still returns the reloaded list, with 502.
fn reorder_response<E, T: From<E> + Serialize>(outcome: ReorderOutcome<E>) -> HttpResponse {
    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    let message = outcome.message().to_string();
    HttpResponse::build(status).json(ActionResponse::<T> {
        message,
        errors: outcome.failures.iter().map(|e| e.to_string()).collect(),
        items: outcome.items.into_iter().map(T::from).collect(),
    })
}

// ── Categories ───────────────────────────────────────────────────────────────

/// GET /categories
///
/// Categories in display order (ascending position).
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Categories in display order", body = ListResponse<CategoryResponse>),
        (status = 502, description = "Backend request failed"),
    ),
    tag = "categories"
)]
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items = state.categories.load().await?;
    Ok(HttpResponse::Ok().json(list_response::<_, CategoryResponse>(items, |c| c.is_active)))
}

/// POST /categories/{id}/move-up
///
/// Swaps the category's position with the one displayed above it.
#[utoipa::path(
    post,
    path = "/categories/{id}/move-up",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Positions swapped, or already first", body = ActionResponse<CategoryResponse>),
        (status = 404, description = "Category not found"),
        (status = 502, description = "A position write failed; body holds the reloaded list", body = ActionResponse<CategoryResponse>),
    ),
    tag = "categories"
)]
pub async fn move_category_up(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .categories
        .move_by_id(&path.into_inner(), Direction::Up)
        .await?;
    Ok(reorder_response::<_, CategoryResponse>(outcome))
}

/// POST /categories/{id}/move-down
#[utoipa::path(
    post,
    path = "/categories/{id}/move-down",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Positions swapped, or already last", body = ActionResponse<CategoryResponse>),
        (status = 404, description = "Category not found"),
        (status = 502, description = "A position write failed; body holds the reloaded list", body = ActionResponse<CategoryResponse>),
    ),
    tag = "categories"
)]
pub async fn move_category_down(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .categories
        .move_by_id(&path.into_inner(), Direction::Down)
        .await?;
    Ok(reorder_response::<_, CategoryResponse>(outcome))
}

/// POST /categories/{id}/toggle-active
#[utoipa::path(
    post,
    path = "/categories/{id}/toggle-active",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Activation toggled", body = ActionResponse<CategoryResponse>),
        (status = 404, description = "Category not found"),
        (status = 502, description = "Backend request failed"),
    ),
    tag = "categories"
)]
pub async fn toggle_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let refreshed = state.category_admin.toggle_active(&path.into_inner()).await?;
    Ok(refreshed_response::<_, CategoryResponse>(refreshed))
}

/// DELETE /categories/{id}
///
/// Categories that still hold products are refused without contacting the
/// backend.
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = ActionResponse<CategoryResponse>),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still contains products"),
        (status = 502, description = "Backend request failed"),
    ),
    tag = "categories"
)]
pub async fn delete_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let refreshed = state.category_admin.delete(&path.into_inner()).await?;
    Ok(refreshed_response::<_, CategoryResponse>(refreshed))
}

// ── Banners ──────────────────────────────────────────────────────────────────

/// GET /banners
#[utoipa::path(
    get,
    path = "/banners",
    responses(
        (status = 200, description = "Banners in display order", body = ListResponse<BannerResponse>),
        (status = 502, description = "Backend request failed"),
    ),
    tag = "banners"
)]
pub async fn list_banners(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items = state.banners.load().await?;
    Ok(HttpResponse::Ok().json(list_response::<_, BannerResponse>(items, |b| b.is_active)))
}

/// POST /banners/{id}/move-up
#[utoipa::path(
    post,
    path = "/banners/{id}/move-up",
    params(("id" = String, Path, description = "Banner id")),
    responses(
        (status = 200, description = "Positions swapped, or already first", body = ActionResponse<BannerResponse>),
        (status = 404, description = "Banner not found"),
        (status = 502, description = "A position write failed; body holds the reloaded list", body = ActionResponse<BannerResponse>),
    ),
    tag = "banners"
)]
pub async fn move_banner_up(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .banners
        .move_by_id(&path.into_inner(), Direction::Up)
        .await?;
    Ok(reorder_response::<_, BannerResponse>(outcome))
}

/// POST /banners/{id}/move-down
#[utoipa::path(
    post,
    path = "/banners/{id}/move-down",
    params(("id" = String, Path, description = "Banner id")),
    responses(
        (status = 200, description = "Positions swapped, or already last", body = ActionResponse<BannerResponse>),
        (status = 404, description = "Banner not found"),
        (status = 502, description = "A position write failed; body holds the reloaded list", body = ActionResponse<BannerResponse>),
    ),
    tag = "banners"
)]
pub async fn move_banner_down(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .banners
        .move_by_id(&path.into_inner(), Direction::Down)
        .await?;
    Ok(reorder_response::<_, BannerResponse>(outcome))
}

/// POST /banners/{id}/toggle-active
#[utoipa::path(
    post,
    path = "/banners/{id}/toggle-active",
    params(("id" = String, Path, description = "Banner id")),
    responses(
        (status = 200, description = "Activation toggled", body = ActionResponse<BannerResponse>),
        (status = 404, description = "Banner not found"),
        (status = 502, description = "Backend request failed"),
    ),
    tag = "banners"
)]
pub async fn toggle_banner(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let refreshed = state.banner_admin.toggle_active(&path.into_inner()).await?;
    Ok(refreshed_response::<_, BannerResponse>(refreshed))
}

/// DELETE /banners/{id}
#[utoipa::path(
    delete,
    path = "/banners/{id}",
    params(("id" = String, Path, description = "Banner id")),
    responses(
        (status = 200, description = "Banner deleted", body = ActionResponse<BannerResponse>),
        (status = 404, description = "Banner not found"),
        (status = 502, description = "Backend request failed"),
    ),
    tag = "banners"
)]
pub async fn delete_banner(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let refreshed = state.banner_admin.delete(&path.into_inner()).await?;
    Ok(refreshed_response::<_, BannerResponse>(refreshed))
}
