pub mod catalog;
pub mod orders;
pub mod session;

use std::sync::Arc;

use actix_web::web;

use crate::application::auth::AuthService;
use crate::application::catalog_service::CatalogService;
use crate::application::order_workflow::OrderWorkflow;
use crate::application::reorder::ListReorderer;
use crate::domain::catalog::{Banner, Category};
use crate::domain::ports::AdminApi;
use crate::session::Session;

/// Services shared by every worker, all backed by the same `AdminApi`.
pub struct AppState {
    pub orders: OrderWorkflow<dyn AdminApi>,
    pub categories: ListReorderer<dyn AdminApi, Category>,
    pub banners: ListReorderer<dyn AdminApi, Banner>,
    pub category_admin: CatalogService<dyn AdminApi, Category>,
    pub banner_admin: CatalogService<dyn AdminApi, Banner>,
    pub auth: AuthService<dyn AdminApi>,
}

impl AppState {
    pub fn new(api: Arc<dyn AdminApi>, session: Session) -> Self {
        Self {
            orders: OrderWorkflow::new(api.clone()),
            categories: ListReorderer::new(api.clone()),
            banners: ListReorderer::new(api.clone()),
            category_admin: CatalogService::new(api.clone()),
            banner_admin: CatalogService::new(api.clone()),
            auth: AuthService::new(api, session),
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/session")
            .route(web::get().to(session::session_status))
            .route(web::post().to(session::login))
            .route(web::delete().to(session::logout)),
    )
    .route("/dashboard", web::get().to(session::dashboard))
    .service(
        web::scope("/orders")
            .route("", web::get().to(orders::list_orders))
            .route("/{id}", web::get().to(orders::get_order))
            .route("/{id}/advance", web::post().to(orders::advance_order))
            .route("/{id}/cancel", web::post().to(orders::cancel_order)),
    )
    .service(
        web::scope("/categories")
            .route("", web::get().to(catalog::list_categories))
            .route("/{id}", web::delete().to(catalog::delete_category))
            .route("/{id}/move-up", web::post().to(catalog::move_category_up))
            .route("/{id}/move-down", web::post().to(catalog::move_category_down))
            .route("/{id}/toggle-active", web::post().to(catalog::toggle_category)),
    )
    .service(
        web::scope("/banners")
            .route("", web::get().to(catalog::list_banners))
            .route("/{id}", web::delete().to(catalog::delete_banner))
            .route("/{id}/move-up", web::post().to(catalog::move_banner_up))
            .route("/{id}/move-down", web::post().to(catalog::move_banner_down))
            .route("/{id}/toggle-active", web::post().to(catalog::toggle_banner)),
    );
}
