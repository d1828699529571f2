pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod session;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use handlers::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::session::session_status,
        handlers::session::login,
        handlers::session::logout,
        handlers::session::dashboard,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::advance_order,
        handlers::orders::cancel_order,
        handlers::catalog::list_categories,
        handlers::catalog::move_category_up,
        handlers::catalog::move_category_down,
        handlers::catalog::toggle_category,
        handlers::catalog::delete_category,
        handlers::catalog::list_banners,
        handlers::catalog::move_banner_up,
        handlers::catalog::move_banner_down,
        handlers::catalog::toggle_banner,
        handlers::catalog::delete_banner,
    ),
    tags(
        (name = "session", description = "Operator login and dashboard"),
        (name = "orders", description = "Order status workflow"),
        (name = "categories", description = "Category ordering and visibility"),
        (name = "banners", description = "Banner ordering and visibility"),
    )
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: web::Data<AppState>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let openapi = ApiDoc::openapi();
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(handlers::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
