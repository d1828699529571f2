use std::io;
use std::sync::Arc;

use actix_web::web;
use admin_console::config::AppConfig;
use admin_console::infrastructure::http_api::HttpAdminApi;
use admin_console::session::Session;
use admin_console::{build_server, AppState};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config =
        AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let session = match &config.api_token {
        Some(token) => Session::with_token(token.clone()),
        None => Session::new(),
    };
    let api = HttpAdminApi::new(&config.api_url, config.api_timeout, session.clone())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let state = web::Data::new(AppState::new(Arc::new(api), session));

    log::info!("Backend API at {}", config.api_url);
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, &config.host, config.port)?.await
}
