use actix_web::{web, App, HttpServer};
use log::info;

mod config;
mod game;
mod models;
mod routes;
mod websocket;

use crate::config::Settings;
use crate::models::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::load().map_err(std::io::Error::other)?;
    let (host, port) = settings.bind_address();

    info!("Starting tic-tac-toe server at http://{}:{}", host, port);

    // One game per process, shared by every connection
    let app_state = web::Data::new(AppState::new());

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure_routes)
    })
    .bind((host, port))?
    .run()
    .await
}
