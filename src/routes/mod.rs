use actix_files as fs;
use actix_web::web;

/// HTTP handler for the index page
pub async fn index() -> actix_web::Result<fs::NamedFile> {
    Ok(fs::NamedFile::open_async("./static/index.html").await?)
}

/// Configure the HTTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws").route(web::get().to(crate::websocket::ws_index)))
        .service(web::resource("/").route(web::get().to(index)))
        .service(fs::Files::new("/static", "./static"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppState;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn index_serves_the_client_page() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new()))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("/ws"));
    }

    #[actix_web::test]
    async fn plain_get_on_ws_is_not_upgraded() {
        let state = web::Data::new(AppState::new());
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/ws").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(state.session.lock().bound_connections().is_empty());
    }
}
