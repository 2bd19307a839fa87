//! Dojo News Web Server
//!
//! Axum-based server exposing the GraphQL endpoint and the server-rendered
//! pages built on top of it.

pub mod routes;
pub mod session;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let page_routes = Router::new()
        .route("/", get(routes::pages::index))
        .route("/login", get(routes::pages::login_form).post(routes::pages::login))
        .route("/signup", get(routes::pages::signup_form).post(routes::pages::signup))
        .route("/logout", post(routes::pages::logout))
        .route("/posts", post(routes::pages::create_post))
        .route("/posts/{id}/{action}", post(routes::pages::post_action));

    Router::new()
        .route(
            "/graphql",
            get(routes::graphql::graphiql).post(routes::graphql::graphql_handler),
        )
        .merge(page_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
