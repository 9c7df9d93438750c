mod cart;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let catalog = services::catalog::CatalogClient::from_env();
    tracing::info!(url = catalog.url(), "catalog source configured");

    let (activity_tx, activity_rx) = tokio::sync::mpsc::unbounded_channel();
    let state = state::AppState::new(catalog, activity_tx);

    // Background tasks: expired-session sweep and the cart activity log.
    let _sweeper = services::session::spawn_session_sweeper(state.clone());
    let _activity = services::activity::spawn_activity_task(activity_rx);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "menuboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
