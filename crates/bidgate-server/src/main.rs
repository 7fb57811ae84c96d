//! bidgate server
//!
//! - Strict YAML config (`BIDGATE_CONFIG`, default `bidgate.yaml`)
//! - Account activity configurations resolved once at startup
//! - `/v1/activity/check`, `/metrics`, `/healthz`

use tracing_subscriber::{fmt, EnvFilter};

use bidgate_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = config::config_path();
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen = cfg
        .server
        .listen_addr()
        .expect("server.listen must be a valid SocketAddr");
    let accounts = cfg.accounts.len();

    let state = app_state::AppState::new(&cfg).expect("app state init failed");
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, accounts, "bidgate-server starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
