use storefront_api::{app, config, database, services::chat::ChatClient, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DB_*, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_api=debug,tower_http=info".into()),
        )
        .init();

    let cfg = config::config();

    // Unrecoverable startup failures are fatal: a backend without its
    // database has nothing useful to serve.
    let pool = match database::connect(&cfg.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("failed to connect to PostgreSQL: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("connected to PostgreSQL");

    if let Err(e) = database::schema::create_tables(&pool).await {
        tracing::error!("failed to create tables: {e}");
        std::process::exit(1);
    }

    let chat = match ChatClient::from_config(&cfg.chat) {
        Some(client) => {
            tracing::info!("chat client initialized (model {})", cfg.chat.model);
            Some(client)
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; chat endpoints will report failure");
            None
        }
    };

    let state = AppState {
        pool: pool.clone(),
        chat,
    };

    let bind_addr = format!("0.0.0.0:{}", cfg.server.port);
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("failed to bind {bind_addr}: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("listening on http://{bind_addr}");

    if let Err(e) = axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("server error: {e}");
    }

    // In-flight requests have drained by now; release the pool last.
    pool.close().await;
    tracing::info!("database pool closed, exiting");
}

/// Resolves on SIGINT or SIGTERM. axum stops accepting connections and
/// lets in-flight requests finish before `serve` returns.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
