use dotenvy::dotenv;
use tracing::{error, info};

use eduzone::eduzone_config::AppConfig;
use eduzone::logging::init_tracing;
use eduzone::router::init_router;
use eduzone::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing(&config.server.log_dir) {
        eprintln!(
            "❌ Failed to initialize logging in {}: {}",
            config.server.log_dir.display(),
            e
        );
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!(error = %format!("{:#}", e), "Server failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let state = init_app_state(&config).await?;
    let app = init_router(state);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    let port = config.server.port;

    info!(address = %address, environment = %config.server.environment, "Server listening");
    println!("🚀 Server running on http://localhost:{}", port);
    println!("🔌 API available at http://localhost:{}/api", port);
    println!("📚 Swagger UI available at http://localhost:{}/swagger-ui", port);
    println!("📖 Scalar UI available at http://localhost:{}/scalar", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
