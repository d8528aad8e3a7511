use crate::artifact::ensure_artifact;
use crate::classifier::OrtClassifier;
use crate::config::Config;
use crate::server::HttpServer;

use std::{error::Error, sync::Arc};
use tokio::{signal, sync::broadcast};

/// Bootstraps the model then serves HTTP until SIGINT/SIGTERM.
///
/// The listener is only bound after the artifact is present and the
/// classifier is loaded; any bootstrap failure aborts startup.
pub async fn start_app(config: Config) -> Result<(), Box<dyn Error>> {
    let artifact_path = config.model.get_artifact_path();
    if let Err(e) = ensure_artifact(&config.model.artifact_url, &artifact_path).await {
        tracing::error!("Failed to acquire model artifact: {:?}", e);
        return Err(Box::new(e));
    }

    let classifier = match OrtClassifier::new(&config.model) {
        Ok(classifier) => Arc::new(classifier),
        Err(e) => {
            tracing::error!("Failed to load classifier: {}", e);
            return Err(Box::new(e));
        }
    };

    let server = HttpServer::new(classifier, &config).await?;

    let (shutdown_tx, _) = broadcast::channel(1);
    let server_shutdown_rx = shutdown_tx.subscribe();

    let server_handle = server.run(server_shutdown_rx).await?;

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, starting graceful shutdown.");

    let _ = shutdown_tx.send(());
    let _ = server_handle.await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
