use tokio::signal;

/// Resolves on Ctrl+C. If the handler cannot be installed it never resolves.
pub async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => {
            #[cfg(not(windows))]
            println!();
            tracing::info!("Ctrl+C recieved, closing the review console.");
        }
        Err(e) => {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    }
}
