use coursedesk::{error::run_with_error_handler, run};

#[tokio::main(flavor = "current_thread")]
#[tracing::instrument]
async fn main() {
    run_with_error_handler(run).await;
}
