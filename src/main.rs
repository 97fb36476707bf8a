use anyhow::Result;
use stechuhr::cli::run_cli;
use tracing::error;

// The whole system is sequential: one tick loop, one writer. A
// current-thread runtime is all it takes.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    run_cli().await.inspect_err(|e| {
        error!("Error running cli {e:?}");
    })?;
    Ok(())
}
