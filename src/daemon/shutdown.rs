use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::error;

/// Waits for a termination request and cancels the tracker. `stechuhr stop`
/// reaches a detached tracker through SIGTERM, a console-run `serve` through
/// Ctrl-C.
pub async fn detect_shutdown(cancelation: CancellationToken) {
    select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = terminate_signal() => {},
    };
    cancelation.cancel();
}

#[cfg(unix)]
async fn terminate_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        }
        Err(e) => {
            error!("Can't listen for SIGTERM {e:?}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate_signal() {
    // Detached Windows processes can't receive console events; Ctrl-C above
    // is the only cooperative path there.
    std::future::pending::<()>().await;
}
