use std::{error::Error, future::Future};

use tokio::task::JoinHandle;
use tracing::Instrument;

/// Spawns `fut` in a span named after the task, logging the error it finishes with instead of returning it.
pub fn tokio_spawn(
    name: &'static str,
    fut: impl Future<Output = Result<(), impl Error>> + Send + 'static,
) -> JoinHandle<()> {
    tokio::spawn(
        async move {
            if let Err(error) = fut.await {
                tracing::error!(%error, "task failed");
            }
        }
        .instrument(tracing::trace_span!("task", name)),
    )
}
