//! Background jobs run while the server is up

use tenantly_auth::SessionStore;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Build the hourly sweep that bulk-deletes expired sessions.
///
/// Lookups already drop expired rows lazily; the sweep keeps sessions that
/// are never touched again from accumulating. The caller starts the
/// returned scheduler and keeps it alive for the life of the server.
pub async fn session_cleanup(sessions: &SessionStore) -> Result<JobScheduler, JobSchedulerError> {
    let sched = JobScheduler::new().await?;
    let sessions = sessions.clone();

    sched
        .add(Job::new_async("0 0 * * * *", move |_uuid, _lock| {
            let sessions = sessions.clone();

            Box::pin(async move {
                match sessions.cleanup_expired().await {
                    Ok(0) => {}
                    Ok(count) => tracing::info!(count, "removed expired sessions"),
                    Err(err) => tracing::error!(err = %err, "failed to remove expired sessions"),
                }
            })
        })?)
        .await?;

    Ok(sched)
}
