//! TTL Sweeper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::{purge_expired, Entries};
use crate::error::CacheError;

/// Default interval between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

// == Sweeper ==
/// Owned handle to the background sweep of one store.
///
/// The task only holds a weak reference to the entries, so it exits on its
/// own once the store's data is gone. Dropping the handle cancels the task.
#[derive(Debug)]
pub(crate) struct Sweeper {
    token: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Sweeper {
    /// Spawns the sweep loop on the current tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn spawn<V>(entries: Weak<Entries<V>>, interval: Duration) -> Self
    where
        V: Send + Sync + 'static,
    {
        let token = CancellationToken::new();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            info!("Starting TTL sweeper with interval of {:?}", interval);

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }

                let Some(entries) = entries.upgrade() else {
                    debug!("TTL sweeper: store dropped, exiting");
                    break;
                };

                let removed = purge_expired(&entries);
                if removed > 0 {
                    info!("TTL sweep: removed {} expired entries", removed);
                } else {
                    debug!("TTL sweep: no expired entries found");
                }
            }

            info!("TTL sweeper stopped");
        });

        Self {
            token,
            handle: Mutex::new(Some(handle)),
        }
    }

    // == Stop ==
    /// Signals the task to stop and waits for it to finish.
    ///
    /// Only the first call does anything; later calls return
    /// `CacheError::SweeperStopped`.
    pub async fn stop(&self) -> Result<(), CacheError> {
        let handle = self.handle.lock().take().ok_or(CacheError::SweeperStopped)?;
        self.token.cancel();
        handle
            .await
            .map_err(|err| CacheError::SweeperJoin(err.to_string()))
    }

    /// Returns true until `stop` has been called and the task has exited.
    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
