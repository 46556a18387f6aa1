use tokio::task::JoinHandle;
use std::collections::HashMap;
use crate::error::{Error, Result};
use tracing::{info, error};

/// Tracks the long-running tasks of the service (poll ticker, HTTP server)
/// and reports any that stop on their own.
///
/// ```ignore
/// let mut supervisor = TaskSupervisor::new();
/// supervisor.spawn("poll_ticker", async move { ticker.run().await });
///
/// if let Err(e) = supervisor.check_health() {
///     error!("Task failure detected: {}", e);
/// }
/// ```
pub struct TaskSupervisor {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl TaskSupervisor {
    pub fn new() -> Self {
        TaskSupervisor {
            tasks: HashMap::new(),
        }
    }

    /// Spawn a background task and register it for monitoring
    pub fn spawn<F>(&mut self, name: impl Into<String>, future: F) -> &mut Self
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        let handle = tokio::spawn(future);

        info!("Spawned background task: {}", name);
        self.tasks.insert(name, handle);
        self
    }

    /// Every task here is meant to run forever, so a finished one is a failure.
    pub fn check_health(&mut self) -> Result<()> {
        let mut failed_tasks: Vec<String> = self.tasks.iter()
            .filter(|(_, handle)| handle.is_finished())
            .map(|(name, _)| name.clone())
            .collect();

        if failed_tasks.is_empty() {
            return Ok(());
        }

        failed_tasks.sort();
        for name in &failed_tasks {
            self.tasks.remove(name);
        }

        let error_msg = format!("Tasks terminated unexpectedly: {:?}", failed_tasks);
        error!("{}", error_msg);
        Err(Error::TaskFailed(error_msg))
    }

    pub fn active_task_count(&self) -> usize {
        self.tasks.len()
    }

    pub async fn shutdown_all(&mut self) {
        info!("Shutting down {} background tasks", self.tasks.len());

        for (name, handle) in self.tasks.drain() {
            handle.abort();
            info!("Aborted task: {}", name);
        }
    }
}

impl Default for TaskSupervisor {
    fn default() -> Self {
        Self::new()
    }
}
