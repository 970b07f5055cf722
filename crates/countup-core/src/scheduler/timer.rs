use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::Result;

/// Callback run once when a timer fires
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// One-shot timer service used to pace animation steps
pub trait Timer: Send + Sync + 'static {
    type Handle: TimerHandle;

    /// Arrange for `callback` to run once after `delay`
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> Self::Handle;
}

/// Handle to a scheduled callback
pub trait TimerHandle: Send + 'static {
    /// Cancel the callback if it has not fired yet
    ///
    /// Must be a no-op on handles that already fired or were canceled.
    fn cancel(&self);
}

/// Timer backed by tokio tasks
///
/// Each scheduled callback is a task that sleeps for the delay and then runs
/// the callback. Canceling aborts the task.
#[derive(Debug, Clone)]
pub struct TokioTimer {
    runtime: Handle,
}

impl TokioTimer {
    /// Timer on the runtime of the current context
    pub fn current() -> Result<Self> {
        Ok(Self {
            runtime: Handle::try_current()?,
        })
    }

    /// Timer on an explicit runtime
    pub fn with_handle(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Timer for TokioTimer {
    type Handle = TokioTimerHandle;

    fn schedule(&self, delay: Duration, callback: TimerCallback) -> Self::Handle {
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        TokioTimerHandle { task }
    }
}

#[derive(Debug)]
pub struct TokioTimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle for TokioTimerHandle {
    fn cancel(&self) {
        self.task.abort();
    }
}
