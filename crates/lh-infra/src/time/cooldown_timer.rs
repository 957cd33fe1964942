use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};
use tracing::debug;
use lh_core::ports::{CooldownTimerPort, SignupEventPort};

/// Resend countdown backed by a tokio task.
///
/// Emits the remaining seconds once per second, ending with `0`. Only one
/// countdown runs at a time.
pub struct TokioCooldownTimer {
    event_port: Arc<dyn SignupEventPort>,
    running: Mutex<Option<tokio::task::AbortHandle>>,
}

impl TokioCooldownTimer {
    pub fn new(event_port: Arc<dyn SignupEventPort>) -> Self {
        Self {
            event_port,
            running: Mutex::new(None),
        }
    }

    pub async fn is_running(&self) -> bool {
        self.running
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

#[async_trait::async_trait]
impl CooldownTimerPort for TokioCooldownTimer {
    async fn start(&self, duration_secs: u64) -> anyhow::Result<()> {
        let mut running = self.running.lock().await;
        if let Some(existing) = running.take() {
            existing.abort();
        }

        let event_port = Arc::clone(&self.event_port);
        let handle = tokio::spawn(async move {
            for remaining in (0..=duration_secs).rev() {
                event_port.emit_resend_countdown(remaining).await;
                if remaining == 0 {
                    break;
                }
                sleep(Duration::from_secs(1)).await;
            }
        });

        *running = Some(handle.abort_handle());
        debug!(duration_secs, "resend countdown started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        if let Some(handle) = self.running.lock().await.take() {
            handle.abort();
            debug!("resend countdown stopped");
        }
        Ok(())
    }
}
