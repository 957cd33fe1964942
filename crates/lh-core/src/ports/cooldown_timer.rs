use async_trait::async_trait;

/// Countdown driving the resend-code throttle display.
///
/// Starting a countdown replaces any running one.
#[async_trait]
pub trait CooldownTimerPort: Send + Sync {
    async fn start(&self, duration_secs: u64) -> anyhow::Result<()>;
    async fn stop(&self) -> anyhow::Result<()>;
}
