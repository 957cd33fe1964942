mod cooldown_timer;
mod system_clock;

pub use cooldown_timer::TokioCooldownTimer;
pub use system_clock::SystemClock;
