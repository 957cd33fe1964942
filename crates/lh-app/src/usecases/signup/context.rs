use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use lh_core::signup::SignupState;

/// Shared sign-up context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: held for a whole dispatch, including pending service calls.
/// - `state`: short reads (`get_state`) and writes during `dispatch`.
#[derive(Clone)]
pub(crate) struct SignupContext {
    state: Arc<Mutex<SignupState>>,
    dispatch_lock: Arc<Mutex<()>>,
}

impl SignupContext {
    pub fn new(initial_state: SignupState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> SignupState {
        self.state.lock().await.clone()
    }

    /// Returns `None` while another dispatch is running.
    pub fn try_acquire_dispatch_lock(&self) -> Option<MutexGuard<'_, ()>> {
        self.dispatch_lock.try_lock().ok()
    }

    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn set_state(&self, state: SignupState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }
}

impl Default for SignupContext {
    fn default() -> Self {
        Self::new(SignupState::new())
    }
}
