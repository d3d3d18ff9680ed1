use std::ptr;

use parking_lot::Mutex;
use roc_sys::{roc_context, roc_context_close, roc_context_open};

use crate::models::config::ContextConfig;
use crate::models::error::{check_status, RocError};
use crate::models::state::HandleState;

/// Shared native context that receivers and senders are opened from.
///
/// A context can be shared between threads. Receivers and senders borrow it,
/// so it cannot be dropped while they exist; closing it explicitly while they
/// are still open is left to the native layer to accept or reject.
pub struct Context {
    raw: *mut roc_context,
    state: Mutex<HandleState>,
}

// SAFETY: the native context is thread-safe. The handle is only freed by
// `close`, which holds the state lock, and every use of the handle goes
// through `with_handle` under the same lock.
unsafe impl Send for Context {}
unsafe impl Sync for Context {}

impl Context {
    pub fn open(config: &ContextConfig) -> Result<Self, RocError> {
        let native = config.to_native();
        let mut raw = ptr::null_mut();

        check_status("roc_context_open()", unsafe { roc_context_open(&native, &mut raw) })?;
        log::debug!("context opened: {:?}", config);

        Ok(Self {
            raw,
            state: Mutex::new(HandleState::Open),
        })
    }

    /// Close the context.
    ///
    /// On native failure the context stays open and close may be retried.
    pub fn close(&self) -> Result<(), RocError> {
        let mut state = self.state.lock();
        if state.is_closed() {
            return Err(RocError::ContextClosed);
        }

        check_status("roc_context_close()", unsafe { roc_context_close(self.raw) })?;
        *state = HandleState::Closed;
        log::debug!("context closed");

        Ok(())
    }

    pub fn state(&self) -> HandleState {
        *self.state.lock()
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    /// Run `f` with the native handle, failing if the context is closed.
    /// The state lock is held for the duration so a concurrent close waits.
    pub(crate) fn with_handle<T>(
        &self,
        f: impl FnOnce(*mut roc_context) -> Result<T, RocError>,
    ) -> Result<T, RocError> {
        let state = self.state.lock();
        if state.is_closed() {
            return Err(RocError::ContextClosed);
        }
        f(self.raw)
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        if self.state.get_mut().is_closed() {
            return;
        }
        if let Err(err) = self.close() {
            log::warn!("failed to close context on drop: {}", err);
        }
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("state", &self.state()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_default_config() {
        let ctx = Context::open(&ContextConfig::default()).unwrap();
        assert!(ctx.is_open());

        ctx.close().unwrap();
        assert_eq!(ctx.state(), HandleState::Closed);
    }

    #[test]
    fn open_custom_config() {
        let config = ContextConfig {
            max_packet_size: 1500,
            max_frame_size: 8192,
        };
        let ctx = Context::open(&config).unwrap();
        ctx.close().unwrap();
    }

    #[test]
    fn double_close() {
        let ctx = Context::open(&ContextConfig::default()).unwrap();
        ctx.close().unwrap();

        assert_eq!(ctx.close(), Err(RocError::ContextClosed));
    }

    #[test]
    fn closed_context_rejects_use() {
        let ctx = Context::open(&ContextConfig::default()).unwrap();
        ctx.close().unwrap();

        let res = ctx.with_handle(|_| Ok(()));
        assert_eq!(res, Err(RocError::ContextClosed));
    }

    #[test]
    fn shared_between_threads() {
        let ctx = Context::open(&ContextConfig::default()).unwrap();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert!(ctx.is_open()));
            }
        });

        ctx.close().unwrap();
    }

    #[test]
    fn drop_closes_open_context() {
        let ctx = Context::open(&ContextConfig::default()).unwrap();
        drop(ctx);
    }
}
