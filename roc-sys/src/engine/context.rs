use std::ffi::c_int;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::types::*;

use super::error::EngineError;
use super::ffi::{deref, enter, store};
use super::log;

const DEFAULT_MAX_PACKET_SIZE: u32 = 2048;
const DEFAULT_MAX_FRAME_SIZE: u32 = 4096;

/// Shared engine state that receivers and senders are opened from.
#[derive(Debug)]
pub struct roc_context {
    max_packet_size: u32,
    max_frame_size: u32,
    children: AtomicUsize,
}

impl roc_context {
    fn new(config: &roc_context_config) -> Self {
        let or_default = |value: u32, default: u32| if value == 0 { default } else { value };
        Self {
            max_packet_size: or_default(config.max_packet_size, DEFAULT_MAX_PACKET_SIZE),
            max_frame_size: or_default(config.max_frame_size, DEFAULT_MAX_FRAME_SIZE),
            children: AtomicUsize::new(0),
        }
    }

    pub fn attach(&self) {
        self.children.fetch_add(1, Ordering::SeqCst);
    }

    pub fn detach(&self) {
        self.children.fetch_sub(1, Ordering::SeqCst);
    }
}

pub unsafe extern "C" fn roc_context_open(config: *const roc_context_config, result: *mut *mut roc_context) -> c_int {
    enter("context", || {
        let config = unsafe { deref(config)? };
        let context = Box::new(roc_context::new(config));

        log::emit(
            ROC_LOG_DEBUG,
            "context",
            &format!(
                "opened: max_packet_size={} max_frame_size={}",
                context.max_packet_size, context.max_frame_size
            ),
        );

        unsafe { store(result, context) }
    })
}

/// Close a context. Fails while any receiver or sender is still open.
pub unsafe extern "C" fn roc_context_close(context: *mut roc_context) -> c_int {
    enter("context", || {
        let children = unsafe { deref(context)? }.children.load(Ordering::SeqCst);
        if children > 0 {
            return Err(EngineError::ContextBusy(children));
        }

        drop(unsafe { Box::from_raw(context) });
        log::emit(ROC_LOG_DEBUG, "context", "closed");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_close_default_config() {
        let config = roc_context_config::default();
        let mut context = std::ptr::null_mut();

        unsafe {
            assert_eq!(roc_context_open(&config, &mut context), 0);
            assert!(!context.is_null());
            assert_eq!((*context).max_frame_size, DEFAULT_MAX_FRAME_SIZE);
            assert_eq!(roc_context_close(context), 0);
        }
    }

    #[test]
    fn null_arguments() {
        let config = roc_context_config::default();
        let mut context = std::ptr::null_mut();

        unsafe {
            assert_eq!(roc_context_open(std::ptr::null(), &mut context), -1);
            assert_eq!(roc_context_open(&config, std::ptr::null_mut()), -1);
            assert_eq!(roc_context_close(std::ptr::null_mut()), -1);
        }
    }

    #[test]
    fn close_with_children_fails() {
        let config = roc_context_config::default();
        let mut context = std::ptr::null_mut();

        unsafe {
            assert_eq!(roc_context_open(&config, &mut context), 0);
            (*context).attach();
            assert_eq!(roc_context_close(context), -1);
            (*context).detach();
            assert_eq!(roc_context_close(context), 0);
        }
    }
}
