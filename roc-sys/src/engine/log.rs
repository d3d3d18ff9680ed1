use std::ffi::CString;
use std::sync::atomic::{AtomicI32, Ordering};

use parking_lot::{const_mutex, Mutex};

use crate::types::*;

static LEVEL: AtomicI32 = AtomicI32::new(ROC_LOG_ERROR);
static HANDLER: Mutex<roc_log_handler> = const_mutex(None);

/// Set the maximum level of messages passed to the log handler.
///
/// Values outside `ROC_LOG_NONE..=ROC_LOG_TRACE` are clamped.
pub unsafe extern "C" fn roc_log_set_level(level: roc_log_level) {
    LEVEL.store(level.clamp(ROC_LOG_NONE, ROC_LOG_TRACE), Ordering::Relaxed);
}

/// Install a log handler, or restore the default one with `None`.
///
/// The default handler forwards messages to the `log` facade.
pub unsafe extern "C" fn roc_log_set_handler(handler: roc_log_handler) {
    *HANDLER.lock() = handler;
}

/// Whether a message at `level` would currently be delivered.
pub fn enabled(level: roc_log_level) -> bool {
    level != ROC_LOG_NONE && level <= LEVEL.load(Ordering::Relaxed)
}

/// Deliver a message to the installed handler.
pub fn emit(level: roc_log_level, component: &str, message: &str) {
    if !enabled(level) {
        return;
    }

    // Copy the handler out so it never runs under the lock.
    let handler = *HANDLER.lock();

    match handler {
        Some(handler) => {
            let component = CString::new(component).unwrap_or_default();
            let message = CString::new(message.replace('\0', " ")).unwrap_or_default();
            unsafe { handler(level, component.as_ptr(), message.as_ptr()) };
        }
        None => {
            let level = match level {
                ROC_LOG_ERROR => ::log::Level::Error,
                ROC_LOG_INFO => ::log::Level::Info,
                ROC_LOG_DEBUG => ::log::Level::Debug,
                _ => ::log::Level::Trace,
            };
            ::log::log!(target: "roc_sys", level, "[{}] {}", component, message);
        }
    }
}
