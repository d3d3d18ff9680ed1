use std::ffi::c_int;
use std::fmt;

use thiserror::Error;

/// Status code every native entry point returns on success.
pub const SUCCESS: c_int = 0;

/// A failed native call: which entry point failed and the status it returned.
///
/// Renders as `"<call>: <code>"`, e.g. `roc_receiver_open(): -1`. The code is
/// passed through verbatim; no attempt is made to interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeError {
    call: &'static str,
    code: c_int,
}

impl NativeError {
    pub fn new(call: &'static str, code: c_int) -> Self {
        Self { call, code }
    }

    /// Call-site label, including the trailing `()`.
    pub fn call(&self) -> &'static str {
        self.call
    }

    pub fn code(&self) -> c_int {
        self.code
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.call, self.code)
    }
}

impl std::error::Error for NativeError {}

/// Translate a native status code into a result.
pub fn check_status(call: &'static str, code: c_int) -> Result<(), NativeError> {
    match code {
        SUCCESS => Ok(()),
        code => Err(NativeError::new(call, code)),
    }
}

/// Errors returned by the binding.
///
/// Usage errors are detected before any native call is made; `Native` wraps
/// whatever the native layer reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RocError {
    #[error("context is nil")]
    ContextNil,

    #[error("context is closed")]
    ContextClosed,

    #[error("receiver is closed")]
    ReceiverClosed,

    #[error("sender is closed")]
    SenderClosed,

    #[error("endpoint is nil")]
    EndpointNil,

    #[error(transparent)]
    Native(#[from] NativeError),

    #[error("string contains a nul byte at position {0}")]
    InteriorNul(usize),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("incompatible native library: {native} (bindings {bindings})")]
    IncompatibleVersion { native: String, bindings: String },
}

impl RocError {
    /// The native status code, if this error came from the native layer.
    pub fn native_code(&self) -> Option<c_int> {
        match self {
            Self::Native(err) => Some(err.code()),
            _ => None,
        }
    }
}
