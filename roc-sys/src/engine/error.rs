use std::net::AddrParseError;
use std::str::Utf8Error;

use crate::types::{roc_interface, roc_protocol, roc_slot, ROC_ERR};

/// Reasons an engine entry point can fail.
///
/// Only the message reaches the caller, through the native log; the status
/// code itself is always [`ROC_ERR`].
#[derive(Debug, thiserror::Error)]
pub(crate) enum EngineError {
    #[error("null pointer")]
    NullPointer,

    #[error("invalid utf-8: {0}")]
    Utf8(#[from] Utf8Error),

    #[error("invalid address: {0}")]
    Address(#[from] AddrParseError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("invalid uri: {0}")]
    InvalidUri(String),

    #[error("interface {iface} does not accept protocol {proto}")]
    Incompatible { iface: roc_interface, proto: roc_protocol },

    #[error("slot {slot} interface {iface} is already in use")]
    SlotInUse { slot: roc_slot, iface: roc_interface },

    #[error("context still has {0} open receiver(s) or sender(s)")]
    ContextBusy(usize),

    #[error("frame of {size} bytes is not a whole number of {channels}-channel frames")]
    FrameSize { size: usize, channels: usize },

    #[error("buffer too small: need {0} bytes")]
    BufferTooSmall(usize),

    #[error("field is not set: {0}")]
    NotSet(&'static str),

    #[error("panic")]
    Panic,
}

impl EngineError {
    pub fn code(&self) -> i32 {
        ROC_ERR
    }
}
