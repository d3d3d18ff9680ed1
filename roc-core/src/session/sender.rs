use std::ffi::c_int;
use std::ptr;

use roc_sys::*;

use crate::marshal::{to_native_bool, to_native_str, NativeEndpoint};
use crate::models::config::SenderConfig;
use crate::models::endpoint::Endpoint;
use crate::models::error::{check_status, RocError};
use crate::models::network::{Interface, Slot};
use crate::models::state::HandleState;

use super::context::Context;

/// Sending peer: connects to remote endpoints and encodes written samples.
///
/// Mirrors [`Receiver`](super::receiver::Receiver): `connect` takes the place
/// of `bind` and `write_floats` the place of `read_floats`.
pub struct Sender<'a> {
    raw: *mut roc_sender,
    state: HandleState,
    context: &'a Context,
}

// SAFETY: see `Receiver`.
unsafe impl Send for Sender<'_> {}

impl<'a> Sender<'a> {
    /// Open a sender. `None` stands for a missing context.
    pub fn open(context: impl Into<Option<&'a Context>>, config: &SenderConfig) -> Result<Self, RocError> {
        let context = context.into().ok_or(RocError::ContextNil)?;
        let native = config.to_native();

        let raw = context.with_handle(|ctx| {
            let mut raw = ptr::null_mut();
            check_status("roc_sender_open()", unsafe { roc_sender_open(ctx, &native, &mut raw) })?;
            Ok(raw)
        })?;
        log::debug!(
            "sender opened: rate={} channels={:?} fec={:?}",
            config.frame_sample_rate,
            config.frame_channels,
            config.fec_encoding
        );

        Ok(Self {
            raw,
            state: HandleState::Open,
            context,
        })
    }

    /// Send from a specific local address. Must precede connect.
    pub fn set_outgoing_address(&mut self, slot: Slot, iface: Interface, ip: &str) -> Result<(), RocError> {
        self.ensure_open()?;
        let ip = to_native_str(ip)?;

        check_status("roc_sender_set_outgoing_address()", unsafe {
            roc_sender_set_outgoing_address(self.raw, slot.to_native(), iface.to_native(), ip.as_ptr())
        })?;
        Ok(())
    }

    pub fn set_reuseaddr(&mut self, slot: Slot, iface: Interface, enabled: bool) -> Result<(), RocError> {
        self.ensure_open()?;

        check_status("roc_sender_set_reuseaddr()", unsafe {
            roc_sender_set_reuseaddr(
                self.raw,
                slot.to_native(),
                iface.to_native(),
                to_native_bool(enabled) as c_int,
            )
        })?;
        Ok(())
    }

    /// Connect the interface in `slot` to a remote `endpoint`. `None` stands
    /// for a missing endpoint.
    pub fn connect(&mut self, slot: Slot, iface: Interface, endpoint: Option<&Endpoint>) -> Result<(), RocError> {
        self.ensure_open()?;
        let endpoint = endpoint.ok_or(RocError::EndpointNil)?;

        let native = NativeEndpoint::from_endpoint(endpoint)?;
        check_status("roc_sender_connect()", unsafe {
            roc_sender_connect(self.raw, slot.to_native(), iface.to_native(), native.as_ptr())
        })?;
        log::debug!("sender connected: slot={} iface={:?} endpoint={}", slot, iface, endpoint);

        Ok(())
    }

    /// Encode and send interleaved samples. Blocks for the buffer duration
    /// when the sender uses the internal clock.
    pub fn write_floats(&mut self, samples: &[f32]) -> Result<(), RocError> {
        self.ensure_open()?;
        if samples.is_empty() {
            return Ok(());
        }

        let frame = roc_frame {
            samples: samples.as_ptr() as *mut _,
            samples_size: std::mem::size_of_val(samples),
        };
        check_status("roc_sender_write()", unsafe { roc_sender_write(self.raw, &frame) })?;
        Ok(())
    }

    /// Close the sender. On native failure it stays open and close may be
    /// retried.
    pub fn close(&mut self) -> Result<(), RocError> {
        self.ensure_open()?;

        check_status("roc_sender_close()", unsafe { roc_sender_close(self.raw) })?;
        self.state = HandleState::Closed;
        log::debug!("sender closed");

        Ok(())
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn context(&self) -> &'a Context {
        self.context
    }

    fn ensure_open(&self) -> Result<(), RocError> {
        match self.state {
            HandleState::Open => Ok(()),
            HandleState::Closed => Err(RocError::SenderClosed),
        }
    }
}

impl Drop for Sender<'_> {
    fn drop(&mut self) {
        if self.state.is_closed() {
            return;
        }
        if let Err(err) = self.close() {
            log::warn!("failed to close sender on drop: {}", err);
        }
    }
}

impl std::fmt::Debug for Sender<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sender").field("state", &self.state).finish()
    }
}
