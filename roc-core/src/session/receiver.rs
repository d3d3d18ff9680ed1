use std::ffi::c_int;
use std::ptr;

use roc_sys::*;

use crate::marshal::{to_native_bool, to_native_str, NativeEndpoint};
use crate::models::config::ReceiverConfig;
use crate::models::endpoint::Endpoint;
use crate::models::error::{check_status, RocError};
use crate::models::network::{Interface, Slot};
use crate::models::state::HandleState;

use super::context::Context;

/// Receiving peer: binds local endpoints and yields decoded samples.
///
/// Typical sequence:
/// ```text
/// open → set_multicast_group / set_reuseaddr → bind → read_floats ... → close
/// ```
///
/// Dropping an open receiver closes it.
pub struct Receiver<'a> {
    raw: *mut roc_receiver,
    state: HandleState,
    context: &'a Context,
}

// SAFETY: the native receiver may move between threads; `&mut self` on every
// operation keeps it from being used by two threads at once.
unsafe impl Send for Receiver<'_> {}

impl<'a> Receiver<'a> {
    /// Open a receiver. `None` stands for a missing context.
    pub fn open(context: impl Into<Option<&'a Context>>, config: &ReceiverConfig) -> Result<Self, RocError> {
        let context = context.into().ok_or(RocError::ContextNil)?;
        let native = config.to_native();

        let raw = context.with_handle(|ctx| {
            let mut raw = ptr::null_mut();
            check_status("roc_receiver_open()", unsafe { roc_receiver_open(ctx, &native, &mut raw) })?;
            Ok(raw)
        })?;
        log::debug!(
            "receiver opened: rate={} channels={:?}",
            config.frame_sample_rate,
            config.frame_channels
        );

        Ok(Self {
            raw,
            state: HandleState::Open,
            context,
        })
    }

    /// Join a multicast group on the interface before it is bound.
    pub fn set_multicast_group(&mut self, slot: Slot, iface: Interface, ip: &str) -> Result<(), RocError> {
        self.ensure_open()?;
        let ip = to_native_str(ip)?;

        check_status("roc_receiver_set_multicast_group()", unsafe {
            roc_receiver_set_multicast_group(self.raw, slot.to_native(), iface.to_native(), ip.as_ptr())
        })?;
        Ok(())
    }

    /// Allow several sockets to bind the same address. Must precede bind.
    pub fn set_reuseaddr(&mut self, slot: Slot, iface: Interface, enabled: bool) -> Result<(), RocError> {
        self.ensure_open()?;

        check_status("roc_receiver_set_reuseaddr()", unsafe {
            roc_receiver_set_reuseaddr(
                self.raw,
                slot.to_native(),
                iface.to_native(),
                to_native_bool(enabled) as c_int,
            )
        })?;
        Ok(())
    }

    /// Bind `endpoint` to the interface in `slot`. `None` stands for a
    /// missing endpoint.
    pub fn bind(&mut self, slot: Slot, iface: Interface, endpoint: Option<&Endpoint>) -> Result<(), RocError> {
        self.ensure_open()?;
        let endpoint = endpoint.ok_or(RocError::EndpointNil)?;

        let mut native = NativeEndpoint::from_endpoint(endpoint)?;
        check_status("roc_receiver_bind()", unsafe {
            roc_receiver_bind(self.raw, slot.to_native(), iface.to_native(), native.as_mut_ptr())
        })?;
        log::debug!("receiver bound: slot={} iface={:?} endpoint={}", slot, iface, endpoint);

        Ok(())
    }

    /// Fill `samples` with interleaved samples. Blocks for the buffer
    /// duration when the receiver uses the internal clock.
    pub fn read_floats(&mut self, samples: &mut [f32]) -> Result<(), RocError> {
        self.ensure_open()?;
        if samples.is_empty() {
            return Ok(());
        }

        let mut frame = roc_frame {
            samples: samples.as_mut_ptr().cast(),
            samples_size: std::mem::size_of_val(samples),
        };
        check_status("roc_receiver_read()", unsafe { roc_receiver_read(self.raw, &mut frame) })?;
        Ok(())
    }

    /// Close the receiver. On native failure it stays open and close may be
    /// retried. The context is never closed by this.
    pub fn close(&mut self) -> Result<(), RocError> {
        self.ensure_open()?;

        check_status("roc_receiver_close()", unsafe { roc_receiver_close(self.raw) })?;
        self.state = HandleState::Closed;
        log::debug!("receiver closed");

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
            HandleState::Closed => Err(RocError::ReceiverClosed),
        }
    }
}

impl Drop for Receiver<'_> {
    fn drop(&mut self) {
        if self.state.is_closed() {
            return;
        }
        if let Err(err) = self.close() {
            log::warn!("failed to close receiver on drop: {}", err);
        }
    }
}

impl std::fmt::Debug for Receiver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Receiver").field("state", &self.state).finish()
    }
}
