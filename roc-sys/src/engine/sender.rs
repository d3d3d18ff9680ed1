use std::collections::HashMap;
use std::ffi::{c_char, c_int};
use std::net::IpAddr;

use crate::types::*;

use super::config;
use super::context::roc_context;
use super::endpoint::{interface_accepts, roc_endpoint, scheme, Resolved};
use super::error::EngineError;
use super::ffi::{deref, deref_mut, enter, parse_str, store};
use super::log;

#[derive(Debug, Default)]
struct Port {
    outgoing_address: Option<IpAddr>,
    reuseaddr: bool,
    connected: Option<Resolved>,
}

/// Sending peer: tracks connected addresses and accepts written frames.
pub struct roc_sender {
    context: *const roc_context,
    channels: usize,
    fec_encoding: roc_fec_encoding,
    ports: HashMap<(roc_slot, roc_interface), Port>,
}

impl roc_sender {
    fn port(&mut self, slot: roc_slot, iface: roc_interface) -> Result<&mut Port, EngineError> {
        let port = self.ports.entry((slot, iface)).or_default();
        if port.connected.is_some() {
            return Err(EngineError::SlotInUse { slot, iface });
        }
        Ok(port)
    }

    /// Check that a connection carries what this sender's FEC scheme emits.
    fn check_fec(&self, iface: roc_interface, proto: roc_protocol) -> Result<(), EngineError> {
        let (source, repair) = config::fec_protocols(self.fec_encoding);
        let expected = match iface {
            ROC_INTERFACE_AUDIO_SOURCE => Some(source),
            ROC_INTERFACE_AUDIO_REPAIR => repair,
            _ => return Ok(()),
        };

        if expected != Some(proto) {
            return Err(EngineError::InvalidEndpoint(format!(
                "protocol {} does not match the sender fec encoding",
                scheme(proto).unwrap_or("?")
            )));
        }
        Ok(())
    }
}

pub unsafe extern "C" fn roc_sender_open(
    context: *mut roc_context,
    config: *const roc_sender_config,
    result: *mut *mut roc_sender,
) -> c_int {
    enter("sender", || {
        let context_ref = unsafe { deref(context)? };
        let config = unsafe { deref(config)? };
        if result.is_null() {
            return Err(EngineError::NullPointer);
        }

        let channels = config::frame(config.frame_sample_rate, config.frame_channels, config.frame_encoding)?;
        if config.packet_channels != 0 {
            config::channel_count(config.packet_channels)?;
        }
        config::packet_encoding(config.packet_encoding)?;
        config::fec(config.fec_encoding)?;
        config::clock(config.clock_source)?;
        config::resampler(config.resampler_backend, config.resampler_profile)?;

        let sender = Box::new(roc_sender {
            context,
            channels,
            fec_encoding: config.fec_encoding,
            ports: HashMap::new(),
        });

        context_ref.attach();
        log::emit(
            ROC_LOG_DEBUG,
            "sender",
            &format!(
                "opened: rate={} channels={} fec={}",
                config.frame_sample_rate, channels, config.fec_encoding
            ),
        );

        unsafe { store(result, sender) }
    })
}

pub unsafe extern "C" fn roc_sender_set_outgoing_address(
    sender: *mut roc_sender,
    slot: roc_slot,
    iface: roc_interface,
    ip: *const c_char,
) -> c_int {
    enter("sender", || {
        let sender = unsafe { deref_mut(sender)? };
        let ip: IpAddr = unsafe { parse_str(ip)? }.parse()?;
        sender.port(slot, iface)?.outgoing_address = Some(ip);
        Ok(())
    })
}

pub unsafe extern "C" fn roc_sender_set_reuseaddr(
    sender: *mut roc_sender,
    slot: roc_slot,
    iface: roc_interface,
    enabled: c_int,
) -> c_int {
    enter("sender", || {
        let sender = unsafe { deref_mut(sender)? };
        let enabled = match enabled {
            0 => false,
            1 => true,
            other => return Err(EngineError::InvalidConfig(format!("reuseaddr flag {}", other))),
        };
        sender.port(slot, iface)?.reuseaddr = enabled;
        Ok(())
    })
}

pub unsafe extern "C" fn roc_sender_connect(
    sender: *mut roc_sender,
    slot: roc_slot,
    iface: roc_interface,
    endpoint: *const roc_endpoint,
) -> c_int {
    enter("sender", || {
        let sender = unsafe { deref_mut(sender)? };
        let endpoint = unsafe { deref(endpoint)? };

        let address = endpoint.resolve()?;
        if !interface_accepts(iface, address.protocol) {
            return Err(EngineError::Incompatible {
                iface,
                proto: address.protocol,
            });
        }
        if address.port == 0 {
            return Err(EngineError::InvalidEndpoint("cannot connect to port 0".into()));
        }
        sender.check_fec(iface, address.protocol)?;

        let port = sender.port(slot, iface)?;
        if let Some(outgoing) = port.outgoing_address {
            let remote_v6 = address.host.contains(':');
            if outgoing.is_ipv6() != remote_v6 && !outgoing.is_unspecified() {
                return Err(EngineError::InvalidConfig(format!(
                    "outgoing address {} does not match the family of {}",
                    outgoing, address.host
                )));
            }
        }

        log::emit(
            ROC_LOG_DEBUG,
            "sender",
            &format!(
                "connected slot {} interface {} to {}:{} (reuseaddr={})",
                slot, iface, address.host, address.port, port.reuseaddr
            ),
        );
        port.connected = Some(address);

        Ok(())
    })
}

/// Accept a frame of interleaved samples. The frame must hold whole
/// multichannel frames.
pub unsafe extern "C" fn roc_sender_write(sender: *mut roc_sender, frame: *const roc_frame) -> c_int {
    enter("sender", || {
        let sender = unsafe { deref_mut(sender)? };
        let frame = unsafe { deref(frame)? };
        if frame.samples_size == 0 {
            return Ok(());
        }
        if frame.samples.is_null() {
            return Err(EngineError::NullPointer);
        }

        let count = config::frame_samples(frame.samples_size, sender.channels)?;
        let connected = sender
            .ports
            .iter()
            .filter(|((_, iface), port)| *iface == ROC_INTERFACE_AUDIO_SOURCE && port.connected.is_some())
            .count();

        if log::enabled(ROC_LOG_TRACE) {
            log::emit(
                ROC_LOG_TRACE,
                "sender",
                &format!("wrote {} samples for {} source connection(s)", count, connected),
            );
        }
        Ok(())
    })
}

pub unsafe extern "C" fn roc_sender_close(sender: *mut roc_sender) -> c_int {
    enter("sender", || {
        if sender.is_null() {
            return Err(EngineError::NullPointer);
        }

        let sender = unsafe { Box::from_raw(sender) };
        unsafe { (*sender.context).detach() };

        log::emit(ROC_LOG_DEBUG, "sender", "closed");
        Ok(())
    })
}
