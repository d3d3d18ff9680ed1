use std::collections::HashMap;
use std::ffi::{c_char, c_int};
use std::net::IpAddr;

use crate::types::*;

use super::config;
use super::context::roc_context;
use super::endpoint::{interface_accepts, roc_endpoint, Resolved};
use super::error::EngineError;
use super::ffi::{deref, deref_mut, enter, parse_str, store};
use super::log;

#[derive(Debug, Default)]
struct Port {
    multicast_group: Option<IpAddr>,
    reuseaddr: bool,
    bound: Option<Resolved>,
}

/// Receiving peer: tracks bound addresses and yields silence on read.
pub struct roc_receiver {
    context: *const roc_context,
    channels: usize,
    ports: HashMap<(roc_slot, roc_interface), Port>,
}

impl roc_receiver {
    fn port(&mut self, slot: roc_slot, iface: roc_interface) -> Result<&mut Port, EngineError> {
        let port = self.ports.entry((slot, iface)).or_default();
        if port.bound.is_some() {
            return Err(EngineError::SlotInUse { slot, iface });
        }
        Ok(port)
    }
}

pub unsafe extern "C" fn roc_receiver_open(
    context: *mut roc_context,
    config: *const roc_receiver_config,
    result: *mut *mut roc_receiver,
) -> c_int {
    enter("receiver", || {
        let context_ref = unsafe { deref(context)? };
        let config = unsafe { deref(config)? };
        if result.is_null() {
            return Err(EngineError::NullPointer);
        }

        let channels = config::frame(config.frame_sample_rate, config.frame_channels, config.frame_encoding)?;
        config::clock(config.clock_source)?;
        config::resampler(config.resampler_backend, config.resampler_profile)?;

        let receiver = Box::new(roc_receiver {
            context,
            channels,
            ports: HashMap::new(),
        });

        context_ref.attach();
        log::emit(
            ROC_LOG_DEBUG,
            "receiver",
            &format!(
                "opened: rate={} channels={} target_latency={}ns",
                config.frame_sample_rate, channels, config.target_latency
            ),
        );

        unsafe { store(result, receiver) }
    })
}

pub unsafe extern "C" fn roc_receiver_set_multicast_group(
    receiver: *mut roc_receiver,
    slot: roc_slot,
    iface: roc_interface,
    ip: *const c_char,
) -> c_int {
    enter("receiver", || {
        let receiver = unsafe { deref_mut(receiver)? };
        let ip: IpAddr = unsafe { parse_str(ip)? }.parse()?;
        receiver.port(slot, iface)?.multicast_group = Some(ip);
        Ok(())
    })
}

pub unsafe extern "C" fn roc_receiver_set_reuseaddr(
    receiver: *mut roc_receiver,
    slot: roc_slot,
    iface: roc_interface,
    enabled: c_int,
) -> c_int {
    enter("receiver", || {
        let receiver = unsafe { deref_mut(receiver)? };
        let enabled = match enabled {
            0 => false,
            1 => true,
            other => return Err(EngineError::InvalidConfig(format!("reuseaddr flag {}", other))),
        };
        receiver.port(slot, iface)?.reuseaddr = enabled;
        Ok(())
    })
}

/// Bind an interface of `slot` to a local address. Each slot and interface
/// pair binds at most once.
pub unsafe extern "C" fn roc_receiver_bind(
    receiver: *mut roc_receiver,
    slot: roc_slot,
    iface: roc_interface,
    endpoint: *mut roc_endpoint,
) -> c_int {
    enter("receiver", || {
        let receiver = unsafe { deref_mut(receiver)? };
        let endpoint = unsafe { deref(endpoint.cast_const())? };

        let address = endpoint.resolve()?;
        if !interface_accepts(iface, address.protocol) {
            return Err(EngineError::Incompatible {
                iface,
                proto: address.protocol,
            });
        }

        let port = receiver.port(slot, iface)?;
        if let Some(group) = port.multicast_group {
            if !group.is_multicast() {
                return Err(EngineError::InvalidConfig(format!("{} is not a multicast group", group)));
            }
        }

        log::emit(
            ROC_LOG_DEBUG,
            "receiver",
            &format!(
                "bound slot {} interface {} to {}:{} (reuseaddr={})",
                slot, iface, address.host, address.port, port.reuseaddr
            ),
        );
        port.bound = Some(address);

        Ok(())
    })
}

/// Fill `frame` with silence. The frame must hold whole multichannel frames.
pub unsafe extern "C" fn roc_receiver_read(receiver: *mut roc_receiver, frame: *mut roc_frame) -> c_int {
    enter("receiver", || {
        let receiver = unsafe { deref_mut(receiver)? };
        let frame = unsafe { deref_mut(frame)? };
        if frame.samples_size == 0 {
            return Ok(());
        }
        if frame.samples.is_null() {
            return Err(EngineError::NullPointer);
        }

        let count = config::frame_samples(frame.samples_size, receiver.channels)?;
        unsafe { std::slice::from_raw_parts_mut(frame.samples as *mut f32, count) }.fill(0.0);

        Ok(())
    })
}

pub unsafe extern "C" fn roc_receiver_close(receiver: *mut roc_receiver) -> c_int {
    enter("receiver", || {
        if receiver.is_null() {
            return Err(EngineError::NullPointer);
        }

        let receiver = unsafe { Box::from_raw(receiver) };
        unsafe { (*receiver.context).detach() };

        log::emit(ROC_LOG_DEBUG, "receiver", "closed");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::super::context::{roc_context_close, roc_context_open};
    use super::super::endpoint::*;
    use super::*;

    fn receiver_config() -> roc_receiver_config {
        roc_receiver_config {
            frame_sample_rate: 44100,
            frame_channels: ROC_CHANNEL_SET_STEREO,
            frame_encoding: ROC_FRAME_ENCODING_PCM_FLOAT,
            clock_source: ROC_CLOCK_EXTERNAL,
            resampler_profile: ROC_RESAMPLER_PROFILE_DISABLE,
            ..Default::default()
        }
    }

    unsafe fn open_context() -> *mut roc_context {
        let mut context = ptr::null_mut();
        assert_eq!(unsafe { roc_context_open(&roc_context_config::default(), &mut context) }, 0);
        context
    }

    unsafe fn endpoint(uri: &std::ffi::CStr) -> *mut roc_endpoint {
        let mut endpoint = ptr::null_mut();
        unsafe {
            assert_eq!(roc_endpoint_allocate(&mut endpoint), 0);
            assert_eq!(roc_endpoint_set_uri(endpoint, uri.as_ptr()), 0);
        }
        endpoint
    }

    #[test]
    fn open_rejects_zero_config() {
        unsafe {
            let context = open_context();
            let mut receiver = ptr::null_mut();

            assert_eq!(roc_receiver_open(context, &roc_receiver_config::default(), &mut receiver), -1);
            assert!(receiver.is_null());
            assert_eq!(roc_context_close(context), 0);
        }
    }

    #[test]
    fn context_close_blocked_by_receiver() {
        unsafe {
            let context = open_context();
            let mut receiver = ptr::null_mut();

            assert_eq!(roc_receiver_open(context, &receiver_config(), &mut receiver), 0);
            assert_eq!(roc_context_close(context), -1);
            assert_eq!(roc_receiver_close(receiver), 0);
            assert_eq!(roc_context_close(context), 0);
        }
    }

    #[test]
    fn bind_checks_interface_and_slot() {
        unsafe {
            let context = open_context();
            let mut receiver = ptr::null_mut();
            assert_eq!(roc_receiver_open(context, &receiver_config(), &mut receiver), 0);

            let source = endpoint(c"rtp://127.0.0.1:32001");
            let control = endpoint(c"rtsp://127.0.0.1:32002");

            assert_eq!(roc_receiver_bind(receiver, 0, ROC_INTERFACE_AUDIO_CONTROL, control), -1);
            assert_eq!(roc_receiver_bind(receiver, 0, ROC_INTERFACE_AUDIO_SOURCE, source), 0);
            assert_eq!(roc_receiver_bind(receiver, 0, ROC_INTERFACE_AUDIO_SOURCE, source), -1);
            assert_eq!(roc_receiver_set_reuseaddr(receiver, 0, ROC_INTERFACE_AUDIO_SOURCE, 1), -1);

            assert_eq!(roc_endpoint_deallocate(source), 0);
            assert_eq!(roc_endpoint_deallocate(control), 0);
            assert_eq!(roc_receiver_close(receiver), 0);
            assert_eq!(roc_context_close(context), 0);
        }
    }

    #[test]
    fn open_accepts_extreme_latencies() {
        unsafe {
            let context = open_context();

            for target_latency in [1, u64::MAX] {
                let config = roc_receiver_config {
                    target_latency,
                    max_latency_overrun: u64::MAX,
                    max_latency_underrun: u64::MAX,
                    breakage_detection_window: u64::MAX,
                    ..receiver_config()
                };
                let mut receiver = ptr::null_mut();
                assert_eq!(roc_receiver_open(context, &config, &mut receiver), 0);

                let mut samples = [1.0f32; 2];
                let mut frame = roc_frame {
                    samples: samples.as_mut_ptr().cast(),
                    samples_size: std::mem::size_of_val(&samples),
                };
                assert_eq!(roc_receiver_read(receiver, &mut frame), 0);
                assert_eq!(samples, [0.0; 2]);

                assert_eq!(roc_receiver_close(receiver), 0);
            }

            assert_eq!(roc_context_close(context), 0);
        }
    }

    #[test]
    fn multicast_group_must_be_multicast_at_bind() {
        unsafe {
            let context = open_context();
            let mut receiver = ptr::null_mut();
            assert_eq!(roc_receiver_open(context, &receiver_config(), &mut receiver), 0);

            assert_eq!(
                roc_receiver_set_multicast_group(receiver, 0, ROC_INTERFACE_AUDIO_SOURCE, c"not-an-ip".as_ptr()),
                -1
            );
            assert_eq!(
                roc_receiver_set_multicast_group(receiver, 0, ROC_INTERFACE_AUDIO_SOURCE, c"127.0.0.1".as_ptr()),
                0
            );

            let source = endpoint(c"rtp://0.0.0.0:32003");
            assert_eq!(roc_receiver_bind(receiver, 0, ROC_INTERFACE_AUDIO_SOURCE, source), -1);

            assert_eq!(
                roc_receiver_set_multicast_group(receiver, 0, ROC_INTERFACE_AUDIO_SOURCE, c"224.0.0.1".as_ptr()),
                0
            );
            assert_eq!(roc_receiver_bind(receiver, 0, ROC_INTERFACE_AUDIO_SOURCE, source), 0);

            assert_eq!(roc_endpoint_deallocate(source), 0);
            assert_eq!(roc_receiver_close(receiver), 0);
            assert_eq!(roc_context_close(context), 0);
        }
    }

    #[test]
    fn read_silence_and_frame_size() {
        unsafe {
            let context = open_context();
            let mut receiver = ptr::null_mut();
            assert_eq!(roc_receiver_open(context, &receiver_config(), &mut receiver), 0);

            let mut samples = [1.0f32; 4];
            let mut frame = roc_frame {
                samples: samples.as_mut_ptr().cast(),
                samples_size: std::mem::size_of_val(&samples),
            };
            assert_eq!(roc_receiver_read(receiver, &mut frame), 0);
            assert_eq!(samples, [0.0; 4]);

            frame.samples_size = 3 * std::mem::size_of::<f32>();
            assert_eq!(roc_receiver_read(receiver, &mut frame), -1);

            assert_eq!(roc_receiver_close(receiver), 0);
            assert_eq!(roc_context_close(context), 0);
        }
    }
}
