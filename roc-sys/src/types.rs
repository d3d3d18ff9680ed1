//! `#[repr(C)]` types and constants shared by every build of the ABI.

use std::ffi::{c_char, c_int, c_longlong, c_uint, c_ulonglong, c_void};

/// Status returned by every fallible entry point on success.
pub const ROC_OK: c_int = 0;

/// Status returned by the reference engine on any failure.
pub const ROC_ERR: c_int = -1;

pub type roc_slot = c_ulonglong;
pub const ROC_SLOT_DEFAULT: roc_slot = 0;

pub type roc_interface = c_int;
pub const ROC_INTERFACE_CONSOLIDATED: roc_interface = 1;
pub const ROC_INTERFACE_AUDIO_SOURCE: roc_interface = 11;
pub const ROC_INTERFACE_AUDIO_REPAIR: roc_interface = 12;
pub const ROC_INTERFACE_AUDIO_CONTROL: roc_interface = 13;

pub type roc_protocol = c_int;
pub const ROC_PROTO_RTSP: roc_protocol = 10;
pub const ROC_PROTO_RTP: roc_protocol = 20;
pub const ROC_PROTO_RTP_RS8M_SOURCE: roc_protocol = 30;
pub const ROC_PROTO_RS8M_REPAIR: roc_protocol = 31;
pub const ROC_PROTO_RTP_LDPC_SOURCE: roc_protocol = 32;
pub const ROC_PROTO_LDPC_REPAIR: roc_protocol = 33;
pub const ROC_PROTO_RTCP: roc_protocol = 70;

pub type roc_fec_encoding = c_int;
pub const ROC_FEC_ENCODING_DISABLE: roc_fec_encoding = -1;
pub const ROC_FEC_ENCODING_DEFAULT: roc_fec_encoding = 0;
pub const ROC_FEC_ENCODING_RS8M: roc_fec_encoding = 1;
pub const ROC_FEC_ENCODING_LDPC_STAIRCASE: roc_fec_encoding = 2;

pub type roc_packet_encoding = c_int;
pub const ROC_PACKET_ENCODING_AVP_L16: roc_packet_encoding = 2;

pub type roc_frame_encoding = c_int;
pub const ROC_FRAME_ENCODING_PCM_FLOAT: roc_frame_encoding = 1;

pub type roc_channel_set = c_int;
pub const ROC_CHANNEL_SET_MONO: roc_channel_set = 1;
pub const ROC_CHANNEL_SET_STEREO: roc_channel_set = 2;

pub type roc_clock_source = c_int;
pub const ROC_CLOCK_EXTERNAL: roc_clock_source = 0;
pub const ROC_CLOCK_INTERNAL: roc_clock_source = 1;

pub type roc_resampler_backend = c_int;
pub const ROC_RESAMPLER_BACKEND_DEFAULT: roc_resampler_backend = 0;
pub const ROC_RESAMPLER_BACKEND_BUILTIN: roc_resampler_backend = 1;
pub const ROC_RESAMPLER_BACKEND_SPEEX: roc_resampler_backend = 2;

pub type roc_resampler_profile = c_int;
pub const ROC_RESAMPLER_PROFILE_DISABLE: roc_resampler_profile = -1;
pub const ROC_RESAMPLER_PROFILE_DEFAULT: roc_resampler_profile = 0;
pub const ROC_RESAMPLER_PROFILE_HIGH: roc_resampler_profile = 1;
pub const ROC_RESAMPLER_PROFILE_MEDIUM: roc_resampler_profile = 2;
pub const ROC_RESAMPLER_PROFILE_LOW: roc_resampler_profile = 3;

pub type roc_log_level = c_int;
pub const ROC_LOG_NONE: roc_log_level = 0;
pub const ROC_LOG_ERROR: roc_log_level = 1;
pub const ROC_LOG_INFO: roc_log_level = 2;
pub const ROC_LOG_DEBUG: roc_log_level = 3;
pub const ROC_LOG_TRACE: roc_log_level = 4;

/// Receives every native log message at or below the configured level.
///
/// `component` and `message` are only valid for the duration of the call.
pub type roc_log_handler =
    Option<unsafe extern "C" fn(level: roc_log_level, component: *const c_char, message: *const c_char)>;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct roc_context_config {
    /// Maximum network packet size in bytes (0 = default).
    pub max_packet_size: c_uint,
    /// Maximum frame size in bytes (0 = default).
    pub max_frame_size: c_uint,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct roc_receiver_config {
    pub frame_sample_rate: c_uint,
    pub frame_channels: roc_channel_set,
    pub frame_encoding: roc_frame_encoding,
    pub clock_source: roc_clock_source,
    pub resampler_backend: roc_resampler_backend,
    pub resampler_profile: roc_resampler_profile,
    /// Nanoseconds.
    pub target_latency: c_ulonglong,
    pub max_latency_overrun: c_ulonglong,
    pub max_latency_underrun: c_ulonglong,
    pub no_playback_timeout: c_longlong,
    pub broken_playback_timeout: c_longlong,
    pub breakage_detection_window: c_ulonglong,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct roc_sender_config {
    pub frame_sample_rate: c_uint,
    pub frame_channels: roc_channel_set,
    pub frame_encoding: roc_frame_encoding,
    pub packet_sample_rate: c_uint,
    pub packet_channels: roc_channel_set,
    pub packet_encoding: roc_packet_encoding,
    /// Nanoseconds.
    pub packet_length: c_ulonglong,
    pub packet_interleaving: c_uint,
    pub clock_source: roc_clock_source,
    pub resampler_backend: roc_resampler_backend,
    pub resampler_profile: roc_resampler_profile,
    pub fec_encoding: roc_fec_encoding,
    pub fec_block_source_packets: c_uint,
    pub fec_block_repair_packets: c_uint,
}

/// Interleaved sample buffer passed to read and write.
#[repr(C)]
#[derive(Debug)]
pub struct roc_frame {
    pub samples: *mut c_void,
    /// Size of `samples` in bytes.
    pub samples_size: usize,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct roc_version {
    pub major: c_uint,
    pub minor: c_uint,
    pub patch: c_uint,
}
