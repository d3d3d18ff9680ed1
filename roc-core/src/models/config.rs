use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use roc_sys::{roc_context_config, roc_receiver_config, roc_sender_config};

use super::error::RocError;
use super::media::{ChannelSet, ClockSource, FecEncoding, FrameEncoding, PacketEncoding, ResamplerBackend, ResamplerProfile};

fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, RocError> {
    serde_json::from_str(json).map_err(|e| RocError::Config(e.to_string()))
}

/// Configuration for a context.
///
/// Zero means "native default" for every field, so the default value is
/// always accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Maximum network packet size in bytes.
    pub max_packet_size: u32,

    /// Maximum frame size in bytes.
    pub max_frame_size: u32,
}

impl ContextConfig {
    pub fn from_json(json: &str) -> Result<Self, RocError> {
        from_json(json)
    }

    pub(crate) fn to_native(&self) -> roc_context_config {
        roc_context_config {
            max_packet_size: self.max_packet_size,
            max_frame_size: self.max_frame_size,
        }
    }
}

/// Configuration for a receiver.
///
/// The default value leaves the frame format unset and is rejected by the
/// native open; the binding itself performs no validation. Durations are in
/// nanoseconds, zero selects the native default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Sample rate of frames returned by read, in Hz.
    pub frame_sample_rate: u32,
    pub frame_channels: Option<ChannelSet>,
    pub frame_encoding: Option<FrameEncoding>,
    pub clock_source: ClockSource,
    pub resampler_backend: ResamplerBackend,
    pub resampler_profile: ResamplerProfile,

    pub target_latency_ns: u64,
    pub max_latency_overrun_ns: u64,
    pub max_latency_underrun_ns: u64,

    /// Negative disables the timeout.
    pub no_playback_timeout_ns: i64,
    /// Negative disables the timeout.
    pub broken_playback_timeout_ns: i64,
    pub breakage_detection_window_ns: u64,
}

impl ReceiverConfig {
    pub fn from_json(json: &str) -> Result<Self, RocError> {
        from_json(json)
    }

    pub(crate) fn to_native(&self) -> roc_receiver_config {
        roc_receiver_config {
            frame_sample_rate: self.frame_sample_rate,
            frame_channels: self.frame_channels.map_or(0, ChannelSet::to_native),
            frame_encoding: self.frame_encoding.map_or(0, FrameEncoding::to_native),
            clock_source: self.clock_source.to_native(),
            resampler_backend: self.resampler_backend.to_native(),
            resampler_profile: self.resampler_profile.to_native(),
            target_latency: self.target_latency_ns,
            max_latency_overrun: self.max_latency_overrun_ns,
            max_latency_underrun: self.max_latency_underrun_ns,
            no_playback_timeout: self.no_playback_timeout_ns,
            broken_playback_timeout: self.broken_playback_timeout_ns,
            breakage_detection_window: self.breakage_detection_window_ns,
        }
    }
}

/// Configuration for a sender.
///
/// Like [`ReceiverConfig`], the default leaves the frame format unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderConfig {
    /// Sample rate of frames passed to write, in Hz.
    pub frame_sample_rate: u32,
    pub frame_channels: Option<ChannelSet>,
    pub frame_encoding: Option<FrameEncoding>,

    /// Zero uses the frame sample rate.
    pub packet_sample_rate: u32,
    pub packet_channels: Option<ChannelSet>,
    pub packet_encoding: Option<PacketEncoding>,
    pub packet_length_ns: u64,
    /// Shuffle packets within a FEC block to spread bursty losses.
    pub packet_interleaving: bool,

    pub clock_source: ClockSource,
    pub resampler_backend: ResamplerBackend,
    pub resampler_profile: ResamplerProfile,

    pub fec_encoding: FecEncoding,
    pub fec_block_source_packets: u32,
    pub fec_block_repair_packets: u32,
}

impl SenderConfig {
    pub fn from_json(json: &str) -> Result<Self, RocError> {
        from_json(json)
    }

    pub(crate) fn to_native(&self) -> roc_sender_config {
        roc_sender_config {
            frame_sample_rate: self.frame_sample_rate,
            frame_channels: self.frame_channels.map_or(0, ChannelSet::to_native),
            frame_encoding: self.frame_encoding.map_or(0, FrameEncoding::to_native),
            packet_sample_rate: self.packet_sample_rate,
            packet_channels: self.packet_channels.map_or(0, ChannelSet::to_native),
            packet_encoding: self.packet_encoding.map_or(0, PacketEncoding::to_native),
            packet_length: self.packet_length_ns,
            packet_interleaving: crate::marshal::to_native_bool(self.packet_interleaving),
            clock_source: self.clock_source.to_native(),
            resampler_backend: self.resampler_backend.to_native(),
            resampler_profile: self.resampler_profile.to_native(),
            fec_encoding: self.fec_encoding.to_native(),
            fec_block_source_packets: self.fec_block_source_packets,
            fec_block_repair_packets: self.fec_block_repair_packets,
        }
    }
}
