use serde::{Deserialize, Serialize};

use roc_sys::*;

/// Channel layout of a frame or packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelSet {
    Mono,
    Stereo,
}

impl ChannelSet {
    pub fn channels(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }

    pub(crate) fn to_native(self) -> roc_channel_set {
        match self {
            Self::Mono => ROC_CHANNEL_SET_MONO,
            Self::Stereo => ROC_CHANNEL_SET_STEREO,
        }
    }
}

/// Sample encoding of frames exchanged with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameEncoding {
    /// Interleaved 32-bit floats in `[-1.0, 1.0]`.
    PcmFloat,
}

impl FrameEncoding {
    pub(crate) fn to_native(self) -> roc_frame_encoding {
        match self {
            Self::PcmFloat => ROC_FRAME_ENCODING_PCM_FLOAT,
        }
    }
}

/// Sample encoding inside network packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketEncoding {
    /// 16-bit big-endian PCM as defined by the RTP A/V profile.
    AvpL16,
}

impl PacketEncoding {
    pub(crate) fn to_native(self) -> roc_packet_encoding {
        match self {
            Self::AvpL16 => ROC_PACKET_ENCODING_AVP_L16,
        }
    }
}

/// Forward erasure correction scheme used by a sender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FecEncoding {
    Disable,
    /// Native default, currently Reed-Solomon.
    #[default]
    Default,
    Rs8m,
    LdpcStaircase,
}

impl FecEncoding {
    pub(crate) fn to_native(self) -> roc_fec_encoding {
        match self {
            Self::Disable => ROC_FEC_ENCODING_DISABLE,
            Self::Default => ROC_FEC_ENCODING_DEFAULT,
            Self::Rs8m => ROC_FEC_ENCODING_RS8M,
            Self::LdpcStaircase => ROC_FEC_ENCODING_LDPC_STAIRCASE,
        }
    }
}

/// Which side drives the timing of reads and writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockSource {
    /// The caller paces I/O, e.g. from a sound card callback.
    #[default]
    External,
    /// Read and write block to keep real-time pace.
    Internal,
}

impl ClockSource {
    pub(crate) fn to_native(self) -> roc_clock_source {
        match self {
            Self::External => ROC_CLOCK_EXTERNAL,
            Self::Internal => ROC_CLOCK_INTERNAL,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResamplerBackend {
    #[default]
    Default,
    Builtin,
    Speex,
}

impl ResamplerBackend {
    pub(crate) fn to_native(self) -> roc_resampler_backend {
        match self {
            Self::Default => ROC_RESAMPLER_BACKEND_DEFAULT,
            Self::Builtin => ROC_RESAMPLER_BACKEND_BUILTIN,
            Self::Speex => ROC_RESAMPLER_BACKEND_SPEEX,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResamplerProfile {
    Disable,
    #[default]
    Default,
    High,
    Medium,
    Low,
}

impl ResamplerProfile {
    pub(crate) fn to_native(self) -> roc_resampler_profile {
        match self {
            Self::Disable => ROC_RESAMPLER_PROFILE_DISABLE,
            Self::Default => ROC_RESAMPLER_PROFILE_DEFAULT,
            Self::High => ROC_RESAMPLER_PROFILE_HIGH,
            Self::Medium => ROC_RESAMPLER_PROFILE_MEDIUM,
            Self::Low => ROC_RESAMPLER_PROFILE_LOW,
        }
    }
}

/// Verbosity of the native library's log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    None,
    #[default]
    Error,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub(crate) fn to_native(self) -> roc_log_level {
        match self {
            Self::None => ROC_LOG_NONE,
            Self::Error => ROC_LOG_ERROR,
            Self::Info => ROC_LOG_INFO,
            Self::Debug => ROC_LOG_DEBUG,
            Self::Trace => ROC_LOG_TRACE,
        }
    }

    pub(crate) fn from_native(level: roc_log_level) -> Self {
        match level {
            ROC_LOG_NONE => Self::None,
            ROC_LOG_ERROR => Self::Error,
            ROC_LOG_INFO => Self::Info,
            ROC_LOG_DEBUG => Self::Debug,
            _ => Self::Trace,
        }
    }
}

/// Mirror a `log` filter into the native layer. `Warn` has no native
/// counterpart and maps to `Error`.
impl From<log::LevelFilter> for LogLevel {
    fn from(filter: log::LevelFilter) -> Self {
        match filter {
            log::LevelFilter::Off => Self::None,
            log::LevelFilter::Error | log::LevelFilter::Warn => Self::Error,
            log::LevelFilter::Info => Self::Info,
            log::LevelFilter::Debug => Self::Debug,
            log::LevelFilter::Trace => Self::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_values() {
        assert_eq!(ChannelSet::Stereo.to_native(), 2);
        assert_eq!(FrameEncoding::PcmFloat.to_native(), 1);
        assert_eq!(FecEncoding::Disable.to_native(), -1);
        assert_eq!(ClockSource::Internal.to_native(), 1);
        assert_eq!(ResamplerProfile::Disable.to_native(), -1);
        assert_eq!(ResamplerBackend::Speex.to_native(), 2);
        assert_eq!(PacketEncoding::AvpL16.to_native(), 2);
    }

    #[test]
    fn log_level_from_filter() {
        assert_eq!(LogLevel::from(log::LevelFilter::Off), LogLevel::None);
        assert_eq!(LogLevel::from(log::LevelFilter::Warn), LogLevel::Error);
        assert_eq!(LogLevel::from(log::LevelFilter::Trace), LogLevel::Trace);
    }

    #[test]
    fn log_level_native_round_trip() {
        for level in [LogLevel::None, LogLevel::Error, LogLevel::Info, LogLevel::Debug, LogLevel::Trace] {
            assert_eq!(LogLevel::from_native(level.to_native()), level);
        }
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&ChannelSet::Stereo).unwrap(), "\"stereo\"");
        assert_eq!(
            serde_json::from_str::<FecEncoding>("\"ldpc_staircase\"").unwrap(),
            FecEncoding::LdpcStaircase
        );
    }
}
