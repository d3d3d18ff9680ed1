//! Validation of the config structs passed to receiver and sender open.

use crate::types::*;

use super::error::EngineError;

fn invalid(what: &str, value: impl std::fmt::Display) -> EngineError {
    EngineError::InvalidConfig(format!("{} {}", what, value))
}

pub fn channel_count(set: roc_channel_set) -> Result<usize, EngineError> {
    match set {
        ROC_CHANNEL_SET_MONO => Ok(1),
        ROC_CHANNEL_SET_STEREO => Ok(2),
        other => Err(invalid("unknown channel set", other)),
    }
}

/// Validate a frame format and return its channel count.
pub fn frame(rate: u32, channels: roc_channel_set, encoding: roc_frame_encoding) -> Result<usize, EngineError> {
    if rate == 0 {
        return Err(invalid("sample rate", 0));
    }
    if encoding != ROC_FRAME_ENCODING_PCM_FLOAT {
        return Err(invalid("unknown frame encoding", encoding));
    }
    channel_count(channels)
}

pub fn clock(source: roc_clock_source) -> Result<(), EngineError> {
    match source {
        ROC_CLOCK_EXTERNAL | ROC_CLOCK_INTERNAL => Ok(()),
        other => Err(invalid("unknown clock source", other)),
    }
}

pub fn resampler(backend: roc_resampler_backend, profile: roc_resampler_profile) -> Result<(), EngineError> {
    if !matches!(
        backend,
        ROC_RESAMPLER_BACKEND_DEFAULT | ROC_RESAMPLER_BACKEND_BUILTIN | ROC_RESAMPLER_BACKEND_SPEEX
    ) {
        return Err(invalid("unknown resampler backend", backend));
    }
    if !(ROC_RESAMPLER_PROFILE_DISABLE..=ROC_RESAMPLER_PROFILE_LOW).contains(&profile) {
        return Err(invalid("unknown resampler profile", profile));
    }
    Ok(())
}

pub fn packet_encoding(encoding: roc_packet_encoding) -> Result<(), EngineError> {
    match encoding {
        0 | ROC_PACKET_ENCODING_AVP_L16 => Ok(()),
        other => Err(invalid("unknown packet encoding", other)),
    }
}

pub fn fec(encoding: roc_fec_encoding) -> Result<(), EngineError> {
    if !(ROC_FEC_ENCODING_DISABLE..=ROC_FEC_ENCODING_LDPC_STAIRCASE).contains(&encoding) {
        return Err(invalid("unknown fec encoding", encoding));
    }
    Ok(())
}

/// Source and repair protocols implied by a sender's FEC scheme.
pub fn fec_protocols(encoding: roc_fec_encoding) -> (roc_protocol, Option<roc_protocol>) {
    match encoding {
        ROC_FEC_ENCODING_DISABLE => (ROC_PROTO_RTP, None),
        ROC_FEC_ENCODING_LDPC_STAIRCASE => (ROC_PROTO_RTP_LDPC_SOURCE, Some(ROC_PROTO_LDPC_REPAIR)),
        _ => (ROC_PROTO_RTP_RS8M_SOURCE, Some(ROC_PROTO_RS8M_REPAIR)),
    }
}

/// Number of interleaved samples in a frame of `size` bytes.
pub fn frame_samples(size: usize, channels: usize) -> Result<usize, EngineError> {
    let frame_bytes = std::mem::size_of::<f32>() * channels;
    if size % frame_bytes != 0 {
        return Err(EngineError::FrameSize { size, channels });
    }
    Ok(size / std::mem::size_of::<f32>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_frame_format_is_rejected() {
        assert!(frame(0, 0, 0).is_err());
        assert!(frame(44100, 0, ROC_FRAME_ENCODING_PCM_FLOAT).is_err());
        assert!(frame(44100, ROC_CHANNEL_SET_STEREO, 0).is_err());
        assert_eq!(frame(44100, ROC_CHANNEL_SET_STEREO, ROC_FRAME_ENCODING_PCM_FLOAT).unwrap(), 2);
    }

    #[test]
    fn resampler_ranges() {
        assert!(resampler(ROC_RESAMPLER_BACKEND_SPEEX, ROC_RESAMPLER_PROFILE_DISABLE).is_ok());
        assert!(resampler(3, ROC_RESAMPLER_PROFILE_DEFAULT).is_err());
        assert!(resampler(ROC_RESAMPLER_BACKEND_DEFAULT, 4).is_err());
    }

    #[test]
    fn fec_protocol_mapping() {
        assert_eq!(fec_protocols(ROC_FEC_ENCODING_DISABLE), (ROC_PROTO_RTP, None));
        assert_eq!(
            fec_protocols(ROC_FEC_ENCODING_DEFAULT),
            (ROC_PROTO_RTP_RS8M_SOURCE, Some(ROC_PROTO_RS8M_REPAIR))
        );
        assert_eq!(
            fec_protocols(ROC_FEC_ENCODING_LDPC_STAIRCASE),
            (ROC_PROTO_RTP_LDPC_SOURCE, Some(ROC_PROTO_LDPC_REPAIR))
        );
    }

    #[test]
    fn frame_size_must_be_whole_frames() {
        assert_eq!(frame_samples(16, 2).unwrap(), 4);
        assert!(frame_samples(12, 2).is_err());
        assert_eq!(frame_samples(12, 1).unwrap(), 3);
    }
}
