use std::fmt;

use serde::{Deserialize, Serialize};

use roc_sys::*;

/// Logical connection group on a receiver or sender.
///
/// Interfaces bound in the same slot belong to one peer; extra slots let a
/// receiver serve several independent peers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot(u64);

impl Slot {
    pub const DEFAULT: Slot = Slot(ROC_SLOT_DEFAULT);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }

    pub(crate) fn to_native(self) -> roc_slot {
        self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of one endpoint within a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interface {
    /// Single endpoint carrying every stream, e.g. an RTSP session.
    Consolidated,
    /// Audio source packets.
    AudioSource,
    /// FEC repair packets.
    AudioRepair,
    /// Control packets, e.g. RTCP.
    AudioControl,
}

impl Interface {
    pub(crate) fn to_native(self) -> roc_interface {
        match self {
            Self::Consolidated => ROC_INTERFACE_CONSOLIDATED,
            Self::AudioSource => ROC_INTERFACE_AUDIO_SOURCE,
            Self::AudioRepair => ROC_INTERFACE_AUDIO_REPAIR,
            Self::AudioControl => ROC_INTERFACE_AUDIO_CONTROL,
        }
    }
}

/// Network protocol of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    Rtsp,
    Rtp,
    RtpRs8mSource,
    Rs8mRepair,
    RtpLdpcSource,
    LdpcRepair,
    Rtcp,
}

impl Protocol {
    /// URI scheme for this protocol.
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Rtsp => "rtsp",
            Self::Rtp => "rtp",
            Self::RtpRs8mSource => "rtp+rs8m",
            Self::Rs8mRepair => "rs8m",
            Self::RtpLdpcSource => "rtp+ldpc",
            Self::LdpcRepair => "ldpc",
            Self::Rtcp => "rtcp",
        }
    }

    /// Port used when an endpoint does not set one.
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Rtsp => Some(554),
            _ => None,
        }
    }

    pub(crate) fn to_native(self) -> roc_protocol {
        match self {
            Self::Rtsp => ROC_PROTO_RTSP,
            Self::Rtp => ROC_PROTO_RTP,
            Self::RtpRs8mSource => ROC_PROTO_RTP_RS8M_SOURCE,
            Self::Rs8mRepair => ROC_PROTO_RS8M_REPAIR,
            Self::RtpLdpcSource => ROC_PROTO_RTP_LDPC_SOURCE,
            Self::LdpcRepair => ROC_PROTO_LDPC_REPAIR,
            Self::Rtcp => ROC_PROTO_RTCP,
        }
    }

    pub(crate) fn from_native(proto: roc_protocol) -> Option<Self> {
        match proto {
            ROC_PROTO_RTSP => Some(Self::Rtsp),
            ROC_PROTO_RTP => Some(Self::Rtp),
            ROC_PROTO_RTP_RS8M_SOURCE => Some(Self::RtpRs8mSource),
            ROC_PROTO_RS8M_REPAIR => Some(Self::Rs8mRepair),
            ROC_PROTO_RTP_LDPC_SOURCE => Some(Self::RtpLdpcSource),
            ROC_PROTO_LDPC_REPAIR => Some(Self::LdpcRepair),
            ROC_PROTO_RTCP => Some(Self::Rtcp),
            _ => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slot_is_zero() {
        assert_eq!(Slot::DEFAULT, Slot::new(0));
        assert_eq!(Slot::default(), Slot::DEFAULT);
        assert_eq!(Slot::new(3).to_native(), 3);
    }

    #[test]
    fn interface_native_values() {
        assert_eq!(Interface::Consolidated.to_native(), 1);
        assert_eq!(Interface::AudioSource.to_native(), 11);
        assert_eq!(Interface::AudioRepair.to_native(), 12);
        assert_eq!(Interface::AudioControl.to_native(), 13);
    }

    #[test]
    fn protocol_from_native() {
        assert_eq!(Protocol::from_native(ROC_PROTO_RTSP), Some(Protocol::Rtsp));
        assert_eq!(Protocol::from_native(ROC_PROTO_RTP_LDPC_SOURCE), Some(Protocol::RtpLdpcSource));
        assert_eq!(Protocol::from_native(0), None);
    }

    #[test]
    fn protocol_schemes() {
        assert_eq!(Protocol::RtpRs8mSource.to_string(), "rtp+rs8m");
        assert_eq!(Protocol::Rtsp.default_port(), Some(554));
        assert_eq!(Protocol::Rtp.default_port(), None);
    }
}
