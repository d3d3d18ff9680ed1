//! # roc-core
//!
//! Safe bindings for roc real-time audio streaming.
//!
//! Wraps the raw entry points of `roc-sys` in owned handle types that track
//! open/closed state, so misuse (a missing or closed context, use after close,
//! double close) is reported as an error instead of reaching native code.
//! Every failed native call is reported as a [`NativeError`] carrying the
//! entry point name and the status it returned.
//!
//! ## Architecture
//!
//! ```text
//! roc-core (this crate)
//! ├── models/    ← RocError, NativeError, configs, Endpoint, Slot/Interface/Protocol, HandleState
//! ├── marshal/   ← bool/string conversions, NativeEndpoint (scoped native endpoint)
//! ├── session/   ← Context, Receiver, Sender
//! └── native/    ← log bridge, version query
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use roc_core::*;
//!
//! # fn main() -> Result<(), RocError> {
//! let ctx = Context::open(&ContextConfig::default())?;
//!
//! let config = ReceiverConfig {
//!     frame_sample_rate: 44100,
//!     frame_channels: Some(ChannelSet::Stereo),
//!     frame_encoding: Some(FrameEncoding::PcmFloat),
//!     ..Default::default()
//! };
//! let mut receiver = Receiver::open(&ctx, &config)?;
//!
//! let source = Endpoint::parse("rtp+rs8m://0.0.0.0:10001")?;
//! let repair = Endpoint::parse("rs8m://0.0.0.0:10002")?;
//! receiver.bind(Slot::DEFAULT, Interface::AudioSource, Some(&source))?;
//! receiver.bind(Slot::DEFAULT, Interface::AudioRepair, Some(&repair))?;
//!
//! let mut samples = vec![0.0f32; 320];
//! receiver.read_floats(&mut samples)?;
//!
//! receiver.close()?;
//! ctx.close()?;
//! # Ok(())
//! # }
//! ```

pub mod marshal;
pub mod models;
pub mod native;
pub mod session;

// Re-export key types at crate root for convenience.
pub use models::config::{ContextConfig, ReceiverConfig, SenderConfig};
pub use models::endpoint::Endpoint;
pub use models::error::{check_status, NativeError, RocError};
pub use models::media::{
    ChannelSet, ClockSource, FecEncoding, FrameEncoding, LogLevel, PacketEncoding, ResamplerBackend, ResamplerProfile,
};
pub use models::network::{Interface, Protocol, Slot};
pub use models::state::HandleState;
pub use native::logging::{install_log_handler, reset_log_handler, set_log_level, sync_log_level};
pub use native::version::{version, SemanticVersion, Versions};
pub use session::context::Context;
pub use session::receiver::Receiver;
pub use session::sender::Sender;
