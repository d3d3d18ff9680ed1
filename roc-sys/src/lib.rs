//! # roc-sys
//!
//! Raw roc C ABI: `#[repr(C)]` types, constants and the `roc_*` entry points.
//!
//! Every fallible entry point returns `0` on success and a negative status on
//! failure. Handles are opaque pointers that the caller must close exactly
//! once; using a handle after close is undefined behavior.
//!
//! ## Backends
//! - default: the entry points are declared in an `extern "C"` block and
//!   linked against the system `libroc`.
//! - `reference-engine` feature: a small in-process stand-in for tests. It
//!   validates arguments and configs the way `libroc` does, tracks open
//!   children per context and reads silence. It moves no packets; all
//!   failures are reported as `-1`.
//!
//! **Most users should use `roc-core` instead**, which wraps these calls in
//! owned handle types with open/closed state tracking.
//!
//! ## Safety
//! All entry points are `unsafe`:
//! - handles must come from the matching `*_open`/`*_allocate` call and must
//!   not be used after the matching close;
//! - a context must outlive every receiver and sender opened from it;
//! - a receiver or sender must not be used from two threads at once.

#![allow(non_camel_case_types)]
#![allow(clippy::missing_safety_doc)]

pub mod types;

pub use types::*;

#[cfg(not(feature = "reference-engine"))]
mod linked;
#[cfg(not(feature = "reference-engine"))]
pub use linked::*;

#[cfg(feature = "reference-engine")]
mod engine;
#[cfg(feature = "reference-engine")]
pub use engine::*;
