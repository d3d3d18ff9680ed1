//! Process-wide native state: the log sink and the library version.

pub mod logging;
pub mod version;
