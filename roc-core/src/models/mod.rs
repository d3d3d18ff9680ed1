pub mod config;
pub mod endpoint;
pub mod error;
pub mod media;
pub mod network;
pub mod state;
