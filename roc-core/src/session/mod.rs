pub mod context;
pub mod receiver;
pub mod sender;
