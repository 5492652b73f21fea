pub mod config;
pub mod layout;

pub const DUOMIX_PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");
