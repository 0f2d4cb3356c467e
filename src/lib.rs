/// Fundraffle - Lottery Fundraising Client (TUI Edition)
///
/// Core library for creating prize-draw fundraisers and buying tickets
/// against the fundraising REST service.

pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
