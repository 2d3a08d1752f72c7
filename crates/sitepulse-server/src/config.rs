/// Re-export `Config` from `sitepulse-core` for use within this crate.
///
/// All environment-variable parsing lives in `sitepulse-core` so it can be
/// shared with integration tests without depending on the full server.
pub use sitepulse_core::config::Config;
