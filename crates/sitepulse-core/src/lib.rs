pub mod config;
pub mod error;
pub mod referral;
pub mod session;
pub mod store;
pub mod ua;
pub mod visit;
