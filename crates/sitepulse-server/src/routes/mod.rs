pub mod analytics;
pub mod dashboard;
pub mod health;
pub mod heartbeat;
pub mod track_nav;
