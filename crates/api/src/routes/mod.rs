//! HTTP Routes

pub mod health;
pub mod history;
pub mod temperature;
