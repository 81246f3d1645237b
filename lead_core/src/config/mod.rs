//! Deployment-time configuration for the lead form

pub mod settings;

pub use settings::*;
