pub mod generator;
pub mod indicators;
pub mod signal_service;

pub use signal_service::*;
