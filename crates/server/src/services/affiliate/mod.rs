pub mod affiliate_service;

pub use affiliate_service::*;
