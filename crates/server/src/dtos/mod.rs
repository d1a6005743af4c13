pub mod affiliate_dto;
pub mod beta_dto;
pub mod checkout_dto;
pub mod plan_dto;
pub mod signal_dto;
pub mod waitlist_dto;
pub mod webhook_dto;
