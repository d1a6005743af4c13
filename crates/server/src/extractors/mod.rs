pub mod admin_extractor;
pub mod validation_extractor;
