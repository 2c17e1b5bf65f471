pub mod field_model;
pub mod fill;
pub mod identity;
