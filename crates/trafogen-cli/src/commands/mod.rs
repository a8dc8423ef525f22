pub mod sweep;
pub mod validate;
