pub mod field;
pub mod template;
