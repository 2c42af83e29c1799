pub mod entities;
pub mod errors;
pub mod key_builder;
pub mod value_objects;
