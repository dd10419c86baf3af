pub mod compare;
pub mod find;
pub mod list;
