pub mod add;
pub mod advance;
pub mod common;
pub mod delete;
pub mod edit;
pub mod list;
pub mod purge;
pub mod summary;
