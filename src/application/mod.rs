//! Application services coordinating domain logic with infrastructure.

pub mod error;
pub mod posts;
pub mod repos;
pub mod sanitize;
