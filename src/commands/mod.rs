pub mod common;
pub mod fleet;
