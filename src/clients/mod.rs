pub mod beacon;
pub mod common;
pub mod execution;
pub mod macros;
