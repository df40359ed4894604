pub mod classify;
pub mod confidence;
pub mod extract;
pub mod processor;
pub mod types;

pub use processor::*;
pub use types::*;
