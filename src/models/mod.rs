pub mod enums;
pub mod schema;

pub use enums::*;
pub use schema::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },
}
