pub mod enums;
pub mod inputs;
pub mod prediction;

pub use enums::*;
pub use inputs::*;
pub use prediction::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },
}
