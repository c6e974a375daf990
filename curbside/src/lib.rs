#![allow(clippy::too_many_arguments)]
pub mod assembly;

pub use assembly::assembler::{assemble, assemble_at};
pub use assembly::error::ParameterError;
pub use assembly::params::RequestParams;
