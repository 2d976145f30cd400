// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod converter;
pub mod error;
pub mod grid;
pub mod model;

pub use converter::{ConversionResult, Converter, PayloadEncoding};
pub use error::ConvertError;
