pub mod commands;
pub mod error;
pub mod output;
pub mod views;

pub use commands::*;
pub use output::*;
pub use error::*;
