pub mod patient;
pub mod note;
pub mod consultation;

pub use patient::*;
pub use note::*;
pub use consultation::*;
