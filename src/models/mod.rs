// Core data models for the Doctor Panel
// These structs represent the registry entities

pub mod patient;
pub mod stage;
pub mod note;
pub mod consultation;

pub use patient::*;
pub use stage::*;
pub use note::*;
pub use consultation::*;
