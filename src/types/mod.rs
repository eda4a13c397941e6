//! Core types for Tern.

pub mod message;
pub mod settings;

pub use message::*;
pub use settings::*;
