//! Tower Layer implementations for the translation service

pub mod recover;

pub use recover::{RecoverLayer, RecoverService};
