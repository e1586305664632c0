//! Tower Service implementations

pub mod assemble;
pub mod core;
pub mod request;

pub use assemble::{TaskAssembler, TaskIds};
pub use core::TranslationService;
pub use request::A2ARequest;
