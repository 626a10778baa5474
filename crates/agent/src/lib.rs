//! Conversational context resolution
//!
//! Features:
//! - Context fallback: missing intent/entities filled from the previous turn
//! - Turn processing over the text pipeline and the context store
//! - Response rendering from configured answer fragments

pub mod context;
pub mod responses;
pub mod turn;

pub use context::ContextResolver;
pub use responses::ResponseBuilder;
pub use turn::{TurnOutcome, TurnProcessor};
