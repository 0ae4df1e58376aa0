//! A set of helpers for testing

mod alert;
mod transport;

pub use alert::{AlertBuilder, BatchBuilder};
pub use transport::ScriptedTransport;
