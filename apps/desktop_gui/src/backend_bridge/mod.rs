//! Backend worker: owns the tokio runtime and the responder client.

pub mod commands;
pub mod runtime;
