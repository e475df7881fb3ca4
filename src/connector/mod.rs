//! # Connector Layer
//!
//! External integrations implementing application ports:
//! - Chat completions over HTTP (any OpenAI-compatible server)
//! - An in-process mock for tests and offline runs

pub mod adapter;

pub use adapter::*;
