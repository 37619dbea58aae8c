//! ragask is a terminal client for a retrieval-augmented question answering
//! service.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the question/answer session, its state machine, the
//!   asynchronous dispatch to the answering service, and configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event loop.
//! - [`api`] defines the request/response payloads exchanged with the service.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
