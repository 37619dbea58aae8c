pub mod app;
pub mod ask_service;
pub mod builtin_examples;
pub mod config;
pub mod constants;
pub mod message;
