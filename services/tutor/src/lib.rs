//! EduBridge Tutor Service Library
//!
//! Configuration, command-line flags, console I/O and the startup wiring for
//! the `tutor` binary, which is a thin wrapper around this library.

pub mod app;
pub mod cli;
pub mod config;
pub mod console;
