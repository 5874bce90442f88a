//! Carebotctl library - exposes modules for testing

pub mod chat;
pub mod cli;
pub mod client;
pub mod commands;
pub mod errors;
pub mod logging;
pub mod render;
