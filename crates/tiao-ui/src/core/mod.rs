//! Core, DOM-free state engine for the economy panel.
pub mod admin;
pub mod busy;
pub mod commands;
pub mod dispatcher;
pub mod effects;
pub mod engine;
pub mod error;
pub mod format;
pub mod panels;
pub mod render;
pub mod store;
pub mod transport;
