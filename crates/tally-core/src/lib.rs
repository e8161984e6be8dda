//! Core domain + application logic for the message activity bot.
//!
//! This crate is framework-agnostic. Discord and the hosted table store live
//! behind ports (traits) implemented in adapter crates.

pub mod activity;
pub mod bot;
pub mod commands;
pub mod config;
pub mod counter;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod ports;
pub mod resolver;
#[cfg(test)]
pub mod store;

pub use errors::{Error, Result};
