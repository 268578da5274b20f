//! Core library for the X post monitor.
//!
//! The polling cycle in [`cycle`] is written against the [`traits`] seams so
//! tests can drive it with in-memory fakes; [`adapters`] binds the seams to
//! the real `x-client` and `pushbullet` clients.

pub mod adapters;
pub mod config;
pub mod cycle;
pub mod state;
pub mod traits;
pub mod types;
