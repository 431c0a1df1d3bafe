//! Core types and definitions for the swarm wildfire containment simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, config, errors, and
//! constants. It has no dependency on any async runtime or HTTP framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod external;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
