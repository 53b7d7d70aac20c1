//! Shared plumbing for dwctl binaries.

pub mod config;
