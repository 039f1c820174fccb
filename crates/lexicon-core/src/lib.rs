//! # lexicon-core
//!
//! Error handling and configuration shared by the lexicon crates.

pub mod config;
pub mod error;
