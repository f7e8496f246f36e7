//! # Civ Development Tools
//!
//! Command-line tools for development:
//! - ASCII map preview
//! - Headless autoplay with JSON summaries
//! - Config validation

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ascii;
pub mod autoplay;
pub mod config;
