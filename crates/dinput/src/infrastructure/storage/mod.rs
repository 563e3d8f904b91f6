//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML configuration file from the
//! platform-appropriate directory, maps it onto `dinput_core::Settings`, and
//! writes a commented default file on request.  A missing file is not an
//! error: every field has a default.

pub mod config;
