//! [`InputGateway`](crate::application::inject::InputGateway) implementations.
//!
//! The Windows gateway is selected at compile time via `#[cfg(target_os)]`.
//! The recording gateway is always compiled so tests and dry runs work on
//! any host.

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;
