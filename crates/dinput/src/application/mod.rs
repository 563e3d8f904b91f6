//! Application layer for dinput.
//!
//! # Modules
//!
//! - **`controller`** – [`controller::InputController`], the public call
//!   surface, together with its settings setters and desktop queries.  The
//!   mouse and keyboard operations live in `mouse` and `keyboard` as further
//!   `impl InputController` blocks.
//!
//! - **`hold`** – The [`hold::KeyHold`] guard, which keeps keys pressed and
//!   releases them on every exit path.
//!
//! - **`pacing`** – Plays an event sequence against the gateway, sleeping
//!   between batches.
//!
//! - **`inject`** / **`desktop`** – The collaborator traits the controller is
//!   built from.  Their OS implementations live in the infrastructure layer.

pub mod controller;
pub mod desktop;
pub mod hold;
pub mod inject;
pub mod keyboard;
pub mod mouse;
pub mod pacing;
