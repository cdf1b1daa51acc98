//! Platform abstraction layer
//!
//! Turns raw browser events (keys, clicks, touches) into per-frame
//! `TickInput` for the simulation. Event wiring itself lives in the host.

pub mod input;

pub use input::{Control, InputState, is_fire_key};
