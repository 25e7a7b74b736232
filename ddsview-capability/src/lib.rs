//! Runtime probing of optional system libraries.
//!
//! Direct3D 11, the DXGI factory, the multi-monitor API and XInput are all
//! resolved at runtime instead of being linked at load time, so the viewer
//! starts (and degrades politely) on systems where any of them are missing.
//! Each library is loaded at most once per process and every entry point is
//! resolved at most once; absence is permanent for the process lifetime.
//!
//! All of this is Windows-only; on other targets the crate is empty.
#![cfg(windows)]

mod error;
pub mod factory;
pub mod gamepad;
pub mod module;
pub mod monitor;

pub use error::CapabilityError;
