//! Concrete backends for the [`Pointer`](crate::traits::Pointer) and
//! [`Popup`](crate::traits::Popup) traits.
//!
//! [`win32`] talks to the real Windows cursor and monitor layout.
//! [`virtual_pointer`] and [`headless`] keep everything in memory; they run
//! the engine on machines without a Windows desktop and back the tests.
//!
//! Nothing outside this module should call into an OS API directly.

pub mod headless;
pub mod virtual_pointer;
#[cfg(windows)]
pub mod win32;
