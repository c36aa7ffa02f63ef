//! Talking to the dealer.
//!
//! - [`connect`] opens the seat socket and sends the version line
//! - [`Session`] answers each state line with one action
//! - [`ActionEncoder`] writes actions in the dealer's grammar
#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub use cli::*;

pub mod client;
pub use client::*;

pub mod encoder;
pub use encoder::*;

pub mod session;
pub use session::*;
