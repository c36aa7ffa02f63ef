//! Rules of the match as the dealer enforces them.
//!
//! - [`Game`]: the static game definition (players, rounds, blinds, deck)
//! - [`State`]: betting replay: whose turn, what is owed, what is legal
//! - [`MatchState`]: one dealer notification: seat, cards, and a [`State`]
//! - [`Action`]: fold, call, or raise-to, with the dealer's text grammar
pub mod action;
pub use action::*;

pub mod game;
pub use game::*;

pub mod matchstate;
pub use matchstate::*;

pub mod state;
pub use state::*;
