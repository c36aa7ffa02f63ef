//! Card text as the dealer writes it.
//!
//! Ranks and suits are single characters (`23456789TJQKA`, `cdhs`) and a
//! card is the pair of them. Hand evaluation is the dealer's business and
//! is not modeled here.
pub mod card;
pub use card::*;

pub mod rank;
pub use rank::*;

pub mod suit;
pub use suit::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("invalid rank character {0:?}")]
    Rank(char),
    #[error("invalid suit character {0:?}")]
    Suit(char),
    #[error("rank index {0} out of range")]
    RankIndex(u8),
    #[error("card index {0} out of range")]
    Index(u8),
    #[error("cards come in rank-suit pairs: {0:?}")]
    Length(String),
}
