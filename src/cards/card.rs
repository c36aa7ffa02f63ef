use super::CardError;
use super::rank::Rank;
use super::suit::Suit;

/// A playing card encoded as a single byte.
///
/// The encoding is `rank * 4 + suit`, so cards sort by rank first and
/// then by suit within each rank. The dealer writes cards as two
/// characters, rank then suit: `"As"`, `"Qh"`, `"Td"`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    pub fn rank(&self) -> Rank {
        Rank::all()[(self.0 / 4) as usize]
    }
    pub fn suit(&self) -> Suit {
        Suit::all()[(self.0 % 4) as usize]
    }
}

/// (Rank, Suit) isomorphism
impl From<(Rank, Suit)> for Card {
    fn from((r, s): (Rank, Suit)) -> Self {
        Self(u8::from(r) * 4 + u8::from(s))
    }
}

/// u8 isomorphism
/// each card is mapped to its location in a sorted deck 0-51
/// Ts
/// 35
/// 0b00100011
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.0
    }
}
impl TryFrom<u8> for Card {
    type Error = CardError;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0..52 => Ok(Self(n)),
            _ => Err(CardError::Index(n)),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

/// str isomorphism
impl TryFrom<&str> for Card {
    type Error = CardError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => Ok(Card::from((Rank::try_from(r)?, Suit::try_from(s)?))),
            _ => Err(CardError::Length(s.to_string())),
        }
    }
}

impl Card {
    /// Parses concatenated two-character cards, e.g. `"AsKd"`.
    /// The empty string is an empty hand.
    pub fn parse(s: &str) -> Result<Vec<Self>, CardError> {
        s.chars()
            .collect::<Vec<_>>()
            .chunks(2)
            .map(|pair| match pair {
                [r, s] => Ok(Card::from((Rank::try_from(*r)?, Suit::try_from(*s)?))),
                _ => Err(CardError::Length(s.to_string())),
            })
            .collect()
    }
    /// Writes cards back-to-back, the inverse of [`Card::parse`].
    pub fn join(cards: &[Self]) -> String {
        cards.iter().map(|c| c.to_string()).collect()
    }
}
