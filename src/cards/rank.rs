use super::CardError;

/// Card rank, ordered deuce low through ace high.
///
/// Games with fewer than thirteen ranks use the top of this range:
/// a three-rank deck holds Queen, King, and Ace.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Rank {
    #[default]
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const COUNT: usize = 13;
    const CHARS: [char; Self::COUNT] = [
        '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
    ];

    pub const fn all() -> &'static [Self] {
        &[
            Self::Two,
            Self::Three,
            Self::Four,
            Self::Five,
            Self::Six,
            Self::Seven,
            Self::Eight,
            Self::Nine,
            Self::Ten,
            Self::Jack,
            Self::Queen,
            Self::King,
            Self::Ace,
        ]
    }
    /// The `n` highest ranks, lowest first.
    pub fn top(n: usize) -> &'static [Self] {
        &Self::all()[Self::COUNT - n.min(Self::COUNT)..]
    }
    pub fn char(&self) -> char {
        Self::CHARS[*self as usize]
    }
}

/// u8 isomorphism
impl TryFrom<u8> for Rank {
    type Error = CardError;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::all()
            .get(n as usize)
            .copied()
            .ok_or(CardError::RankIndex(n))
    }
}
impl From<Rank> for u8 {
    fn from(r: Rank) -> u8 {
        r as u8
    }
}

/// char isomorphism
impl TryFrom<char> for Rank {
    type Error = CardError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::CHARS
            .iter()
            .position(|&x| x == c)
            .map(|i| Self::all()[i])
            .ok_or(CardError::Rank(c))
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.char())
    }
}
