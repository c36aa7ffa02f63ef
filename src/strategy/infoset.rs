/// Canonical name of everything the acting seat can observe.
///
/// Built by an [`Encoder`](super::Encoder) from the viewer's own cards, the
/// board, and the betting so far; used verbatim as the strategy table key.
/// Opponent hole cards never take part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfosetKey(String);

impl InfosetKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for InfosetKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}
impl From<&str> for InfosetKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
impl From<InfosetKey> for String {
    fn from(key: InfosetKey) -> Self {
        key.0
    }
}

impl std::borrow::Borrow<str> for InfosetKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InfosetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
