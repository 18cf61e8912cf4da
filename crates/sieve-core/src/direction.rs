use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Direction
///
/// Sort direction shared by request parsing, sort policies, and the
/// materializer boundary. Body entries accept upper- or lower-case names.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "ASC", alias = "asc", alias = "Asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc", alias = "Desc")]
    Desc,
}

impl Direction {
    /// Prefix marking a descending field in a delimited sort value.
    pub const DESC_PREFIX: char = '-';

    /// Split an optional `-` prefix off a sort token.
    #[must_use]
    pub fn from_token(token: &str) -> (Self, &str) {
        match token.strip_prefix(Self::DESC_PREFIX) {
            Some(rest) => (Self::Desc, rest),
            None => (Self::Asc, token),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        };
        write!(f, "{label}")
    }
}
