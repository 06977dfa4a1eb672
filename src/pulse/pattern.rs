//! The pulse pattern string.

use std::fmt;
use std::str::FromStr;

use crate::types::Bit;

/// Error returned when parsing a pattern string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Character other than `0`, `1` or space
    InvalidChar { char: char },
    /// Leading, trailing or doubled separator
    EmptyGroup,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::InvalidChar { char } => {
                write!(f, "Invalid pattern character '{char}'")
            }
            PatternError::EmptyGroup => write!(f, "Pattern contains an empty group"),
        }
    }
}

impl std::error::Error for PatternError {}

/// A string over `0`, `1` and ` `: dit, dah, group separator.
///
/// Always holds at least one group and no empty groups.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PulsePattern(String);

impl PulsePattern {
    /// The single dit used for acknowledgments and "need more input".
    #[must_use]
    pub fn single() -> Self {
        PulsePattern("0".to_string())
    }

    /// Join non-empty groups with separators. Empty groups are skipped.
    #[must_use]
    pub fn from_groups<I, G>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: AsRef<[Bit]>,
    {
        let joined = groups
            .into_iter()
            .filter(|g| !g.as_ref().is_empty())
            .map(|g| g.as_ref().iter().map(|b| b.to_char()).collect::<String>())
            .collect::<Vec<_>>()
            .join(" ");
        PulsePattern(joined)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Groups, in order.
    pub fn groups(&self) -> impl Iterator<Item = Vec<Bit>> + '_ {
        self.0
            .split(' ')
            .map(|g| g.chars().filter_map(Bit::from_char).collect::<Vec<Bit>>())
    }

    /// All symbols with separators dropped.
    #[must_use]
    pub fn bits(&self) -> Vec<Bit> {
        self.0.chars().filter_map(Bit::from_char).collect()
    }

    /// Number of dits and dahs.
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.0.chars().filter(|c| *c != ' ').count()
    }
}

impl fmt::Display for PulsePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PulsePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(c) = s.chars().find(|c| !matches!(c, '0' | '1' | ' ')) {
            return Err(PatternError::InvalidChar { char: c });
        }
        if s.split(' ').any(str::is_empty) {
            return Err(PatternError::EmptyGroup);
        }
        Ok(PulsePattern(s.to_string()))
    }
}

impl AsRef<str> for PulsePattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_groups_joins_with_spaces() {
        let groups = [
            Bit::parse_str("100").unwrap(),
            Vec::new(),
            Bit::parse_str("011").unwrap(),
            Bit::parse_str("1").unwrap(),
        ];
        let pattern = PulsePattern::from_groups(groups);
        assert_eq!(pattern.as_str(), "100 011 1");
        assert_eq!(pattern.payload_len(), 7);
        assert_eq!(pattern.groups().count(), 3);
    }

    #[test]
    fn test_parse_validates() {
        assert_eq!("00 010".parse::<PulsePattern>().unwrap().as_str(), "00 010");
        assert_eq!(
            "0 2".parse::<PulsePattern>(),
            Err(PatternError::InvalidChar { char: '2' })
        );
        assert_eq!("0  1".parse::<PulsePattern>(), Err(PatternError::EmptyGroup));
        assert_eq!(" 01".parse::<PulsePattern>(), Err(PatternError::EmptyGroup));
        assert_eq!("".parse::<PulsePattern>(), Err(PatternError::EmptyGroup));
    }
}
