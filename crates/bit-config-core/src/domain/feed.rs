//! Feed-letter shortcuts.
//!
//! The AoM cloud exposes six preset feeds, `feed-a` through `feed-f`.  The
//! simplified form asks for just the letter; the stored feed key is always
//! the full canonical string.  Anything else in the feed-key slot is a
//! custom key and is left alone.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix shared by every canonical feed key.
pub const FEED_KEY_PREFIX: &str = "feed-";

/// One of the six preset feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedLetter {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl FeedLetter {
    /// The fixed alphabet, in display order.
    pub const ALL: [FeedLetter; 6] = [
        FeedLetter::A,
        FeedLetter::B,
        FeedLetter::C,
        FeedLetter::D,
        FeedLetter::E,
        FeedLetter::F,
    ];

    /// The selector text for this letter (`"a"`..`"f"`).
    pub fn as_str(self) -> &'static str {
        match self {
            FeedLetter::A => "a",
            FeedLetter::B => "b",
            FeedLetter::C => "c",
            FeedLetter::D => "d",
            FeedLetter::E => "e",
            FeedLetter::F => "f",
        }
    }

    /// Recognizes a selector value.  Only the exact lowercase letters
    /// `a`..`f` match; anything else (including blank) is `None`.
    pub fn parse(selector: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|letter| letter.as_str() == selector)
    }

    /// Reverse lookup: the letter whose canonical key equals `feed_key`.
    pub fn from_feed_key(feed_key: &str) -> Option<Self> {
        let suffix = feed_key.strip_prefix(FEED_KEY_PREFIX)?;
        Self::parse(suffix)
    }

    /// The canonical feed key, e.g. `feed-c`.
    pub fn feed_key(self) -> String {
        format!("{FEED_KEY_PREFIX}{}", self.as_str())
    }
}

impl fmt::Display for FeedLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognizes_each_letter() {
        for letter in FeedLetter::ALL {
            assert_eq!(FeedLetter::parse(letter.as_str()), Some(letter));
        }
    }

    #[test]
    fn test_parse_rejects_outside_alphabet() {
        assert_eq!(FeedLetter::parse(""), None);
        assert_eq!(FeedLetter::parse("g"), None);
        assert_eq!(FeedLetter::parse("C"), None);
        assert_eq!(FeedLetter::parse("ab"), None);
    }

    #[test]
    fn test_feed_key_is_prefix_plus_letter() {
        assert_eq!(FeedLetter::C.feed_key(), "feed-c");
        assert_eq!(FeedLetter::A.feed_key(), "feed-a");
    }

    #[test]
    fn test_from_feed_key_matches_canonical_forms_only() {
        assert_eq!(FeedLetter::from_feed_key("feed-c"), Some(FeedLetter::C));
        assert_eq!(FeedLetter::from_feed_key("feed-f"), Some(FeedLetter::F));
        assert_eq!(FeedLetter::from_feed_key("feed-g"), None);
        assert_eq!(FeedLetter::from_feed_key("feed-"), None);
        assert_eq!(FeedLetter::from_feed_key("myCustomFeed"), None);
        assert_eq!(FeedLetter::from_feed_key("c"), None);
    }

    #[test]
    fn test_display_prints_selector_text() {
        assert_eq!(FeedLetter::E.to_string(), "e");
    }
}
