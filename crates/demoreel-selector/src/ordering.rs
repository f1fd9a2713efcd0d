//! Ordering of demo names in the selection control.
//!
//! Chapter-numbered demos (`_ch3_1_vertexattr`, `_ch5_10_alienrain`) are
//! ordered by their numeric chapter and section, so `_ch5_9` comes before
//! `_ch5_10` even though a plain string comparison says otherwise.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use demoreel_core::DemoName;

/// Prefix that marks chapter-numbered demo names.
pub const DEFAULT_SECTION_PREFIX: &str = "_c";

/// How registry names are turned into the ordered option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OrderingPolicy {
    /// Keep registration order.
    Registration,
    /// Plain string order.
    Lexical,
    /// Keep only names starting with `prefix` that carry a chapter number,
    /// ordered by `(chapter, section)`.
    ChapterSection {
        /// Required name prefix.
        prefix: String,
    },
}

impl Default for OrderingPolicy {
    fn default() -> Self {
        Self::ChapterSection {
            prefix: DEFAULT_SECTION_PREFIX.to_owned(),
        }
    }
}

impl OrderingPolicy {
    /// Order `names` under this policy.
    ///
    /// The returned list may be shorter than the input when the policy
    /// filters names.
    #[must_use]
    pub fn order<'a, I>(&self, names: I) -> Vec<DemoName>
    where
        I: IntoIterator<Item = &'a DemoName>,
    {
        match self {
            Self::Registration => names.into_iter().cloned().collect(),
            Self::Lexical => {
                let mut ordered: Vec<DemoName> = names.into_iter().cloned().collect();
                ordered.sort();
                ordered
            },
            Self::ChapterSection { prefix } => {
                let mut keyed: Vec<(SectionKey, &DemoName)> = names
                    .into_iter()
                    .filter_map(|n| SectionKey::parse(n.as_str(), prefix).map(|k| (k, n)))
                    .collect();
                keyed.sort_by(|(ka, na), (kb, nb)| ka.cmp(kb).then_with(|| na.cmp(nb)));
                keyed.into_iter().map(|(_, n)| n.clone()).collect()
            },
        }
    }
}

/// Numeric `(chapter, section)` key extracted from a demo name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionKey {
    /// Chapter number.
    pub chapter: u32,
    /// Section number within the chapter; 0 when the name has none.
    pub section: u32,
}

impl SectionKey {
    /// Extract the key from `name`.
    ///
    /// The name must start with `prefix`. Any non-digit characters after the
    /// prefix are skipped, then `<chapter>[_<section>]` is read. A missing or
    /// non-numeric section counts as 0 (`_ch2_main` is chapter 2, section 0).
    #[must_use]
    pub fn parse(name: &str, prefix: &str) -> Option<Self> {
        let rest = name.strip_prefix(prefix)?;
        let rest = rest.trim_start_matches(|c: char| !c.is_ascii_digit());
        let mut parts = rest.split('_');
        let chapter = parts.next()?.parse().ok()?;
        let section = parts
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        Some(Self { chapter, section })
    }
}

impl Ord for SectionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chapter
            .cmp(&other.chapter)
            .then(self.section.cmp(&other.section))
    }
}

impl PartialOrd for SectionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<DemoName> {
        raw.iter().map(|n| DemoName::new(*n).unwrap()).collect()
    }

    fn strs(ordered: &[DemoName]) -> Vec<&str> {
        ordered.iter().map(DemoName::as_str).collect()
    }

    #[test]
    fn test_parse_section_key() {
        assert_eq!(
            SectionKey::parse("_c3_2", "_c"),
            Some(SectionKey {
                chapter: 3,
                section: 2
            })
        );
        assert_eq!(
            SectionKey::parse("_ch5_10_alienrain", "_c"),
            Some(SectionKey {
                chapter: 5,
                section: 10
            })
        );
        assert_eq!(
            SectionKey::parse("_ch2_main", "_c"),
            Some(SectionKey {
                chapter: 2,
                section: 0
            })
        );
    }

    #[test]
    fn test_parse_rejects_unrecognized() {
        assert_eq!(SectionKey::parse("_default", "_c"), None);
        assert_eq!(SectionKey::parse("_chapter", "_c"), None);
        assert_eq!(SectionKey::parse("ch3_1", "_c"), None);
    }

    #[test]
    fn test_numeric_not_lexical() {
        let input = names(&["_c5_1", "_c3_2"]);
        let ordered = OrderingPolicy::default().order(&input);
        assert_eq!(strs(&ordered), ["_c3_2", "_c5_1"]);

        let input = names(&["_ch5_10_alienrain", "_ch5_9_mirrorclampedge", "_ch10_1_x"]);
        let ordered = OrderingPolicy::default().order(&input);
        assert_eq!(
            strs(&ordered),
            ["_ch5_9_mirrorclampedge", "_ch5_10_alienrain", "_ch10_1_x"]
        );
    }

    #[test]
    fn test_chapter_section_filters() {
        let input = names(&["_default", "_ch3_1_vertexattr", "misc", "_ch2_main"]);
        let ordered = OrderingPolicy::default().order(&input);
        assert_eq!(strs(&ordered), ["_ch2_main", "_ch3_1_vertexattr"]);
    }

    #[test]
    fn test_equal_keys_tie_break_by_name() {
        let input = names(&["_ch5_6_texturefilter", "_ch5_6_0_texture_unit"]);
        let ordered = OrderingPolicy::default().order(&input);
        assert_eq!(
            strs(&ordered),
            ["_ch5_6_0_texture_unit", "_ch5_6_texturefilter"]
        );
    }

    #[test]
    fn test_registration_and_lexical() {
        let input = names(&["_b", "_a", "_c"]);
        assert_eq!(
            strs(&OrderingPolicy::Registration.order(&input)),
            ["_b", "_a", "_c"]
        );
        assert_eq!(
            strs(&OrderingPolicy::Lexical.order(&input)),
            ["_a", "_b", "_c"]
        );
    }

    #[test]
    fn test_policy_serde() {
        let policy: OrderingPolicy =
            serde_json::from_str(r#"{"kind":"chapter-section","prefix":"_ch"}"#).unwrap();
        assert_eq!(
            policy,
            OrderingPolicy::ChapterSection {
                prefix: "_ch".to_owned()
            }
        );
        let json = serde_json::to_string(&OrderingPolicy::Lexical).unwrap();
        assert_eq!(json, r#"{"kind":"lexical"}"#);
    }
}
