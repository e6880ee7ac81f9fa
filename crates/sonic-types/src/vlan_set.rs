//! VLAN set with range-text parsing and canonical formatting.
//!
//! Switches describe trunk membership as range text ("1-10,20,30-40").
//! Different texts can describe the same membership ("2-4" and "4,2,3"),
//! so comparisons always go through [`VlanSet`] rather than the text.

use crate::{ParseError, VlanId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A single range token: "10" or "10-20" (whitespace around '-' allowed).
static VLAN_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(?:\s*-\s*(\d+))?$").expect("Invalid regex pattern"));

/// Keyword devices print for the full 1-4094 range.
const ALL_KEYWORD: &str = "all";

/// Keyword devices print for an empty trunk allowed list.
const NONE_KEYWORD: &str = "none";

/// Canonical, sorted and deduplicated set of VLAN IDs.
///
/// Equality is set equality, independent of the text the set was parsed
/// from.
///
/// # Examples
///
/// ```
/// use sonic_types::VlanSet;
///
/// let a: VlanSet = "2-4,10".parse().unwrap();
/// let b: VlanSet = "10,4,3,2,3".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(b.canonicalize(), "2-4,10");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VlanSet(BTreeSet<VlanId>);

impl VlanSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set of every valid VLAN (1-4094).
    pub fn full() -> Self {
        (VlanId::MIN..=VlanId::MAX)
            .filter_map(|id| VlanId::new(id).ok())
            .collect()
    }

    /// Parses range text such as `"1"`, `"1-10"` or `"1,5-7,9"`.
    ///
    /// The keywords `all` and `none` are accepted as the whole text.
    ///
    /// # Errors
    ///
    /// Fails on empty text, empty or non-numeric tokens, IDs outside
    /// 1-4094 and reversed ranges such as `"10-5"`.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::EmptyVlanRange);
        }
        if text.eq_ignore_ascii_case(ALL_KEYWORD) {
            return Ok(Self::full());
        }
        if text.eq_ignore_ascii_case(NONE_KEYWORD) {
            return Ok(Self::new());
        }

        let mut set = BTreeSet::new();
        for token in text.split(',').map(str::trim) {
            let caps = VLAN_TOKEN_RE
                .captures(token)
                .ok_or_else(|| ParseError::InvalidVlanToken(token.to_string()))?;

            let start = parse_bound(&caps[1], token)?;
            let end = match caps.get(2) {
                Some(m) => parse_bound(m.as_str(), token)?,
                None => start,
            };

            if start > end {
                return Err(ParseError::ReversedVlanRange {
                    start: start.as_u16(),
                    end: end.as_u16(),
                });
            }

            for id in start.as_u16()..=end.as_u16() {
                set.insert(VlanId::new(id)?);
            }
        }

        Ok(Self(set))
    }

    /// Formats the set as compact range text, e.g. `"1-3,7"`.
    ///
    /// The empty set formats as `none`.
    pub fn canonicalize(&self) -> String {
        if self.0.is_empty() {
            return NONE_KEYWORD.to_string();
        }

        let mut runs: Vec<(u16, u16)> = Vec::new();
        for id in self.0.iter().map(VlanId::as_u16) {
            match runs.last_mut() {
                Some((_, end)) if *end + 1 == id => *end = id,
                _ => runs.push((id, id)),
            }
        }

        runs.iter()
            .map(|&(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{}-{}", start, end)
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Returns true if every valid VLAN is a member.
    pub fn is_full(&self) -> bool {
        self.0.len() == usize::from(VlanId::MAX - VlanId::MIN + 1)
    }

    /// Returns true if `vlan` is a member.
    pub fn contains(&self, vlan: VlanId) -> bool {
        self.0.contains(&vlan)
    }

    /// Iterates members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = VlanId> + '_ {
        self.0.iter().copied()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn parse_bound(digits: &str, token: &str) -> Result<VlanId, ParseError> {
    let id: u16 = digits
        .parse()
        .map_err(|_| ParseError::InvalidVlanToken(token.to_string()))?;
    VlanId::new(id)
}

impl FromStr for VlanSet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VlanSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonicalize())
    }
}

impl FromIterator<VlanId> for VlanSet {
    fn from_iter<I: IntoIterator<Item = VlanId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl TryFrom<String> for VlanSet {
    type Error = ParseError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl From<VlanSet> for String {
    fn from(set: VlanSet) -> String {
        set.canonicalize()
    }
}
