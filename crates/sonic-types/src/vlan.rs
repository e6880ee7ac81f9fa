//! VLAN ID type with validation.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// IEEE 802.1Q VLAN identifier (1-4094).
///
/// VLAN 0 is reserved (priority tagged frames).
/// VLAN 4095 is reserved.
/// Valid range is 1-4094.
///
/// # Examples
///
/// ```
/// use sonic_types::VlanId;
///
/// let vlan = VlanId::new(100).unwrap();
/// assert_eq!(vlan.as_u16(), 100);
///
/// // Invalid VLAN IDs return errors
/// assert!(VlanId::new(0).is_err());
/// assert!(VlanId::new(4095).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct VlanId(u16);

impl VlanId {
    /// Minimum valid VLAN ID.
    pub const MIN: u16 = 1;

    /// Maximum valid VLAN ID.
    pub const MAX: u16 = 4094;

    /// Default VLAN ID (VLAN 1). Switchports fall back to it when their
    /// access or native VLAN is removed.
    pub const DEFAULT: VlanId = VlanId(1);

    /// Creates a new VLAN ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the VLAN ID is not in the valid range (1-4094).
    pub const fn new(id: u16) -> Result<Self, ParseError> {
        if id >= Self::MIN && id <= Self::MAX {
            Ok(VlanId(id))
        } else {
            Err(ParseError::InvalidVlanId(id))
        }
    }

    /// Returns the VLAN ID as a u16.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if this is the default VLAN (VLAN 1).
    pub const fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT.0
    }
}

impl Default for VlanId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VlanId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // Handle "Vlan100" format
        let id_str = match trimmed.get(..4) {
            Some(prefix) if prefix.eq_ignore_ascii_case("vlan") => &trimmed[4..],
            _ => trimmed,
        };

        let id: u16 = id_str
            .parse()
            .map_err(|_| ParseError::InvalidVlanToken(s.to_string()))?;

        VlanId::new(id)
    }
}

impl TryFrom<u16> for VlanId {
    type Error = ParseError;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        VlanId::new(id)
    }
}

impl From<VlanId> for u16 {
    fn from(vlan: VlanId) -> u16 {
        vlan.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_vlan_ids() {
        assert!(VlanId::new(1).is_ok());
        assert!(VlanId::new(100).is_ok());
        assert!(VlanId::new(4094).is_ok());
    }

    #[test]
    fn test_invalid_vlan_ids() {
        assert_eq!(VlanId::new(0), Err(ParseError::InvalidVlanId(0)));
        assert_eq!(VlanId::new(4095), Err(ParseError::InvalidVlanId(4095)));
        assert!(VlanId::new(65535).is_err());
    }

    #[test]
    fn test_parse_numeric() {
        let vlan: VlanId = "100".parse().unwrap();
        assert_eq!(vlan.as_u16(), 100);

        let padded: VlanId = " 20 ".parse().unwrap();
        assert_eq!(padded.as_u16(), 20);
    }

    #[test]
    fn test_parse_vlan_prefix() {
        let vlan: VlanId = "Vlan100".parse().unwrap();
        assert_eq!(vlan.as_u16(), 100);

        let vlan2: VlanId = "VLAN200".parse().unwrap();
        assert_eq!(vlan2.as_u16(), 200);
    }

    #[test]
    fn test_parse_non_numeric() {
        assert_eq!(
            "ten".parse::<VlanId>(),
            Err(ParseError::InvalidVlanToken("ten".to_string()))
        );
        assert!("".parse::<VlanId>().is_err());
        assert!("70000".parse::<VlanId>().is_err());
    }

    #[test]
    fn test_default_vlan() {
        assert!(VlanId::DEFAULT.is_default());
        assert_eq!(VlanId::default(), VlanId::DEFAULT);
        assert!(!VlanId::new(100).unwrap().is_default());
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let vlan: VlanId = serde_json::from_str("10").unwrap();
        assert_eq!(vlan.as_u16(), 10);
        assert!(serde_json::from_str::<VlanId>("4095").is_err());
    }

    #[test]
    fn test_display() {
        let vlan = VlanId::new(100).unwrap();
        assert_eq!(vlan.to_string(), "100");
    }

    #[test]
    fn test_ordering() {
        let v1 = VlanId::new(10).unwrap();
        let v2 = VlanId::new(20).unwrap();
        assert!(v1 < v2);
    }
}
