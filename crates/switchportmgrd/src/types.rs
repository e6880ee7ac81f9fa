//! Type definitions for switchportmgrd

use serde::{Deserialize, Serialize};
use sonic_types::{VlanId, VlanSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{SwitchportError, SwitchportResult};
use crate::fields;

/// Interface name, normalized to lowercase for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InterfaceName(String);

impl InterfaceName {
    /// Create a normalized interface name
    pub fn new(name: impl AsRef<str>) -> SwitchportResult<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(SwitchportError::configuration(
                fields::INTERFACE,
                "interface name must not be empty",
            ));
        }
        Ok(Self(name.to_lowercase()))
    }

    /// Returns the normalized name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `other` names the same interface, ignoring case
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for InterfaceName {
    type Error = SwitchportError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<InterfaceName> for String {
    fn from(name: InterfaceName) -> String {
        name.0
    }
}

/// Switchport operational mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchportMode {
    /// Untagged single-VLAN port
    Access,
    /// 802.1Q tagged port carrying a VLAN set
    Trunk,
}

impl SwitchportMode {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchportMode::Access => "access",
            SwitchportMode::Trunk => "trunk",
        }
    }
}

impl fmt::Display for SwitchportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwitchportMode {
    type Err = SwitchportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "access" => Ok(SwitchportMode::Access),
            "trunk" => Ok(SwitchportMode::Trunk),
            other => Err(SwitchportError::configuration(
                fields::MODE,
                format!("unsupported mode '{}' (expected access or trunk)", other),
            )),
        }
    }
}

/// What the caller wants done with the switchport configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Converge to the declared state
    #[default]
    Present,
    /// Remove the declared mode's configuration
    Absent,
    /// Reset every switchport attribute to device default
    Unconfigured,
}

impl Intent {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Present => "present",
            Intent::Absent => "absent",
            Intent::Unconfigured => "unconfigured",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = SwitchportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "present" => Ok(Intent::Present),
            "absent" => Ok(Intent::Absent),
            "unconfigured" => Ok(Intent::Unconfigured),
            other => Err(SwitchportError::configuration(
                fields::STATE,
                format!(
                    "unsupported state '{}' (expected present, absent or unconfigured)",
                    other
                ),
            )),
        }
    }
}

/// Classification of an interface before any switchport logic applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceClass {
    /// Interface could not be resolved
    #[default]
    Unknown,
    /// Routed port
    Layer3,
    /// Switched port
    Layer2,
}

/// Mode-tagged switchport configuration.
///
/// Only the active mode's attributes exist. In a proposed state an
/// undeclared attribute is `None`; states read back from a device always
/// carry every attribute of their mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SwitchportState {
    /// Access port
    Access {
        /// Untagged VLAN
        #[serde(default, skip_serializing_if = "Option::is_none")]
        access_vlan: Option<VlanId>,
    },
    /// Trunk port
    Trunk {
        /// VLAN carried untagged on the trunk
        #[serde(default, skip_serializing_if = "Option::is_none")]
        native_vlan: Option<VlanId>,
        /// VLANs allowed on the trunk
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trunk_vlans: Option<VlanSet>,
    },
}

impl SwitchportState {
    /// Returns the mode this state belongs to
    pub fn mode(&self) -> SwitchportMode {
        match self {
            SwitchportState::Access { .. } => SwitchportMode::Access,
            SwitchportState::Trunk { .. } => SwitchportMode::Trunk,
        }
    }

    /// Every VLAN this state references, tagged with its parameter name.
    ///
    /// A full trunk allowed list (`all`) is the device default and references
    /// no particular VLAN, so it contributes nothing.
    pub fn referenced_vlans(&self) -> Vec<(&'static str, VlanId)> {
        match self {
            SwitchportState::Access { access_vlan } => access_vlan
                .iter()
                .map(|&vlan| (fields::ACCESS_VLAN, vlan))
                .collect(),
            SwitchportState::Trunk {
                native_vlan,
                trunk_vlans,
            } => native_vlan
                .iter()
                .map(|&vlan| (fields::NATIVE_VLAN, vlan))
                .chain(
                    trunk_vlans
                        .iter()
                        .filter(|set| !set.is_full())
                        .flat_map(|set| set.iter().map(|vlan| (fields::TRUNK_VLANS, vlan))),
                )
                .collect(),
        }
    }
}

/// Switchport record as a device reports it.
///
/// A Layer-2 port reports every attribute regardless of its mode: an access
/// port still has a native VLAN and a trunk allowed list, they are just
/// inactive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedSwitchport {
    /// Operational mode
    pub mode: SwitchportMode,
    /// Access VLAN
    #[serde(default)]
    pub access_vlan: VlanId,
    /// Trunk native VLAN
    #[serde(default)]
    pub native_vlan: VlanId,
    /// Trunk allowed VLANs
    #[serde(default = "VlanSet::full")]
    pub trunk_vlans: VlanSet,
}

impl Default for ObservedSwitchport {
    fn default() -> Self {
        Self {
            mode: SwitchportMode::Access,
            access_vlan: VlanId::DEFAULT,
            native_vlan: VlanId::DEFAULT,
            trunk_vlans: VlanSet::full(),
        }
    }
}

impl ObservedSwitchport {
    /// Projects the record onto `mode`, keeping only that mode's attributes
    pub fn project(&self, mode: SwitchportMode) -> SwitchportState {
        match mode {
            SwitchportMode::Access => SwitchportState::Access {
                access_vlan: Some(self.access_vlan),
            },
            SwitchportMode::Trunk => SwitchportState::Trunk {
                native_vlan: Some(self.native_vlan),
                trunk_vlans: Some(self.trunk_vlans.clone()),
            },
        }
    }

    /// Projects the record onto its own operational mode
    pub fn state(&self) -> SwitchportState {
        self.project(self.mode)
    }

    /// Access VLAN 1, native VLAN 1 and every VLAN allowed on the trunk
    pub fn has_default_attributes(&self) -> bool {
        self.access_vlan.is_default() && self.native_vlan.is_default() && self.trunk_vlans.is_full()
    }

    /// Device-default switchport: access mode with default attributes
    pub fn is_default(&self) -> bool {
        self.mode == SwitchportMode::Access && self.has_default_attributes()
    }
}

/// Normalized desired configuration for one interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredConfig {
    /// Target interface
    pub interface: InterfaceName,
    /// Requested intent
    pub intent: Intent,
    /// Mode-scoped desired state
    pub state: SwitchportState,
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    /// Target interface
    pub interface: InterfaceName,
    /// Requested intent
    pub intent: Intent,
    /// Normalized desired state
    pub proposed: SwitchportState,
    /// State observed before any change
    pub existing: SwitchportState,
    /// State observed after applying commands
    pub new: SwitchportState,
    /// Configuration lines, in application order
    pub commands: Vec<String>,
    /// True if commands were (or in dry-run would be) applied
    pub changed: bool,
}
