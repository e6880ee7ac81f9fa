//! Request parameters for a reconciliation pass.
//!
//! Parameters arrive either from command-line flags or from a JSON request
//! file. VLAN fields stay raw text here; [`crate::normalize`] parses them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Intent, SwitchportMode};

/// Raw declared switchport parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchportParams {
    /// Interface to configure (case-insensitive)
    pub interface: String,
    /// Desired mode
    pub mode: SwitchportMode,
    /// Access VLAN (mode=access only)
    #[serde(default, deserialize_with = "vlan_text")]
    pub access_vlan: Option<String>,
    /// Trunk native VLAN (mode=trunk only)
    #[serde(default, deserialize_with = "vlan_text")]
    pub native_vlan: Option<String>,
    /// Trunk allowed VLAN range text (mode=trunk only)
    #[serde(default, deserialize_with = "vlan_text")]
    pub trunk_vlans: Option<String>,
    /// Requested intent
    #[serde(default)]
    pub state: Intent,
    /// Compute commands without applying them
    #[serde(default)]
    pub dry_run: bool,
}

impl SwitchportParams {
    /// Create parameters with intent=present and no VLAN fields
    pub fn new(interface: impl Into<String>, mode: SwitchportMode) -> Self {
        Self {
            interface: interface.into(),
            mode,
            access_vlan: None,
            native_vlan: None,
            trunk_vlans: None,
            state: Intent::Present,
            dry_run: false,
        }
    }

    /// Set the access VLAN
    pub fn with_access_vlan(mut self, vlan: impl Into<String>) -> Self {
        self.access_vlan = Some(vlan.into());
        self
    }

    /// Set the trunk native VLAN
    pub fn with_native_vlan(mut self, vlan: impl Into<String>) -> Self {
        self.native_vlan = Some(vlan.into());
        self
    }

    /// Set the trunk allowed VLAN range
    pub fn with_trunk_vlans(mut self, vlans: impl Into<String>) -> Self {
        self.trunk_vlans = Some(vlans.into());
        self
    }

    /// Set the intent
    pub fn with_state(mut self, state: Intent) -> Self {
        self.state = state;
        self
    }

    /// Enable or disable dry-run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Accepts VLAN values written either as JSON numbers or as text.
fn vlan_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    }))
}
