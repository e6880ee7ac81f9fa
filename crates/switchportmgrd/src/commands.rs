//! Command builders for switchport operations
//!
//! Commands are grouped per interface in a [`CommandSet`] and always start
//! with the interface context line, so sets for several interfaces can be
//! concatenated into one configuration session.

use sonic_types::{VlanId, VlanSet};

use crate::diff::{Delta, FieldChange};
use crate::types::{InterfaceName, ObservedSwitchport, SwitchportMode};

/// Interface context command
pub const INTERFACE_CMD: &str = "interface";

/// Reset a trunk port back to access mode
pub const NO_MODE_TRUNK_CMD: &str = "no switchport mode trunk";

/// Reset the access VLAN to default
pub const NO_ACCESS_VLAN_CMD: &str = "no switchport access vlan";

/// Reset the trunk native VLAN to default
pub const NO_NATIVE_VLAN_CMD: &str = "no switchport trunk native vlan";

/// Reset the trunk allowed list to all VLANs
pub const NO_ALLOWED_VLAN_CMD: &str = "no switchport trunk allowed vlan";

/// Build interface context command
pub fn build_interface_cmd(interface: &InterfaceName) -> String {
    format!("{} {}", INTERFACE_CMD, interface)
}

/// Build switchport mode command
pub fn build_mode_cmd(mode: SwitchportMode) -> String {
    format!("switchport mode {}", mode)
}

/// Build access VLAN command
pub fn build_access_vlan_cmd(vlan: VlanId) -> String {
    format!("switchport access vlan {}", vlan)
}

/// Build trunk native VLAN command
pub fn build_native_vlan_cmd(vlan: VlanId) -> String {
    format!("switchport trunk native vlan {}", vlan)
}

/// Build trunk allowed VLAN command
pub fn build_allowed_vlan_cmd(vlans: &VlanSet) -> String {
    format!("switchport trunk allowed vlan {}", vlans.canonicalize())
}

/// Ordered configuration lines for one interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSet {
    interface: InterfaceName,
    lines: Vec<String>,
}

impl CommandSet {
    /// Create an empty set scoped to `interface`
    pub fn new(interface: &InterfaceName) -> Self {
        Self {
            interface: interface.clone(),
            lines: Vec::new(),
        }
    }

    /// Append a configuration line
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Returns true if there is nothing to configure
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the set with the interface context first.
    ///
    /// An empty set renders as no lines at all.
    pub fn into_lines(self) -> Vec<String> {
        if self.lines.is_empty() {
            return Vec::new();
        }
        let mut rendered = Vec::with_capacity(self.lines.len() + 1);
        rendered.push(build_interface_cmd(&self.interface));
        rendered.extend(self.lines);
        rendered
    }
}

/// Build the commands that converge the port onto `delta`.
///
/// When the mode changes, attributes left behind by the previous mode are
/// cleared so the port does not carry inactive non-default configuration.
pub fn config_commands(
    interface: &InterfaceName,
    observed: &ObservedSwitchport,
    delta: &Delta,
) -> CommandSet {
    let mut set = CommandSet::new(interface);

    if let Some(mode) = delta.mode_change() {
        set.push(build_mode_cmd(mode));
        match mode {
            SwitchportMode::Access => {
                if !observed.native_vlan.is_default() {
                    set.push(NO_NATIVE_VLAN_CMD);
                }
                if !observed.trunk_vlans.is_full() {
                    set.push(NO_ALLOWED_VLAN_CMD);
                }
            }
            SwitchportMode::Trunk => {
                if !observed.access_vlan.is_default() {
                    set.push(NO_ACCESS_VLAN_CMD);
                }
            }
        }
    }

    for change in delta.iter() {
        match change {
            FieldChange::Mode(_) => {}
            FieldChange::AccessVlan(vlan) => set.push(build_access_vlan_cmd(*vlan)),
            FieldChange::NativeVlan(vlan) => set.push(build_native_vlan_cmd(*vlan)),
            FieldChange::TrunkVlans(vlans) => set.push(build_allowed_vlan_cmd(vlans)),
        }
    }

    set
}

/// Build the commands that remove the `requested_mode` configuration.
pub fn remove_commands(
    interface: &InterfaceName,
    observed: &ObservedSwitchport,
    requested_mode: SwitchportMode,
) -> CommandSet {
    if observed.has_default_attributes() {
        let mut set = CommandSet::new(interface);
        if requested_mode == SwitchportMode::Trunk {
            set.push(NO_MODE_TRUNK_CMD);
        }
        return set;
    }
    reset_commands(interface, observed)
}

/// Build the commands that return every switchport attribute to default.
pub fn default_commands(interface: &InterfaceName, observed: &ObservedSwitchport) -> CommandSet {
    reset_commands(interface, observed)
}

fn reset_commands(interface: &InterfaceName, observed: &ObservedSwitchport) -> CommandSet {
    let mut set = CommandSet::new(interface);

    if !observed.native_vlan.is_default() {
        set.push(NO_NATIVE_VLAN_CMD);
    }
    if !observed.trunk_vlans.is_full() {
        set.push(NO_ALLOWED_VLAN_CMD);
    }
    if !observed.access_vlan.is_default() {
        set.push(NO_ACCESS_VLAN_CMD);
    }
    if observed.mode == SwitchportMode::Trunk {
        set.push(NO_MODE_TRUNK_CMD);
    }

    set
}
