//! Delta computation between desired and observed switchport state.
//!
//! The diff is one-directional: only attributes the request declares are
//! compared. Extra configuration on the device beyond the declared
//! attributes is never reported as drift.

use sonic_types::{VlanId, VlanSet};

use crate::types::{ObservedSwitchport, SwitchportMode, SwitchportState};

/// One attribute whose desired value differs from the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// Operational mode must change
    Mode(SwitchportMode),
    /// Access VLAN must change
    AccessVlan(VlanId),
    /// Trunk native VLAN must change
    NativeVlan(VlanId),
    /// Trunk allowed VLANs must change
    TrunkVlans(VlanSet),
}

impl FieldChange {
    /// Parameter name for logging
    pub fn name(&self) -> &'static str {
        match self {
            FieldChange::Mode(_) => "mode",
            FieldChange::AccessVlan(_) => "access_vlan",
            FieldChange::NativeVlan(_) => "native_vlan",
            FieldChange::TrunkVlans(_) => "trunk_vlans",
        }
    }
}

/// Ordered set of changes needed to converge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta(Vec<FieldChange>);

impl Delta {
    /// Returns true if the device already matches
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of changed attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate changes in command order
    pub fn iter(&self) -> impl Iterator<Item = &FieldChange> {
        self.0.iter()
    }

    /// The new mode, if the mode changes
    pub fn mode_change(&self) -> Option<SwitchportMode> {
        self.0.iter().find_map(|change| match change {
            FieldChange::Mode(mode) => Some(*mode),
            _ => None,
        })
    }

    /// Names of the changed attributes
    pub fn field_names(&self) -> Vec<&'static str> {
        self.0.iter().map(FieldChange::name).collect()
    }
}

/// Compute the delta between `proposed` and the device record.
///
/// The device record is read in the proposed mode: an access request is
/// compared against the device's access VLAN even while the port is a
/// trunk. VLAN sets compare by membership, so `"2-4"` equals `"4,3,2"`.
pub fn diff(proposed: &SwitchportState, observed: &ObservedSwitchport) -> Delta {
    let mut changes = Vec::new();

    if observed.mode != proposed.mode() {
        changes.push(FieldChange::Mode(proposed.mode()));
    }

    match proposed {
        SwitchportState::Access { access_vlan } => {
            if let Some(vlan) = access_vlan.filter(|v| *v != observed.access_vlan) {
                changes.push(FieldChange::AccessVlan(vlan));
            }
        }
        SwitchportState::Trunk {
            native_vlan,
            trunk_vlans,
        } => {
            if let Some(vlan) = native_vlan.filter(|v| *v != observed.native_vlan) {
                changes.push(FieldChange::NativeVlan(vlan));
            }
            if let Some(vlans) = trunk_vlans.as_ref().filter(|v| **v != observed.trunk_vlans) {
                changes.push(FieldChange::TrunkVlans(vlans.clone()));
            }
        }
    }

    Delta(changes)
}
