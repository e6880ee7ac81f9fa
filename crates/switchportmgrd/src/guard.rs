//! Precondition checks run against the observed device state.
//!
//! Each check is a hard failure: the reconciliation pass stops before any
//! command is generated or applied.

use sonic_types::VlanSet;

use crate::diff::Delta;
use crate::error::{SwitchportError, SwitchportResult};
use crate::types::{
    InterfaceClass, InterfaceName, Intent, ObservedSwitchport, SwitchportMode, SwitchportState,
};

/// The interface must already be a Layer-2 port.
pub fn check_interface_class(
    interface: &InterfaceName,
    class: InterfaceClass,
) -> SwitchportResult<()> {
    match class {
        InterfaceClass::Layer2 => Ok(()),
        InterfaceClass::Layer3 | InterfaceClass::Unknown => Err(SwitchportError::precondition(
            interface.as_str(),
            "interface must be converted to Layer2 first",
        )),
    }
}

/// The device must report a switchport record, and removal must target the
/// mode the port is actually in.
pub fn check_observed_state(
    interface: &InterfaceName,
    observed: Option<ObservedSwitchport>,
    requested_mode: SwitchportMode,
    intent: Intent,
) -> SwitchportResult<ObservedSwitchport> {
    let observed = observed.ok_or_else(|| {
        SwitchportError::precondition(
            interface.as_str(),
            "device reported no switchport state; check that the full interface name is used",
        )
    })?;

    if intent == Intent::Absent && observed.mode != requested_mode {
        return Err(SwitchportError::ModeMismatch {
            interface: interface.to_string(),
            requested: requested_mode,
            observed: observed.mode,
        });
    }

    Ok(observed)
}

/// Every VLAN the desired state references must exist on the device.
///
/// Reports the first missing VLAN, in access, native, trunk order.
pub fn check_vlans_registered(
    interface: &InterfaceName,
    proposed: &SwitchportState,
    registry: &VlanSet,
) -> SwitchportResult<()> {
    match proposed
        .referenced_vlans()
        .into_iter()
        .find(|(_, vlan)| !registry.contains(*vlan))
    {
        Some((field, vlan)) => Err(SwitchportError::unknown_vlan(interface.as_str(), field, vlan)),
        None => Ok(()),
    }
}

/// A port-channel member cannot take Layer-2 changes directly.
pub fn check_port_channel(
    interface: &InterfaceName,
    delta: &Delta,
    is_port_channel_member: bool,
) -> SwitchportResult<()> {
    if is_port_channel_member && !delta.is_empty() {
        return Err(SwitchportError::port_channel_conflict(interface.as_str()));
    }
    Ok(())
}
