//! Device session seam and an in-memory simulated device.
//!
//! [`DeviceSession`] is everything the reconciler needs from a device:
//! four queries and one apply. Transport, output parsing and credentials
//! live behind it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sonic_types::{VlanId, VlanSet};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::commands::INTERFACE_CMD;
use crate::error::{SwitchportError, SwitchportResult};
use crate::types::{InterfaceClass, InterfaceName, ObservedSwitchport, SwitchportMode};

/// Operations the reconciler performs against a device.
///
/// Queries must be side-effect free. `apply_commands` must apply the whole
/// batch or fail visibly; the reconciler does no partial-apply recovery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceSession: Send + Sync {
    /// Classify the interface (Layer-2, Layer-3 or unresolvable).
    async fn classify_interface(
        &self,
        interface: &InterfaceName,
    ) -> SwitchportResult<InterfaceClass>;

    /// Read the switchport record. `None` means the device reported nothing.
    async fn get_switchport_state(
        &self,
        interface: &InterfaceName,
    ) -> SwitchportResult<Option<ObservedSwitchport>>;

    /// VLANs currently defined on the device.
    async fn get_vlan_registry(&self) -> SwitchportResult<VlanSet>;

    /// Returns true if the physical interface is bundled in a port-channel.
    async fn is_port_channel_member(&self, interface: &InterfaceName) -> SwitchportResult<bool>;

    /// Apply an ordered batch of configuration lines.
    async fn apply_commands(&mut self, commands: &[String]) -> SwitchportResult<()>;
}

/// One interface in a [`DeviceSnapshot`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSnapshot {
    /// Interface classification
    #[serde(default)]
    pub class: InterfaceClass,
    /// Bundled in a port-channel
    #[serde(default)]
    pub port_channel_member: bool,
    /// Switchport record, if the device reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switchport: Option<ObservedSwitchport>,
}

/// Serializable device state used by [`SimulatedDevice`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// VLANs defined on the device
    #[serde(default)]
    pub vlans: VlanSet,
    /// Interfaces keyed by name
    #[serde(default)]
    pub interfaces: BTreeMap<String, InterfaceSnapshot>,
}

impl DeviceSnapshot {
    /// Add or replace an interface
    pub fn with_interface(mut self, name: impl Into<String>, interface: InterfaceSnapshot) -> Self {
        self.interfaces.insert(name.into(), interface);
        self
    }

    /// Snapshot key for `name`, matched case-insensitively
    fn find_key(interfaces: &BTreeMap<String, InterfaceSnapshot>, name: &str) -> Option<String> {
        interfaces
            .keys()
            .find(|key| key.trim().eq_ignore_ascii_case(name.trim()))
            .cloned()
    }

    fn find(&self, interface: &InterfaceName) -> Option<&InterfaceSnapshot> {
        self.interfaces
            .iter()
            .find(|(key, _)| interface.matches(key))
            .map(|(_, snapshot)| snapshot)
    }
}

/// In-memory device that understands the configuration lines this crate
/// emits.
///
/// Used for offline reconciliation against a snapshot file and in tests.
#[derive(Debug, Clone, Default)]
pub struct SimulatedDevice {
    snapshot: DeviceSnapshot,
    applied: Vec<Vec<String>>,
}

impl SimulatedDevice {
    /// Creates a device from a snapshot
    pub fn new(snapshot: DeviceSnapshot) -> Self {
        Self {
            snapshot,
            applied: Vec::new(),
        }
    }

    /// Current device state
    pub fn snapshot(&self) -> &DeviceSnapshot {
        &self.snapshot
    }

    /// Batches accepted by `apply_commands`, oldest first
    pub fn applied(&self) -> &[Vec<String>] {
        &self.applied
    }

    /// Consumes the device, returning its state
    pub fn into_snapshot(self) -> DeviceSnapshot {
        self.snapshot
    }
}

#[async_trait]
impl DeviceSession for SimulatedDevice {
    async fn classify_interface(
        &self,
        interface: &InterfaceName,
    ) -> SwitchportResult<InterfaceClass> {
        Ok(self
            .snapshot
            .find(interface)
            .map(|snapshot| snapshot.class)
            .unwrap_or(InterfaceClass::Unknown))
    }

    async fn get_switchport_state(
        &self,
        interface: &InterfaceName,
    ) -> SwitchportResult<Option<ObservedSwitchport>> {
        Ok(self
            .snapshot
            .find(interface)
            .and_then(|snapshot| snapshot.switchport.clone()))
    }

    async fn get_vlan_registry(&self) -> SwitchportResult<VlanSet> {
        Ok(self.snapshot.vlans.clone())
    }

    async fn is_port_channel_member(&self, interface: &InterfaceName) -> SwitchportResult<bool> {
        Ok(self
            .snapshot
            .find(interface)
            .map(|snapshot| snapshot.port_channel_member)
            .unwrap_or(false))
    }

    async fn apply_commands(&mut self, commands: &[String]) -> SwitchportResult<()> {
        // Stage against a copy so a rejected line leaves the device untouched
        let mut staged = self.snapshot.interfaces.clone();
        let mut context: Option<String> = None;

        for line in commands.iter().map(|l| l.trim()) {
            if let Some(name) = line
                .strip_prefix(INTERFACE_CMD)
                .filter(|rest| rest.starts_with(char::is_whitespace))
            {
                let key = DeviceSnapshot::find_key(&staged, name).ok_or_else(|| {
                    SwitchportError::device_apply(name.trim(), "no such interface")
                })?;
                debug!(interface = %key, "Entering interface context");
                context = Some(key);
                continue;
            }

            let key = context.as_deref().ok_or_else(|| {
                SwitchportError::device_apply("", format!("'{}' outside interface context", line))
            })?;
            let entry = staged
                .get_mut(key)
                .ok_or_else(|| SwitchportError::device_apply(key, "no such interface"))?;
            if entry.class != InterfaceClass::Layer2 {
                return Err(SwitchportError::device_apply(key, "not a Layer2 interface"));
            }

            let port = entry.switchport.get_or_insert_with(ObservedSwitchport::default);
            apply_switchport_line(port, line)
                .map_err(|msg| SwitchportError::device_apply(key, msg))?;
        }

        self.snapshot.interfaces = staged;
        self.applied.push(commands.to_vec());
        info!(lines = commands.len(), "Simulated device applied configuration");
        Ok(())
    }
}

fn apply_switchport_line(port: &mut ObservedSwitchport, line: &str) -> Result<(), String> {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        ["switchport", "mode", mode] => {
            port.mode = mode.parse::<SwitchportMode>().map_err(|e| e.to_string())?;
        }
        ["no", "switchport", "mode", "trunk"] => port.mode = SwitchportMode::Access,
        ["switchport", "access", "vlan", id] => port.access_vlan = parse_vlan(id)?,
        ["no", "switchport", "access", "vlan", ..] => port.access_vlan = VlanId::DEFAULT,
        ["switchport", "trunk", "native", "vlan", id] => port.native_vlan = parse_vlan(id)?,
        ["no", "switchport", "trunk", "native", "vlan", ..] => port.native_vlan = VlanId::DEFAULT,
        ["switchport", "trunk", "allowed", "vlan", range] => {
            port.trunk_vlans = VlanSet::parse(range).map_err(|e| e.to_string())?;
        }
        ["no", "switchport", "trunk", "allowed", "vlan", ..] => port.trunk_vlans = VlanSet::full(),
        _ => return Err(format!("unrecognized command '{}'", line)),
    }

    Ok(())
}

fn parse_vlan(text: &str) -> Result<VlanId, String> {
    text.parse().map_err(|e: sonic_types::ParseError| e.to_string())
}
