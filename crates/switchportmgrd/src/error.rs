//! Error types for switchport reconciliation.
//!
//! Every variant aborts the reconciliation pass. Apart from
//! [`SwitchportError::DeviceApply`], all of them are raised before any
//! command reaches the device.

use sonic_types::{ParseError, VlanId};
use thiserror::Error;

use crate::types::SwitchportMode;

/// Result type alias for switchport operations.
pub type SwitchportResult<T> = Result<T, SwitchportError>;

/// Errors that can occur while reconciling a switchport.
#[derive(Debug, Error)]
pub enum SwitchportError {
    /// Malformed VLAN or VLAN range text.
    #[error("Invalid VLAN value for {field}: {source}")]
    Parse {
        /// The parameter holding the text.
        field: String,
        /// The codec error.
        #[source]
        source: ParseError,
    },

    /// Missing or invalid parameter for the requested mode/intent.
    #[error("Invalid configuration for {field}: {message}")]
    Configuration {
        /// The offending parameter.
        field: String,
        /// Error message.
        message: String,
    },

    /// The interface is not in a state switchport logic can work on.
    #[error("Precondition failed for '{interface}': {message}")]
    Precondition {
        /// The interface name.
        interface: String,
        /// Error message.
        message: String,
    },

    /// Removal requested for a mode the port is not currently in.
    #[error(
        "Cannot remove {requested} configuration from '{interface}': port is in {observed} mode"
    )]
    ModeMismatch {
        /// The interface name.
        interface: String,
        /// Mode named by the request.
        requested: SwitchportMode,
        /// Mode the device reports.
        observed: SwitchportMode,
    },

    /// Layer-2 change requested on a bundled physical port.
    #[error("Interface '{interface}' is a port-channel member; configure the port-channel instead")]
    PortChannelConflict {
        /// The interface name.
        interface: String,
    },

    /// Referenced VLAN does not exist on the device.
    #[error("VLAN {vlan} ({field}) for '{interface}' is not defined on the device")]
    UnknownVlan {
        /// The interface name.
        interface: String,
        /// The parameter referencing the VLAN.
        field: String,
        /// The missing VLAN.
        vlan: VlanId,
    },

    /// Reading state from the device failed.
    #[error("Device query failed: {operation}: {message}")]
    DeviceQuery {
        /// The query that failed (e.g., "get_switchport_state").
        operation: String,
        /// Error message.
        message: String,
    },

    /// The device rejected or failed to apply configuration.
    #[error("Device apply failed for '{interface}': {message}")]
    DeviceApply {
        /// The interface being configured.
        interface: String,
        /// Error message.
        message: String,
    },
}

impl SwitchportError {
    /// Creates a parse error for a parameter.
    pub fn parse(field: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            field: field.into(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a precondition error.
    pub fn precondition(interface: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Precondition {
            interface: interface.into(),
            message: message.into(),
        }
    }

    /// Creates a port-channel conflict error.
    pub fn port_channel_conflict(interface: impl Into<String>) -> Self {
        Self::PortChannelConflict {
            interface: interface.into(),
        }
    }

    /// Creates an unknown VLAN error.
    pub fn unknown_vlan(
        interface: impl Into<String>,
        field: impl Into<String>,
        vlan: VlanId,
    ) -> Self {
        Self::UnknownVlan {
            interface: interface.into(),
            field: field.into(),
            vlan,
        }
    }

    /// Creates a device query error.
    pub fn device_query(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DeviceQuery {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a device apply error.
    pub fn device_apply(interface: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DeviceApply {
            interface: interface.into(),
            message: message.into(),
        }
    }

    /// Returns true if the failure came from the device session rather
    /// than from the request or the observed state.
    pub fn is_device_error(&self) -> bool {
        matches!(
            self,
            SwitchportError::DeviceQuery { .. } | SwitchportError::DeviceApply { .. }
        )
    }
}
