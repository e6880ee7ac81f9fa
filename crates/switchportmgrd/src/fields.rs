//! Parameter names used in requests, errors and log fields.

/// Interface name parameter
pub const INTERFACE: &str = "interface";

/// Switchport mode parameter
pub const MODE: &str = "mode";

/// Access VLAN parameter
pub const ACCESS_VLAN: &str = "access_vlan";

/// Trunk native VLAN parameter
pub const NATIVE_VLAN: &str = "native_vlan";

/// Trunk allowed VLANs parameter
pub const TRUNK_VLANS: &str = "trunk_vlans";

/// Desired state (intent) parameter
pub const STATE: &str = "state";
