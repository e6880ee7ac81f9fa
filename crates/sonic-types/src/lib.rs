//! Common SONiC types for switchport configuration.
//!
//! This crate provides type-safe representations of the VLAN primitives
//! shared by the configuration managers:
//!
//! - [`VlanId`]: IEEE 802.1Q VLAN identifiers
//! - [`VlanSet`]: canonical VLAN sets parsed from range text ("1,5-10")

mod vlan;
mod vlan_set;

pub use vlan::VlanId;
pub use vlan_set::VlanSet;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid VLAN ID: {0} (must be 1-4094)")]
    InvalidVlanId(u16),

    #[error("invalid VLAN token: '{0}'")]
    InvalidVlanToken(String),

    #[error("reversed VLAN range: {start}-{end}")]
    ReversedVlanRange { start: u16, end: u16 },

    #[error("empty VLAN range text")]
    EmptyVlanRange,
}
