//! switchportmgrd - Layer-2 switchport reconciliation for SONiC
//!
//! Compares the declared switchport configuration of one interface (mode,
//! access VLAN, native VLAN, trunk VLAN set) with what the device reports,
//! and emits the minimal ordered command sequence needed to converge.
//! Devices are reached through the [`DeviceSession`] trait.

mod commands;
mod config;
mod diff;
mod error;
pub mod fields;
mod guard;
mod normalize;
mod session;
mod switchport_mgr;
mod types;

pub use commands::*;
pub use config::SwitchportParams;
pub use diff::{diff, Delta, FieldChange};
pub use error::{SwitchportError, SwitchportResult};
pub use guard::*;
pub use normalize::normalize;
pub use session::{DeviceSession, DeviceSnapshot, InterfaceSnapshot, SimulatedDevice};
pub use switchport_mgr::SwitchportMgr;
pub use types::*;
