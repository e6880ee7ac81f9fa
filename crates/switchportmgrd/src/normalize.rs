//! Desired-state normalization.
//!
//! Turns raw request parameters into a [`DesiredConfig`] whose state only
//! carries the attributes of the requested mode.

use sonic_types::{VlanId, VlanSet};

use crate::config::SwitchportParams;
use crate::error::{SwitchportError, SwitchportResult};
use crate::fields;
use crate::types::{DesiredConfig, Intent, InterfaceName, SwitchportMode, SwitchportState};

/// Build the mode-scoped desired configuration.
///
/// Attributes of the other mode are dropped without being parsed, so a
/// stale `trunk_vlans` value never fails an access-mode request.
pub fn normalize(params: &SwitchportParams) -> SwitchportResult<DesiredConfig> {
    let interface = InterfaceName::new(&params.interface)?;

    let state = match params.mode {
        SwitchportMode::Access => {
            let access_vlan = parse_vlan(fields::ACCESS_VLAN, params.access_vlan.as_deref())?;
            if access_vlan.is_none() && params.state == Intent::Present {
                return Err(SwitchportError::configuration(
                    fields::ACCESS_VLAN,
                    "access_vlan required when mode=access and intent=present",
                ));
            }
            SwitchportState::Access { access_vlan }
        }
        SwitchportMode::Trunk => SwitchportState::Trunk {
            native_vlan: parse_vlan(fields::NATIVE_VLAN, params.native_vlan.as_deref())?,
            trunk_vlans: parse_vlan_set(fields::TRUNK_VLANS, params.trunk_vlans.as_deref())?,
        },
    };

    Ok(DesiredConfig {
        interface,
        intent: params.state,
        state,
    })
}

/// Blank text counts as not declared
fn declared(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn parse_vlan(field: &str, text: Option<&str>) -> SwitchportResult<Option<VlanId>> {
    declared(text)
        .map(|t| t.parse::<VlanId>().map_err(|e| SwitchportError::parse(field, e)))
        .transpose()
}

fn parse_vlan_set(field: &str, text: Option<&str>) -> SwitchportResult<Option<VlanSet>> {
    declared(text)
        .map(|t| VlanSet::parse(t).map_err(|e| SwitchportError::parse(field, e)))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vlan(id: u16) -> VlanId {
        VlanId::new(id).unwrap()
    }

    #[test]
    fn test_access_drops_trunk_fields() {
        let params = SwitchportParams::new("Eth1/1", SwitchportMode::Access)
            .with_access_vlan("20")
            .with_native_vlan("10")
            .with_trunk_vlans("not-a-range");

        let desired = normalize(&params).unwrap();
        assert_eq!(desired.interface.as_str(), "eth1/1");
        assert_eq!(
            desired.state,
            SwitchportState::Access {
                access_vlan: Some(vlan(20))
            }
        );
    }

    #[test]
    fn test_trunk_drops_access_field() {
        let params = SwitchportParams::new("eth1/1", SwitchportMode::Trunk)
            .with_access_vlan("20")
            .with_native_vlan("10")
            .with_trunk_vlans("2-100");

        let desired = normalize(&params).unwrap();
        assert_eq!(
            desired.state,
            SwitchportState::Trunk {
                native_vlan: Some(vlan(10)),
                trunk_vlans: Some(VlanSet::parse("2-100").unwrap()),
            }
        );

        let json = serde_json::to_value(&desired.state).unwrap();
        assert!(json.get("access_vlan").is_none());
    }

    #[test]
    fn test_trunk_fields_optional() {
        let params = SwitchportParams::new("eth1/1", SwitchportMode::Trunk).with_native_vlan(" ");
        let desired = normalize(&params).unwrap();
        assert_eq!(
            desired.state,
            SwitchportState::Trunk {
                native_vlan: None,
                trunk_vlans: None,
            }
        );
    }

    #[test]
    fn test_access_vlan_required_for_present() {
        let params = SwitchportParams::new("eth1/1", SwitchportMode::Access).with_access_vlan("");
        match normalize(&params) {
            Err(SwitchportError::Configuration { field, message }) => {
                assert_eq!(field, "access_vlan");
                assert_eq!(
                    message,
                    "access_vlan required when mode=access and intent=present"
                );
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_access_vlan_optional_for_absent() {
        let params =
            SwitchportParams::new("eth1/1", SwitchportMode::Access).with_state(Intent::Absent);
        let desired = normalize(&params).unwrap();
        assert_eq!(desired.intent, Intent::Absent);
        assert_eq!(desired.state, SwitchportState::Access { access_vlan: None });
    }

    #[test]
    fn test_parse_errors_name_the_field() {
        let params =
            SwitchportParams::new("eth1/1", SwitchportMode::Trunk).with_trunk_vlans("100-2");
        match normalize(&params) {
            Err(SwitchportError::Parse { field, .. }) => assert_eq!(field, "trunk_vlans"),
            other => panic!("Expected Parse error, got {:?}", other),
        }

        let params =
            SwitchportParams::new("eth1/1", SwitchportMode::Access).with_access_vlan("4095");
        assert!(matches!(
            normalize(&params),
            Err(SwitchportError::Parse { .. })
        ));
    }

    #[test]
    fn test_empty_interface_rejected() {
        let params = SwitchportParams::new("", SwitchportMode::Access).with_access_vlan("20");
        assert!(matches!(
            normalize(&params),
            Err(SwitchportError::Configuration { .. })
        ));
    }
}
