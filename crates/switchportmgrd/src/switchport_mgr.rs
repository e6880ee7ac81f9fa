//! SwitchportMgr - switchport reconciliation

use tracing::{debug, info, instrument, warn};

use crate::commands::{config_commands, default_commands, remove_commands};
use crate::config::SwitchportParams;
use crate::diff::diff;
use crate::error::{SwitchportError, SwitchportResult};
use crate::guard;
use crate::normalize::normalize;
use crate::session::DeviceSession;
use crate::types::{Intent, ReconciliationResult};

/// SwitchportMgr reconciles one interface per call
///
/// Reconciliation flow:
/// 1. Normalize the request into a mode-scoped desired state
/// 2. Classify the interface and read its switchport record (one snapshot)
/// 3. Validate preconditions and VLAN existence
/// 4. Diff, generate commands, apply unless dry-run
/// 5. Re-read the record after a successful apply
pub struct SwitchportMgr<S> {
    /// Device the manager reads from and configures
    session: S,
}

impl<S: DeviceSession> SwitchportMgr<S> {
    /// Creates a new SwitchportMgr over a device session
    pub fn new(session: S) -> Self {
        Self { session }
    }

    /// Returns the device session
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Consumes the manager, returning the device session
    pub fn into_session(self) -> S {
        self.session
    }

    /// Run one reconciliation pass for `params`
    #[instrument(
        skip(self, params),
        fields(interface = %params.interface, mode = %params.mode, state = %params.state)
    )]
    pub async fn reconcile(
        &mut self,
        params: &SwitchportParams,
    ) -> SwitchportResult<ReconciliationResult> {
        let desired = normalize(params)?;
        let interface = &desired.interface;
        let mode = desired.state.mode();

        let class = self.session.classify_interface(interface).await?;
        guard::check_interface_class(interface, class)?;

        let observed = self.session.get_switchport_state(interface).await?;
        let observed = guard::check_observed_state(interface, observed, mode, desired.intent)?;
        debug!(?observed, "Observed switchport state");

        let command_set = match desired.intent {
            Intent::Present => {
                let registry = self.session.get_vlan_registry().await?;
                guard::check_vlans_registered(interface, &desired.state, &registry)?;

                let delta = diff(&desired.state, &observed);
                if !delta.is_empty() {
                    debug!(fields = ?delta.field_names(), "Switchport differs from desired state");
                    let member = self.session.is_port_channel_member(interface).await?;
                    guard::check_port_channel(interface, &delta, member)?;
                }
                config_commands(interface, &observed, &delta)
            }
            Intent::Absent => remove_commands(interface, &observed, mode),
            Intent::Unconfigured => default_commands(interface, &observed),
        };
        let commands = command_set.into_lines();

        let existing = observed.state();
        let mut result = ReconciliationResult {
            interface: interface.clone(),
            intent: desired.intent,
            proposed: desired.state.clone(),
            new: existing.clone(),
            existing,
            commands,
            changed: false,
        };

        if result.commands.is_empty() {
            info!("Switchport already converged");
            return Ok(result);
        }

        result.changed = true;

        if params.dry_run {
            info!(commands = result.commands.len(), "Dry run, not applying commands");
            return Ok(result);
        }

        if let Err(e) = self.session.apply_commands(&result.commands).await {
            warn!(error = %e, "Failed to apply switchport commands");
            return Err(e);
        }

        result.new = self
            .session
            .get_switchport_state(interface)
            .await?
            .ok_or_else(|| {
                SwitchportError::device_query(
                    "get_switchport_state",
                    format!("no switchport state for '{}' after apply", interface),
                )
            })?
            .state();

        info!(commands = result.commands.len(), "Applied switchport configuration");
        Ok(result)
    }
}
