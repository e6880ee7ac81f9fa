//! switchportmgrd - Switchport Reconciliation Tool
//!
//! Reconciles one interface of a device snapshot against the requested
//! switchport configuration and prints the result as JSON.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sonic_switchportmgrd::{
    DeviceSnapshot, Intent, ReconciliationResult, SimulatedDevice, SwitchportError, SwitchportMgr,
    SwitchportMode, SwitchportParams,
};

/// Exit status for device failures and unreadable input files
const EXIT_DEVICE_ERROR: u8 = 1;

/// Exit status for every other reconciliation failure
const EXIT_REQUEST_ERROR: u8 = 2;

/// Layer-2 switchport reconciler
#[derive(Parser, Debug)]
#[command(name = "switchportmgrd")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Device snapshot (JSON) to reconcile against
    #[arg(short = 'd', long)]
    device: PathBuf,

    /// Request file (JSON) instead of the individual flags below
    #[arg(
        short = 'r',
        long,
        conflicts_with_all = ["interface", "mode", "access_vlan", "native_vlan", "trunk_vlans"]
    )]
    request: Option<PathBuf>,

    /// Interface to configure
    #[arg(short = 'i', long, required_unless_present = "request")]
    interface: Option<String>,

    /// Switchport mode (access, trunk)
    #[arg(short = 'm', long, required_unless_present = "request")]
    mode: Option<SwitchportMode>,

    /// Access VLAN
    #[arg(long)]
    access_vlan: Option<String>,

    /// Trunk native VLAN
    #[arg(long)]
    native_vlan: Option<String>,

    /// Trunk allowed VLANs (e.g. "2-100,200")
    #[arg(long)]
    trunk_vlans: Option<String>,

    /// Desired state (present, absent, unconfigured)
    #[arg(short = 's', long, default_value = "present")]
    state: Intent,

    /// Compute commands without applying them
    #[arg(short = 'c', long)]
    check: bool,

    /// Write the updated snapshot back to the device file
    #[arg(long)]
    save: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Builds the request; `--check` forces dry-run on top of a request file
    fn params(&self) -> anyhow::Result<SwitchportParams> {
        let params = match &self.request {
            Some(path) => load_request(path)?,
            None => {
                let (Some(interface), Some(mode)) = (&self.interface, self.mode) else {
                    anyhow::bail!("--interface and --mode are required without --request");
                };
                SwitchportParams {
                    interface: interface.clone(),
                    mode,
                    access_vlan: self.access_vlan.clone(),
                    native_vlan: self.native_vlan.clone(),
                    trunk_vlans: self.trunk_vlans.clone(),
                    state: self.state,
                    dry_run: false,
                }
            }
        };
        let dry_run = params.dry_run || self.check;
        Ok(params.with_dry_run(dry_run))
    }
}

fn load_request(path: &Path) -> anyhow::Result<SwitchportParams> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse request file {}", path.display()))
}

fn load_snapshot(path: &Path) -> anyhow::Result<DeviceSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read device snapshot {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse device snapshot {}", path.display()))
}

fn save_snapshot(snapshot: &DeviceSnapshot, path: &Path) -> anyhow::Result<()> {
    let text =
        serde_json::to_string_pretty(snapshot).context("Failed to serialize device snapshot")?;
    std::fs::write(path, text + "\n")
        .with_context(|| format!("Failed to write device snapshot {}", path.display()))
}

/// Exit status for a failed reconciliation
fn failure_status(err: &SwitchportError) -> u8 {
    if err.is_device_error() {
        EXIT_DEVICE_ERROR
    } else {
        EXIT_REQUEST_ERROR
    }
}

/// The snapshot is written back only after commands were really applied
fn should_save(save: bool, params: &SwitchportParams, result: &ReconciliationResult) -> bool {
    save && result.changed && !params.dry_run
}

/// Initializes tracing/logging subsystem
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: &Args) -> anyhow::Result<u8> {
    let params = args.params()?;
    let snapshot = load_snapshot(&args.device)?;
    let mut mgr = SwitchportMgr::new(SimulatedDevice::new(snapshot));

    let result = match mgr.reconcile(&params).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Reconciliation failed");
            return Ok(failure_status(&e));
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);

    if should_save(args.save, &params, &result) {
        let snapshot = mgr.into_session().into_snapshot();
        save_snapshot(&snapshot, &args.device)?;
        info!(path = %args.device.display(), "Saved device snapshot");
    }

    Ok(0)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    info!("--- Starting switchportmgrd (Rust) ---");

    match run(&args).await {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(EXIT_DEVICE_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sonic_types::VlanId;

    const SNAPSHOT: &str = r#"{
        "vlans": "1-100",
        "interfaces": {
            "Eth1/1": {"class": "layer2", "switchport": {"mode": "trunk"}}
        }
    }"#;

    fn parse(command_line: &str) -> Result<Args, clap::Error> {
        Args::try_parse_from(
            std::iter::once("switchportmgrd").chain(command_line.split_whitespace()),
        )
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_params_from_flags() {
        let args = parse(
            "-d dev.json -i Eth1/1 -m trunk --native-vlan 10 --trunk-vlans 2-100 --check",
        )
        .unwrap();

        assert_eq!(
            args.params().unwrap(),
            SwitchportParams::new("Eth1/1", SwitchportMode::Trunk)
                .with_native_vlan("10")
                .with_trunk_vlans("2-100")
                .with_dry_run(true)
        );
    }

    #[test]
    fn test_state_flag() {
        let args = parse("-d dev.json -i eth1/1 -m access -s absent").unwrap();
        let params = args.params().unwrap();
        assert_eq!(params.state, Intent::Absent);
        assert!(!params.dry_run);
    }

    #[test]
    fn test_check_overrides_request_file() {
        let dir = tempfile::tempdir().unwrap();
        let request = write_file(
            &dir,
            "request.json",
            r#"{"interface": "eth1/2", "mode": "access", "access_vlan": 20}"#,
        );

        let args = parse(&format!("-d dev.json -r {}", request.display())).unwrap();
        assert!(!args.params().unwrap().dry_run);

        let args = parse(&format!("-d dev.json -r {} --check", request.display())).unwrap();
        let params = args.params().unwrap();
        assert!(params.dry_run);
        assert_eq!(params.access_vlan.as_deref(), Some("20"));

        let request = write_file(
            &dir,
            "dry_run.json",
            r#"{"interface": "eth1/2", "mode": "access", "access_vlan": 20, "dry_run": true}"#,
        );
        let args = parse(&format!("-d dev.json -r {}", request.display())).unwrap();
        assert!(args.params().unwrap().dry_run);
    }

    #[test]
    fn test_flag_validation() {
        assert!(parse("-d dev.json").is_err());
        assert!(parse("-d dev.json -i eth1/1").is_err());
        assert!(parse("-d dev.json -r req.json -i eth1/1").is_err());
        assert!(parse("-d dev.json -i eth1/1 -m routed").is_err());
        assert!(parse("-i eth1/1 -m access --access-vlan 20").is_err());
    }

    #[test]
    fn test_missing_request_file() {
        let args = parse("-d dev.json -r /nonexistent/request.json").unwrap();
        let err = args.params().unwrap_err();
        assert!(err.to_string().contains("Failed to read request file"));
    }

    #[test]
    fn test_failure_status() {
        let device_errors = [
            SwitchportError::device_query("classify_interface", "timeout"),
            SwitchportError::device_apply("eth1/1", "rejected"),
        ];
        for err in &device_errors {
            assert_eq!(failure_status(err), EXIT_DEVICE_ERROR);
        }

        let request_errors = [
            SwitchportError::configuration("access_vlan", "required"),
            SwitchportError::precondition("eth1/1", "layer3"),
            SwitchportError::port_channel_conflict("eth1/1"),
            SwitchportError::unknown_vlan("eth1/1", "native_vlan", VlanId::new(99).unwrap()),
            SwitchportError::ModeMismatch {
                interface: "eth1/1".to_string(),
                requested: SwitchportMode::Access,
                observed: SwitchportMode::Trunk,
            },
        ];
        for err in &request_errors {
            assert_eq!(failure_status(err), EXIT_REQUEST_ERROR);
        }
    }

    #[tokio::test]
    async fn test_should_save() {
        let snapshot: DeviceSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let mut mgr = SwitchportMgr::new(SimulatedDevice::new(snapshot));
        let params = SwitchportParams::new("eth1/1", SwitchportMode::Trunk).with_native_vlan("10");
        let dry_run = params.clone().with_dry_run(true);

        let planned = mgr.reconcile(&dry_run).await.unwrap();
        assert!(planned.changed);
        assert!(!should_save(true, &dry_run, &planned));

        let applied = mgr.reconcile(&params).await.unwrap();
        assert!(should_save(true, &params, &applied));
        assert!(!should_save(false, &params, &applied));

        let converged = mgr.reconcile(&params).await.unwrap();
        assert!(!should_save(true, &params, &converged));
    }

    #[tokio::test]
    async fn test_run_saves_only_applied_changes() {
        let dir = tempfile::tempdir().unwrap();
        let device = write_file(&dir, "device.json", SNAPSHOT);
        let original = load_snapshot(&device).unwrap();
        let request = format!("-d {} -i eth1/1 -m trunk --native-vlan 10 --save", device.display());

        let check = parse(&format!("{} --check", request)).unwrap();
        assert_eq!(run(&check).await.unwrap(), 0);
        assert_eq!(load_snapshot(&device).unwrap(), original);

        let apply = parse(&request).unwrap();
        assert_eq!(run(&apply).await.unwrap(), 0);

        let saved = load_snapshot(&device).unwrap();
        let port = saved.interfaces["Eth1/1"].switchport.clone().unwrap();
        assert_eq!(port.mode, SwitchportMode::Trunk);
        assert_eq!(port.native_vlan, VlanId::new(10).unwrap());
    }

    #[tokio::test]
    async fn test_run_exit_statuses() {
        let dir = tempfile::tempdir().unwrap();
        let device = write_file(&dir, "device.json", SNAPSHOT);

        let mismatch =
            parse(&format!("-d {} -i eth1/1 -m access -s absent", device.display())).unwrap();
        assert_eq!(run(&mismatch).await.unwrap(), EXIT_REQUEST_ERROR);

        let unknown_vlan = parse(&format!(
            "-d {} -i eth1/1 -m trunk --native-vlan 200",
            device.display()
        ))
        .unwrap();
        assert_eq!(run(&unknown_vlan).await.unwrap(), EXIT_REQUEST_ERROR);

        let missing = dir.path().join("missing.json");
        let no_device = parse(&format!("-d {} -i eth1/1 -m trunk", missing.display())).unwrap();
        let err = run(&no_device).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read device snapshot"));
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device.json");

        let snapshot: DeviceSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        save_snapshot(&snapshot, &path).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), snapshot);
    }
}
