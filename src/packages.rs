//! OS package steps: hard prerequisites, the optional local
//! database, the Node runtime, and firewall openings.

use crate::cmd;
use crate::error::{ProvisionResult, StepOutcome};

/// Utilities every later step depends on. Failure here is fatal.
const BASE_PACKAGES: [&str; 6] = ["git", "rsync", "nginx", "ufw", "build-essential", "curl"];

/// NodeSource setup script for the major version all three projects
/// build against.
const NODE_SETUP_URL: &str = "https://deb.nodesource.com/setup_20.x";

/// Install the base utilities needed by the later steps.
pub fn install_base_packages() -> ProvisionResult<()> {
    eprintln!("Installing base packages...");
    cmd::run_interactive("apt-get", &["update"])?;

    let mut args = vec!["install", "-y"];
    args.extend(BASE_PACKAGES);
    cmd::run_interactive("apt-get", &args)
}

/// Install and start a local MongoDB server.
///
/// The API may be configured against an external database instead,
/// so install or service-start failures only degrade the run.
#[must_use]
pub fn install_database() -> StepOutcome {
    eprintln!("Installing local MongoDB...");

    if let Err(err) = cmd::run_interactive("apt-get", &["install", "-y", "mongodb"]) {
        return StepOutcome::Tolerated(format!("mongodb install failed: {err}"));
    }
    if let Err(err) = cmd::run_interactive("systemctl", &["enable", "--now", "mongodb"]) {
        return StepOutcome::Tolerated(format!("mongodb service failed to start: {err}"));
    }

    StepOutcome::Completed
}

/// Add the NodeSource package source and install the runtime. All
/// three projects need it to build, so failure is fatal.
pub fn install_node_runtime() -> ProvisionResult<()> {
    eprintln!("Installing Node runtime...");
    cmd::run_pipeline(&format!("curl -fsSL {NODE_SETUP_URL} | bash -"))?;
    cmd::run_interactive("apt-get", &["install", "-y", "nodejs"])
}

/// Open the firewall for SSH and the proxy. Hosts without an active
/// firewall keep serving regardless, so failures only degrade.
#[must_use]
pub fn open_firewall() -> StepOutcome {
    for rule in ["OpenSSH", "Nginx Full"] {
        if let Err(err) = cmd::run_interactive("ufw", &["allow", rule]) {
            return StepOutcome::Tolerated(format!("firewall rule '{rule}' not applied: {err}"));
        }
    }
    StepOutcome::Completed
}
