use std::path::PathBuf;

use clap::Parser;

use crate::config::{API_PORT, PROJECTS, ProvisionConfig, endpoints, project_dest};
use crate::envfile::{self, EnvSource};
use crate::error::{ProvisionError, ProvisionResult, StepOutcome};
use crate::{nginx, npm, packages, patch, systemd, tls, tree};

/// Command-line surface of the `provision` binary.
#[derive(Debug, Parser)]
#[command(name = "provision")]
#[command(about = "Deploy the api, frontend and widget projects behind Nginx on this host")]
pub struct Cli {
    /// Virtual host name served by the proxy
    #[arg(long)]
    pub domain: String,

    /// OS account that owns the deployed files and runs the services
    #[arg(long)]
    pub user: Option<String>,

    /// Directory containing the three project trees
    #[arg(long)]
    pub src: Option<PathBuf>,

    /// Install and enable a local MongoDB server (best effort)
    #[arg(long)]
    pub install_database: bool,

    /// Obtain a TLS certificate once the deployment is up (best effort)
    #[arg(long)]
    pub run_certificate_issuance: bool,

    /// Contact email for certificate issuance
    #[arg(long)]
    pub email: Option<String>,
}

impl Cli {
    /// Resolve defaults into the immutable run configuration: the
    /// deploy user falls back to the sudo-originating account, then
    /// the invoking account; the source path falls back to the
    /// current directory.
    pub fn into_config(self) -> ProvisionResult<ProvisionConfig> {
        let user = match self.user {
            Some(user) => user,
            None => invoking_user(),
        };
        let src = match self.src {
            Some(src) => src,
            None => std::env::current_dir()?,
        };

        Ok(ProvisionConfig {
            domain: self.domain,
            user,
            src,
            install_database: self.install_database,
            issue_certificate: self.run_certificate_issuance,
            certificate_email: self.email,
        })
    }
}

fn invoking_user() -> String {
    std::env::var("SUDO_USER")
        .or_else(|_| std::env::var("USER"))
        .unwrap_or_else(|_| "root".to_string())
}

/// Whether the process runs with administrative privileges.
#[must_use]
pub fn is_root() -> bool {
    // SAFETY: geteuid cannot fail and touches no memory.
    unsafe { libc::geteuid() == 0 }
}

/// Orchestrates one provisioning run over an immutable config.
///
/// Steps run strictly in order; the order is load-bearing (the
/// proxy must not be reloaded before the static assets it points at
/// are built). Fatal errors abort with prior side effects left in
/// place; best-effort steps degrade and the run continues.
pub struct Provisioner {
    config: ProvisionConfig,
}

impl Provisioner {
    #[must_use]
    pub const fn new(config: ProvisionConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> ProvisionResult<()> {
        // Preconditions, before any mutation.
        if !is_root() {
            return Err(ProvisionError::NotRoot);
        }
        tree::check_projects(&self.config)?;

        packages::install_base_packages()?;

        if self.config.install_database {
            report("local database", &packages::install_database());
        }

        packages::install_node_runtime()?;

        tree::prepare_base_dir(&self.config)?;
        tree::mirror_projects(&self.config)?;

        // Secrets and the API-root rewrite go in before the builds
        // so the frontend bundle picks up the relative root.
        match envfile::materialize_api_env(&project_dest("api"), API_PORT)? {
            EnvSource::Existing => {
                eprintln!("API production config present, left untouched");
            }
            EnvSource::PromotedLocal => {
                eprintln!("API production config promoted from local config");
            }
            EnvSource::Default => {
                eprintln!("API production config created from defaults");
            }
        }

        if patch::patch_frontend(&project_dest("frontend"))? {
            eprintln!("Frontend API root rewritten to the relative path");
        }

        for name in PROJECTS {
            eprintln!("Building {name}...");
            npm::install_and_build(&project_dest(name))?;
        }

        eprintln!("Installing service units...");
        systemd::install_units(&self.config)?;
        systemd::enable_and_restart()?;

        report("firewall", &packages::open_firewall());

        eprintln!("Installing Nginx site...");
        nginx::install_site(&self.config.domain)?;
        nginx::validate()?;
        nginx::reload()?;

        if self.config.issue_certificate {
            report("certificate issuance", &tls::issue_certificate(&self.config));
        }

        self.print_summary();
        Ok(())
    }

    fn print_summary(&self) {
        let [root, api, widget] = endpoints(&self.config.domain);
        eprintln!();
        eprintln!("========================================");
        eprintln!("Deployment complete!");
        eprintln!("========================================");
        eprintln!();
        eprintln!("Frontend: {root}");
        eprintln!("API:      {api}");
        eprintln!("Widget:   {widget}");
        eprintln!();
    }
}

/// Log a best-effort step's outcome without failing the run.
fn report(step: &str, outcome: &StepOutcome) {
    match outcome {
        StepOutcome::Completed => {}
        StepOutcome::Skipped(reason) => eprintln!("warning: {step} skipped: {reason}"),
        StepOutcome::Tolerated(reason) => eprintln!("warning: {step}: {reason}"),
    }
}
