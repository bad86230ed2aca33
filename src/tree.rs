//! Base directory preparation and project tree mirroring.
//!
//! The base path is fully derived from the source path: mirroring
//! deletes destination-only files, so anything placed under it by
//! hand does not survive a run. The source path is never read again
//! after the mirror step.

use std::fs;

use crate::cmd;
use crate::config::{BASE_DIR, PROJECTS, ProvisionConfig, project_dest};
use crate::error::{ProvisionError, ProvisionResult};

/// Verify all three project trees exist under the source path,
/// before any mutation happens.
pub fn check_projects(config: &ProvisionConfig) -> ProvisionResult<()> {
    for name in PROJECTS {
        let dir = config.project_src(name);
        if !dir.is_dir() {
            return Err(ProvisionError::ProjectMissing(dir.display().to_string()));
        }
    }
    Ok(())
}

/// Create the base path and hand it to the deploy user. Safe to
/// re-run.
pub fn prepare_base_dir(config: &ProvisionConfig) -> ProvisionResult<()> {
    fs::create_dir_all(BASE_DIR)?;
    chown_base(config)
}

/// Mirror each project tree into the base path so the destination
/// exactly matches the source, then restore ownership.
pub fn mirror_projects(config: &ProvisionConfig) -> ProvisionResult<()> {
    for name in PROJECTS {
        eprintln!("Syncing {name}...");
        let src = format!("{}/", config.project_src(name).display());
        let dest = format!("{}/", project_dest(name).display());
        cmd::run_interactive("rsync", &["-a", "--delete", &src, &dest])?;
    }
    chown_base(config)
}

fn chown_base(config: &ProvisionConfig) -> ProvisionResult<()> {
    let owner = format!("{user}:{user}", user = config.user);
    cmd::run_interactive("chown", &["-R", &owner, BASE_DIR])
}
