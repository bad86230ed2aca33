//! Per-project dependency install and build.

use std::path::Path;

use crate::cmd;
use crate::error::ProvisionResult;

/// Install exact locked dependencies and run the project's standard
/// build step. A failure aborts the whole run; there is no partial
/// recovery beyond re-running after a fix.
pub fn install_and_build(dir: &Path) -> ProvisionResult<()> {
    cmd::run_interactive_in("npm", &["ci"], dir)?;
    cmd::run_interactive_in("npm", &["run", "build"], dir)
}
