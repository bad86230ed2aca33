//! Production config file for the API project.
//!
//! The file is created at most once: an existing file is never
//! touched, so operator-edited secrets survive re-runs.

use std::fs;
use std::path::Path;

use crate::error::ProvisionResult;

/// Config file the API process reads in production, relative to
/// its tree.
pub const PRODUCTION_ENV: &str = ".env.production";

/// Local-development config promoted when present.
pub const LOCAL_ENV: &str = ".env";

const MODE_LOCAL: &str = "NODE_ENV=development";
const MODE_PRODUCTION: &str = "NODE_ENV=production";

/// Where the materialized production config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvSource {
    /// Already present; left untouched.
    Existing,
    /// Promoted from the local-development config.
    PromotedLocal,
    /// Synthesized from the default template.
    Default,
}

/// Default production config when there is no local config to
/// promote. The connection string and signing secret are left blank
/// for the operator to fill in.
#[must_use]
pub fn render_default_env(port: u16) -> String {
    format!(
        "NODE_ENV=production\n\
         MONGODB_URI=\n\
         JWT_SECRET=\n\
         JWT_EXPIRES_IN=7d\n\
         PORT={port}\n"
    )
}

/// Rewrite the mode marker of a local-development config to
/// production. Lines without the marker pass through unchanged, so
/// a config that never carried one comes back as-is.
#[must_use]
pub fn promote_local_env(content: &str) -> String {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| {
            if line.trim() == MODE_LOCAL {
                MODE_PRODUCTION
            } else {
                line
            }
        })
        .collect();

    let mut joined = lines.join("\n");
    if content.ends_with('\n') {
        joined.push('\n');
    }
    joined
}

/// Ensure the API project has a production config, without ever
/// overwriting one that already exists.
pub fn materialize_api_env(api_dir: &Path, port: u16) -> ProvisionResult<EnvSource> {
    let target = api_dir.join(PRODUCTION_ENV);
    if target.exists() {
        return Ok(EnvSource::Existing);
    }

    let local = api_dir.join(LOCAL_ENV);
    if local.exists() {
        let content = fs::read_to_string(&local)?;
        fs::write(&target, promote_local_env(&content))?;
        return Ok(EnvSource::PromotedLocal);
    }

    fs::write(&target, render_default_env(port))?;
    Ok(EnvSource::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_env_carries_mode_and_port() {
        let env = render_default_env(3000);

        assert!(env.contains("NODE_ENV=production"));
        assert!(env.contains("PORT=3000"));
        assert!(env.contains("MONGODB_URI=\n"));
        assert!(env.contains("JWT_SECRET=\n"));
        assert!(env.contains("JWT_EXPIRES_IN=7d"));
    }

    #[test]
    fn promote_rewrites_mode_marker() {
        let local = "NODE_ENV=development\nPORT=3000\nJWT_SECRET=dev\n";

        let promoted = promote_local_env(local);

        assert_eq!(promoted, "NODE_ENV=production\nPORT=3000\nJWT_SECRET=dev\n");
    }

    #[test]
    fn promote_without_marker_is_identity() {
        let local = "NODE_ENV=production\nPORT=3000\n";

        assert_eq!(promote_local_env(local), local);
    }

    #[test]
    fn promote_keeps_unrelated_mentions() {
        // Only a whole-line marker is a mode marker.
        let local = "COMMENT=NODE_ENV=development is the default\n";

        assert_eq!(promote_local_env(local), local);
    }
}
