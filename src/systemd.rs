//! Service units for the two Node backends.
//!
//! Units are regenerated on every run, then both services are
//! enabled and restarted unconditionally so new code and config are
//! always picked up. Manual edits to the unit files do not survive
//! a run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cmd;
use crate::config::{API_PORT, ProvisionConfig, WIDGET_PORT, project_dest};
use crate::error::ProvisionResult;

const UNIT_DIR: &str = "/etc/systemd/system";

/// One supervised backend process.
#[derive(Debug, Clone)]
pub struct UnitSpec {
    pub unit: &'static str,
    pub description: &'static str,
    pub project: &'static str,
    pub port: u16,
}

/// The two long-running services behind the proxy.
#[must_use]
pub const fn units() -> [UnitSpec; 2] {
    [
        UnitSpec {
            unit: "app-api.service",
            description: "API backend",
            project: "api",
            port: API_PORT,
        },
        UnitSpec {
            unit: "app-widget.service",
            description: "Widget renderer",
            project: "widget",
            port: WIDGET_PORT,
        },
    ]
}

/// Render the unit file for one backend.
#[must_use]
pub fn render_unit(spec: &UnitSpec, user: &str) -> String {
    let description = spec.description;
    let port = spec.port;
    let working_dir = project_dest(spec.project);
    let working_dir = working_dir.display();

    format!(
        "[Unit]
Description={description}
After=network.target

[Service]
Type=simple
User={user}
WorkingDirectory={working_dir}
Environment=NODE_ENV=production
Environment=PORT={port}
ExecStart=/usr/bin/npm start
Restart=always
RestartSec=5

[Install]
WantedBy=multi-user.target
"
    )
}

/// Write both unit files, overwriting whatever is there.
pub fn install_units(config: &ProvisionConfig) -> ProvisionResult<()> {
    for spec in &units() {
        fs::write(unit_path(spec), render_unit(spec, &config.user))?;
    }
    Ok(())
}

/// Reload the unit cache, then enable and restart both services.
/// Restart happens even on first install; the brief outage window
/// is accepted.
pub fn enable_and_restart() -> ProvisionResult<()> {
    cmd::run_interactive("systemctl", &["daemon-reload"])?;
    for spec in &units() {
        cmd::run_interactive("systemctl", &["enable", spec.unit])?;
        cmd::run_interactive("systemctl", &["restart", spec.unit])?;
    }
    Ok(())
}

fn unit_path(spec: &UnitSpec) -> PathBuf {
    Path::new(UNIT_DIR).join(spec.unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_unit_contents() {
        let [api, _] = units();

        let unit = render_unit(&api, "deploy");

        assert!(unit.contains("Description=API backend"));
        assert!(unit.contains("User=deploy"));
        assert!(unit.contains("WorkingDirectory=/var/www/app/api"));
        assert!(unit.contains("Environment=NODE_ENV=production"));
        assert!(unit.contains("Environment=PORT=3000"));
        assert!(unit.contains("ExecStart=/usr/bin/npm start"));
        assert!(unit.contains("Restart=always"));
        assert!(unit.contains("RestartSec=5"));
        assert!(unit.contains("WantedBy=multi-user.target"));
    }

    #[test]
    fn widget_unit_contents() {
        let [_, widget] = units();

        let unit = render_unit(&widget, "deploy");

        assert!(unit.contains("WorkingDirectory=/var/www/app/widget"));
        assert!(unit.contains("Environment=PORT=3002"));
    }

    #[test]
    fn unit_names() {
        let [api, widget] = units();

        assert_eq!(api.unit, "app-api.service");
        assert_eq!(widget.unit, "app-widget.service");
    }
}
