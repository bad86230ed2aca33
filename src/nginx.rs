//! Nginx site for the deployed domain.
//!
//! One server block: the built frontend served from its output
//! directory with SPA fallback, and the two backends proxied under
//! their path prefixes. The site file is regenerated on every run;
//! the config is syntax-checked before the proxy is asked to
//! reload, so a bad render leaves the old config serving.

use std::fs;
use std::path::Path;

use crate::cmd;
use crate::config::{API_PORT, WIDGET_PORT, project_dest};
use crate::error::ProvisionResult;

const SITES_AVAILABLE: &str = "/etc/nginx/sites-available";
const SITES_ENABLED: &str = "/etc/nginx/sites-enabled";

/// Render the server block for the domain.
#[must_use]
pub fn render_site(domain: &str) -> String {
    let root = project_dest("frontend").join("dist");
    let root = root.display();
    let api = proxy_location("/api/", API_PORT);
    let widget = proxy_location("/widget/", WIDGET_PORT);

    format!(
        r"server {{
    listen 80;
    listen [::]:80;
    server_name {domain};

    root {root};
    index index.html;

    location / {{
        try_files $uri $uri/ /index.html;
    }}

{api}
{widget}}}
"
    )
}

/// A proxied path prefix with forwarded headers and upgrade
/// support.
fn proxy_location(prefix: &str, port: u16) -> String {
    format!(
        r"    location {prefix} {{
        proxy_pass http://127.0.0.1:{port};
        proxy_http_version 1.1;
        proxy_set_header Upgrade $http_upgrade;
        proxy_set_header Connection 'upgrade';
        proxy_set_header Host $host;
        proxy_set_header X-Real-IP $remote_addr;
        proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;
        proxy_set_header X-Forwarded-Proto $scheme;
        proxy_cache_bypass $http_upgrade;
    }}
"
    )
}

/// Write the site file and link it into the active set, replacing
/// any prior link of the same name.
pub fn install_site(domain: &str) -> ProvisionResult<()> {
    let available = Path::new(SITES_AVAILABLE).join(domain);
    fs::write(&available, render_site(domain))?;

    let enabled = Path::new(SITES_ENABLED).join(domain);
    if fs::symlink_metadata(&enabled).is_ok() {
        fs::remove_file(&enabled)?;
    }
    std::os::unix::fs::symlink(&available, &enabled)?;
    Ok(())
}

/// Syntax-check the full Nginx configuration. On failure the run
/// aborts and reload is never requested, so the proxy keeps serving
/// its previous config.
pub fn validate() -> ProvisionResult<()> {
    cmd::run("nginx", &["-t"])?;
    Ok(())
}

/// Ask the running proxy to pick up the validated config.
pub fn reload() -> ProvisionResult<()> {
    cmd::run_interactive("systemctl", &["reload", "nginx"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_site() {
        let site = render_site("example.com");

        assert!(site.contains("server_name example.com;"));
        assert!(site.contains("listen 80;"));
        assert!(site.contains("root /var/www/app/frontend/dist;"));
        assert!(site.contains("try_files $uri $uri/ /index.html;"));
        assert!(site.contains("location /api/ {"));
        assert!(site.contains("proxy_pass http://127.0.0.1:3000;"));
        assert!(site.contains("location /widget/ {"));
        assert!(site.contains("proxy_pass http://127.0.0.1:3002;"));
    }

    #[test]
    fn forwarded_headers_and_upgrade() {
        let site = render_site("example.com");

        assert!(site.contains("proxy_set_header Host $host;"));
        assert!(site.contains("proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;"));
        assert!(site.contains("proxy_set_header X-Forwarded-Proto $scheme;"));
        assert!(site.contains("proxy_set_header Upgrade $http_upgrade;"));
    }

    #[test]
    fn braces_balance() {
        let site = render_site("example.com");

        let open = site.matches('{').count();
        let close = site.matches('}').count();
        assert_eq!(open, close);
    }

    #[test]
    fn domain_used_verbatim() {
        // No DNS-syntax validation happens here; bad input fails
        // later at the proxy's own syntax check.
        let site = render_site("not a domain");

        assert!(site.contains("server_name not a domain;"));
    }
}
