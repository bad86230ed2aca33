//! The unit files and the proxy site are rendered independently;
//! these tests pin them to the same backend ports.

use amarra::{nginx, systemd};

#[test]
fn unit_and_site_agree_on_ports() {
    let site = nginx::render_site("example.com");

    for spec in &systemd::units() {
        let unit = systemd::render_unit(spec, "deploy");
        let port = spec.port;

        assert!(unit.contains(&format!("Environment=PORT={port}")));
        assert!(site.contains(&format!("proxy_pass http://127.0.0.1:{port};")));
    }
}

#[test]
fn every_proxied_prefix_has_a_backing_service() {
    let site = nginx::render_site("example.com");
    let [api, widget] = systemd::units();

    assert_eq!(api.project, "api");
    assert!(site.contains("location /api/ {"));

    assert_eq!(widget.project, "widget");
    assert!(site.contains("location /widget/ {"));
}
