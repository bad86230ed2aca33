//! Single-host deployment provisioner.
//!
//! `amarra` takes a domain, a deploy user, and a source directory
//! holding three Node project trees - an API server, a static
//! frontend, and a server-rendered widget app - and turns the local
//! host into a running, Nginx-fronted deployment of all three:
//! OS packages, the Node runtime, project builds, systemd units,
//! and the reverse-proxy site, in one command.
//!
//! The name comes from Portuguese for *mooring line*: tie your
//! application stack to a host and it stays put across re-runs.
//!
//! # Overview
//!
//! A run is a [`Provisioner`] executing a fixed sequence of steps
//! over one immutable [`ProvisionConfig`]:
//!
//! 1. **Preconditions** - root privileges and all three project
//!    trees present; nothing is mutated on failure
//! 2. **Packages** - base utilities, optional local MongoDB, the
//!    Node runtime
//! 3. **Trees** - mirror the projects under the base path,
//!    materialize the API's production config, rewrite the
//!    frontend's API root, build each project
//! 4. **Wiring** - regenerate systemd units and the Nginx site,
//!    restart the services, reload the proxy after its syntax
//!    check passes
//! 5. **Extras** - firewall openings and optional TLS issuance,
//!    both best effort
//!
//! Steps that are allowed to degrade report a
//! [`StepOutcome`](error::StepOutcome) instead of an error. Fatal
//! steps abort the run with prior side effects left in place;
//! re-running after a fix is safe, since directory preparation and
//! mirroring are idempotent and an existing API production config
//! is never overwritten.
//!
//! # Example
//!
//! ```sh
//! sudo provision --domain shop.example.com --user deploy \
//!     --src /srv/checkout --install-database
//! ```
//!
//! Programmatic use mirrors the CLI:
//!
//! ```rust,no_run
//! use amarra::{ProvisionConfig, Provisioner};
//!
//! fn main() -> amarra::error::ProvisionResult<()> {
//!     let config = ProvisionConfig::new("shop.example.com")
//!         .user("deploy")
//!         .src("/srv/checkout")
//!         .install_database();
//!
//!     Provisioner::new(config).run()
//! }
//! ```

// Allow noisy pedantic lints that don't add value for a
// provisioning tool crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cmd;
pub mod config;
pub mod envfile;
pub mod error;
pub mod nginx;
pub mod npm;
pub mod packages;
pub mod patch;
pub mod pipeline;
pub mod systemd;
pub mod tls;
pub mod tree;

pub use config::ProvisionConfig;
pub use pipeline::Cli;
pub use pipeline::Provisioner;
