use std::path::{Path, PathBuf};

/// Fixed base install path. The deployed tree is fully derived from
/// the source path on every run; nothing under it is authoritative.
pub const BASE_DIR: &str = "/var/www/app";

/// Port the API backend listens on. Must stay consistent between
/// the service unit and the proxy upstream.
pub const API_PORT: u16 = 3000;

/// Port the widget backend listens on.
pub const WIDGET_PORT: u16 = 3002;

/// The three project trees expected under the source directory, in
/// build order.
pub const PROJECTS: [&str; 3] = ["api", "frontend", "widget"];

/// Configuration for one provisioning run.
///
/// Built once from CLI input (or the builder below) and passed by
/// reference into every step; nothing mutates it afterwards.
///
/// # Example
///
/// ```
/// use amarra::ProvisionConfig;
///
/// let config = ProvisionConfig::new("shop.example.com")
///     .user("deploy")
///     .src("/srv/checkout")
///     .install_database();
///
/// assert_eq!(config.domain, "shop.example.com");
/// assert!(config.install_database);
/// assert!(!config.issue_certificate);
/// ```
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    pub domain: String,
    pub user: String,
    pub src: PathBuf,
    pub install_database: bool,
    pub issue_certificate: bool,
    pub certificate_email: Option<String>,
}

impl ProvisionConfig {
    #[must_use]
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            user: "root".to_string(),
            src: PathBuf::from("."),
            install_database: false,
            issue_certificate: false,
            certificate_email: None,
        }
    }

    #[must_use]
    pub fn user(mut self, user: &str) -> Self {
        self.user = user.to_string();
        self
    }

    #[must_use]
    pub fn src(mut self, src: impl Into<PathBuf>) -> Self {
        self.src = src.into();
        self
    }

    #[must_use]
    pub const fn install_database(mut self) -> Self {
        self.install_database = true;
        self
    }

    #[must_use]
    pub const fn issue_certificate(mut self) -> Self {
        self.issue_certificate = true;
        self
    }

    #[must_use]
    pub fn certificate_email(mut self, email: &str) -> Self {
        self.certificate_email = Some(email.to_string());
        self
    }

    /// Source tree of one project.
    #[must_use]
    pub fn project_src(&self, name: &str) -> PathBuf {
        self.src.join(name)
    }
}

/// Installed tree of one project under the base path.
#[must_use]
pub fn project_dest(name: &str) -> PathBuf {
    Path::new(BASE_DIR).join(name)
}

/// Externally reachable URLs printed in the completion report:
/// frontend root, API prefix, widget prefix.
#[must_use]
pub fn endpoints(domain: &str) -> [String; 3] {
    [
        format!("http://{domain}/"),
        format!("http://{domain}/api/"),
        format!("http://{domain}/widget/"),
    ]
}
