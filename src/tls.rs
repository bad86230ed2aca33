//! Best-effort TLS certificate issuance via certbot.

use crate::cmd;
use crate::config::ProvisionConfig;
use crate::error::StepOutcome;

/// Obtain a certificate for the domain.
///
/// The deployment is already functional over plain HTTP when this
/// runs, so every failure mode degrades instead of aborting: a
/// missing contact email skips issuance with a warning, and install
/// or issuance failures are tolerated. Nothing certificate-related
/// is installed on the skip path.
#[must_use]
pub fn issue_certificate(config: &ProvisionConfig) -> StepOutcome {
    let Some(email) = &config.certificate_email else {
        return StepOutcome::Skipped(
            "certificate issuance requested without --email".to_string(),
        );
    };

    eprintln!("Requesting certificate for {}...", config.domain);

    if !cmd::command_exists("certbot") {
        if let Err(err) = cmd::run_interactive(
            "apt-get",
            &["install", "-y", "certbot", "python3-certbot-nginx"],
        ) {
            return StepOutcome::Tolerated(format!("certbot install failed: {err}"));
        }
    }

    let issue = cmd::run_interactive(
        "certbot",
        &[
            "--nginx",
            "-d",
            &config.domain,
            "-m",
            email,
            "--agree-tos",
            "--non-interactive",
        ],
    );

    match issue {
        Ok(()) => StepOutcome::Completed,
        Err(err) => StepOutcome::Tolerated(format!("certificate issuance failed: {err}")),
    }
}
