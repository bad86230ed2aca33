//! Best-effort rewrite of the frontend's API root.
//!
//! Development builds point at a hardcoded local API; the deployed
//! bundle must call the proxy's own `/api` path instead. The
//! substitution is a plain pattern match and a source that already
//! differs is left alone - never an error, since the frontend
//! project evolves independently of this tool.

use std::fs;
use std::path::Path;

use crate::error::ProvisionResult;

/// Networking entry point of the frontend project, relative to its
/// tree.
pub const API_ROOT_FILE: &str = "src/api.js";

const DEV_API_ROOT: &str = "http://localhost:3000/api";
const RELATIVE_API_ROOT: &str = "/api";

/// Replace the development API root with the relative one. Returns
/// `None` when the literal is absent.
#[must_use]
pub fn rewrite_api_root(source: &str) -> Option<String> {
    if source.contains(DEV_API_ROOT) {
        Some(source.replace(DEV_API_ROOT, RELATIVE_API_ROOT))
    } else {
        None
    }
}

/// Apply the rewrite to the frontend tree before it is built.
/// Returns whether a rewrite happened; a missing entry point or an
/// already-relative root is a silent skip.
pub fn patch_frontend(frontend_dir: &Path) -> ProvisionResult<bool> {
    let file = frontend_dir.join(API_ROOT_FILE);
    if !file.exists() {
        return Ok(false);
    }

    let source = fs::read_to_string(&file)?;
    match rewrite_api_root(&source) {
        Some(updated) => {
            fs::write(&file, updated)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_dev_root() {
        let source = "const API_ROOT = 'http://localhost:3000/api';\n";

        let updated = rewrite_api_root(source).expect("pattern should match");

        assert_eq!(updated, "const API_ROOT = '/api';\n");
        assert!(!updated.contains("localhost"));
    }

    #[test]
    fn already_relative_is_none() {
        let source = "const API_ROOT = '/api';\n";

        assert!(rewrite_api_root(source).is_none());
    }

    #[test]
    fn unrelated_source_is_none() {
        assert!(rewrite_api_root("export default {};\n").is_none());
    }
}
