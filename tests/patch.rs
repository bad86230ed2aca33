use std::fs;
use std::path::Path;

use amarra::patch::{self, API_ROOT_FILE};

fn write_entry_point(frontend_dir: &Path, content: &str) {
    let file = frontend_dir.join(API_ROOT_FILE);
    fs::create_dir_all(file.parent().expect("parent")).expect("mkdir failed");
    fs::write(file, content).expect("write failed");
}

#[test]
fn entry_point_is_rewritten() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_entry_point(dir.path(), "const API_ROOT = 'http://localhost:3000/api';\n");

    let patched = patch::patch_frontend(dir.path()).expect("patch failed");

    assert!(patched);
    let updated = fs::read_to_string(dir.path().join(API_ROOT_FILE)).expect("read failed");
    assert!(!updated.contains("http://localhost:3000/api"));
    assert!(updated.contains("'/api'"));
}

#[test]
fn missing_entry_point_is_a_silent_skip() {
    let dir = tempfile::tempdir().expect("tempdir");

    let patched = patch::patch_frontend(dir.path()).expect("patch failed");

    assert!(!patched);
}

#[test]
fn already_relative_root_is_left_alone() {
    let dir = tempfile::tempdir().expect("tempdir");
    let content = "const API_ROOT = '/api';\n";
    write_entry_point(dir.path(), content);

    let patched = patch::patch_frontend(dir.path()).expect("patch failed");

    assert!(!patched);
    let unchanged = fs::read_to_string(dir.path().join(API_ROOT_FILE)).expect("read failed");
    assert_eq!(unchanged, content);
}
