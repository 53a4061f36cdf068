//! Unit tests for the on-disk content store.

use std::fs;

use embed_mcp::store::{ContentStore, DirStore, StoreEntry};
use embed_mcp::AppError;

fn content_tree() -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::create_dir_all(root.join("prompts/nested")).expect("mkdir prompts");
    fs::create_dir_all(root.join("resources")).expect("mkdir resources");
    fs::write(root.join("prompts/zeta.md"), "zeta").expect("write");
    fs::write(root.join("prompts/alpha.md"), "alpha").expect("write");
    fs::write(root.join("prompts/nested/deep.md"), "deep").expect("write");
    fs::write(root.join("resources/notes.txt"), "notes").expect("write");
    temp
}

#[test]
fn open_rejects_missing_directory() {
    let temp = tempfile::tempdir().expect("tempdir");
    let result = DirStore::open(temp.path().join("absent"));
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn open_rejects_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("file.txt");
    fs::write(&file, "x").expect("write");
    assert!(matches!(DirStore::open(&file), Err(AppError::Config(_))));
}

#[test]
fn walk_is_sorted_preorder() {
    let temp = content_tree();
    let store = DirStore::open(temp.path()).expect("open");

    let entries = store.walk("prompts").expect("walk");

    assert_eq!(
        entries,
        vec![
            StoreEntry::dir("prompts"),
            StoreEntry::file("prompts/alpha.md"),
            StoreEntry::dir("prompts/nested"),
            StoreEntry::file("prompts/nested/deep.md"),
            StoreEntry::file("prompts/zeta.md"),
        ]
    );
}

#[test]
fn walk_missing_root_is_traversal_error() {
    let temp = content_tree();
    let store = DirStore::open(temp.path()).expect("open");
    assert!(matches!(store.walk("templates"), Err(AppError::Traversal(_))));
}

#[test]
fn walk_cannot_leave_store_root() {
    let temp = content_tree();
    let store = DirStore::open(temp.path().join("prompts")).expect("open");
    assert!(matches!(store.walk("../resources"), Err(AppError::Traversal(_))));
}

#[test]
fn read_file_returns_content() {
    let temp = content_tree();
    let store = DirStore::open(temp.path()).expect("open");
    let bytes = store.read_file("resources/notes.txt").expect("read");
    assert_eq!(bytes.as_ref(), b"notes");
}

#[test]
fn read_missing_file_is_io_error() {
    let temp = content_tree();
    let store = DirStore::open(temp.path()).expect("open");
    assert!(matches!(
        store.read_file("resources/absent.txt"),
        Err(AppError::Io(_))
    ));
}

#[test]
fn read_outside_root_is_path_violation() {
    let temp = content_tree();
    fs::write(temp.path().join("secret.txt"), "secret").expect("write");
    let store = DirStore::open(temp.path().join("resources")).expect("open");
    assert!(matches!(
        store.read_file("../secret.txt"),
        Err(AppError::PathViolation(_))
    ));
}

#[cfg(unix)]
#[test]
fn read_through_escaping_symlink_is_rejected() {
    use std::os::unix::fs::symlink;

    let outside = tempfile::tempdir().expect("outside");
    fs::write(outside.path().join("secret.txt"), "secret").expect("write");

    let temp = content_tree();
    symlink(
        outside.path().join("secret.txt"),
        temp.path().join("resources/link.txt"),
    )
    .expect("symlink");

    let store = DirStore::open(temp.path()).expect("open");
    assert!(matches!(
        store.read_file("resources/link.txt"),
        Err(AppError::PathViolation(_))
    ));
}

#[cfg(unix)]
#[test]
fn walk_keeps_symlinked_file_inside_root() {
    use std::os::unix::fs::symlink;

    let temp = content_tree();
    symlink(
        temp.path().join("resources/notes.txt"),
        temp.path().join("resources/alias.txt"),
    )
    .expect("symlink");

    let store = DirStore::open(temp.path()).expect("open");
    let entries = store.walk("resources").expect("walk");

    assert!(entries.contains(&StoreEntry::file("resources/alias.txt")));
    let bytes = store.read_file("resources/alias.txt").expect("read");
    assert_eq!(bytes.as_ref(), b"notes");
}

#[cfg(unix)]
#[test]
fn walk_skips_symlinked_directory_and_escaping_link() {
    use std::os::unix::fs::symlink;

    let outside = tempfile::tempdir().expect("outside");
    fs::write(outside.path().join("secret.txt"), "secret").expect("write");

    let temp = content_tree();
    symlink(temp.path().join("prompts"), temp.path().join("resources/linked")).expect("dir link");
    symlink(
        outside.path().join("secret.txt"),
        temp.path().join("resources/secret.txt"),
    )
    .expect("file link");

    let store = DirStore::open(temp.path()).expect("open");
    let entries = store.walk("resources").expect("walk");

    assert_eq!(
        entries,
        vec![
            StoreEntry::dir("resources"),
            StoreEntry::file("resources/notes.txt"),
        ]
    );
}
