// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Directory scan and mode filtering

use std::ffi::OsString;
use std::fs;
use vlm_captioner::captioner::{filter_by_mode, scan_directory, CaptionError, ProcessingMode};

fn populate(dir: &std::path::Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"data").unwrap();
    }
}

#[tokio::test]
async fn test_scan_selects_images_only() {
    let dir = tempfile::tempdir().unwrap();
    populate(
        dir.path(),
        &[
            "image1.jpg",
            "image2.png",
            "photo.gif",
            "document.txt",
            "video.mp4",
            "image3.JPEG",
        ],
    );
    fs::create_dir(dir.path().join("subdir")).unwrap();

    let images = scan_directory(dir.path()).await.unwrap();
    assert_eq!(images.len(), 4);
    assert_eq!(
        images,
        vec!["image1.jpg", "image2.png", "image3.JPEG", "photo.gif"]
    );
}

#[tokio::test]
async fn test_scan_ignores_image_named_directories_and_nested_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("album.jpg")).unwrap();
    populate(&dir.path().join("album.jpg"), &["nested.png"]);
    populate(dir.path(), &["top.webp"]);

    let images = scan_directory(dir.path()).await.unwrap();
    assert_eq!(images, vec!["top.webp"]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_scan_keeps_non_utf8_names() {
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let latin1 = std::ffi::OsStr::from_bytes(b"caf\xe9.jpg");
    fs::write(dir.path().join(latin1), b"data").unwrap();
    populate(dir.path(), &["ok.jpg"]);

    let images = scan_directory(dir.path()).await.unwrap();
    assert_eq!(images.len(), 2);
    assert!(images.contains(&latin1.to_os_string()));
    assert!(images.contains(&OsString::from("ok.jpg")));
}

#[tokio::test]
async fn test_scan_selects_dotfile_images() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), &[".png", ".hidden", "shot.jpg"]);

    let images = scan_directory(dir.path()).await.unwrap();
    assert_eq!(images, vec![".png", "shot.jpg"]);
}

#[tokio::test]
async fn test_scan_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let images = scan_directory(dir.path()).await.unwrap();
    assert!(images.is_empty());
}

#[tokio::test]
async fn test_scan_missing_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = scan_directory(&dir.path().join("gone")).await.unwrap_err();
    assert!(matches!(err, CaptionError::DirectoryRead { .. }));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_filter_default_mode_keeps_everything() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), &["a.jpg", "b.png"]);

    let images = vec![OsString::from("a.jpg"), OsString::from("b.png")];
    let filtered = filter_by_mode(dir.path(), images.clone(), ProcessingMode::Default).await;
    assert_eq!(filtered.images, images);
    assert_eq!(filtered.skipped, 0);
}

#[tokio::test]
async fn test_filter_add_and_update_skip_images_without_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), &["a.jpg", "a.txt", "b.png", "c.gif", "c.txt"]);

    for mode in [ProcessingMode::Add, ProcessingMode::Update] {
        let images: Vec<OsString> = ["a.jpg", "b.png", "c.gif"].map(OsString::from).to_vec();
        let filtered = filter_by_mode(dir.path(), images, mode).await;
        assert_eq!(filtered.images, vec!["a.jpg", "c.gif"]);
        assert_eq!(filtered.skipped, 1);
    }
}
