// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Directory scanning and sidecar path derivation

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::errors::CaptionError;
use super::mode::ProcessingMode;

/// Image extensions picked up by the scan (lowercase, without the dot)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Extension given to description sidecar files
pub const SIDECAR_EXTENSION: &str = "txt";

/// Result of narrowing the scan to images that already have a sidecar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredImages {
    pub images: Vec<OsString>,
    pub skipped: usize,
}

/// Check whether a file name carries one of the supported image extensions.
///
/// Matching is case-insensitive: `photo.JPG` and `photo.jpg` both qualify.
/// A dotfile such as `.png` counts as having the extension `png`.
pub fn is_image_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let ext = match path.extension() {
        Some(ext) => ext.to_string_lossy().to_ascii_lowercase(),
        None => match dotfile_extension(path) {
            Some(ext) => ext.to_ascii_lowercase(),
            None => return false,
        },
    };
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Sidecar path for an image: the final extension is replaced by `.txt`.
///
/// `path/to/complex.name.jpg` becomes `path/to/complex.name.txt`, and the
/// dotfile `path/to/.png` becomes `path/to/.txt`.
pub fn sidecar_path(image_path: impl AsRef<Path>) -> PathBuf {
    let image_path = image_path.as_ref();
    if image_path.extension().is_none() && dotfile_extension(image_path).is_some() {
        return image_path.with_file_name(format!(".{}", SIDECAR_EXTENSION));
    }
    image_path.with_extension(SIDECAR_EXTENSION)
}

/// `Path::extension` is `None` for `.png`; the whole name after the dot is
/// the extension here.
fn dotfile_extension(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let ext = name.strip_prefix('.')?;
    (!ext.is_empty()).then(|| ext.to_string())
}

/// List image files directly inside `dir`, sorted by name.
///
/// Subdirectories are skipped and the scan does not recurse.
/// Names are kept as `OsString`, so names that are not valid UTF-8 still
/// get captioned.
pub async fn scan_directory(dir: &Path) -> Result<Vec<OsString>, CaptionError> {
    let read_dir_error = |source| CaptionError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_dir_error)?;
    let mut images = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
        let file_type = entry.file_type().await.map_err(read_dir_error)?;
        if file_type.is_dir() {
            continue;
        }

        let name = entry.file_name();
        if is_image_file(&name) {
            images.push(name);
        }
    }

    images.sort();
    debug!("Found {} image file(s) in {}", images.len(), dir.display());
    Ok(images)
}

/// Drop images without an existing sidecar when the mode needs one.
///
/// Default mode passes every image through untouched.
pub async fn filter_by_mode(
    dir: &Path,
    images: Vec<OsString>,
    mode: ProcessingMode,
) -> FilteredImages {
    if !mode.requires_existing_sidecar() {
        return FilteredImages { images, skipped: 0 };
    }

    let mut kept = Vec::with_capacity(images.len());
    let mut skipped = 0;

    for name in images {
        let sidecar = sidecar_path(dir.join(&name));
        if tokio::fs::metadata(&sidecar).await.is_ok() {
            kept.push(name);
        } else {
            debug!("No sidecar for {}, skipping", Path::new(&name).display());
            skipped += 1;
        }
    }

    FilteredImages {
        images: kept,
        skipped,
    }
}
