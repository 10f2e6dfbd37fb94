use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use raylib::prelude::*;
use exif::{In, Reader, Tag, Value};
use thiserror::Error;
use tracing::{debug, warn};
use crate::constants::*;

#[derive(Debug, Error)]
pub enum AlbumError {
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {message}")]
    Decode { path: PathBuf, message: String },
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

// --- List image files of a directory, sorted by file name ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>, AlbumError> {
    let read_dir_error = |source| AlbumError::ReadDir { path: dir_path.to_path_buf(), source };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

fn exif_orientation(file_bytes: &[u8], image_path: &Path) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            // Not fatal: the image is shown unrotated
            debug!(path = %image_path.display(), error = %e, "no EXIF data");
            1
        }
    }
}

// --- Decode an image file, applying its EXIF rotation ---
pub fn load_image_with_exif_rotation(image_path: &Path) -> Result<Image, AlbumError> {
    let file_bytes = fs::read(image_path)
        .map_err(|source| AlbumError::ReadFile { path: image_path.to_path_buf(), source })?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();

    // EXIF is only read reliably from JPEG containers
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(&file_bytes, image_path)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| AlbumError::Decode { path: image_path.to_path_buf(), message: e.to_string() })?;

    if image.width() <= 0 || image.height() <= 0 {
        return Err(AlbumError::Decode {
            path: image_path.to_path_buf(),
            message: "image has no pixels".to_string(),
        });
    }

    apply_orientation(&mut image, orientation);
    Ok(image)
}

// 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
// Mirrored orientations are left as they are.
fn apply_orientation(image: &mut Image, orientation: u16) {
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
}

/// Decode every image of an album directory, in file name order.
///
/// Files that fail to decode are skipped. A missing or unreadable directory
/// yields no images at all.
pub fn load_album_images(dir_path: &Path) -> Vec<(PathBuf, Image)> {
    let paths = match load_sorted_image_paths(dir_path) {
        Ok(paths) => paths,
        Err(e) => {
            warn!(error = %e, "album directory unavailable");
            return Vec::new();
        }
    };

    paths
        .into_iter()
        .filter_map(|path| match load_image_with_exif_rotation(&path) {
            Ok(image) => Some((path, image)),
            Err(e) => {
                warn!(error = %e, "skipping image");
                None
            }
        })
        .collect()
}
