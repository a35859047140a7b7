use std::path::Path;

use bytes::Bytes;

use super::StoredFrame;
use crate::domain::errors::{DomainError, Result};

/// Load `*.jpg`/`*.jpeg` files from a directory, sorted by file name.
///
/// Each file is served as a sensor-encoded frame.
pub fn load_replay_frames(dir: &Path) -> Result<Vec<StoredFrame>> {
    if !dir.is_dir() {
        return Err(DomainError::ReplayDirNotFound(dir.to_path_buf()));
    }

    let read_error = |_| DomainError::ReplayDirNotFound(dir.to_path_buf());

    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .map_err(read_error)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_jpeg_file(path))
        .collect();
    paths.sort();

    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        let (width, height) = match image::image_dimensions(&path) {
            Ok(dims) => dims,
            Err(e) => {
                tracing::warn!("Skipping unreadable frame {:?}: {}", path, e);
                continue;
            }
        };
        let data = std::fs::read(&path).map_err(read_error)?;
        frames.push(StoredFrame {
            data: Bytes::from(data),
            width,
            height,
        });
    }

    if frames.is_empty() {
        return Err(DomainError::ReplayDirEmpty(dir.to_path_buf()));
    }

    tracing::info!("Loaded {} replay frame(s) from {:?}", frames.len(), dir);
    Ok(frames)
}

fn is_jpeg_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
            .unwrap_or(false)
}
