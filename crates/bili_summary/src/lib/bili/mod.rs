pub mod downloader;

use std::{
    future::Future,
    path::{Path, PathBuf},
    time::SystemTime,
};

use walkdir::WalkDir;

pub use downloader::YtDlpFetcher;

/// Audio container formats recognized as downloader output.
const AUDIO_EXTENSIONS: [&str; 4] = ["m4a", "mp3", "aac", "wav"];

/// Fetches the audio track of a video into `dest_dir`.
pub trait AudioFetcher {
    fn fetch_audio(
        &self,
        url: &str,
        dest_dir: &Path,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Locates the downloaded audio artifact in `dir`.
///
/// External downloaders are not consistent about output naming across
/// sources, so this picks the most recently modified file with a recognized
/// audio extension and renames it to the canonical `temp.<ext>` at the top
/// of `dir`. Returns `Ok(None)` when no candidate exists.
pub fn resolve_audio_artifact(dir: &Path) -> std::io::Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let recognized = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| AUDIO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !recognized {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().map(|(t, _)| modified > *t).unwrap_or(true) {
            newest = Some((modified, path.to_path_buf()));
        }
    }

    let Some((_, latest)) = newest else {
        return Ok(None);
    };

    // extension presence was checked during the scan
    let ext = latest
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("m4a")
        .to_ascii_lowercase();
    let canonical = dir.join(format!("temp.{ext}"));
    if latest != canonical {
        std::fs::rename(&latest, &canonical)?;
        tracing::debug!(
            from = %latest.display(),
            to = %canonical.display(),
            "Normalized audio artifact name"
        );
    }
    Ok(Some(canonical))
}
