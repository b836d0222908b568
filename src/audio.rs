//! Verse audio download and playback.
//!
//! Remote MP3 tracks are fetched once into the audio cache, keyed by a hash
//! of their URL, then decoded and played through rodio. Playback exposes a
//! small handle the UI polls for the progress cursor.

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink, Source};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Download the track into the cache if it is not already there and return
/// the local path.
pub async fn fetch_audio(cache_dir: &Path, url: &str) -> Result<PathBuf> {
    let path = cache_path(cache_dir, url);
    if path.exists() {
        debug!(url, path = %path.display(), "Audio cache hit");
        return Ok(path);
    }

    fs::create_dir_all(cache_dir)
        .with_context(|| format!("creating audio cache dir {}", cache_dir.display()))?;

    let response = reqwest::get(url).await.with_context(|| format!("fetching {url}"))?;
    if !response.status().is_success() {
        anyhow::bail!("{url} returned status {}", response.status());
    }
    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("reading body of {url}"))?;
    fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    info!(url, bytes = bytes.len(), path = %path.display(), "Cached audio track");
    Ok(path)
}

fn cache_path(base: &Path, url: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    base.join(format!("audio-{hash}.mp3"))
}

/// Handle over a playing track; dropping it stops the audio.
pub struct AudioPlayback {
    _stream: OutputStream,
    sink: Sink,
    duration: Option<Duration>,
}

impl AudioPlayback {
    pub fn pause(&self) {
        debug!("Pausing playback");
        self.sink.pause();
    }

    pub fn resume(&self) {
        debug!("Resuming playback");
        self.sink.play();
    }

    /// True once the decoded source has been fully consumed.
    pub fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    pub fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Forward a seek to the sink; unsupported seeks are logged and ignored.
    pub fn seek(&self, position: Duration) {
        if let Err(err) = self.sink.try_seek(position) {
            warn!(?position, "Seek failed: {err}");
        }
    }

    pub fn stop(self) {
        self.sink.stop();
    }
}

/// Decode the cached file and start playing it immediately.
pub fn play_file(path: &Path) -> Result<AudioPlayback> {
    let (_stream, handle) = OutputStream::try_default().context("opening audio output")?;
    let sink = Sink::try_new(&handle).context("creating sink")?;

    let reader = BufReader::new(
        File::open(path).with_context(|| format!("opening {}", path.display()))?,
    );
    let source = Decoder::new(reader).with_context(|| format!("decoding {}", path.display()))?;
    let duration = source.total_duration();
    sink.append(source);
    sink.play();

    info!(path = %path.display(), ?duration, "Started playback");
    Ok(AudioPlayback {
        _stream,
        sink,
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_path_is_stable_per_url() {
        let base = Path::new("/tmp/audio");
        let a = cache_path(base, "https://cdn.example/36/1.mp3");
        let b = cache_path(base, "https://cdn.example/36/1.mp3");
        let c = cache_path(base, "https://cdn.example/36/2.mp3");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with(base));
    }
}
