//! Serializable snapshot of a track's metadata

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chrono::Local;
use serde::Serialize;

use crate::audio::artwork::cover_dimensions;
use crate::audio::{EncodingVariant, MetadataView, TrackFile};

/// Source label used when the caller gives none
pub const DEFAULT_SOURCE: &str = "None";

/// Everything a library needs to know about one file, read in one go
#[derive(Debug, Clone, Serialize)]
pub struct TrackSummary {
    pub file_path: PathBuf,
    pub encoding: EncodingVariant,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artists: String,
    pub year: u32,
    pub track_number: u32,
    pub disc_number: u32,
    pub musicbrainz_track_id: Option<String>,
    pub has_front_cover: bool,
    pub front_cover_width: u32,
    pub front_cover_height: u32,
    /// Cover bytes, kept only when the image could be sized
    #[serde(skip)]
    pub album_art: Vec<u8>,
    pub bitrate: u32,
    pub sample_rate: u32,
    pub duration_ms: u64,
    pub source: String,
    /// Date the summary was taken, `%Y-%m-%d`
    pub updated: String,
}

impl TrackSummary {
    /// Open `path` and summarize it
    pub fn from_path(path: &Path, source: Option<&str>) -> Result<Self> {
        let file = TrackFile::open(path)?;
        Self::from_view(&file.view(), source)
    }

    /// Summarize an opened file; files of unknown encoding are rejected
    pub fn from_view(view: &MetadataView<&TrackFile>, source: Option<&str>) -> Result<Self> {
        let path = view.file().path();
        let encoding = view.encoding();
        if encoding == EncodingVariant::Unknown {
            bail!("File {} is unsupported", path.display());
        }

        let has_front_cover = view.has_artwork();
        let (width, height, album_art) = match view.front_cover() {
            Some(bytes) => match cover_dimensions(bytes) {
                Some((width, height)) => (width, height, bytes.to_vec()),
                None => (0, 0, Vec::new()),
            },
            None => (0, 0, Vec::new()),
        };

        let musicbrainz_track_id = Some(view.musicbrainz_track_id()).filter(|id| !id.is_empty());

        Ok(Self {
            file_path: path.to_path_buf(),
            encoding,
            title: view.title().trim().to_string(),
            artist: view.artist().trim().to_string(),
            album: view.album().trim().to_string(),
            album_artists: view.album_artists().trim().to_string(),
            year: view.year(),
            track_number: view.track_number(),
            disc_number: view.disc_number(),
            musicbrainz_track_id,
            has_front_cover,
            front_cover_width: width,
            front_cover_height: height,
            album_art,
            bitrate: view.bitrate(),
            sample_rate: view.sample_rate(),
            duration_ms: view.duration().as_millis() as u64,
            source: source.unwrap_or(DEFAULT_SOURCE).to_string(),
            updated: Local::now().format("%Y-%m-%d").to_string(),
        })
    }
}
