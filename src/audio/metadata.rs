//! Normalized metadata surface over an opened file
//!
//! [`MetadataView`] wraps a borrowed or owned [`TrackFile`] and exposes the
//! same accessors whatever the container. Setters are only available when
//! the wrapped file is mutable.

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use anyhow::Result;

use super::artwork;
use super::classify::EncodingVariant;
use super::properties::{ALBUM_ARTIST, DISC_NUMBER, MUSICBRAINZ_TRACK_ID};
use super::track_file::TrackFile;

/// Separator between album artists in the joined form
pub const ALBUM_ARTIST_SEPARATOR: &str = ";";

/// Disc number reported when the tag has none or it cannot be parsed
pub const DEFAULT_DISC_NUMBER: u32 = 1;

#[derive(Debug)]
pub struct MetadataView<F> {
    file: F,
}

impl<F> MetadataView<F>
where
    F: Deref<Target = TrackFile>,
{
    pub fn new(file: F) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &TrackFile {
        &self.file
    }

    pub fn into_inner(self) -> F {
        self.file
    }

    pub fn encoding(&self) -> EncodingVariant {
        self.file.audio().encoding()
    }

    pub fn title(&self) -> String {
        self.file.tag().title.clone()
    }

    pub fn artist(&self) -> String {
        self.file.tag().artist.clone()
    }

    pub fn album(&self) -> String {
        self.file.tag().album.clone()
    }

    /// Album artists joined with `;`, empty when none are set
    pub fn album_artists(&self) -> String {
        self.file
            .properties()
            .get(ALBUM_ARTIST)
            .join(ALBUM_ARTIST_SEPARATOR)
    }

    /// First MusicBrainz recording id, empty when absent
    pub fn musicbrainz_track_id(&self) -> String {
        self.file
            .properties()
            .first(MUSICBRAINZ_TRACK_ID)
            .unwrap_or_default()
            .to_string()
    }

    pub fn year(&self) -> u32 {
        self.file.tag().year
    }

    pub fn track_number(&self) -> u32 {
        self.file.tag().track
    }

    /// Disc number, never failing: absent or malformed values read as 1
    pub fn disc_number(&self) -> u32 {
        match self.file.properties().first(DISC_NUMBER) {
            Some(value) => parse_disc_number(value).unwrap_or_else(|| {
                log::debug!(
                    "Unparseable disc number {:?} in {}",
                    value,
                    self.file.path().display()
                );
                DEFAULT_DISC_NUMBER
            }),
            None => DEFAULT_DISC_NUMBER,
        }
    }

    /// Bitrate in kbps
    pub fn bitrate(&self) -> u32 {
        self.file.audio().bitrate
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.file.audio().sample_rate
    }

    pub fn duration(&self) -> Duration {
        self.file.audio().duration
    }

    /// Bytes of the best available cover image
    pub fn front_cover(&self) -> Option<&[u8]> {
        artwork::resolve_front_cover(self.file.picture_sources())
    }

    pub fn has_artwork(&self) -> bool {
        self.front_cover().is_some()
    }
}

impl<F> MetadataView<F>
where
    F: DerefMut<Target = TrackFile>,
{
    pub fn set_title(&mut self, title: &str) {
        self.file.tag_mut().title = title.to_string();
    }

    pub fn set_artist(&mut self, artist: &str) {
        self.file.tag_mut().artist = artist.to_string();
    }

    pub fn set_album(&mut self, album: &str) {
        self.file.tag_mut().album = album.to_string();
    }

    /// Replace all album artists with the `;`-separated names in `artists`
    pub fn set_album_artists(&mut self, artists: &str) {
        let values = if artists.is_empty() {
            Vec::new()
        } else {
            artists
                .split(ALBUM_ARTIST_SEPARATOR)
                .map(str::to_string)
                .collect()
        };
        self.file.properties_mut().replace(ALBUM_ARTIST, values);
    }

    pub fn set_musicbrainz_track_id(&mut self, id: &str) {
        let values = if id.is_empty() {
            Vec::new()
        } else {
            vec![id.to_string()]
        };
        self.file.properties_mut().replace(MUSICBRAINZ_TRACK_ID, values);
    }

    pub fn set_year(&mut self, year: u32) {
        self.file.tag_mut().year = year;
    }

    pub fn set_track_number(&mut self, track: u32) {
        self.file.tag_mut().track = track;
    }

    /// Persist edits through the file's tag writer
    pub fn save(&self) -> Result<()> {
        self.file.save()
    }
}

/// Parse the leading digits of a disc number ("3", " 3", "+3", "3/12")
///
/// Returns `None` when there are no leading digits or the value overflows.
fn parse_disc_number(value: &str) -> Option<u32> {
    let trimmed = value.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

impl TrackFile {
    /// Read-only view of this file
    pub fn view(&self) -> MetadataView<&TrackFile> {
        MetadataView::new(self)
    }

    /// Read-write view of this file
    pub fn view_mut(&mut self) -> MetadataView<&mut TrackFile> {
        MetadataView::new(self)
    }
}
