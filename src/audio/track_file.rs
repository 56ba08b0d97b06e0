//! An opened audio file
//!
//! [`TrackFile`] holds everything read from disk in one place: the
//! discriminated container, audio properties, core tag fields, the generic
//! property map and the picture stores. Queries are computed from this data
//! on each call; nothing is cached beside it.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::artwork::{Picture, PictureMap, PictureSource};
use super::container::AudioDetails;
use super::properties::PropertyMap;
use super::{metadata_writer, reader};

/// Core tag fields. Empty strings and zero mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFields {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: u32,
    pub track: u32,
}

#[derive(Debug, Clone)]
pub struct TrackFile {
    path: PathBuf,
    audio: AudioDetails,
    tag: TagFields,
    properties: PropertyMap,
    native_pictures: Option<Vec<Picture>>,
    comment_pictures: Option<Vec<Picture>>,
    picture_map: PictureMap,
}

impl TrackFile {
    /// Open and parse the file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        reader::read_track_file(path.as_ref())
    }

    /// An in-memory file with no tags and no pictures
    pub fn new(path: impl Into<PathBuf>, audio: AudioDetails) -> Self {
        Self {
            path: path.into(),
            audio,
            tag: TagFields::default(),
            properties: PropertyMap::new(),
            native_pictures: None,
            comment_pictures: None,
            picture_map: PictureMap::new(),
        }
    }

    pub fn with_tag(mut self, tag: TagFields) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }

    /// Make the native picture list available
    pub fn with_native_pictures(mut self, pictures: Vec<Picture>) -> Self {
        self.native_pictures = Some(pictures);
        self
    }

    /// Make the comment-block picture list available
    pub fn with_comment_pictures(mut self, pictures: Vec<Picture>) -> Self {
        self.comment_pictures = Some(pictures);
        self
    }

    pub fn with_picture_map(mut self, map: PictureMap) -> Self {
        self.picture_map = map;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn audio(&self) -> &AudioDetails {
        &self.audio
    }

    pub fn tag(&self) -> &TagFields {
        &self.tag
    }

    pub fn tag_mut(&mut self) -> &mut TagFields {
        &mut self.tag
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.properties
    }

    /// Picture stores this file has, in lookup precedence order
    pub fn picture_sources(&self) -> Vec<PictureSource<'_>> {
        let mut sources = Vec::with_capacity(3);
        if let Some(pictures) = &self.native_pictures {
            sources.push(PictureSource::Native(pictures));
        }
        if let Some(pictures) = &self.comment_pictures {
            sources.push(PictureSource::CommentBlock(pictures));
        }
        sources.push(PictureSource::Map(&self.picture_map));
        sources
    }

    /// Write tag fields and properties back to the file on disk
    pub fn save(&self) -> Result<()> {
        metadata_writer::write_track_file(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::artwork::PictureRole;
    use crate::audio::container::ContainerKind;

    #[test]
    fn test_only_the_map_by_default() {
        let file = TrackFile::new("a.mp3", AudioDetails::new(ContainerKind::Mp3));
        let sources = file.picture_sources();
        assert_eq!(sources.len(), 1);
        assert!(matches!(sources[0], PictureSource::Map(_)));
    }

    #[test]
    fn test_sources_in_precedence_order() {
        let file = TrackFile::new("a.ogg", AudioDetails::new(ContainerKind::OggVorbis))
            .with_comment_pictures(vec![Picture::new(PictureRole::Other, vec![1])])
            .with_native_pictures(Vec::new());
        let sources = file.picture_sources();
        assert_eq!(sources.len(), 3);
        assert!(matches!(sources[0], PictureSource::Native(_)));
        assert!(matches!(sources[1], PictureSource::CommentBlock(_)));
        assert!(matches!(sources[2], PictureSource::Map(_)));
    }

    #[test]
    fn test_open_missing_file_fails() {
        assert!(TrackFile::open("/nonexistent/file.flac").is_err());
    }
}
