//! Open audio files with lofty and turn them into [`TrackFile`]s
//!
//! Each file is opened once and parsed once. The concrete lofty file for
//! the detected type supplies what the generic view hides (the MP4 codec,
//! native FLAC picture blocks, Ogg comment block pictures) and is then
//! converted into a `TaggedFile` for tag fields, properties and the role
//! keyed picture map. MPEG streams get their VBR header sniffed from the
//! same handle.

use std::fs::File;
use std::io::{BufReader, Seek};
use std::path::Path;

use anyhow::{Context, Result, bail};
use lofty::flac::FlacFile;
use lofty::mp4::{Mp4Codec as LoftyMp4Codec, Mp4File};
use lofty::ogg::{OggPictureStorage, OpusFile, VorbisFile};
use lofty::{
    Accessor, AudioFile, FileType, ItemKey, ItemValue, ParseOptions, Picture as LoftyPicture,
    PictureInformation, PictureType, Probe, Tag, TaggedFile, TaggedFileExt,
};

use super::artwork::{Picture, PictureRole};
use super::container::{AudioDetails, CodecInfo, Mp4Codec};
use super::detection::container_kind;
use super::mpeg;
use super::properties::PropertyMap;
use super::track_file::{TagFields, TrackFile};

/// Property names with a fixed lofty item key
pub(crate) const MAPPED_PROPERTIES: &[&str] = &[
    "ALBUMARTIST",
    "DISCNUMBER",
    "DISCTOTAL",
    "TRACKTOTAL",
    "GENRE",
    "COMPOSER",
    "COMMENT",
    "CONDUCTOR",
    "LYRICIST",
    "LABEL",
    "MOOD",
    "REMIXER",
    "ENCODING",
    "COPYRIGHT",
    "LYRICS",
    "MUSICBRAINZ_TRACKID",
    "MUSICBRAINZ_RELEASETRACKID",
    "MUSICBRAINZ_ALBUMID",
    "MUSICBRAINZ_ARTISTID",
    "MUSICBRAINZ_ALBUMARTISTID",
    "MUSICBRAINZ_RELEASEGROUPID",
    "ALBUMARTISTSORT",
    "ARTISTSORT",
    "ALBUMSORT",
    "TITLESORT",
];

/// Property name for a lofty item key
pub(crate) fn property_name(key: &ItemKey) -> Option<String> {
    let name = match key {
        ItemKey::AlbumArtist => "ALBUMARTIST",
        ItemKey::DiscNumber => "DISCNUMBER",
        ItemKey::DiscTotal => "DISCTOTAL",
        ItemKey::TrackTotal => "TRACKTOTAL",
        ItemKey::Genre => "GENRE",
        ItemKey::Composer => "COMPOSER",
        ItemKey::Comment => "COMMENT",
        ItemKey::Conductor => "CONDUCTOR",
        ItemKey::Lyricist => "LYRICIST",
        ItemKey::Label => "LABEL",
        ItemKey::Mood => "MOOD",
        ItemKey::Remixer => "REMIXER",
        ItemKey::EncoderSoftware => "ENCODING",
        ItemKey::CopyrightMessage => "COPYRIGHT",
        ItemKey::Lyrics => "LYRICS",
        ItemKey::MusicBrainzRecordingId => "MUSICBRAINZ_TRACKID",
        ItemKey::MusicBrainzTrackId => "MUSICBRAINZ_RELEASETRACKID",
        ItemKey::MusicBrainzReleaseId => "MUSICBRAINZ_ALBUMID",
        ItemKey::MusicBrainzArtistId => "MUSICBRAINZ_ARTISTID",
        ItemKey::MusicBrainzReleaseArtistId => "MUSICBRAINZ_ALBUMARTISTID",
        ItemKey::MusicBrainzReleaseGroupId => "MUSICBRAINZ_RELEASEGROUPID",
        ItemKey::AlbumArtistSortOrder => "ALBUMARTISTSORT",
        ItemKey::TrackArtistSortOrder => "ARTISTSORT",
        ItemKey::AlbumTitleSortOrder => "ALBUMSORT",
        ItemKey::TrackTitleSortOrder => "TITLESORT",
        ItemKey::Unknown(raw) => return Some(raw.to_ascii_uppercase()),
        _ => return None,
    };
    Some(name.to_string())
}

/// lofty item key for a property name; unmapped names become `Unknown`
pub(crate) fn item_key(name: &str) -> ItemKey {
    match name {
        "ALBUMARTIST" => ItemKey::AlbumArtist,
        "DISCNUMBER" => ItemKey::DiscNumber,
        "DISCTOTAL" => ItemKey::DiscTotal,
        "TRACKTOTAL" => ItemKey::TrackTotal,
        "GENRE" => ItemKey::Genre,
        "COMPOSER" => ItemKey::Composer,
        "COMMENT" => ItemKey::Comment,
        "CONDUCTOR" => ItemKey::Conductor,
        "LYRICIST" => ItemKey::Lyricist,
        "LABEL" => ItemKey::Label,
        "MOOD" => ItemKey::Mood,
        "REMIXER" => ItemKey::Remixer,
        "ENCODING" => ItemKey::EncoderSoftware,
        "COPYRIGHT" => ItemKey::CopyrightMessage,
        "LYRICS" => ItemKey::Lyrics,
        "MUSICBRAINZ_TRACKID" => ItemKey::MusicBrainzRecordingId,
        "MUSICBRAINZ_RELEASETRACKID" => ItemKey::MusicBrainzTrackId,
        "MUSICBRAINZ_ALBUMID" => ItemKey::MusicBrainzReleaseId,
        "MUSICBRAINZ_ARTISTID" => ItemKey::MusicBrainzArtistId,
        "MUSICBRAINZ_ALBUMARTISTID" => ItemKey::MusicBrainzReleaseArtistId,
        "MUSICBRAINZ_RELEASEGROUPID" => ItemKey::MusicBrainzReleaseGroupId,
        "ALBUMARTISTSORT" => ItemKey::AlbumArtistSortOrder,
        "ARTISTSORT" => ItemKey::TrackArtistSortOrder,
        "ALBUMSORT" => ItemKey::AlbumTitleSortOrder,
        "TITLESORT" => ItemKey::TrackTitleSortOrder,
        other => ItemKey::Unknown(other.to_string()),
    }
}

/// Read an audio file from disk
pub fn read_track_file(path: &Path) -> Result<TrackFile> {
    let (file_type, mut reader) = detect_file_type(path)?;
    let container = container_kind(file_type);
    let options = ParseOptions::new();

    let mut codec = CodecInfo::None;
    let mut native_pictures = None;
    let mut comment_pictures = None;

    let tagged_file: TaggedFile = match file_type {
        FileType::Flac => {
            let flac = FlacFile::read_from(&mut reader, options)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            native_pictures = Some(convert_pictures(flac.pictures()));
            flac.into()
        }
        FileType::Vorbis => {
            let vorbis = VorbisFile::read_from(&mut reader, options)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            comment_pictures = Some(convert_pictures(vorbis.vorbis_comments().pictures()));
            vorbis.into()
        }
        FileType::Opus => {
            let opus = OpusFile::read_from(&mut reader, options)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            comment_pictures = Some(convert_pictures(opus.vorbis_comments().pictures()));
            opus.into()
        }
        FileType::Mp4 => {
            let mp4 = Mp4File::read_from(&mut reader, options)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            codec = CodecInfo::Mp4(mp4_codec(mp4.properties().codec()));
            mp4.into()
        }
        FileType::Mpeg => {
            let vbr_header = mpeg::has_vbr_header(&mut reader)
                .with_context(|| format!("Failed to scan MPEG frames: {}", path.display()))?;
            codec = CodecInfo::Mpeg { vbr_header };
            Probe::with_file_type(reader, file_type)
                .options(options)
                .read()
                .with_context(|| format!("Failed to read file: {}", path.display()))?
        }
        _ => Probe::with_file_type(reader, file_type)
            .options(options)
            .read()
            .with_context(|| format!("Failed to read file: {}", path.display()))?,
    };

    let properties = tagged_file.properties();
    let audio = AudioDetails {
        container,
        codec,
        bit_depth: properties.bit_depth().map(u32::from).unwrap_or(0),
        // Audio stream only, so tags and artwork do not inflate it
        bitrate: properties.audio_bitrate().unwrap_or(0),
        sample_rate: properties.sample_rate().unwrap_or(0),
        duration: properties.duration(),
    };

    let mut file = TrackFile::new(path, audio);
    if let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
        file = file
            .with_tag(tag_fields(tag))
            .with_properties(property_map(tag))
            .with_picture_map(tag.pictures().iter().map(convert_picture).collect());
    }
    if let Some(pictures) = native_pictures {
        file = file.with_native_pictures(pictures);
    }
    if let Some(pictures) = comment_pictures {
        file = file.with_comment_pictures(pictures);
    }

    log::debug!(
        "Opened {} as {:?} ({})",
        path.display(),
        container,
        file.audio().encoding()
    );
    Ok(file)
}

/// Open `path` and work out its type from content, then extension
fn detect_file_type(path: &Path) -> Result<(FileType, BufReader<File>)> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let probe = Probe::new(BufReader::new(file))
        .guess_file_type()
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let file_type = probe.file_type().or_else(|| FileType::from_path(path));
    let mut reader = probe.into_inner();
    reader
        .rewind()
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    match file_type {
        Some(file_type) => Ok((file_type, reader)),
        None => bail!("Unsupported file type: {}", path.display()),
    }
}

fn tag_fields(tag: &Tag) -> TagFields {
    TagFields {
        title: tag.title().map(|s| s.into_owned()).unwrap_or_default(),
        artist: tag.artist().map(|s| s.into_owned()).unwrap_or_default(),
        album: tag.album().map(|s| s.into_owned()).unwrap_or_default(),
        year: tag.year().unwrap_or(0),
        track: tag.track().unwrap_or(0),
    }
}

fn property_map(tag: &Tag) -> PropertyMap {
    let mut map = PropertyMap::new();
    for item in tag.items() {
        let Some(name) = property_name(item.key()) else {
            continue;
        };
        match item.value() {
            ItemValue::Text(text) | ItemValue::Locator(text) => map.push(&name, text.clone()),
            _ => {}
        }
    }
    map
}

fn convert_picture(picture: &LoftyPicture) -> Picture {
    let role = match picture.pic_type() {
        PictureType::CoverFront => PictureRole::FrontCover,
        PictureType::Other => PictureRole::Other,
        _ => PictureRole::Secondary,
    };
    Picture::new(role, picture.data())
}

fn convert_pictures(pictures: &[(LoftyPicture, PictureInformation)]) -> Vec<Picture> {
    pictures
        .iter()
        .map(|(picture, _)| convert_picture(picture))
        .collect()
}

fn mp4_codec(codec: &LoftyMp4Codec) -> Mp4Codec {
    match codec {
        LoftyMp4Codec::AAC => Mp4Codec::Aac,
        LoftyMp4Codec::ALAC => Mp4Codec::Alac,
        _ => Mp4Codec::Unknown,
    }
}
