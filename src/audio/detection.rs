use std::path::Path;

use lofty::FileType;

use super::container::ContainerKind;

/// Extensions of the containers we can open
const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "m4a", "mp4", "m4b", "aac", "alac", "flac", "ogg", "oga", "opus", "aif", "aiff",
    "aifc", "ape",
];

/// Check if a file is an audio file based on its extension
pub fn is_audio_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        AUDIO_EXTENSIONS.contains(&ext.as_str())
    } else {
        false
    }
}

/// Container kind for a file type detected by lofty
pub fn container_kind(file_type: FileType) -> ContainerKind {
    match file_type {
        FileType::Mpeg => ContainerKind::Mp3,
        FileType::Mp4 => ContainerKind::Mp4,
        FileType::Flac => ContainerKind::Flac,
        FileType::Vorbis => ContainerKind::OggVorbis,
        FileType::Opus => ContainerKind::OggOpus,
        FileType::Aiff => ContainerKind::Aiff,
        FileType::Ape => ContainerKind::Ape,
        _ => ContainerKind::Unknown,
    }
}
