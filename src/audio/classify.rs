//! Encoding variant classification
//!
//! Maps a container kind, its codec info and its bit depth to exactly one
//! [`EncodingVariant`]. Downstream consumers key behaviour (hi-res badges,
//! transcoding rules) off these exact variants, so both the variant codes
//! and the bit-depth thresholds are fixed.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::container::{CodecInfo, ContainerKind, Mp4Codec};

/// Canonical encoding of an audio file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum EncodingVariant {
    #[serde(rename = "MP3_CBR")]
    Mp3Cbr = 0,
    #[serde(rename = "MP3_VBR")]
    Mp3Vbr = 1,
    #[serde(rename = "AAC")]
    Aac = 2,
    #[serde(rename = "ALAC_16")]
    Alac16 = 3,
    #[serde(rename = "ALAC_24")]
    Alac24 = 4,
    #[serde(rename = "ALAC_32")]
    Alac32 = 5,
    #[serde(rename = "FLAC_16")]
    Flac16 = 6,
    #[serde(rename = "FLAC_24")]
    Flac24 = 7,
    #[serde(rename = "FLAC_32")]
    Flac32 = 8,
    #[serde(rename = "AIFF_16")]
    Aiff16 = 9,
    #[serde(rename = "AIFF_24")]
    Aiff24 = 10,
    #[serde(rename = "AIFF_32")]
    Aiff32 = 11,
    #[serde(rename = "MonkeysAudio_16")]
    MonkeysAudio16 = 12,
    #[serde(rename = "MonkeysAudio_24")]
    MonkeysAudio24 = 13,
    #[serde(rename = "MonkeysAudio_32")]
    MonkeysAudio32 = 14,
    #[serde(rename = "Vorbis")]
    Vorbis = 15,
    #[serde(rename = "Opus")]
    Opus = 16,
    #[serde(rename = "Unknown")]
    Unknown = 17,
}

impl EncodingVariant {
    /// Every variant, in code order
    pub const ALL: [EncodingVariant; 18] = [
        EncodingVariant::Mp3Cbr,
        EncodingVariant::Mp3Vbr,
        EncodingVariant::Aac,
        EncodingVariant::Alac16,
        EncodingVariant::Alac24,
        EncodingVariant::Alac32,
        EncodingVariant::Flac16,
        EncodingVariant::Flac24,
        EncodingVariant::Flac32,
        EncodingVariant::Aiff16,
        EncodingVariant::Aiff24,
        EncodingVariant::Aiff32,
        EncodingVariant::MonkeysAudio16,
        EncodingVariant::MonkeysAudio24,
        EncodingVariant::MonkeysAudio32,
        EncodingVariant::Vorbis,
        EncodingVariant::Opus,
        EncodingVariant::Unknown,
    ];

    /// Stable numeric code
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Canonical upper-case name, e.g. `FLAC_24`
    pub fn name(self) -> &'static str {
        match self {
            EncodingVariant::Mp3Cbr => "MP3_CBR",
            EncodingVariant::Mp3Vbr => "MP3_VBR",
            EncodingVariant::Aac => "AAC",
            EncodingVariant::Alac16 => "ALAC_16",
            EncodingVariant::Alac24 => "ALAC_24",
            EncodingVariant::Alac32 => "ALAC_32",
            EncodingVariant::Flac16 => "FLAC_16",
            EncodingVariant::Flac24 => "FLAC_24",
            EncodingVariant::Flac32 => "FLAC_32",
            EncodingVariant::Aiff16 => "AIFF_16",
            EncodingVariant::Aiff24 => "AIFF_24",
            EncodingVariant::Aiff32 => "AIFF_32",
            EncodingVariant::MonkeysAudio16 => "MonkeysAudio_16",
            EncodingVariant::MonkeysAudio24 => "MonkeysAudio_24",
            EncodingVariant::MonkeysAudio32 => "MonkeysAudio_32",
            EncodingVariant::Vorbis => "Vorbis",
            EncodingVariant::Opus => "Opus",
            EncodingVariant::Unknown => "Unknown",
        }
    }

    /// True for the 24 and 32 bit lossless variants
    pub fn is_hi_res(self) -> bool {
        matches!(
            self,
            EncodingVariant::Alac24
                | EncodingVariant::Alac32
                | EncodingVariant::Flac24
                | EncodingVariant::Flac32
                | EncodingVariant::Aiff24
                | EncodingVariant::Aiff32
                | EncodingVariant::MonkeysAudio24
                | EncodingVariant::MonkeysAudio32
        )
    }
}

impl fmt::Display for EncodingVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bit-depth bucket shared by every depth-sensitive family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DepthClass {
    Sixteen,
    TwentyFour,
    ThirtyTwo,
}

fn depth_class(bit_depth: u32) -> DepthClass {
    match bit_depth {
        0..=16 => DepthClass::Sixteen,
        17..=24 => DepthClass::TwentyFour,
        _ => DepthClass::ThirtyTwo,
    }
}

fn by_depth(
    bit_depth: u32,
    variants: (EncodingVariant, EncodingVariant, EncodingVariant),
) -> EncodingVariant {
    match depth_class(bit_depth) {
        DepthClass::Sixteen => variants.0,
        DepthClass::TwentyFour => variants.1,
        DepthClass::ThirtyTwo => variants.2,
    }
}

/// Classify a file's encoding from its container, codec and bit depth
///
/// Total: anything unrecognised is [`EncodingVariant::Unknown`].
///
/// MP3 is VBR only when a VBR header was found. Streams encoded with a
/// variable bitrate but no header classify as CBR; consumers rely on this.
pub fn classify(container: ContainerKind, codec: CodecInfo, bit_depth: u32) -> EncodingVariant {
    use EncodingVariant as V;

    match container {
        ContainerKind::Mp3 => match codec {
            CodecInfo::Mpeg { vbr_header: true } => V::Mp3Vbr,
            _ => V::Mp3Cbr,
        },
        ContainerKind::Mp4 => match codec {
            CodecInfo::Mp4(Mp4Codec::Aac) => V::Aac,
            CodecInfo::Mp4(Mp4Codec::Alac) => by_depth(bit_depth, (V::Alac16, V::Alac24, V::Alac32)),
            _ => V::Unknown,
        },
        ContainerKind::Flac | ContainerKind::OggFlac => {
            by_depth(bit_depth, (V::Flac16, V::Flac24, V::Flac32))
        }
        ContainerKind::Aiff => by_depth(bit_depth, (V::Aiff16, V::Aiff24, V::Aiff32)),
        ContainerKind::Ape => by_depth(
            bit_depth,
            (V::MonkeysAudio16, V::MonkeysAudio24, V::MonkeysAudio32),
        ),
        ContainerKind::OggVorbis => V::Vorbis,
        ContainerKind::OggOpus => V::Opus,
        ContainerKind::Unknown => V::Unknown,
    }
}
