//! Container and codec description of an opened audio file
//!
//! The container kind is decided once, when the file is opened, and every
//! later decision (classification, artwork lookup) matches on it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::classify::{EncodingVariant, classify};

/// The audio container a file was parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerKind {
    Mp3,
    Mp4,
    Flac,
    OggFlac,
    OggVorbis,
    OggOpus,
    Aiff,
    Ape,
    Unknown,
}

/// Codec reported by an MP4 container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mp4Codec {
    Aac,
    Alac,
    Unknown,
}

/// Codec-specific audio properties used for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodecInfo {
    #[default]
    None,
    /// MPEG audio; `vbr_header` is true when a Xing/Info/VBRI header was found
    Mpeg { vbr_header: bool },
    Mp4(Mp4Codec),
}

/// Audio properties of an opened file
#[derive(Debug, Clone, PartialEq)]
pub struct AudioDetails {
    pub container: ContainerKind,
    pub codec: CodecInfo,
    /// Bits per sample, 0 when the container does not report one
    pub bit_depth: u32,
    /// Audio stream bitrate in kbps
    pub bitrate: u32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    pub duration: Duration,
}

impl AudioDetails {
    pub fn new(container: ContainerKind) -> Self {
        Self {
            container,
            codec: CodecInfo::None,
            bit_depth: 0,
            bitrate: 0,
            sample_rate: 0,
            duration: Duration::ZERO,
        }
    }

    pub fn with_codec(mut self, codec: CodecInfo) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_bit_depth(mut self, bit_depth: u32) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    /// Canonical encoding variant for these properties
    pub fn encoding(&self) -> EncodingVariant {
        classify(self.container, self.codec, self.bit_depth)
    }
}
