//! Test fixtures for metadata tests
//!
//! Builds tiny but well-formed audio byte streams (FLAC metadata-only
//! files, single MPEG frames) and image headers, so tests do not depend on
//! external encoders or checked-in media.

#![cfg(test)]

use std::path::PathBuf;

use tempfile::TempDir;

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, stereo
pub const MPEG1_STEREO_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];

/// FLAC picture type codes
pub const FLAC_PICTURE_OTHER: u32 = 0;
pub const FLAC_PICTURE_FRONT_COVER: u32 = 3;
pub const FLAC_PICTURE_BACK_COVER: u32 = 4;

/// Write `data` into `dir` under `name` and return the full path
pub fn write_temp(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, data).expect("Failed to write fixture");
    path
}

/// First 24 bytes of a PNG: signature plus IHDR with the given size
pub fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend(13u32.to_be_bytes());
    data.extend(b"IHDR");
    data.extend(width.to_be_bytes());
    data.extend(height.to_be_bytes());
    // bit depth, colour type, compression, filter, interlace, CRC
    data.extend([8, 6, 0, 0, 0, 0, 0, 0, 0]);
    data
}

/// One 417-byte MPEG frame, optionally carrying a Xing-style header
///
/// `tag` is written at `offset` followed by flags (frames + bytes), a frame
/// count and a byte count.
pub fn mpeg_frame(header: [u8; 4], offset: usize, tag: Option<[u8; 4]>) -> Vec<u8> {
    let mut frame = vec![0u8; 417];
    frame[..4].copy_from_slice(&header);
    if let Some(tag) = tag {
        frame[offset..offset + 4].copy_from_slice(&tag);
        frame[offset + 4..offset + 8].copy_from_slice(&0x0Fu32.to_be_bytes());
        frame[offset + 8..offset + 12].copy_from_slice(&120u32.to_be_bytes());
        frame[offset + 12..offset + 16].copy_from_slice(&50_000u32.to_be_bytes());
    }
    frame
}

/// ID3v2.4 tag holding a single UTF-8 TIT2 frame
pub fn id3v2_title(title: &str) -> Vec<u8> {
    let mut frame = b"TIT2".to_vec();
    frame.extend(synchsafe(1 + title.len() as u32));
    frame.extend([0, 0]);
    frame.push(3);
    frame.extend(title.as_bytes());

    let mut tag = vec![b'I', b'D', b'3', 4, 0, 0];
    tag.extend(synchsafe(frame.len() as u32));
    tag.extend(frame);
    tag
}

fn synchsafe(value: u32) -> [u8; 4] {
    [
        ((value >> 21) & 0x7F) as u8,
        ((value >> 14) & 0x7F) as u8,
        ((value >> 7) & 0x7F) as u8,
        (value & 0x7F) as u8,
    ]
}

/// Builder for a FLAC file with metadata blocks and optional stand-in audio file (no audio frames)
#[derive(Debug, Clone)]
pub struct FlacFixture {
    bit_depth: u8,
    sample_rate: u32,
    total_samples: u64,
    audio: Vec<u8>,
    comments: Vec<(String, String)>,
    pictures: Vec<(u32, Vec<u8>)>,
}

impl FlacFixture {
    pub fn new(bit_depth: u8) -> Self {
        Self {
            bit_depth,
            sample_rate: 44_100,
            total_samples: 0,
            audio: Vec::new(),
            comments: Vec::new(),
            pictures: Vec::new(),
        }
    }

    pub fn comment(mut self, key: &str, value: &str) -> Self {
        self.comments.push((key.to_string(), value.to_string()));
        self
    }

    /// Declare `seconds` of audio and append `bytes` of stand-in frame data
    pub fn audio(mut self, seconds: u64, bytes: usize) -> Self {
        self.total_samples = seconds * u64::from(self.sample_rate);
        self.audio = vec![0u8; bytes];
        self
    }

    pub fn picture(mut self, picture_type: u32, data: Vec<u8>) -> Self {
        self.pictures.push((picture_type, data));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut blocks: Vec<(u8, Vec<u8>)> = vec![(0, self.stream_info())];
        if !self.comments.is_empty() {
            blocks.push((4, self.vorbis_comment()));
        }
        for (picture_type, data) in &self.pictures {
            blocks.push((6, picture_block(*picture_type, data)));
        }
        blocks.push((1, vec![0u8; 64]));

        let mut out = b"fLaC".to_vec();
        let count = blocks.len();
        for (i, (block_type, body)) in blocks.into_iter().enumerate() {
            let last = if i + 1 == count { 0x80 } else { 0 };
            out.push(last | block_type);
            let len = body.len() as u32;
            out.extend(&len.to_be_bytes()[1..]);
            out.extend(body);
        }
        out.extend(&self.audio);
        out
    }

    pub fn write(&self, dir: &TempDir, name: &str) -> PathBuf {
        write_temp(dir, name, &self.build())
    }

    fn stream_info(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(34);
        body.extend(4096u16.to_be_bytes());
        body.extend(4096u16.to_be_bytes());
        body.extend([0u8; 6]);
        let packed: u64 = (u64::from(self.sample_rate) << 44)
            | (1u64 << 41)
            | (u64::from(self.bit_depth - 1) << 36)
            | (self.total_samples & 0xF_FFFF_FFFF);
        body.extend(packed.to_be_bytes());
        body.extend([0u8; 16]);
        body
    }

    fn vorbis_comment(&self) -> Vec<u8> {
        let vendor = b"tagview fixtures";
        let mut body = Vec::new();
        body.extend((vendor.len() as u32).to_le_bytes());
        body.extend(vendor);
        body.extend((self.comments.len() as u32).to_le_bytes());
        for (key, value) in &self.comments {
            let field = format!("{key}={value}");
            body.extend((field.len() as u32).to_le_bytes());
            body.extend(field.as_bytes());
        }
        body
    }
}

fn picture_block(picture_type: u32, data: &[u8]) -> Vec<u8> {
    let mime = b"image/png";
    let mut body = Vec::new();
    body.extend(picture_type.to_be_bytes());
    body.extend((mime.len() as u32).to_be_bytes());
    body.extend(mime);
    body.extend(0u32.to_be_bytes());
    // width, height, colour depth, indexed colours
    for value in [0u32, 0, 0, 0] {
        body.extend(value.to_be_bytes());
    }
    body.extend((data.len() as u32).to_be_bytes());
    body.extend(data);
    body
}
