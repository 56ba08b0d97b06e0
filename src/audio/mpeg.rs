//! MPEG audio VBR header detection
//!
//! lofty reads MPEG properties but does not say whether the stream starts
//! with a Xing/Info or VBRI header, which is the signal MP3 classification
//! uses. This looks at the first audio frame for one.

use std::io::{Read, Seek, SeekFrom};

use anyhow::{Context, Result};

/// How far past the ID3v2 tag to look for the first frame
const SCAN_LIMIT: u64 = 64 * 1024;

/// Offset of a VBRI header from the frame start
const VBRI_OFFSET: usize = 36;

/// Check a stream for a VBR header in its first MPEG frame
///
/// Reads from the start of `reader` and rewinds it before returning.
pub fn has_vbr_header<R: Read + Seek>(reader: &mut R) -> Result<bool> {
    reader
        .seek(SeekFrom::Start(0))
        .context("Failed to rewind MPEG stream")?;

    let mut id3_header = [0u8; 10];
    let read = read_up_to(reader, &mut id3_header)?;
    let audio_start = id3v2_size(&id3_header[..read]).unwrap_or(0);

    reader
        .seek(SeekFrom::Start(audio_start))
        .context("Failed to seek past ID3v2 tag")?;
    let mut buf = Vec::new();
    reader
        .by_ref()
        .take(SCAN_LIMIT)
        .read_to_end(&mut buf)
        .context("Failed to read MPEG stream")?;

    reader
        .seek(SeekFrom::Start(0))
        .context("Failed to rewind MPEG stream")?;
    Ok(scan_for_vbr_header(&buf))
}

fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader
            .read(&mut buf[filled..])
            .context("Failed to read file header")?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Total size of a leading ID3v2 tag (header, body and footer)
fn id3v2_size(header: &[u8]) -> Option<u64> {
    if header.len() < 10 || &header[..3] != b"ID3" {
        return None;
    }
    let size = header[6..10]
        .iter()
        .fold(0u64, |acc, b| (acc << 7) | u64::from(b & 0x7F));
    let footer = if header[5] & 0x10 != 0 { 10 } else { 0 };
    Some(10 + size + footer)
}

/// Scan a buffer starting at the audio data for the first frame's VBR header
pub fn scan_for_vbr_header(buf: &[u8]) -> bool {
    let Some(start) = find_first_frame(buf) else {
        return false;
    };
    let frame = &buf[start..];
    let header = FrameHeader::parse(frame).map(|h| h.xing_offset());

    if let Some(offset) = header {
        if valid_xing(frame.get(offset..).unwrap_or(&[])) {
            return true;
        }
    }
    valid_vbri(frame.get(VBRI_OFFSET..).unwrap_or(&[]))
}

fn find_first_frame(buf: &[u8]) -> Option<usize> {
    (0..buf.len().saturating_sub(3)).find(|&i| FrameHeader::parse(&buf[i..]).is_some())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MpegVersion {
    V1,
    V2,
    V25,
}

#[derive(Debug, Clone, Copy)]
struct FrameHeader {
    version: MpegVersion,
    mono: bool,
}

impl FrameHeader {
    fn parse(bytes: &[u8]) -> Option<Self> {
        let b = bytes.get(..4)?;
        if b[0] != 0xFF || b[1] & 0xE0 != 0xE0 {
            return None;
        }
        let version = match (b[1] >> 3) & 0x03 {
            0 => MpegVersion::V25,
            2 => MpegVersion::V2,
            3 => MpegVersion::V1,
            _ => return None,
        };
        if (b[1] >> 1) & 0x03 == 0 {
            return None;
        }
        if b[2] >> 4 == 0x0F || (b[2] >> 2) & 0x03 == 0x03 {
            return None;
        }
        let mono = (b[3] >> 6) == 0x03;
        Some(Self { version, mono })
    }

    /// Xing/Info offset: 4 header bytes plus the side information
    fn xing_offset(self) -> usize {
        let side_info = match (self.version, self.mono) {
            (MpegVersion::V1, false) => 32,
            (MpegVersion::V1, true) => 17,
            (_, false) => 17,
            (_, true) => 9,
        };
        4 + side_info
    }
}

fn be_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

/// Xing/Info header with frame and byte counts present and non-zero
fn valid_xing(data: &[u8]) -> bool {
    if !(data.starts_with(b"Xing") || data.starts_with(b"Info")) {
        return false;
    }
    let Some(flags) = be_u32(data, 4) else {
        return false;
    };
    if flags & 0x03 != 0x03 {
        return false;
    }
    matches!(
        (be_u32(data, 8), be_u32(data, 12)),
        (Some(frames), Some(bytes)) if frames > 0 && bytes > 0
    )
}

fn valid_vbri(data: &[u8]) -> bool {
    if !data.starts_with(b"VBRI") {
        return false;
    }
    matches!(
        (be_u32(data, 10), be_u32(data, 14)),
        (Some(bytes), Some(frames)) if frames > 0 && bytes > 0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::test_fixtures::{MPEG1_STEREO_HEADER, mpeg_frame, write_temp};

    #[test]
    fn test_xing_header_detected() {
        let frame = mpeg_frame(MPEG1_STEREO_HEADER, 36, Some(*b"Xing"));
        assert!(scan_for_vbr_header(&frame));
    }

    #[test]
    fn test_info_header_counts_as_vbr_header() {
        let frame = mpeg_frame(MPEG1_STEREO_HEADER, 36, Some(*b"Info"));
        assert!(scan_for_vbr_header(&frame));
    }

    #[test]
    fn test_plain_frame_has_no_header() {
        let frame = mpeg_frame(MPEG1_STEREO_HEADER, 36, None);
        assert!(!scan_for_vbr_header(&frame));
    }

    #[test]
    fn test_mono_offset() {
        let mono = [0xFF, 0xFB, 0x90, 0xC0];
        assert!(scan_for_vbr_header(&mpeg_frame(mono, 21, Some(*b"Xing"))));
        assert!(!scan_for_vbr_header(&mpeg_frame(mono, 36, Some(*b"Xing"))));
    }

    #[test]
    fn test_mpeg2_offset() {
        let mpeg2_stereo = [0xFF, 0xF3, 0x90, 0x00];
        assert!(scan_for_vbr_header(&mpeg_frame(mpeg2_stereo, 21, Some(*b"Xing"))));
    }

    #[test]
    fn test_xing_without_counts_is_ignored() {
        let mut frame = mpeg_frame(MPEG1_STEREO_HEADER, 36, Some(*b"Xing"));
        // Clear the frame/byte flags
        frame[36 + 7] = 0;
        assert!(!scan_for_vbr_header(&frame));
    }

    #[test]
    fn test_vbri_header_detected() {
        let mut frame = vec![0u8; 256];
        frame[..4].copy_from_slice(&MPEG1_STEREO_HEADER);
        frame[36..40].copy_from_slice(b"VBRI");
        frame[46..50].copy_from_slice(&1000u32.to_be_bytes());
        frame[50..54].copy_from_slice(&40u32.to_be_bytes());
        assert!(scan_for_vbr_header(&frame));
    }

    #[test]
    fn test_leading_junk_is_skipped() {
        let mut data = vec![0u8; 17];
        data.extend(mpeg_frame(MPEG1_STEREO_HEADER, 36, Some(*b"Xing")));
        assert!(scan_for_vbr_header(&data));
    }

    #[test]
    fn test_no_frame() {
        assert!(!scan_for_vbr_header(b"definitely not mpeg audio"));
        assert!(!scan_for_vbr_header(&[]));
    }

    #[test]
    fn test_id3v2_size() {
        let header = [b'I', b'D', b'3', 4, 0, 0, 0, 0, 0x01, 0x7F];
        assert_eq!(id3v2_size(&header), Some(10 + 255));
        let with_footer = [b'I', b'D', b'3', 4, 0, 0x10, 0, 0, 0, 10];
        assert_eq!(id3v2_size(&with_footer), Some(30));
        assert_eq!(id3v2_size(b"RIFF0000000"), None);
    }

    #[test]
    fn test_has_vbr_header_skips_id3v2() {
        let mut data = vec![b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 20];
        // Tag body that happens to contain a frame sync
        let mut body = vec![0u8; 20];
        body[0] = 0xFF;
        body[1] = 0xFB;
        data.extend(body);
        data.extend(mpeg_frame(MPEG1_STEREO_HEADER, 36, Some(*b"Xing")));
        let mut reader = Cursor::new(data);
        assert!(has_vbr_header(&mut reader).unwrap());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_has_vbr_header_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "cbr.mp3", &mpeg_frame(MPEG1_STEREO_HEADER, 36, None));
        let mut file = std::fs::File::open(path).unwrap();
        assert!(!has_vbr_header(&mut file).unwrap());
    }

    #[test]
    fn test_has_vbr_header_empty_stream() {
        assert!(!has_vbr_header(&mut Cursor::new(Vec::<u8>::new())).unwrap());
    }
}
