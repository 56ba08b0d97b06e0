//! Dialect-agnostic tag properties
//!
//! A multi-valued map keyed by upper-case field name (`DISCNUMBER`,
//! `ALBUMARTIST`, `MUSICBRAINZ_TRACKID`, ...), independent of whether the
//! file carries ID3v2 frames, MP4 atoms, APE items or Xiph comments.

use std::collections::BTreeMap;

use serde::Serialize;

pub const ALBUM_ARTIST: &str = "ALBUMARTIST";
pub const DISC_NUMBER: &str = "DISCNUMBER";
pub const MUSICBRAINZ_TRACK_ID: &str = "MUSICBRAINZ_TRACKID";

/// Upper-case key -> list of values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values stored under `key`; empty when the key is absent
    pub fn get(&self, key: &str) -> &[String] {
        self.entries
            .get(&key.to_ascii_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).first().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        !self.get(key).is_empty()
    }

    /// Append one value to `key`
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.entries
            .entry(key.to_ascii_uppercase())
            .or_default()
            .push(value.into());
    }

    /// Replace every value of `key`. An empty list removes the key.
    pub fn replace(&mut self, key: &str, values: Vec<String>) {
        let key = key.to_ascii_uppercase();
        if values.is_empty() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, values);
        }
    }

    pub fn remove(&mut self, key: &str) -> Vec<String> {
        self.entries
            .remove(&key.to_ascii_uppercase())
            .unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_is_empty() {
        let map = PropertyMap::new();
        assert!(map.get(DISC_NUMBER).is_empty());
        assert_eq!(map.first(DISC_NUMBER), None);
        assert!(!map.contains(DISC_NUMBER));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut map = PropertyMap::new();
        map.push("albumArtist", "A");
        map.push(ALBUM_ARTIST, "B");
        assert_eq!(map.get("AlbumArtist"), ["A".to_string(), "B".to_string()]);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec![ALBUM_ARTIST]);
    }

    #[test]
    fn test_replace_overwrites_all_values() {
        let mut map = PropertyMap::new();
        map.push(ALBUM_ARTIST, "Old");
        map.push(ALBUM_ARTIST, "Older");
        map.replace(ALBUM_ARTIST, vec!["New".to_string()]);
        assert_eq!(map.get(ALBUM_ARTIST), ["New".to_string()]);
    }

    #[test]
    fn test_replace_with_empty_removes() {
        let mut map = PropertyMap::new();
        map.push(ALBUM_ARTIST, "A");
        map.replace(ALBUM_ARTIST, Vec::new());
        assert!(map.is_empty());
    }

    #[test]
    fn test_remove_returns_values() {
        let mut map = PropertyMap::new();
        map.push(DISC_NUMBER, "2");
        assert_eq!(map.remove("discnumber"), vec!["2".to_string()]);
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut map = PropertyMap::new();
        map.push(DISC_NUMBER, "1");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"DISCNUMBER":["1"]}"#);
    }
}
