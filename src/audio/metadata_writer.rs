//! Metadata writing for audio files
//!
//! Persists the tag fields and property map of a [`TrackFile`] back into the
//! file's primary tag. No validation happens here; whatever the caller set
//! is handed to lofty as-is.

use std::path::Path;

use anyhow::{Context, Result};
use lofty::{Accessor, ItemValue, Probe, Tag, TagExt, TagItem, TaggedFileExt};

use super::properties::PropertyMap;
use super::reader::{MAPPED_PROPERTIES, item_key};
use super::track_file::{TagFields, TrackFile};

/// Write a file's tag fields and properties to its path
pub fn write_track_file(file: &TrackFile) -> Result<()> {
    let path = file.path();

    let mut tagged_file = Probe::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?
        .read()
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    // Get or create the primary tag
    if tagged_file.primary_tag().is_none() {
        let tag_type = tagged_file.primary_tag_type();
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged_file
        .primary_tag_mut()
        .context("Failed to create tag")?;

    apply_fields(tag, file.tag());
    apply_properties(tag, file.properties());

    save_tag(tag, path)?;
    log::debug!("Saved tags to {}", path.display());
    Ok(())
}

fn save_tag(tag: &Tag, path: &Path) -> Result<()> {
    tag.save_to_path(path)
        .with_context(|| format!("Failed to save file: {}", path.display()))
}

fn apply_fields(tag: &mut Tag, fields: &TagFields) {
    if fields.title.is_empty() {
        tag.remove_title();
    } else {
        tag.set_title(fields.title.clone());
    }
    if fields.artist.is_empty() {
        tag.remove_artist();
    } else {
        tag.set_artist(fields.artist.clone());
    }
    if fields.album.is_empty() {
        tag.remove_album();
    } else {
        tag.set_album(fields.album.clone());
    }
    if fields.year == 0 {
        tag.remove_year();
    } else {
        tag.set_year(fields.year);
    }
    if fields.track == 0 {
        tag.remove_track();
    } else {
        tag.set_track(fields.track);
    }
}

/// Replace every mapped key with the map's values, then write free-form keys
fn apply_properties(tag: &mut Tag, properties: &PropertyMap) {
    for name in MAPPED_PROPERTIES {
        replace_values(tag, name, properties.get(name));
    }
    for (name, values) in properties.iter() {
        if !MAPPED_PROPERTIES.contains(&name) {
            replace_values(tag, name, values);
        }
    }
}

fn replace_values(tag: &mut Tag, name: &str, values: &[String]) {
    let key = item_key(name);
    tag.remove_key(&key);
    for value in values {
        if !tag.push(TagItem::new(key.clone(), ItemValue::Text(value.clone()))) {
            log::debug!("{:?} tags cannot store {}", tag.tag_type(), name);
            break;
        }
    }
}
