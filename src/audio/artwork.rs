//! Front cover lookup across picture stores
//!
//! Tag dialects keep pictures in different places. A FLAC file has native
//! picture blocks, an Ogg file keeps them inside its Xiph comment block, and
//! every tag exposes a generic role-keyed map. An opened file lists the
//! stores it has as [`PictureSource`]s in precedence order; the resolver
//! walks them and stops at the first store that yields a picture.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Role of an embedded picture
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PictureRole {
    FrontCover,
    Other,
    /// Any other upstream role (back cover, artist, media, ...)
    Secondary,
}

/// Encoded image bytes (JPEG, PNG, ...) with their role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub role: PictureRole,
    pub data: Vec<u8>,
}

impl Picture {
    pub fn new(role: PictureRole, data: impl Into<Vec<u8>>) -> Self {
        Self {
            role,
            data: data.into(),
        }
    }
}

/// Generic role -> pictures map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PictureMap {
    entries: BTreeMap<PictureRole, Vec<Picture>>,
}

impl PictureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, picture: Picture) {
        self.entries.entry(picture.role).or_default().push(picture);
    }

    /// First picture stored under `role`
    pub fn first(&self, role: PictureRole) -> Option<&Picture> {
        self.entries.get(&role).and_then(|pictures| pictures.first())
    }

    pub fn contains(&self, role: PictureRole) -> bool {
        self.entries.get(&role).is_some_and(|pictures| !pictures.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }
}

impl FromIterator<Picture> for PictureMap {
    fn from_iter<I: IntoIterator<Item = Picture>>(iter: I) -> Self {
        let mut map = PictureMap::new();
        for picture in iter {
            map.insert(picture);
        }
        map
    }
}

/// One picture store of an opened file
#[derive(Debug, Clone, Copy)]
pub enum PictureSource<'a> {
    /// FLAC picture blocks
    Native(&'a [Picture]),
    /// Pictures embedded in a Xiph comment block
    CommentBlock(&'a [Picture]),
    /// Role-keyed map every tag exposes
    Map(&'a PictureMap),
}

impl<'a> PictureSource<'a> {
    /// Front cover of this store, falling back to a picture of role `Other`
    pub fn find_cover(self) -> Option<&'a Picture> {
        match self {
            PictureSource::Native(list) | PictureSource::CommentBlock(list) => {
                find_in_list(list, PictureRole::FrontCover)
                    .or_else(|| find_in_list(list, PictureRole::Other))
            }
            PictureSource::Map(map) => map
                .first(PictureRole::FrontCover)
                .or_else(|| map.first(PictureRole::Other)),
        }
    }
}

fn find_in_list(list: &[Picture], role: PictureRole) -> Option<&Picture> {
    list.iter().find(|picture| picture.role == role)
}

/// Resolve the front cover bytes from sources given in precedence order
///
/// A later source is consulted only when every earlier one came up empty,
/// regardless of which role the earlier hit had.
pub fn resolve_front_cover<'a, I>(sources: I) -> Option<&'a [u8]>
where
    I: IntoIterator<Item = PictureSource<'a>>,
{
    sources
        .into_iter()
        .find_map(PictureSource::find_cover)
        .map(|picture| picture.data.as_slice())
}

pub fn has_artwork<'a, I>(sources: I) -> bool
where
    I: IntoIterator<Item = PictureSource<'a>>,
{
    resolve_front_cover(sources).is_some()
}

/// Pixel dimensions of an encoded image, if its header can be read
pub fn cover_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    match imagesize::blob_size(data) {
        Ok(size) => Some((size.width as u32, size.height as u32)),
        Err(e) => {
            log::debug!("Could not size cover image: {:?}", e);
            None
        }
    }
}
