// Audio module - opened files, classification, artwork and tag access

pub mod artwork;
pub mod classify;
pub mod container;
pub mod detection;
pub mod metadata;
pub mod metadata_writer;
pub mod mpeg;
pub mod properties;
pub mod reader;
pub mod track_file;

pub use artwork::{Picture, PictureMap, PictureRole, PictureSource, has_artwork, resolve_front_cover};
pub use classify::{EncodingVariant, classify};
pub use container::{AudioDetails, CodecInfo, ContainerKind, Mp4Codec};
pub use detection::is_audio_file;
pub use metadata::MetadataView;
pub use properties::PropertyMap;
pub use track_file::{TagFields, TrackFile};
