//! tagview - read, classify and edit audio file metadata

pub mod audio;
pub mod library;
pub mod logging;
pub mod settings;
pub mod track;

#[cfg(test)]
mod test_fixtures;
