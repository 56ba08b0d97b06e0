//! Command-line interface definitions.
//!
//! Only the `clap` surface lives here; all tag logic is in the library.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tagview", version, about = "Inspect and edit audio file metadata")]
pub struct Args {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a JSON summary for each audio file (directories are scanned)
    Show {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Pretty-print instead of one JSON object per line
        #[arg(long)]
        pretty: bool,

        /// Source label stored in each summary
        #[arg(long)]
        source: Option<String>,

        /// Follow symlinks while scanning directories
        #[arg(long)]
        follow_links: bool,
    },

    /// Print the encoding variant of each audio file
    Classify {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Follow symlinks while scanning directories
        #[arg(long)]
        follow_links: bool,
    },

    /// Write the front cover image of a file
    Cover {
        file: PathBuf,

        /// Where to write the image bytes
        output: PathBuf,
    },

    /// Edit tag fields and save them back to the file
    Set(SetArgs),
}

#[derive(ClapArgs, Debug)]
pub struct SetArgs {
    pub file: PathBuf,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub artist: Option<String>,

    #[arg(long)]
    pub album: Option<String>,

    /// Album artists separated by `;` (empty clears them)
    #[arg(long)]
    pub album_artists: Option<String>,

    #[arg(long)]
    pub musicbrainz_track_id: Option<String>,

    /// Release year (0 clears it)
    #[arg(long)]
    pub year: Option<u32>,

    /// Track number (0 clears it)
    #[arg(long)]
    pub track: Option<u32>,
}

impl SetArgs {
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.artist.is_some()
            || self.album.is_some()
            || self.album_artists.is_some()
            || self.musicbrainz_track_id.is_some()
            || self.year.is_some()
            || self.track.is_some()
    }
}
