//! tagview - audio metadata inspector
//!
//! Reads tags, encoding and cover art from MP3, MP4, FLAC, Ogg, AIFF and APE
//! files and writes simple tag edits back.

mod cli;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::LevelFilter;

use cli::{Args, Command, SetArgs};
use tagview::audio::TrackFile;
use tagview::library::{read_summaries, scan_paths};
use tagview::logging::init_logging;
use tagview::settings::Settings;

fn main() -> Result<()> {
    let args = Args::parse();
    // Logging is configured from the settings, so report the load afterwards
    let (settings, outcome) = Settings::load_checked();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        settings.level_filter()
    };
    init_logging(level);
    Settings::log_outcome(&outcome);

    match args.command {
        Command::Show {
            paths,
            pretty,
            source,
            follow_links,
        } => {
            let source = source.or_else(|| settings.source.clone());
            show(&paths, pretty, source.as_deref(), follow_links || settings.follow_links)
        }
        Command::Classify { paths, follow_links } => {
            classify(&paths, follow_links || settings.follow_links)
        }
        Command::Cover { file, output } => cover(file, output),
        Command::Set(set) => set_fields(set),
    }
}

fn show(paths: &[PathBuf], pretty: bool, source: Option<&str>, follow_links: bool) -> Result<()> {
    let files = scan_paths(paths, follow_links);
    let (summaries, failed) = read_summaries(&files, source);

    let mut out = std::io::stdout().lock();
    for summary in &summaries {
        let json = if pretty {
            serde_json::to_string_pretty(summary)?
        } else {
            serde_json::to_string(summary)?
        };
        writeln!(out, "{}", json)?;
    }

    if failed > 0 {
        log::warn!("{} of {} files could not be read", failed, files.len());
    }
    Ok(())
}

fn classify(paths: &[PathBuf], follow_links: bool) -> Result<()> {
    let mut out = std::io::stdout().lock();
    for path in scan_paths(paths, follow_links) {
        match TrackFile::open(&path) {
            Ok(file) => writeln!(out, "{}\t{}", path.display(), file.view().encoding())?,
            Err(e) => log::warn!("Skipping {}: {:#}", path.display(), e),
        }
    }
    Ok(())
}

fn cover(file: PathBuf, output: PathBuf) -> Result<()> {
    let track = TrackFile::open(&file)?;
    let view = track.view();
    let Some(bytes) = view.front_cover() else {
        bail!("No artwork in {}", file.display());
    };

    std::fs::write(&output, bytes)
        .with_context(|| format!("Failed to write cover: {}", output.display()))?;
    log::info!("Wrote {} bytes to {}", bytes.len(), output.display());
    Ok(())
}

fn set_fields(set: SetArgs) -> Result<()> {
    if !set.has_changes() {
        bail!("Nothing to change; pass at least one field");
    }

    let mut track = TrackFile::open(&set.file)?;
    let mut view = track.view_mut();

    if let Some(title) = &set.title {
        view.set_title(title);
    }
    if let Some(artist) = &set.artist {
        view.set_artist(artist);
    }
    if let Some(album) = &set.album {
        view.set_album(album);
    }
    if let Some(artists) = &set.album_artists {
        view.set_album_artists(artists);
    }
    if let Some(id) = &set.musicbrainz_track_id {
        view.set_musicbrainz_track_id(id);
    }
    if let Some(year) = set.year {
        view.set_year(year);
    }
    if let Some(track_number) = set.track {
        view.set_track_number(track_number);
    }

    view.save()?;
    log::info!("Updated {}", set.file.display());
    Ok(())
}
