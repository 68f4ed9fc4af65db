//! CSV export.
//!
//! Fields holding a comma, a double quote or a line break are quoted and
//! inner quotes doubled, so any standard CSV reader gets the original text
//! back.

use ::csv::{QuoteStyle, Writer, WriterBuilder};

use crate::{error::ExportError, types::AggregatedPlaylist};

pub const HEADER: [&str; 6] = [
    "Playlist ID",
    "Playlist Name",
    "Track ID",
    "Track Name",
    "Artists",
    "Album",
];

/// One header row, then one row per (playlist, track) pair.
pub fn playlists_to_csv(playlists: &[AggregatedPlaylist]) -> Result<Vec<u8>, ExportError> {
    let mut wtr = writer();
    wtr.write_record(HEADER)?;
    for playlist in playlists {
        write_rows(&mut wtr, playlist)?;
    }
    Ok(wtr.into_inner()?)
}

/// CSV of a single playlist, same layout as [`playlists_to_csv`].
pub fn playlist_to_csv(playlist: &AggregatedPlaylist) -> Result<Vec<u8>, ExportError> {
    playlists_to_csv(std::slice::from_ref(playlist))
}

fn writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new())
}

fn write_rows(wtr: &mut Writer<Vec<u8>>, playlist: &AggregatedPlaylist) -> Result<(), ExportError> {
    for track in playlist.tracks() {
        wtr.write_record([
            playlist.id.as_str(),
            playlist.name.as_str(),
            track.id.as_deref().unwrap_or_default(),
            track.name.as_str(),
            track.artist_names().as_str(),
            track.album.name.as_str(),
        ])?;
    }
    Ok(())
}
