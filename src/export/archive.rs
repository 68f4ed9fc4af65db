//! ZIP export: one CSV file per playlist.

use std::{
    collections::HashSet,
    io::{Cursor, Write},
};

use ::zip::{CompressionMethod, DateTime, ZipWriter, write::SimpleFileOptions};

use crate::{error::ExportError, types::AggregatedPlaylist, utils::sanitize_file_stem};

/// Packs every playlist as `<sanitized name>.csv` into one archive.
///
/// Entries carry a fixed modification time so the archive bytes only depend
/// on the playlists.
pub fn playlists_to_zip(playlists: &[AggregatedPlaylist]) -> Result<Vec<u8>, ExportError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (playlist, name) in playlists.iter().zip(entry_names(playlists)) {
        zip.start_file(name, options)?;
        zip.write_all(&super::csv::playlist_to_csv(playlist)?)?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Archive entry names in playlist order. Playlists whose names sanitize to
/// the same stem get `_2`, `_3`, ... appended.
pub fn entry_names(playlists: &[AggregatedPlaylist]) -> Vec<String> {
    let mut taken = HashSet::new();
    playlists
        .iter()
        .map(|p| {
            let stem = sanitize_file_stem(&p.name);
            let mut candidate = format!("{stem}.csv");
            let mut n = 2;
            while !taken.insert(candidate.clone()) {
                candidate = format!("{stem}_{n}.csv");
                n += 1;
            }
            candidate
        })
        .collect()
}
