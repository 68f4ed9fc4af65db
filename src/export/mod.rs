//! # Export Formatters
//!
//! Pure, synchronous transformations of aggregated playlists into file
//! contents. No I/O, no clock: the same input always yields the same bytes.
//! A timestamp only appears when the caller passes one for the `exportedAt`
//! wrapper field.
//!
//! | Format  | Contents                                                   |
//! |---------|------------------------------------------------------------|
//! | `json`  | simplified playlists: name, description, owner, tracks     |
//! | `raw`   | `{"playlists": [...]}` exactly as fetched from the API     |
//! | `csv`   | one row per (playlist, track)                              |
//! | `xml`   | the raw document converted element by element              |
//! | `zip`   | one CSV per playlist                                       |

pub mod archive;
pub mod csv;
pub mod json;
pub mod xml;

use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::{error::ExportError, types::AggregatedPlaylist, utils};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Simplified JSON (name, description, owner, tracks)
    Json,
    /// Full API objects as JSON, usable as a restore blueprint
    Raw,
    /// Single CSV with one row per track
    Csv,
    /// XML rendition of the full API objects
    Xml,
    /// ZIP archive with one CSV per playlist
    Zip,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json | ExportFormat::Raw => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Xml => "xml",
            ExportFormat::Zip => "zip",
        }
    }

    /// Whether the format has room for an `exportedAt` wrapper field.
    pub fn supports_exported_at(self) -> bool {
        matches!(
            self,
            ExportFormat::Json | ExportFormat::Raw | ExportFormat::Xml
        )
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Json => "json",
            ExportFormat::Raw => "raw",
            ExportFormat::Csv => "csv",
            ExportFormat::Xml => "xml",
            ExportFormat::Zip => "zip",
        };
        f.write_str(name)
    }
}

/// Serializes `playlists` in `format`.
///
/// `exported_at` is added as a top-level `exportedAt` field by the formats
/// that support it and ignored by the others.
pub fn render(
    format: ExportFormat,
    playlists: &[AggregatedPlaylist],
    exported_at: Option<&str>,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Json => {
            let doc = json::simplified_value(playlists)?;
            json::to_pretty_bytes(&json::stamp(doc, "playlists", exported_at))
        }
        ExportFormat::Raw => {
            let doc = json::raw_value(playlists)?;
            json::to_pretty_bytes(&json::stamp(doc, "playlists", exported_at))
        }
        ExportFormat::Xml => {
            let doc = json::stamp(json::raw_value(playlists)?, "playlists", exported_at);
            Ok(xml::to_xml(&doc).into_bytes())
        }
        ExportFormat::Csv => self::csv::playlists_to_csv(playlists),
        ExportFormat::Zip => archive::playlists_to_zip(playlists),
    }
}

/// File name of an export: `spotback_export_<timestamp>.<ext>`, stamped in
/// ISO-8601 basic format.
pub fn file_name(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "spotback_export_{}.{}",
        utils::file_timestamp(at),
        format.extension()
    )
}
