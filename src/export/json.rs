use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::{error::ExportError, types::AggregatedPlaylist};

/// Track line of the simplified export.
#[derive(Debug, Serialize)]
pub struct SimpleTrack<'a> {
    pub name: &'a str,
    pub artists: String,
    pub album: &'a str,
}

/// Playlist of the simplified export.
#[derive(Debug, Serialize)]
pub struct SimplePlaylist<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub owner: &'a str,
    pub tracks: Vec<SimpleTrack<'a>>,
}

impl<'a> From<&'a AggregatedPlaylist> for SimplePlaylist<'a> {
    fn from(p: &'a AggregatedPlaylist) -> Self {
        SimplePlaylist {
            name: &p.name,
            description: p.description.as_deref().unwrap_or_default(),
            owner: p.owner.label(),
            tracks: p
                .tracks()
                .map(|t| SimpleTrack {
                    name: &t.name,
                    artists: t.artist_names(),
                    album: &t.album.name,
                })
                .collect(),
        }
    }
}

/// `[{name, description, owner, tracks: [{name, artists, album}]}]`, in
/// selection order.
pub fn simplified(playlists: &[AggregatedPlaylist]) -> Vec<SimplePlaylist<'_>> {
    playlists.iter().map(SimplePlaylist::from).collect()
}

pub fn simplified_value(playlists: &[AggregatedPlaylist]) -> Result<Value, ExportError> {
    Ok(serde_json::to_value(simplified(playlists))?)
}

/// `{"playlists": [...]}` with every field the API returned.
pub fn raw_value(playlists: &[AggregatedPlaylist]) -> Result<Value, ExportError> {
    Ok(json!({ "playlists": serde_json::to_value(playlists)? }))
}

/// Adds the `exportedAt` wrapper field.
///
/// Objects get the field added next to their existing keys; any other value
/// is wrapped as `{"exportedAt": .., <key>: value}`. Without a timestamp the
/// document is returned untouched.
pub fn stamp(doc: Value, key: &str, exported_at: Option<&str>) -> Value {
    let Some(at) = exported_at else {
        return doc;
    };

    match doc {
        Value::Object(mut map) => {
            map.insert("exportedAt".to_string(), Value::String(at.to_string()));
            Value::Object(map)
        }
        other => {
            let mut map = Map::new();
            map.insert("exportedAt".to_string(), Value::String(at.to_string()));
            map.insert(key.to_string(), other);
            Value::Object(map)
        }
    }
}

/// Pretty-prints with two-space indentation.
pub fn to_pretty_bytes(doc: &Value) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec_pretty(doc)?)
}
