#![allow(dead_code)]

use serde_json::{Value, json};
use spotback::types::AggregatedPlaylist;

pub fn track_json(id: &str, name: &str, artists: &[&str], album: &str) -> Value {
    json!({
        "track": {
            "id": id,
            "name": name,
            "artists": artists.iter().map(|a| json!({ "name": a })).collect::<Vec<_>>(),
            "album": { "name": album },
            "duration_ms": 180000
        },
        "added_at": "2024-01-01T00:00:00Z"
    })
}

pub fn null_track_json() -> Value {
    json!({ "track": null, "added_at": "2024-01-01T00:00:00Z" })
}

pub fn playlist(id: &str, name: &str, items: Vec<Value>) -> AggregatedPlaylist {
    let total = items.len();
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "description": "A playlist",
        "owner": {
            "id": "owner1",
            "display_name": "Owner One",
            "type": "user",
            "uri": "spotify:user:owner1",
            "external_urls": { "spotify": "https://open.spotify.com/user/owner1" }
        },
        "images": [{ "url": "https://i.scdn.co/image/abc", "height": 640, "width": 640, "type": "cover" }],
        "public": true,
        "snapshot_id": "snap",
        "tracks": {
            "href": format!("https://api.spotify.com/v1/playlists/{id}/tracks"),
            "items": items,
            "total": total,
            "limit": total,
            "offset": 0,
            "next": null
        }
    }))
    .unwrap()
}
