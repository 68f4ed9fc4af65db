use futures::future::try_join_all;

use crate::{
    error::SpotifyError,
    types::{AggregatedPlaylist, PlaylistItem, PlaylistSummary},
};

use super::{PLAYLISTS_PAGE_LIMIT, SpotifyClient};

impl SpotifyClient {
    /// All playlists of `user_id`, in the order the API lists them.
    pub async fn user_playlists(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Vec<PlaylistSummary>, SpotifyError> {
        let url = self.endpoint(&format!(
            "/users/{}/playlists?limit={}",
            urlencoding::encode(user_id),
            PLAYLISTS_PAGE_LIMIT
        ));
        self.fetch_all_pages(&url, token).await
    }

    /// Fetches a playlist with its complete track list.
    ///
    /// The metadata response already embeds the first page of tracks; that
    /// page is reused and pagination continues from its `next` cursor.
    /// Entries whose `track` is null (removed or unavailable tracks) are
    /// dropped. On return `tracks.total` equals `tracks.items.len()` and
    /// `tracks.next` is `None`.
    pub async fn aggregate(
        &self,
        playlist_id: &str,
        token: &str,
    ) -> Result<AggregatedPlaylist, SpotifyError> {
        let url = self.endpoint(&format!("/playlists/{}", urlencoding::encode(playlist_id)));
        let mut playlist: AggregatedPlaylist = self.get_json(&url, token).await?;

        let mut items: Vec<PlaylistItem> = std::mem::take(&mut playlist.tracks.items);
        if let Some(next) = playlist.tracks.next.take() {
            items.extend(self.fetch_all_pages::<PlaylistItem>(&next, token).await?);
        }
        items.retain(|item| item.track.is_some());

        let count = items.len() as u32;
        playlist.tracks.items = items;
        playlist.tracks.total = count;
        playlist.tracks.limit = count;
        playlist.tracks.offset = 0;
        playlist.tracks.next = None;
        playlist.tracks.previous = None;

        Ok(playlist)
    }

    /// Aggregates several playlists concurrently.
    ///
    /// The result has the same order as `playlist_ids`, whatever order the
    /// fetches complete in. The first failure fails the whole batch.
    pub async fn aggregate_many(
        &self,
        playlist_ids: &[String],
        token: &str,
    ) -> Result<Vec<AggregatedPlaylist>, SpotifyError> {
        try_join_all(playlist_ids.iter().map(|id| self.aggregate(id, token))).await
    }
}
