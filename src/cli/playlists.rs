use tabled::Table;

use crate::{
    cli,
    config::Settings,
    error::SpotifyError,
    info,
    management::Session,
    spotify::SpotifyClient,
    success,
    types::{PlaylistSummary, PlaylistTableRow},
};

/// Retries granted to listing commands when Spotify rate limits them.
const LIST_MAX_RETRIES: u32 = 3;

/// Lists the user's playlists, optionally filtered by name.
pub async fn playlists(settings: &Settings, search: Option<String>) {
    let (mut session, token) = cli::require_login().await;
    let spotify = cli::client(settings);

    let pb = cli::spinner("Fetching playlists...");
    let result = user_playlists(&spotify, &mut session, &token, LIST_MAX_RETRIES).await;
    pb.finish_and_clear();

    let playlists = match result {
        Ok(playlists) => playlists,
        Err(e) => cli::fail(&mut session, e).await,
    };
    success!("Fetched {} playlists", playlists.len());

    let rows: Vec<PlaylistTableRow> = filter_by_name(&playlists, search.as_deref())
        .map(PlaylistTableRow::from)
        .collect();

    if rows.is_empty() {
        info!("No playlists found.");
        return;
    }

    println!("{}", Table::new(rows));
}

/// All playlists of the logged-in user. The user id comes from the cached
/// profile, or from `/me` when the session has none yet.
pub(crate) async fn user_playlists(
    spotify: &SpotifyClient,
    session: &mut Session,
    token: &str,
    max_retries: u32,
) -> Result<Vec<PlaylistSummary>, SpotifyError> {
    let user_id = match session.user() {
        Some(user) => user.id.clone(),
        None => {
            let user =
                cli::retry_rate_limited(max_retries, move || spotify.current_user(token)).await?;
            let id = user.id.clone();
            session.set_user(user);
            id
        }
    };

    let user_id = user_id.as_str();
    cli::retry_rate_limited(max_retries, move || spotify.user_playlists(user_id, token)).await
}

/// Case-insensitive substring match on the playlist name.
pub(crate) fn filter_by_name<'a>(
    playlists: &'a [PlaylistSummary],
    search: Option<&'a str>,
) -> impl Iterator<Item = &'a PlaylistSummary> {
    let needle = search.map(str::to_lowercase);
    playlists.iter().filter(move |p| match &needle {
        Some(needle) => p.name.to_lowercase().contains(needle),
        None => true,
    })
}
