use std::path::PathBuf;

use chrono::Utc;

use crate::{
    cli::{self, auth::resolve_credentials, playlists::user_playlists},
    config::Settings,
    error,
    error::SpotifyError,
    export::{self, ExportFormat},
    info,
    spotify::{SpotifyClient, auth::request_app_token},
    success,
    types::AggregatedPlaylist,
    utils, warning,
};

/// Everything `spotback export` accepts on the command line.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub playlist_ids: Vec<String>,
    pub all: bool,
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
    pub exported_at: bool,
    pub max_retries: u32,
    /// Use a client-credentials token instead of the logged-in session.
    pub app_token: bool,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Aggregates the selected playlists and writes them in the chosen format.
pub async fn export(settings: &Settings, opts: ExportOptions) {
    let spotify = cli::client(settings);

    let playlists = if opts.app_token {
        export_with_app_token(settings, &spotify, &opts).await
    } else {
        export_with_session(&spotify, &opts).await
    };

    let now = Utc::now();
    let exported_at = match (opts.exported_at, opts.format.supports_exported_at()) {
        (true, true) => Some(utils::iso_timestamp(now)),
        (true, false) => {
            warning!("--exported-at has no effect on {} exports", opts.format);
            None
        }
        (false, _) => None,
    };

    let bytes = match export::render(opts.format, &playlists, exported_at.as_deref()) {
        Ok(bytes) => bytes,
        Err(e) => error!("Failed to render export: {}", e),
    };

    let dir = opts.output.clone().unwrap_or_else(|| PathBuf::from("."));
    if let Err(e) = async_fs::create_dir_all(&dir).await {
        error!("Cannot create output directory {}: {}", dir.display(), e);
    }
    let path = dir.join(export::file_name(opts.format, now));
    if let Err(e) = async_fs::write(&path, bytes).await {
        error!("Cannot write {}: {}", path.display(), e);
    }

    let tracks: usize = playlists.iter().map(|p| p.tracks.items.len()).sum();
    success!(
        "Exported {} playlists ({} tracks) to {}",
        playlists.len(),
        tracks,
        path.display()
    );
}

async fn export_with_session(
    spotify: &SpotifyClient,
    opts: &ExportOptions,
) -> Vec<AggregatedPlaylist> {
    let (mut session, token) = cli::require_login().await;

    let mut ids = opts.playlist_ids.clone();
    if opts.all {
        let pb = cli::spinner("Fetching playlists...");
        let result = user_playlists(spotify, &mut session, &token, opts.max_retries).await;
        pb.finish_and_clear();
        match result {
            Ok(playlists) => ids.extend(playlists.into_iter().map(|p| p.id)),
            Err(e) => cli::fail(&mut session, e).await,
        }
    }

    match aggregate_selection(spotify, &ids, &token, opts.max_retries).await {
        Ok(playlists) => playlists,
        Err(e) => cli::fail(&mut session, e).await,
    }
}

/// Exports public playlists without a user login. The token carries no
/// user context, so `--all` is not available.
async fn export_with_app_token(
    settings: &Settings,
    spotify: &SpotifyClient,
    opts: &ExportOptions,
) -> Vec<AggregatedPlaylist> {
    if opts.all {
        error!("--all needs a logged-in user and cannot be combined with --app-token.");
    }

    let Some(credentials) =
        resolve_credentials(settings, opts.client_id.clone(), opts.client_secret.clone())
    else {
        error!("--app-token needs client credentials. Pass --client-id and --client-secret or set them in the environment.");
    };

    let token = match request_app_token(spotify.http(), settings.token_url.as_str(), &credentials)
        .await
    {
        Ok(token) => token.access_token,
        Err(e) => error!("Failed to obtain an application token: {}", e),
    };

    match aggregate_selection(spotify, &opts.playlist_ids, &token, opts.max_retries).await {
        Ok(playlists) => playlists,
        Err(e) => error!("{}", cli::describe(&e)),
    }
}

async fn aggregate_selection(
    spotify: &SpotifyClient,
    ids: &[String],
    token: &str,
    max_retries: u32,
) -> Result<Vec<AggregatedPlaylist>, SpotifyError> {
    let ids = dedupe(ids);
    if ids.is_empty() {
        error!("Nothing to export. Pass playlist IDs or --all.");
    }

    info!("Exporting {} playlists", ids.len());
    let pb = cli::spinner("Fetching playlist tracks...");
    let ids = ids.as_slice();
    let result =
        cli::retry_rate_limited(max_retries, move || spotify.aggregate_many(ids, token)).await;
    pb.finish_and_clear();
    result
}

/// Drops repeated ids, keeping the first occurrence of each.
pub fn dedupe(ids: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}
