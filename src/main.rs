use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotback::{
    cli::{self, ExportOptions},
    config::{self, Settings},
    error,
    export::ExportFormat,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in with your Spotify account
    Login(CredentialOptions),

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List your playlists
    Playlists(PlaylistsOptions),

    #[clap(about = "Export playlists with all their tracks")]
    Export(ExportArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CredentialOptions {
    /// Client ID of your Spotify application (defaults to SPOTIFY_CLIENT_ID)
    #[clap(long, requires = "client_secret")]
    pub client_id: Option<String>,

    /// Client secret of your Spotify application (defaults to SPOTIFY_CLIENT_SECRET)
    #[clap(long, requires = "client_id")]
    pub client_secret: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Only show playlists whose name contains this text
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// IDs of the playlists to export
    pub playlist_ids: Vec<String>,

    /// Export every playlist of the logged-in user
    #[clap(long)]
    pub all: bool,

    /// Output format
    #[clap(long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Directory the export file is written to
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Add an exportedAt field with the current time (json, raw and xml)
    #[clap(long)]
    pub exported_at: bool,

    /// How often to retry after Spotify answered "too many requests"
    #[clap(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Use an application token instead of your login (public playlists only)
    #[clap(long)]
    pub app_token: bool,

    #[clap(flatten)]
    pub credentials: CredentialOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    match cli.command {
        Command::Login(opt) => cli::login(settings, opt.client_id, opt.client_secret).await,
        Command::Logout => cli::logout().await,
        Command::Whoami => cli::whoami(&settings).await,
        Command::Playlists(opt) => cli::playlists(&settings, opt.search).await,
        Command::Export(opt) => {
            cli::export(
                &settings,
                ExportOptions {
                    playlist_ids: opt.playlist_ids,
                    all: opt.all,
                    format: opt.format,
                    output: opt.output,
                    exported_at: opt.exported_at,
                    max_retries: opt.max_retries,
                    app_token: opt.app_token,
                    client_id: opt.credentials.client_id,
                    client_secret: opt.credentials.client_secret,
                },
            )
            .await
        }
        Command::Completions(_) => {}
    }
}
