use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tunequiz::{cli, config, error};

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
    /// Authorize with the Spotify API
    Auth,

    /// Fetch a playlist and cache its preview clips
    Playlist(PlaylistOptions),

    /// Play one cached preview clip
    Play(PlayOptions),

    /// Run a guessing round over a playlist
    Game(GameOptions),

    /// Show recorded game results
    Results(ResultsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Spotify playlist ID
    id: String,

    /// Parallel downloads while filling the clip cache
    #[clap(long)]
    concurrency: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    /// Spotify playlist ID
    id: String,

    /// Zero-based track position within the playlist
    #[clap(long)]
    track: usize,

    /// Seconds before the clip is cut off
    #[clap(long, default_value_t = 20.0)]
    duration: f64,
}

#[derive(Parser, Debug, Clone)]
pub struct GameOptions {
    /// Spotify playlist ID
    id: String,

    /// Name the final score is recorded under
    #[clap(long, default_value = "player")]
    user: String,

    /// Seconds of clip playback per guess
    #[clap(long, default_value_t = 20.0)]
    duration: f64,
}

#[derive(Parser, Debug, Clone)]
pub struct ResultsOptions {
    /// Only show results recorded for this user
    #[clap(long)]
    user: Option<String>,
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

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Playlist(opt) => cli::playlist(opt.id, opt.concurrency).await,
        Command::Play(opt) => cli::play(opt.id, opt.track, opt.duration).await,
        Command::Game(opt) => cli::game(opt.id, opt.user, opt.duration).await,
        Command::Results(opt) => cli::results(opt.user).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
