/// FLAC Player - local FLAC library manager and player
use anyhow::Context;
use clap::{Parser, Subcommand};
use flac_importer::{LibraryContext, LibraryScanner, ScanReport};
use flac_metadata::LoftyMetadataExtractor;
use flac_player::commands::{format_time, parse_command, ReplCommand, HELP};
use flac_player::config::PlayerConfig;
use flac_player::engine::ClockEngine;
use flac_playback::{PlaybackEvent, PlaybackState, SessionContext};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flac-player")]
#[command(about = "Manage and play a local FLAC library", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "FLAC_PLAYER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory for FLAC files and add them to the library
    Scan {
        /// Directory path to scan
        path: PathBuf,
    },
    /// List all tracks in the library
    List,
    /// Forget every track and delete the library cache
    ClearCache,
    /// Play the library interactively
    Play {
        /// Scan this directory before playing
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Extra files to queue (played first when nothing else is)
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "flac_player=info,flac_importer=info,flac_storage=info,flac_playback=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = PlayerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Scan { path } => {
            let mut library = open_library(&config).await?;
            let report = library
                .scan(&path)
                .await
                .with_context(|| format!("scanning {}", path.display()))?;
            print_report(&report);
            println!("Library holds {} tracks", library.len());
        }
        Commands::List => {
            let library = open_library(&config).await?;
            if library.is_empty() {
                println!("Library is empty (run `flac-player scan <dir>`)");
            }
            for (index, track) in library.tracks().iter().enumerate() {
                println!(
                    "{:>4}  {} - {} ({}) [{}]",
                    index + 1,
                    track.artist,
                    track.title,
                    track.album,
                    format_time(track.duration)
                );
            }
        }
        Commands::ClearCache => {
            let mut library = open_library(&config).await?;
            library.clear().await?;
            println!("Library cache cleared");
        }
        Commands::Play { dir, files } => {
            let mut library = open_library(&config).await?;
            if let Some(dir) = dir.or_else(|| config.library.music_dir.clone()) {
                let report = library
                    .scan(&dir)
                    .await
                    .with_context(|| format!("scanning {}", dir.display()))?;
                print_report(&report);
            }
            play(&config, &library, &files).await?;
        }
    }

    Ok(())
}

async fn open_library(config: &PlayerConfig) -> anyhow::Result<LibraryContext> {
    let store = config.cache_store()?;
    tracing::debug!("Using library cache {}", store.file_path().display());

    let scanner = LibraryScanner::new(Arc::new(LoftyMetadataExtractor::new()));
    let library = LibraryContext::open(store, scanner).await;
    if let Some(issue) = library.cache_issue() {
        eprintln!("warning: library cache ignored ({issue}); re-scan to rebuild it");
    }
    Ok(library)
}

fn print_report(report: &ScanReport) {
    println!(
        "Scanned {} files: {} FLAC, {} new, {} already known, {} unreadable",
        report.files_discovered,
        report.candidates,
        report.added,
        report.skipped_existing,
        report.errors.len()
    );
    for failure in &report.errors {
        eprintln!("  {failure}");
    }
    if let Some(e) = &report.save_error {
        eprintln!("warning: library cache not saved: {e}");
    }
}

async fn play(config: &PlayerConfig, library: &LibraryContext, files: &[PathBuf]) -> anyhow::Result<()> {
    let mut ctx = SessionContext::new(Box::new(ClockEngine::new()), config.playback_config());
    ctx.enqueue_all(library.tracks().iter().cloned());

    if !files.is_empty() {
        let report = ctx
            .open_files(files, &LoftyMetadataExtractor::new())
            .await?;
        for failure in &report.failures {
            eprintln!("  {failure}");
        }
    }

    if ctx.queue().is_empty() {
        println!("Nothing to play");
        return Ok(());
    }

    if ctx.current_track().is_none() {
        if let Err(e) = ctx.toggle_play().await {
            eprintln!("error: {e}");
        }
    }

    println!("{HELP}");
    report_events(&mut ctx);

    let result = run_repl(&mut ctx).await;
    ctx.shutdown();
    result
}

async fn run_repl(ctx: &mut SessionContext) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // stdin closed
                    return Ok(());
                };
                match parse_command(&line) {
                    Ok(Some(ReplCommand::Quit)) => return Ok(()),
                    Ok(Some(command)) => execute(ctx, command).await,
                    Ok(None) => {}
                    Err(e) => eprintln!("{e}"),
                }
            }
            message = ctx.session_mut().next_message() => {
                let Some(message) = message else {
                    return Ok(());
                };
                if let Err(e) = ctx.apply_message(message).await {
                    eprintln!("error: {e}");
                }
            }
        }

        report_events(ctx);
    }
}

async fn execute(ctx: &mut SessionContext, command: ReplCommand) {
    let result = match command {
        ReplCommand::TogglePlay => ctx.toggle_play().await,
        ReplCommand::Next => ctx.next().await,
        ReplCommand::Previous => ctx.previous().await,
        ReplCommand::Seek(percent) => ctx.session_mut().seek(percent),
        ReplCommand::Volume(level) => ctx.session_mut().set_volume(level),
        ReplCommand::Stop => {
            ctx.session_mut().stop();
            Ok(())
        }
        ReplCommand::Status => {
            print_status(ctx);
            Ok(())
        }
        ReplCommand::Queue => {
            print_queue(ctx);
            Ok(())
        }
        ReplCommand::Help => {
            println!("{HELP}");
            Ok(())
        }
        ReplCommand::Quit => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
    }
}

/// Print what changed since the last prompt
fn report_events(ctx: &mut SessionContext) {
    for event in ctx.drain_events() {
        match event {
            PlaybackEvent::TrackChanged { .. } => {
                if let Some(track) = ctx.current_track() {
                    println!(
                        "> {} - {} [{}]",
                        track.artist,
                        track.title,
                        format_time(track.duration)
                    );
                }
            }
            PlaybackEvent::StateChanged { state } => {
                if state != PlaybackState::Loading {
                    println!("[{state}]");
                }
            }
            PlaybackEvent::VolumeChanged { volume } => {
                println!("volume {:.0}%", volume * 100.0);
            }
            PlaybackEvent::Error { message } => eprintln!("error: {message}"),
            PlaybackEvent::PositionUpdated { .. } => {}
        }
    }
}

fn print_status(ctx: &SessionContext) {
    let session = ctx.session();
    match ctx.current_track() {
        Some(track) => println!(
            "[{}] {} - {}  {} / {}  volume {:.0}%",
            session.state(),
            track.artist,
            track.title,
            format_time(session.position()),
            format_time(session.duration()),
            session.volume() * 100.0
        ),
        None => println!("[{}] nothing loaded", session.state()),
    }
}

fn print_queue(ctx: &SessionContext) {
    let current = ctx.current_track().map(|t| t.id.clone());
    for (index, track) in ctx.queue().iter().enumerate() {
        let marker = if current.as_ref() == Some(&track.id) { '>' } else { ' ' };
        println!(
            "{} {:>4}  {} - {}  {}",
            marker,
            index + 1,
            track.artist,
            track.title,
            display_path(&track.path)
        );
    }
}

fn display_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
