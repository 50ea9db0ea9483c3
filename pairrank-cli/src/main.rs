mod config;
mod output;
mod session;

use clap::Parser;
use pairrank_core::{EngineConfig, RankingEngine, parse_names};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::session::{SessionEnd, run_session, write_session_end};

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "pairrank", version, about = "Rank items by answering \"which is better?\" one pair at a time")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug logs on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Start or resume an interactive ranking session
    Rank(RankArgs),
    /// Print status and ranking of a saved state file
    Show(ShowArgs),
    /// Create a default config file at ~/.config/pairrank/config.toml
    Init {
        /// Write the config here instead of the default location
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Parser)]
struct RankArgs {
    /// File with one item per line, or a JSON array of strings
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item (repeatable)
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// Resume from a saved state file (progress is saved back to it)
    #[arg(long, conflicts_with_all = ["items", "inline_items"])]
    resume: Option<PathBuf>,

    /// Save progress to this file when the session ends
    #[arg(long)]
    save: Option<PathBuf>,

    /// Seed for a reproducible order of questions
    #[arg(long)]
    seed: Option<u64>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,

    /// Path to config file (default: ~/.config/pairrank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct ShowArgs {
    /// State file written by `rank --save` or the `e` command
    state: PathBuf,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load items from --items file and --item inline args.
/// Stdin is reserved for answers, so it is never read for items.
fn load_items(args: &RankArgs) -> Vec<String> {
    let mut items = Vec::new();

    // From file (auto-detects JSON array vs one-per-line)
    if let Some(ref path) = args.items {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read items file {}: {e}", path.display())));
        items = parse_names(&content)
            .unwrap_or_else(|e| bail(format!("{}: {e}", path.display())));
    }

    // From inline --item flags
    items.extend(args.inline_items.iter().cloned());

    if items.is_empty() {
        bail("No items provided. Use --items <file>, --item <name>, or --resume <state.json>.");
    }
    items
}

fn load_state(path: &Path, config: EngineConfig) -> RankingEngine {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read state file {}: {e}", path.display())));
    RankingEngine::import(&text, config)
        .unwrap_or_else(|e| bail(format!("{}: {e}", path.display())))
}

/// Where a `rank` session loads its state from and saves it to.
#[derive(Debug, PartialEq, Eq)]
struct SessionPlan {
    load_from: Option<PathBuf>,
    save_to: Option<PathBuf>,
}

/// Decide the load and save paths for `rank`.
///
/// `--resume` loads and saves back to the same file unless `--save` says
/// otherwise. With items, a session is fresh; the configured `state_file` is
/// only used as its save target while that file does not exist yet. With
/// neither, an existing `state_file` is resumed.
fn plan_session(
    resume: Option<&Path>,
    has_items: bool,
    save: Option<&Path>,
    state_file: Option<&Path>,
) -> Result<SessionPlan, String> {
    if let Some(path) = resume {
        return Ok(SessionPlan {
            load_from: Some(path.to_path_buf()),
            save_to: Some(save.unwrap_or(path).to_path_buf()),
        });
    }

    if has_items {
        let save_to = match (save, state_file) {
            (Some(path), _) => Some(path.to_path_buf()),
            (None, Some(path)) if path.exists() => {
                return Err(format!(
                    "State file {} already exists. Pass --resume {} to continue it, or --save <file> for a new session.",
                    path.display(),
                    path.display()
                ));
            }
            (None, state_file) => state_file.map(Path::to_path_buf),
        };
        return Ok(SessionPlan { load_from: None, save_to });
    }

    match state_file.filter(|path| path.exists()) {
        Some(path) => Ok(SessionPlan {
            load_from: Some(path.to_path_buf()),
            save_to: Some(save.unwrap_or(path).to_path_buf()),
        }),
        None => Err("No items provided. Use --items <file>, --item <name>, or --resume <state.json>.".to_string()),
    }
}

fn save_state(path: &Path, engine: &RankingEngine) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }
    std::fs::write(path, engine.export_json())
        .unwrap_or_else(|e| bail(format!("Failed to write state to {}: {e}", path.display())));
    tracing::info!(path = %path.display(), comparisons = engine.state().comparison_count(), "saved state");
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Rank(args) => run_rank(args),
        Commands::Show(args) => run_show(args),
        Commands::Init { config: config_arg } => {
            let path = config_arg.unwrap_or_else(config::config_path);
            config::create_default_config(&path).unwrap_or_else(|e| bail(e));
            println!("Created config at {}", path.display());
            println!("Edit it to set a default state file, seed, or output format.");
        }
    }
}

fn run_rank(args: RankArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let engine_config = EngineConfig {
        seed: args.seed.or(cfg.seed),
    };
    let json = args.json || cfg.json.unwrap_or(false);
    let state_file = cfg.state_file.map(PathBuf::from);
    let has_items = args.items.is_some() || !args.inline_items.is_empty();
    let plan = plan_session(
        args.resume.as_deref(),
        has_items,
        args.save.as_deref(),
        state_file.as_deref(),
    )
    .unwrap_or_else(|e| bail(e));
    let save_path = plan.save_to;

    let mut engine = match plan.load_from {
        Some(ref path) => load_state(path, engine_config),
        None => {
            let items = load_items(&args);
            RankingEngine::new(&items, engine_config).unwrap_or_else(|e| bail(e))
        }
    };

    tracing::info!(
        items = engine.num_items(),
        comparisons = engine.state().comparison_count(),
        "starting session"
    );
    eprintln!("Ranking {} items. Answer 1 or 2; ? for help.", engine.num_items());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let end = run_session(&mut engine, stdin.lock(), &mut out)
        .unwrap_or_else(|e| bail(format!("Terminal I/O failed: {e}")));

    if let Some(ref path) = save_path {
        save_state(path, &engine);
    }

    write_session_end(&mut out, &engine, end, json)
        .unwrap_or_else(|e| bail(format!("Failed to write output: {e}")));
    if end == SessionEnd::Quit {
        match save_path {
            Some(path) => eprintln!("Stopped. Resume with: pairrank rank --resume {}", path.display()),
            None => eprintln!("Stopped without saving. Pass --save <file> to keep progress."),
        }
    }
}

fn run_show(args: ShowArgs) {
    let engine = load_state(&args.state, EngineConfig::default());
    let mut out = io::stdout().lock();
    output::write_result(&mut out, &engine.ranking(), &engine.status(), engine.phase(), args.json)
        .unwrap_or_else(|e| bail(format!("Failed to write output: {e}")));
}
