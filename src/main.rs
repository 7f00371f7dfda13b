//! tokenpad CLI - design-token playground
//!
//! Usage: tokenpad [--root <DIR>] <COMMAND>
//!
//! Commands:
//!   init    Write the starter project
//!   tree    Show the input/output partition
//!   build   Run the token pipeline once
//!   check   Tell whether a change to a path would rebuild
//!   watch   Rebuild continuously on input changes
//!   clear   Remove everything except the pipeline config
//!   export  Print a project snapshot
//!   import  Restore a project snapshot

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use tokenpad::application::decision::{decide, Change};
use tokenpad::application::{export_snapshot, import_snapshot};
use tokenpad::config::{Settings, Verbosity};
use tokenpad::domain::ports::VirtualFs;
use tokenpad::{
    BasicPipeline, BuildConfig, BuildSetTracker, FilePath, LocalFs, PlaygroundSession,
    RebuildDecision, RebuildReason, SessionEvent, WatchOptions,
};

/// tokenpad - design-token playground
#[derive(Parser, Debug)]
#[command(name = "tokenpad")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the starter config and token files (skipped if a config exists)
    Init,

    /// Show which files are inputs and which are outputs
    Tree,

    /// Clean previous outputs and run the token pipeline
    Build,

    /// Tell whether a change to PATH would trigger a rebuild
    Check {
        /// Project-relative path (leading slashes allowed)
        path: String,

        /// The change concerns a folder
        #[arg(long)]
        folder: bool,
    },

    /// Build, then rebuild whenever an input changes
    Watch,

    /// Remove everything except the pipeline config
    Clear,

    /// Print the config and token sources as a JSON snapshot
    Export {
        /// Write the snapshot to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore a JSON snapshot into the project
    Import {
        /// Snapshot file
        file: PathBuf,
    },
}

/// Everything a command needs, resolved from flags and settings
struct RunContext {
    root: PathBuf,
    settings: Settings,
    config_path: FilePath,
    json: bool,
    verbosity: Verbosity,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = resolve(&cli)?;

    match cli.command {
        Commands::Init => cmd_init(&ctx),
        Commands::Tree => cmd_tree(&ctx),
        Commands::Build => cmd_build(&ctx),
        Commands::Check { path, folder } => cmd_check(&ctx, &path, folder),
        Commands::Watch => cmd_watch(&ctx),
        Commands::Clear => cmd_clear(&ctx),
        Commands::Export { output } => cmd_export(&ctx, output.as_deref()),
        Commands::Import { file } => cmd_import(&ctx, &file),
    }
}

fn resolve(cli: &Cli) -> Result<RunContext> {
    let (settings, warnings) = Settings::load_or_default(Some(cli.root.as_path()))?;
    if !cli.json {
        for warning in &warnings {
            let location = match warning.line {
                Some(line) => format!("{}:{}", warning.file.display(), line),
                None => warning.file.display().to_string(),
            };
            match &warning.suggestion {
                Some(suggestion) => eprintln!(
                    "warning: unknown key '{}' in {} (did you mean '{}'?)",
                    warning.key, location, suggestion
                ),
                None => eprintln!("warning: unknown key '{}' in {}", warning.key, location),
            }
        }
    }

    let config_path = FilePath::new(&settings.project.config_file)
        .with_context(|| format!("invalid config_file '{}'", settings.project.config_file))?;
    let verbosity = settings.output.verbosity.raised_by(cli.verbose);
    if !cli.json && verbosity == Verbosity::Debug {
        eprintln!(
            "[debug] config_file={} strategy={} debounce_ms={}",
            config_path,
            settings.watch.strategy,
            settings.watch.debounce_ms
        );
    }

    Ok(RunContext {
        root: cli.root.clone(),
        settings,
        config_path,
        json: cli.json,
        verbosity,
    })
}

fn session(ctx: &RunContext) -> PlaygroundSession<LocalFs, BasicPipeline> {
    PlaygroundSession::new(
        LocalFs::new(ctx.root.clone()),
        BasicPipeline::new(),
        ctx.config_path.clone(),
    )
    .with_strategy(ctx.settings.watch.strategy)
}

/// The config currently on disk, if it parses
fn disk_config(fs: &LocalFs, config_path: &FilePath) -> Option<BuildConfig> {
    let content = fs.read(config_path).ok()?;
    BuildConfig::parse(config_path.as_str(), &content).ok()
}

fn cmd_init(ctx: &RunContext) -> Result<()> {
    let session = session(ctx);
    let seeded = session.seed_default_project(&|event| emit(ctx, &event))?;
    if !ctx.json && !seeded {
        println!("{} already exists, nothing to do", ctx.config_path);
    }
    Ok(())
}

#[derive(Serialize)]
struct TreeReport {
    inputs: Vec<String>,
    outputs: Vec<String>,
}

fn cmd_tree(ctx: &RunContext) -> Result<()> {
    let fs = LocalFs::new(ctx.root.clone());
    let config = disk_config(&fs, &ctx.config_path);
    let tracker = BuildSetTracker::new(config.as_ref());
    let tree = tracker.partition(&fs.list()?);

    let report = TreeReport {
        inputs: tree.input_files.iter().map(ToString::to_string).collect(),
        outputs: tree.output_files.iter().map(ToString::to_string).collect(),
    };

    if ctx.json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    println!("Inputs:");
    for path in &report.inputs {
        println!("  {}", path);
    }
    println!("Outputs:");
    if report.outputs.is_empty() {
        println!("  (none)");
    }
    for path in &report.outputs {
        println!("  {}", path);
    }
    Ok(())
}

fn cmd_build(ctx: &RunContext) -> Result<()> {
    let mut session = session(ctx);
    let report = session.rebuild(RebuildReason::Requested, &|event| emit(ctx, &event))?;
    if !ctx.json && ctx.verbosity >= Verbosity::Verbose {
        for path in &report.written {
            println!("  → {}", path);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct CheckReport<'a> {
    path: &'a str,
    is_folder: bool,
    rebuild: bool,
    reason: Option<String>,
}

fn cmd_check(ctx: &RunContext, path: &str, folder: bool) -> Result<()> {
    let fs = LocalFs::new(ctx.root.clone());
    let config = disk_config(&fs, &ctx.config_path);
    let tree = BuildSetTracker::new(config.as_ref()).partition(&fs.list()?);

    let is_config = FilePath::new(path)
        .map(|p| p == ctx.config_path)
        .unwrap_or(false);
    let change = Change {
        path,
        is_folder: folder,
        is_config,
    };
    let decision = decide(ctx.settings.watch.strategy, change, &tree, &tree, None);

    let reason = match decision {
        RebuildDecision::Rebuild(reason) => Some(reason.to_string()),
        RebuildDecision::Skip => None,
    };
    if ctx.json {
        let report = CheckReport {
            path,
            is_folder: folder,
            rebuild: reason.is_some(),
            reason,
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        match reason {
            Some(reason) => println!("rebuild ({})", reason),
            None => println!("skip"),
        }
    }
    Ok(())
}

fn cmd_watch(ctx: &RunContext) -> Result<()> {
    let options = WatchOptions {
        root: ctx.root.clone(),
        config_file: ctx.config_path.clone(),
        strategy: ctx.settings.watch.strategy,
        debounce: ctx.settings.watch.debounce(),
    };

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    if !ctx.json {
        println!("Watching {} (Ctrl+C to stop)", ctx.root.display());
    }

    tokenpad::watch(options, running, |event| emit(ctx, &event))?;
    Ok(())
}

fn cmd_clear(ctx: &RunContext) -> Result<()> {
    let removed = session(ctx).clear_all()?;
    if ctx.json {
        println!("{}", serde_json::json!({ "event": "cleared", "removed": removed }));
    } else {
        println!("Removed {} entries, kept {}", removed, ctx.config_path);
    }
    Ok(())
}

fn cmd_export(ctx: &RunContext, output: Option<&Path>) -> Result<()> {
    let fs = LocalFs::new(ctx.root.clone());
    let snapshot = export_snapshot(&fs, &ctx.config_path)?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", snapshot))
                .with_context(|| format!("failed to write {}", path.display()))?;
            if !ctx.json {
                println!("Snapshot written to {}", path.display());
            }
        }
        None => println!("{}", snapshot),
    }
    Ok(())
}

fn cmd_import(ctx: &RunContext, file: &Path) -> Result<()> {
    let snapshot = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let fs = LocalFs::new(ctx.root.clone());
    let written = import_snapshot(&fs, &snapshot)?;
    if ctx.json {
        println!("{}", serde_json::json!({ "event": "imported", "written": written.len() }));
    } else {
        println!("Imported {} files", written.len());
        if ctx.verbosity >= Verbosity::Verbose {
            for path in &written {
                println!("  → {}", path);
            }
        }
    }
    Ok(())
}

/// Print one session event: NDJSON in `--json` mode, a text line otherwise
fn emit(ctx: &RunContext, event: &SessionEvent) {
    if ctx.json {
        println!("{}", event.to_json());
        return;
    }
    if let Some(line) = render_event(event, ctx.verbosity) {
        match event {
            SessionEvent::BuildFailed { .. } | SessionEvent::Error { .. } => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}

fn render_event(event: &SessionEvent, verbosity: Verbosity) -> Option<String> {
    let verbose = verbosity >= Verbosity::Verbose;
    let quiet = verbosity == Verbosity::Quiet;
    match event {
        SessionEvent::SessionStarted { root } if verbose => Some(format!("Session in {}", root)),
        SessionEvent::ProjectSeeded { config } if !quiet => {
            Some(format!("✓ Created starter project ({})", config))
        }
        SessionEvent::FileChanged { path, is_folder } if verbose => {
            let kind = if *is_folder { "folder" } else { "file" };
            Some(format!("  changed {} {}", kind, path))
        }
        SessionEvent::RebuildSkipped { path } if verbose => {
            Some(format!("  ○ {} is not an input, skipped", path))
        }
        SessionEvent::OutputsCleaned { removed } if verbose && *removed > 0 => {
            Some(format!("  removed {} previous outputs", removed))
        }
        SessionEvent::BuildStarted { reason } if !quiet => Some(format!("Building ({})...", reason)),
        SessionEvent::BuildComplete { platforms, written } if !quiet => Some(format!(
            "✓ Built {} platforms, {} files written",
            platforms, written
        )),
        SessionEvent::BuildFailed { message } => Some(format!("✗ Build failed: {}", message)),
        SessionEvent::Error { message } => Some(format!("✗ {}", message)),
        SessionEvent::Shutdown if !quiet => Some("Stopped watching".to_string()),
        _ if verbosity == Verbosity::Debug => Some(format!("  [debug] {}", event.to_json())),
        _ => None,
    }
}
