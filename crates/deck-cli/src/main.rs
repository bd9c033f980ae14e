#![forbid(unsafe_code)]

mod cmd;
mod guard;
mod output;

use std::env;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use deck_core::config;
use deck_core::error::ErrorCode;
use deck_remote::{RestBackend, SessionCache};
use output::{CliError, OutputMode, render_error, resolve_output_mode};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "dk: project/task board with a shared remote backend",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Session",
        about = "Sign in with email and password",
        long_about = "Sign in against the remote backend and cache the session locally.",
        after_help = "EXAMPLES:\n    # Sign in (prompts for the password)\n    dk login --email you@example.com\n\n    # Non-interactive sign in\n    DECK_PASSWORD=... dk login --email you@example.com"
    )]
    Login(cmd::login::LoginArgs),

    #[command(
        next_help_heading = "Session",
        about = "Discard the cached session",
        after_help = "EXAMPLES:\n    # Sign out\n    dk logout"
    )]
    Logout,

    #[command(
        next_help_heading = "Session",
        about = "Show the signed-in user",
        after_help = "EXAMPLES:\n    # Who am I?\n    dk whoami\n\n    # Emit machine-readable output\n    dk whoami --json"
    )]
    Whoami,

    #[command(
        next_help_heading = "Read",
        about = "List projects with task counts",
        long_about = "List all projects with per-status task counts.",
        after_help = "EXAMPLES:\n    # List projects\n    dk list\n\n    # Emit machine-readable output\n    dk list --json"
    )]
    List,

    #[command(
        next_help_heading = "Read",
        about = "Show one project's tasks by status",
        long_about = "Show a single project's tasks grouped into status columns.",
        after_help = "EXAMPLES:\n    # Show by name\n    dk show \"Launch\"\n\n    # Show by id\n    dk show 3"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Write",
        about = "Create a new project",
        after_help = "EXAMPLES:\n    # Create a project\n    dk create --name \"Launch\"\n\n    # Emit machine-readable output\n    dk create --name \"Launch\" --json"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Write",
        about = "Delete a project and its tasks",
        long_about = "Delete a project: its task rows first, then the project itself.",
        after_help = "EXAMPLES:\n    # Delete by name\n    dk delete \"Launch\"\n\n    # Delete by id\n    dk delete 3"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Write",
        about = "Add or remove tasks on a project",
        after_help = "EXAMPLES:\n    # Add a task (starts in Todo)\n    dk task add \"Design the landing page\" --project Launch\n\n    # Remove a task\n    dk task rm \"Design the landing page\" --project Launch"
    )]
    Task {
        #[command(subcommand)]
        command: cmd::task::TaskCommand,
    },

    #[command(
        next_help_heading = "Write",
        about = "Advance a task to its next status",
        long_about = "Advance a task one step: Todo, then In Progress, then Done, then back to Todo.",
        after_help = "EXAMPLES:\n    # Move a task forward\n    dk move \"Design the landing page\" --project Launch"
    )]
    Move(cmd::move_cmd::MoveArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    dk completions bash\n\n    # Generate zsh completions\n    dk completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DECK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "deck=debug,info"
        } else {
            "deck=info,warn"
        })
    });

    let format = env::var("DECK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn remote_config(output: OutputMode) -> anyhow::Result<config::RemoteConfig> {
    config::resolve_remote_config().map_err(|err| {
        let code = ErrorCode::NotConfigured;
        let cli = CliError::with_details(
            format!("{err:#}"),
            code.hint().unwrap_or_default(),
            code.code(),
        );
        if let Err(render_err) = render_error(output, &cli) {
            return render_err;
        }
        anyhow::anyhow!("{}", cli.message)
    })
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }
    let output = resolve_output_mode(cli.json);

    // Completions need no remote at all.
    if let Commands::Completions(args) = &cli.command {
        return cmd::completions::run_completions(args.shell, &mut Cli::command());
    }

    let config = remote_config(output)?;
    let cache_path = config::session_cache_path().context("no user data directory")?;
    let cache = SessionCache::new(cache_path);
    let backend = RestBackend::new(config, cache.clone());

    match cli.command {
        Commands::Login(ref args) => cmd::login::run_login(args, &backend, output),
        Commands::Logout => cmd::logout::run_logout(&cache, output),
        Commands::Whoami => cmd::whoami::run_whoami(&backend, output),
        Commands::List => cmd::list::run_list(backend, output),
        Commands::Show(ref args) => cmd::show::run_show(args, backend, output),
        Commands::Create(ref args) => cmd::create::run_create(args, backend, output),
        Commands::Delete(ref args) => cmd::delete::run_delete(args, backend, output),
        Commands::Task { ref command } => cmd::task::run_task(command, backend, output),
        Commands::Move(ref args) => cmd::move_cmd::run_move(args, backend, output),
        Commands::Completions(_) => unreachable!("handled above"),
    }
}
