//! Workdeck CLI
//!
//! Operator surface for the workflow activation core: list the workflows
//! available to a workspace, inspect a session's workflow metadata, and
//! activate a workflow on a session.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use console::style;

use workdeck::activation::ActivationCoordinator;
use workdeck::catalog::WorkflowCatalog;
use workdeck::client::HttpSessionApi;
use workdeck::notify::Notifier;
use workdeck::Selection;
use workdeck_protocol::SessionPhase;

#[derive(Parser)]
#[command(name = "workdeck")]
#[command(about = "Workdeck - workflow activation for agentic sessions")]
#[command(version)]
struct Cli {
    /// Session service base URL
    #[arg(
        long,
        env = "WORKDECK_SERVER_URL",
        default_value = "http://localhost:8080"
    )]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage workflows
    Workflows {
        #[command(subcommand)]
        command: WorkflowsCommand,
    },

    /// Inspect sessions
    Sessions {
        #[command(subcommand)]
        command: SessionsCommand,
    },
}

#[derive(Subcommand)]
enum WorkflowsCommand {
    /// List workflows available to a workspace
    List {
        /// Workspace id
        #[arg(long, short)]
        workspace: String,
    },

    /// Activate a workflow on a session
    Activate {
        /// Workspace id
        #[arg(long, short)]
        workspace: String,

        /// Session name
        #[arg(long, short)]
        session: String,

        /// Catalog workflow id
        #[arg(long, conflicts_with = "git_url")]
        id: Option<String>,

        /// Git URL for a custom workflow
        #[arg(long)]
        git_url: Option<String>,

        /// Branch for a custom workflow (defaults to main)
        #[arg(long, default_value = "")]
        branch: String,

        /// Path inside the repository for a custom workflow
        #[arg(long, default_value = "")]
        path: String,

        /// Current session phase; omit to queue until the session is Running
        #[arg(long)]
        phase: Option<String>,
    },
}

#[derive(Subcommand)]
enum SessionsCommand {
    /// Show a session's workflow metadata
    Workflow {
        /// Workspace id
        #[arg(long, short)]
        workspace: String,

        /// Session name
        #[arg(long, short)]
        session: String,
    },
}

/// Notifier that styles coordinator messages for the terminal.
#[derive(Clone, Copy, Default)]
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("{} {}", style("ok").green().bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", style("error").red().bold(), message);
    }

    fn activated(&self) {}
}

fn parse_phase(value: &str) -> anyhow::Result<SessionPhase> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .with_context(|| format!("unknown session phase: {value}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    workdeck::logging::init_logging();

    let cli = Cli::parse();
    let api = HttpSessionApi::new(&cli.server);

    match cli.command {
        Commands::Workflows { command } => match command {
            WorkflowsCommand::List { workspace } => {
                let catalog = WorkflowCatalog::new(api);
                let workflows = catalog.list_workflows(&workspace).await?;
                if workflows.is_empty() {
                    println!("No workflows available");
                    return Ok(());
                }
                for wf in workflows {
                    let marker = if wf.enabled {
                        style("enabled").green()
                    } else {
                        style("disabled").dim()
                    };
                    println!("{}  {}  [{}]", style(&wf.id).bold(), wf.name, marker);
                }
            }

            WorkflowsCommand::Activate {
                workspace,
                session,
                id,
                git_url,
                branch,
                path,
                phase,
            } => {
                let phase = phase.as_deref().map(parse_phase).transpose()?;
                let mut coord = ActivationCoordinator::new(
                    &workspace,
                    &session,
                    api.clone(),
                    ConsoleNotifier,
                );

                match (id, git_url) {
                    (Some(id), None) => {
                        let catalog = WorkflowCatalog::new(api);
                        let workflows = catalog.list_workflows(&workspace).await?;
                        match coord.select_workflow(&id, &workflows) {
                            Selection::Workflow(_) => {}
                            Selection::Custom => {
                                bail!("use --git-url to activate a custom workflow")
                            }
                            // Rejection already went to the notifier
                            Selection::None => std::process::exit(1),
                        }
                    }
                    (None, Some(url)) => coord.set_custom_workflow(&url, &branch, &path),
                    _ => bail!("exactly one of --id or --git-url is required"),
                }

                let ok = coord.activate_workflow(None, phase).await;
                if !ok {
                    std::process::exit(1);
                }
                // The queue lives only as long as this process; there is no
                // replay after exit, so tell the operator to come back.
                if coord.state().queued_workflow.is_some() {
                    println!(
                        "{} session {} is not running; re-run this command once it is",
                        style("deferred").yellow().bold(),
                        session
                    );
                }
            }
        },

        Commands::Sessions { command } => match command {
            SessionsCommand::Workflow { workspace, session } => {
                let catalog = WorkflowCatalog::new(api);
                let meta = catalog
                    .session_metadata(&workspace, &session, true)
                    .await?
                    .unwrap_or_default();
                println!("{}", serde_json::to_string_pretty(&meta)?);
            }
        },
    }

    Ok(())
}
