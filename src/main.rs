use anyhow::Result;
use appvcs::AppRegistry;
use appvcs::artifacts::objects::identity::CommitIdentities;
use appvcs::config::StoreConfig;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "appvcs=info";

#[derive(Parser)]
#[command(
    name = "appvcs",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A version-controlled store for editor projects",
    long_about = "Every project lives in its own repository under the projects directory. \
    All repository work is delegated to the git executable.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(flatten)]
    config: StoreConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "status",
        about = "Show the working tree status of a project",
        long_about = "This command prints one line per changed path with its two-character status code."
    )]
    Status {
        #[arg(index = 1, help = "The project name")]
        project: String,
    },
    #[command(
        name = "commit",
        about = "Stage everything and record a new commit",
        long_about = "This command stages the whole working tree of a project and commits it on top of HEAD. \
        Author and committer default to the GIT_AUTHOR_* and GIT_COMMITTER_* variables."
    )]
    Commit {
        #[arg(index = 1, help = "The project name")]
        project: String,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "log",
        about = "Show the commit history of a project",
        long_about = "This command prints the first-parent history of HEAD, newest first."
    )]
    Log {
        #[arg(index = 1, help = "The project name")]
        project: String,
    },
    #[command(
        name = "show",
        about = "Print a file as it was at a revision",
        long_about = "This command writes the content of a file at the given revision to standard output."
    )]
    Show {
        #[arg(index = 1, help = "The project name")]
        project: String,
        #[arg(index = 2, help = "Full or abbreviated commit id")]
        revision: String,
        #[arg(index = 3, help = "Path of the file inside the project")]
        path: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = AppRegistry::new(cli.config);

    match &cli.command {
        Commands::Status { project } => {
            for (path, code) in registry.status(project).await? {
                println!("{} {}", code.colored(), path);
            }
        }
        Commands::Commit { project, message } => {
            let commit = registry
                .commit(project, message.clone(), CommitIdentities::from_env())
                .await?;
            println!("{}", commit);
        }
        Commands::Log { project } => {
            for commit in registry.history(project).await? {
                println!(
                    "{} {} {} {}",
                    commit.oid().to_short_oid().yellow(),
                    commit.author().display_name(),
                    commit.timestamp().format("%Y-%m-%d %H:%M:%S"),
                    commit.short_message()
                );
            }
        }
        Commands::Show {
            project,
            revision,
            path,
        } => {
            let content = registry
                .resolve_historical_content(project, revision, path)
                .await?;
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&content.bytes).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
