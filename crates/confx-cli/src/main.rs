mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "confx", about = "Generate multi-stage Dockerfiles for Go services")]
#[command(version)]
struct Cli {
    /// Project directory containing confx.toml
    #[arg(long, short = 'C', global = true, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated Dockerfile to stdout
    Render,
    /// Write the generated Dockerfile to disk
    Write {
        /// Output path (default: <dir>/Dockerfile)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Create a commented confx.toml in the project directory
    Init,
}

fn main() -> anyhow::Result<()> {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(e) => {
            if std::env::var_os("RUST_LOG").is_some() {
                eprintln!("ignoring invalid RUST_LOG: {e}");
            }
            tracing_subscriber::EnvFilter::new("info")
        }
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render => commands::render(&cli.dir)?,
        Commands::Write { output, force } => commands::write(&cli.dir, output, force)?,
        Commands::Init => commands::init(&cli.dir)?,
    }

    Ok(())
}
