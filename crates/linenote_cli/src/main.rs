//! Command-line front end for linenote notes.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use linenote_core::{Config, Document, EditingSession, Line, ScriptStep};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lnote", about = "linenote note editor CLI", version)]
struct Cli {
    /// Spaces a leading tab expands to (overrides LINENOTE_INDENT_WIDTH)
    #[arg(long, global = true)]
    indent_width: Option<usize>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how each line of a note is classified
    Inspect { file: PathBuf },
    /// Print the editable draft text of a note
    Draft { file: PathBuf },
    /// Print the text that would be persisted for a note
    FileText { file: PathBuf },
    /// Create a note from the configured template
    New {
        title: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },
    /// Apply edit steps (e.g. `goto:1:0 insert:text undo`) to a note
    Replay {
        file: PathBuf,
        #[arg(required = true)]
        steps: Vec<String>,
        /// Write the result back instead of printing it
        #[arg(short, long)]
        write: bool,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("linenote_core=warn,lnote=info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn resolve_config(indent_width: Option<usize>) -> anyhow::Result<Config> {
    let mut config = Config::from_env();
    if let Some(width) = indent_width {
        config.indent_width = width;
    }
    config.validate()?;
    Ok(config)
}

fn read_note(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn line_kind(line: &Line) -> String {
    if line.is_format_needed {
        "raw".to_string()
    } else if let Some(level) = line.heading_level() {
        format!("h{}", level)
    } else {
        "text".to_string()
    }
}

fn format_inspect_output(document: &Document, json: bool) -> Result<String, String> {
    if json {
        return serde_json::to_string_pretty(document.lines())
            .map_err(|err| format!("response encoding error: {}", err));
    }

    let rows = document
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| {
            format!(
                "{:>4} {:<5} {:>3} {:?}",
                index,
                line_kind(line),
                line.indentation,
                line.content()
            )
        })
        .collect::<Vec<_>>();
    Ok(rows.join("\n"))
}

fn parse_steps(raw: &[String]) -> anyhow::Result<Vec<ScriptStep>> {
    raw.iter()
        .map(|step| step.parse::<ScriptStep>().map_err(anyhow::Error::from))
        .collect()
}

fn replay(source: &str, steps: &[ScriptStep], config: Config) -> anyhow::Result<EditingSession> {
    let mut session = EditingSession::load_document(source, config)?.with_status_sink(
        |message: &str| tracing::info!("{}", message),
    );
    for step in steps {
        session.run_step(step)?;
    }
    Ok(session)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.indent_width)?;
    match cli.command {
        Commands::Inspect { file } => {
            let document = Document::parse(&read_note(&file)?, config.indent_width);
            let output = match format_inspect_output(&document, cli.json) {
                Ok(output) => output,
                Err(message) => bail!(message),
            };
            println!("{}", output);
        }
        Commands::Draft { file } => {
            let session = EditingSession::load_document(&read_note(&file)?, config)?;
            println!("{}", session.draft_text());
        }
        Commands::FileText { file } => {
            let session = EditingSession::load_document(&read_note(&file)?, config)?;
            print!("{}", session.file_text());
        }
        Commands::New {
            title,
            output,
            force,
        } => {
            let session = EditingSession::new_note(&title, config)?;
            match output {
                Some(path) => {
                    if path.exists() && !force {
                        bail!("{} already exists (use --force to overwrite)", path.display());
                    }
                    std::fs::write(&path, session.file_text())
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!("Created {}", path.display());
                }
                None => print!("{}", session.file_text()),
            }
        }
        Commands::Replay { file, steps, write } => {
            let steps = parse_steps(&steps)?;
            let mut session = replay(&read_note(&file)?, &steps, config)?;
            if !write {
                print!("{}", session.file_text());
            } else if session.is_dirty() {
                std::fs::write(&file, session.file_text())
                    .with_context(|| format!("failed to write {}", file.display()))?;
                session.mark_persisted();
                tracing::info!("Saved {}", file.display());
            } else {
                tracing::info!("No changes to save");
            }
        }
    }
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("lnote: {:#}", err);
        std::process::exit(1);
    }
}
