use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use eula_diff::{Comparison, Config, EulaDiffError, OutputFormat, classify_line};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "eula-diff")]
#[command(about = "Render version-to-version comparisons of license agreements")]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a comparison document (e.g., eula-diff render comparison.md)
    Render {
        /// Comparison payload file; reads stdin when absent or "-"
        input: Option<PathBuf>,
        /// Output format (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Treat the input as a JSON API response
        #[arg(long)]
        json: bool,
        /// Disable colors in terminal output
        #[arg(long)]
        no_color: bool,
        /// Config file (defaults to ./eula-diff.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Classify diff lines (e.g., eula-diff classify "-old" "+new")
    Classify {
        /// Lines to classify
        lines: Vec<String>,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
    /// Print a man page
    Man,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Render {
            input,
            format,
            json,
            no_color,
            config,
        } => {
            let mut config = Config::load(config.as_deref())?;
            if let Some(format) = format {
                config.format = format;
            }
            if no_color || !io::stdout().is_terminal() {
                config.color = false;
            }

            let payload = read_input(input.as_deref())?;
            let comparison = if json {
                Comparison::from_json_str(&payload)?
            } else {
                Comparison::from_raw(&payload)
            };
            if comparison.is_empty() {
                log::warn!("comparison document has no content");
            }

            print!("{}", comparison.render(config.renderer().as_ref())?);
        }
        Commands::Classify { lines } => {
            for line in &lines {
                let parsed = classify_line(line);
                println!("{}\t{}", parsed.kind.as_str(), parsed.content);
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "eula-diff", &mut io::stdout());
        }
        Commands::Man => {
            clap_mangen::Man::new(Cli::command()).render(&mut io::stdout())?;
        }
    }

    Ok(())
}

/// Read the payload from a file, or from stdin for `None` and `-`
fn read_input(input: Option<&Path>) -> Result<String, EulaDiffError> {
    match input {
        Some(path) if path != Path::new("-") => {
            log::debug!("reading payload from {}", path.display());
            fs::read_to_string(path).map_err(|e| EulaDiffError::ReadInput {
                source_name: path.display().to_string(),
                message: e.to_string(),
            })
        }
        _ => io::read_to_string(io::stdin()).map_err(|e| EulaDiffError::ReadInput {
            source_name: "stdin".to_string(),
            message: e.to_string(),
        }),
    }
}
