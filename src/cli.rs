//! Command-line interface for spectate.
//!
//! Flags override the configuration file and `--query`, which in turn
//! override built-in defaults.

use crate::channels;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spectate_config::{Config, LayoutFamily, LogLevel};
use std::path::PathBuf;
use std::time::Duration;

/// spectate - multi-stream viewer with keyboard-driven focus and audio
#[derive(Parser)]
#[command(name = "spectate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (default: ~/.config/spectate/config.yaml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Page-style query string, e.g. "channels=twitch:a,twitch:b&layout=both"
    #[arg(long, value_name = "QUERY", global = true)]
    pub query: Option<String>,

    /// Comma-separated channel tokens
    #[arg(long, value_name = "TOKENS", global = true)]
    pub channels: Option<String>,

    /// Layout family: duo or grid
    #[arg(long, value_name = "FAMILY", global = true)]
    pub family: Option<String>,

    /// Initial layout mode (focus, both, grid)
    #[arg(long, value_name = "MODE", global = true)]
    pub layout: Option<String>,

    /// "0" starts players unmuted
    #[arg(long, value_name = "0|1", global = true)]
    pub muted: Option<String>,

    /// Embedding domain passed to Twitch
    #[arg(long, value_name = "HOST", global = true)]
    pub parent: Option<String>,

    /// Seconds between automatic focus changes (0 disables)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub cycle: Option<u64>,

    /// Initially focused stream index
    #[arg(long, value_name = "INDEX", global = true)]
    pub start: Option<usize>,

    /// Log level for the debug log (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the parsed stream list as JSON
    Parse,
    /// Print the initial page as HTML
    Render,
    /// Run an interactive session reading keys and control messages from stdin
    Run {
        /// Rewrite this file with the page after every change
        #[arg(long, value_name = "PATH")]
        html_out: Option<PathBuf>,

        /// Exit after the specified number of seconds
        #[arg(long, value_name = "SECONDS")]
        exit_after: Option<f64>,

        /// Print the view as JSON after every change
        #[arg(long)]
        echo: bool,
    },
    /// Write the effective configuration to the config file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

/// What the binary should do after argument processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Parse,
    Render,
    Run {
        html_out: Option<PathBuf>,
        exit_after: Option<Duration>,
        echo: bool,
    },
    Init {
        force: bool,
    },
}

/// Runtime options passed from CLI to the application
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub mode: Mode,
    pub config_path: Option<PathBuf>,
    /// Log level from `--log-level`, if given
    pub log_level: Option<LogLevel>,
    cli: CliOverrides,
}

/// Option values given on the command line, applied over the config file.
#[derive(Debug, Clone, Default)]
struct CliOverrides {
    query: Option<String>,
    options: Vec<(&'static str, String)>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with the selected mode
    Continue(RuntimeOptions),
    /// Exit with the given code
    Exit(i32),
}

/// Process CLI arguments
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();
    match runtime_options(cli) {
        Ok(options) => CliResult::Continue(options),
        Err(e) => {
            eprintln!("spectate: {e:#}");
            CliResult::Exit(2)
        }
    }
}

fn runtime_options(cli: Cli) -> Result<RuntimeOptions> {
    let log_level = cli
        .log_level
        .as_deref()
        .map(|raw| {
            LogLevel::parse(raw).with_context(|| format!("Invalid --log-level '{raw}'"))
        })
        .transpose()?;
    if let Some(family) = cli.family.as_deref()
        && LayoutFamily::parse(family).is_none()
    {
        anyhow::bail!("Invalid --family '{family}' (expected duo or grid)");
    }

    let mode = match cli.command {
        Some(Commands::Parse) => Mode::Parse,
        Some(Commands::Render) => Mode::Render,
        Some(Commands::Run {
            html_out,
            exit_after,
            echo,
        }) => Mode::Run {
            html_out,
            exit_after: exit_after
                .filter(|secs| *secs > 0.0)
                .map(|secs| {
                    Duration::try_from_secs_f64(secs)
                        .with_context(|| format!("Invalid --exit-after '{secs}'"))
                })
                .transpose()?,
            echo,
        },
        Some(Commands::Init { force }) => Mode::Init { force },
        None => Mode::Run {
            html_out: None,
            exit_after: None,
            echo: false,
        },
    };

    let options = [
        ("channels", cli.channels),
        ("family", cli.family),
        ("layout", cli.layout),
        ("muted", cli.muted),
        ("parent", cli.parent),
        ("cycle", cli.cycle.map(|c| c.to_string())),
        ("start", cli.start.map(|s| s.to_string())),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.map(|v| (name, v)))
    .collect();

    Ok(RuntimeOptions {
        mode,
        config_path: cli.config,
        log_level,
        cli: CliOverrides {
            query: cli.query,
            options,
        },
    })
}

impl RuntimeOptions {
    /// Options for `mode` with no config file and no overrides.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            config_path: None,
            log_level: None,
            cli: CliOverrides::default(),
        }
    }

    /// Load the config file and layer the query string and flags over it.
    pub fn load_config(&self) -> Result<Config> {
        let config = match &self.config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply_overrides(config)
    }

    /// `spectate init`: save defaults plus the query string and flags to
    /// the config file. Returns the path written.
    pub fn write_config(&self, force: bool) -> Result<PathBuf> {
        let path = self.config_path.clone().unwrap_or_else(Config::config_path);
        if path.exists() && !force {
            anyhow::bail!("{} already exists (use --force to replace it)", path.display());
        }
        let config = self.apply_overrides(Config::default())?;
        config
            .save_to(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote config to {:?}", path);
        Ok(path)
    }

    /// Layer the query string, then the flags, over `config`.
    pub fn apply_overrides(&self, mut config: Config) -> Result<Config> {
        if let Some(query) = &self.cli.query {
            let applied = config.apply_query(query);
            log::debug!("Applied {} option(s) from query string", applied);
        }
        for (name, value) in &self.cli.options {
            config
                .set_option(name, value)
                .with_context(|| format!("Invalid --{name}"))?;
        }
        Ok(config)
    }
}

/// `spectate parse`: one JSON object per stream, rejected tokens on stderr.
pub fn print_streams(config: &Config) -> Result<()> {
    let outcome = channels::parse_with_diagnostics(&config.channels);
    for descriptor in &outcome.descriptors {
        println!("{}", serde_json::to_string(descriptor)?);
    }
    for rejected in &outcome.rejected {
        eprintln!("skipped: {rejected}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(args: &[&str]) -> RuntimeOptions {
        let mut argv = vec!["spectate"];
        argv.extend_from_slice(args);
        runtime_options(Cli::parse_from(argv)).unwrap()
    }

    #[test]
    fn test_default_mode_is_run() {
        let opts = options(&[]);
        assert_eq!(
            opts.mode,
            Mode::Run {
                html_out: None,
                exit_after: None,
                echo: false
            }
        );
    }

    #[test]
    fn test_flags_override_query() {
        let opts = options(&[
            "render",
            "--query",
            "channels=twitch:a&layout=both&start=1",
            "--layout",
            "focus",
        ]);
        assert_eq!(opts.mode, Mode::Render);
        let config = opts.apply_overrides(Config::default()).unwrap();
        assert_eq!(config.channels, "twitch:a");
        assert_eq!(config.layout.as_deref(), Some("focus"));
        assert_eq!(config.start, 1);
    }

    #[test]
    fn test_muted_flag() {
        let config = options(&["--muted", "0"])
            .apply_overrides(Config::default())
            .unwrap();
        assert!(!config.muted);
    }

    #[test]
    fn test_run_options() {
        let opts = options(&["run", "--exit-after", "1.5", "--echo"]);
        assert_eq!(
            opts.mode,
            Mode::Run {
                html_out: None,
                exit_after: Some(Duration::from_millis(1500)),
                echo: true
            }
        );
    }

    #[test]
    fn test_bad_flags_rejected() {
        assert!(runtime_options(Cli::parse_from(["spectate", "--log-level", "loud"])).is_err());
        assert!(runtime_options(Cli::parse_from(["spectate", "--family", "pyramid"])).is_err());
    }

    #[test]
    fn test_exit_after_out_of_range_rejected() {
        let parse = |value: &str| {
            runtime_options(Cli::parse_from(["spectate", "run", "--exit-after", value]))
        };
        assert!(parse("inf").is_err());
        assert!(parse("1e300").is_err());
        assert_eq!(
            parse("0").unwrap().mode,
            Mode::Run {
                html_out: None,
                exit_after: None,
                echo: false
            }
        );
    }

    #[test]
    fn test_init_writes_layered_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("spectate").join("config.yaml");
        let path_arg = path.to_string_lossy().to_string();
        let opts = options(&[
            "init",
            "--config",
            path_arg.as_str(),
            "--channels",
            "twitch:a,twitch:b",
            "--cycle",
            "20",
        ]);
        assert_eq!(opts.mode, Mode::Init { force: false });

        assert_eq!(opts.write_config(false).unwrap(), path);
        let written = Config::load_from(&path).unwrap();
        assert_eq!(written.channels, "twitch:a,twitch:b");
        assert_eq!(written.cycle, 20);

        assert!(opts.write_config(false).is_err());
        assert!(opts.write_config(true).is_ok());
    }

    #[test]
    fn test_log_level_parsed() {
        assert_eq!(options(&["--log-level", "debug"]).log_level, Some(LogLevel::Debug));
    }
}
