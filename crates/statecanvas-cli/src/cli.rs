//! Command-line interface for the statecanvas editor
//!
//! Replays scripted pointer sessions against the editor core, writes the
//! PNG export and optionally the final live surface as SVG.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::session::{parse_session, ReplayReport, SessionRunner};
use statecanvas::automaton::Editor;
use statecanvas::render::SvgSurface;
use statecanvas::{EditorOptions, Mode, RenderConfig};

/// Statecanvas - build finite-state diagrams from scripted sessions
#[derive(Parser)]
#[command(name = "statecanvas")]
#[command(about = "Replay automaton editing sessions and export PNG diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Log level and format, with environment variables taking precedence
    pub fn logging(&self) -> (String, String) {
        let level = std::env::var("STATECANVAS_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| self.log_level.as_str().to_string());
        let format = std::env::var("STATECANVAS_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| self.log_format.as_str().to_string());
        (level, format)
    }
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Canvas and editor settings shared by the session commands
#[derive(Args, Debug, Clone, PartialEq)]
pub struct CanvasArgs {
    /// Live canvas width
    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    /// Live canvas height
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,

    /// State circle radius
    #[arg(long, default_value_t = 30.0)]
    pub radius: f64,

    /// Ask for a name whenever a state is created
    #[arg(long)]
    pub custom_names: bool,

    /// Make the first state of an empty diagram initial
    #[arg(long)]
    pub mark_first_initial: bool,
}

impl CanvasArgs {
    fn editor(&self) -> Editor<SvgSurface> {
        let options = EditorOptions {
            custom_names: self.custom_names,
            mark_first_initial: self.mark_first_initial,
        };
        Editor::with_config(
            SvgSurface::new(self.width, self.height),
            RenderConfig::with_radius(self.radius),
            options,
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a session script and export the result
    Run {
        /// Session script (use - for stdin)
        #[arg(short, long)]
        script: PathBuf,

        /// Directory receiving automata.png on every export step
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Write the final live canvas as SVG
        #[arg(long)]
        svg: Option<PathBuf>,

        #[command(flatten)]
        canvas: CanvasArgs,
    },

    /// Replay a session script and print the model as JSON
    Inspect {
        /// Session script (use - for stdin)
        #[arg(short, long)]
        script: PathBuf,

        #[command(flatten)]
        canvas: CanvasArgs,
    },

    /// List editor modes
    Modes {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Main CLI application
#[derive(Debug, Default)]
pub struct StatecanvasApp;

impl StatecanvasApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        if cli.verbose {
            eprintln!("Statecanvas v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Run {
                script,
                out_dir,
                svg,
                canvas,
            } => self
                .run_command(&script, out_dir, svg, &canvas, cli.verbose)
                .map(|_| ()),
            Commands::Inspect { script, canvas } => {
                let json = self.inspect_command(&script, &canvas)?;
                println!("{}", json);
                Ok(())
            }
            Commands::Modes { json } => {
                println!("{}", self.modes_command(json)?);
                Ok(())
            }
        }
    }

    /// Handle the run command
    fn run_command(
        &self,
        script: &Path,
        out_dir: Option<PathBuf>,
        svg: Option<PathBuf>,
        canvas: &CanvasArgs,
        verbose: bool,
    ) -> Result<ReplayReport> {
        let (report, editor) = self.replay(script, canvas, out_dir)?;

        if let Some(path) = svg {
            fs::write(&path, editor.surface().to_svg())
                .with_context(|| format!("Failed to write SVG file '{}'", path.display()))?;
            info!(path = %path.display(), "Wrote live canvas");
        }

        if verbose {
            eprintln!(
                "Replayed {} steps ({} redraws): {} states, {} transitions, {} exports, {} empty",
                report.steps,
                report.redraws,
                editor.model().state_count(),
                editor.model().transition_count(),
                report.exports.len(),
                report.empty_exports
            );
        }
        for path in &report.exports {
            println!("{}", path.display());
        }
        Ok(report)
    }

    /// Handle the inspect command
    fn inspect_command(&self, script: &Path, canvas: &CanvasArgs) -> Result<String> {
        let (_, editor) = self.replay(script, canvas, None)?;
        Ok(serde_json::to_string_pretty(editor.model())?)
    }

    /// Handle the modes command
    fn modes_command(&self, json: bool) -> Result<String> {
        if json {
            let modes: Vec<_> = Mode::all()
                .iter()
                .map(|mode| {
                    serde_json::json!({
                        "name": mode.as_str(),
                        "cursor": mode.idle_cursor().to_string(),
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&modes)?);
        }

        let mut out = String::from("Editor modes:\n");
        for mode in Mode::all() {
            out.push_str(&format!("  {:<14} ({})\n", mode.as_str(), mode.idle_cursor()));
        }
        Ok(out.trim_end().to_string())
    }

    fn replay(
        &self,
        script: &Path,
        canvas: &CanvasArgs,
        out_dir: Option<PathBuf>,
    ) -> Result<(ReplayReport, Editor<SvgSurface>)> {
        let source = self.read_input(script)?;
        let steps = parse_session(&source)
            .map_err(|e| anyhow!("Invalid session '{}': {}", script.display(), e))?;

        let mut runner = SessionRunner::new(canvas.editor());
        if let Some(dir) = out_dir {
            runner = runner.with_out_dir(dir);
        }
        let report = runner.run(&steps)?;
        Ok((report, runner.into_editor()))
    }

    /// Read input from file or stdin
    pub fn read_input(&self, path: &Path) -> Result<String> {
        if path.to_string_lossy() == "-" {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(content)
        } else {
            fs::read_to_string(path)
                .map_err(|e| anyhow!("Failed to read script '{}': {}", path.display(), e))
        }
    }
}
