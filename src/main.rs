// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use citeclean::app_config::{self, Config};
use citeclean::app_controller::Controller;
use citeclean::clipboard::SystemClipboard;
use citeclean::file_utils::FileManager;
use citeclean::server;

/// Input path standing for standard input (pasted text)
const STDIN_PATH: &str = "-";

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remove citation markers from an HTML file, a folder or stdin (default command)
    Clean(CleanArgs),

    /// Count citation markers without changing anything
    Count(CountArgs),

    /// Write a before/after HTML report with highlighted markers
    Preview(PreviewArgs),

    /// Run the HTTP upload service
    Serve(ServeArgs),

    /// Generate shell completions for citeclean
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct CleanArgs {
    /// HTML file, directory, or '-' to read pasted text from stdin
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing cleaned files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Directory for cleaned files (defaults to next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the cleaned HTML to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Copy the cleaned HTML to the system clipboard
    #[arg(long)]
    copy: bool,
}

#[derive(Args, Debug)]
struct CountArgs {
    /// HTML file, or '-' to read from stdin
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Print counts as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// HTML file to preview
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Report path (defaults to <stem>_preview.html next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Interface to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory for cleaned uploads (overrides config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

/// citeclean - strip citation markers from HTML
///
/// Removes [cite: N] and [cite_start] markers left behind by AI chat exports,
/// including <p>, <div> and <span> elements that only held a marker.
#[derive(Parser, Debug)]
#[command(name = "citeclean")]
#[command(version)]
#[command(about = "Strip citation markers from HTML documents")]
#[command(long_about = "citeclean removes [cite: N] and [cite_start] markers from HTML documents.

EXAMPLES:
    citeclean report.html                    # Writes report_cleaned.html
    citeclean -f report.html                 # Overwrite an existing cleaned file
    citeclean exports/                       # Clean every .html file in a folder
    pbpaste | citeclean - --copy             # Clean pasted text back to the clipboard
    citeclean count --json report.html       # Show citation counts
    citeclean preview report.html            # Before/after report with highlights
    citeclean serve --port 8000              # Run the upload service
    citeclean completions bash > citeclean.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    clean: CleanArgs,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    // The max level is raised or lowered after the config is loaded
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // If log level is set via command line, apply it immediately
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    // Default behavior without a subcommand is cleaning
    let command = cli.command.unwrap_or(Commands::Clean(cli.clean));

    if let Commands::Completions { shell } = &command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "citeclean", &mut std::io::stdout());
        return Ok(());
    }

    let controller = load_controller(&cli.config_path, cli.log_level)?;

    match command {
        Commands::Clean(args) => run_clean(controller, args),
        Commands::Count(args) => run_count(&controller, args),
        Commands::Preview(args) => run_preview(&controller, args),
        Commands::Serve(args) => run_serve(&controller, args).await,
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load or create the configuration, apply CLI overrides and build the controller
fn load_controller(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Controller> {
    let mut config = Config::load_or_create(config_path)?;

    // Update log level in config if specified via command line
    if let Some(log_level) = log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    Controller::with_config(config)
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

fn run_clean(controller: Controller, args: CleanArgs) -> Result<()> {
    let input_path = args.input_path.ok_or_else(|| {
        anyhow!("INPUT_PATH is required when no subcommand is specified")
    })?;

    // Pasted text: cleaned output goes to stdout unless only a clipboard copy was asked for
    if input_path == Path::new(STDIN_PATH) {
        let result = controller.clean_text(&read_stdin()?)?;
        info!("Removed {}", result.stats);
        if args.copy {
            controller.copy_to_clipboard(&SystemClipboard::new(), &result.cleaned)?;
        }
        if args.stdout || !args.copy {
            print!("{}", result.cleaned);
        }
        return Ok(());
    }

    if FileManager::file_exists(&input_path) {
        if args.stdout {
            let result = controller.read_and_clean(&input_path)?;
            print!("{}", result.cleaned);
            if args.copy {
                controller.copy_to_clipboard(&SystemClipboard::new(), &result.cleaned)?;
            }
            return Ok(());
        }

        let output_dir = args.output_dir
            .unwrap_or_else(|| controller.default_output_dir(&input_path));
        let outcome = controller.clean_file(&input_path, &output_dir, args.force_overwrite)?;

        if args.copy {
            controller.copy_output(&SystemClipboard::new(), &outcome)?;
        }
    } else if FileManager::dir_exists(&input_path) {
        if args.stdout || args.copy {
            warn!("--stdout and --copy only apply to single files and stdin, ignoring");
        }

        // An explicit output directory replaces the configured one for this run
        let controller = match args.output_dir {
            Some(dir) => {
                let mut config = controller.config().clone();
                config.output.output_dir = Some(dir);
                Controller::with_config(config)?
            }
            None => controller,
        };
        controller.clean_folder(&input_path, args.force_overwrite)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

fn run_count(controller: &Controller, args: CountArgs) -> Result<()> {
    let stats = if args.input_path == Path::new(STDIN_PATH) {
        citeclean::count(&read_stdin()?)
    } else {
        controller.count_file(&args.input_path)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Numbered citations: {}", stats.numbered);
        println!("Start markers:      {}", stats.start);
        println!("Total:              {}", stats.total);
    }

    Ok(())
}

fn run_preview(controller: &Controller, args: PreviewArgs) -> Result<()> {
    let report_path = args.output.unwrap_or_else(|| {
        let stem = args.input_path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());
        args.input_path.with_file_name(format!("{}_preview.html", stem))
    });

    let result = controller.write_preview(&args.input_path, &report_path)?;
    info!("Preview shows {}", result.stats);

    Ok(())
}

async fn run_serve(controller: &Controller, args: ServeArgs) -> Result<()> {
    let mut config = controller.config().clone();

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(output_dir) = args.output_dir {
        config.server.output_dir = output_dir;
    }
    config.validate()?;

    server::run_server(&config).await?;

    Ok(())
}
