// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use subedit::app_config::{self, Config};
use subedit::app_controller::Controller;
use subedit::errors::AppError;
use subedit::timecode::{self, Notation};
use subedit::{ReplaceMode, SubtitleFormat};

/// CLI Wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSubtitleFormat {
    Srt,
    Vtt,
    Ass,
}

impl From<CliSubtitleFormat> for SubtitleFormat {
    fn from(cli_format: CliSubtitleFormat) -> Self {
        match cli_format {
            CliSubtitleFormat::Srt => SubtitleFormat::Srt,
            CliSubtitleFormat::Vtt => SubtitleFormat::Vtt,
            CliSubtitleFormat::Ass => SubtitleFormat::Ass,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Convert a subtitle file, or every SRT/VTT file in a directory
    Convert {
        /// Input subtitle file or directory
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Output format (defaults to the configured export format)
        #[arg(short, long, value_enum)]
        to: Option<CliSubtitleFormat>,

        /// Output directory (defaults to next to each input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Shift every subtitle by an offset in seconds
    Shift {
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        /// Seconds to add; negative values move subtitles earlier
        #[arg(allow_hyphen_values = true)]
        offset: f64,

        /// Output file (defaults to <name>.edited.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Find and replace text in every subtitle
    Replace {
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        find: String,

        replace: String,

        /// Treat FIND as a regular expression
        #[arg(long)]
        regex: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recompute durations from a reading speed
    ReadingSpeed {
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        /// Characters per second (defaults to the configured value)
        #[arg(long)]
        cps: Option<f64>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List subtitles that overlap another subtitle
    Overlaps {
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,
    },

    /// Print the line edits of a file as JSON
    LineEdits {
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        /// Change note attached to the batch
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Generate shell completions for subedit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subedit - subtitle-track editing tool
///
/// Reads SRT and WebVTT files, applies bulk edits and writes SRT, WebVTT or ASS.
#[derive(Parser, Debug)]
#[command(name = "subedit")]
#[command(version)]
#[command(about = "Subtitle-track editing tool")]
#[command(long_about = "subedit reads SRT and WebVTT subtitles, applies bulk edits and writes SRT, WebVTT or ASS.

EXAMPLES:
    subedit convert movie.srt --to vtt           # Convert a file to WebVTT
    subedit convert -f --to ass /subs/           # Convert a directory, overwriting outputs
    subedit shift movie.srt -1.5                 # Move every subtitle 1.5s earlier
    subedit replace movie.vtt colour color       # Literal find/replace
    subedit replace --regex movie.srt '\\s+$' ''  # Regex find/replace
    subedit reading-speed --cps 17 movie.srt     # Recompute durations
    subedit overlaps movie.srt                   # Report overlapping subtitles
    subedit completions bash > subedit.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // Records are filtered by log::max_level, raised or lowered after config load
        log::set_boxed_logger(Box::new(CustomLogger::new(LevelFilter::Trace)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    let cli = CommandLineOptions::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: CommandLineOptions) -> Result<(), AppError> {
    // Completions need no configuration
    if let Commands::Completions { shell } = cli.command {
        print_completions(shell);
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level).to_level_filter());
    }

    let config = load_config(&cli.config_path, cli.log_level).map_err(|e| AppError::Config(format!("{:#}", e)))?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config).map_err(|e| AppError::Config(format!("{:#}", e)))?;

    run_command(&controller, cli.command).map_err(AppError::classify)
}

fn print_completions(shell: Shell) {
    let mut cmd = CommandLineOptions::command();
    generate(shell, &mut cmd, "subedit", &mut std::io::stdout());
}

fn load_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = Config::load_or_create(config_path)?;

    // Update log level in config if specified via command line
    if let Some(level) = log_level {
        config.log_level = level.into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Convert { input_path, to, output, force_overwrite } => {
            let format = to.map(SubtitleFormat::from);
            if input_path.is_file() {
                let output_dir = output.unwrap_or_else(|| input_path.parent().unwrap_or(Path::new(".")).to_path_buf());
                if controller.convert_file(&input_path, &output_dir, format, force_overwrite)?.is_none() {
                    warn!("Nothing written for {:?}", input_path);
                }
            } else if input_path.is_dir() {
                let summary = controller.convert_folder(&input_path, output.as_deref(), format, force_overwrite)?;
                if summary.failed > 0 {
                    return Err(anyhow!("{} of the files could not be converted", summary.failed));
                }
            } else {
                return Err(anyhow!("Input path does not exist: {:?}", input_path));
            }
        }
        Commands::Shift { input_file, offset, output } => {
            controller.shift(&input_file, offset, output)?;
        }
        Commands::Replace { input_file, find, replace, regex, output } => {
            let mode = regex.then_some(ReplaceMode::Pattern);
            let (_, modified) = controller.replace(&input_file, &find, &replace, mode, output)?;
            if modified == 0 {
                info!("No subtitle contained {:?}", find);
            }
        }
        Commands::ReadingSpeed { input_file, cps, output } => {
            controller.reading_speed(&input_file, cps, output)?;
        }
        Commands::Overlaps { input_file } => {
            let overlapping = controller.overlaps(&input_file)?;
            if overlapping.is_empty() {
                info!("No overlapping subtitles in {:?}", input_file);
            }
            for cue in overlapping {
                println!(
                    "{}\t{} --> {}\t{}",
                    cue.index + 1,
                    timecode::encode(cue.start_time, Notation::Srt),
                    timecode::encode(cue.end_time, Notation::Srt),
                    cue.text.replace('\n', " / ")
                );
            }
        }
        Commands::LineEdits { input_file, note } => {
            let batch = controller.line_edits(&input_file, note)?;
            let json = serde_json::to_string_pretty(&batch).context("Failed to serialize line edits")?;
            println!("{}", json);
        }
        Commands::Completions { shell } => print_completions(shell),
    }

    Ok(())
}
