// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use subforge::app_config::{self, Config};
use subforge::app_controller::Controller;
use subforge::language_utils;
use subforge::subtitle::{FontSize, Position};

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

/// CLI Wrapper for FontSize to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFontSize {
    Small,
    Medium,
    Large,
}

impl From<CliFontSize> for FontSize {
    fn from(size: CliFontSize) -> Self {
        match size {
            CliFontSize::Small => FontSize::Small,
            CliFontSize::Medium => FontSize::Medium,
            CliFontSize::Large => FontSize::Large,
        }
    }
}

/// CLI Wrapper for Position to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliPosition {
    Bottom,
    Center,
    Top,
}

impl From<CliPosition> for Position {
    fn from(position: CliPosition) -> Self {
        match position {
            CliPosition::Bottom => Position::Bottom,
            CliPosition::Center => Position::Center,
            CliPosition::Top => Position::Top,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for subforge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// List the supported language pairs
    Languages,
}

/// subforge - speech to styled, burned-in subtitles
///
/// Extracts the audio of a video, recognizes speech, builds timed subtitle
/// phrases, optionally translates them and burns them into a copy of the video.
#[derive(Parser, Debug)]
#[command(name = "subforge")]
#[command(version)]
#[command(about = "Generate styled subtitles from speech and burn them into the video")]
#[command(long_about = "subforge extracts speech from a video and burns styled, optionally translated subtitles into a copy of it.

EXAMPLES:
    subforge talk.mp4                                  # English speech, English subtitles
    subforge -o out/ --languages \"English → Russian\" talk.mp4
    subforge -s ru -t en --font-size large talk.mkv
    subforge --text-color yellow --transparency 30 talk.mp4
    subforge completions bash > subforge.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. Command line options override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input video file
    #[arg(value_name = "INPUT_VIDEO")]
    input_video: Option<PathBuf>,

    /// Directory for the output video (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Language spoken in the video (e.g., 'en', 'ru')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Language of the subtitles (e.g., 'en', 'ru')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Language pair such as "English → Russian"
    #[arg(long, conflicts_with_all = ["source_language", "target_language"])]
    languages: Option<String>,

    /// Subtitle font size
    #[arg(long, value_enum)]
    font_size: Option<CliFontSize>,

    /// Subtitle position on screen
    #[arg(long, value_enum)]
    position: Option<CliPosition>,

    /// Text colour (#RRGGBB, #RRGGBBAA or a name)
    #[arg(long)]
    text_color: Option<String>,

    /// Background box colour
    #[arg(long)]
    background_color: Option<String>,

    /// Text transparency in percent
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    transparency: Option<u8>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and emoji for a log level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌ "),
            Level::Warn => ("\x1B[1;33m", "🚧 "),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍 "),
            Level::Trace => ("\x1B[1;35m", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::decoration(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let mut cli = CommandLineOptions::parse();

    match cli.command.take() {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subforge", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Languages) => {
            for pair in language_utils::AVAILABLE_LANGUAGE_PAIRS {
                let marker = if *pair == language_utils::DEFAULT_LANGUAGE_PAIR { " (default)" } else { "" };
                println!("{}{}", pair, marker);
            }
            Ok(())
        }
        None => {
            let result = run_subtitle(cli).await;
            if let Err(e) = &result {
                error!("{:#}", e);
            }
            result
        }
    }
}

/// Apply command line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, options: &CommandLineOptions) -> Result<()> {
    if let Some(pair) = &options.languages {
        let (source, target) = language_utils::parse_language_pair(pair)?;
        config.source_language = source;
        config.target_language = target;
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(font_size) = &options.font_size {
        config.style.font_size = font_size.clone().into();
    }
    if let Some(position) = &options.position {
        config.style.position = position.clone().into();
    }
    if let Some(text_color) = &options.text_color {
        config.style.text_color = text_color.clone();
    }
    if let Some(background_color) = &options.background_color {
        config.style.background_color = background_color.clone();
    }
    if let Some(transparency) = options.transparency {
        config.style.transparency = transparency;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    Ok(())
}

async fn run_subtitle(options: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let input_video = options
        .input_video
        .clone()
        .ok_or_else(|| anyhow!("INPUT_VIDEO is required when no subcommand is specified"))?;

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, &options)?;
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(level_filter(&config.log_level));

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| input_video.parent().unwrap_or(Path::new(".")).to_path_buf());
    let output_dir = if output_dir.as_os_str().is_empty() { PathBuf::from(".") } else { output_dir };

    let controller = Controller::with_config(config)?;
    controller.run(input_video, output_dir).await?;

    Ok(())
}
