use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use chapter_chomp::{Frontend, OutputFormat, SessionOptions, run_session};

mod frontend;

use frontend::{DesktopFrontend, TerminalFrontend};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    /// "HH:MM:SS name" lines for a YouTube description
    Youtube,
    Json,
    /// Matroska chapter XML, usable with mkvpropedit --chapters
    Matroska,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Youtube => OutputFormat::YouTube,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Matroska => OutputFormat::Matroska,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Turns the chapter markers of a Final Cut Pro XML export into YouTube chapter time codes.
#[derive(Parser, Debug)]
#[command(name = "chapter-chomp", version)]
#[command(long_about = "Reads the chapter markers of a Final Cut Pro XML export and lists them \
as YouTube chapter time codes.

EXAMPLES:
    chapter-chomp                              # Pick the export in a file dialog
    chapter-chomp Project.fcpxmld --copy       # Copy the time codes to the clipboard
    chapter-chomp Project.fcpxmld --save yt.txt
    chapter-chomp --no-gui Edit.fcpxml -f matroska > chapters.xml")]
struct Cli {
    /// .fcpxml file or .fcpxmld bundle; a file dialog opens when omitted
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, env = "CHAPTER_CHOMP_FORMAT", default_value_t = CliOutputFormat::Youtube)]
    format: CliOutputFormat,

    /// Copy the output to the clipboard
    #[arg(short, long)]
    copy: bool,

    /// Save the output to this file
    #[arg(short, long, value_name = "PATH", conflicts_with = "save_dialog")]
    save: Option<PathBuf>,

    /// Ask where to save the output
    #[arg(long)]
    save_dialog: bool,

    /// Offer to delete the export once the chapters have been shown (always offered with dialogs)
    #[arg(long)]
    delete_original: bool,

    /// Use the terminal for all interaction instead of native dialogs
    #[arg(long)]
    no_gui: bool,

    /// Set logging level (RUST_LOG takes precedence)
    #[arg(short, long, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,
}

impl Cli {
    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            input: self.input.clone(),
            format: self.format.into(),
            copy: self.copy,
            save_to: self.save.clone(),
            save_dialog: self.save_dialog,
            // Desktop launches always ask.
            offer_delete: self.delete_original || !self.no_gui,
        }
    }
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.into());

    let options = cli.session_options();
    let mut frontend: Box<dyn Frontend> = if cli.no_gui {
        Box::new(TerminalFrontend::default())
    } else {
        Box::new(DesktopFrontend::default())
    };

    let status = match run_session(&options, frontend.as_mut()) {
        Ok(outcome) => {
            log::info!(
                "Listed {} chapters from {}",
                outcome.chapters.num_chapters(),
                outcome.input.removal_target().display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            frontend.report_error(&e);
            ExitCode::FAILURE
        }
    };

    frontend.close();
    status
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_mode_always_offers_deletion() {
        let cli = Cli::parse_from(["chapter-chomp", "Episode.fcpxmld"]);
        assert!(cli.session_options().offer_delete);
    }

    #[test]
    fn terminal_mode_offers_deletion_only_on_request() {
        let cli = Cli::parse_from(["chapter-chomp", "--no-gui", "Episode.fcpxmld"]);
        assert!(!cli.session_options().offer_delete);

        let cli = Cli::parse_from([
            "chapter-chomp",
            "--no-gui",
            "--delete-original",
            "Episode.fcpxmld",
        ]);
        assert!(cli.session_options().offer_delete);
    }
}
