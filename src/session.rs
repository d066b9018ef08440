//! One pass of the tool: pick an export, show its chapters, then optionally copy, save and
//! delete. All interaction goes through [`Frontend`] so the same flow runs behind native dialogs,
//! a terminal, or a test double.

use std::path::{Path, PathBuf};

use crate::chapters::{OutputFormat, ProjectChapters, YOUTUBE_GUIDANCE, extract_chapters};
use crate::error::{ChompError, Result};
use crate::file::{InputKind, remove_input, resolve_input, save_text};

pub const EXPORT_INSTRUCTIONS: &str = "To use this program, export an XML file from Final Cut Pro.\n\n\
In Final Cut Pro, choose File > Export XML...\n\n\
Final Cut Pro will write a .fcpxmld bundle; open that bundle with this program.";

/// The external surfaces the session talks to.
pub trait Frontend {
    /// Asks the user for an export. `None` when they cancel.
    fn pick_input(&mut self) -> Option<PathBuf>;

    /// Presents the rendered chapter text.
    fn display(&mut self, text: &str);

    fn copy_to_clipboard(&mut self, text: &str) -> anyhow::Result<()>;

    fn pick_save_path(&mut self, suggested: &Path) -> Option<PathBuf>;

    /// Must return `true` only on an explicit yes.
    fn confirm_delete(&mut self, target: &Path) -> bool;

    fn notify(&mut self, title: &str, message: &str);

    fn report_error(&mut self, error: &ChompError);

    /// Asked after display when copying was not requested up front.
    fn offer_copy(&mut self) -> bool {
        false
    }

    /// Asked after display when no save target was given up front.
    fn offer_save(&mut self) -> bool {
        false
    }

    /// Called once the session is over, before the process exits.
    fn close(&mut self) {}
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    pub copy: bool,
    pub save_to: Option<PathBuf>,
    pub save_dialog: bool,
    pub offer_delete: bool,
}

#[derive(Debug)]
pub struct SessionOutcome {
    pub input: InputKind,
    pub chapters: ProjectChapters,
    pub text: String,
    pub copied: bool,
    pub saved_to: Option<PathBuf>,
    pub deleted: bool,
}

/// Runs one session. Errors returned from here happen before anything is displayed;
/// failures in the copy, save and delete steps are reported through the frontend instead.
pub fn run_session(
    options: &SessionOptions,
    frontend: &mut dyn Frontend,
) -> Result<SessionOutcome> {
    frontend.notify("Instructions", EXPORT_INSTRUCTIONS);
    let path = match &options.input {
        Some(path) => path.clone(),
        None => frontend.pick_input().ok_or(ChompError::NoInputSelected)?,
    };

    let input = resolve_input(&path)?;
    let chapters = extract_chapters(&input)?;
    let text = chapters.render(options.format)?;

    if options.format == OutputFormat::YouTube && !chapters.starts_at_zero() {
        log::warn!("First chapter is not at 00:00:00. {YOUTUBE_GUIDANCE}");
    }
    frontend.display(&text);

    let copied = (options.copy || frontend.offer_copy()) && copy_text(frontend, &text);
    let saved_to = save_requested(options, &input, frontend)
        .and_then(|target| save_rendered(frontend, target, &text));
    let deleted = options.offer_delete && delete_confirmed(frontend, &input);

    Ok(SessionOutcome {
        input,
        chapters,
        text,
        copied,
        saved_to,
        deleted,
    })
}

fn copy_text(frontend: &mut dyn Frontend, text: &str) -> bool {
    match frontend.copy_to_clipboard(text) {
        Ok(()) => {
            frontend.notify("Copied!", "Time codes copied to clipboard.");
            true
        }
        Err(e) => {
            log::error!("Clipboard copy failed: {e:#}");
            frontend.notify("Error", &format!("Failed to copy to clipboard: {e}"));
            false
        }
    }
}

fn save_requested(
    options: &SessionOptions,
    input: &InputKind,
    frontend: &mut dyn Frontend,
) -> Option<PathBuf> {
    if let Some(target) = &options.save_to {
        return Some(target.clone());
    }
    if options.save_dialog || frontend.offer_save() {
        return frontend.pick_save_path(&input.default_output_path());
    }
    None
}

fn save_rendered(frontend: &mut dyn Frontend, target: PathBuf, text: &str) -> Option<PathBuf> {
    match save_text(&target, text) {
        Ok(()) => {
            frontend.notify(
                "Success",
                &format!("Chapter markers saved to: {}", target.display()),
            );
            Some(target)
        }
        Err(e) => {
            frontend.report_error(&e);
            None
        }
    }
}

fn delete_confirmed(frontend: &mut dyn Frontend, input: &InputKind) -> bool {
    let target = input.removal_target();
    if !frontend.confirm_delete(target) {
        log::debug!("Keeping {}", target.display());
        return false;
    }

    match remove_input(input) {
        Ok(()) => {
            frontend.notify(
                "Deleted",
                &format!("{} has been deleted.", target.display()),
            );
            true
        }
        Err(e) => {
            frontend.report_error(&e);
            false
        }
    }
}
