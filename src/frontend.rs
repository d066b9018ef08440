use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::Context;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use chapter_chomp::ChompError;
use chapter_chomp::chapters::YOUTUBE_GUIDANCE;

/// Upper bound on how long the process lingers to keep serving copied text on X11/Wayland.
const CLIPBOARD_HOLD: Duration = Duration::from_secs(10 * 60);

/// Writes to the system clipboard. On X11 and Wayland the text only lives as long as its owner,
/// so a background thread keeps owning it until another program copies or the hold expires.
#[derive(Default)]
pub struct ClipboardKeeper {
    holder: Option<JoinHandle<()>>,
}

impl ClipboardKeeper {
    pub fn copy(&mut self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("clipboard is unavailable")?;
        clipboard
            .set_text(text.to_owned())
            .context("failed to write to the clipboard")?;
        self.hold(text.to_owned());
        Ok(())
    }

    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    fn hold(&mut self, text: String) {
        use arboard::SetExtLinux;

        let deadline = std::time::Instant::now() + CLIPBOARD_HOLD;
        self.holder = Some(std::thread::spawn(move || {
            let held = arboard::Clipboard::new()
                .and_then(|mut clipboard| clipboard.set().wait_until(deadline).text(text));
            if let Err(e) = held {
                log::warn!("Could not keep clipboard contents: {e}");
            }
        }));
    }

    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    fn hold(&mut self, _text: String) {}

    /// Blocks until the copied text has been replaced by another program or the hold expires.
    pub fn release(&mut self) {
        if let Some(holder) = self.holder.take() {
            log::info!("Keeping the copied time codes on the clipboard until something else is copied");
            let _ = holder.join();
        }
    }
}

/// Native file pickers and message boxes.
#[derive(Default)]
pub struct DesktopFrontend {
    clipboard: ClipboardKeeper,
}

impl DesktopFrontend {
    fn ask(level: MessageLevel, title: &str, description: &str) -> bool {
        let answer = MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(description)
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes)
    }

    fn message(level: MessageLevel, title: &str, description: &str) {
        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(description)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

impl chapter_chomp::Frontend for DesktopFrontend {
    fn pick_input(&mut self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Select an FCPXML export")
            .add_filter("FCPXML Files", &["fcpxmld", "fcpxml"])
            .pick_file()
    }

    fn display(&mut self, text: &str) {
        println!("{text}");
        Self::message(
            MessageLevel::Info,
            "Chapter Markers",
            &format!("{YOUTUBE_GUIDANCE}\n\n{text}"),
        );
    }

    fn copy_to_clipboard(&mut self, text: &str) -> anyhow::Result<()> {
        self.clipboard.copy(text)
    }

    fn pick_save_path(&mut self, suggested: &Path) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .set_title("Save Chapter Markers as .txt file")
            .add_filter("Text Files", &["txt"]);
        if let Some(dir) = suggested.parent() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(name) = suggested.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        dialog.save_file()
    }

    fn confirm_delete(&mut self, target: &Path) -> bool {
        Self::ask(
            MessageLevel::Warning,
            "Delete Original File",
            &format!("Would you like to delete {}?", target.display()),
        )
    }

    fn notify(&mut self, title: &str, message: &str) {
        Self::message(MessageLevel::Info, title, message);
    }

    fn report_error(&mut self, error: &ChompError) {
        eprintln!("Error: {error}");
        Self::message(MessageLevel::Error, "Error", &error.to_string());
    }

    fn offer_copy(&mut self) -> bool {
        Self::ask(
            MessageLevel::Info,
            "Copy to Clipboard",
            "Copy the time codes to the clipboard?",
        )
    }

    fn offer_save(&mut self) -> bool {
        Self::ask(
            MessageLevel::Info,
            "Save as .txt",
            "Save the time codes to a text file?",
        )
    }

    fn close(&mut self) {
        self.clipboard.release();
    }
}

/// stdout for output, stderr for messages, stdin for answers.
#[derive(Default)]
pub struct TerminalFrontend {
    clipboard: ClipboardKeeper,
}

impl TerminalFrontend {
    /// `None` on end of input or a read error.
    fn prompt(question: &str) -> Option<String> {
        eprint!("{question}");
        let _ = io::stderr().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_owned()),
            Err(e) => {
                log::warn!("Failed to read answer: {e}");
                None
            }
        }
    }
}

impl chapter_chomp::Frontend for TerminalFrontend {
    fn pick_input(&mut self) -> Option<PathBuf> {
        Self::prompt("Path to .fcpxml or .fcpxmld: ")
            .filter(|answer| !answer.is_empty())
            .map(PathBuf::from)
    }

    fn display(&mut self, text: &str) {
        println!("{text}");
    }

    fn copy_to_clipboard(&mut self, text: &str) -> anyhow::Result<()> {
        self.clipboard.copy(text)
    }

    fn pick_save_path(&mut self, suggested: &Path) -> Option<PathBuf> {
        let answer = Self::prompt(&format!("Save to [{}]: ", suggested.display()))?;
        if answer.is_empty() {
            Some(suggested.to_path_buf())
        } else {
            Some(PathBuf::from(answer))
        }
    }

    fn confirm_delete(&mut self, target: &Path) -> bool {
        Self::prompt(&format!("Delete {}? [y/N] ", target.display())).is_some_and(|answer| {
            answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
        })
    }

    fn notify(&mut self, title: &str, message: &str) {
        eprintln!("{title}: {message}");
    }

    fn report_error(&mut self, error: &ChompError) {
        eprintln!("Error: {error}");
    }

    fn close(&mut self) {
        self.clipboard.release();
    }
}
