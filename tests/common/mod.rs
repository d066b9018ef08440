#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chapter_chomp::{ChompError, Frontend};

/// Three chapter markers whose absolute times are 12s, 45s and 0s in document order.
pub const EPISODE_FCPXML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE fcpxml>
<fcpxml version="1.11">
    <resources>
        <format id="r1" frameDuration="1001/30000s" width="1920" height="1080"/>
        <asset id="r2" name="Interview" start="0s" duration="7200s" hasVideo="1" hasAudio="1"/>
    </resources>
    <library>
        <event name="Shoot">
            <project name="Episode">
                <sequence format="r1" duration="60s" tcStart="0s">
                    <spine>
                        <asset-clip ref="r2" offset="0s" start="0s" duration="30s" name="Opening">
                            <chapter-marker start="12s" duration="1001/30000s" value="Intro"/>
                            <marker start="5s" duration="1001/30000s" value="not a chapter"/>
                        </asset-clip>
                        <asset-clip ref="r2" offset="30s" start="60s" duration="20s" name="Middle">
                            <chapter-marker start="75s" duration="1001/30000s" value="Outro"/>
                        </asset-clip>
                        <gap offset="50s" start="3600s" duration="10s" name="Gap">
                            <chapter-marker start="3550s" duration="1001/30000s" value="Start"/>
                        </gap>
                    </spine>
                </sequence>
            </project>
        </event>
    </library>
</fcpxml>
"#;

pub const EPISODE_YOUTUBE_TEXT: &str = "Time Codes\n00:00:00 Start\n00:00:12 Intro\n00:00:45 Outro";

pub fn write_bundle(dir: &Path, name: &str, document: &str) -> PathBuf {
    let bundle = dir.join(name);
    fs::create_dir_all(&bundle).unwrap();
    fs::write(bundle.join("Info.fcpxml"), document).unwrap();
    bundle
}

pub fn write_document(dir: &Path, name: &str, document: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, document).unwrap();
    path
}

/// Frontend double that answers from fields and records every call.
#[derive(Default)]
pub struct ScriptedFrontend {
    pub pick_answer: Option<PathBuf>,
    pub save_answer: Option<PathBuf>,
    pub confirm_answer: bool,
    pub clipboard_fails: bool,
    /// Removes the target itself before answering yes, so the real removal fails.
    pub vanish_before_confirm: bool,
    pub accept_copy_offer: bool,
    pub accept_save_offer: bool,

    pub picks: usize,
    pub copy_offers: usize,
    pub save_offers: usize,
    pub displayed: Vec<String>,
    pub clipboard: Option<String>,
    pub suggested_save: Option<PathBuf>,
    pub delete_prompts: Vec<PathBuf>,
    pub notifications: Vec<(String, String)>,
    pub errors: Vec<String>,
}

impl Frontend for ScriptedFrontend {
    fn pick_input(&mut self) -> Option<PathBuf> {
        self.picks += 1;
        self.pick_answer.clone()
    }

    fn display(&mut self, text: &str) {
        self.displayed.push(text.to_owned());
    }

    fn copy_to_clipboard(&mut self, text: &str) -> anyhow::Result<()> {
        if self.clipboard_fails {
            anyhow::bail!("no display server");
        }
        self.clipboard = Some(text.to_owned());
        Ok(())
    }

    fn pick_save_path(&mut self, suggested: &Path) -> Option<PathBuf> {
        self.suggested_save = Some(suggested.to_path_buf());
        self.save_answer.clone()
    }

    fn confirm_delete(&mut self, target: &Path) -> bool {
        self.delete_prompts.push(target.to_path_buf());
        if self.vanish_before_confirm {
            if target.is_dir() {
                fs::remove_dir_all(target).unwrap();
            } else {
                fs::remove_file(target).unwrap();
            }
        }
        self.confirm_answer
    }

    fn notify(&mut self, title: &str, message: &str) {
        self.notifications
            .push((title.to_owned(), message.to_owned()));
    }

    fn report_error(&mut self, error: &ChompError) {
        self.errors.push(error.to_string());
    }

    fn offer_copy(&mut self) -> bool {
        self.copy_offers += 1;
        self.accept_copy_offer
    }

    fn offer_save(&mut self) -> bool {
        self.save_offers += 1;
        self.accept_save_offer
    }
}
