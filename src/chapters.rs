use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fcpxml::load_fcpxml;
use crate::file::InputKind;
use crate::markers::{Marker, scan_for_markers, sort_markers};
use crate::time::{format_matroska_timestamp, format_timecode};

pub const YOUTUBE_HEADER: &str = "Time Codes";

pub const YOUTUBE_GUIDANCE: &str = "To activate the YouTube chapter function, paste the table into the video description or a pinned comment.\n\
The first time code must be 00:00 or YouTube won't recognise the table as chapters.\n\
Either add it by hand or place a chapter marker at 00:00 on the Final Cut Pro timeline.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    YouTube,
    Json,
    Matroska,
}

/// All chapter markers of one project, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectChapters {
    pub path: PathBuf,
    pub markers: Vec<Marker>,
}

impl ProjectChapters {
    pub fn new(path: impl Into<PathBuf>, mut markers: Vec<Marker>) -> Self {
        sort_markers(&mut markers);
        Self {
            path: path.into(),
            markers,
        }
    }

    pub fn num_chapters(&self) -> usize {
        self.markers.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// YouTube only treats the list as chapters when it begins at zero.
    pub fn starts_at_zero(&self) -> bool {
        self.markers
            .first()
            .is_some_and(|m| format_timecode(m.start_time()) == "00:00:00")
    }

    pub fn timecode_lines(&self) -> Vec<String> {
        self.iter()
            .map(|m| format!("{} {}", format_timecode(m.start_time()), m.name()))
            .collect()
    }

    pub fn to_youtube_text(&self) -> String {
        let mut output = String::from(YOUTUBE_HEADER);
        for line in self.timecode_lines() {
            let _ = write!(&mut output, "\n{line}");
        }
        output
    }

    pub fn to_json(&self) -> Result<String> {
        let export = JsonExport {
            path: &self.path,
            chapters: self
                .iter()
                .map(|m| JsonChapter {
                    title: m.name(),
                    timecode: format_timecode(m.start_time()),
                    start_seconds: m.start_time(),
                    start: Duration::try_from_secs_f64(m.start_time().max(0.0))
                        .unwrap_or_default(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    pub fn to_matroska_xml(&self) -> Result<String> {
        let chapters: Chapters = self.into();
        Ok(serde_xml_rs::to_string(&chapters)?)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::YouTube => Ok(self.to_youtube_text()),
            OutputFormat::Json => self.to_json(),
            OutputFormat::Matroska => self.to_matroska_xml(),
        }
    }
}

impl<'a> IntoIterator for &'a ProjectChapters {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}

/// Reads the export behind `input` and returns its chapter markers sorted by time.
pub fn extract_chapters(input: &InputKind) -> Result<ProjectChapters> {
    let document = input.document();
    log::info!("Extracting chapters from \"{}\"", document.display());

    let root = load_fcpxml(document)?;
    let chapters = ProjectChapters::new(document, scan_for_markers(&root)?);

    log::info!("Markers found: {}", chapters.num_chapters());
    Ok(chapters)
}

#[derive(Serialize)]
struct JsonExport<'a> {
    path: &'a Path,
    chapters: Vec<JsonChapter<'a>>,
}

#[derive(Serialize)]
struct JsonChapter<'a> {
    title: &'a str,
    timecode: String,
    start_seconds: f64,
    #[serde(with = "humantime_serde")]
    start: Duration,
}

// Matroska chapter file layout, as read and written by mkvextract / mkvpropedit.

#[derive(Clone, Debug, Deserialize, Serialize, Default)]
pub struct Chapters {
    #[serde(rename = "EditionEntry")]
    pub edition_entry: EditionEntry,
}

#[derive(Clone, Debug, Deserialize, Serialize, Default)]
pub struct EditionEntry {
    #[serde(rename = "ChapterAtom", default)]
    pub chapters: Vec<ChapterAtom>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChapterAtom {
    #[serde(rename = "ChapterTimeStart")]
    pub start_time: String,

    #[serde(rename = "ChapterTimeEnd", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(rename = "ChapterDisplay")]
    pub display: ChapterDisplay,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChapterDisplay {
    #[serde(rename = "ChapterString")]
    pub title: String,
}

impl From<&ProjectChapters> for Chapters {
    fn from(project: &ProjectChapters) -> Self {
        let markers = &project.markers;
        let chapters = markers
            .iter()
            .enumerate()
            .map(|(i, m)| ChapterAtom {
                start_time: format_matroska_timestamp(m.start_time()),
                end_time: markers
                    .get(i + 1)
                    .map(|next| format_matroska_timestamp(next.start_time())),
                display: ChapterDisplay {
                    title: m.name().to_owned(),
                },
            })
            .collect();

        Chapters {
            edition_entry: EditionEntry { chapters },
        }
    }
}
