use serde::{Deserialize, Serialize};

use crate::error::{ChompError, Result};
use crate::fcpxml::XmlElement;

pub const CHAPTER_MARKER_TAG: &str = "chapter-marker";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    name: String,
    start_time: f64,
}

impl Marker {
    pub fn new(name: impl Into<String>, start_time: f64) -> Self {
        Self {
            name: name.into(),
            start_time,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seconds from the start of the project.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }
}

/// Collects every chapter marker below `root`, in document order.
///
/// Each element's `start` is relative to its parent's time space and its `offset` says where its
/// content begins in that same space, so a marker's absolute time is its own `start` plus every
/// ancestor's `offset - start`.
pub fn scan_for_markers(root: &XmlElement) -> Result<Vec<Marker>> {
    let mut markers = Vec::new();
    scan_element(root, &[], &mut markers)?;
    log::debug!("Found {} chapter markers", markers.len());
    Ok(markers)
}

fn scan_element(
    element: &XmlElement,
    ancestors: &[f64],
    markers: &mut Vec<Marker>,
) -> Result<()> {
    let start = element.time_attribute("start")?.unwrap_or(0.0);
    let offset = element.time_attribute("offset")?.unwrap_or(0.0);

    if element.name == CHAPTER_MARKER_TAG {
        let name = element
            .attribute("value")
            .ok_or_else(|| ChompError::MissingAttribute {
                element: element.name.clone(),
                attribute: "value",
            })?;
        let shift: f64 = ancestors.iter().sum();
        markers.push(Marker::new(name, start + shift));
        return Ok(());
    }

    // Children each borrow this snapshot; nothing they do can reach a sibling.
    let mut path = Vec::with_capacity(ancestors.len() + 1);
    path.extend_from_slice(ancestors);
    path.push(offset - start);

    for child in &element.children {
        scan_element(child, &path, markers)?;
    }
    Ok(())
}

/// Stable chronological sort; markers at the same time keep document order.
pub fn sort_markers(markers: &mut [Marker]) {
    markers.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
}
