/*

<spine>
  <asset-clip offset="10s" start="0s" duration="60s">
    <chapter-marker start="2s" duration="1/30s" value="Intro"/>
  </asset-clip>
</spine>

  => 00:00:12 Intro

*/

pub mod chapters;
pub mod error;
pub mod fcpxml;
pub mod file;
pub mod markers;
pub mod session;
pub mod time;

pub use chapters::{OutputFormat, ProjectChapters, extract_chapters};
pub use error::ChompError;
pub use file::{InputKind, resolve_input};
pub use markers::{Marker, scan_for_markers};
pub use session::{Frontend, SessionOptions, SessionOutcome, run_session};
