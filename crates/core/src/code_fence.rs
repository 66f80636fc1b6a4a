//! Code fence tracking shared by the segmenter and the block parser.
//!
//! Fences here are deliberately simple: any line starting with three
//! backticks toggles the state, whatever follows the marker and however many
//! backticks there are.

/// Marker that opens and closes a fenced code block.
pub const FENCE_MARKER: &str = "```";

/// Fence parsing phases tracked across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FencePhase {
    /// Not currently inside a fence.
    #[default]
    Outside,
    /// Within fence contents.
    InsideFence,
}

impl FencePhase {
    /// The phase after crossing a fence line.
    pub fn toggle(self) -> Self {
        match self {
            FencePhase::Outside => FencePhase::InsideFence,
            FencePhase::InsideFence => FencePhase::Outside,
        }
    }

    /// Whether lines in this phase are code.
    pub fn is_inside(self) -> bool {
        matches!(self, FencePhase::InsideFence)
    }

    /// Advance over one line, toggling when `line` begins with the marker.
    ///
    /// The line is checked as given; callers decide whether to trim first.
    pub fn advance(self, line: &str) -> Self {
        if is_fence_line(line) {
            self.toggle()
        } else {
            self
        }
    }
}

/// Returns true if `line` starts with [`FENCE_MARKER`].
pub fn is_fence_line(line: &str) -> bool {
    line.starts_with(FENCE_MARKER)
}
