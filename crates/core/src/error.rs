use serde::Serialize;

/// Source location information for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// Slide number (1-indexed), when the location is inside a slide.
    pub slide: Option<usize>,
    /// Line number (1-indexed) relative to the slide or document.
    pub line: usize,
}

impl SourceLocation {
    /// Create a location relative to the start of the document.
    pub fn new(line: usize) -> Self {
        Self { slide: None, line }
    }

    /// Create a location relative to the start of a slide.
    pub fn in_slide(slide: usize, line: usize) -> Self {
        Self {
            slide: Some(slide),
            line,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(slide) = self.slide {
            write!(f, "slide {}, line {}", slide, self.line)
        } else {
            write!(f, "line {}", self.line)
        }
    }
}

/// Non-fatal warnings for input the pipeline recovered from.
///
/// None of these change the rendered output; they only describe the
/// silent fallback that was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// Code fence opened but never closed; closed at the end of the slide.
    UnclosedCodeFence {
        /// Location of the opening fence.
        location: SourceLocation,
        /// The opening fence line, for context.
        context: String,
    },
    /// Frontmatter block could not be used; the document was kept as-is.
    MalformedFrontmatter {
        /// Why the block was rejected.
        reason: String,
    },
}

impl ParseWarning {
    /// Get the location of this warning, if it has one.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            ParseWarning::UnclosedCodeFence { location, .. } => Some(location),
            ParseWarning::MalformedFrontmatter { .. } => None,
        }
    }

    /// Return the same warning attributed to a specific slide.
    pub(crate) fn in_slide(self, slide: usize) -> Self {
        match self {
            ParseWarning::UnclosedCodeFence { location, context } => {
                ParseWarning::UnclosedCodeFence {
                    location: SourceLocation::in_slide(slide, location.line),
                    context,
                }
            }
            other => other,
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::UnclosedCodeFence { location, context } => {
                write!(f, "Unclosed code fence: {}, near '{}'", location, context)
            }
            ParseWarning::MalformedFrontmatter { reason } => {
                write!(f, "Frontmatter ignored: {}", reason)
            }
        }
    }
}

/// Collection of parse diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostics {
    /// List of non-fatal warnings, in the order they were found.
    pub warnings: Vec<ParseWarning>,
}

impl ParseDiagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the diagnostics collection
    pub fn add_warning(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    /// Add `offset` to every slide number, after slides were inserted in front.
    pub(crate) fn shift_slides(&mut self, offset: usize) {
        for warning in &mut self.warnings {
            if let ParseWarning::UnclosedCodeFence { location, .. } = warning
                && let Some(slide) = location.slide.as_mut()
            {
                *slide += offset;
            }
        }
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get total count of all diagnostics
    pub fn count(&self) -> usize {
        self.warnings.len()
    }
}
