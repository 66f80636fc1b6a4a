use serde_json::Value as JsonValue;
use thiserror::Error;

const DELIMITER: &str = "---";

/// Metadata read from the block at the top of a deck.
#[derive(Debug)]
pub struct FrontmatterExtraction {
    /// The block's mapping as a JSON value; an empty object without a block.
    pub value: JsonValue,
    /// Byte offset where the slides begin.
    pub body_start: usize,
}

impl FrontmatterExtraction {
    fn absent() -> Self {
        Self {
            value: JsonValue::Object(Default::default()),
            body_start: 0,
        }
    }

    /// The deck title, if the block sets a non-blank one.
    ///
    /// Numbers and booleans are accepted and rendered as text.
    pub fn title(&self) -> Option<String> {
        let title = match self.value.get("title")? {
            JsonValue::String(text) => text.trim().to_string(),
            JsonValue::Number(number) => number.to_string(),
            JsonValue::Bool(flag) => flag.to_string(),
            _ => return None,
        };
        (!title.is_empty()).then_some(title)
    }
}

/// Why a leading `---` block could not be used as deck metadata.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// The opening `---` has no matching closing line.
    #[error("frontmatter opened with '---' is never closed")]
    Unterminated,
    /// The block is not valid YAML.
    #[error("frontmatter is not valid YAML: {0}")]
    Parse(String),
    /// The block parsed, but not to a mapping.
    #[error("frontmatter must be a mapping of keys to values")]
    InvalidRootType,
    /// `title` is a list or a mapping instead of text.
    #[error("frontmatter title must be a single value")]
    InvalidTitle,
}

/// Frontmatter split off a document by the lenient pipeline entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter<'a> {
    /// Deck title, when the block sets one.
    pub title: Option<String>,
    /// Whole metadata mapping; an empty object when there was no usable block.
    pub metadata: JsonValue,
    /// The markdown that follows the block, or the whole document.
    pub body: &'a str,
    /// Why a block that looked like frontmatter was ignored.
    pub rejected: Option<String>,
}

/// Reads the metadata block at the top of a deck, if there is one.
///
/// The first non-blank line must be `---` (surrounding whitespace allowed) to
/// open a block; the next line that is exactly `---` closes it.
pub fn extract_frontmatter(input: &str) -> Result<FrontmatterExtraction, FrontmatterError> {
    let Some(block) = locate_block(input)? else {
        return Ok(FrontmatterExtraction::absent());
    };
    Ok(FrontmatterExtraction {
        value: parse_metadata(block.yaml)?,
        body_start: block.body_start,
    })
}

/// Splits frontmatter off `input`, never failing.
///
/// Any block that [`extract_frontmatter`] rejects leaves the document untouched
/// and reports the reason in [`Frontmatter::rejected`].
pub fn split_frontmatter(input: &str) -> Frontmatter<'_> {
    match extract_frontmatter(input) {
        Ok(extraction) => Frontmatter {
            title: extraction.title(),
            body: &input[extraction.body_start..],
            metadata: extraction.value,
            rejected: None,
        },
        Err(err) => {
            log::debug!("ignoring frontmatter: {err}");
            Frontmatter {
                title: None,
                metadata: JsonValue::Object(Default::default()),
                body: input,
                rejected: Some(err.to_string()),
            }
        }
    }
}

struct Block<'a> {
    yaml: &'a str,
    body_start: usize,
}

struct Line<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

fn locate_block(input: &str) -> Result<Option<Block<'_>>, FrontmatterError> {
    let offset = if input.starts_with('\u{feff}') {
        '\u{feff}'.len_utf8()
    } else {
        0
    };
    let mut lines = lines_from(input, offset);

    let Some(open) = lines.by_ref().find(|line| !line.text.trim().is_empty()) else {
        return Ok(None);
    };
    if open.text.trim() != DELIMITER {
        return Ok(None);
    }

    let close = lines
        .find(|line| line.text == DELIMITER)
        .ok_or(FrontmatterError::Unterminated)?;
    Ok(Some(Block {
        yaml: &input[open.end..close.start],
        body_start: close.end,
    }))
}

fn lines_from(input: &str, offset: usize) -> impl Iterator<Item = Line<'_>> {
    let mut start = offset;
    input[offset..].split_inclusive('\n').map(move |raw| {
        let line = Line {
            text: raw.trim_end_matches(['\n', '\r']),
            start,
            end: start + raw.len(),
        };
        start = line.end;
        line
    })
}

fn parse_metadata(yaml: &str) -> Result<JsonValue, FrontmatterError> {
    let parsed = if yaml.trim().is_empty() {
        JsonValue::Null
    } else {
        let yaml_value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
        serde_json::to_value(yaml_value).map_err(|err| FrontmatterError::Parse(err.to_string()))?
    };

    match parsed {
        JsonValue::Null => Ok(JsonValue::Object(Default::default())),
        JsonValue::Object(map) => {
            if let Some(title) = map.get("title")
                && (title.is_array() || title.is_object())
            {
                return Err(FrontmatterError::InvalidTitle);
            }
            Ok(JsonValue::Object(map))
        }
        _ => Err(FrontmatterError::InvalidRootType),
    }
}
