//! Templates with a YAML frontmatter header

use tracing::debug;

use crate::domain::campaigns::{
    CampaignMetadata, FrontmatterError, ParsedTemplate, TemplateLoader, Value,
};

const DELIMITER: &str = "---";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Splits a template into YAML frontmatter and body.
///
/// The header is optional; a document not starting with `---` is all body.
/// A leading byte order mark is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontmatterTemplateLoader;

impl TemplateLoader for FrontmatterTemplateLoader {
    fn parse(&self, source: &str) -> Result<ParsedTemplate, FrontmatterError> {
        let source = source.strip_prefix(BYTE_ORDER_MARK).unwrap_or(source);

        let Some((header, body)) = split(source)? else {
            return Ok(ParsedTemplate {
                metadata: CampaignMetadata::default(),
                body: source.to_string(),
            });
        };

        if header.trim().is_empty() {
            return Ok(ParsedTemplate {
                metadata: CampaignMetadata::default(),
                body: body.to_string(),
            });
        }

        let metadata = match serde_yaml::from_str::<Value>(header) {
            Ok(Value::Map(fields)) => fields.into_iter().collect(),
            Ok(Value::Null) => CampaignMetadata::default(),
            Ok(_) => return Err(FrontmatterError::NotAMapping),
            Err(e) => {
                debug!("serde_yaml::Error -> FrontmatterError");

                return Err(FrontmatterError::Invalid(e.to_string()));
            }
        };

        Ok(ParsedTemplate {
            metadata,
            body: body.to_string(),
        })
    }
}

/// Returns the header text and the body, or `None` without a header
fn split(source: &str) -> Result<Option<(&str, &str)>, FrontmatterError> {
    let Some(rest) = strip_delimiter_line(source) else {
        return Ok(None);
    };

    let mut offset = 0;

    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];

            return Ok(Some((header, body)));
        }

        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

/// Strips a leading `---` line, returning what follows it
fn strip_delimiter_line(source: &str) -> Option<&str> {
    let rest = source.strip_prefix(DELIMITER)?;

    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}
