//! Formatting detection so rewritten manifests keep their look

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

const DEFAULT_INDENT: &str = "  ";

/// Whitespace conventions of a JSON document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStyle {
    /// One level of indentation
    pub indent: String,
    /// Line terminator (`\n` or `\r\n`)
    pub newline: &'static str,
    /// Whether the document ends with a newline
    pub trailing_newline: bool,
}

impl Default for JsonStyle {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            newline: "\n",
            trailing_newline: true,
        }
    }
}

impl JsonStyle {
    /// Detect the style of existing content
    pub fn detect(content: &str) -> Self {
        let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };

        // The first indented line holds exactly one level of indentation
        let indent = content
            .lines()
            .skip(1)
            .map(|line| {
                let trimmed = line.trim_start_matches([' ', '\t']);
                &line[..line.len() - trimmed.len()]
            })
            .find(|ws| !ws.is_empty())
            .unwrap_or(DEFAULT_INDENT)
            .to_string();

        Self {
            indent,
            newline,
            trailing_newline: content.ends_with('\n'),
        }
    }

    /// Serialize a value in this style
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.indent.as_bytes());
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;

        // serde_json only emits valid UTF-8
        let mut rendered = String::from_utf8_lossy(&buf).into_owned();
        if self.newline != "\n" {
            rendered = rendered.replace('\n', self.newline);
        }
        if self.trailing_newline {
            rendered.push_str(self.newline);
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_two_spaces() {
        let style = JsonStyle::detect("{\n  \"a\": 1\n}\n");
        assert_eq!(style.indent, "  ");
        assert_eq!(style.newline, "\n");
        assert!(style.trailing_newline);
    }

    #[test]
    fn test_detect_tabs_without_trailing_newline() {
        let style = JsonStyle::detect("{\n\t\"a\": 1\n}");
        assert_eq!(style.indent, "\t");
        assert!(!style.trailing_newline);
    }

    #[test]
    fn test_detect_crlf() {
        let style = JsonStyle::detect("{\r\n    \"a\": 1\r\n}\r\n");
        assert_eq!(style.indent, "    ");
        assert_eq!(style.newline, "\r\n");
    }

    #[test]
    fn test_detect_single_line_defaults_indent() {
        let style = JsonStyle::detect("{\"a\": 1}");
        assert_eq!(style.indent, DEFAULT_INDENT);
        assert!(!style.trailing_newline);
    }

    #[test]
    fn test_render_crlf() {
        let style = JsonStyle::detect("{\r\n  \"a\": 1\r\n}\r\n");
        let rendered = style.render(&json!({"a": 1})).unwrap();
        assert_eq!(rendered, "{\r\n  \"a\": 1\r\n}\r\n");
    }
}
