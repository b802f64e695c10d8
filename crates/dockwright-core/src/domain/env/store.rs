//! Ordered, line-preserving view of a dotenv file.
//!
//! The store keeps every source line verbatim so a write-back only changes
//! what was explicitly set. Keys that had no line in the source are kept
//! apart in a header block and rendered before the body.

use std::collections::HashMap;

/// One line of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvLine {
    /// A `KEY=...` line. `raw` is the full line as it will be written.
    Entry { key: String, raw: String },
    /// Comments, blank lines and anything else, kept as-is.
    Opaque(String),
}

impl EnvLine {
    fn parse(line: &str) -> Self {
        match entry_key(line) {
            Some(key) => Self::Entry {
                key: key.to_string(),
                raw: line.to_string(),
            },
            None => Self::Opaque(line.to_string()),
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            Self::Entry { raw, .. } => raw,
            Self::Opaque(raw) => raw,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Entry { key, .. } => Some(key),
            Self::Opaque(_) => None,
        }
    }
}

/// What [`EnvStore::set`] did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The key had no source line; it was added to the header block.
    Introduced,
    /// The key's source lines were rewritten in place.
    Rewritten,
    /// The key was already in the header block; its value was replaced.
    Updated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvStore {
    header: Vec<(String, String)>,
    body: Vec<EnvLine>,
    values: HashMap<String, String>,
    trailing_newline: bool,
    /// Source lines end in `\r\n`; header lines follow suit.
    crlf: bool,
}

impl EnvStore {
    /// Split `text` into lines and derive the lookup map.
    ///
    /// Values are taken literally after the first `=`, with one layer of
    /// matching quotes removed. Use [`EnvStore::with_values`] to overlay the
    /// values a real dotenv parser resolved.
    pub fn parse(text: &str) -> Self {
        let trailing_newline = text.ends_with('\n');
        let text = text.strip_suffix('\n').unwrap_or(text);

        let body: Vec<EnvLine> = if text.is_empty() && !trailing_newline {
            Vec::new()
        } else {
            text.split('\n').map(EnvLine::parse).collect()
        };

        let values = body
            .iter()
            .filter_map(|line| match line {
                EnvLine::Entry { key, raw } => Some((key.clone(), literal_value(raw, key))),
                EnvLine::Opaque(_) => None,
            })
            .collect();

        let crlf = body.first().is_some_and(|line| line.raw().ends_with('\r'));

        Self {
            header: Vec::new(),
            body,
            values,
            trailing_newline,
            crlf,
        }
    }

    /// Replace lookup values with parser-resolved ones.
    pub fn with_values(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.values.extend(pairs);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Set `key` to `value`.
    ///
    /// Every source line for `key` is rewritten to `KEY=value`, keeping its
    /// line terminator; a key with no source line goes to the header block,
    /// once.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> SetOutcome {
        let value = value.into();
        self.values.insert(key.to_string(), value.clone());

        let mut rewritten = false;
        for line in &mut self.body {
            if let EnvLine::Entry { key: k, raw } = line {
                if k == key {
                    let cr = if raw.ends_with('\r') { "\r" } else { "" };
                    *raw = format!("{key}={value}{cr}");
                    rewritten = true;
                }
            }
        }
        if rewritten {
            return SetOutcome::Rewritten;
        }

        match self.header.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => {
                *existing = value;
                SetOutcome::Updated
            }
            None => {
                self.header.push((key.to_string(), value));
                SetOutcome::Introduced
            }
        }
    }

    /// Keys waiting in the header block, in first-introduced order.
    pub fn header(&self) -> &[(String, String)] {
        &self.header
    }

    pub fn body(&self) -> &[EnvLine] {
        &self.body
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.body.is_empty()
    }

    /// Render the full file: header block, one blank line, then the body.
    pub fn render(&self) -> String {
        let eol = if self.crlf { "\r\n" } else { "\n" };
        let mut out = String::new();

        for (key, value) in &self.header {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push_str(eol);
        }
        if !self.header.is_empty() {
            out.push_str(eol);
        }

        let body: Vec<&str> = self.body.iter().map(EnvLine::raw).collect();
        out.push_str(&body.join("\n"));
        if self.trailing_newline {
            out.push('\n');
        }

        out
    }
}

/// Key of a `KEY=...` line, if the line is one.
fn entry_key(line: &str) -> Option<&str> {
    let (key, _) = line.split_once('=')?;
    let mut chars = key.chars();
    let first = chars.next()?;
    let valid = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    valid.then_some(key)
}

fn literal_value(raw: &str, key: &str) -> String {
    let value = raw[key.len() + 1..].trim_end_matches('\r').trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# app\nAPP_ENV=local\n\nDB_HOST=\"old-db\"\nnot a key\n";

    #[test]
    fn parse_classifies_lines() {
        let store = EnvStore::parse(SAMPLE);

        assert_eq!(store.body().len(), 5);
        assert_eq!(store.body()[0], EnvLine::Opaque("# app".into()));
        assert_eq!(store.body()[1].key(), Some("APP_ENV"));
        assert_eq!(store.body()[4], EnvLine::Opaque("not a key".into()));
        assert_eq!(store.get("DB_HOST"), Some("old-db"));
        assert!(!store.contains_key("not a key"));
    }

    #[test]
    fn untouched_store_renders_byte_identical() {
        assert_eq!(EnvStore::parse(SAMPLE).render(), SAMPLE);
        assert_eq!(EnvStore::parse("A=1").render(), "A=1");
        assert_eq!(EnvStore::parse("").render(), "");
    }

    #[test]
    fn existing_key_is_rewritten_in_place() {
        let mut store = EnvStore::parse(SAMPLE);

        assert_eq!(store.set("DB_HOST", "foobar-db"), SetOutcome::Rewritten);
        assert_eq!(
            store.render(),
            "# app\nAPP_ENV=local\n\nDB_HOST=foobar-db\nnot a key\n"
        );
    }

    #[test]
    fn key_match_is_case_sensitive_and_line_anchored() {
        let mut store = EnvStore::parse("db_host=x\n# DB_HOST=y\nMY_DB_HOST=z\n");

        assert_eq!(store.set("DB_HOST", "new"), SetOutcome::Introduced);
        assert_eq!(
            store.render(),
            "DB_HOST=new\n\ndb_host=x\n# DB_HOST=y\nMY_DB_HOST=z\n"
        );
    }

    #[test]
    fn duplicate_source_lines_are_all_rewritten() {
        let mut store = EnvStore::parse("A=1\nA=2\n");
        store.set("A", "3");
        assert_eq!(store.render(), "A=3\nA=3\n");
    }

    #[test]
    fn new_keys_go_to_header_once_in_order() {
        let mut store = EnvStore::parse("APP_ENV=local\n");

        store.set("B", "1");
        store.set("A", "2");
        assert_eq!(store.set("B", "3"), SetOutcome::Updated);

        assert_eq!(store.render(), "B=3\nA=2\n\nAPP_ENV=local\n");
    }

    #[test]
    fn header_on_empty_source() {
        let mut store = EnvStore::parse("");
        store.set("A", "1");
        assert_eq!(store.render(), "A=1\n\n");
    }

    #[test]
    fn parser_values_override_literal_ones() {
        let store = EnvStore::parse("A=${B}\n").with_values([("A".to_string(), "resolved".to_string())]);
        assert_eq!(store.get("A"), Some("resolved"));
        assert_eq!(store.render(), "A=${B}\n");
    }

    #[test]
    fn crlf_source_keeps_its_line_endings() {
        let mut store = EnvStore::parse("APP_ENV=local\r\nDB_HOST=old\r\n");

        assert_eq!(store.set("DB_HOST", "foobar-db"), SetOutcome::Rewritten);
        assert_eq!(store.set("DB_CONNECTION", "mysql"), SetOutcome::Introduced);
        assert_eq!(store.get("DB_HOST"), Some("foobar-db"));
        assert_eq!(
            store.render(),
            "DB_CONNECTION=mysql\r\n\r\nAPP_ENV=local\r\nDB_HOST=foobar-db\r\n"
        );
    }
}
