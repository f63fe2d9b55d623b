//! Declaration reassembly
//!
//! DTDs routinely split a declaration over several physical lines. [DeclarationReader]
//! accumulates trimmed lines until one ends with `>` while the buffer holds an `ELEMENT`,
//! `ATTLIST` or `ENTITY` keyword, then cuts the buffer into individual `<!…>` declarations.
//!
//! Comments (`<!-- … -->`) are removed before accumulation and may span lines. Quoted
//! literals are respected when looking for the closing `>`, so an entity value like `"a > b"`
//! does not end its declaration early. Text that precedes a `<!` (an XML prolog, stray
//! characters) is discarded.

use tracing::debug;

const KEYWORDS: [&str; 3] = ["<!ELEMENT", "<!ATTLIST", "<!ENTITY"];
const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Line-fed reassembler of DTD declarations
#[derive(Debug, Default)]
pub struct DeclarationReader {
    buffer: String,
    in_comment: bool,
}

impl DeclarationReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one physical line and collect the declarations it completes.
    pub fn push_line(&mut self, line: &str) -> Vec<String> {
        let uncommented = self.strip_comments(line);
        let line = uncommented.trim();
        if line.is_empty() {
            return Vec::new();
        }

        self.buffer.push_str(line);
        self.buffer.push(' ');

        if !(line.ends_with('>') && contains_keyword(&self.buffer)) {
            return Vec::new();
        }

        let (declarations, rest) = split_declarations(&self.buffer);
        self.buffer = rest;
        declarations
    }

    /// Consume the reader, returning a declaration that was started but never terminated.
    pub fn finish(self) -> Option<String> {
        let rest = self.buffer.trim();
        if contains_keyword(rest) {
            Some(rest.to_string())
        } else {
            None
        }
    }

    fn strip_comments(&mut self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut rest = line;

        loop {
            if self.in_comment {
                match rest.find(COMMENT_CLOSE) {
                    Some(end) => {
                        rest = &rest[end + COMMENT_CLOSE.len()..];
                        self.in_comment = false;
                        // Keep the pieces on either side of a comment apart
                        out.push(' ');
                    }
                    None => return out,
                }
            } else {
                match rest.find(COMMENT_OPEN) {
                    Some(start) => {
                        out.push_str(&rest[..start]);
                        rest = &rest[start + COMMENT_OPEN.len()..];
                        self.in_comment = true;
                    }
                    None => {
                        out.push_str(rest);
                        return out;
                    }
                }
            }
        }
    }
}

fn contains_keyword(buffer: &str) -> bool {
    KEYWORDS.iter().any(|keyword| buffer.contains(keyword))
}

/// Split a buffer into complete declarations plus the unterminated remainder (if any).
fn split_declarations(buffer: &str) -> (Vec<String>, String) {
    let mut declarations = Vec::new();
    let mut rest = buffer;

    while let Some(start) = rest.find("<!") {
        let candidate = &rest[start..];
        match scan_declaration(candidate) {
            Scan::Closed(end) => {
                declarations.push(candidate[..=end].trim().to_string());
                rest = &candidate[end + 1..];
            }
            Scan::Interrupted(next) => {
                debug!(
                    declaration = candidate[..next].trim(),
                    "dropping declaration interrupted by another"
                );
                rest = &candidate[next..];
            }
            Scan::Open => return (declarations, candidate.to_string()),
        }
    }

    (declarations, String::new())
}

enum Scan {
    /// Byte index of the closing `>`
    Closed(usize),
    /// Byte index of a `<!` that starts before the declaration was closed
    Interrupted(usize),
    Open,
}

/// Find where the declaration that starts `text` ends, skipping quoted literals.
fn scan_declaration(text: &str) -> Scan {
    let mut quote: Option<char> = None;

    for (index, ch) in text.char_indices() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(ch),
            (None, '>') => return Scan::Closed(index),
            (None, '<') if index > 0 && text[index..].starts_with("<!") => {
                return Scan::Interrupted(index)
            }
            (None, _) => {}
        }
    }

    Scan::Open
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(source: &str) -> (Vec<String>, Option<String>) {
        let mut reader = DeclarationReader::new();
        let mut declarations = Vec::new();
        for line in source.lines() {
            declarations.extend(reader.push_line(line));
        }
        (declarations, reader.finish())
    }

    #[test]
    fn test_single_line_declaration() {
        let (decls, rest) = read_all("<!ELEMENT note (to, from)>");
        assert_eq!(decls, vec!["<!ELEMENT note (to, from)>"]);
        assert_eq!(rest, None);
    }

    #[test]
    fn test_multi_line_declaration_is_joined_with_spaces() {
        let source = "<!ATTLIST book\n    id ID #REQUIRED\n    lang CDATA #IMPLIED>";
        let (decls, _) = read_all(source);
        assert_eq!(
            decls,
            vec!["<!ATTLIST book id ID #REQUIRED lang CDATA #IMPLIED>"]
        );
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let source = "\n<!-- a comment -->\n\n<!ELEMENT a EMPTY>\n";
        let (decls, _) = read_all(source);
        assert_eq!(decls, vec!["<!ELEMENT a EMPTY>"]);
    }

    #[test]
    fn test_comment_spanning_lines() {
        let source = "<!-- first line\n  still a comment with <!ELEMENT fake EMPTY>\n-->\n<!ELEMENT real EMPTY>";
        let (decls, _) = read_all(source);
        assert_eq!(decls, vec!["<!ELEMENT real EMPTY>"]);
    }

    #[test]
    fn test_trailing_comment_after_declaration() {
        let (decls, _) = read_all("<!ELEMENT a (b)> <!-- children -->");
        assert_eq!(decls, vec!["<!ELEMENT a (b)>"]);
    }

    #[test]
    fn test_several_declarations_on_one_line() {
        let (decls, _) = read_all("<!ELEMENT a (b)><!ELEMENT b (#PCDATA)>");
        assert_eq!(decls, vec!["<!ELEMENT a (b)>", "<!ELEMENT b (#PCDATA)>"]);
    }

    #[test]
    fn test_quoted_gt_does_not_terminate() {
        let source = "<!ENTITY % cmp \"a >\nb\">";
        let (decls, rest) = read_all(source);
        assert_eq!(decls, vec!["<!ENTITY % cmp \"a > b\">"]);
        assert_eq!(rest, None);
    }

    #[test]
    fn test_interrupted_declaration_is_dropped() {
        let (decls, _) = read_all("<!ELEMENT a (b, c\n<!ELEMENT ok EMPTY>");
        assert_eq!(decls, vec!["<!ELEMENT ok EMPTY>"]);
    }

    #[test]
    fn test_prolog_noise_is_discarded() {
        let source = "<?xml version=\"1.0\"?>\n<!ELEMENT a EMPTY>";
        let (decls, _) = read_all(source);
        assert_eq!(decls, vec!["<!ELEMENT a EMPTY>"]);
    }

    #[test]
    fn test_unterminated_declaration_is_reported_by_finish() {
        let (decls, rest) = read_all("<!ELEMENT a EMPTY>\n<!ELEMENT b (c,\n d");
        assert_eq!(decls, vec!["<!ELEMENT a EMPTY>"]);
        assert_eq!(rest.as_deref(), Some("<!ELEMENT b (c, d"));
    }
}
