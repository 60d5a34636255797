#![forbid(unsafe_code)]

//! Streaming tag scanner for locating elements by name without a DOM parse.
//!
//! A container may carry megabytes of base64 payload; only the element
//! boundaries are needed, so the scanner walks the text once and reports
//! byte offsets. Every offset sits on an ASCII delimiter and is therefore a
//! valid `str` slice boundary.

use ddoc_core::ns;

/// Byte offsets of one element in the source text.
///
/// For a self-closing element `open_end == close_start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSpan {
    /// Offset of the opening `<`.
    pub start: usize,
    /// Offset just past the `>` of the opening tag.
    pub open_end: usize,
    /// Offset of the `<` of the closing tag.
    pub close_start: usize,
    /// Offset just past the `>` of the closing tag.
    pub end: usize,
}

impl ElementSpan {
    /// The whole element, opening tag through closing tag.
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }

    pub fn open_tag<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.open_end]
    }

    /// Raw text between the opening and closing tags.
    pub fn body<'a>(&self, src: &'a str) -> &'a str {
        &src[self.open_end..self.close_start]
    }

    pub fn is_self_closing(&self) -> bool {
        self.open_end == self.end
    }
}

#[derive(Debug, Clone, Copy)]
enum TagEnd {
    /// Offset just past the closing `>`.
    At(usize),
    /// A `<` appeared before the tag was closed.
    Broken,
    Eof,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Seeking,
    InOpenTag { start: usize },
    InBody { start: usize, open_end: usize },
    Closed(ElementSpan),
}

/// Iterator over the elements named `name` in document order.
///
/// An opening tag with no closing tag before the end of the text ends the
/// scan; that element is not reported.
pub struct TagScanner<'a> {
    src: &'a str,
    name: &'a str,
    pos: usize,
}

impl<'a> TagScanner<'a> {
    pub fn new(src: &'a str, name: &'a str) -> Self {
        Self { src, name, pos: 0 }
    }

    /// Advance to the next opening tag and return `(start, open_end)`.
    ///
    /// Does not look for the closing tag, so it is cheap on large bodies.
    pub fn next_open_tag(&mut self) -> Option<(usize, usize)> {
        loop {
            let start = self.seek()?;
            match self.open_tag_end(start) {
                TagEnd::At(open_end) => {
                    self.pos = open_end;
                    return Some((start, open_end));
                }
                TagEnd::Broken => continue,
                TagEnd::Eof => return None,
            }
        }
    }

    /// Find the next `<name` followed by a tag delimiter, skipping comments.
    fn seek(&mut self) -> Option<usize> {
        let bytes = self.src.as_bytes();
        loop {
            let i = self.pos + self.src[self.pos..].find('<')?;
            let rest = &self.src[i..];
            if rest.starts_with("<!--") {
                let close = rest.find("-->")?;
                self.pos = i + close + 3;
                continue;
            }
            let after = i + 1 + self.name.len();
            if rest[1..].starts_with(self.name)
                && bytes
                    .get(after)
                    .is_some_and(|b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/')
            {
                self.pos = after;
                return Some(i);
            }
            self.pos = i + 1;
        }
    }

    /// Find the unquoted `>` ending the tag whose name ends at `self.pos`.
    fn open_tag_end(&self, start: usize) -> TagEnd {
        let bytes = self.src.as_bytes();
        let mut quote: Option<u8> = None;
        for (j, &b) in bytes.iter().enumerate().skip(self.pos) {
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'>') => return TagEnd::At(j + 1),
                (None, b'<') => {
                    log::debug!("malformed <{}> tag at offset {start}, skipped", self.name);
                    return TagEnd::Broken;
                }
                _ => {}
            }
        }
        TagEnd::Eof
    }

    /// Locate `</name>` (whitespace allowed before `>`) at or after `from`.
    /// Returns `(close_start, end)`.
    fn closing_tag(&self, from: usize) -> Option<(usize, usize)> {
        let bytes = self.src.as_bytes();
        let mut cursor = from;
        loop {
            let k = cursor + self.src[cursor..].find("</")?;
            let mut j = k + 2;
            if self.src[j..].starts_with(self.name) {
                j += self.name.len();
                while bytes.get(j).is_some_and(|b| b.is_ascii_whitespace()) {
                    j += 1;
                }
                if bytes.get(j) == Some(&b'>') {
                    return Some((k, j + 1));
                }
            }
            cursor = k + 2;
        }
    }
}

impl Iterator for TagScanner<'_> {
    type Item = ElementSpan;

    fn next(&mut self) -> Option<ElementSpan> {
        let mut state = State::Seeking;
        loop {
            state = match state {
                State::Seeking => State::InOpenTag { start: self.seek()? },
                State::InOpenTag { start } => {
                    let open_end = match self.open_tag_end(start) {
                        TagEnd::At(e) => e,
                        TagEnd::Broken => {
                            state = State::Seeking;
                            continue;
                        }
                        TagEnd::Eof => {
                            log::debug!("unterminated <{}> tag at offset {start}", self.name);
                            self.pos = self.src.len();
                            return None;
                        }
                    };
                    if self.src.as_bytes()[open_end - 2] == b'/' {
                        State::Closed(ElementSpan {
                            start,
                            open_end,
                            close_start: open_end,
                            end: open_end,
                        })
                    } else {
                        State::InBody { start, open_end }
                    }
                }
                State::InBody { start, open_end } => match self.closing_tag(open_end) {
                    Some((close_start, end)) => State::Closed(ElementSpan {
                        start,
                        open_end,
                        close_start,
                        end,
                    }),
                    None => {
                        log::debug!(
                            "<{}> at offset {start} has no closing tag, dropped",
                            self.name
                        );
                        self.pos = self.src.len();
                        return None;
                    }
                },
                State::Closed(span) => {
                    self.pos = span.end;
                    return Some(span);
                }
            };
        }
    }
}

/// All elements named `name`, in document order.
pub fn scan(src: &str, name: &str) -> Vec<ElementSpan> {
    TagScanner::new(src, name).collect()
}

/// Locate the container's DataFile elements.
///
/// `DataFile` elements are preferred; only when there are none are
/// `DataFileInfo` elements reported instead.
pub fn locate_data_files(src: &str) -> Vec<ElementSpan> {
    let spans = scan(src, ns::node::DATA_FILE);
    if !spans.is_empty() {
        return spans;
    }
    scan(src, ns::node::DATA_FILE_INFO)
}
