#![forbid(unsafe_code)]

//! Entity escaping for canonical DataFile output.
//!
//! Attribute values come out of the parser unescaped and are escaped again
//! with the C14N attribute rules:
//! `&` → `&amp;`, `<` → `&lt;`, `"` → `&quot;`, `\t` → `&#x9;`,
//! `\n` → `&#xA;`, `\r` → `&#xD;`

/// Escape attribute value per C14N rules.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Remove every markup tag, keeping the text between tags verbatim.
///
/// Quoted attribute values inside a tag may contain `>`.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    let mut quote: Option<char> = None;
    for ch in s.chars() {
        match (in_tag, quote, ch) {
            (true, Some(q), _) if ch == q => quote = None,
            (true, Some(_), _) => {}
            (true, None, '"' | '\'') => quote = Some(ch),
            (true, None, '>') => in_tag = false,
            (true, None, _) => {}
            (false, _, '<') => in_tag = true,
            (false, _, _) => out.push(ch),
        }
    }
    out
}
