#![forbid(unsafe_code)]

//! Per-element transform trait and the container splice that drives it.

use ddoc_core::Error;
use ddoc_xml::{locate_data_files, ElementSpan};

/// A rewrite of a single DataFile element.
pub trait DataFileTransform {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Rewrite one element's markup.
    ///
    /// `Ok(None)` leaves the element exactly as it was. An `Err` aborts the
    /// whole container transform.
    fn apply(&self, element: &str) -> Result<Option<String>, Error>;
}

/// Apply `transform` to every DataFile element of `xml`, in document order.
///
/// The output is rebuilt from the original text and the element offsets, so
/// a replacement is never rescanned and text outside the elements is copied
/// byte for byte.
pub fn apply_to_container(transform: &dyn DataFileTransform, xml: &str) -> Result<String, Error> {
    let spans = locate_data_files(xml);
    log::debug!("{}: {} DataFile element(s)", transform.name(), spans.len());
    splice(xml, &spans, |span| transform.apply(span.text(xml)))
}

/// Rebuild `src` with each span replaced by `f`'s result (or kept on `None`).
pub fn splice<F>(src: &str, spans: &[ElementSpan], mut f: F) -> Result<String, Error>
where
    F: FnMut(&ElementSpan) -> Result<Option<String>, Error>,
{
    let mut out = String::with_capacity(src.len());
    let mut cursor = 0;
    for span in spans {
        out.push_str(&src[cursor..span.start]);
        match f(span)? {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(span.text(src)),
        }
        cursor = span.end;
    }
    out.push_str(&src[cursor..]);
    Ok(out)
}
