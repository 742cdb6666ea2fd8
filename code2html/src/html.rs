use std::io::Write;
use std::ops::Range;

use tree_sitter_highlight::HighlightEvent;

use crate::highlight::{class_for, CodeHighlighter, ERROR_CLASS};
use crate::style::Style;
use crate::Result;

pub const NO_ATTRS: &[(&str, Option<&str>)] = &[];

pub trait Attributes {
    fn write_attrs(&self, writer: &mut impl Write) -> std::io::Result<()>;
}

impl<K, V> Attributes for &[(K, Option<V>)]
    where K: AsRef<str>,
          V: AsRef<str> {
    fn write_attrs(&self, writer: &mut impl Write) -> std::io::Result<()> {
        for (k, v) in self.iter() {
            let k = html_escape::encode_text_minimal(k.as_ref());
            if let Some(v) = v {
                write!(writer, " {k}=\"{}\"", html_escape::encode_quoted_attribute(v.as_ref()))?;
            } else {
                write!(writer, " {k}")?;
            }
        }
        Ok(())
    }
}

impl<K, V, const N: usize> Attributes for &[(K, Option<V>); N]
    where K: AsRef<str>,
          V: AsRef<str> {
    fn write_attrs(&self, writer: &mut impl Write) -> std::io::Result<()> {
        self.as_slice().write_attrs(writer)
    }
}

/// Inline HTML writer. Tracks open tags so the output is always closed.
pub struct HTMLWriter<W: Write> {
    writer: W,
    open: Vec<String>,
}

impl<W: Write> HTMLWriter<W> {

    pub fn new(writer: W) -> Self {
        Self { writer, open: vec![] }
    }

    pub fn start(&mut self, tag: impl AsRef<str>, attrs: impl Attributes) -> std::io::Result<()> {
        let tag = tag.as_ref();
        write!(self.writer, "<{tag}")?;
        attrs.write_attrs(&mut self.writer)?;
        write!(self.writer, ">")?;
        self.open.push(tag.to_string());
        Ok(())
    }

    /// Closes the innermost open tag. Does nothing when none is open.
    pub fn end(&mut self) -> std::io::Result<()> {
        if let Some(tag) = self.open.pop() {
            write!(self.writer, "</{tag}>")?;
        }
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn write_html(&mut self, raw: impl AsRef<str>) -> std::io::Result<()> {
        write!(self.writer, "{}", raw.as_ref())
    }

    pub fn write_text(&mut self, text: impl AsRef<str>) -> std::io::Result<()> {
        write!(self.writer, "{}", html_escape::encode_text(text.as_ref()))
    }

    pub fn finish(mut self) -> std::io::Result<W> {
        while !self.open.is_empty() {
            self.end()?;
        }
        Ok(self.writer)
    }
}

/// Renders highlighted source as `<div class="highlight"><pre>...</pre></div>`
/// and produces the matching stylesheet.
pub struct HtmlFormatter {
    style: Style,
    css_class: String,
}

impl HtmlFormatter {
    pub fn new(style: Style) -> Self {
        Self { style, css_class: "highlight".into() }
    }

    pub fn style_defs(&self) -> String {
        self.style.style_defs(&self.css_class)
    }

    pub fn format(&self, lexer: &impl CodeHighlighter, source: &str) -> Result<String> {
        let events = lexer.highlight(source.as_bytes())?;
        let errors = lexer.error_ranges(source.as_bytes())?;

        let mut w = HTMLWriter::new(Vec::with_capacity(source.len() * 2));
        w.start("div", &[("class", Some(self.css_class.as_str()))])?;
        w.start("pre", NO_ATTRS)?;
        let base = w.depth();

        for event in drop_empty_highlights(events) {
            match event {
                HighlightEvent::Source { start, end } => {
                    write_source(&mut w, source, start..end, &errors)?;
                }
                HighlightEvent::HighlightStart(hl) => {
                    let class = class_for(hl.0).unwrap_or_default();
                    w.start("span", &[("class", Some(class))])?;
                }
                HighlightEvent::HighlightEnd => {
                    if w.depth() > base {
                        w.end()?;
                    }
                }
            }
        }

        Ok(String::from_utf8(w.finish()?)?)
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

// Zero-width tokens (MISSING nodes) would otherwise leave empty spans.
fn drop_empty_highlights(events: Vec<HighlightEvent>) -> Vec<HighlightEvent> {
    let mut out: Vec<HighlightEvent> = Vec::with_capacity(events.len());
    for event in events {
        match event {
            HighlightEvent::Source { start, end } if start == end => {}
            HighlightEvent::HighlightEnd if matches!(out.last(), Some(HighlightEvent::HighlightStart(_))) => {
                out.pop();
            }
            event => out.push(event),
        }
    }
    out
}

// Splits one source chunk around the error ranges that overlap it.
fn write_source<W: Write>(w: &mut HTMLWriter<W>, source: &str, chunk: Range<usize>, errors: &[Range<usize>]) -> std::io::Result<()> {
    let first = errors.partition_point(|r| r.end <= chunk.start);
    let mut pos = chunk.start;
    for err in errors[first..].iter().take_while(|r| r.start < chunk.end) {
        let start = err.start.max(pos);
        let end = err.end.min(chunk.end);
        if start > pos {
            w.write_text(&source[pos..start])?;
        }
        w.start("span", &[("class", Some(ERROR_CLASS))])?;
        w.write_text(&source[start..end])?;
        w.end()?;
        pos = end;
    }
    if pos < chunk.end {
        w.write_text(&source[pos..chunk.end])?;
    }
    Ok(())
}
