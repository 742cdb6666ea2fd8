//! Python source to self-contained HTML fragments.
//!
//! [`code_to_html`] returns an inline `<style>` block followed by the
//! highlighted markup and a trailing newline, ready to be dropped into a
//! notebook cell's rich output.

use std::fmt;

pub mod highlight;
pub mod html;
pub mod lexer;
pub mod style;

pub use highlight::CodeHighlighter;
pub use html::HtmlFormatter;
pub use lexer::PythonLexer;
pub use style::{Style, TokenStyle};

pub type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>;

/// Highlight `code` as Python 3 and return `<style>...</style>` + markup + `"\n"`.
///
/// Never rejects input for being invalid Python; unparseable text is
/// rendered with the `error` class. Errors from tree-sitter itself are
/// passed through.
pub fn code_to_html(code: &str) -> Result<String> {
    let lexer = PythonLexer::new()?;
    let formatter = HtmlFormatter::default();
    let markup = formatter.format(&lexer, code)?;
    let defs = formatter.style_defs();

    let mut w = html::HTMLWriter::new(Vec::with_capacity(defs.len() + markup.len() + 16));
    w.start("style", html::NO_ATTRS)?;
    w.write_html(&defs)?;
    w.end()?;
    w.write_html(&markup)?;
    w.write_html("\n")?;
    Ok(String::from_utf8(w.finish()?)?)
}

/// Like [`code_to_html`], typed as an HTML fragment.
pub fn highlight_html(code: &str) -> Result<Highlighted> {
    code_to_html(code).map(Highlighted)
}

/// A rendered HTML fragment: style block, markup, newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted(String);

impl Highlighted {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The stylesheet between the `<style>` tags.
    pub fn style_defs(&self) -> &str {
        let body = self.0.strip_prefix("<style>").unwrap_or(&self.0);
        body.split_once("</style>").map_or("", |(defs, _)| defs)
    }

    /// Everything after the style block, without the trailing newline.
    pub fn markup(&self) -> &str {
        let rest = self.0.split_once("</style>").map_or(self.0.as_str(), |(_, rest)| rest);
        rest.strip_suffix('\n').unwrap_or(rest)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Highlighted {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Highlighted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
