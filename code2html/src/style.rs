use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::Result;

const DEFAULT_STYLE_SRC: &str = include_str!("../styles/default.yaml");

lazy_static! {
    static ref DEFAULT_STYLE: Style =
        Style::from_yaml(DEFAULT_STYLE_SRC).expect("bundled style is valid");
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStyle {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub border: Option<String>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl TokenStyle {
    /// CSS declarations for this token, without braces. Empty when the
    /// token is unstyled.
    pub fn to_css(&self) -> String {
        let mut decls = vec![];
        if let Some(color) = &self.color {
            decls.push(format!("color: {color}"));
        }
        if let Some(bg) = &self.background {
            decls.push(format!("background-color: {bg}"));
        }
        if let Some(border) = &self.border {
            decls.push(format!("border: {border}"));
        }
        if self.bold {
            decls.push("font-weight: bold".into());
        }
        if self.italic {
            decls.push("font-style: italic".into());
        }
        if self.underline {
            decls.push("text-decoration: underline".into());
        }
        decls.join("; ")
    }
}

/// A palette mapping token classes to their look.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub name: String,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default, rename = "line-height")]
    pub line_height: Option<String>,
    #[serde(default)]
    pub tokens: BTreeMap<String, TokenStyle>,
}

impl Style {
    pub fn from_yaml(src: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(src)?)
    }

    /// Stylesheet rules scoped under `.{wrapper_class}`, one per line.
    pub fn style_defs(&self, wrapper_class: &str) -> String {
        let mut css = String::new();
        if let Some(bg) = &self.background {
            css.push_str(&format!(".{wrapper_class} {{ background: {bg}; }}\n"));
        }
        if let Some(lh) = &self.line_height {
            css.push_str(&format!(".{wrapper_class} pre {{ line-height: {lh}; }}\n"));
        }
        for (class, token) in &self.tokens {
            let decls = token.to_css();
            if decls.is_empty() {
                continue;
            }
            css.push_str(&format!(".{wrapper_class} .{class} {{ {decls} }}\n"));
        }
        css
    }
}

impl Default for Style {
    fn default() -> Self {
        DEFAULT_STYLE.clone()
    }
}
