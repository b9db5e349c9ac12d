use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How input markup is turned into a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParseMode {
    /// `Document` when the markup carries a doctype, `<html>`, `<head>` or `<body>`,
    /// `Fragment` otherwise.
    #[default]
    Auto,
    /// Full HTML5 document parse. Missing `<html>`/`<head>`/`<body>` are implied.
    Document,
    /// Parse in a `<template>` context, so table rows and list items survive at
    /// the top level; no wrapper elements are added on output.
    Fragment,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Class token that marks the explicit template child of a container.
    pub template_class: String,
    /// Bind the fields of an unmatched object under dash-joined path names
    /// (`Artist.Name` -> `artist-name`).
    pub path_fallback: bool,
    /// Render multi-model fan-out on the rayon pool.
    pub parallel: bool,
    pub parse_mode: ParseMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            template_class: "template".to_string(),
            path_fallback: true,
            parallel: false,
            parse_mode: ParseMode::Auto,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Options)
    }

    pub fn template_class(mut self, class: impl Into<String>) -> Self {
        self.template_class = class.into();
        self
    }

    pub fn path_fallback(mut self, enabled: bool) -> Self {
        self.path_fallback = enabled;
        self
    }

    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.template_class, "template");
        assert!(options.path_fallback);
        assert!(!options.parallel);
        assert_eq!(options.parse_mode, ParseMode::Auto);
    }

    #[test]
    fn test_from_json_partial() {
        let options =
            RenderOptions::from_json(r#"{ "templateClass": "row", "parseMode": "fragment" }"#)
                .unwrap();
        assert_eq!(options.template_class, "row");
        assert_eq!(options.parse_mode, ParseMode::Fragment);
        assert!(options.path_fallback, "Unset keys should keep defaults");
    }

    #[test]
    fn test_from_json_invalid() {
        let err = RenderOptions::from_json(r#"{ "parallel": "yes" }"#).unwrap_err();
        assert!(matches!(err, Error::Options(_)));
    }
}
