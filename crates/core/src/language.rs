//! Editor languages.
//!
//! Files carry a free-form `language` string (the editor may send anything
//! its highlighter knows), but new files get a default derived from their
//! extension through the closed [`Language`] set.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Typescript,
    Python,
    Java,
    Cpp,
    C,
    Go,
    Rust,
    Html,
    Css,
    Json,
    Markdown,
    Plaintext,
}

impl Language {
    /// String representation used in the `files.language` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Javascript => "javascript",
            Self::Typescript => "typescript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::C => "c",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Plaintext => "plaintext",
        }
    }

    /// Guess the language from the last extension of a file name.
    ///
    /// Unknown or missing extensions fall back to [`Language::Plaintext`].
    pub fn from_file_name(name: &str) -> Self {
        let ext = match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return Self::Plaintext,
        };
        match ext.as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Self::Javascript,
            "ts" | "tsx" => Self::Typescript,
            "py" => Self::Python,
            "java" => Self::Java,
            "cpp" | "cc" | "cxx" | "hpp" => Self::Cpp,
            "c" | "h" => Self::C,
            "go" => Self::Go,
            "rs" => Self::Rust,
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "json" => Self::Json,
            "md" | "markdown" => Self::Markdown,
            _ => Self::Plaintext,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_extensions() {
        assert_eq!(Language::from_file_name("index.js"), Language::Javascript);
        assert_eq!(Language::from_file_name("App.TSX"), Language::Typescript);
        assert_eq!(Language::from_file_name("main.rs"), Language::Rust);
        assert_eq!(Language::from_file_name("lib.hpp"), Language::Cpp);
        assert_eq!(Language::from_file_name("README.md"), Language::Markdown);
    }

    #[test]
    fn uses_last_extension() {
        assert_eq!(Language::from_file_name("bundle.min.js"), Language::Javascript);
        assert_eq!(Language::from_file_name("data.json.bak"), Language::Plaintext);
    }

    #[test]
    fn falls_back_to_plaintext() {
        assert_eq!(Language::from_file_name("Makefile"), Language::Plaintext);
        assert_eq!(Language::from_file_name("notes.xyz"), Language::Plaintext);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Language::Cpp).unwrap();
        assert_eq!(json, "\"cpp\"");
        assert_eq!(Language::Cpp.to_string(), "cpp");
    }
}
