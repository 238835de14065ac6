//! The static directory of tools.
//!
//! A [`Registry`] is built once from a compiled-in table and never mutated.
//! Its order is the display order; lookups by [`ToolId`] are direct indexes
//! into that table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable, URL-safe identifier of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolId {
    CaseConverter,
    Counter,
    Reverser,
    WhitespaceRemover,
    DuplicateRemover,
    FindAndReplace,
    DiffTool,
    CsvTool,
    EncoderDecoder,
    JsonXmlFormatter,
    TypographyStandardizer,
    UuidGenerator,
    PasswordGenerator,
}

impl ToolId {
    /// Every tool in display order.
    pub const ALL: [ToolId; 13] = [
        ToolId::CaseConverter,
        ToolId::Counter,
        ToolId::Reverser,
        ToolId::WhitespaceRemover,
        ToolId::DuplicateRemover,
        ToolId::FindAndReplace,
        ToolId::DiffTool,
        ToolId::CsvTool,
        ToolId::EncoderDecoder,
        ToolId::JsonXmlFormatter,
        ToolId::TypographyStandardizer,
        ToolId::UuidGenerator,
        ToolId::PasswordGenerator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolId::CaseConverter => "case-converter",
            ToolId::Counter => "counter",
            ToolId::Reverser => "reverser",
            ToolId::WhitespaceRemover => "whitespace-remover",
            ToolId::DuplicateRemover => "duplicate-remover",
            ToolId::FindAndReplace => "find-and-replace",
            ToolId::DiffTool => "diff-tool",
            ToolId::CsvTool => "csv-tool",
            ToolId::EncoderDecoder => "encoder-decoder",
            ToolId::JsonXmlFormatter => "json-xml-formatter",
            ToolId::TypographyStandardizer => "typography-standardizer",
            ToolId::UuidGenerator => "uuid-generator",
            ToolId::PasswordGenerator => "password-generator",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool id `{0}`")]
pub struct UnknownTool(pub String);

impl FromStr for ToolId {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

/// Symbolic icon name; rendering is the presentation layer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconRef {
    CaseSensitive,
    Sigma,
    ArrowLeftRight,
    Eraser,
    CopyX,
    Search,
    Diff,
    Table,
    Code,
    Braces,
    Quote,
    KeyRound,
    Shield,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub id: ToolId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: IconRef,
    pub seo_title: &'static str,
    pub seo_description: &'static str,
}

impl ToolDescriptor {
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Title and description for a tool page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub const NOT_FOUND_TITLE: &str = "Tool not found";

#[derive(Debug, Clone)]
pub struct Registry {
    tools: Vec<ToolDescriptor>,
}

impl Registry {
    /// Registry holding every built-in tool in display order.
    pub fn builtin() -> Self {
        let tools: Vec<ToolDescriptor> = ToolId::ALL.into_iter().map(builtin_descriptor).collect();
        debug_assert!(tools.iter().enumerate().all(|(i, t)| t.id.index() == i));
        Registry { tools }
    }

    /// Resolves a raw id such as a URL segment.
    pub fn lookup(&self, raw_id: &str) -> Option<&ToolDescriptor> {
        raw_id.parse::<ToolId>().ok().map(|id| self.get(id))
    }

    pub fn get(&self, id: ToolId) -> &ToolDescriptor {
        &self.tools[id.index()]
    }

    pub fn list_all(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Case-insensitive substring match on name and description. An empty
    /// query returns everything.
    pub fn search(&self, query: &str) -> Vec<&ToolDescriptor> {
        let needle = query.to_lowercase();
        self.tools.iter().filter(|t| t.matches(&needle)).collect()
    }

    pub fn page_metadata(&self, raw_id: &str) -> PageMetadata {
        match self.lookup(raw_id) {
            Some(tool) => PageMetadata {
                title: tool.seo_title.to_string(),
                description: Some(tool.seo_description.to_string()),
            },
            None => PageMetadata {
                title: NOT_FOUND_TITLE.to_string(),
                description: None,
            },
        }
    }
}

fn builtin_descriptor(id: ToolId) -> ToolDescriptor {
    let (name, description, icon, seo_title, seo_description) = match id {
        ToolId::CaseConverter => (
            "Case Converter",
            "Instantly convert text to any case.",
            IconRef::CaseSensitive,
            "Online Case Converter Tool",
            "Easily convert text between uppercase, lowercase, title case, sentence case, camel case, and more with our free case converter tool. Perfect for developers, writers, and editors.",
        ),
        ToolId::Counter => (
            "Word Counter",
            "Get lightning-fast word & character counts.",
            IconRef::Sigma,
            "Word and Character Counter",
            "Free online tool to count words, characters, sentences, and lines in your text. Instant statistics for writers, students, and professionals.",
        ),
        ToolId::Reverser => (
            "Text Reverser",
            "Flip text, words, or letters in a click.",
            IconRef::ArrowLeftRight,
            "Text Reverser Tool",
            "Reverse text, flip words, and mirror letters with our simple online text reverser. Useful for data processing, creating fun text, and more.",
        ),
        ToolId::WhitespaceRemover => (
            "Whitespace Cleaner",
            "Erase extra spaces, tabs & line breaks.",
            IconRef::Eraser,
            "Whitespace and Line Break Remover",
            "Clean up your text by removing extra spaces, tabs, and line breaks. A handy tool for formatting text for web pages, documents, or code.",
        ),
        ToolId::DuplicateRemover => (
            "Duplicate Line Remover",
            "Find and delete duplicate lines instantly.",
            IconRef::CopyX,
            "Duplicate Line Remover Online",
            "Quickly remove duplicate lines from any text or list. Just paste your text and get a clean, unique list in seconds. Free and easy to use.",
        ),
        ToolId::FindAndReplace => (
            "Find and Replace",
            "Perform powerful text replacements.",
            IconRef::Search,
            "Online Find and Replace Tool",
            "Quickly find and replace words or patterns in your text. Supports case-sensitive, whole word, and regular expression searches.",
        ),
        ToolId::DiffTool => (
            "Text Diff Checker",
            "Compare two texts & see the difference.",
            IconRef::Diff,
            "Text Difference Checker (Diff Tool)",
            "Compare two text files or snippets to find the differences. Our free online diff tool highlights changes between two versions of your text.",
        ),
        ToolId::CsvTool => (
            "CSV Tools",
            "Transpose, delimit, and manage CSVs.",
            IconRef::Table,
            "Online CSV Editor & Tools",
            "A free suite of online tools for CSV data: change delimiters, transpose rows and columns, manage quotes, and more. Perfect for data cleaning and preparation.",
        ),
        ToolId::EncoderDecoder => (
            "Encoder/Decoder",
            "Encode/Decode Base64 and URLs.",
            IconRef::Code,
            "Base64 & URL Encoder/Decoder",
            "Free online tool to encode and decode text using Base64 or URL encoding (percent-encoding). Simple and fast for web developers and programmers.",
        ),
        ToolId::JsonXmlFormatter => (
            "JSON/XML Formatter",
            "Beautify or minify structured data.",
            IconRef::Braces,
            "JSON & XML Formatter/Minifier",
            "Beautify, format, or minify JSON and XML data with our easy-to-use online tool. Essential for developers and data analysts working with structured data.",
        ),
        ToolId::TypographyStandardizer => (
            "Typography Fixer",
            "Convert to smart quotes & fix dashes.",
            IconRef::Quote,
            "Typography Standardizer Tool",
            "Automatically convert plain quotes to smart (curly) quotes and standardize hyphens and dashes for professional-looking text.",
        ),
        ToolId::UuidGenerator => (
            "UUID Generator",
            "Generate unique identifiers (UUIDs).",
            IconRef::KeyRound,
            "UUID/GUID Generator",
            "Generate universally unique identifiers (UUIDs/GUIDs) for your software development needs. Quick, simple, and reliable.",
        ),
        ToolId::PasswordGenerator => (
            "Password Generator",
            "Create strong, secure passwords.",
            IconRef::Shield,
            "Strong Password Generator",
            "Generate secure, random passwords to protect your online accounts. Customize length and character types for maximum security.",
        ),
    };

    ToolDescriptor {
        id,
        name,
        description,
        icon,
        seo_title,
        seo_description,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_builtin_registry_order_and_uniqueness() {
        let registry = Registry::builtin();
        let ids: Vec<_> = registry.list_all().iter().map(|t| t.id).collect();
        assert_eq!(ids, ToolId::ALL.to_vec());

        let unique: HashSet<_> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_lookup_round_trips_every_id() {
        let registry = Registry::builtin();
        for id in ToolId::ALL {
            assert_eq!(registry.lookup(id.as_str()).map(|t| t.id), Some(id));
            assert_eq!(id.as_str().parse::<ToolId>().unwrap(), id);
        }
    }

    #[test]
    fn test_lookup_unknown_id() {
        let registry = Registry::builtin();
        assert!(registry.lookup("nope").is_none());
        assert!(registry.lookup("").is_none());
        assert!(registry.lookup("Counter").is_none());
    }

    #[test]
    fn test_serde_names_match_url_ids() {
        for id in ToolId::ALL {
            assert_eq!(serde_json::to_value(id).unwrap(), id.as_str());
        }
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let registry = Registry::builtin();

        let by_name: Vec<_> = registry.search("csv").iter().map(|t| t.id).collect();
        assert_eq!(by_name, vec![ToolId::CsvTool]);

        let by_description: Vec<_> = registry.search("BASE64").iter().map(|t| t.id).collect();
        assert_eq!(by_description, vec![ToolId::EncoderDecoder]);

        assert_eq!(registry.search("").len(), ToolId::ALL.len());
        assert!(registry.search("zzz").is_empty());
    }

    #[test]
    fn test_page_metadata() {
        let registry = Registry::builtin();

        let found = registry.page_metadata("uuid-generator");
        assert_eq!(found.title, "UUID/GUID Generator");
        assert!(found.description.unwrap().starts_with("Generate universally"));

        let missing = registry.page_metadata("missing");
        assert_eq!(missing.title, NOT_FOUND_TITLE);
        assert!(missing.description.is_none());
    }
}
