//! Core library for sillytext
//!
//! This crate is the **Functional Core** of sillytext: every text
//! transformation, the tool registry and the activation logic, with no I/O.
//! The `sillytext` binary is the Imperative Shell around it (CLI, MCP server,
//! HTTP navigation, file-backed storage, clipboard).
//!
//! # Architecture Overview
//!
//! - **`sillytext_core`** (this crate): pure functions over strings and
//!   plain data
//! - **`sillytext`**: argument parsing, transports, persistence and output
//!
//! The one stateful concern in here, saved find-and-replace patterns, reaches
//! storage only through the [`patterns::KeyValueStore`] trait the caller
//! supplies. Password generation takes its random source as an argument.
//!
//! # Module Organization
//!
//! Transform families, one module per tool:
//!
//! - [`case`]: upper/lower/title/sentence/camel/kebab/snake case
//! - [`counter`]: word, character and line statistics
//! - [`reverser`]: reverse text, word order or letters within words
//! - [`whitespace`]: trimming, collapsing and newline normalization
//! - [`duplicates`]: order-preserving duplicate line removal
//! - [`diff`]: positional line-by-line comparison
//! - [`codec`]: base64 and percent-encoding
//! - [`formatter`]: JSON and XML beautify/minify
//! - [`csv`]: delimiter change, transpose, quoting
//! - [`typography`]: smart quotes and dashes
//! - [`password`]: random passwords from selected character classes
//! - [`uuids`]: version 4 UUID batches
//! - [`find_replace`]: literal or regex replace-all
//!
//! Shared pieces:
//!
//! - [`output`]: the result envelope every tool returns
//! - [`error`]: [`TransformError`](error::TransformError) and storage errors
//! - [`patterns`]: saved find-and-replace patterns
//! - [`registry`]: the static tool directory
//! - [`activation`]: id validation and last-request-wins activation
//!
//! # Example Usage
//!
//! ```rust
//! use sillytext_core::duplicates::remove_duplicate_lines;
//!
//! let result = remove_duplicate_lines("b\na\nb\nc");
//! assert_eq!(result.text, "b\na\nc");
//! assert_eq!(result.lines_removed, 1);
//! ```

pub mod activation;
pub mod case;
pub mod codec;
pub mod counter;
pub mod csv;
pub mod diff;
pub mod duplicates;
pub mod error;
pub mod find_replace;
pub mod formatter;
pub mod output;
pub mod password;
pub mod patterns;
pub mod registry;
pub mod reverser;
pub mod typography;
pub mod uuids;
pub mod whitespace;

pub use error::{Result, SyntaxKind, TransformError};
pub use output::{Output, TransformResult};
pub use registry::{Registry, ToolDescriptor, ToolId};
