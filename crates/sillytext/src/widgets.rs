//! One widget per tool: the argument schema the front ends advertise and the
//! handler that turns JSON arguments into a core request.
//!
//! Widgets are built on demand. Activation hands out a [`WidgetLoader`] and
//! nothing is materialized until [`WidgetLoader::load`] is called.

use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use sillytext_core::{
    case, codec, counter, csv, diff, duplicates, find_replace, formatter, password, reverser,
    typography, uuids, whitespace, ToolId, TransformResult,
};

use crate::error::Error;

type Handler = fn(Value) -> Result<TransformResult, Error>;

pub struct Widget {
    pub tool: ToolId,
    /// JSON schema of the arguments object.
    pub input_schema: Value,
    /// Argument that receives the main text input, if the tool takes one.
    pub primary_input: Option<&'static str>,
    handler: Handler,
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("tool", &self.tool)
            .field("primary_input", &self.primary_input)
            .finish_non_exhaustive()
    }
}

impl Widget {
    fn new(
        tool: ToolId,
        input_schema: Value,
        primary_input: Option<&'static str>,
        handler: Handler,
    ) -> Self {
        Widget {
            tool,
            input_schema,
            primary_input,
            handler,
        }
    }

    pub fn invoke(&self, arguments: Value) -> Result<TransformResult, Error> {
        (self.handler)(arguments)
    }

    /// Declared JSON type of `property`, if the schema names one.
    pub fn property_type(&self, property: &str) -> Option<&str> {
        self.input_schema
            .get("properties")?
            .get(property)?
            .get("type")?
            .as_str()
    }
}

/// Lazily materialized widget for one tool.
#[derive(Debug)]
pub struct WidgetLoader {
    tool: ToolId,
    widget: OnceLock<Widget>,
}

impl WidgetLoader {
    pub fn new(tool: ToolId) -> Self {
        WidgetLoader {
            tool,
            widget: OnceLock::new(),
        }
    }

    pub fn tool(&self) -> ToolId {
        self.tool
    }

    pub fn is_loaded(&self) -> bool {
        self.widget.get().is_some()
    }

    pub fn load(&self) -> &Widget {
        self.widget.get_or_init(|| {
            log::debug!("Loading widget for {}", self.tool);
            build(self.tool)
        })
    }
}

fn parse<T: DeserializeOwned>(arguments: Value) -> Result<T, Error> {
    let arguments = match arguments {
        Value::Null => json!({}),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| Error::InvalidArguments(e.to_string()))
}

fn text_property(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn enum_property(description: &str, values: &[&str]) -> Value {
    json!({ "type": "string", "description": description, "enum": values })
}

fn flag_property(description: &str) -> Value {
    json!({ "type": "boolean", "description": description })
}

fn schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

pub fn build(tool: ToolId) -> Widget {
    match tool {
        ToolId::CaseConverter => Widget::new(
            tool,
            schema(
                json!({
                    "text": text_property("Text to convert"),
                    "style": enum_property(
                        "Target case",
                        &["uppercase", "lowercase", "titlecase", "sentencecase", "camelcase", "kebabcase", "snakecase"],
                    ),
                }),
                &["text", "style"],
            ),
            Some("text"),
            |args| Ok(case::apply(&parse(args)?)),
        ),
        ToolId::Counter => Widget::new(
            tool,
            schema(json!({ "text": text_property("Text to measure") }), &["text"]),
            Some("text"),
            |args| Ok(counter::apply(&parse(args)?)),
        ),
        ToolId::Reverser => Widget::new(
            tool,
            schema(
                json!({
                    "text": text_property("Text to reverse"),
                    "mode": enum_property(
                        "Reverse the whole text, the word order, or the letters within each word",
                        &["text", "words", "letters"],
                    ),
                }),
                &["text", "mode"],
            ),
            Some("text"),
            |args| Ok(reverser::apply(&parse(args)?)),
        ),
        ToolId::WhitespaceRemover => Widget::new(
            tool,
            schema(
                json!({
                    "text": text_property("Text to clean"),
                    "operation": enum_property(
                        "Cleanup to apply",
                        &[
                            "trim-lines",
                            "remove-extra-spaces",
                            "remove-all-whitespace",
                            "remove-all-line-breaks",
                            "tabs-to-spaces",
                            "spaces-to-tabs",
                            "normalize-newlines-lf",
                            "normalize-newlines-crlf",
                        ],
                    ),
                    "tab_width": text_property("Spaces per tab for tab conversions (default: 2)"),
                }),
                &["text", "operation"],
            ),
            Some("text"),
            |args| Ok(whitespace::apply(&parse(args)?)),
        ),
        ToolId::DuplicateRemover => Widget::new(
            tool,
            schema(json!({ "text": text_property("Lines to deduplicate") }), &["text"]),
            Some("text"),
            |args| Ok(duplicates::apply(&parse(args)?)),
        ),
        ToolId::FindAndReplace => Widget::new(
            tool,
            schema(
                json!({
                    "text": text_property("Text to search"),
                    "find": text_property("Literal text or regular expression to find"),
                    "replace": text_property("Replacement; supports $1, ${name}, $& and $$"),
                    "case_sensitive": flag_property("Match case (default: false)"),
                    "whole_word": flag_property("Only match whole words (default: false)"),
                    "regex": flag_property("Treat `find` as a regular expression (default: false)"),
                }),
                &["text", "find"],
            ),
            Some("text"),
            |args| Ok(find_replace::apply(&parse(args)?)?),
        ),
        ToolId::DiffTool => Widget::new(
            tool,
            schema(
                json!({
                    "left": text_property("Original text"),
                    "right": text_property("Changed text"),
                }),
                &["left", "right"],
            ),
            Some("left"),
            |args| Ok(diff::apply(&parse(args)?)),
        ),
        ToolId::CsvTool => Widget::new(
            tool,
            schema(
                json!({
                    "text": text_property("Delimited rows"),
                    "operation": enum_property(
                        "Reshaping to apply",
                        &["change-delimiter", "transpose", "quote-all", "unquote-all"],
                    ),
                    "from_delimiter": text_property("Input delimiter, one character (default: ',')"),
                    "to_delimiter": text_property("Output delimiter, one character (default: '|')"),
                }),
                &["text", "operation"],
            ),
            Some("text"),
            |args| Ok(csv::apply(&parse(args)?)?),
        ),
        ToolId::EncoderDecoder => Widget::new(
            tool,
            schema(
                json!({
                    "text": text_property("Text to encode or decode"),
                    "operation": enum_property(
                        "Codec direction",
                        &["b64-encode", "b64-decode", "url-encode", "url-decode"],
                    ),
                }),
                &["text", "operation"],
            ),
            Some("text"),
            |args| Ok(codec::apply(&parse(args)?)?),
        ),
        ToolId::JsonXmlFormatter => Widget::new(
            tool,
            schema(
                json!({
                    "text": text_property("JSON or XML document"),
                    "format": enum_property("Document format (default: json)", &["json", "xml"]),
                    "action": enum_property("Beautify or minify (default: beautify)", &["beautify", "minify"]),
                }),
                &["text"],
            ),
            Some("text"),
            |args| Ok(formatter::apply(&parse(args)?)?),
        ),
        ToolId::TypographyStandardizer => Widget::new(
            tool,
            schema(
                json!({
                    "text": text_property("Text to fix"),
                    "operation": enum_property(
                        "Typography fix",
                        &["to-smart-quotes", "to-straight-quotes", "standardize-dashes"],
                    ),
                }),
                &["text", "operation"],
            ),
            Some("text"),
            |args| Ok(typography::apply(&parse(args)?)),
        ),
        ToolId::UuidGenerator => Widget::new(
            tool,
            schema(
                json!({
                    "count": {
                        "type": "integer",
                        "description": "How many UUIDs to generate (default: 10)",
                        "minimum": 1,
                        "maximum": uuids::MAX_BATCH_SIZE
                    }
                }),
                &[],
            ),
            None,
            |args| Ok(uuids::apply(&parse(args)?)?),
        ),
        ToolId::PasswordGenerator => Widget::new(
            tool,
            schema(
                json!({
                    "length": {
                        "type": "integer",
                        "description": "Password length, 8 to 64 (default: 16)",
                        "minimum": password::MIN_LENGTH,
                        "maximum": password::MAX_LENGTH
                    },
                    "uppercase": flag_property("Include A-Z (default: true)"),
                    "lowercase": flag_property("Include a-z (default: true)"),
                    "digits": flag_property("Include 0-9 (default: true)"),
                    "symbols": flag_property("Include symbols (default: true)"),
                }),
                &[],
            ),
            None,
            |args| {
                let options: password::PasswordOptions = parse(args)?;
                Ok(password::apply(&options, &mut rand::thread_rng())?)
            },
        ),
    }
}
