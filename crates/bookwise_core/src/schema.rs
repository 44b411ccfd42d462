//! JSON Schema contracts handed to the content producer.
//!
//! These mirror the validator in `validate.rs`. The producer is asked to
//! honor the schema, the validator enforces it.

use crate::SectionKind;
use serde_json::{json, Value};

/// The JSON Schema describing one section's expected output.
pub fn section_json_schema(section: SectionKind) -> Value {
    match section {
        SectionKind::Overview => json!({
            "type": "object",
            "properties": {
                "overview": {"type": "string", "minLength": 20},
                "reading_time_minutes": {"type": "integer", "minimum": 1, "maximum": 240}
            },
            "required": ["overview", "reading_time_minutes"],
            "additionalProperties": false
        }),
        SectionKind::KeyIdeas => json!({
            "type": "object",
            "properties": {
                "key_ideas": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 3,
                    "maxItems": 10
                }
            },
            "required": ["key_ideas"],
            "additionalProperties": false
        }),
        SectionKind::Chapters => json!({
            "type": "object",
            "properties": {
                "chapters": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string", "minLength": 1},
                            "summary": {"type": "string", "minLength": 10}
                        },
                        "required": ["title", "summary"],
                        "additionalProperties": false
                    },
                    "minItems": 5,
                    "maxItems": 25
                }
            },
            "required": ["chapters"],
            "additionalProperties": false
        }),
        SectionKind::Critique => json!({
            "type": "object",
            "properties": {
                "strengths": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 2,
                    "maxItems": 8
                },
                "weaknesses": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 2,
                    "maxItems": 8
                },
                "who_should_read": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 2,
                    "maxItems": 8
                }
            },
            "required": ["strengths", "weaknesses", "who_should_read"],
            "additionalProperties": false
        }),
    }
}
