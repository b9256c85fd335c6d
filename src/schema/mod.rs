//! Response normalization: declarative per-capability schemas evaluated by
//! one strict parse routine.
//!
//! This is the trust boundary between the remote model's output and the rest
//! of the engine. Adding a capability means adding a schema table below, not
//! new parsing code. Any violation is total failure of the AI path; callers
//! degrade to the rule-based deriver, never keep a partial result.

use serde_json::Value;

use crate::error::{NormalizeError, NormalizeResult};

/// Expected type of a declared field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    TextList,
    ObjectList(&'static [FieldSpec]),
}

/// One declared field of a capability's response schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// A capability's expected response shape.
#[derive(Debug, Clone, Copy)]
pub struct ResponseSchema {
    pub capability: &'static str,
    pub fields: &'static [FieldSpec],
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: false,
    }
}

/// Element shape of `identified_distortions`.
const IDENTIFIED_DISTORTION_FIELDS: &[FieldSpec] = &[
    required("distortion_id", FieldKind::Text),
    optional("confidence", FieldKind::Number),
    optional("explanation", FieldKind::Text),
];

/// Element shape of `reframes`.
const REFRAME_FIELDS: &[FieldSpec] = &[
    required("perspective", FieldKind::Text),
    optional("explanation", FieldKind::Text),
];

/// Element shape of action plan `steps`.
const ACTION_STEP_FIELDS: &[FieldSpec] = &[
    required("action", FieldKind::Text),
    optional("timeframe", FieldKind::Text),
    optional("difficulty", FieldKind::Text),
];

/// Schema for the distortion-analysis capability.
pub const DISTORTION_ANALYSIS_SCHEMA: ResponseSchema = ResponseSchema {
    capability: "distortion_analysis",
    fields: &[
        required(
            "identified_distortions",
            FieldKind::ObjectList(IDENTIFIED_DISTORTION_FIELDS),
        ),
        required("reframes", FieldKind::ObjectList(REFRAME_FIELDS)),
        optional("compassionate_response", FieldKind::Text),
        optional("suggested_exercises", FieldKind::TextList),
    ],
};

/// Schema for the session-summary capability.
pub const SESSION_SUMMARY_SCHEMA: ResponseSchema = ResponseSchema {
    capability: "session_summary",
    fields: &[
        required("summary", FieldKind::Text),
        optional("themes", FieldKind::TextList),
        optional("emotions", FieldKind::TextList),
        optional("action_items", FieldKind::TextList),
    ],
};

/// Schema for the thought-categorization capability.
pub const CATEGORIZATION_SCHEMA: ResponseSchema = ResponseSchema {
    capability: "categorization",
    fields: &[
        required("themes", FieldKind::TextList),
        required("emotions", FieldKind::TextList),
        optional("key_phrase", FieldKind::Text),
    ],
};

/// Schema for the action-plan capability.
pub const ACTION_PLAN_SCHEMA: ResponseSchema = ResponseSchema {
    capability: "action_plan",
    fields: &[
        required("goal", FieldKind::Text),
        required("steps", FieldKind::ObjectList(ACTION_STEP_FIELDS)),
        optional("first_step", FieldKind::Text),
    ],
};

/// Schema for the reminder capability.
pub const REMINDER_SCHEMA: ResponseSchema = ResponseSchema {
    capability: "reminder",
    fields: &[
        required("reminder_text", FieldKind::Text),
        optional("suggested_time", FieldKind::Text),
        optional("category", FieldKind::Text),
    ],
};

/// Strictly parse raw completion text against a capability schema.
///
/// Returns the parsed JSON object on success. Presence and type are checked
/// here; defaulting of absent optional fields is the orchestrator's job, so
/// this routine stays capability-agnostic. Extra undeclared fields are
/// ignored.
pub fn normalize(raw: &str, schema: &ResponseSchema) -> NormalizeResult<Value> {
    let value: Value = serde_json::from_str(raw.trim()).map_err(|e| NormalizeError::Parse {
        message: e.to_string(),
    })?;

    let object = value.as_object().ok_or(NormalizeError::NotAnObject)?;
    check_fields(object, schema.fields, "")?;

    Ok(value)
}

fn check_fields(
    object: &serde_json::Map<String, Value>,
    fields: &[FieldSpec],
    prefix: &str,
) -> NormalizeResult<()> {
    for spec in fields {
        let path = if prefix.is_empty() {
            spec.name.to_string()
        } else {
            format!("{prefix}.{}", spec.name)
        };

        match object.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(NormalizeError::MissingField { field: path });
                }
            }
            Some(value) => check_kind(value, spec.kind, &path)?,
        }
    }
    Ok(())
}

fn check_kind(value: &Value, kind: FieldKind, path: &str) -> NormalizeResult<()> {
    let wrong = |expected: &str| NormalizeError::WrongType {
        field: path.to_string(),
        expected: expected.to_string(),
    };

    match kind {
        FieldKind::Text => value.as_str().map(|_| ()).ok_or_else(|| wrong("string")),
        FieldKind::Number => value.as_f64().map(|_| ()).ok_or_else(|| wrong("number")),
        FieldKind::Boolean => value.as_bool().map(|_| ()).ok_or_else(|| wrong("boolean")),
        FieldKind::TextList => {
            let items = value.as_array().ok_or_else(|| wrong("array of strings"))?;
            if items.iter().all(|i| i.is_string()) {
                Ok(())
            } else {
                Err(wrong("array of strings"))
            }
        }
        FieldKind::ObjectList(element_fields) => {
            let items = value.as_array().ok_or_else(|| wrong("array of objects"))?;
            for (i, item) in items.iter().enumerate() {
                let object = item
                    .as_object()
                    .ok_or_else(|| wrong("array of objects"))?;
                check_fields(object, element_fields, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
    }
}
