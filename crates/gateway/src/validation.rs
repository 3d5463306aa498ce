//! Request payload validation against statically declared field tables.
//!
//! Only the JSON shape of each field is checked. A payload either yields
//! normalized values for every declared field or a map of messages keyed by
//! field name; persistence is never reached with a rejected payload.

use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequestParts, RawPathParams},
    http::request::Parts,
    Json,
};
use chrono::NaiveDate;
use fitness_database::{NewMember, NewWorkout, WorkoutChanges};
use serde_json::Value;

use crate::error::{FieldErrors, GatewayError, GatewayResult};

pub const MISSING: &str = "Missing data for required field.";
pub const NULL: &str = "Field may not be null.";
pub const UNKNOWN: &str = "Unknown field.";
pub const INVALID_INPUT: &str = "Invalid input type.";
pub const SCHEMA_KEY: &str = "_schema";
pub const INVALID_INTEGER: &str = "Not a valid integer.";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// JSON shape a declared field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Number,
    Text,
    Date,
}

impl FieldKind {
    fn invalid_message(self) -> &'static str {
        match self {
            FieldKind::Integer => INVALID_INTEGER,
            FieldKind::Number => "Not a valid number.",
            FieldKind::Text => "Not a valid string.",
            FieldKind::Date => "Not a valid date.",
        }
    }

    fn parse(self, value: &Value) -> Option<FieldValue> {
        match self {
            FieldKind::Integer => integer(value).map(FieldValue::Integer),
            FieldKind::Number => value.as_f64().map(FieldValue::Number),
            FieldKind::Text => value.as_str().map(|s| FieldValue::Text(s.to_string())),
            FieldKind::Date => value
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
                .map(FieldValue::Date),
        }
    }
}

/// JSON integers, and floats with no fractional part.
fn integer(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }

    value
        .as_f64()
        .filter(|number| number.fract() == 0.0 && number.abs() < i64::MAX as f64)
        .map(|number| number as i64)
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

/// Declared fields of one entity.
#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [FieldSpec],
}

impl Schema {
    fn declares(&self, name: &str) -> bool {
        self.fields.iter().any(|spec| spec.name == name)
    }
}

pub static MEMBER_SCHEMA: Schema = Schema {
    fields: &[
        field("id", FieldKind::Integer),
        field("name", FieldKind::Text),
        field("email", FieldKind::Text),
    ],
};

pub static WORKOUT_SCHEMA: Schema = Schema {
    fields: &[
        field("id", FieldKind::Integer),
        field("member_id", FieldKind::Integer),
        field("workout_date", FieldKind::Date),
        field("workout_type", FieldKind::Text),
        field("duration", FieldKind::Number),
        field("intensity", FieldKind::Text),
        field("notes", FieldKind::Text),
    ],
};

pub const MEMBER_CREATE_REQUIRED: &[&str] = &["name", "email"];
pub const WORKOUT_CREATE_REQUIRED: &[&str] =
    &["member_id", "workout_date", "workout_type", "duration"];
pub const WORKOUT_UPDATE_REQUIRED: &[&str] = &["workout_date", "workout_type", "duration"];

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

/// Normalized values of a payload that passed validation. Absent and null
/// optional fields are simply not present.
#[derive(Debug, Default)]
pub struct ValidatedFields {
    values: BTreeMap<&'static str, FieldValue>,
}

impl ValidatedFields {
    fn take(&mut self, name: &str) -> Option<FieldValue> {
        self.values.remove(name)
    }

    pub fn integer(&mut self, name: &str) -> GatewayResult<i64> {
        match self.take(name) {
            Some(FieldValue::Integer(value)) => Ok(value),
            _ => Err(GatewayError::field(name, MISSING)),
        }
    }

    pub fn number(&mut self, name: &str) -> GatewayResult<f64> {
        match self.take(name) {
            Some(FieldValue::Number(value)) => Ok(value),
            _ => Err(GatewayError::field(name, MISSING)),
        }
    }

    pub fn text(&mut self, name: &str) -> GatewayResult<String> {
        self.optional_text(name)
            .ok_or_else(|| GatewayError::field(name, MISSING))
    }

    pub fn optional_text(&mut self, name: &str) -> Option<String> {
        match self.take(name) {
            Some(FieldValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn date(&mut self, name: &str) -> GatewayResult<NaiveDate> {
        match self.take(name) {
            Some(FieldValue::Date(value)) => Ok(value),
            _ => Err(GatewayError::field(name, MISSING)),
        }
    }
}

/// Check `payload` against `schema`, requiring every field named in `required`.
pub fn validate(
    schema: &Schema,
    required: &[&str],
    payload: &Value,
) -> Result<ValidatedFields, FieldErrors> {
    let mut errors = FieldErrors::new();

    let Some(object) = payload.as_object() else {
        errors.insert(SCHEMA_KEY.to_string(), vec![INVALID_INPUT.to_string()]);
        return Err(errors);
    };

    for key in object.keys() {
        if !schema.declares(key) {
            errors.insert(key.clone(), vec![UNKNOWN.to_string()]);
        }
    }

    let mut validated = ValidatedFields::default();
    for spec in schema.fields {
        let is_required = required.contains(&spec.name);
        match object.get(spec.name) {
            None if is_required => {
                errors.insert(spec.name.to_string(), vec![MISSING.to_string()]);
            }
            Some(Value::Null) if is_required => {
                errors.insert(spec.name.to_string(), vec![NULL.to_string()]);
            }
            None | Some(Value::Null) => {}
            Some(value) => match spec.kind.parse(value) {
                Some(parsed) => {
                    validated.values.insert(spec.name, parsed);
                }
                None => {
                    errors.insert(
                        spec.name.to_string(),
                        vec![spec.kind.invalid_message().to_string()],
                    );
                }
            },
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(errors)
    }
}

/// Unwrap the JSON extractor result. Bodies that are not JSON at all fail the
/// same way as JSON that is not an object.
pub fn payload(body: Result<Json<Value>, JsonRejection>) -> GatewayResult<Value> {
    body.map(|Json(value)| value)
        .map_err(|_| GatewayError::field(SCHEMA_KEY, INVALID_INPUT))
}

/// A record id taken from the single parameter of the matched path.
///
/// A value that is not an integer is reported under the parameter's own name,
/// e.g. `{"errors": {"member_id": ["Not a valid integer."]}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = RawPathParams::from_request_parts(parts, state)
            .await
            .map_err(|_| GatewayError::field("id", INVALID_INTEGER))?;

        let (name, value) = params
            .iter()
            .next()
            .ok_or_else(|| GatewayError::field("id", INVALID_INTEGER))?;

        value
            .parse::<i64>()
            .map(PathId)
            .map_err(|_| GatewayError::field(name, INVALID_INTEGER))
    }
}

pub fn new_member(payload: &Value) -> GatewayResult<NewMember> {
    let mut fields = validate(&MEMBER_SCHEMA, MEMBER_CREATE_REQUIRED, payload)
        .map_err(GatewayError::Validation)?;

    Ok(NewMember {
        name: fields.text("name")?,
        email: fields.text("email")?,
    })
}

pub fn new_workout(payload: &Value) -> GatewayResult<NewWorkout> {
    let mut fields = validate(&WORKOUT_SCHEMA, WORKOUT_CREATE_REQUIRED, payload)
        .map_err(GatewayError::Validation)?;

    Ok(NewWorkout {
        member_id: fields.integer("member_id")?,
        workout_date: fields.date("workout_date")?,
        workout_type: fields.text("workout_type")?,
        duration: fields.number("duration")?,
        intensity: fields.optional_text("intensity"),
        notes: fields.optional_text("notes"),
    })
}

/// `member_id` may be sent on update but is never applied.
pub fn workout_changes(payload: &Value) -> GatewayResult<WorkoutChanges> {
    let mut fields = validate(&WORKOUT_SCHEMA, WORKOUT_UPDATE_REQUIRED, payload)
        .map_err(GatewayError::Validation)?;

    Ok(WorkoutChanges {
        workout_date: fields.date("workout_date")?,
        workout_type: fields.text("workout_type")?,
        duration: fields.number("duration")?,
        intensity: fields.optional_text("intensity"),
        notes: fields.optional_text("notes"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn errors_of(result: GatewayResult<impl std::fmt::Debug>) -> FieldErrors {
        match result {
            Err(GatewayError::Validation(errors)) => errors,
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    fn messages(errors: &FieldErrors, field: &str) -> Vec<String> {
        errors.get(field).cloned().unwrap_or_default()
    }

    #[test]
    fn test_valid_member() {
        let member = new_member(&json!({ "name": "Ana", "email": "ana@x.com" })).unwrap();
        assert_eq!(member.name, "Ana");
        assert_eq!(member.email, "ana@x.com");
    }

    #[test]
    fn test_member_id_is_accepted_and_ignored() {
        let member =
            new_member(&json!({ "id": 99, "name": "Ana", "email": "ana@x.com" })).unwrap();
        assert_eq!(member.name, "Ana");
    }

    #[test]
    fn test_missing_and_null_required_fields() {
        let errors = errors_of(new_member(&json!({ "email": null })));
        assert_eq!(messages(&errors, "name"), vec![MISSING]);
        assert_eq!(messages(&errors, "email"), vec![NULL]);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let errors = errors_of(new_member(
            &json!({ "name": "Ana", "email": "ana@x.com", "age": 31 }),
        ));
        assert_eq!(errors.len(), 1);
        assert_eq!(messages(&errors, "age"), vec![UNKNOWN]);
    }

    #[test]
    fn test_non_object_payloads() {
        for payload in [json!([1, 2]), json!("Ana"), json!(null), json!(7)] {
            let errors = errors_of(new_member(&payload));
            assert_eq!(messages(&errors, SCHEMA_KEY), vec![INVALID_INPUT]);
        }
    }

    #[test]
    fn test_each_missing_workout_field_is_named() {
        let complete = json!({
            "member_id": 1,
            "workout_date": "2024-01-01",
            "workout_type": "run",
            "duration": 30
        });

        for field in WORKOUT_CREATE_REQUIRED {
            let mut payload = complete.clone();
            payload.as_object_mut().unwrap().remove(*field);

            let errors = errors_of(new_workout(&payload));
            assert_eq!(errors.len(), 1, "only {field} should be reported");
            assert_eq!(messages(&errors, field), vec![MISSING]);
        }
    }

    #[test]
    fn test_workout_shapes() {
        let errors = errors_of(new_workout(&json!({
            "member_id": "one",
            "workout_date": "01/02/2024",
            "workout_type": 5,
            "duration": "long",
            "notes": false
        })));

        assert_eq!(messages(&errors, "member_id"), vec!["Not a valid integer."]);
        assert_eq!(messages(&errors, "workout_date"), vec!["Not a valid date."]);
        assert_eq!(messages(&errors, "workout_type"), vec!["Not a valid string."]);
        assert_eq!(messages(&errors, "duration"), vec!["Not a valid number."]);
        assert_eq!(messages(&errors, "notes"), vec!["Not a valid string."]);
    }

    #[test]
    fn test_integral_float_member_id() {
        let workout = new_workout(&json!({
            "member_id": 3.0,
            "workout_date": "2024-02-29",
            "workout_type": "swim",
            "duration": 12.5
        }))
        .unwrap();
        assert_eq!(workout.member_id, 3);
        assert_eq!(workout.duration, 12.5);

        let errors = errors_of(new_workout(&json!({
            "member_id": 3.5,
            "workout_date": "2024-02-29",
            "workout_type": "swim",
            "duration": 12.5
        })));
        assert_eq!(messages(&errors, "member_id"), vec!["Not a valid integer."]);
    }

    #[test]
    fn test_impossible_calendar_date() {
        let errors = errors_of(new_workout(&json!({
            "member_id": 1,
            "workout_date": "2023-02-29",
            "workout_type": "run",
            "duration": 30
        })));
        assert_eq!(messages(&errors, "workout_date"), vec!["Not a valid date."]);
    }

    #[test]
    fn test_optional_fields_may_be_null() {
        let workout = new_workout(&json!({
            "member_id": 1,
            "workout_date": "2024-01-01",
            "workout_type": "run",
            "duration": 30,
            "intensity": null
        }))
        .unwrap();
        assert_eq!(workout.intensity, None);
        assert_eq!(workout.notes, None);
    }

    #[test]
    fn test_update_does_not_require_member() {
        let changes = workout_changes(&json!({
            "member_id": 42,
            "workout_date": "2024-01-03",
            "workout_type": "bike",
            "duration": 60,
            "intensity": "moderate"
        }))
        .unwrap();
        assert_eq!(changes.workout_type, "bike");
        assert_eq!(changes.intensity.as_deref(), Some("moderate"));

        let errors = errors_of(workout_changes(&json!({ "workout_type": "bike" })));
        assert_eq!(messages(&errors, "workout_date"), vec![MISSING]);
        assert_eq!(messages(&errors, "duration"), vec![MISSING]);
        assert!(!errors.contains_key("member_id"));
    }
}
