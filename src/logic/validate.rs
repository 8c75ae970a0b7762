use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::model::{json_kind, Genre, MoviePatch, NewMovie, DEFAULT_RATE};

pub const MIN_RELEASE_YEAR: i32 = 1900;

const TITLE_REQUIRED: &str = "Movie title is required";
const TITLE_NOT_STRING: &str = "Movie title must be a string";
const POSTER_NOT_URL: &str = "Poster must be a valid url";
const REQUIRED: &str = "Required";

/// Validation capability used by the write handlers.
///
/// `validate_full` is the create path: every field except `rate` must be
/// present and `rate` falls back to its default. `validate_partial` is the
/// update path: any subset of fields, no defaults injected.
pub trait MovieValidator: Send + Sync {
    fn validate_full(&self, input: &Value) -> Result<NewMovie, ValidationErrors>;
    fn validate_partial(&self, input: &Value) -> Result<MoviePatch, ValidationErrors>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationErrorType {
    TypeMismatch,
    MissingRequiredProperty,
    OutOfRange,
    InvalidUrl,
    InvalidEnumValue,
    InvalidValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub path: String,
    pub error_type: ValidationErrorType,
    pub message: String,
}

impl ValidationError {
    fn new(path: &str, error_type: ValidationErrorType, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            error_type,
            message: message.into(),
        }
    }

    fn type_mismatch(path: &str, expected: &str, actual: &Value) -> Self {
        Self::new(
            path,
            ValidationErrorType::TypeMismatch,
            format!("Expected {}, received {}", expected, json_kind(actual)),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every constraint violated by one input, in field order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", join_errors(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Presence {
    Required,
    Optional,
}

#[derive(Debug, Default)]
struct MovieFields {
    title: Option<String>,
    year: Option<i32>,
    director: Option<String>,
    duration: Option<u32>,
    rate: Option<f64>,
    poster: Option<String>,
    genre: Option<Vec<Genre>>,
}

struct FieldChecker<'a> {
    input: &'a Map<String, Value>,
    presence: Presence,
    errors: Vec<ValidationError>,
}

impl<'a> FieldChecker<'a> {
    fn check<T>(
        &mut self,
        field: &str,
        presence: Presence,
        missing_message: &str,
        parse: impl FnOnce(&str, &Value) -> Result<T, Vec<ValidationError>>,
    ) -> Option<T> {
        match self.input.get(field) {
            Some(value) => match parse(field, value) {
                Ok(parsed) => Some(parsed),
                Err(mut errors) => {
                    self.errors.append(&mut errors);
                    None
                }
            },
            None => {
                if presence == Presence::Required && self.presence == Presence::Required {
                    self.errors.push(ValidationError::new(
                        field,
                        ValidationErrorType::MissingRequiredProperty,
                        missing_message,
                    ));
                }
                None
            }
        }
    }
}

/// The fixed movie schema.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    min_year: i32,
    max_year: Option<i32>,
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaValidator {
    /// Release years from 1900 up to the current calendar year.
    pub fn new() -> Self {
        Self {
            min_year: MIN_RELEASE_YEAR,
            max_year: None,
        }
    }

    pub fn with_year_range(min_year: i32, max_year: i32) -> Self {
        Self {
            min_year,
            max_year: Some(max_year),
        }
    }

    fn max_year(&self) -> i32 {
        self.max_year
            .unwrap_or_else(|| chrono::Utc::now().year())
    }

    fn collect_fields(
        &self,
        input: &Value,
        presence: Presence,
    ) -> Result<MovieFields, ValidationErrors> {
        let Some(object) = input.as_object() else {
            return Err(ValidationErrors {
                errors: vec![ValidationError::type_mismatch("", "object", input)],
            });
        };

        let mut checker = FieldChecker {
            input: object,
            presence,
            errors: Vec::new(),
        };
        let (min_year, max_year) = (self.min_year, self.max_year());

        let fields = MovieFields {
            title: checker.check("title", Presence::Required, TITLE_REQUIRED, parse_title),
            year: checker.check("year", Presence::Required, REQUIRED, |path, value| {
                let year = parse_integer(path, value)?;
                check_range(path, year, i64::from(min_year), i64::from(max_year))?;
                Ok(year as i32)
            }),
            director: checker.check("director", Presence::Required, REQUIRED, |path, value| {
                parse_string(path, value).map_err(|e| vec![e])
            }),
            duration: checker.check("duration", Presence::Required, REQUIRED, parse_duration),
            rate: checker.check("rate", Presence::Optional, REQUIRED, parse_rate),
            poster: checker.check("poster", Presence::Required, REQUIRED, parse_poster),
            genre: checker.check("genre", Presence::Required, REQUIRED, parse_genres),
        };

        if checker.errors.is_empty() {
            Ok(fields)
        } else {
            Err(ValidationErrors {
                errors: checker.errors,
            })
        }
    }
}

impl MovieValidator for SchemaValidator {
    fn validate_full(&self, input: &Value) -> Result<NewMovie, ValidationErrors> {
        match self.collect_fields(input, Presence::Required)? {
            MovieFields {
                title: Some(title),
                year: Some(year),
                director: Some(director),
                duration: Some(duration),
                rate,
                poster: Some(poster),
                genre: Some(genre),
            } => Ok(NewMovie {
                title,
                year,
                director,
                duration,
                rate: rate.unwrap_or(DEFAULT_RATE),
                poster,
                genre,
            }),
            _ => Err(ValidationErrors {
                errors: vec![ValidationError::new(
                    "",
                    ValidationErrorType::InvalidValue,
                    "Incomplete movie",
                )],
            }),
        }
    }

    fn validate_partial(&self, input: &Value) -> Result<MoviePatch, ValidationErrors> {
        let fields = self.collect_fields(input, Presence::Optional)?;
        Ok(MoviePatch {
            title: fields.title,
            year: fields.year,
            director: fields.director,
            duration: fields.duration,
            rate: fields.rate,
            poster: fields.poster,
            genre: fields.genre,
        })
    }
}

fn parse_string(path: &str, value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(ValidationError::type_mismatch(path, "string", other)),
    }
}

fn parse_number(path: &str, value: &Value) -> Result<f64, ValidationError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ValidationError::type_mismatch(path, "number", value)),
        other => Err(ValidationError::type_mismatch(path, "number", other)),
    }
}

// Integral floats such as `120.0` are accepted.
fn parse_integer(path: &str, value: &Value) -> Result<i64, Vec<ValidationError>> {
    if let Some(i) = value.as_i64() {
        return Ok(i);
    }
    let number = parse_number(path, value).map_err(|e| vec![e])?;
    if number.fract() != 0.0 {
        return Err(vec![ValidationError::new(
            path,
            ValidationErrorType::TypeMismatch,
            "Expected integer, received float",
        )]);
    }
    Ok(number as i64)
}

fn check_range(path: &str, value: i64, min: i64, max: i64) -> Result<(), Vec<ValidationError>> {
    if value < min {
        return Err(vec![ValidationError::new(
            path,
            ValidationErrorType::OutOfRange,
            format!("Number must be greater than or equal to {}", min),
        )]);
    }
    if value > max {
        return Err(vec![ValidationError::new(
            path,
            ValidationErrorType::OutOfRange,
            format!("Number must be less than or equal to {}", max),
        )]);
    }
    Ok(())
}

fn parse_title(path: &str, value: &Value) -> Result<String, Vec<ValidationError>> {
    let Value::String(title) = value else {
        return Err(vec![ValidationError::new(
            path,
            ValidationErrorType::TypeMismatch,
            TITLE_NOT_STRING,
        )]);
    };
    if title.trim().is_empty() {
        return Err(vec![ValidationError::new(
            path,
            ValidationErrorType::InvalidValue,
            "Movie title must not be empty",
        )]);
    }
    Ok(title.clone())
}

fn parse_duration(path: &str, value: &Value) -> Result<u32, Vec<ValidationError>> {
    let duration = parse_integer(path, value)?;
    if duration <= 0 {
        return Err(vec![ValidationError::new(
            path,
            ValidationErrorType::OutOfRange,
            "Number must be greater than 0",
        )]);
    }
    check_range(path, duration, 1, i64::from(u32::MAX))?;
    Ok(duration as u32)
}

fn parse_rate(path: &str, value: &Value) -> Result<f64, Vec<ValidationError>> {
    let rate = parse_number(path, value).map_err(|e| vec![e])?;
    if rate < 0.0 {
        return Err(vec![ValidationError::new(
            path,
            ValidationErrorType::OutOfRange,
            "Number must be greater than or equal to 0",
        )]);
    }
    if rate > 10.0 {
        return Err(vec![ValidationError::new(
            path,
            ValidationErrorType::OutOfRange,
            "Number must be less than or equal to 10",
        )]);
    }
    Ok(rate)
}

fn parse_poster(path: &str, value: &Value) -> Result<String, Vec<ValidationError>> {
    let poster = parse_string(path, value).map_err(|e| vec![e])?;
    match url::Url::parse(&poster) {
        Ok(_) => Ok(poster),
        Err(_) => Err(vec![ValidationError::new(
            path,
            ValidationErrorType::InvalidUrl,
            POSTER_NOT_URL,
        )]),
    }
}

fn parse_genres(path: &str, value: &Value) -> Result<Vec<Genre>, Vec<ValidationError>> {
    let Value::Array(items) = value else {
        return Err(vec![ValidationError::type_mismatch(path, "array", value)]);
    };

    let mut genres = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let item_path = format!("{}[{}]", path, index);
        match item {
            Value::String(name) => match Genre::from_name(name) {
                Some(genre) => genres.push(genre),
                None => errors.push(ValidationError::new(
                    &item_path,
                    ValidationErrorType::InvalidEnumValue,
                    format!(
                        "Invalid enum value. Expected {}, received '{}'",
                        expected_genres(),
                        name
                    ),
                )),
            },
            other => errors.push(ValidationError::type_mismatch(&item_path, "string", other)),
        }
    }

    if errors.is_empty() {
        Ok(genres)
    } else {
        Err(errors)
    }
}

fn expected_genres() -> String {
    Genre::ALL
        .iter()
        .map(|g| format!("'{}'", g))
        .collect::<Vec<_>>()
        .join(" | ")
}
