use serde_json::{Map, Value};

use super::formats;
use super::{FieldError, Location};

#[derive(Debug, Clone)]
enum Check {
    IsString,
    Length { min: usize, max: usize },
    Int { min: i64, max: i64 },
    Boolean,
    Email,
    MobilePhone,
    Date,
}

/// Constraint chain for a single field.
///
/// ```ignore
/// FieldRule::body("name", "The name cannot be empty")
///     .trim()
///     .length(1, 15)
/// ```
#[derive(Debug, Clone)]
pub struct FieldRule {
    param: &'static str,
    location: Location,
    message: &'static str,
    optional: bool,
    trim: bool,
    checks: Vec<Check>,
}

impl FieldRule {
    pub fn body(param: &'static str, message: &'static str) -> Self {
        Self::new(param, Location::Body, message)
    }

    pub fn query(param: &'static str, message: &'static str) -> Self {
        Self::new(param, Location::Query, message)
    }

    fn new(param: &'static str, location: Location, message: &'static str) -> Self {
        Self {
            param,
            location,
            message,
            optional: false,
            trim: false,
            checks: Vec::new(),
        }
    }

    /// Absent fields pass. An explicit `null` is still checked.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Strip surrounding whitespace from string values before checking
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn is_string(mut self) -> Self {
        self.checks.push(Check::IsString);
        self
    }

    /// Character count within `[min, max]`
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.checks.push(Check::Length { min, max });
        self
    }

    /// Integer within `[min, max]`; the stored value becomes a JSON number
    pub fn is_int(mut self, min: i64, max: i64) -> Self {
        self.checks.push(Check::Int { min, max });
        self
    }

    /// The stored value becomes a JSON boolean
    pub fn is_boolean(mut self) -> Self {
        self.checks.push(Check::Boolean);
        self
    }

    pub fn is_email(mut self) -> Self {
        self.checks.push(Check::Email);
        self
    }

    pub fn is_mobile_phone(mut self) -> Self {
        self.checks.push(Check::MobilePhone);
        self
    }

    /// The stored value becomes a `YYYY-MM-DD` string
    pub fn is_date(mut self) -> Self {
        self.checks.push(Check::Date);
        self
    }

    /// Check the field in `input`, replacing it with its sanitized form on success.
    pub fn apply(&self, input: &mut Map<String, Value>) -> Result<(), FieldError> {
        let Some(raw) = input.get(self.param).cloned() else {
            if self.optional {
                return Ok(());
            }
            return Err(self.error(None));
        };

        let value = match raw {
            Value::String(s) if self.trim => Value::String(s.trim().to_string()),
            other => other,
        };

        let mut sanitized = value.clone();
        for check in &self.checks {
            match self.run(check, &sanitized) {
                Some(next) => sanitized = next,
                None => return Err(self.error(Some(value))),
            }
        }

        input.insert(self.param.to_string(), sanitized);
        Ok(())
    }

    /// The (possibly coerced) value when the check passes
    fn run(&self, check: &Check, value: &Value) -> Option<Value> {
        match check {
            Check::IsString => value.is_string().then(|| value.clone()),
            Check::Length { min, max } => {
                let text = as_text(value)?;
                (*min..=*max)
                    .contains(&text.chars().count())
                    .then(|| Value::String(text))
            }
            Check::Int { min, max } => {
                formats::parse_int(&int_text(value)?, *min, *max).map(Value::from)
            }
            Check::Boolean => formats::parse_boolean(&as_text(value)?).map(Value::Bool),
            Check::Email => {
                let text = as_text(value)?;
                formats::is_email(&text).then(|| Value::String(text))
            }
            Check::MobilePhone => {
                let text = as_text(value)?;
                formats::is_mobile_phone(&text).then(|| Value::String(text))
            }
            Check::Date => formats::parse_date(&as_text(value)?)
                .map(|date| Value::String(date.format("%Y-%m-%d").to_string())),
        }
    }

    fn error(&self, value: Option<Value>) -> FieldError {
        FieldError::new(value, self.message, self.param, self.location)
    }
}

/// Like [`as_text`], but a whole-valued float such as `1.0` reads as `1`
fn int_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| (f as i64).to_string())
            .or_else(|| Some(n.to_string())),
        other => as_text(other),
    }
}

/// Scalars are checked through their string form; arrays and objects never pass
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
