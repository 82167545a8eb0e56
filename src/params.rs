use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ParamError;
use crate::math::Rgb;

/// Value of one tunable field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f32),
    Bool(bool),
    Color(Rgb),
}

impl ParamValue {
    pub fn as_number(self) -> Option<f32> {
        match self {
            ParamValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_color(self) -> Option<Rgb> {
        match self {
            ParamValue::Color(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Color(c) => write!(f, "{c}"),
        }
    }
}

/// Editor kind and accepted range of a field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Numeric { min: f32, max: f32, step: Option<f32> },
    Boolean,
    Color,
}

impl FieldKind {
    fn expected(&self) -> &'static str {
        match self {
            FieldKind::Numeric { .. } => "numeric",
            FieldKind::Boolean => "boolean",
            FieldKind::Color => "color",
        }
    }

    /// Validates `value` for this field, clamping numbers into range and
    /// snapping them to the step grid.
    pub fn coerce(&self, field: &str, value: ParamValue) -> Result<ParamValue, ParamError> {
        match (*self, value) {
            (FieldKind::Numeric { min, max, step }, ParamValue::Number(n)) => {
                if !n.is_finite() {
                    return Err(ParamError::NotFinite(field.to_string()));
                }
                let mut n = n.clamp(min, max);
                if let Some(step) = step.filter(|s| *s > 0.0) {
                    n = (min + ((n - min) / step).round() * step).clamp(min, max);
                }
                Ok(ParamValue::Number(n))
            }
            (FieldKind::Boolean, ParamValue::Bool(_)) | (FieldKind::Color, ParamValue::Color(_)) => Ok(value),
            _ => Err(ParamError::KindMismatch {
                field: field.to_string(),
                expected: self.expected(),
            }),
        }
    }

    /// Parses command-line text (`3`, `true`, `#ff00ff`) and coerces it
    pub fn parse(&self, field: &str, text: &str) -> Result<ParamValue, ParamError> {
        let unparsable = || ParamError::Unparsable {
            field: field.to_string(),
            value: text.to_string(),
        };

        let value = match self {
            FieldKind::Numeric { .. } => ParamValue::Number(text.trim().parse().map_err(|_| unparsable())?),
            FieldKind::Boolean => ParamValue::Bool(text.trim().parse().map_err(|_| unparsable())?),
            FieldKind::Color => ParamValue::Color(Rgb::parse(text).ok_or_else(unparsable)?),
        };
        self.coerce(field, value)
    }
}

/// What a field change invalidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Affects {
    /// Shape-defining: the geometry is discarded and rebuilt
    Geometry,
    /// Material properties, updated in place
    Material,
    Lighting,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub affects: Affects,
    pub default: ParamValue,
}

impl FieldDescriptor {
    /// Continuous numeric field affecting geometry
    pub fn numeric(name: &'static str, default: f32, min: f32, max: f32) -> Self {
        Self {
            name,
            kind: FieldKind::Numeric { min, max, step: None },
            affects: Affects::Geometry,
            default: ParamValue::Number(default),
        }
    }

    /// Integer-stepped numeric field affecting geometry
    pub fn stepped(name: &'static str, default: f32, min: f32, max: f32) -> Self {
        Self {
            kind: FieldKind::Numeric { min, max, step: Some(1.0) },
            ..Self::numeric(name, default, min, max)
        }
    }

    pub fn boolean(name: &'static str, default: bool, affects: Affects) -> Self {
        Self {
            name,
            kind: FieldKind::Boolean,
            affects,
            default: ParamValue::Bool(default),
        }
    }

    pub fn color(name: &'static str, default: Rgb, affects: Affects) -> Self {
        Self {
            name,
            kind: FieldKind::Color,
            affects,
            default: ParamValue::Color(default),
        }
    }
}

/// Current values of every field of one shape, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParamRecord {
    values: BTreeMap<String, ParamValue>,
}

impl ParamRecord {
    /// Record holding each field's default
    pub fn from_fields(fields: &[FieldDescriptor]) -> Self {
        Self {
            values: fields
                .iter()
                .map(|f| (f.name.to_string(), f.default))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).copied()
    }

    pub fn number(&self, name: &str) -> Result<f32, ParamError> {
        self.typed(name, "numeric", ParamValue::as_number)
    }

    pub fn flag(&self, name: &str) -> Result<bool, ParamError> {
        self.typed(name, "boolean", ParamValue::as_bool)
    }

    pub fn color(&self, name: &str) -> Result<Rgb, ParamError> {
        self.typed(name, "color", ParamValue::as_color)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub(crate) fn insert(&mut self, name: &str, value: ParamValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Overwrites an existing entry. Unknown names are rejected.
    pub(crate) fn assign(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(ParamError::UnknownField(name.to_string())),
        }
    }

    fn typed<T>(
        &self,
        name: &str,
        expected: &'static str,
        extract: impl Fn(ParamValue) -> Option<T>,
    ) -> Result<T, ParamError> {
        let value = self
            .get(name)
            .ok_or_else(|| ParamError::UnknownField(name.to_string()))?;
        extract(value).ok_or_else(|| ParamError::KindMismatch {
            field: name.to_string(),
            expected,
        })
    }
}
