//! Raw `Docs.json` document model
//!
//! The game exports its class defaults as a list of native classes, each with a
//! list of flat, string-valued definitions. Only the handful of accessors the
//! parsers need are provided here; everything else in a definition is ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ConvertError, Result};

/// One top-level entry of the docs file
#[derive(Debug, Clone, Deserialize)]
pub struct NativeClass {
    #[serde(rename = "NativeClass", alias = "tag")]
    pub tag: String,
    #[serde(rename = "Classes", alias = "definitions", default)]
    pub definitions: Vec<ClassDefinition>,
}

/// A single class definition, kept as the raw JSON object
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ClassDefinition {
    fields: Map<String, Value>,
}

/// A single `mFuel` entry of a power generator
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FuelSpec {
    #[serde(rename = "mFuelClass")]
    pub fuel_class: String,
    #[serde(rename = "mSupplementalResourceClass", default)]
    pub supplemental_class: String,
    #[serde(rename = "mByproduct", default)]
    pub by_product: String,
    #[serde(rename = "mByproductAmount", default)]
    pub by_product_amount: String,
}

impl ClassDefinition {
    /// `ClassName`, or an empty string when the definition has none.
    pub fn class_name(&self) -> &str {
        self.fields
            .get("ClassName")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn str_field(&self, field: &'static str) -> Result<&str> {
        match self.fields.get(field) {
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(ConvertError::InvalidFieldType {
                class: self.class_name().to_string(),
                field,
            }),
            None => Err(self.missing(field)),
        }
    }

    /// Reads a string field, treating absence as the empty string.
    pub fn str_field_or_empty(&self, field: &'static str) -> Result<&str> {
        if self.has_field(field) {
            self.str_field(field)
        } else {
            Ok("")
        }
    }

    /// Numbers are exported as strings such as `"4.000000"`; plain JSON
    /// numbers are accepted as well. `NaN` and infinities are rejected.
    pub fn f64_field(&self, field: &'static str) -> Result<f64> {
        match self.fields.get(field) {
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| self.invalid(field, n.to_string())),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| self.invalid(field, s.clone())),
            Some(_) => Err(ConvertError::InvalidFieldType {
                class: self.class_name().to_string(),
                field,
            }),
            None => Err(self.missing(field)),
        }
    }

    /// Like [`Self::f64_field`], but the value must be above zero. Used for
    /// fields that end up as divisors.
    pub fn positive_f64_field(&self, field: &'static str) -> Result<f64> {
        let value = self.f64_field(field)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(self.invalid(field, value.to_string()))
        }
    }

    pub fn u32_field(&self, field: &'static str) -> Result<u32> {
        match self.fields.get(field) {
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| self.invalid(field, n.to_string())),
            Some(Value::String(s)) => s
                .trim()
                .parse::<u32>()
                .map_err(|_| self.invalid(field, s.clone())),
            Some(_) => Err(ConvertError::InvalidFieldType {
                class: self.class_name().to_string(),
                field,
            }),
            None => Err(self.missing(field)),
        }
    }

    /// `"True"`/`"False"` flags; anything other than a case-insensitive
    /// `true` reads as false.
    pub fn bool_field(&self, field: &'static str) -> Result<bool> {
        match self.fields.get(field) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) => Ok(s.eq_ignore_ascii_case("true")),
            Some(_) => Err(ConvertError::InvalidFieldType {
                class: self.class_name().to_string(),
                field,
            }),
            None => Err(self.missing(field)),
        }
    }

    pub fn fuel_specs(&self, field: &'static str) -> Result<Vec<FuelSpec>> {
        let value = self.fields.get(field).ok_or_else(|| self.missing(field))?;
        match value {
            Value::Array(entries) => entries
                .iter()
                .map(|entry| {
                    FuelSpec::deserialize(entry).map_err(|source| ConvertError::InvalidFuel {
                        generator: self.class_name().to_string(),
                        source,
                    })
                })
                .collect(),
            _ => Err(ConvertError::InvalidFieldType {
                class: self.class_name().to_string(),
                field,
            }),
        }
    }

    fn missing(&self, field: &'static str) -> ConvertError {
        ConvertError::MissingField {
            class: self.class_name().to_string(),
            field,
        }
    }

    fn invalid(&self, field: &'static str, value: String) -> ConvertError {
        ConvertError::InvalidNumber {
            class: self.class_name().to_string(),
            field,
            value,
        }
    }
}
