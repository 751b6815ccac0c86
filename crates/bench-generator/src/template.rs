//! Value templates.
//!
//! A template describes how a generated magnitude is rendered for a column:
//!
//! - `[1-100]` - the magnitude itself
//! - `ABC[1-10]` / `[1-10]xyz` / `s[1-7]t` - literal text around the magnitude
//! - `[1-200]0` - trailing digits act as a multiplier once coerced to a number
//! - `[-50-50]` - signed bounds
//! - `42`, `hello` - a literal returned for every row
//!
//! The template text is validated up front, so anything that can't be
//! rendered or coerced fails when the column is declared.

use bench_core::{BenchValue, ScalarType};
use chrono::DateTime;

/// Error type for template parsing and coercion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// Template text can't be parsed
    #[error("Malformed value template '{template}': {reason}")]
    Malformed { template: String, reason: String },

    /// Range bounds are inverted
    #[error("Invalid range in value template '{template}': low bound {low} is greater than high bound {high}")]
    InvalidRange {
        template: String,
        low: i64,
        high: i64,
    },

    /// Rendered text is not a valid value of the column type
    #[error("Value '{text}' from template '{template}' is not a valid {scalar_type}")]
    Coercion {
        template: String,
        scalar_type: ScalarType,
        text: String,
    },
}

/// A parsed value template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTemplate {
    text: String,
    prefix: String,
    range: Option<(i64, i64)>,
    suffix: String,
}

impl ValueTemplate {
    /// Parse a template string.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let malformed = |reason: &str| TemplateError::Malformed {
            template: text.to_string(),
            reason: reason.to_string(),
        };

        let Some(open) = text.find('[') else {
            if text.contains(']') {
                return Err(malformed("closing bracket without opening bracket"));
            }
            return Ok(Self {
                text: text.to_string(),
                prefix: text.to_string(),
                range: None,
                suffix: String::new(),
            });
        };

        let close = text[open..]
            .find(']')
            .map(|p| open + p)
            .ok_or_else(|| malformed("unclosed bracket"))?;

        let prefix = &text[..open];
        let suffix = &text[close + 1..];
        if prefix.contains(']') {
            return Err(malformed("closing bracket without opening bracket"));
        }
        if suffix.contains('[') || suffix.contains(']') {
            return Err(malformed("only one range is allowed"));
        }

        let (low, high) = parse_bounds(&text[open + 1..close])
            .ok_or_else(|| malformed("expected a range of the form [low-high]"))?;
        if low > high {
            return Err(TemplateError::InvalidRange {
                template: text.to_string(),
                low,
                high,
            });
        }

        Ok(Self {
            text: text.to_string(),
            prefix: prefix.to_string(),
            range: Some((low, high)),
            suffix: suffix.to_string(),
        })
    }

    /// The original template text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Check if this template is a constant literal.
    pub fn is_literal(&self) -> bool {
        self.range.is_none()
    }

    /// The declared range, if any.
    pub fn range(&self) -> Option<(i64, i64)> {
        self.range
    }

    /// Number of distinct magnitudes the template can render.
    pub fn cardinality(&self) -> u64 {
        match self.range {
            Some((low, high)) => (high as i128 - low as i128 + 1).min(u64::MAX as i128) as u64,
            None => 1,
        }
    }

    /// Render a magnitude through the template.
    pub fn render(&self, magnitude: i64) -> String {
        if self.is_literal() {
            return self.text.clone();
        }
        format!("{}{}{}", self.prefix, magnitude, self.suffix)
    }

    /// Coerce the literal value of a literal-only template.
    pub fn coerce_literal(&self, scalar_type: ScalarType) -> Result<BenchValue, TemplateError> {
        let text = self.text.trim();
        let value = match scalar_type {
            ScalarType::String => Some(BenchValue::String(self.text.clone())),
            ScalarType::Int => text.parse().ok().map(BenchValue::Int),
            ScalarType::Long => text.parse().ok().map(BenchValue::Long),
            ScalarType::Float => text.parse().ok().map(BenchValue::Float),
            ScalarType::Double => text.parse().ok().map(BenchValue::Double),
            ScalarType::TimestampMillis => {
                parse_timestamp_millis(text).map(BenchValue::TimestampMillis)
            }
        };
        value.ok_or_else(|| self.coercion_error(scalar_type, text))
    }

    /// Render a magnitude and coerce it to the column type.
    ///
    /// Strings keep the sign where the magnitude sits. Numbers are rendered
    /// from the absolute magnitude and the sign is applied to the parsed
    /// result, so `[1-200]0` at -5 gives -50.
    pub fn coerce(&self, scalar_type: ScalarType, magnitude: i64) -> Result<BenchValue, TemplateError> {
        if self.is_literal() {
            return self.coerce_literal(scalar_type);
        }
        let negative = magnitude < 0;
        let text = format!("{}{}{}", self.prefix, magnitude.unsigned_abs(), self.suffix);
        let value = match scalar_type {
            ScalarType::String => Some(BenchValue::String(self.render(magnitude))),
            ScalarType::Int => text
                .parse::<i64>()
                .ok()
                .map(|v| if negative { -v } else { v })
                .and_then(|v| i32::try_from(v).ok())
                .map(BenchValue::Int),
            ScalarType::Long => text
                .parse::<i64>()
                .ok()
                .map(|v| BenchValue::Long(if negative { -v } else { v })),
            ScalarType::Float => text
                .parse::<f32>()
                .ok()
                .map(|v| BenchValue::Float(if negative { -v } else { v })),
            ScalarType::Double => text
                .parse::<f64>()
                .ok()
                .map(|v| BenchValue::Double(if negative { -v } else { v })),
            ScalarType::TimestampMillis => parse_timestamp_millis(&text)
                .map(|v| BenchValue::TimestampMillis(if negative { -v } else { v })),
        };
        value.ok_or_else(|| self.coercion_error(scalar_type, &text))
    }

    /// Check that both ends of the range (or the literal) coerce to the type.
    pub fn validate(&self, scalar_type: ScalarType) -> Result<(), TemplateError> {
        match self.range {
            None => self.coerce_literal(scalar_type).map(|_| ()),
            Some((low, high)) => {
                self.coerce(scalar_type, low)?;
                self.coerce(scalar_type, high)?;
                Ok(())
            }
        }
    }

    /// Check that both ends of the negated range coerce to the type.
    ///
    /// Needed when values are negated after the distribution is applied.
    pub fn validate_negated(&self, scalar_type: ScalarType) -> Result<(), TemplateError> {
        let Some((low, high)) = self.range else {
            return Ok(());
        };
        for bound in [low, high] {
            let negated = bound.checked_neg().ok_or_else(|| {
                self.coercion_error(scalar_type, &(-(bound as i128)).to_string())
            })?;
            self.coerce(scalar_type, negated)?;
        }
        Ok(())
    }

    fn coercion_error(&self, scalar_type: ScalarType, text: &str) -> TemplateError {
        TemplateError::Coercion {
            template: self.text.clone(),
            scalar_type,
            text: text.to_string(),
        }
    }
}

/// Parse `low-high` where either bound may carry a leading minus sign.
fn parse_bounds(inner: &str) -> Option<(i64, i64)> {
    let inner = inner.trim();
    // Skip a sign on the low bound when looking for the separator
    let sep = inner.get(1..)?.find('-')? + 1;
    let low = inner[..sep].trim().parse().ok()?;
    let high = inner[sep + 1..].trim().parse().ok()?;
    Some((low, high))
}

/// Parse epoch milliseconds or an RFC 3339 timestamp.
fn parse_timestamp_millis(text: &str) -> Option<i64> {
    text.parse::<i64>().ok().or_else(|| {
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| dt.timestamp_millis())
    })
}
