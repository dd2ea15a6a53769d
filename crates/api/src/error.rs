use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
	#[error("API \"{0}\" not found in ApiFactory.")]
	NotFound(String),

	#[error("request to {url} failed: {source}")]
	Http {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("could not build HTTP client: {0}")]
	Client(#[source] reqwest::Error),

	#[error("invalid value for header {name}")]
	InvalidHeader {
		name: &'static str,
		#[source]
		source: reqwest::header::InvalidHeaderValue,
	},

	#[error("response body is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Validation(#[from] ValidationError),
}

/// Category of a failed validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
	/// A required property is absent.
	Schema,
	/// A property holds the wrong JSON type.
	Type,
	/// A string property does not match its expected pattern.
	Format,
	/// A value is well-typed but out of range.
	BusinessRule,
}

/// First violated rule found while validating a response body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
	#[error("missing required property '{field}'")]
	Schema { field: String },

	#[error("property '{field}' must be {expected}, got {found}")]
	Type {
		field: String,
		expected: &'static str,
		found: &'static str,
	},

	#[error("property '{field}' has an invalid format ({rule}): {value:?}")]
	Format {
		field: String,
		rule: &'static str,
		value: String,
	},

	#[error("property '{field}' violates rule: {rule}")]
	BusinessRule { field: String, rule: String },

	#[error("user validation failed at index {index}: {source}")]
	Item {
		index: usize,
		#[source]
		source: Box<ValidationError>,
	},
}

impl ValidationError {
	pub fn kind(&self) -> ValidationKind {
		match self {
			ValidationError::Schema { .. } => ValidationKind::Schema,
			ValidationError::Type { .. } => ValidationKind::Type,
			ValidationError::Format { .. } => ValidationKind::Format,
			ValidationError::BusinessRule { .. } => ValidationKind::BusinessRule,
			ValidationError::Item { source, .. } => source.kind(),
		}
	}

	/// Dotted path of the offending property, innermost for item failures.
	pub fn field(&self) -> &str {
		match self {
			ValidationError::Schema { field }
			| ValidationError::Type { field, .. }
			| ValidationError::Format { field, .. }
			| ValidationError::BusinessRule { field, .. } => field,
			ValidationError::Item { source, .. } => source.field(),
		}
	}

	/// Index of the failing list element, if any.
	pub fn index(&self) -> Option<usize> {
		match self {
			ValidationError::Item { index, .. } => Some(*index),
			_ => None,
		}
	}
}
