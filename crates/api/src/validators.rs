//! Structural and business-rule validation of API response bodies.
//!
//! Every function inspects an untrusted [`Value`] and stops at the first
//! violated rule. Checks run in a fixed order: required keys, container
//! shapes, JSON types, formats and ranges, then nested items. On success the
//! typed model is returned, so callers never re-check fields.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ValidationError;
use crate::models::{AuthResponse, ErrorResponse, Support, User, UserList, UserMutation};

static EMAIL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex"));
static HTTP_URL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^https?://.+").expect("url pattern is a valid regex"));

const USER_KEYS: &[&str] = &["id", "email", "first_name", "last_name", "avatar"];
const LIST_KEYS: &[&str] = &["page", "per_page", "total", "total_pages", "data", "support"];
const SUPPORT_KEYS: &[&str] = &["url", "text"];

type Checked<T> = Result<T, ValidationError>;

/// Validates a single user object.
pub fn validate_user(value: &Value) -> Checked<User> {
	let user = as_object(value, "")?;
	require_keys(user, "", USER_KEYS)?;

	let id = number(user, "id")?;
	let email = string(user, "email")?;
	let first_name = string(user, "first_name")?;
	let last_name = string(user, "last_name")?;
	let avatar = string(user, "avatar")?;

	if !EMAIL.is_match(email) {
		return Err(format_error("email", "local@domain.tld", email));
	}
	if !HTTP_URL.is_match(avatar) {
		return Err(format_error("avatar", "http(s) URL", avatar));
	}
	if id <= 0.0 {
		return Err(rule("id", "must be greater than 0"));
	}
	let id = integer("id", id)?;

	Ok(User {
		id,
		email: email.to_string(),
		first_name: first_name.to_string(),
		last_name: last_name.to_string(),
		avatar: avatar.to_string(),
	})
}

/// Validates a paginated user list and every user in it.
///
/// A failing element is reported as [`ValidationError::Item`] carrying its
/// index.
pub fn validate_user_list(value: &Value) -> Checked<UserList> {
	let list = as_object(value, "")?;
	require_keys(list, "", LIST_KEYS)?;

	let Some(data) = list.get("data").and_then(Value::as_array) else {
		return Err(type_error("data", "an array", &list["data"]));
	};
	let support = as_object(&list["support"], "support")?;
	require_keys(support, "support", SUPPORT_KEYS)?;

	let page = number(list, "page")?;
	let per_page = number(list, "per_page")?;
	let total = number(list, "total")?;
	let total_pages = number(list, "total_pages")?;
	let support_url = nested_string(support, "support", "url")?;
	let support_text = nested_string(support, "support", "text")?;

	if page <= 0.0 {
		return Err(rule("page", "must be greater than 0"));
	}
	if per_page <= 0.0 {
		return Err(rule("per_page", "must be greater than 0"));
	}
	if total < 0.0 {
		return Err(rule("total", "must be greater than or equal to 0"));
	}
	if total_pages < 0.0 {
		return Err(rule("total_pages", "must be greater than or equal to 0"));
	}
	if total_pages > 0.0 && page > total_pages {
		return Err(rule(
			"page",
			format!("page {page} exceeds total_pages {total_pages}"),
		));
	}

	let users = data
		.iter()
		.enumerate()
		.map(|(index, item)| {
			validate_user(item).map_err(|source| ValidationError::Item {
				index,
				source: Box::new(source),
			})
		})
		.collect::<Checked<Vec<_>>>()?;

	debug!(page, users = users.len(), "validated user list");

	Ok(UserList {
		page: integer("page", page)?,
		per_page: integer("per_page", per_page)?,
		total: integer("total", total)?,
		total_pages: integer("total_pages", total_pages)?,
		data: users,
		support: Support {
			url: support_url.to_string(),
			text: support_text.to_string(),
		},
	})
}

/// Validates a login or registration body: a non-empty `token` and, when
/// present, a positive numeric `id`.
pub fn validate_auth_response(value: &Value) -> Checked<AuthResponse> {
	let body = as_object(value, "")?;
	require_keys(body, "", &["token"])?;
	let token = non_empty_string(body, "token")?;

	let id = match body.get("id") {
		Some(_) => {
			let id = number(body, "id")?;
			if id <= 0.0 {
				return Err(rule("id", "must be greater than 0"));
			}
			Some(integer("id", id)?)
		}
		None => None,
	};

	Ok(AuthResponse {
		token: token.to_string(),
		id,
	})
}

/// Validates an error body carrying a non-empty `error` message.
pub fn validate_error_response(value: &Value) -> Checked<ErrorResponse> {
	let body = as_object(value, "")?;
	require_keys(body, "", &["error"])?;
	let error = non_empty_string(body, "error")?;
	Ok(ErrorResponse {
		error: error.to_string(),
	})
}

/// Validates a create/update echo.
///
/// `name` and `job` are required strings, at least one of `createdAt` and
/// `updatedAt` must be present and parse as a date, and an `id`, when
/// present, must be a non-empty string.
pub fn validate_user_mutation_response(value: &Value) -> Checked<UserMutation> {
	let body = as_object(value, "")?;
	require_keys(body, "", &["name", "job"])?;
	let name = string(body, "name")?;
	let job = string(body, "job")?;

	if !body.contains_key("createdAt") && !body.contains_key("updatedAt") {
		return Err(ValidationError::Schema {
			field: "createdAt|updatedAt".to_string(),
		});
	}
	let created_at = optional_timestamp(body, "createdAt")?;
	let updated_at = optional_timestamp(body, "updatedAt")?;

	let id = match body.get("id") {
		Some(_) => Some(non_empty_string(body, "id")?.to_string()),
		None => None,
	};

	Ok(UserMutation {
		name: name.to_string(),
		job: job.to_string(),
		id,
		created_at,
		updated_at,
	})
}

/// Parses the date-time shapes the API may emit.
///
/// Accepts RFC 3339 and the looser ECMAScript form: `YYYY`, `YYYY-MM` or
/// `YYYY-MM-DD`, optionally followed by `THH:mm`, `THH:mm:ss` or
/// `THH:mm:ss.sss` and a `Z`, `±hh:mm` or `±hhmm` offset. Date-only values
/// and times without an offset are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
	if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
		return Some(ts.with_timezone(&Utc));
	}

	let (date, time) = match raw.split_once('T') {
		Some((date, time)) => (date, Some(time)),
		None => (raw, None),
	};
	let date = parse_date(date)?;
	let Some(time) = time else {
		return date.and_hms_opt(0, 0, 0).map(|ts| ts.and_utc());
	};

	let (clock, offset) = split_offset(time)?;
	let clock = NaiveTime::parse_from_str(clock, "%H:%M:%S%.f")
		.or_else(|_| NaiveTime::parse_from_str(clock, "%H:%M"))
		.ok()?;
	offset
		.from_local_datetime(&date.and_time(clock))
		.single()
		.map(|ts| ts.with_timezone(&Utc))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
	let full = match raw.len() {
		4 => format!("{raw}-01-01"),
		7 => format!("{raw}-01"),
		10 => raw.to_string(),
		_ => return None,
	};
	NaiveDate::parse_from_str(&full, "%Y-%m-%d").ok()
}

fn split_offset(time: &str) -> Option<(&str, FixedOffset)> {
	if let Some(clock) = time.strip_suffix(['Z', 'z']) {
		return Some((clock, FixedOffset::east_opt(0)?));
	}
	match time.find(['+', '-']) {
		Some(at) => {
			let (clock, offset) = time.split_at(at);
			Some((clock, parse_offset(offset)?))
		}
		None => Some((time, FixedOffset::east_opt(0)?)),
	}
}

/// `±hh:mm` or `±hhmm`.
fn parse_offset(raw: &str) -> Option<FixedOffset> {
	let sign = if raw.starts_with('-') { -1 } else { 1 };
	let body = raw.get(1..).filter(|body| body.is_ascii())?;
	let (hours, minutes) = match body.len() {
		4 => body.split_at(2),
		5 if body.as_bytes()[2] == b':' => (&body[..2], &body[3..]),
		_ => return None,
	};
	if !(hours.bytes().chain(minutes.bytes())).all(|b| b.is_ascii_digit()) {
		return None;
	}
	let hours: i32 = hours.parse().ok()?;
	let minutes: i32 = minutes.parse().ok()?;
	if hours > 23 || minutes > 59 {
		return None;
	}
	FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn optional_timestamp(body: &Map<String, Value>, key: &str) -> Checked<Option<DateTime<Utc>>> {
	if !body.contains_key(key) {
		return Ok(None);
	}
	let raw = string(body, key)?;
	parse_timestamp(raw)
		.map(Some)
		.ok_or_else(|| format_error(key, "date", raw))
}

fn path(prefix: &str, key: &str) -> String {
	if prefix.is_empty() {
		key.to_string()
	} else {
		format!("{prefix}.{key}")
	}
}

fn as_object<'a>(value: &'a Value, field: &str) -> Checked<&'a Map<String, Value>> {
	value.as_object().ok_or_else(|| {
		let field = if field.is_empty() { "(root)" } else { field };
		type_error(field, "an object", value)
	})
}

fn require_keys(map: &Map<String, Value>, prefix: &str, keys: &[&str]) -> Checked<()> {
	match keys.iter().find(|key| !map.contains_key(**key)) {
		Some(missing) => Err(ValidationError::Schema {
			field: path(prefix, missing),
		}),
		None => Ok(()),
	}
}

fn number(map: &Map<String, Value>, key: &str) -> Checked<f64> {
	let value = &map[key];
	value.as_f64().ok_or_else(|| type_error(key, "a number", value))
}

fn string<'a>(map: &'a Map<String, Value>, key: &str) -> Checked<&'a str> {
	nested_string(map, "", key)
}

fn nested_string<'a>(map: &'a Map<String, Value>, prefix: &str, key: &str) -> Checked<&'a str> {
	let value = &map[key];
	value
		.as_str()
		.ok_or_else(|| type_error(&path(prefix, key), "a string", value))
}

fn non_empty_string<'a>(map: &'a Map<String, Value>, key: &str) -> Checked<&'a str> {
	let value = string(map, key)?;
	if value.is_empty() {
		return Err(rule(key, "must not be empty"));
	}
	Ok(value)
}

fn integer(field: &str, value: f64) -> Checked<u64> {
	if value.fract() != 0.0 || value < 0.0 || value > u64::MAX as f64 {
		return Err(rule(field, format!("{value} is not a whole number")));
	}
	Ok(value as u64)
}

fn json_type(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

fn type_error(field: &str, expected: &'static str, found: &Value) -> ValidationError {
	ValidationError::Type {
		field: field.to_string(),
		expected,
		found: json_type(found),
	}
}

fn format_error(field: &str, rule: &'static str, value: &str) -> ValidationError {
	ValidationError::Format {
		field: field.to_string(),
		rule,
		value: value.to_string(),
	}
}

fn rule(field: &str, rule: impl Into<String>) -> ValidationError {
	ValidationError::BusinessRule {
		field: field.to_string(),
		rule: rule.into(),
	}
}
