use crate::mcp::errors;
use crate::tools::{error_result, ok_result};
use chrono::format::{Item, StrftimeItems};
use chrono::{
    DateTime, Datelike, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, SecondsFormat,
    TimeDelta, Utc, Weekday,
};
use serde_json::{Value, json};
use std::str::FromStr;

pub fn now(args: &Value) -> Value {
    let timezone = match args.get("timezone") {
        None => "utc".to_string(),
        Some(value) => match value.as_str() {
            Some(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => {
                return error_result(
                    errors::INVALID_INPUT,
                    "timezone must be a non-empty string",
                    None,
                );
            }
        },
    };
    render_now(&timezone, Utc::now())
}

fn render_now(timezone: &str, now: DateTime<Utc>) -> Value {
    let normalized = timezone.to_ascii_lowercase();
    let (iso, weekday) = match normalized.as_str() {
        "utc" | "z" => (
            now.to_rfc3339_opts(SecondsFormat::Secs, true),
            now.format("%A").to_string(),
        ),
        "local" => {
            let local = now.with_timezone(&Local);
            (
                local.to_rfc3339_opts(SecondsFormat::Secs, false),
                local.format("%A").to_string(),
            )
        }
        other => {
            let Some(offset) = parse_fixed_offset(other) else {
                return error_result(
                    errors::INVALID_INPUT,
                    format!("unrecognized timezone: {timezone} (expected utc, local, or ±HH:MM)"),
                    None,
                );
            };
            let zoned = now.with_timezone(&offset);
            (
                zoned.to_rfc3339_opts(SecondsFormat::Secs, false),
                zoned.format("%A").to_string(),
            )
        }
    };
    ok_result(
        iso.clone(),
        json!({
            "iso": iso,
            "unix": now.timestamp(),
            "timezone": normalized,
            "weekday": weekday
        }),
    )
}

pub fn parse(args: &Value) -> Value {
    let Some(text) = args.get("text").and_then(Value::as_str) else {
        return error_result(errors::INVALID_INPUT, "text must be a string", None);
    };
    match resolve(text, Utc::now()) {
        Ok((timestamp, pattern)) => {
            let iso = timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
            ok_result(
                iso.clone(),
                json!({
                    "iso": iso,
                    "unix": timestamp.timestamp(),
                    "pattern": pattern
                }),
            )
        }
        Err(err) => error_result(err.kind, err.message, None),
    }
}

pub fn format(args: &Value) -> Value {
    let timestamp = match parse_timestamp(args.get("timestamp"), "timestamp") {
        Ok(timestamp) => timestamp,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    let Some(format) = args.get("format").and_then(Value::as_str) else {
        return error_result(errors::INVALID_INPUT, "format must be a string", None);
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.contains(&Item::Error) {
        return error_result(
            errors::INVALID_INPUT,
            "format contains an invalid strftime specifier",
            None,
        );
    }

    let formatted = timestamp.format_with_items(items.into_iter()).to_string();
    ok_result(
        formatted.clone(),
        json!({
            "formatted": formatted,
            "unix": timestamp.timestamp(),
            "format": format
        }),
    )
}

pub fn diff(args: &Value) -> Value {
    let from = match parse_timestamp(args.get("from"), "from") {
        Ok(timestamp) => timestamp,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    let to = match parse_timestamp(args.get("to"), "to") {
        Ok(timestamp) => timestamp,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    let unit = match args.get("unit") {
        None => "days",
        Some(value) => match value.as_str() {
            Some(unit) => unit,
            None => return error_result(errors::INVALID_INPUT, "unit must be a string", None),
        },
    };

    let seconds = to.signed_duration_since(from).num_seconds();
    let value = match unit {
        "seconds" => seconds as f64,
        "minutes" => seconds as f64 / 60.0,
        "hours" => seconds as f64 / 3600.0,
        "days" => seconds as f64 / 86_400.0,
        "weeks" => seconds as f64 / 604_800.0,
        other => {
            return error_result(errors::INVALID_INPUT, format!("unknown unit: {other}"), None);
        }
    };

    let magnitude = seconds.unsigned_abs();
    let days = magnitude / 86_400;
    let hours = magnitude % 86_400 / 3_600;
    let minutes = magnitude % 3_600 / 60;
    let secs = magnitude % 60;
    let sign = if seconds < 0 { "-" } else { "" };

    ok_result(
        format!("{sign}{days}d {hours}h {minutes}m {secs}s"),
        json!({
            "seconds": seconds,
            "value": value,
            "unit": unit,
            "negative": seconds < 0,
            "breakdown": {
                "days": days,
                "hours": hours,
                "minutes": minutes,
                "seconds": secs
            }
        }),
    )
}

pub fn add(args: &Value) -> Value {
    let timestamp = match parse_timestamp(args.get("timestamp"), "timestamp") {
        Ok(timestamp) => timestamp,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    let Some(amount) = args.get("amount").and_then(Value::as_i64) else {
        return error_result(errors::INVALID_INPUT, "amount must be an integer", None);
    };
    let Some(unit) = args.get("unit").and_then(Value::as_str) else {
        return error_result(errors::INVALID_INPUT, "unit must be a string", None);
    };

    match shift(timestamp, amount, unit) {
        Ok(shifted) => {
            let iso = shifted.to_rfc3339_opts(SecondsFormat::Secs, true);
            ok_result(
                iso.clone(),
                json!({"iso": iso, "unix": shifted.timestamp()}),
            )
        }
        Err(err) => error_result(err.kind, err.message, None),
    }
}

#[derive(Debug)]
struct ToolError {
    kind: &'static str,
    message: String,
}

fn invalid(message: impl Into<String>) -> ToolError {
    ToolError {
        kind: errors::INVALID_INPUT,
        message: message.into(),
    }
}

/// Resolves natural-language phrases and the common explicit formats to an
/// instant. Returns the instant plus the name of the pattern that matched.
fn resolve(text: &str, now: DateTime<Utc>) -> Result<(DateTime<Utc>, &'static str), ToolError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid("text must not be empty"));
    }
    let lowered = trimmed.to_ascii_lowercase();

    match lowered.as_str() {
        "now" => return Ok((now, "now")),
        "today" => return Ok((midnight(now, 0)?, "relative_day")),
        "tomorrow" => return Ok((midnight(now, 1)?, "relative_day")),
        "yesterday" => return Ok((midnight(now, -1)?, "relative_day")),
        "next week" => return Ok((midnight(now, 7)?, "relative_week")),
        "last week" => return Ok((midnight(now, -7)?, "relative_week")),
        _ => {}
    }

    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    match tokens.as_slice() {
        ["next", day] => {
            if let Ok(weekday) = Weekday::from_str(day) {
                return Ok((weekday_from(now, weekday, Direction::Next)?, "weekday"));
            }
        }
        ["last", day] => {
            if let Ok(weekday) = Weekday::from_str(day) {
                return Ok((weekday_from(now, weekday, Direction::Last)?, "weekday"));
            }
        }
        ["in", amount, unit] => {
            if let Ok(amount) = amount.parse::<i64>() {
                return Ok((shift(now, amount, unit)?, "relative_offset"));
            }
        }
        [amount, unit, "ago"] => {
            if let Ok(amount) = amount.parse::<i64>()
                && let Some(negated) = amount.checked_neg()
            {
                return Ok((shift(now, negated, unit)?, "relative_offset"));
            }
        }
        _ => {}
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok((parsed.with_timezone(&Utc), "rfc3339"));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok((parsed.and_utc(), "datetime"));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok((parsed.and_utc(), "datetime"));
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        && let Some(start) = parsed.and_hms_opt(0, 0, 0)
    {
        return Ok((start.and_utc(), "date"));
    }
    if trimmed.chars().all(|ch| ch.is_ascii_digit())
        && let Ok(seconds) = trimmed.parse::<i64>()
        && let Some(timestamp) = DateTime::from_timestamp(seconds, 0)
    {
        return Ok((timestamp, "unix"));
    }

    Err(invalid(format!("unrecognized date/time: {trimmed}")))
}

fn midnight(now: DateTime<Utc>, day_offset: i64) -> Result<DateTime<Utc>, ToolError> {
    let Some(delta) = TimeDelta::try_days(day_offset) else {
        return Err(invalid("day offset out of range"));
    };
    let Some(shifted) = now.checked_add_signed(delta) else {
        return Err(invalid("day offset out of range"));
    };
    let Some(start) = shifted.date_naive().and_hms_opt(0, 0, 0) else {
        return Err(invalid("day offset out of range"));
    };
    Ok(start.and_utc())
}

enum Direction {
    Next,
    Last,
}

fn weekday_from(
    now: DateTime<Utc>,
    target: Weekday,
    direction: Direction,
) -> Result<DateTime<Utc>, ToolError> {
    let today = i64::from(now.date_naive().weekday().num_days_from_monday());
    let target = i64::from(target.num_days_from_monday());
    let offset = match direction {
        Direction::Next => {
            let ahead = (target - today).rem_euclid(7);
            if ahead == 0 { 7 } else { ahead }
        }
        Direction::Last => {
            let back = (today - target).rem_euclid(7);
            if back == 0 { -7 } else { -back }
        }
    };
    midnight(now, offset)
}

fn shift(now: DateTime<Utc>, amount: i64, unit: &str) -> Result<DateTime<Utc>, ToolError> {
    let delta = match unit {
        "second" | "seconds" | "sec" | "secs" => TimeDelta::try_seconds(amount),
        "minute" | "minutes" | "min" | "mins" => TimeDelta::try_minutes(amount),
        "hour" | "hours" | "hr" | "hrs" => TimeDelta::try_hours(amount),
        "day" | "days" => TimeDelta::try_days(amount),
        "week" | "weeks" => TimeDelta::try_weeks(amount),
        "month" | "months" => return shift_months(now, amount, 1),
        "year" | "years" => return shift_months(now, amount, 12),
        other => return Err(invalid(format!("unknown time unit: {other}"))),
    };
    let Some(delta) = delta else {
        return Err(invalid("amount out of range"));
    };
    now.checked_add_signed(delta)
        .ok_or_else(|| invalid("resulting time out of range"))
}

fn shift_months(now: DateTime<Utc>, amount: i64, scale: i64) -> Result<DateTime<Utc>, ToolError> {
    let Some(total) = amount.checked_mul(scale) else {
        return Err(invalid("amount out of range"));
    };
    let Ok(magnitude) = u32::try_from(total.unsigned_abs()) else {
        return Err(invalid("amount out of range"));
    };
    let months = Months::new(magnitude);
    let shifted = if total < 0 {
        now.checked_sub_months(months)
    } else {
        now.checked_add_months(months)
    };
    shifted.ok_or_else(|| invalid("resulting time out of range"))
}

fn parse_timestamp(value: Option<&Value>, field: &str) -> Result<DateTime<Utc>, ToolError> {
    let Some(value) = value else {
        return Err(invalid(format!("{field} is required")));
    };
    if let Some(seconds) = value.as_i64() {
        return DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| invalid(format!("{field} is out of range")));
    }
    if let Some(seconds) = value.as_f64() {
        return DateTime::from_timestamp(seconds as i64, 0)
            .ok_or_else(|| invalid(format!("{field} is out of range")));
    }
    if let Some(text) = value.as_str() {
        let trimmed = text.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(parsed.with_timezone(&Utc));
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
            return Ok(parsed.and_utc());
        }
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            && let Some(start) = parsed.and_hms_opt(0, 0, 0)
        {
            return Ok(start.and_utc());
        }
        if let Ok(seconds) = trimmed.parse::<i64>()
            && let Some(timestamp) = DateTime::from_timestamp(seconds, 0)
        {
            return Ok(timestamp);
        }
        return Err(invalid(format!("{field} is not a recognized timestamp")));
    }
    Err(invalid(format!(
        "{field} must be unix seconds or a date/time string"
    )))
}

fn parse_fixed_offset(text: &str) -> Option<FixedOffset> {
    let bytes = text.as_bytes();
    if bytes.len() != 6 || !matches!(bytes[0], b'+' | b'-') || bytes[3] != b':' {
        return None;
    }
    let hours: i32 = text[1..3].parse().ok()?;
    let minutes: i32 = text[4..6].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    let seconds = hours * 3600 + minutes * 60;
    if bytes[0] == b'-' {
        FixedOffset::west_opt(seconds)
    } else {
        FixedOffset::east_opt(seconds)
    }
}
