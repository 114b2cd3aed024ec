use crate::mcp::errors;
use crate::tools::{error_result, ok_result};
use serde_json::{Value, json};

pub fn call(args: &Value) -> Value {
    let (value, from, to) = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(err) => return error_result(err.kind, err.message, None),
    };

    let Some(from_unit) = lookup(&from) else {
        return error_result(errors::UNKNOWN_UNIT, format!("unknown unit: {from}"), None);
    };
    let Some(to_unit) = lookup(&to) else {
        return error_result(errors::UNKNOWN_UNIT, format!("unknown unit: {to}"), None);
    };
    if from_unit.family != to_unit.family {
        return error_result(
            errors::UNIT_MISMATCH,
            format!(
                "cannot convert {} ({}) to {} ({})",
                from,
                from_unit.family.name(),
                to,
                to_unit.family.name()
            ),
            None,
        );
    }

    let converted = if from_unit.family == Family::Temperature {
        from_celsius(&to, to_celsius(&from, value))
    } else {
        value * from_unit.factor / to_unit.factor
    };

    if !converted.is_finite() {
        return error_result(errors::NOT_FINITE, "converted value is not finite", None);
    }

    ok_result(
        format!("{value} {from} = {converted} {to}"),
        json!({
            "value": value,
            "from": from,
            "to": to,
            "result": converted,
            "family": from_unit.family.name()
        }),
    )
}

struct ToolError {
    kind: &'static str,
    message: String,
}

fn parse_args(args: &Value) -> Result<(f64, String, String), ToolError> {
    let Some(value) = args.get("value").and_then(Value::as_f64) else {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: "value must be a number".to_string(),
        });
    };
    let from = parse_unit_name(args.get("from"), "from")?;
    let to = parse_unit_name(args.get("to"), "to")?;
    Ok((value, from, to))
}

fn parse_unit_name(value: Option<&Value>, field: &str) -> Result<String, ToolError> {
    let Some(name) = value.and_then(Value::as_str) else {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: format!("{field} must be a string"),
        });
    };
    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: format!("{field} must not be empty"),
        });
    }
    Ok(name)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Family {
    Length,
    Mass,
    Duration,
    Data,
    Temperature,
}

impl Family {
    fn name(self) -> &'static str {
        match self {
            Family::Length => "length",
            Family::Mass => "mass",
            Family::Duration => "duration",
            Family::Data => "data",
            Family::Temperature => "temperature",
        }
    }
}

struct Unit {
    family: Family,
    // Multiplier into the family's base unit (meter, kilogram, second, byte).
    // Unused for temperature, which converts through Celsius.
    factor: f64,
}

fn unit(family: Family, factor: f64) -> Option<Unit> {
    Some(Unit { family, factor })
}

fn lookup(name: &str) -> Option<Unit> {
    use Family::*;
    match name {
        "mm" | "millimeter" | "millimeters" => unit(Length, 0.001),
        "cm" | "centimeter" | "centimeters" => unit(Length, 0.01),
        "m" | "meter" | "meters" | "metre" | "metres" => unit(Length, 1.0),
        "km" | "kilometer" | "kilometers" => unit(Length, 1000.0),
        "in" | "inch" | "inches" => unit(Length, 0.0254),
        "ft" | "foot" | "feet" => unit(Length, 0.3048),
        "yd" | "yard" | "yards" => unit(Length, 0.9144),
        "mi" | "mile" | "miles" => unit(Length, 1609.344),
        "mg" | "milligram" | "milligrams" => unit(Mass, 1e-6),
        "g" | "gram" | "grams" => unit(Mass, 0.001),
        "kg" | "kilogram" | "kilograms" => unit(Mass, 1.0),
        "t" | "tonne" | "tonnes" => unit(Mass, 1000.0),
        "oz" | "ounce" | "ounces" => unit(Mass, 0.028_349_523_125),
        "lb" | "lbs" | "pound" | "pounds" => unit(Mass, 0.453_592_37),
        "ms" | "millisecond" | "milliseconds" => unit(Duration, 0.001),
        "s" | "sec" | "second" | "seconds" => unit(Duration, 1.0),
        "min" | "minute" | "minutes" => unit(Duration, 60.0),
        "h" | "hr" | "hour" | "hours" => unit(Duration, 3600.0),
        "d" | "day" | "days" => unit(Duration, 86_400.0),
        "wk" | "week" | "weeks" => unit(Duration, 604_800.0),
        "bit" | "bits" => unit(Data, 0.125),
        "b" | "byte" | "bytes" => unit(Data, 1.0),
        "kb" => unit(Data, 1e3),
        "mb" => unit(Data, 1e6),
        "gb" => unit(Data, 1e9),
        "tb" => unit(Data, 1e12),
        "kib" => unit(Data, 1024.0),
        "mib" => unit(Data, 1024.0 * 1024.0),
        "gib" => unit(Data, 1024.0 * 1024.0 * 1024.0),
        "tib" => unit(Data, 1024.0 * 1024.0 * 1024.0 * 1024.0),
        "c" | "celsius" => unit(Temperature, 1.0),
        "f" | "fahrenheit" => unit(Temperature, 1.0),
        "k" | "kelvin" => unit(Temperature, 1.0),
        _ => None,
    }
}

fn to_celsius(name: &str, value: f64) -> f64 {
    match name.as_bytes().first() {
        Some(b'f') => (value - 32.0) * 5.0 / 9.0,
        Some(b'k') => value - 273.15,
        _ => value,
    }
}

fn from_celsius(name: &str, value: f64) -> f64 {
    match name.as_bytes().first() {
        Some(b'f') => value * 9.0 / 5.0 + 32.0,
        Some(b'k') => value + 273.15,
        _ => value,
    }
}
