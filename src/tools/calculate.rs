use crate::eval::{self, EvalError};
use crate::mcp::contracts::MAX_EXPRESSION_CHARS;
use crate::mcp::errors;
use crate::tools::{error_result, ok_result};
use serde_json::{Value, json};

pub fn call(args: &Value) -> Value {
    let expression = match parse_expression(args.get("expression")) {
        Ok(expression) => expression,
        Err(err) => return error_result(err.kind, err.message, None),
    };

    match eval::evaluate(&expression) {
        Ok(value) => {
            let formatted = format_number(value);
            ok_result(
                formatted.clone(),
                json!({
                    "expression": expression,
                    "result": value,
                    "formatted": formatted
                }),
            )
        }
        Err(error) => error_result(map_eval_error(&error), error.to_string(), None),
    }
}

struct ToolError {
    kind: &'static str,
    message: String,
}

fn parse_expression(value: Option<&Value>) -> Result<String, ToolError> {
    let Some(value) = value else {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: "expression is required".to_string(),
        });
    };
    let Some(expression) = value.as_str() else {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: "expression must be a string".to_string(),
        });
    };
    if expression.chars().count() > MAX_EXPRESSION_CHARS {
        return Err(ToolError {
            kind: errors::TOO_LARGE,
            message: format!("expression exceeds {MAX_EXPRESSION_CHARS} characters"),
        });
    }
    Ok(expression.to_string())
}

fn map_eval_error(error: &EvalError) -> &'static str {
    match error {
        EvalError::NonFiniteResult => errors::NOT_FINITE,
        EvalError::NestingTooDeep => errors::TOO_LARGE,
        _ => errors::INVALID_EXPRESSION,
    }
}

// Shortest round-trip decimal; negative zero prints as 0.
fn format_number(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_string()
}
