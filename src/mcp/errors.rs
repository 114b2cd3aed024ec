#![allow(dead_code)]

pub const INVALID_INPUT: &str = "invalid_input";
pub const INVALID_EXPRESSION: &str = "invalid_expression";
pub const NOT_FINITE: &str = "not_finite";
pub const UNKNOWN_UNIT: &str = "unknown_unit";
pub const UNIT_MISMATCH: &str = "unit_mismatch";
pub const NOT_FOUND: &str = "not_found";
pub const TOO_LARGE: &str = "too_large";
pub const UNCONFIGURED: &str = "unconfigured";
pub const UPSTREAM_ERROR: &str = "upstream_error";
pub const INTERNAL_ERROR: &str = "internal_error";
