use std::fmt;

/// Maximum nesting depth for parenthesized groups and unary-minus chains.
/// Inputs deeper than this fail instead of exhausting the call stack.
pub const MAX_NESTING_DEPTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    InvalidCharacter(char),
    MalformedNumber,
    UnbalancedParentheses,
    NonFiniteResult,
    UnexpectedEndOfInput,
    TrailingInput(char),
    NestingTooDeep,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::InvalidCharacter(ch) => {
                write!(f, "expression contains an unsupported character: {ch:?}")
            }
            EvalError::MalformedNumber => write!(f, "expected a number"),
            EvalError::UnbalancedParentheses => write!(f, "unbalanced parentheses"),
            EvalError::NonFiniteResult => write!(f, "result is not a finite number"),
            EvalError::UnexpectedEndOfInput => write!(f, "unexpected end of expression"),
            EvalError::TrailingInput(ch) => {
                write!(f, "unexpected trailing character: {ch:?}")
            }
            EvalError::NestingTooDeep => {
                write!(f, "expression nests deeper than {MAX_NESTING_DEPTH} levels")
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Evaluates an arithmetic expression in a single left-to-right pass.
///
/// Supported syntax: non-negative integer and decimal literals, unary `-`,
/// binary `+ - * /`, left-associative `^`, and parenthesized groups. Any
/// character outside `0-9 . + - * / ^ ( )` and space is rejected before
/// parsing starts, so the input can never smuggle identifiers or control
/// characters past this function.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    validate_characters(expression)?;

    // The allow-list is pure ASCII, so the stripped expression can be
    // walked as bytes.
    let compact: Vec<u8> = expression.bytes().filter(|byte| *byte != b' ').collect();
    if compact.is_empty() {
        return Err(EvalError::UnexpectedEndOfInput);
    }

    let mut parser = Parser {
        bytes: &compact,
        pos: 0,
        depth: 0,
    };
    let value = parser.expression()?;

    // Fail closed on leftover input instead of silently ignoring it.
    match parser.peek() {
        Some(b')') => return Err(EvalError::UnbalancedParentheses),
        Some(other) => return Err(EvalError::TrailingInput(other as char)),
        None => {}
    }

    if !value.is_finite() {
        return Err(EvalError::NonFiniteResult);
    }
    Ok(value)
}

fn validate_characters(expression: &str) -> Result<(), EvalError> {
    for ch in expression.chars() {
        if !matches!(ch, '0'..='9' | '.' | '+' | '-' | '*' | '/' | '^' | '(' | ')' | ' ') {
            return Err(EvalError::InvalidCharacter(ch));
        }
    }
    Ok(())
}

/// Cursor over the whitespace-stripped expression. Advances monotonically;
/// the grammar never needs to rewind.
struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek();
        if byte.is_some() {
            self.pos += 1;
        }
        byte
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(EvalError::NestingTooDeep);
        }
        Ok(())
    }

    fn expression(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == b'+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.power()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.power()?;
            value = if op == b'*' { value * rhs } else { value / rhs };
        }
        Ok(value)
    }

    // `^` folds left to right: 2^3^2 is (2^3)^2, not 2^(3^2).
    fn power(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;
        while self.peek() == Some(b'^') {
            self.pos += 1;
            let rhs = self.factor()?;
            value = value.powf(rhs);
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                self.enter()?;
                let value = self.expression()?;
                if self.bump() != Some(b')') {
                    return Err(EvalError::UnbalancedParentheses);
                }
                self.depth -= 1;
                Ok(value)
            }
            Some(b'-') => {
                self.pos += 1;
                self.enter()?;
                let value = self.factor()?;
                self.depth -= 1;
                Ok(-value)
            }
            Some(_) => self.number(),
            None => Err(EvalError::UnexpectedEndOfInput),
        }
    }

    fn number(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;
        if self.digits() == 0 {
            return Err(EvalError::MalformedNumber);
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if self.digits() == 0 {
                return Err(EvalError::MalformedNumber);
            }
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| EvalError::MalformedNumber)?;
        text.parse::<f64>().map_err(|_| EvalError::MalformedNumber)
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_literal() {
        assert_eq!(evaluate("42").expect("value"), 42.0);
    }

    #[test]
    fn decimal_literal() {
        assert_eq!(evaluate("3.25").expect("value"), 3.25);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(evaluate("2 + 2 * 3").expect("value"), 8.0);
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(evaluate("(2 + 2) * 3").expect("value"), 12.0);
    }

    #[test]
    fn division() {
        assert_eq!(evaluate("15 / 4").expect("value"), 3.75);
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(evaluate("10 - 4 - 3").expect("value"), 3.0);
    }

    #[test]
    fn power_is_left_associative() {
        // (2^3)^2 = 64, not 2^(3^2) = 512.
        assert_eq!(evaluate("2^3^2").expect("value"), 64.0);
    }

    #[test]
    fn power_binds_tighter_than_multiplication() {
        assert_eq!(evaluate("2 * 3^2").expect("value"), 18.0);
    }

    #[test]
    fn unary_minus_chains() {
        assert_eq!(evaluate("--5").expect("value"), 5.0);
        assert_eq!(evaluate("-5 + 3").expect("value"), -2.0);
        assert_eq!(evaluate("---2").expect("value"), -2.0);
    }

    #[test]
    fn unary_minus_binds_tighter_than_power() {
        // The grammar parses -2^2 as (-2)^2.
        assert_eq!(evaluate("-2^2").expect("value"), 4.0);
    }

    #[test]
    fn nested_groups() {
        assert_eq!(evaluate("((1 + 2) * (3 + 4))").expect("value"), 21.0);
    }

    #[test]
    fn whitespace_is_stripped() {
        assert_eq!(evaluate("  2  +   3 ").expect("value"), 5.0);
    }

    #[test]
    fn empty_input() {
        assert_eq!(evaluate(""), Err(EvalError::UnexpectedEndOfInput));
        assert_eq!(evaluate("   "), Err(EvalError::UnexpectedEndOfInput));
    }

    #[test]
    fn rejects_identifiers() {
        assert_eq!(
            evaluate("2 + alert(1)"),
            Err(EvalError::InvalidCharacter('a'))
        );
    }

    #[test]
    fn rejects_control_characters() {
        assert_eq!(evaluate("2\t+ 1"), Err(EvalError::InvalidCharacter('\t')));
    }

    #[test]
    fn division_by_zero_is_not_finite() {
        assert_eq!(evaluate("5 / 0"), Err(EvalError::NonFiniteResult));
        assert_eq!(evaluate("0 / 0"), Err(EvalError::NonFiniteResult));
    }

    #[test]
    fn power_overflow_is_not_finite() {
        assert_eq!(evaluate("10 ^ 400"), Err(EvalError::NonFiniteResult));
    }

    #[test]
    fn masked_infinity_is_accepted() {
        // Only the final value is checked, so an intermediate infinity that
        // cancels out still succeeds.
        assert_eq!(evaluate("1 / (1 / 0)").expect("value"), 0.0);
    }

    #[test]
    fn unbalanced_open_paren() {
        assert_eq!(evaluate("(2 + 3"), Err(EvalError::UnbalancedParentheses));
    }

    #[test]
    fn unbalanced_close_paren() {
        assert_eq!(evaluate("2 + 3)"), Err(EvalError::UnbalancedParentheses));
    }

    #[test]
    fn trailing_input_fails_closed() {
        assert_eq!(evaluate("(2)3"), Err(EvalError::TrailingInput('3')));
        assert_eq!(evaluate("1.2.3"), Err(EvalError::TrailingInput('.')));
    }

    #[test]
    fn malformed_numbers() {
        assert_eq!(evaluate("."), Err(EvalError::MalformedNumber));
        assert_eq!(evaluate(".5"), Err(EvalError::MalformedNumber));
        assert_eq!(evaluate("5."), Err(EvalError::MalformedNumber));
        assert_eq!(evaluate("2 + * 3"), Err(EvalError::MalformedNumber));
    }

    #[test]
    fn dangling_operator() {
        assert_eq!(evaluate("2 +"), Err(EvalError::UnexpectedEndOfInput));
        assert_eq!(evaluate("2 *"), Err(EvalError::UnexpectedEndOfInput));
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let deep = format!("{}1{}", "(".repeat(150), ")".repeat(150));
        assert_eq!(evaluate(&deep).expect("value"), 1.0);

        let too_deep = format!(
            "{}1{}",
            "(".repeat(MAX_NESTING_DEPTH + 1),
            ")".repeat(MAX_NESTING_DEPTH + 1)
        );
        assert_eq!(evaluate(&too_deep), Err(EvalError::NestingTooDeep));

        let minus_chain = format!("{}5", "-".repeat(MAX_NESTING_DEPTH + 1));
        assert_eq!(evaluate(&minus_chain), Err(EvalError::NestingTooDeep));
    }

    #[test]
    fn sequential_groups_do_not_accumulate_depth() {
        let expr = (0..300).map(|_| "(1)").collect::<Vec<_>>().join(" + ");
        assert_eq!(evaluate(&expr).expect("value"), 300.0);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let first = evaluate("2 ^ 10 / 4 - 1");
        let second = evaluate("2 ^ 10 / 4 - 1");
        assert_eq!(first, second);
        assert_eq!(first.expect("value"), 255.0);
    }

    #[test]
    fn formatted_sum_round_trips() {
        for (a, b) in [(1.5, 2.25), (-0.5, 3.0), (100.0, -42.125), (0.1, 0.2)] {
            let expr = format!("{a} + {b}");
            let value = evaluate(&expr).expect("value");
            assert!((value - (a + b)).abs() < 1e-9, "{expr} => {value}");
        }
    }
}
