//! Arithmetic evaluator behind `runjs`.
//!
//! Accepts numbers, `+ - * / %`, unary signs, and parentheses with the usual precedence. Results
//! follow IEEE-754 semantics, so division by zero yields `Infinity` rather than an error.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Expression parse failures.
pub enum ExprError {
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Unexpected token '{0}'")]
    UnexpectedToken(char),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Expression nested too deeply")]
    TooDeep,
}

/// Nesting limit for parentheses and unary signs combined.
pub const MAX_NESTING: usize = 256;

/// Evaluates `source`. Empty input evaluates to `None`.
pub fn evaluate(source: &str) -> Result<Option<f64>, ExprError> {
    let mut parser = Parser::new(source);
    parser.skip_whitespace();
    if parser.peek().is_none() {
        return Ok(None);
    }
    let value = parser.expression()?;
    parser.skip_whitespace();
    match parser.peek() {
        Some(ch) => Err(ExprError::UnexpectedToken(ch)),
        None => Ok(Some(value)),
    }
}

/// Formats `value` the way a browser console prints a number.
pub fn format_js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    format!("{value}")
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            depth: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.chars.next();
        }
    }

    fn next_significant(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.peek()
    }

    fn expression(&mut self) -> Result<f64, ExprError> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.next_significant() {
            self.chars.next();
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ExprError> {
        let mut value = self.unary()?;
        while let Some(op @ ('*' | '/' | '%')) = self.next_significant() {
            self.chars.next();
            let rhs = self.unary()?;
            value = match op {
                '*' => value * rhs,
                '/' => value / rhs,
                _ => value % rhs,
            };
        }
        Ok(value)
    }

    // Every recursive path (signs and parenthesised groups) passes through here.
    fn unary(&mut self) -> Result<f64, ExprError> {
        if self.depth >= MAX_NESTING {
            return Err(ExprError::TooDeep);
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<f64, ExprError> {
        match self.next_significant() {
            Some('-') => {
                self.chars.next();
                Ok(-self.unary()?)
            }
            Some('+') => {
                self.chars.next();
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, ExprError> {
        match self.next_significant() {
            None => Err(ExprError::UnexpectedEnd),
            Some('(') => {
                self.chars.next();
                let value = self.expression()?;
                match self.next_significant() {
                    Some(')') => {
                        self.chars.next();
                        Ok(value)
                    }
                    Some(ch) => Err(ExprError::UnexpectedToken(ch)),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.number(),
            Some(ch) => Err(ExprError::UnexpectedToken(ch)),
        }
    }

    fn number(&mut self) -> Result<f64, ExprError> {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                text.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }
        text.parse::<f64>()
            .map_err(|_| ExprError::InvalidNumber(text))
    }
}
