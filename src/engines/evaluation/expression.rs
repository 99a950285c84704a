//! Direct textual evaluation of arithmetic expressions in one variable.
//!
//! The expression is evaluated while it is scanned; no syntax tree is built.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary ('**' unary)?
//! primary := number | 'X' | 'x' | function '(' expr ')' | '(' expr ')'
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Syntax error at byte {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Domain error in {0}")]
    Domain(&'static str),

    #[error("Numeric overflow")]
    Overflow,
}

type EvalResult = std::result::Result<f64, ExpressionError>;

/// Evaluate `expression` with the variable bound to `x`
pub fn evaluate(expression: &str, x: f64) -> EvalResult {
    let mut scanner = Scanner {
        src: expression.as_bytes(),
        pos: 0,
        x,
    };
    let value = scanner.expr()?;
    scanner.skip_whitespace();
    if scanner.pos < scanner.src.len() {
        return Err(scanner.syntax("unexpected trailing input"));
    }
    Ok(value)
}

struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
    x: f64,
}

impl<'a> Scanner<'a> {
    fn expr(&mut self) -> EvalResult {
        let mut value = self.term()?;
        loop {
            if self.eat(b'+') {
                value = finite(value + self.term()?)?;
            } else if self.eat(b'-') {
                value = finite(value - self.term()?)?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> EvalResult {
        let mut value = self.unary()?;
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b'*') && self.peek_at(1) != Some(b'*') {
                self.pos += 1;
                value = finite(value * self.unary()?)?;
            } else if self.eat(b'/') {
                let divisor = self.unary()?;
                if divisor == 0.0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                value = finite(value / divisor)?;
            } else {
                return Ok(value);
            }
        }
    }

    fn unary(&mut self) -> EvalResult {
        if self.eat(b'-') {
            return Ok(-self.unary()?);
        }
        if self.eat(b'+') {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> EvalResult {
        let base = self.primary()?;
        self.skip_whitespace();
        if self.peek() == Some(b'*') && self.peek_at(1) == Some(b'*') {
            self.pos += 2;
            // Right-associative: the exponent may itself be a power
            let exponent = self.unary()?;
            if base == 0.0 && exponent < 0.0 {
                return Err(ExpressionError::DivisionByZero);
            }
            let value = base.powf(exponent);
            if value.is_nan() {
                return Err(ExpressionError::Domain("power"));
            }
            return finite(value);
        }
        Ok(base)
    }

    fn primary(&mut self) -> EvalResult {
        self.skip_whitespace();
        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                let value = self.expr()?;
                self.expect(b')')?;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == b'.' => self.number(),
            Some(c) if c.is_ascii_alphabetic() => {
                let name = self.identifier();
                match name {
                    "X" | "x" => Ok(self.x),
                    _ => self.call(name),
                }
            }
            Some(_) => Err(self.syntax("unexpected character")),
            None => Err(self.syntax("unexpected end of expression")),
        }
    }

    fn call(&mut self, name: &'a str) -> EvalResult {
        self.expect(b'(')?;
        let arg = self.expr()?;
        self.expect(b')')?;

        let value = match name {
            "sin" => arg.sin(),
            "cos" => arg.cos(),
            "tan" => arg.tan(),
            "exp" => arg.exp(),
            "ln" | "log" => {
                if arg <= 0.0 {
                    return Err(ExpressionError::Domain("ln"));
                }
                arg.ln()
            }
            "sqrt" => {
                if arg < 0.0 {
                    return Err(ExpressionError::Domain("sqrt"));
                }
                arg.sqrt()
            }
            "abs" => arg.abs(),
            _ => {
                return Err(ExpressionError::Syntax {
                    position: self.pos,
                    message: format!("unknown function {}", name),
                })
            }
        };
        finite(value)
    }

    fn number(&mut self) -> EvalResult {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == b'.') {
            self.pos += 1;
        }
        // Exponent part, only when digits follow
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let signed = matches!(self.peek_at(1), Some(b'+' | b'-'));
            let digit_at = if signed { 2 } else { 1 };
            if matches!(self.peek_at(digit_at), Some(c) if c.is_ascii_digit()) {
                self.pos += digit_at;
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }

        let text = std::str::from_utf8(&self.src[start..self.pos])
            .map_err(|_| self.syntax("invalid number"))?;
        text.parse::<f64>()
            .map_err(|_| self.syntax("invalid number"))
    }

    fn identifier(&mut self) -> &'a str {
        let src: &'a [u8] = self.src;
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
            self.pos += 1;
        }
        // Only ASCII bytes were consumed
        std::str::from_utf8(&src[start..self.pos]).unwrap_or_default()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), ExpressionError> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.syntax(&format!("expected '{}'", byte as char)))
        }
    }

    fn syntax(&self, message: &str) -> ExpressionError {
        ExpressionError::Syntax {
            position: self.pos,
            message: message.to_string(),
        }
    }
}

fn finite(value: f64) -> EvalResult {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExpressionError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expr: &str, x: f64) -> f64 {
        evaluate(expr, x).unwrap()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("1+2*3", 0.0), 7.0);
        assert_eq!(eval("(1+2)*3", 0.0), 9.0);
        assert_eq!(eval("8/2/2", 0.0), 2.0);
        assert_eq!(eval("2-3-4", 0.0), -5.0);
        assert_eq!(eval("-X ** 2", 3.0), -9.0);
        assert_eq!(eval("2 ** 3 ** 2", 0.0), 512.0);
        assert_eq!(eval("2 ** -1", 0.0), 0.5);
        assert_eq!(eval("X*-1", 4.0), -4.0);
    }

    #[test]
    fn test_functions_and_numbers() {
        assert_eq!(eval("exp(0)+ln(1)", 0.0), 1.0);
        assert!((eval("sin(X)", std::f64::consts::FRAC_PI_2) - 1.0).abs() < 1e-12);
        assert_eq!(eval("1.5e2", 0.0), 150.0);
        assert_eq!(eval("3 * (x ** 2)", 2.0), 12.0);
        assert_eq!(eval("1/(X)", 4.0), 0.25);
    }

    #[test]
    fn test_numeric_failures() {
        assert_eq!(evaluate("1/(X-X)", 2.0), Err(ExpressionError::DivisionByZero));
        assert_eq!(evaluate("ln(X)", 0.0), Err(ExpressionError::Domain("ln")));
        assert_eq!(evaluate("ln(X)", -1.0), Err(ExpressionError::Domain("ln")));
        assert_eq!(evaluate("exp(exp(X))", 10.0), Err(ExpressionError::Overflow));
        assert_eq!(evaluate("0 ** -1", 0.0), Err(ExpressionError::DivisionByZero));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(evaluate("", 0.0), Err(ExpressionError::Syntax { .. })));
        assert!(matches!(evaluate("X+", 0.0), Err(ExpressionError::Syntax { .. })));
        assert!(matches!(evaluate("(X", 0.0), Err(ExpressionError::Syntax { .. })));
        assert!(matches!(evaluate("X X", 0.0), Err(ExpressionError::Syntax { .. })));
        assert!(matches!(evaluate("foo(X)", 0.0), Err(ExpressionError::Syntax { .. })));
    }
}
