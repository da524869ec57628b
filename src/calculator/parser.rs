//! Recursive-descent arithmetic parser
//!
//! Grammar (loosest to tightest binding):
//!
//! ```text
//! expr  := term  { ('+' | '-') term }
//! term  := unary { ('*' | '/') unary }
//! unary := '-' unary | power
//! power := atom [ '^' unary ]          (right-associative)
//! atom  := NUMBER | '(' expr ')'
//! ```
//!
//! `^` binds tighter than unary minus, so `-2^2 == -4`.

use super::error::{EvalError, EvalResult};

/// Euler's number, substituted for the `e` symbol during tokenization
pub const EULER: f64 = 2.718281828459045;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

/// Tokenize a pre-validated expression
///
/// The character set has already been checked by `evaluate`, so this only
/// has to split numbers from operators. The symbolic substitutions (`e` →
/// Euler's number, `^` → power operator) happen here, once per occurrence.
fn tokenize(expression: &str) -> EvalResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::Syntax(format!("无法解析数字 '{}'", literal)))?;
                tokens.push(Token::Number(value));
            }
            'e' => {
                chars.next();
                tokens.push(Token::Number(EULER));
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            other => return Err(EvalError::InvalidCharacter(other)),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> EvalResult<f64> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> EvalResult<f64> {
        let mut value = self.unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.advance();
                    value *= self.unary()?;
                }
                Token::Slash => {
                    self.advance();
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> EvalResult<f64> {
        if let Some(Token::Minus) = self.peek() {
            self.advance();
            return Ok(-self.unary()?);
        }
        self.power()
    }

    fn power(&mut self) -> EvalResult<f64> {
        let base = self.atom()?;
        if let Some(Token::Caret) = self.peek() {
            self.advance();
            // Right-associative: the exponent may itself be a power or a
            // negated value (2^3^2 == 512, 2^-2 == 0.25)
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> EvalResult<f64> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(EvalError::Syntax("括号不匹配".to_string())),
                }
            }
            Some(token) => Err(EvalError::Syntax(format!("意外的符号 {:?}", token))),
            None => Err(EvalError::Syntax("表达式不完整".to_string())),
        }
    }
}

/// Parse and evaluate a tokenized expression
pub fn parse(expression: &str) -> EvalResult<f64> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(EvalError::Syntax("表达式为空".to_string()));
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;

    if parser.pos != parser.tokens.len() {
        return Err(EvalError::Syntax("表达式末尾有多余内容".to_string()));
    }
    Ok(value)
}
