// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parser for filter expressions.
//!
//! Parses expressions like `build.status == Build.Status.SUCCESS` into
//! structured [`FilterExpr`] values, rejecting ill-typed comparisons up front
//! so evaluation only has to deal with missing data.

use crate::build::BuildStatus;
use crate::error::{Error, Result};

use super::expr::{BuildField, CompareOp, FilterExpr, Operand, ValueType};

/// Longest slice of the input echoed back in error messages.
const FRAGMENT_LEN: usize = 24;

/// Parse a filter expression from a string.
///
/// # Examples
///
/// ```ignore
/// let expr = parse_filter("build.status == Build.Status.SUCCESS")?;
/// let expr = parse_filter(r#"build.substitutions["BRANCH_NAME"] != "main""#)?;
/// let expr = parse_filter("build.status in [Build.Status.FAILURE, Build.Status.TIMEOUT]")?;
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidFilter`] naming the offending fragment.
pub fn parse_filter(input: &str) -> Result<FilterExpr> {
    if input.trim().is_empty() {
        return Err(invalid("empty filter expression", input, 0));
    }

    let mut parser = Parser::new(input)?;
    let expr = parser.parse_or()?;
    parser.expect_end()?;
    Ok(expr)
}

/// Parse a single operand such as `build.status` or `build.substitutions['X']`.
///
/// Used for parameter bindings, which reference build data without comparing it.
pub fn parse_operand(input: &str) -> Result<Operand> {
    let mut parser = Parser::new(input)?;
    let operand = parser.parse_operand()?;
    parser.expect_end()?;
    Ok(operand)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Bang,
    And,
    Or,
    Eq,
    Ne,
    Str(String),
    Ident(String),
}

#[derive(Debug)]
struct Lexed {
    token: Token,
    start: usize,
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Lexed>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self> {
        Ok(Parser {
            input,
            tokens: tokenize(input)?,
            pos: 0,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|l| &l.token)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|l| l.token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Byte offset of the current token, or the end of input.
    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|l| l.start)
            .unwrap_or(self.input.len())
    }

    fn error_here(&self, reason: impl Into<String>) -> Error {
        invalid(reason, self.input, self.offset())
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<()> {
        if self.peek() == Some(&expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error_here(format!("expected {what}")))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.error_here(format!("expected {what}"))),
        }
    }

    fn expect_end(&self) -> Result<()> {
        if self.pos < self.tokens.len() {
            return Err(self.error_here("unexpected trailing input"));
        }
        Ok(())
    }

    fn parse_or(&mut self) -> Result<FilterExpr> {
        let mut left = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let right = self.parse_and()?;
            left = FilterExpr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<FilterExpr> {
        let mut left = self.parse_unary()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let right = self.parse_unary()?;
            left = FilterExpr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<FilterExpr> {
        if self.peek() == Some(&Token::Bang) {
            self.pos += 1;
            let inner = self.parse_unary()?;
            return Ok(FilterExpr::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<FilterExpr> {
        if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            let expr = self.parse_or()?;
            self.expect(Token::RParen, "')'")?;
            return Ok(expr);
        }

        let start = self.offset();
        let left = self.parse_operand()?;

        let op = match self.peek() {
            Some(Token::Eq) => Some(CompareOp::Eq),
            Some(Token::Ne) => Some(CompareOp::Ne),
            _ => None,
        };

        if let Some(op) = op {
            self.pos += 1;
            let right = self.parse_operand()?;
            check_comparable(&left, &right).map_err(|r| invalid(r, self.input, start))?;
            return Ok(FilterExpr::Compare { left, op, right });
        }

        if matches!(self.peek(), Some(Token::Ident(kw)) if kw == "in") {
            self.pos += 1;
            let haystack = self.parse_operand()?;
            check_membership(&left, &haystack).map_err(|r| invalid(r, self.input, start))?;
            return Ok(FilterExpr::In {
                needle: left,
                haystack,
            });
        }

        match left {
            Operand::Bool(value) => Ok(FilterExpr::Literal(value)),
            other => Err(invalid(
                format!(
                    "expected a comparison ({}) after {} value",
                    CompareOp::valid_symbols(),
                    other.value_type().name()
                ),
                self.input,
                start,
            )),
        }
    }

    fn parse_operand(&mut self) -> Result<Operand> {
        let start = self.offset();
        match self.next() {
            Some(Token::Str(s)) => Ok(Operand::Str(s)),
            Some(Token::LBracket) => self.parse_list(start),
            Some(Token::Ident(name)) => match name.as_str() {
                "true" => Ok(Operand::Bool(true)),
                "false" => Ok(Operand::Bool(false)),
                "build" => self.parse_build_path(),
                "Build" => self.parse_status_const(),
                _ => Err(invalid(
                    format!("unknown identifier '{name}'"),
                    self.input,
                    start,
                )),
            },
            _ => Err(invalid("expected a value", self.input, start)),
        }
    }

    fn parse_list(&mut self, start: usize) -> Result<Operand> {
        let mut items = Vec::new();
        if self.peek() == Some(&Token::RBracket) {
            self.pos += 1;
            return Ok(Operand::List(items));
        }
        loop {
            let item = self.parse_operand()?;
            if matches!(item.value_type(), ValueType::List | ValueType::Map) {
                return Err(invalid("lists may only hold scalar values", self.input, start));
            }
            if let Some(first) = items.first().map(Operand::value_type) {
                if first != item.value_type() {
                    return Err(invalid(
                        format!(
                            "mixed list element types: {} and {}",
                            first.name(),
                            item.value_type().name()
                        ),
                        self.input,
                        start,
                    ));
                }
            }
            items.push(item);
            match self.next() {
                Some(Token::Comma) => continue,
                Some(Token::RBracket) => return Ok(Operand::List(items)),
                _ => return Err(invalid("expected ',' or ']'", self.input, start)),
            }
        }
    }

    fn parse_build_path(&mut self) -> Result<Operand> {
        self.expect(Token::Dot, "'.' after 'build'")?;
        let start = self.offset();
        let field = self.expect_ident("a build field")?;
        match field.as_str() {
            "id" => Ok(Operand::Field(BuildField::Id)),
            "project_id" | "projectId" => Ok(Operand::Field(BuildField::ProjectId)),
            "status" => Ok(Operand::Field(BuildField::Status)),
            "log_url" | "logUrl" => Ok(Operand::Field(BuildField::LogUrl)),
            "build_trigger_id" | "buildTriggerId" => Ok(Operand::Field(BuildField::BuildTriggerId)),
            "substitutions" => self.parse_substitution_access(),
            _ => Err(invalid(
                format!(
                    "unknown build field '{field}'. Valid fields: {}",
                    BuildField::valid_names()
                ),
                self.input,
                start,
            )),
        }
    }

    fn parse_substitution_access(&mut self) -> Result<Operand> {
        match self.peek() {
            Some(Token::LBracket) => {
                self.pos += 1;
                let key = match self.next() {
                    Some(Token::Str(key)) => key,
                    _ => return Err(self.error_here("expected a quoted substitution key")),
                };
                self.expect(Token::RBracket, "']'")?;
                Ok(Operand::Substitution(key))
            }
            Some(Token::Dot) => {
                self.pos += 1;
                let key = self.expect_ident("a substitution key")?;
                Ok(Operand::Substitution(key))
            }
            _ => Ok(Operand::Substitutions),
        }
    }

    fn parse_status_const(&mut self) -> Result<Operand> {
        self.expect(Token::Dot, "'.' after 'Build'")?;
        let start = self.offset();
        let kind = self.expect_ident("'Status'")?;
        if kind != "Status" {
            return Err(invalid(format!("unknown constant 'Build.{kind}'"), self.input, start));
        }
        self.expect(Token::Dot, "'.' after 'Build.Status'")?;
        let start = self.offset();
        let name = self.expect_ident("a build status")?;
        BuildStatus::from_name(&name).map(Operand::Status).ok_or_else(|| {
            invalid(
                format!(
                    "unknown build status '{name}'. Valid statuses: {}",
                    BuildStatus::valid_names()
                ),
                self.input,
                start,
            )
        })
    }
}

fn check_comparable(left: &Operand, right: &Operand) -> std::result::Result<(), String> {
    let (lt, rt) = (left.value_type(), right.value_type());
    if matches!(lt, ValueType::List | ValueType::Map) || matches!(rt, ValueType::List | ValueType::Map) {
        return Err(format!("cannot compare {} with {}", lt.name(), rt.name()));
    }
    if lt != rt {
        return Err(format!("cannot compare {} with {}", lt.name(), rt.name()));
    }
    Ok(())
}

fn check_membership(needle: &Operand, haystack: &Operand) -> std::result::Result<(), String> {
    let nt = needle.value_type();
    match haystack.value_type() {
        ValueType::List => match haystack.element_type() {
            Some(et) if et != nt => Err(format!("cannot look up {} in a list of {}", nt.name(), et.name())),
            _ => Ok(()),
        },
        ValueType::Map if nt == ValueType::String => Ok(()),
        ValueType::Map => Err(format!("substitution keys are strings, not {}", nt.name())),
        other => Err(format!("'in' requires a list or build.substitutions, not {}", other.name())),
    }
}

fn invalid(reason: impl Into<String>, input: &str, at: usize) -> Error {
    let rest = input.get(at..).unwrap_or("").trim();
    let fragment = if rest.is_empty() {
        "<end of input>".to_string()
    } else {
        rest.chars().take(FRAGMENT_LEN).collect()
    };
    Error::InvalidFilter {
        reason: reason.into(),
        fragment,
    }
}

/// Split a filter string into tokens, remembering where each one starts.
fn tokenize(input: &str) -> Result<Vec<Lexed>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '(' | ')' | '[' | ']' | ',' | '.' => {
                chars.next();
                match c {
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    ',' => Token::Comma,
                    _ => Token::Dot,
                }
            }
            '&' | '|' | '=' => {
                chars.next();
                match chars.next() {
                    Some((_, n)) if n == c => match c {
                        '&' => Token::And,
                        '|' => Token::Or,
                        _ => Token::Eq,
                    },
                    _ => {
                        return Err(invalid(
                            format!("unknown operator '{c}', expected '{c}{c}'"),
                            input,
                            start,
                        ))
                    }
                }
            }
            '!' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '='))) {
                    chars.next();
                    Token::Ne
                } else {
                    Token::Bang
                }
            }
            '"' | '\'' => {
                chars.next();
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, ch)) = chars.next() {
                    match ch {
                        '\\' => match chars.next() {
                            Some((_, 'n')) => value.push('\n'),
                            Some((_, 't')) => value.push('\t'),
                            Some((_, esc)) => value.push(esc),
                            None => break,
                        },
                        ch if ch == c => {
                            closed = true;
                            break;
                        }
                        ch => value.push(ch),
                    }
                }
                if !closed {
                    return Err(invalid("unterminated string literal", input, start));
                }
                Token::Str(value)
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        ident.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Ident(ident)
            }
            other => {
                return Err(invalid(
                    format!("unexpected character '{other}'"),
                    input,
                    start,
                ))
            }
        };
        tokens.push(Lexed { token, start });
    }

    Ok(tokens)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
