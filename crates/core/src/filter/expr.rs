// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filter expression types.
//!
//! A filter is a boolean tree whose leaves compare build fields, substitution
//! lookups, status constants, string literals, and lists.

use crate::build::BuildStatus;

/// A parsed filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// `left || right`
    Or(Box<FilterExpr>, Box<FilterExpr>),
    /// `left && right`
    And(Box<FilterExpr>, Box<FilterExpr>),
    /// `!expr`
    Not(Box<FilterExpr>),
    /// `left == right` or `left != right`
    Compare {
        left: Operand,
        op: CompareOp,
        right: Operand,
    },
    /// `needle in haystack`, where the haystack is a list or the substitution map.
    In { needle: Operand, haystack: Operand },
    /// `true` or `false`
    Literal(bool),
}

/// Comparison operators for filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`==`).
    Eq,
    /// Not equal (`!=`).
    Ne,
}

impl CompareOp {
    /// Returns valid operator symbols for error messages.
    pub fn valid_symbols() -> &'static str {
        "==, !=, in"
    }
}

/// Scalar build fields reachable as `build.<field>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildField {
    Id,
    ProjectId,
    Status,
    LogUrl,
    BuildTriggerId,
}

impl BuildField {
    /// Returns valid field names for error messages.
    pub fn valid_names() -> &'static str {
        "id, project_id, status, log_url, build_trigger_id, substitutions"
    }
}

/// A value position in a filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// `build.status`, `build.project_id`, ...
    Field(BuildField),
    /// `build.substitutions["KEY"]`
    Substitution(String),
    /// `build.substitutions` (only valid as the right side of `in`)
    Substitutions,
    /// `Build.Status.SUCCESS`
    Status(BuildStatus),
    /// `"text"` or `'text'`
    Str(String),
    /// `true` / `false`
    Bool(bool),
    /// `[a, b, c]`
    List(Vec<Operand>),
}

/// Static type of an operand, checked when the filter is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Status,
    String,
    Bool,
    List,
    Map,
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Status => "status",
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::List => "list",
            ValueType::Map => "map",
        }
    }
}

impl Operand {
    pub fn value_type(&self) -> ValueType {
        match self {
            Operand::Field(BuildField::Status) | Operand::Status(_) => ValueType::Status,
            Operand::Field(_) | Operand::Substitution(_) | Operand::Str(_) => ValueType::String,
            Operand::Substitutions => ValueType::Map,
            Operand::Bool(_) => ValueType::Bool,
            Operand::List(_) => ValueType::List,
        }
    }

    /// Element type of a list literal; `None` for empty lists and non-lists.
    pub fn element_type(&self) -> Option<ValueType> {
        match self {
            Operand::List(items) => items.first().map(Operand::value_type),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod tests;
