// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Evaluation of filter expressions against build events.

use std::collections::BTreeMap;

use crate::build::{BuildEventView, BuildStatus};
use crate::error::{Error, Result};

use super::expr::{BuildField, CompareOp, FilterExpr, Operand};

/// A runtime value produced by an operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Status(BuildStatus),
    Str(&'a str),
    Bool(bool),
    List(Vec<Value<'a>>),
    Map(&'a BTreeMap<String, String>),
}

impl Value<'_> {
    /// Render a scalar value as text; collections render as an empty string.
    pub fn to_text(&self) -> String {
        match self {
            Value::Status(s) => s.as_str().to_string(),
            Value::Str(s) => (*s).to_string(),
            Value::Bool(b) => b.to_string(),
            Value::List(_) | Value::Map(_) => String::new(),
        }
    }
}

impl FilterExpr {
    /// Evaluate this filter against a build event.
    ///
    /// `&&` and `||` short-circuit, so a missing substitution on the far side
    /// of a decided branch is never looked up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FilterEvaluation`] when the expression references a
    /// substitution the build does not carry.
    pub fn evaluate(&self, view: &BuildEventView) -> Result<bool> {
        match self {
            FilterExpr::Or(left, right) => Ok(left.evaluate(view)? || right.evaluate(view)?),
            FilterExpr::And(left, right) => Ok(left.evaluate(view)? && right.evaluate(view)?),
            FilterExpr::Not(inner) => Ok(!inner.evaluate(view)?),
            FilterExpr::Literal(value) => Ok(*value),
            FilterExpr::Compare { left, op, right } => {
                let equal = left.value(view)? == right.value(view)?;
                Ok(match op {
                    CompareOp::Eq => equal,
                    CompareOp::Ne => !equal,
                })
            }
            FilterExpr::In { needle, haystack } => {
                let needle = needle.value(view)?;
                match haystack.value(view)? {
                    Value::List(items) => Ok(items.contains(&needle)),
                    Value::Map(map) => match needle {
                        Value::Str(key) => Ok(map.contains_key(key)),
                        other => Err(Error::FilterEvaluation(format!(
                            "substitution keys are strings, got {other:?}"
                        ))),
                    },
                    other => Err(Error::FilterEvaluation(format!(
                        "'in' requires a collection, got {other:?}"
                    ))),
                }
            }
        }
    }
}

impl Operand {
    /// Resolve this operand against a build event.
    pub fn value<'a>(&'a self, view: &'a BuildEventView) -> Result<Value<'a>> {
        let build = view.build();
        match self {
            Operand::Field(BuildField::Id) => Ok(Value::Str(&build.id)),
            Operand::Field(BuildField::ProjectId) => Ok(Value::Str(&build.project_id)),
            Operand::Field(BuildField::Status) => Ok(Value::Status(build.status)),
            Operand::Field(BuildField::LogUrl) => Ok(Value::Str(&build.log_url)),
            Operand::Field(BuildField::BuildTriggerId) => {
                Ok(Value::Str(build.build_trigger_id.as_deref().unwrap_or("")))
            }
            Operand::Substitution(key) => view
                .substitutions()
                .get(key)
                .map(|v| Value::Str(v.as_str()))
                .ok_or_else(|| {
                    Error::FilterEvaluation(format!("no such substitution: '{key}'"))
                }),
            Operand::Substitutions => Ok(Value::Map(view.substitutions())),
            Operand::Status(status) => Ok(Value::Status(*status)),
            Operand::Str(s) => Ok(Value::Str(s)),
            Operand::Bool(b) => Ok(Value::Bool(*b)),
            Operand::List(items) => items
                .iter()
                .map(|item| item.value(view))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
        }
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod tests;
