// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filter expressions deciding whether a build event notifies.
//!
//! Filters use a small CEL-like syntax over the build:
//!
//! ```text
//! build.status == Build.Status.FAILURE
//! build.status in [Build.Status.FAILURE, Build.Status.TIMEOUT]
//! build.substitutions["BRANCH_NAME"] == "main" && build.project_id != "sandbox"
//! "TAG_NAME" in build.substitutions
//! !(build.status == Build.Status.SUCCESS)
//! ```
//!
//! # Fields
//!
//! - `build.id`, `build.project_id`, `build.log_url`, `build.build_trigger_id` - strings
//! - `build.status` - compared against `Build.Status.<NAME>`
//! - `build.substitutions["KEY"]` / `build.substitutions.KEY` - strings
//!
//! # Operators
//!
//! - `==`, `!=`, `in`, `&&`, `||`, `!`, parentheses

mod eval;
mod expr;
mod parser;

pub use eval::Value;
pub use expr::{BuildField, CompareOp, FilterExpr, Operand, ValueType};
pub use parser::{parse_filter, parse_operand};

use crate::build::BuildEventView;
use crate::error::Result;

/// A compiled filter, owned by the notifier for its lifetime.
#[derive(Debug, Clone)]
pub struct EventFilter {
    source: String,
    expr: FilterExpr,
}

impl EventFilter {
    /// Compile a filter expression.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidFilter`] on syntax or type errors.
    pub fn compile(source: &str) -> Result<Self> {
        let expr = parse_filter(source)?;
        Ok(EventFilter {
            source: source.trim().to_string(),
            expr,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &FilterExpr {
        &self.expr
    }

    /// Check whether a build event should produce a notification.
    ///
    /// Evaluation failures are logged and count as no match.
    pub fn matches(&self, view: &BuildEventView) -> bool {
        match self.expr.evaluate(view) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!(
                    "filter '{}' failed for build {}, not notifying: {}",
                    self.source,
                    view.build().id,
                    e
                );
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
