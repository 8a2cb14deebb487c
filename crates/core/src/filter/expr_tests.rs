// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    status_field = { Operand::Field(BuildField::Status), ValueType::Status },
    status_const = { Operand::Status(BuildStatus::Success), ValueType::Status },
    project_id = { Operand::Field(BuildField::ProjectId), ValueType::String },
    substitution = { Operand::Substitution("REF_NAME".into()), ValueType::String },
    literal = { Operand::Str("x".into()), ValueType::String },
    map = { Operand::Substitutions, ValueType::Map },
    boolean = { Operand::Bool(true), ValueType::Bool },
    list = { Operand::List(vec![]), ValueType::List },
)]
fn operand_types(operand: Operand, expected: ValueType) {
    assert_eq!(operand.value_type(), expected);
}

#[test]
fn list_element_type_comes_from_first_item() {
    let list = Operand::List(vec![
        Operand::Status(BuildStatus::Failure),
        Operand::Status(BuildStatus::Timeout),
    ]);
    assert_eq!(list.element_type(), Some(ValueType::Status));
    assert_eq!(Operand::List(vec![]).element_type(), None);
    assert_eq!(Operand::Str("x".into()).element_type(), None);
}
