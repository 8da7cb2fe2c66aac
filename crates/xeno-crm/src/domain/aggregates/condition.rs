//! Segment condition model
//!
//! A segment's audience is a flat group of field/operator/value predicates
//! joined by one combinator. The client only edits and serializes groups;
//! evaluation against customers happens on the backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::value_objects::{
    default_operator, is_operator_allowed, operator_label, Combinator, Field, Operator,
};

/// One atomic predicate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    field: Field,
    operator: Operator,
    value: String,
}

impl Condition {
    /// Create a validated condition
    pub fn new(field: Field, operator: Operator, value: impl Into<String>) -> Result<Self, ConditionError> {
        if !field.is_known() {
            return Err(ConditionError::UnknownField(field));
        }
        if !is_operator_allowed(&field, &operator) {
            return Err(ConditionError::OperatorNotAllowed { field, operator });
        }
        Ok(Self {
            field,
            operator,
            value: value.into(),
        })
    }

    pub fn field(&self) -> &Field { &self.field }
    pub fn operator(&self) -> &Operator { &self.operator }
    pub fn value(&self) -> &str { &self.value }

    /// Human-readable rendering, e.g. `Last Visit Less than 30`.
    ///
    /// Unknown fields and operators render as their raw wire values.
    pub fn format(&self) -> String {
        let field_label = self.field.label().unwrap_or(self.field.as_str());
        let operator_label =
            operator_label(&self.field, &self.operator).unwrap_or(self.operator.symbol());
        format!("{} {} {}", field_label, operator_label, self.value)
    }

    /// True when the operator belongs to the field's allowed set
    pub fn is_valid(&self) -> bool {
        is_operator_allowed(&self.field, &self.operator)
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            field: Field::TotalSpending,
            operator: Operator::GreaterThan,
            value: String::new(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for Condition {
    type Err = ConditionError;

    /// Parses `<field><operator><value>`, e.g. `totalSpending>=500` or
    /// `lastVisit < 30`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let start = s
            .find(|c| matches!(c, '<' | '>' | '='))
            .ok_or_else(|| ConditionError::Syntax(s.to_string()))?;
        let (field, rest) = s.split_at(start);
        let op_len = if rest.starts_with(">=") || rest.starts_with("<=") { 2 } else { 1 };
        let (operator, value) = rest.split_at(op_len);

        let field = field
            .parse::<Field>()
            .map_err(|_| ConditionError::UnknownField(Field::from(field.trim().to_string())))?;
        Condition::new(field, Operator::from(operator.to_string()), value.trim())
    }
}

/// Partial update applied by [`ConditionGroup::update_condition`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConditionPatch {
    pub field: Option<Field>,
    pub operator: Option<Operator>,
    pub value: Option<String>,
}

impl ConditionPatch {
    pub fn field(field: Field) -> Self {
        Self { field: Some(field), ..Default::default() }
    }

    pub fn operator(operator: Operator) -> Self {
        Self { operator: Some(operator), ..Default::default() }
    }

    pub fn value(value: impl Into<String>) -> Self {
        Self { value: Some(value.into()), ..Default::default() }
    }

    /// Patch that replaces all three parts of a condition
    pub fn replace(condition: Condition) -> Self {
        Self {
            field: Some(condition.field),
            operator: Some(condition.operator),
            value: Some(condition.value),
        }
    }
}

/// Full predicate of a segment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionGroup {
    operator: Combinator,
    conditions: Vec<Condition>,
}

impl ConditionGroup {
    /// Create a group from existing conditions; at least one is required
    pub fn new(operator: Combinator, conditions: Vec<Condition>) -> Result<Self, ConditionError> {
        if conditions.is_empty() {
            return Err(ConditionError::Empty);
        }
        Ok(Self { operator, conditions })
    }

    pub fn combinator(&self) -> Combinator { self.operator }
    pub fn conditions(&self) -> &[Condition] { &self.conditions }
    pub fn len(&self) -> usize { self.conditions.len() }
    pub fn is_empty(&self) -> bool { self.conditions.is_empty() }

    pub fn set_combinator(&mut self, operator: Combinator) {
        self.operator = operator;
    }

    /// Append the default condition (`totalSpending > ""`)
    pub fn add_condition(&mut self) {
        self.conditions.push(Condition::default());
    }

    /// Apply `patch` to the condition at `index`.
    ///
    /// A field change resets the operator to the new field's first allowed
    /// operator and clears the value before any operator/value in the same
    /// patch is applied. The condition is left untouched on error.
    pub fn update_condition(&mut self, index: usize, patch: ConditionPatch) -> Result<(), ConditionError> {
        let len = self.conditions.len();
        let current = self
            .conditions
            .get(index)
            .ok_or(ConditionError::IndexOutOfBounds { index, len })?;
        let mut next = current.clone();

        if let Some(field) = patch.field {
            if field != next.field {
                let operator = default_operator(&field)
                    .ok_or_else(|| ConditionError::UnknownField(field.clone()))?;
                next = Condition {
                    field,
                    operator,
                    value: String::new(),
                };
            }
        }

        if let Some(operator) = patch.operator {
            if !is_operator_allowed(&next.field, &operator) {
                return Err(ConditionError::OperatorNotAllowed {
                    field: next.field,
                    operator,
                });
            }
            next.operator = operator;
        }

        if let Some(value) = patch.value {
            next.value = value;
        }

        self.conditions[index] = next;
        Ok(())
    }

    /// Checks the group is fit for submission
    pub fn validate(&self) -> Result<(), ConditionError> {
        if self.conditions.is_empty() {
            return Err(ConditionError::Empty);
        }
        for condition in &self.conditions {
            if !condition.field.is_known() {
                return Err(ConditionError::UnknownField(condition.field.clone()));
            }
            if !condition.is_valid() {
                return Err(ConditionError::OperatorNotAllowed {
                    field: condition.field.clone(),
                    operator: condition.operator.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for ConditionGroup {
    /// Draft group: `AND` with one default condition
    fn default() -> Self {
        Self {
            operator: Combinator::And,
            conditions: vec![Condition::default()],
        }
    }
}

/// JSON encoding of a group, as embedded in segment records
pub fn serialize(group: &ConditionGroup) -> Result<String, serde_json::Error> {
    serde_json::to_string(group)
}

/// Inverse of [`serialize`]
pub fn deserialize(raw: &str) -> Result<ConditionGroup, ParseError> {
    let group: ConditionGroup = serde_json::from_str(raw).map_err(|e| {
        if e.is_data() {
            ParseError::Shape(e.to_string())
        } else {
            ParseError::InvalidJson(e.to_string())
        }
    })?;
    if group.conditions.is_empty() {
        return Err(ParseError::Shape("condition group has no conditions".into()));
    }
    Ok(group)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    #[error("condition index {index} out of bounds ({len} conditions)")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("unknown field '{0}'")]
    UnknownField(Field),

    #[error("operator '{operator}' is not allowed for field '{field}'")]
    OperatorNotAllowed { field: Field, operator: Operator },

    #[error("condition group must contain at least one condition")]
    Empty,

    #[error("cannot parse condition '{0}', expected e.g. totalSpending>=500")]
    Syntax(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("conditions are not valid JSON: {0}")]
    InvalidJson(String),

    #[error("conditions do not match the expected shape: {0}")]
    Shape(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn condition(field: Field, operator: Operator, value: &str) -> Condition {
        Condition::new(field, operator, value).unwrap()
    }

    #[test]
    fn test_format_numeric() {
        let c = condition(Field::TotalSpending, Operator::GreaterOrEqual, "500");
        assert_eq!(c.format(), "Total Spending >= 500");
    }

    #[test]
    fn test_format_recency() {
        let c = condition(Field::LastVisit, Operator::LessThan, "30");
        assert_eq!(c.to_string(), "Last Visit Less than 30");
    }

    #[test]
    fn test_format_falls_back_to_raw_values() {
        let c: Condition =
            serde_json::from_str(r#"{"field":"loyaltyTier","operator":"~","value":"gold"}"#).unwrap();
        assert_eq!(c.format(), "loyaltyTier ~ gold");

        let c: Condition =
            serde_json::from_str(r#"{"field":"lastVisit","operator":">=","value":"7"}"#).unwrap();
        assert_eq!(c.format(), "Last Visit >= 7");
    }

    #[test]
    fn test_draft_group() {
        let group = ConditionGroup::default();
        assert_eq!(group.combinator(), Combinator::And);
        assert_eq!(group.conditions(), &[Condition::default()]);
        assert_eq!(group.conditions()[0].operator(), &Operator::GreaterThan);
        assert_eq!(group.conditions()[0].value(), "");
    }

    #[test]
    fn test_add_condition_appends_default() {
        let mut group = ConditionGroup::default();
        group.update_condition(0, ConditionPatch::value("100")).unwrap();
        group.add_condition();
        assert_eq!(group.len(), 2);
        assert_eq!(group.conditions()[0].value(), "100");
        assert_eq!(group.conditions()[1], Condition::default());
    }

    #[test]
    fn test_set_combinator() {
        let mut group = ConditionGroup::default();
        group.set_combinator(Combinator::Or);
        assert_eq!(group.combinator(), Combinator::Or);
    }

    #[test]
    fn test_field_change_resets_operator_and_value() {
        let mut group = ConditionGroup::default();
        group.update_condition(0, ConditionPatch::field(Field::LastVisit)).unwrap();
        group.update_condition(0, ConditionPatch::operator(Operator::Equal)).unwrap();
        group.update_condition(0, ConditionPatch::value("14")).unwrap();

        group.update_condition(0, ConditionPatch::field(Field::Visits)).unwrap();

        let c = &group.conditions()[0];
        assert_eq!(c.field(), &Field::Visits);
        assert_eq!(c.operator(), &Operator::GreaterThan);
        assert_eq!(c.value(), "");
    }

    #[test]
    fn test_same_field_keeps_operator_and_value() {
        let mut group = ConditionGroup::default();
        group
            .update_condition(0, ConditionPatch::replace(condition(Field::TotalSpending, Operator::LessOrEqual, "9")))
            .unwrap();
        group.update_condition(0, ConditionPatch::field(Field::TotalSpending)).unwrap();
        assert_eq!(group.conditions()[0].operator(), &Operator::LessOrEqual);
        assert_eq!(group.conditions()[0].value(), "9");
    }

    #[test]
    fn test_patch_with_field_and_operator_applies_both() {
        let mut group = ConditionGroup::default();
        let patch = ConditionPatch {
            field: Some(Field::LastVisit),
            operator: Some(Operator::LessThan),
            value: Some("30".into()),
        };
        group.update_condition(0, patch).unwrap();
        assert_eq!(group.conditions()[0].format(), "Last Visit Less than 30");
    }

    #[test]
    fn test_rejects_operator_not_allowed_for_field() {
        let mut group = ConditionGroup::default();
        group.update_condition(0, ConditionPatch::field(Field::LastVisit)).unwrap();
        let err = group
            .update_condition(0, ConditionPatch::operator(Operator::GreaterOrEqual))
            .unwrap_err();
        assert!(matches!(err, ConditionError::OperatorNotAllowed { .. }));
        assert_eq!(group.conditions()[0].operator(), &Operator::GreaterThan);
    }

    #[test]
    fn test_rejects_unknown_field() {
        let mut group = ConditionGroup::default();
        let err = group
            .update_condition(0, ConditionPatch::field(Field::Other("age".into())))
            .unwrap_err();
        assert!(matches!(err, ConditionError::UnknownField(_)));
        assert_eq!(group.conditions()[0], Condition::default());
    }

    #[test]
    fn test_out_of_bounds_never_creates_entries() {
        let mut group = ConditionGroup::default();
        let err = group.update_condition(3, ConditionPatch::value("1")).unwrap_err();
        assert_eq!(err, ConditionError::IndexOutOfBounds { index: 3, len: 1 });
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_wire_shape() {
        let group = ConditionGroup::new(
            Combinator::Or,
            vec![condition(Field::Visits, Operator::GreaterThan, "3")],
        )
        .unwrap();
        assert_eq!(
            serialize(&group).unwrap(),
            r#"{"operator":"OR","conditions":[{"field":"visits","operator":">","value":"3"}]}"#
        );
    }

    #[test]
    fn test_deserialize_rejects_invalid_json() {
        assert!(matches!(deserialize("{not json"), Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn test_deserialize_rejects_wrong_shape() {
        assert!(matches!(deserialize(r#"{"operator":"AND"}"#), Err(ParseError::Shape(_))));
        assert!(matches!(deserialize(r#"{"operator":"XOR","conditions":[]}"#), Err(ParseError::Shape(_))));
        assert!(matches!(deserialize(r#"{"operator":"AND","conditions":[]}"#), Err(ParseError::Shape(_))));
    }

    #[test]
    fn test_parse_condition_text() {
        let c: Condition = "totalSpending>=500".parse().unwrap();
        assert_eq!(c, condition(Field::TotalSpending, Operator::GreaterOrEqual, "500"));

        let c: Condition = "lastVisit < 30".parse().unwrap();
        assert_eq!(c, condition(Field::LastVisit, Operator::LessThan, "30"));

        assert!(matches!("visits".parse::<Condition>(), Err(ConditionError::Syntax(_))));
        assert!(matches!("age>3".parse::<Condition>(), Err(ConditionError::UnknownField(_))));
        assert!(matches!(
            "lastVisit<=3".parse::<Condition>(),
            Err(ConditionError::OperatorNotAllowed { .. })
        ));
    }

    #[test]
    fn test_group_requires_a_condition() {
        assert_eq!(ConditionGroup::new(Combinator::And, vec![]), Err(ConditionError::Empty));
    }

    // =========================================================================
    // Properties
    // =========================================================================

    #[derive(Clone, Debug)]
    enum Edit {
        Add,
        Combinator(Combinator),
        Field(usize, Field),
        Operator(usize, Operator),
        Value(usize, String),
    }

    fn any_field() -> impl Strategy<Value = Field> {
        prop_oneof![
            Just(Field::TotalSpending),
            Just(Field::Visits),
            Just(Field::LastVisit),
        ]
    }

    fn any_operator() -> impl Strategy<Value = Operator> {
        prop_oneof![
            Just(Operator::GreaterThan),
            Just(Operator::LessThan),
            Just(Operator::Equal),
            Just(Operator::GreaterOrEqual),
            Just(Operator::LessOrEqual),
        ]
    }

    fn any_edit() -> impl Strategy<Value = Edit> {
        prop_oneof![
            Just(Edit::Add),
            prop_oneof![Just(Combinator::And), Just(Combinator::Or)].prop_map(Edit::Combinator),
            (0usize..6, any_field()).prop_map(|(i, f)| Edit::Field(i, f)),
            (0usize..6, any_operator()).prop_map(|(i, o)| Edit::Operator(i, o)),
            (0usize..6, "[0-9]{0,4}").prop_map(|(i, v)| Edit::Value(i, v)),
        ]
    }

    fn apply(group: &mut ConditionGroup, edit: Edit) {
        let _ = match edit {
            Edit::Add => {
                group.add_condition();
                Ok(())
            }
            Edit::Combinator(c) => {
                group.set_combinator(c);
                Ok(())
            }
            Edit::Field(i, f) => group.update_condition(i, ConditionPatch::field(f)),
            Edit::Operator(i, o) => group.update_condition(i, ConditionPatch::operator(o)),
            Edit::Value(i, v) => group.update_condition(i, ConditionPatch::value(v)),
        };
    }

    proptest! {
        #[test]
        fn prop_operator_always_allowed(edits in prop::collection::vec(any_edit(), 0..40)) {
            let mut group = ConditionGroup::default();
            for edit in edits {
                apply(&mut group, edit);
                prop_assert!(group.conditions().iter().all(Condition::is_valid));
                prop_assert!(group.validate().is_ok());
            }
        }

        #[test]
        fn prop_round_trip(edits in prop::collection::vec(any_edit(), 0..20)) {
            let mut group = ConditionGroup::default();
            for edit in edits {
                apply(&mut group, edit);
            }
            let raw = serialize(&group).unwrap();
            prop_assert_eq!(deserialize(&raw).unwrap(), group);
        }
    }
}
