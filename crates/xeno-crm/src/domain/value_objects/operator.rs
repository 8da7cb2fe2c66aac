//! Comparison operators and the field to operator table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::field::Field;

/// Comparison applied between a customer attribute and a condition value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    GreaterThan,
    LessThan,
    Equal,
    GreaterOrEqual,
    LessOrEqual,
    Other(String),
}

impl Operator {
    /// Wire symbol
    pub fn symbol(&self) -> &str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::Equal => "=",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Operator {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            ">" => Self::GreaterThan,
            "<" => Self::LessThan,
            "=" => Self::Equal,
            ">=" => Self::GreaterOrEqual,
            "<=" => Self::LessOrEqual,
            _ => Self::Other(raw),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Other(raw) => raw,
            known => known.symbol().to_string(),
        }
    }
}

impl FromStr for Operator {
    type Err = OperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Operator::from(s.trim().to_string()) {
            Operator::Other(raw) => Err(OperatorError::Unknown(raw)),
            op => Ok(op),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperatorError {
    #[error("unknown operator '{0}'")]
    Unknown(String),
}

/// Boolean combinator applied across every condition of a group
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combinator {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl Combinator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl FromStr for Combinator {
    type Err = OperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            _ => Err(OperatorError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Field -> operator table
// =============================================================================

/// Operator offered for a field, with the label shown next to it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorOption {
    pub operator: Operator,
    pub label: &'static str,
}

const NUMERIC_OPERATORS: &[OperatorOption] = &[
    OperatorOption { operator: Operator::GreaterThan, label: ">" },
    OperatorOption { operator: Operator::LessThan, label: "<" },
    OperatorOption { operator: Operator::Equal, label: "=" },
    OperatorOption { operator: Operator::GreaterOrEqual, label: ">=" },
    OperatorOption { operator: Operator::LessOrEqual, label: "<=" },
];

const RECENCY_OPERATORS: &[OperatorOption] = &[
    OperatorOption { operator: Operator::GreaterThan, label: "More than" },
    OperatorOption { operator: Operator::LessThan, label: "Less than" },
    OperatorOption { operator: Operator::Equal, label: "Exactly" },
];

/// Ordered operators allowed for `field`. Empty for unknown fields.
pub fn operator_options(field: &Field) -> &'static [OperatorOption] {
    match field {
        Field::TotalSpending | Field::Visits => NUMERIC_OPERATORS,
        Field::LastVisit => RECENCY_OPERATORS,
        Field::Other(_) => &[],
    }
}

/// Operator a condition falls back to when its field changes
pub fn default_operator(field: &Field) -> Option<Operator> {
    operator_options(field).first().map(|o| o.operator.clone())
}

pub fn is_operator_allowed(field: &Field, operator: &Operator) -> bool {
    operator_options(field).iter().any(|o| &o.operator == operator)
}

pub fn operator_label(field: &Field, operator: &Operator) -> Option<&'static str> {
    operator_options(field)
        .iter()
        .find(|o| &o.operator == operator)
        .map(|o| o.label)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperatorTableError {
    #[error("no operators configured for field '{0}'")]
    EmptyField(Field),
    #[error("operator '{operator}' listed twice for field '{field}'")]
    Duplicate { field: Field, operator: Operator },
}

/// Checks that every known field has a non-empty, duplicate-free operator list.
///
/// Run once at startup so the raw-value fallback in condition formatting
/// never hides a gap in the table.
pub fn validate_operator_table() -> Result<(), OperatorTableError> {
    for field in Field::KNOWN {
        let options = operator_options(&field);
        if options.is_empty() {
            return Err(OperatorTableError::EmptyField(field));
        }
        for (i, option) in options.iter().enumerate() {
            if options[..i].iter().any(|o| o.operator == option.operator) {
                return Err(OperatorTableError::Duplicate {
                    field,
                    operator: option.operator.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_valid() {
        assert!(validate_operator_table().is_ok());
    }

    #[test]
    fn test_first_operator_is_greater_than() {
        for field in Field::KNOWN {
            assert_eq!(default_operator(&field), Some(Operator::GreaterThan));
        }
        assert_eq!(default_operator(&Field::Other("tier".into())), None);
    }

    #[test]
    fn test_last_visit_rejects_inclusive_bounds() {
        assert!(is_operator_allowed(&Field::Visits, &Operator::GreaterOrEqual));
        assert!(!is_operator_allowed(&Field::LastVisit, &Operator::GreaterOrEqual));
        assert!(!is_operator_allowed(&Field::LastVisit, &Operator::LessOrEqual));
    }

    #[test]
    fn test_labels() {
        assert_eq!(operator_label(&Field::LastVisit, &Operator::LessThan), Some("Less than"));
        assert_eq!(operator_label(&Field::LastVisit, &Operator::Equal), Some("Exactly"));
        assert_eq!(operator_label(&Field::TotalSpending, &Operator::LessOrEqual), Some("<="));
        assert_eq!(operator_label(&Field::LastVisit, &Operator::LessOrEqual), None);
    }

    #[test]
    fn test_combinator_wire_format() {
        assert_eq!(serde_json::to_string(&Combinator::Or).unwrap(), "\"OR\"");
        assert_eq!("and".parse::<Combinator>().unwrap(), Combinator::And);
        assert!("xor".parse::<Combinator>().is_err());
    }
}
