//! Small value types shared across parameter records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction for a `sort` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the wire form of this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `field direction` clause of a `sort` parameter.
///
/// `field` may be any sortable expression, including functions such as
/// `div(popularity,price)` or the pseudo-field `score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortClause {
    /// Field name or function.
    pub field: String,
    /// Direction.
    pub order: SortOrder,
}

impl SortClause {
    /// Ascending sort on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    /// Descending sort on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

impl fmt::Display for SortClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.order)
    }
}

/// Default boolean operator between query clauses (`q.op`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryOperator {
    /// All clauses must match.
    And,
    /// Any clause may match.
    Or,
}

impl QueryOperator {
    /// Returns the wire form of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field with an optional boost, as used in `qf`, `pf` and `mlt.qf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostedField {
    /// Field name.
    pub field: String,
    /// Boost factor; `None` writes the bare field name.
    pub boost: Option<f32>,
}

impl BoostedField {
    /// A field with no explicit boost.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            boost: None,
        }
    }

    /// A field with boost `boost`.
    pub fn boosted(field: impl Into<String>, boost: f32) -> Self {
        Self {
            field: field.into(),
            boost: Some(boost),
        }
    }
}

impl fmt::Display for BoostedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.boost {
            Some(boost) => write!(f, "{}^{}", self.field, boost),
            None => f.write_str(&self.field),
        }
    }
}

/// Renders boosted fields for a space-joined `qf`-style key.
pub(crate) fn boosted_strings(fields: &[BoostedField]) -> Vec<String> {
    fields.iter().map(ToString::to_string).collect()
}
