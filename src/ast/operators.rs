use std::fmt;

/// RQL operator keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Logical
    /// Conjunction of every operand (`and`)
    And,
    /// Disjunction of every operand (`or`)
    Or,

    // Comparison
    /// Equal (`eq`)
    Eq,
    /// Not equal (`ne`)
    Ne,
    /// Less than (`lt`)
    Lt,
    /// Greater than (`gt`)
    Gt,
    /// Less than or equal (`le`)
    Le,
    /// Greater than or equal (`ge`)
    Ge,

    // Membership
    /// Operand 0 is in the set formed by the remaining operands (`in`)
    In,
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Operator::And,
        Operator::Or,
        Operator::Eq,
        Operator::Ne,
        Operator::Lt,
        Operator::Gt,
        Operator::Le,
        Operator::Ge,
        Operator::In,
    ];

    /// Looks up an operator by its keyword. Matching is case sensitive.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "and" => Some(Operator::And),
            "or" => Some(Operator::Or),
            "eq" => Some(Operator::Eq),
            "ne" => Some(Operator::Ne),
            "lt" => Some(Operator::Lt),
            "gt" => Some(Operator::Gt),
            "le" => Some(Operator::Le),
            "ge" => Some(Operator::Ge),
            "in" => Some(Operator::In),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Lt => "lt",
            Operator::Gt => "gt",
            Operator::Le => "le",
            Operator::Ge => "ge",
            Operator::In => "in",
        }
    }

    /// `and` and `or` combine predicates; the rest compare values.
    pub fn is_logical(self) -> bool {
        matches!(self, Operator::And | Operator::Or)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
