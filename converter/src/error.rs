use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Symbol is not registered and compound parsing was not requested.
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Some substring matched no rule of the compound-unit grammar.
    #[error("Cannot resolve unit expression: {0:?}")]
    Unresolvable(String),

    /// An operator split (or a paren strip) left an empty side.
    #[error("Empty subexpression in unit {0:?}")]
    EmptySubexpression(String),

    /// A `)` with no open partner, or a `(` that is never closed.
    #[error("Unmatched parenthesis in unit {0:?}")]
    UnmatchedParenthesis(String),

    /// Groups or operators nest deeper than the evaluator allows.
    #[error("Unit expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    /// The expression parsed but evaluated to 0, NaN or ±Infinity.
    #[error("Unit {unit:?} evaluates to an unusable multiplier ({value})")]
    DegenerateMultiplier { unit: String, value: f64 },

    /// Linear and nonlinear symbols must stay disjoint.
    #[error("Symbol {0:?} is already registered with a different kind of conversion")]
    SymbolConflict(String),

    #[error("Invalid multiplier for {symbol:?}: {value}")]
    InvalidMultiplier { symbol: String, value: f64 },

    #[error("Unit registry lock is poisoned (a previous call panicked)")]
    RegistryPoisoned,
}

impl UnitError {
    /// True for every grammar-level failure of the compound parser.
    ///
    /// An empty subexpression counts as an unresolvable empty string.
    pub fn is_unresolvable(&self) -> bool {
        matches!(
            self,
            UnitError::Unresolvable(_)
                | UnitError::EmptySubexpression(_)
                | UnitError::UnmatchedParenthesis(_)
                | UnitError::TooDeep { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, UnitError>;
