use crate::{Error, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

const DEFAULT_OPERATORS: [&str; 6] = ["=", "~", "*", "/", "+", "-"];

const CONVENTIONAL_OPERATORS: [&str; 6] = ["=", "~", "+", "-", "*", "/"];

const LAMBDA: &str = "~";

/// An ordered list of operator symbols. The grouper splits on the first
/// symbol in the table that appears in a span, so earlier operators bind
/// more loosely.
///
/// Some operators are _binders_: the first operand of a binder is always a
/// parameter list, even when it holds a single name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TableDefinition")]
pub struct PrecedenceTable {
    operators: Vec<String>,
    binders: Vec<String>,
}

/// An unvalidated table, as it appears in serialized form.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableDefinition {
    operators: Vec<String>,

    #[serde(default)]
    binders: Vec<String>,
}

impl TryFrom<TableDefinition> for PrecedenceTable {
    type Error = Error;

    fn try_from(definition: TableDefinition) -> Result<Self> {
        definition
            .binders
            .iter()
            .try_fold(PrecedenceTable::new(definition.operators)?, |table, binder| {
                table.with_binder(binder)
            })
    }
}

impl PrecedenceTable {
    /// Create a table from symbols ordered loosest first.
    pub fn new<S: Into<String>>(operators: impl IntoIterator<Item = S>) -> Result<Self> {
        let operators = operators.into_iter().map(Into::into).collect::<Vec<_>>();

        if let Some(symbol) = operators
            .iter()
            .find(|symbol| symbol.is_empty() || symbol.contains([' ', '(', ')']))
        {
            return Err(Error::InvalidTable(format!(
                "`{symbol}` cannot be used as an operator"
            )));
        }

        if let Some(symbol) = operators.iter().duplicates().next() {
            return Err(Error::InvalidTable(format!(
                "`{symbol}` appears more than once"
            )));
        }

        Ok(PrecedenceTable {
            operators,
            binders: Vec::new(),
        })
    }

    /// Mark `symbol` as a binder.
    pub fn with_binder(mut self, symbol: &str) -> Result<Self> {
        if !self.contains(symbol) {
            return Err(Error::InvalidTable(format!(
                "binder `{symbol}` is not in the table"
            )));
        }

        if !self.is_binder(symbol) {
            self.binders.push(String::from(symbol));
        }

        Ok(self)
    }

    /// `= ~ + - * /`: assignment, then lambdas, then the usual arithmetic
    /// precedence.
    pub fn conventional() -> Self {
        PrecedenceTable::builtin(&CONVENTIONAL_OPERATORS)
    }

    fn builtin(operators: &[&str]) -> Self {
        PrecedenceTable {
            operators: operators.iter().copied().map(String::from).collect(),
            binders: vec![String::from(LAMBDA)],
        }
    }

    /// The operators, loosest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.operators.iter().map(String::as_str)
    }

    /// Whether `symbol` is an operator in this table.
    pub fn contains(&self, symbol: &str) -> bool {
        self.precedence(symbol).is_some()
    }

    /// The position of `symbol` in the table; lower binds more loosely.
    pub fn precedence(&self, symbol: &str) -> Option<usize> {
        self.operators.iter().position(|operator| operator == symbol)
    }

    /// Whether `symbol` is a binder.
    pub fn is_binder(&self, symbol: &str) -> bool {
        self.binders.iter().any(|binder| binder == symbol)
    }
}

/// `= ~ * / + -`, with `~` as a binder. Multiplication and division come
/// before addition and subtraction, so they bind more loosely.
impl Default for PrecedenceTable {
    fn default() -> Self {
        PrecedenceTable::builtin(&DEFAULT_OPERATORS)
    }
}
