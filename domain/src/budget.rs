//! Budget aggregation
//!
//! Reduces the declared per-participant budgets to one group figure.
//! `minimum` is the conservative choice (affordable to everyone); `median`
//! tracks the group center but may exceed some participants' limits.

use crate::core::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Budget aggregation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetMethod {
    /// Smallest declared budget, affordable to everyone
    #[default]
    Minimum,
    /// Statistical median, may exceed some participants' limits
    Median,
}

impl BudgetMethod {
    /// Label used in explanation trails
    pub fn label(&self) -> &'static str {
        match self {
            BudgetMethod::Minimum => "Minimo",
            BudgetMethod::Median => "Mediana",
        }
    }
}

impl fmt::Display for BudgetMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetMethod::Minimum => write!(f, "minimum"),
            BudgetMethod::Median => write!(f, "median"),
        }
    }
}

impl FromStr for BudgetMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimum" => Ok(BudgetMethod::Minimum),
            "median" => Ok(BudgetMethod::Median),
            other => Err(DomainError::unknown_method("budget", other)),
        }
    }
}

/// Aggregate budgets with the given method.
///
/// Returns the aggregated value plus a ready-made explanation line.
/// An empty input aggregates to zero.
///
/// # Example
///
/// ```
/// use consenso_domain::budget::{BudgetMethod, aggregate};
///
/// let (value, _) = aggregate(&[100.0, 500.0], BudgetMethod::Minimum);
/// assert_eq!(value, 100.0);
/// let (value, _) = aggregate(&[100.0, 500.0], BudgetMethod::Median);
/// assert_eq!(value, 300.0);
/// ```
pub fn aggregate(budgets: &[f64], method: BudgetMethod) -> (f64, String) {
    if budgets.is_empty() {
        return (0.0, "No hay presupuestos".to_string());
    }

    let value = match method {
        BudgetMethod::Minimum => budgets.iter().copied().fold(f64::INFINITY, f64::min),
        BudgetMethod::Median => median(budgets),
    };

    let explanation = format!(
        "Presupuesto ({}): Q{}",
        match method {
            BudgetMethod::Minimum => "minimo",
            BudgetMethod::Median => "mediana",
        },
        value.trunc() as i64
    );

    (value, explanation)
}

/// Statistical median; even-length inputs average the two middle values.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
