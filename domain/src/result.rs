//! Solver results and report rendering

use serde::{Deserialize, Serialize};

/// A value resolved for one decision field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecisionValue {
    /// Single resolved value ("2026-01-16", "Q500", ...)
    Text(String),
    /// Ordered list of resolved values (activities, restrictions, ...)
    List(Vec<String>),
    /// Ordered pairs, e.g. task -> assignee
    Assignments(Vec<(String, String)>),
}

impl DecisionValue {
    pub fn text(value: impl Into<String>) -> Self {
        DecisionValue::Text(value.into())
    }

    pub fn list(values: Vec<String>) -> Self {
        DecisionValue::List(values)
    }

    /// Render for the DECISION block. Empty lists read as "ninguna".
    fn render(&self) -> String {
        match self {
            DecisionValue::Text(s) => s.clone(),
            DecisionValue::List(items) => {
                if items.is_empty() {
                    "ninguna".to_string()
                } else {
                    items.join(", ")
                }
            }
            DecisionValue::Assignments(pairs) => pairs
                .iter()
                .map(|(k, v)| format!("{} -> {}", k, v))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// Result of attempting to solve a problem algorithmically.
///
/// `decision` is an ordered field -> value mapping mirroring resolution
/// order; `explanation` is the ordered justification trail; `confidence` is
/// always derived from observed agreement ratios, never asserted.
///
/// # Example
///
/// ```
/// use consenso_domain::{DecisionValue, SolverResult};
///
/// let result = SolverResult::success(
///     vec![("Fecha".to_string(), DecisionValue::text("2026-01-16"))],
///     0.85,
///     vec!["2/2 participantes disponibles en 2026-01-16".to_string()],
/// );
/// assert!(result.render().starts_with("DECISION"));
/// assert!(result.render().contains("CONFIANZA: 85%"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// Whether the solver produced a usable decision
    pub success: bool,
    /// Ordered decision fields
    pub decision: Vec<(String, DecisionValue)>,
    /// 0.0 to 1.0, derived from agreement ratios
    pub confidence: f64,
    /// Ordered justification lines
    pub explanation: Vec<String>,
}

impl SolverResult {
    /// Create a successful result
    pub fn success(
        decision: Vec<(String, DecisionValue)>,
        confidence: f64,
        explanation: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            decision,
            confidence: confidence.clamp(0.0, 1.0),
            explanation,
        }
    }

    /// Create a failed result with a single explanation line
    pub fn failure(explanation: impl Into<String>) -> Self {
        Self {
            success: false,
            decision: Vec::new(),
            confidence: 0.0,
            explanation: vec![explanation.into()],
        }
    }

    /// Render the fixed structured text report.
    ///
    /// DECISION block, JUSTIFICACION block, then the confidence percentage
    /// (truncated toward zero) and the method tag.
    pub fn render(&self) -> String {
        if !self.success {
            return "No se pudo resolver algoritmicamente.".to_string();
        }

        let mut lines = vec!["DECISION".to_string()];
        for (field, value) in &self.decision {
            lines.push(format!("- {}: {}", field, value.render()));
        }

        lines.push(String::new());
        lines.push("JUSTIFICACION".to_string());
        for entry in &self.explanation {
            if !entry.trim().is_empty() {
                lines.push(format!("- {}", entry.trim()));
            }
        }

        lines.push(String::new());
        lines.push(format!("CONFIANZA: {}%", (self.confidence * 100.0) as u32));
        lines.push("METODO: Algoritmico".to_string());

        lines.join("\n")
    }
}
