//! Trip solver
//!
//! Picks a destination, start date, duration and group budget for a trip,
//! suggesting the most popular activities and collecting constraints.

use super::{
    NEED_TWO_PARTICIPANTS, Solver, TOO_FEW_PARTICIPANTS, common_items, declared_budgets,
    union_sorted,
};
use crate::budget::{BudgetMethod, aggregate};
use crate::complexity::{ComplexityBuilder, ComplexityScore};
use crate::participant::Participant;
use crate::result::{DecisionValue, SolverResult};
use crate::voting::{VotingMethod, agreement_ratio, max_attainable, tally_lists, tally_single};

/// Budget dispersion beyond this max/min multiple adds complexity
const BUDGET_DISPERSION_LIMIT: f64 = 3.0;

/// Solves consensus for group trips
#[derive(Debug, Clone)]
pub struct TripSolver {
    voting: VotingMethod,
    budget: BudgetMethod,
}

impl TripSolver {
    pub fn new(voting: VotingMethod, budget: BudgetMethod) -> Self {
        Self { voting, budget }
    }

    fn dates(p: &Participant) -> Vec<String> {
        p.list("fechas_disponibles")
    }

    fn destinations(p: &Participant) -> Vec<String> {
        p.list("destinos_interes")
    }
}

impl Solver for TripSolver {
    /// Complexity from date overlap, budget dispersion and destination overlap
    fn evaluate_complexity(&self, participants: &[Participant]) -> ComplexityScore {
        if participants.len() < 2 {
            return ComplexityScore::new(0.0, vec![TOO_FEW_PARTICIPANTS.to_string()]);
        }

        let mut builder = ComplexityBuilder::new();

        let common_dates = common_items(participants, Self::dates);
        if common_dates.is_empty() {
            builder.add(0.30, "Sin fechas en comun");
        } else if common_dates.len() == 1 {
            builder.add(0.10, "Solo 1 fecha en comun");
        }

        let budgets = declared_budgets(participants, "presupuesto_max");
        if !budgets.is_empty() {
            let min = budgets.iter().copied().fold(f64::INFINITY, f64::min);
            let max = budgets.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if min > 0.0 && max / min > BUDGET_DISPERSION_LIMIT {
                builder.add(
                    0.25,
                    format!("Presupuestos muy dispares (Q{} - Q{})", min as i64, max as i64),
                );
            }
        }

        let common_destinations = common_items(participants, Self::destinations);
        if common_destinations.is_empty() {
            builder.add(0.25, "Sin destinos en comun");
        } else if common_destinations.len() == 1 {
            builder.add_silent(0.05);
        }

        let constraints = union_sorted(participants, |p| p.list("restricciones"));
        if constraints.len() > 3 {
            builder.add(0.15, format!("{} restricciones a considerar", constraints.len()));
        }

        builder.finish("Buena alineacion de preferencias")
    }

    fn solve(&self, participants: &[Participant]) -> SolverResult {
        if participants.len() < 2 {
            return SolverResult::failure(NEED_TWO_PARTICIPANTS);
        }

        let total = participants.len();
        let mut explanation = vec![format!("Metodo de votacion: {}", self.voting.label())];

        let date_tally = tally_lists(self.voting, participants, Self::dates);
        let Some((best_date, date_score)) = date_tally.winner() else {
            return SolverResult::failure("No hay fechas disponibles");
        };
        let best_date = best_date.to_string();
        match self.voting {
            VotingMethod::Borda => {
                explanation.push(format!("Fecha: {} ({} pts Borda)", best_date, date_score));
            }
            VotingMethod::Plurality => {
                explanation.push(format!("{}/{} disponibles para {}", date_score, total, best_date));
            }
        }

        let budgets = declared_budgets(participants, "presupuesto_max");
        let (budget_value, budget_line) = aggregate(&budgets, self.budget);
        explanation.push(budget_line);

        let destination_tally = tally_lists(self.voting, participants, Self::destinations);
        let Some((best_destination, destination_score)) = destination_tally.winner() else {
            return SolverResult::failure("No hay destinos de interes");
        };
        let best_destination = best_destination.to_string();
        match self.voting {
            VotingMethod::Borda => explanation.push(format!(
                "Destino: {} ({} pts Borda)",
                best_destination, destination_score
            )),
            VotingMethod::Plurality => explanation.push(format!(
                "Destino mas popular: {} ({} votos)",
                best_destination, destination_score
            )),
        }

        // Duration is single-choice: plain mode
        let duration_tally =
            tally_single(participants, |p| p.text("duracion_preferida").map(str::to_string));
        let best_duration = duration_tally
            .winner()
            .map(|(d, _)| d.to_string())
            .unwrap_or_else(|| "3-4 dias".to_string());
        explanation.push(format!("Duracion preferida: {}", best_duration));

        let activity_tally = tally_lists(self.voting, participants, |p| p.list("actividades"));
        let top_activities: Vec<String> = activity_tally
            .top(3)
            .into_iter()
            .map(|(activity, _)| activity.to_string())
            .collect();
        if !top_activities.is_empty() {
            explanation.push(format!("Actividades sugeridas: {}", top_activities.join(", ")));
        }

        let constraints = union_sorted(participants, |p| p.list("restricciones"));

        let date_ratio = agreement_ratio(
            self.voting,
            date_score,
            total,
            max_attainable(participants, Self::dates),
        );
        let destination_ratio = agreement_ratio(
            self.voting,
            destination_score,
            total,
            max_attainable(participants, Self::destinations),
        );
        let confidence = (date_ratio + destination_ratio) / 2.0;

        let decision = vec![
            ("Destino".to_string(), DecisionValue::text(best_destination)),
            ("Fecha de inicio".to_string(), DecisionValue::text(best_date)),
            ("Duracion".to_string(), DecisionValue::text(best_duration)),
            (
                "Presupuesto maximo".to_string(),
                DecisionValue::text(format!("Q{}", budget_value.trunc() as i64)),
            ),
            ("Actividades".to_string(), DecisionValue::list(top_activities)),
            (
                "Restricciones a considerar".to_string(),
                DecisionValue::list(constraints),
            ),
        ];

        SolverResult::success(decision, confidence, explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn traveler(name: &str, dates: &[&str], budget: u32, destinations: &[&str]) -> Participant {
        Participant::new(name)
            .with_list("fechas_disponibles", dates)
            .with_field("presupuesto_max", json!(budget))
            .with_list("destinos_interes", destinations)
    }

    fn solver() -> TripSolver {
        TripSolver::new(VotingMethod::Plurality, BudgetMethod::Minimum)
    }

    #[test]
    fn test_minimum_budget_limits_group() {
        let group = vec![
            traveler("Ana", &["2026-02-01"], 500, &["Tikal"]),
            traveler("Carlos", &["2026-02-01"], 1500, &["Tikal"]),
        ];

        let result = solver().solve(&group);
        assert!(result.success);
        let (_, budget) = result
            .decision
            .iter()
            .find(|(field, _)| field == "Presupuesto maximo")
            .unwrap();
        assert_eq!(budget, &DecisionValue::text("Q500"));
        assert!(result
            .explanation
            .contains(&"Presupuesto (minimo): Q500".to_string()));
    }

    #[test]
    fn test_median_budget_method() {
        let group = vec![
            traveler("Ana", &["2026-02-01"], 100, &["Tikal"]),
            traveler("Carlos", &["2026-02-01"], 500, &["Tikal"]),
        ];

        let result = TripSolver::new(VotingMethod::Plurality, BudgetMethod::Median).solve(&group);
        let (_, budget) = result
            .decision
            .iter()
            .find(|(field, _)| field == "Presupuesto maximo")
            .unwrap();
        assert_eq!(budget, &DecisionValue::text("Q300"));
    }

    #[test]
    fn test_no_destinations_fails_cleanly() {
        let group = vec![
            traveler("Ana", &["2026-02-01"], 500, &[]),
            traveler("Carlos", &["2026-02-01"], 500, &[]),
        ];

        let result = solver().solve(&group);
        assert!(!result.success);
        assert_eq!(result.explanation, vec!["No hay destinos de interes"]);
    }

    #[test]
    fn test_budget_dispersion_complexity() {
        let group = vec![
            traveler("Ana", &["2026-02-01"], 300, &["Tikal"]),
            traveler("Carlos", &["2026-02-01"], 2000, &["Tikal"]),
        ];

        let score = solver().evaluate_complexity(&group);
        assert!(score
            .factors
            .contains(&"Presupuestos muy dispares (Q300 - Q2000)".to_string()));
        assert!((score.score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_missing_budgets_degrade_gracefully() {
        let group = vec![
            Participant::new("Ana")
                .with_list("fechas_disponibles", &["2026-02-01"])
                .with_list("destinos_interes", &["Tikal"]),
            Participant::new("Carlos")
                .with_list("fechas_disponibles", &["2026-02-01"])
                .with_list("destinos_interes", &["Tikal"]),
        ];

        let result = solver().solve(&group);
        assert!(result.success);
        assert!(result.explanation.contains(&"No hay presupuestos".to_string()));
        let (_, budget) = result
            .decision
            .iter()
            .find(|(field, _)| field == "Presupuesto maximo")
            .unwrap();
        assert_eq!(budget, &DecisionValue::text("Q0"));
    }

    #[test]
    fn test_confidence_mean_of_date_and_destination() {
        let group = vec![
            traveler("Ana", &["2026-02-01", "2026-02-08"], 500, &["Tikal"]),
            traveler("Carlos", &["2026-02-01"], 500, &["Monterrico"]),
        ];

        let result = solver().solve(&group);
        // date: 2/2, destination: 1/2
        assert!((result.confidence - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_top_activities_capped_at_three() {
        let group = vec![
            traveler("Ana", &["2026-02-01"], 500, &["Tikal"]).with_list(
                "actividades",
                &["playa", "cultura", "senderismo", "gastronomia"],
            ),
            traveler("Carlos", &["2026-02-01"], 500, &["Tikal"])
                .with_list("actividades", &["playa"]),
        ];

        let result = solver().solve(&group);
        let (_, activities) = result
            .decision
            .iter()
            .find(|(field, _)| field == "Actividades")
            .unwrap();
        assert_eq!(
            activities,
            &DecisionValue::list(vec![
                "playa".to_string(),
                "cultura".to_string(),
                "senderismo".to_string()
            ])
        );
    }
}
