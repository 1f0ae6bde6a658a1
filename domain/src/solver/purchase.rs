//! Purchase solver
//!
//! Picks the priority products, suggested brands, selection criterion and a
//! per-person budget for a group purchase.

use super::{NEED_TWO_PARTICIPANTS, Solver, TOO_FEW_PARTICIPANTS, common_items, declared_budgets};
use crate::budget::{BudgetMethod, aggregate};
use crate::complexity::{ComplexityBuilder, ComplexityScore};
use crate::participant::Participant;
use crate::result::{DecisionValue, SolverResult};
use crate::voting::{VotingMethod, agreement_ratio, max_attainable, tally_lists, tally_single};

/// Brand entry meaning "any brand is fine"; excluded from voting
const NO_BRAND_PREFERENCE: &str = "sin preferencia";

/// Budget dispersion beyond this max/min multiple adds a strong penalty
const BUDGET_DISPERSION_LIMIT: f64 = 5.0;
/// Mild dispersion limit, adds weight without a factor line
const BUDGET_DISPERSION_SOFT_LIMIT: f64 = 2.0;

/// Solves consensus for group purchases
#[derive(Debug, Clone)]
pub struct PurchaseSolver {
    voting: VotingMethod,
    budget: BudgetMethod,
}

impl PurchaseSolver {
    pub fn new(voting: VotingMethod, budget: BudgetMethod) -> Self {
        Self { voting, budget }
    }

    fn products(p: &Participant) -> Vec<String> {
        p.list("productos_interes")
    }

    fn brands(p: &Participant) -> Vec<String> {
        p.list("marcas_preferidas")
            .into_iter()
            .filter(|brand| brand != NO_BRAND_PREFERENCE)
            .collect()
    }
}

impl Solver for PurchaseSolver {
    /// Complexity from budget dispersion and product/brand/priority overlap
    fn evaluate_complexity(&self, participants: &[Participant]) -> ComplexityScore {
        if participants.len() < 2 {
            return ComplexityScore::new(0.0, vec![TOO_FEW_PARTICIPANTS.to_string()]);
        }

        let mut builder = ComplexityBuilder::new();

        let budgets = declared_budgets(participants, "presupuesto_max");
        if !budgets.is_empty() {
            let min = budgets.iter().copied().fold(f64::INFINITY, f64::min);
            let max = budgets.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if min > 0.0 && max / min > BUDGET_DISPERSION_LIMIT {
                builder.add(
                    0.30,
                    format!("Presupuestos muy dispares (Q{} - Q{})", min as i64, max as i64),
                );
            } else if min > 0.0 && max / min > BUDGET_DISPERSION_SOFT_LIMIT {
                builder.add_silent(0.10);
            }
        }

        let common_products = common_items(participants, Self::products);
        if common_products.is_empty() {
            builder.add(0.30, "Sin productos en comun");
        } else if common_products.len() == 1 {
            builder.add(0.10, "Solo 1 producto en comun");
        }

        let priority_tally = tally_single(participants, |p| p.text("prioridad").map(str::to_string));
        if priority_tally.ranked().len() > 3 {
            builder.add(0.15, "Prioridades muy diversas");
        }

        // Brand overlap, only among participants who stated a preference
        let with_brands: Vec<Participant> = participants
            .iter()
            .filter(|p| !Self::brands(p).is_empty())
            .cloned()
            .collect();
        if !with_brands.is_empty() {
            let common_brands = common_items(&with_brands, Self::brands);
            if common_brands.is_empty() {
                builder.add(0.15, "Sin marcas en comun");
            }
        }

        builder.finish("Buena alineacion de preferencias")
    }

    fn solve(&self, participants: &[Participant]) -> SolverResult {
        if participants.len() < 2 {
            return SolverResult::failure(NEED_TWO_PARTICIPANTS);
        }

        let total = participants.len();
        let mut explanation = vec![format!("Metodo de presupuesto: {}", self.budget.label())];

        let budgets = declared_budgets(participants, "presupuesto_max");
        let (budget_value, budget_line) = aggregate(&budgets, self.budget);
        explanation.push(budget_line);

        let product_tally = tally_lists(self.voting, participants, Self::products);
        if product_tally.is_empty() {
            return SolverResult::failure("No hay productos de interes");
        }
        let top_products: Vec<String> = product_tally
            .top(3)
            .into_iter()
            .map(|(product, _)| product.to_string())
            .collect();
        explanation.push(format!("Productos prioritarios: {}", top_products.join(", ")));

        let brand_tally = tally_lists(self.voting, participants, Self::brands);
        let suggested_brands: Vec<String> = if brand_tally.is_empty() {
            vec![NO_BRAND_PREFERENCE.to_string()]
        } else {
            brand_tally
                .top(3)
                .into_iter()
                .map(|(brand, _)| brand.to_string())
                .collect()
        };
        explanation.push(format!("Marcas preferidas: {}", suggested_brands.join(", ")));

        let priority_tally = tally_single(participants, |p| p.text("prioridad").map(str::to_string));
        let (best_priority, priority_count) = priority_tally
            .winner()
            .map(|(p, c)| (p.to_string(), c))
            .unwrap_or_else(|| ("calidad".to_string(), 0));
        explanation.push(format!("Criterio principal: {} ({} votos)", best_priority, priority_count));

        let product_ratio = agreement_ratio(
            self.voting,
            product_tally.winner().map(|(_, score)| score).unwrap_or(0),
            total,
            max_attainable(participants, Self::products),
        );
        let priority_ratio = priority_count as f64 / total as f64;
        let confidence = (product_ratio + priority_ratio) / 2.0;

        let decision = vec![
            (
                "Presupuesto por persona".to_string(),
                DecisionValue::text(format!("Q{}", budget_value.trunc() as i64)),
            ),
            (
                "Productos prioritarios".to_string(),
                DecisionValue::list(top_products),
            ),
            (
                "Marcas sugeridas".to_string(),
                DecisionValue::list(suggested_brands),
            ),
            (
                "Criterio de seleccion".to_string(),
                DecisionValue::text(best_priority),
            ),
        ];

        SolverResult::success(decision, confidence, explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn buyer(name: &str, budget: u32, products: &[&str], brands: &[&str], priority: &str) -> Participant {
        Participant::new(name)
            .with_field("presupuesto_max", json!(budget))
            .with_list("productos_interes", products)
            .with_list("marcas_preferidas", brands)
            .with_field("prioridad", json!(priority))
    }

    fn solver() -> PurchaseSolver {
        PurchaseSolver::new(VotingMethod::Plurality, BudgetMethod::Minimum)
    }

    #[test]
    fn test_no_products_fails_cleanly() {
        let group = vec![
            buyer("Ana", 500, &[], &[], "precio"),
            buyer("Carlos", 500, &[], &[], "precio"),
        ];

        let result = solver().solve(&group);
        assert!(!result.success);
        assert_eq!(result.explanation, vec!["No hay productos de interes"]);
    }

    #[test]
    fn test_top_products_and_priority() {
        let group = vec![
            buyer("Ana", 500, &["monitor", "webcam"], &[], "precio"),
            buyer("Carlos", 800, &["monitor"], &[], "precio"),
            buyer("Maria", 600, &["monitor", "audifonos"], &[], "calidad"),
        ];

        let result = solver().solve(&group);
        assert!(result.success);

        let (_, products) = result
            .decision
            .iter()
            .find(|(field, _)| field == "Productos prioritarios")
            .unwrap();
        assert_eq!(
            products,
            &DecisionValue::list(vec![
                "monitor".to_string(),
                "webcam".to_string(),
                "audifonos".to_string()
            ])
        );

        let (_, priority) = result
            .decision
            .iter()
            .find(|(field, _)| field == "Criterio de seleccion")
            .unwrap();
        assert_eq!(priority, &DecisionValue::text("precio"));

        // products: 3/3, priority: 2/3
        assert!((result.confidence - (1.0 + 2.0 / 3.0) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_preference_brands_excluded() {
        let group = vec![
            buyer("Ana", 500, &["monitor"], &["sin preferencia"], "precio"),
            buyer("Carlos", 500, &["monitor"], &["sin preferencia"], "precio"),
        ];

        let result = solver().solve(&group);
        let (_, brands) = result
            .decision
            .iter()
            .find(|(field, _)| field == "Marcas sugeridas")
            .unwrap();
        assert_eq!(brands, &DecisionValue::list(vec!["sin preferencia".to_string()]));
    }

    #[test]
    fn test_strong_budget_dispersion_complexity() {
        let group = vec![
            buyer("Ana", 100, &["monitor"], &[], "precio"),
            buyer("Carlos", 900, &["monitor"], &[], "precio"),
        ];

        let score = solver().evaluate_complexity(&group);
        assert!(score
            .factors
            .contains(&"Presupuestos muy dispares (Q100 - Q900)".to_string()));
    }

    #[test]
    fn test_soft_budget_dispersion_has_no_factor() {
        let group = vec![
            buyer("Ana", 100, &["monitor"], &[], "precio"),
            buyer("Carlos", 300, &["monitor"], &[], "precio"),
        ];

        let score = solver().evaluate_complexity(&group);
        // 0.10 silent (dispersion) + 0.10 single common product
        assert!((score.score - 0.20).abs() < 1e-9);
        assert_eq!(score.factors, vec!["Solo 1 producto en comun"]);
    }

    #[test]
    fn test_disjoint_brands_complexity() {
        let group = vec![
            buyer("Ana", 100, &["monitor"], &["LG"], "precio"),
            buyer("Carlos", 100, &["monitor"], &["Samsung"], "precio"),
        ];

        let score = solver().evaluate_complexity(&group);
        assert!(score.factors.contains(&"Sin marcas en comun".to_string()));
    }

    #[test]
    fn test_borda_products_use_rank_weights() {
        let group = vec![
            buyer("Ana", 500, &["webcam", "monitor"], &[], "precio"),
            buyer("Carlos", 500, &["monitor"], &[], "precio"),
        ];

        let result = PurchaseSolver::new(VotingMethod::Borda, BudgetMethod::Minimum).solve(&group);
        let (_, products) = result
            .decision
            .iter()
            .find(|(field, _)| field == "Productos prioritarios")
            .unwrap();
        // webcam 2 pts, monitor 1+1=2 pts: tie, webcam appeared first
        assert_eq!(
            products,
            &DecisionValue::list(vec!["webcam".to_string(), "monitor".to_string()])
        );
    }
}
