//! Project solver
//!
//! Assigns catalog tasks to participants via the configured matching
//! strategy. Confidence comes from the matcher itself: assigned tasks over
//! candidate tasks.

use super::{NEED_TWO_PARTICIPANTS, Solver, TOO_FEW_PARTICIPANTS};
use crate::complexity::{ComplexityBuilder, ComplexityScore};
use crate::matching::{self, MatchingMethod};
use crate::participant::Participant;
use crate::result::{DecisionValue, SolverResult};
use crate::voting::{VotingMethod, tally_lists};
use std::collections::HashSet;

/// Skills the group must cover for a viable project
const REQUIRED_SKILLS: [&str; 3] = ["frontend", "backend", "base de datos"];

/// Solves task allocation for projects
#[derive(Debug, Clone)]
pub struct ProjectSolver {
    matching: MatchingMethod,
}

impl ProjectSolver {
    pub fn new(matching: MatchingMethod) -> Self {
        Self { matching }
    }
}

impl Solver for ProjectSolver {
    /// Complexity from skill coverage, total availability and preference conflicts
    fn evaluate_complexity(&self, participants: &[Participant]) -> ComplexityScore {
        if participants.len() < 2 {
            return ComplexityScore::new(0.0, vec![TOO_FEW_PARTICIPANTS.to_string()]);
        }

        let mut builder = ComplexityBuilder::new();

        let all_skills: HashSet<String> = participants
            .iter()
            .flat_map(|p| p.list("habilidades"))
            .collect();
        let missing: Vec<&str> = REQUIRED_SKILLS
            .iter()
            .copied()
            .filter(|skill| !all_skills.contains(*skill))
            .collect();
        if !missing.is_empty() {
            builder.add(0.20, format!("Faltan habilidades clave: {}", missing.join(", ")));
        }

        let total_hours: f64 = participants
            .iter()
            .filter_map(|p| p.number("disponibilidad_horas"))
            .sum();
        if total_hours < 40.0 {
            builder.add(0.25, format!("Poca disponibilidad total ({}h)", total_hours as i64));
        } else if total_hours < 80.0 {
            builder.add(0.10, format!("Disponibilidad moderada ({}h)", total_hours as i64));
        }

        // First task avoided by more than half the group, in mention order
        let avoid_tally = tally_lists(VotingMethod::Plurality, participants, |p| {
            p.list("tareas_evitar")
        });
        for (task, count) in avoid_tally.ranked() {
            if count as f64 > participants.len() as f64 / 2.0 {
                builder.add(0.15, format!("Muchos evitan '{}'", task));
                break;
            }
        }

        let interest_tally = tally_lists(VotingMethod::Plurality, participants, |p| {
            p.list("tareas_interes")
        });
        let counts: Vec<usize> = interest_tally.ranked().iter().map(|(_, c)| *c).collect();
        if let (Some(&max), Some(&min)) = (counts.iter().max(), counts.iter().min()) {
            if max > 3 * min {
                builder.add(0.10, "Interes muy concentrado en pocas tareas");
            }
        }

        builder.finish("Buena distribucion de habilidades e intereses")
    }

    fn solve(&self, participants: &[Participant]) -> SolverResult {
        if participants.len() < 2 {
            return SolverResult::failure(NEED_TWO_PARTICIPANTS);
        }

        let result = matching::run(self.matching, participants);
        if result.is_empty() {
            return SolverResult::failure("No se pudieron asignar tareas");
        }

        let mut explanation = vec![format!("Metodo de matching: {}", self.matching.label())];
        for (name, hours) in result.hours_by_person() {
            explanation.push(format!(
                "{}: {} ({}h)",
                name,
                result.tasks_for(&name).join(", "),
                hours
            ));
        }

        let mut sorted_assignments = result.assignments.clone();
        sorted_assignments.sort_by(|a, b| a.0.cmp(&b.0));

        let decision = vec![
            (
                "Asignaciones".to_string(),
                DecisionValue::Assignments(sorted_assignments),
            ),
            (
                "Horas por persona".to_string(),
                DecisionValue::Assignments(
                    result
                        .hours_by_person()
                        .into_iter()
                        .map(|(name, hours)| (name, format!("{}h", hours)))
                        .collect(),
                ),
            ),
            (
                "Total horas".to_string(),
                DecisionValue::text(format!("{}", result.total_hours())),
            ),
        ];

        SolverResult::success(decision, result.confidence, explanation)
    }
}
