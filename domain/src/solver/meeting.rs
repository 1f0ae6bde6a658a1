//! Meeting solver
//!
//! Picks a date, time range, zone and venue type for a social meeting,
//! collecting dietary restrictions as must-accommodate constraints.

use super::{NEED_TWO_PARTICIPANTS, Solver, TOO_FEW_PARTICIPANTS, common_items, union_sorted};
use crate::complexity::{ComplexityBuilder, ComplexityScore};
use crate::participant::Participant;
use crate::result::{DecisionValue, SolverResult};
use crate::voting::{VotingMethod, agreement_ratio, max_attainable, tally_lists, tally_single};

/// Solves consensus for social meetings
#[derive(Debug, Clone)]
pub struct MeetingSolver {
    voting: VotingMethod,
}

impl MeetingSolver {
    pub fn new(voting: VotingMethod) -> Self {
        Self { voting }
    }

    fn dates(p: &Participant) -> Vec<String> {
        p.nested_list("disponibilidad", "fechas")
    }

    fn hours(p: &Participant) -> Vec<String> {
        p.nested_list("disponibilidad", "horas")
    }
}

impl Solver for MeetingSolver {
    /// Complexity from availability overlap and group diversity
    fn evaluate_complexity(&self, participants: &[Participant]) -> ComplexityScore {
        if participants.len() < 2 {
            return ComplexityScore::new(0.0, vec![TOO_FEW_PARTICIPANTS.to_string()]);
        }

        let mut builder = ComplexityBuilder::new();

        let common_dates = common_items(participants, Self::dates);
        if common_dates.is_empty() {
            builder.add(0.35, "Sin fechas en comun");
        } else if common_dates.len() == 1 {
            builder.add(0.10, "Solo 1 fecha en comun");
        }

        let common_hours = common_items(participants, Self::hours);
        if common_hours.is_empty() {
            builder.add(0.25, "Sin horas en comun");
        } else if common_hours.len() == 1 {
            builder.add(0.10, "Solo 1 hora en comun");
        }

        let zones: std::collections::HashSet<&str> = participants
            .iter()
            .map(|p| p.text("zona").unwrap_or(""))
            .collect();
        if zones.len() > 4 {
            builder.add(0.15, format!("{} zonas distintas", zones.len()));
        } else if zones.len() > 2 {
            builder.add_silent(0.05);
        }

        let restrictions = union_sorted(participants, |p| p.list("restricciones_alimentarias"));
        if restrictions.len() > 3 {
            builder.add(0.15, format!("{} restricciones alimentarias", restrictions.len()));
        } else if restrictions.len() > 1 {
            builder.add_silent(0.05);
        }

        if participants.len() > 15 {
            builder.add(0.10, format!("{} participantes (grupo grande)", participants.len()));
        }

        builder.finish("Problema simple con buen overlap")
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
            VotingMethod::Plurality => explanation.push(format!(
                "{}/{} participantes disponibles en {}",
                date_score, total, best_date
            )),
        }

        let hour_tally = tally_lists(self.voting, participants, Self::hours);
        let Some((best_hour, hour_score)) = hour_tally.winner() else {
            return SolverResult::failure("No hay horas disponibles");
        };
        let best_hour = best_hour.to_string();
        match self.voting {
            VotingMethod::Borda => {
                explanation.push(format!("Hora: {} ({} pts Borda)", best_hour, hour_score));
            }
            VotingMethod::Plurality => explanation.push(format!(
                "{}/{} participantes disponibles en {}",
                hour_score, total, best_hour
            )),
        }

        // Zone is single-choice, so it is a plain mode regardless of method
        let zone_tally = tally_single(participants, |p| p.text("zona").map(str::to_string));
        let (best_zone, zone_count) = zone_tally
            .winner()
            .map(|(z, c)| (z.to_string(), c))
            .unwrap_or_else(|| ("Sin zona definida".to_string(), 0));
        explanation.push(format!("Zona mas conveniente: {} ({} personas)", best_zone, zone_count));

        // Restrictions are accommodated, never voted on
        let restrictions = union_sorted(participants, |p| p.list("restricciones_alimentarias"));
        if !restrictions.is_empty() {
            explanation.push(format!("Menu debe considerar: {}", restrictions.join(", ")));
        }

        let venue_tally = tally_lists(self.voting, participants, |p| p.list("preferencias_lugar"));
        let best_venue = match venue_tally.winner() {
            Some((venue, score)) => {
                match self.voting {
                    VotingMethod::Borda => {
                        explanation.push(format!("Tipo de lugar: {} ({} pts Borda)", venue, score));
                    }
                    VotingMethod::Plurality => {
                        explanation.push(format!("Tipo mas votado: {}", venue));
                    }
                }
                venue.to_string()
            }
            None => "restaurante".to_string(),
        };

        let date_ratio = agreement_ratio(
            self.voting,
            date_score,
            total,
            max_attainable(participants, Self::dates),
        );
        let hour_ratio = agreement_ratio(
            self.voting,
            hour_score,
            total,
            max_attainable(participants, Self::hours),
        );
        let zone_ratio = zone_count as f64 / total as f64;
        let confidence = (date_ratio + hour_ratio + zone_ratio) / 3.0;

        let decision = vec![
            ("Fecha".to_string(), DecisionValue::text(best_date)),
            ("Hora".to_string(), DecisionValue::text(best_hour)),
            ("Zona".to_string(), DecisionValue::text(best_zone)),
            (
                "Restricciones alimentarias".to_string(),
                DecisionValue::list(restrictions),
            ),
            ("Tipo de lugar".to_string(), DecisionValue::text(best_venue)),
        ];

        SolverResult::success(decision, confidence, explanation)
    }
}
