//! Greedy assignment
//!
//! Walks the candidate tasks in priority order and gives each one to the
//! best-scoring eligible participant. Scoring per participant:
//! `3·interest + 2·skill − 0.5·(tasks already assigned)`. Ties break by
//! canonical participant order; tasks nobody is eligible for are dropped.

use super::{HOURS_PER_TASK, MatchCandidate, Matching, candidate_tasks};
use crate::participant::Participant;

const INTEREST_WEIGHT: f64 = 3.0;
const SKILL_WEIGHT: f64 = 2.0;
const LOAD_PENALTY: f64 = 0.5;

pub fn run(participants: &[Participant]) -> Matching {
    let candidates: Vec<MatchCandidate> = participants
        .iter()
        .map(MatchCandidate::from_participant)
        .collect();
    let tasks = candidate_tasks(participants);

    let mut assigned_hours = vec![0u32; candidates.len()];
    let mut assigned_count = vec![0u32; candidates.len()];
    let mut assignments: Vec<(String, String)> = Vec::new();

    for task in &tasks {
        let mut best: Option<usize> = None;
        let mut best_score = -1.0;

        for (index, candidate) in candidates.iter().enumerate() {
            if assigned_hours[index] >= candidate.available_hours {
                continue;
            }
            if candidate.avoids(task) {
                continue;
            }

            let mut score = 0.0;
            if candidate.interested_in(task) {
                score += INTEREST_WEIGHT;
            }
            if candidate.has_skill_for(task) {
                score += SKILL_WEIGHT;
            }
            score -= LOAD_PENALTY * assigned_count[index] as f64;

            // Strict comparison keeps the earliest participant on ties
            if score > best_score {
                best_score = score;
                best = Some(index);
            }
        }

        if let Some(index) = best {
            assigned_hours[index] += HOURS_PER_TASK;
            assigned_count[index] += 1;
            assignments.push((task.clone(), candidates[index].name.clone()));
        }
    }

    let confidence = if tasks.is_empty() {
        0.0
    } else {
        assignments.len() as f64 / tasks.len() as f64
    };

    Matching {
        assignments,
        confidence,
    }
}
