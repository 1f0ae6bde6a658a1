//! Deferred acceptance (Gale-Shapley variant)
//!
//! Participants propose to tasks in preference order; a held task keeps
//! whichever of (holder, proposer) it ranks higher and frees the other.
//! Hour budgets allow one participant to hold several tasks, and a
//! displaced participant re-enters the proposal queue with its 5-hour unit
//! restored. This budget-awareness is a deliberate departure from textbook
//! one-to-one stable matching; the result is stable *up to hour-budget
//! exhaustion* only.
//!
//! The free-participant work set is an explicit FIFO queue seeded in
//! canonical participant order, so results are reproducible.

use super::{HOURS_PER_TASK, MatchCandidate, Matching, candidate_tasks};
use crate::participant::Participant;
use std::collections::VecDeque;

const INTEREST_BASE: f64 = 10.0;
const SKILL_BONUS: f64 = 5.0;
const TASK_SKILL_WEIGHT: f64 = 10.0;
const TASK_INTEREST_WEIGHT: f64 = 5.0;

pub fn run(participants: &[Participant]) -> Matching {
    let candidates: Vec<MatchCandidate> = participants
        .iter()
        .map(MatchCandidate::from_participant)
        .collect();
    let tasks = candidate_tasks(participants);

    // Each participant's ranked task preferences (avoided tasks excluded).
    // Score: base 10 + remaining interest rank, +5 when a skill covers it.
    let participant_prefs: Vec<Vec<usize>> = candidates
        .iter()
        .map(|candidate| {
            let mut ranked: Vec<(usize, f64)> = tasks
                .iter()
                .enumerate()
                .filter(|(_, task)| !candidate.avoids(task))
                .map(|(index, task)| {
                    let mut score = INTEREST_BASE;
                    if let Some(rank) = candidate.interest_rank(task) {
                        score += (candidate.interests.len() - rank) as f64;
                    }
                    if candidate.has_skill_for(task) {
                        score += SKILL_BONUS;
                    }
                    (index, score)
                })
                .collect();
            // Stable sort: ties keep candidate-task order
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
            ranked.into_iter().map(|(index, _)| index).collect()
        })
        .collect();

    // Each task's ranked participant preferences (avoiders excluded).
    // Score: 10·skill + 5·interest + hours/10.
    let task_prefs: Vec<Vec<usize>> = tasks
        .iter()
        .map(|task| {
            let mut ranked: Vec<(usize, f64)> = candidates
                .iter()
                .enumerate()
                .filter(|(_, candidate)| !candidate.avoids(task))
                .map(|(index, candidate)| {
                    let mut score = candidate.available_hours as f64 / 10.0;
                    if candidate.has_skill_for(task) {
                        score += TASK_SKILL_WEIGHT;
                    }
                    if candidate.interested_in(task) {
                        score += TASK_INTEREST_WEIGHT;
                    }
                    (index, score)
                })
                .collect();
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
            ranked.into_iter().map(|(index, _)| index).collect()
        })
        .collect();

    let mut remaining_hours: Vec<u32> = candidates.iter().map(|c| c.available_hours).collect();
    let mut next_proposal = vec![0usize; candidates.len()];
    let mut holder: Vec<Option<usize>> = vec![None; tasks.len()];

    let mut free: VecDeque<usize> = (0..candidates.len()).collect();

    while let Some(proposer) = free.pop_front() {
        if remaining_hours[proposer] < HOURS_PER_TASK {
            continue;
        }
        let Some(&task) = participant_prefs[proposer].get(next_proposal[proposer]) else {
            continue;
        };
        next_proposal[proposer] += 1;

        match holder[task] {
            None => {
                holder[task] = Some(proposer);
                remaining_hours[proposer] -= HOURS_PER_TASK;
                free.push_back(proposer);
            }
            Some(current) => {
                if task_rank(&task_prefs[task], proposer) < task_rank(&task_prefs[task], current) {
                    // Displace: the loser gets its hour unit back and
                    // re-enters the queue.
                    holder[task] = Some(proposer);
                    remaining_hours[proposer] -= HOURS_PER_TASK;
                    remaining_hours[current] += HOURS_PER_TASK;
                    free.push_back(current);
                    free.push_back(proposer);
                } else {
                    free.push_back(proposer);
                }
            }
        }
    }

    let assignments: Vec<(String, String)> = tasks
        .iter()
        .enumerate()
        .filter_map(|(index, task)| {
            holder[index].map(|p| (task.clone(), candidates[p].name.clone()))
        })
        .collect();

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

/// Position in a task's preference list; unranked participants sort last
fn task_rank(prefs: &[usize], participant: usize) -> usize {
    prefs
        .iter()
        .position(|&p| p == participant)
        .unwrap_or(usize::MAX)
}
