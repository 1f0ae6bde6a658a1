//! Task-to-participant matching
//!
//! Two interchangeable strategies assign tasks from a fixed catalog to
//! participants, honoring interest lists, avoid lists, skills and hour
//! budgets:
//!
//! - [`greedy`]: rank tasks by interest, pick the best-scoring eligible
//!   participant per task.
//! - [`stable`]: deferred acceptance (Gale-Shapley) where participants
//!   propose to tasks in preference order. Hour budgets make this an
//!   engineering approximation of classical one-to-one stable matching,
//!   not a textbook guarantee: a participant can lose a task and later
//!   acquire a different one as budget frees up.
//!
//! Every assignment consumes a fixed 5-hour unit of the assignee's budget.

pub mod greedy;
pub mod stable;

use crate::core::DomainError;
use crate::participant::Participant;
use crate::voting::{Tally, VotingMethod, tally_lists};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Hours consumed from a participant's budget per assigned task
pub const HOURS_PER_TASK: u32 = 5;

/// Catalog of project tasks eligible for assignment
pub const TASK_CATALOG: [&str; 10] = [
    "desarrollo de API",
    "interfaz de usuario",
    "base de datos",
    "deployment",
    "testing automatizado",
    "documentacion tecnica",
    "integracion de servicios",
    "optimizacion de rendimiento",
    "seguridad",
    "code review",
];

/// Skill -> catalog tasks that skill covers
const SKILL_TASKS: &[(&str, &[&str])] = &[
    ("frontend", &["interfaz de usuario"]),
    ("backend", &["desarrollo de API", "integracion de servicios"]),
    ("base de datos", &["base de datos"]),
    ("devops", &["deployment"]),
    ("testing", &["testing automatizado"]),
    ("documentacion", &["documentacion tecnica"]),
    ("diseno UI/UX", &["interfaz de usuario"]),
    ("seguridad", &["seguridad"]),
    ("gestion de proyecto", &["code review"]),
];

/// Whether any of the given skills covers the task via the compatibility table
pub fn skill_covers(skills: &HashSet<String>, task: &str) -> bool {
    SKILL_TASKS
        .iter()
        .any(|(skill, tasks)| tasks.contains(&task) && skills.contains(*skill))
}

/// Matching strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MatchingMethod {
    /// Interest-ordered tasks, best-scoring eligible participant per task
    #[default]
    Greedy,
    /// Deferred acceptance with hour-budget awareness
    GaleShapley,
}

impl MatchingMethod {
    /// Label used in explanation trails
    pub fn label(&self) -> &'static str {
        match self {
            MatchingMethod::Greedy => "Greedy",
            MatchingMethod::GaleShapley => "Gale-Shapley",
        }
    }
}

impl fmt::Display for MatchingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchingMethod::Greedy => write!(f, "greedy"),
            MatchingMethod::GaleShapley => write!(f, "gale-shapley"),
        }
    }
}

impl FromStr for MatchingMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greedy" => Ok(MatchingMethod::Greedy),
            "gale-shapley" | "gale_shapley" => Ok(MatchingMethod::GaleShapley),
            other => Err(DomainError::unknown_method("matching", other)),
        }
    }
}

/// Outcome of a matching run.
///
/// `assignments` keeps task order (candidate order for both strategies);
/// `confidence` is `assigned / candidate_task_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matching {
    /// (task, participant) pairs in candidate-task order
    pub assignments: Vec<(String, String)>,
    /// assigned / candidate count
    pub confidence: f64,
}

impl Matching {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Tasks assigned to one participant, in assignment order
    pub fn tasks_for(&self, name: &str) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|(_, assignee)| assignee == name)
            .map(|(task, _)| task.as_str())
            .collect()
    }

    /// Hours per participant, sorted by name
    pub fn hours_by_person(&self) -> Vec<(String, u32)> {
        let mut hours: Vec<(String, u32)> = Vec::new();
        for (_, assignee) in &self.assignments {
            match hours.iter_mut().find(|(name, _)| name == assignee) {
                Some((_, h)) => *h += HOURS_PER_TASK,
                None => hours.push((assignee.clone(), HOURS_PER_TASK)),
            }
        }
        hours.sort_by(|a, b| a.0.cmp(&b.0));
        hours
    }

    /// Total assigned hours across the group
    pub fn total_hours(&self) -> u32 {
        self.assignments.len() as u32 * HOURS_PER_TASK
    }
}

/// Run the configured matching strategy.
pub fn run(method: MatchingMethod, participants: &[Participant]) -> Matching {
    match method {
        MatchingMethod::Greedy => greedy::run(participants),
        MatchingMethod::GaleShapley => stable::run(participants),
    }
}

/// Per-participant view used by both strategies
#[derive(Debug, Clone)]
pub(crate) struct MatchCandidate {
    pub name: String,
    pub available_hours: u32,
    pub interests: Vec<String>,
    pub avoid: HashSet<String>,
    pub skills: HashSet<String>,
}

impl MatchCandidate {
    pub fn from_participant(participant: &Participant) -> Self {
        Self {
            name: participant.name.clone(),
            available_hours: participant
                .number("disponibilidad_horas")
                .map(|h| h.max(0.0) as u32)
                .unwrap_or(0),
            interests: participant.list("tareas_interes"),
            avoid: participant.list("tareas_evitar").into_iter().collect(),
            skills: participant.list("habilidades").into_iter().collect(),
        }
    }

    pub fn interested_in(&self, task: &str) -> bool {
        self.interests.iter().any(|t| t == task)
    }

    /// 0-indexed position of the task in the interest list
    pub fn interest_rank(&self, task: &str) -> Option<usize> {
        self.interests.iter().position(|t| t == task)
    }

    pub fn avoids(&self, task: &str) -> bool {
        self.avoid.contains(task)
    }

    pub fn has_skill_for(&self, task: &str) -> bool {
        skill_covers(&self.skills, task)
    }
}

/// Candidate tasks in priority order: tasks ranked by descending interest
/// mention count (ties by first appearance), then unmentioned catalog tasks
/// in catalog order, capped at `participants + 2`.
pub(crate) fn candidate_tasks(participants: &[Participant]) -> Vec<String> {
    let mentions: Tally = tally_lists(VotingMethod::Plurality, participants, |p| {
        p.list("tareas_interes")
    });

    let mut tasks: Vec<String> = mentions
        .ranked()
        .into_iter()
        .map(|(task, _)| task.to_string())
        .collect();

    for task in TASK_CATALOG {
        if mentions.score(task) == 0 {
            tasks.push(task.to_string());
        }
    }

    tasks.truncate(participants.len() + 2);
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_table_lookup() {
        let skills: HashSet<String> = ["backend".to_string()].into_iter().collect();
        assert!(skill_covers(&skills, "desarrollo de API"));
        assert!(skill_covers(&skills, "integracion de servicios"));
        assert!(!skill_covers(&skills, "interfaz de usuario"));
    }

    #[test]
    fn test_candidate_tasks_interest_first_then_catalog() {
        let participants = vec![
            Participant::new("Ana").with_list("tareas_interes", &["seguridad", "code review"]),
            Participant::new("Carlos").with_list("tareas_interes", &["seguridad"]),
        ];
        let tasks = candidate_tasks(&participants);

        // 2 participants -> cap 4: two interest tasks, then catalog head
        assert_eq!(
            tasks,
            vec!["seguridad", "code review", "desarrollo de API", "interfaz de usuario"]
        );
    }

    #[test]
    fn test_candidate_tasks_cap() {
        let participants = vec![
            Participant::new("Ana"),
            Participant::new("Carlos"),
            Participant::new("Maria"),
        ];
        assert_eq!(candidate_tasks(&participants).len(), 5);
    }

    #[test]
    fn test_hours_by_person_sorted() {
        let matching = Matching {
            assignments: vec![
                ("seguridad".to_string(), "Carlos".to_string()),
                ("code review".to_string(), "Ana".to_string()),
                ("base de datos".to_string(), "Carlos".to_string()),
            ],
            confidence: 1.0,
        };
        assert_eq!(
            matching.hours_by_person(),
            vec![("Ana".to_string(), 5), ("Carlos".to_string(), 10)]
        );
        assert_eq!(matching.total_hours(), 15);
        assert_eq!(matching.tasks_for("Carlos"), vec!["seguridad", "base de datos"]);
    }

    #[test]
    fn test_parse_matching_method() {
        assert_eq!("greedy".parse::<MatchingMethod>().ok(), Some(MatchingMethod::Greedy));
        assert_eq!(
            "gale-shapley".parse::<MatchingMethod>().ok(),
            Some(MatchingMethod::GaleShapley)
        );
        assert!("hungarian".parse::<MatchingMethod>().is_err());
    }
}
