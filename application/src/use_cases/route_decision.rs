//! Decision routing
//!
//! The router decides, per problem instance, whether the local algorithmic
//! solve is good enough or the full context must be escalated to the
//! external reasoning service. The gate is two-stage: a pre-solve
//! complexity check, then a post-solve confidence check against a fixed
//! floor. The algorithmic result is never emitted as the final answer once
//! either gate trips, except in force-algorithmic mode where escalation is
//! disabled and the result is flagged instead.

use crate::ports::reasoning_gateway::{EscalationRequest, GatewayError, ReasoningGateway};
use crate::ports::round_store::{RoundVotes, StoreError};
use consenso_domain::{ComplexityScore, Domain, Participant, SolverConfig, SolverResult, solver_for};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced while running a routed decision
#[derive(Error, Debug)]
pub enum RouteError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Minimum confidence for an algorithmic result to stand as the answer
pub const MIN_CONFIDENCE: f64 = 0.7;

/// Why a problem was escalated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationReason {
    /// Complexity score reached the simplicity threshold
    ComplexProblem,
    /// The solver could not produce a decision at all
    SolverFailed,
    /// The solver decided, but below the confidence floor
    LowConfidence,
}

impl EscalationReason {
    pub fn label(&self) -> &'static str {
        match self {
            EscalationReason::ComplexProblem => "Problema complejo",
            EscalationReason::SolverFailed => "El solver no encontro solucion",
            EscalationReason::LowConfidence => "Confianza insuficiente",
        }
    }
}

impl fmt::Display for EscalationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Routing verdict for one problem instance
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// The algorithmic result stands as the final answer
    Algorithmic {
        result: SolverResult,
        complexity: ComplexityScore,
        /// Set only in force-algorithmic mode, when escalation would have
        /// happened
        low_confidence: bool,
    },
    /// The full context must go to the reasoning service
    Escalate {
        reason: EscalationReason,
        complexity: ComplexityScore,
        /// The discarded algorithmic attempt, absent when the complexity
        /// gate tripped before solving
        attempt: Option<SolverResult>,
    },
}

/// Routes one decision problem between the local solver and escalation.
///
/// # Example
///
/// ```
/// use consenso_application::{RouteOutcome, Router};
/// use consenso_domain::{Domain, Participant, SolverConfig};
///
/// let router = Router::new(Domain::Meeting, SolverConfig::default());
/// let outcome = router.route(&[Participant::new("Ana")]);
/// assert!(matches!(outcome, RouteOutcome::Escalate { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct Router {
    domain: Domain,
    config: SolverConfig,
    force_algorithmic: bool,
}

impl Router {
    pub fn new(domain: Domain, config: SolverConfig) -> Self {
        Self {
            domain,
            config,
            force_algorithmic: false,
        }
    }

    /// Disable escalation; low-confidence results are flagged, not replaced
    pub fn with_force_algorithmic(mut self, force: bool) -> Self {
        self.force_algorithmic = force;
        self
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Evaluate complexity, solve if warranted, and gate the result.
    pub fn route(&self, participants: &[Participant]) -> RouteOutcome {
        let solver = solver_for(self.domain, &self.config);

        let complexity = solver.evaluate_complexity(participants);
        debug!(
            domain = %self.domain,
            score = complexity.score,
            factors = ?complexity.factors,
            "complejidad evaluada"
        );

        if !complexity.is_simple(self.config.simplicity_threshold) && !self.force_algorithmic {
            info!(
                domain = %self.domain,
                score = complexity.score,
                "problema complejo, escalando sin resolver"
            );
            return RouteOutcome::Escalate {
                reason: EscalationReason::ComplexProblem,
                complexity,
                attempt: None,
            };
        }

        let result = solver.solve(participants);
        let acceptable = result.success && result.confidence >= MIN_CONFIDENCE;

        if acceptable || self.force_algorithmic {
            if !acceptable {
                info!(
                    domain = %self.domain,
                    confidence = result.confidence,
                    "resultado de baja confianza retenido (modo forzado)"
                );
            }
            return RouteOutcome::Algorithmic {
                result,
                complexity,
                low_confidence: !acceptable,
            };
        }

        let reason = if result.success {
            EscalationReason::LowConfidence
        } else {
            EscalationReason::SolverFailed
        };
        info!(
            domain = %self.domain,
            confidence = result.confidence,
            reason = %reason,
            "resultado algoritmico descartado, escalando"
        );
        RouteOutcome::Escalate {
            reason,
            complexity,
            attempt: Some(result),
        }
    }
}

/// Final answer for one decision run
#[derive(Debug, Clone)]
pub enum DecisionOutcome {
    /// Local solve, rendered with the fixed report format
    Algorithmic {
        result: SolverResult,
        complexity: ComplexityScore,
        low_confidence: bool,
    },
    /// Answer produced by the reasoning service after escalation
    Reasoned {
        text: String,
        reason: EscalationReason,
        complexity: ComplexityScore,
    },
}

/// Runs one decision end to end: route, then escalate through the gateway
/// when the router says so.
pub struct RunDecisionUseCase<G> {
    router: Router,
    gateway: G,
}

impl<G: ReasoningGateway> RunDecisionUseCase<G> {
    pub fn new(router: Router, gateway: G) -> Self {
        Self { router, gateway }
    }

    /// Decide for the group. `prior_votes` carries earlier-round votes in
    /// iterative mode; they travel with the escalation untouched.
    pub async fn execute(
        &self,
        participants: &[Participant],
        prior_votes: Option<RoundVotes>,
    ) -> Result<DecisionOutcome, RouteError> {
        match self.router.route(participants) {
            RouteOutcome::Algorithmic {
                result,
                complexity,
                low_confidence,
            } => Ok(DecisionOutcome::Algorithmic {
                result,
                complexity,
                low_confidence,
            }),
            RouteOutcome::Escalate {
                reason, complexity, ..
            } => {
                let request =
                    EscalationRequest::decide(self.router.domain(), participants.to_vec())
                        .with_prior_votes(prior_votes);
                let text = self.gateway.reason(&request).await?;
                Ok(DecisionOutcome::Reasoned {
                    text,
                    reason,
                    complexity,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::reasoning_gateway::TaskKind;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeGateway {
        requests: Mutex<Vec<EscalationRequest>>,
    }

    impl FakeGateway {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReasoningGateway for FakeGateway {
        async fn reason(&self, request: &EscalationRequest) -> Result<String, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok("DECISION\n- Fecha: 2026-01-16".to_string())
        }
    }

    fn aligned_meeting() -> Vec<Participant> {
        vec![
            Participant::new("Ana")
                .with_field(
                    "disponibilidad",
                    json!({"fechas": ["2026-01-16"], "horas": ["19:00-22:00"]}),
                )
                .with_field("zona", json!("Zona 10")),
            Participant::new("Carlos")
                .with_field(
                    "disponibilidad",
                    json!({"fechas": ["2026-01-16"], "horas": ["19:00-22:00"]}),
                )
                .with_field("zona", json!("Zona 10")),
        ]
    }

    fn disjoint_meeting() -> Vec<Participant> {
        vec![
            Participant::new("Ana")
                .with_field(
                    "disponibilidad",
                    json!({"fechas": ["2026-01-15"], "horas": ["12:00-14:00"]}),
                )
                .with_field("zona", json!("Zona 10")),
            Participant::new("Carlos")
                .with_field(
                    "disponibilidad",
                    json!({"fechas": ["2026-01-16"], "horas": ["19:00-22:00"]}),
                )
                .with_field("zona", json!("Zona 1")),
        ]
    }

    // product winner 1/2, priority winner 1/2: confidence 0.5, well below
    // the 0.7 floor, while complexity stays under the 0.6 threshold
    fn split_purchase() -> Vec<Participant> {
        vec![
            Participant::new("Ana")
                .with_field("presupuesto_max", json!(500))
                .with_list("productos_interes", &["monitor"])
                .with_field("prioridad", json!("precio")),
            Participant::new("Carlos")
                .with_field("presupuesto_max", json!(500))
                .with_list("productos_interes", &["webcam"])
                .with_field("prioridad", json!("calidad")),
        ]
    }

    #[test]
    fn test_simple_confident_problem_stays_algorithmic() {
        let router = Router::new(Domain::Meeting, SolverConfig::default());
        match router.route(&aligned_meeting()) {
            RouteOutcome::Algorithmic {
                result,
                low_confidence,
                ..
            } => {
                assert!(result.success);
                assert!(result.confidence >= MIN_CONFIDENCE);
                assert!(!low_confidence);
            }
            other => panic!("expected algorithmic, got {:?}", other),
        }
    }

    #[test]
    fn test_complex_problem_escalates_without_solving() {
        let router = Router::new(Domain::Meeting, SolverConfig::default());
        match router.route(&disjoint_meeting()) {
            RouteOutcome::Escalate {
                reason,
                complexity,
                attempt,
            } => {
                assert_eq!(reason, EscalationReason::ComplexProblem);
                assert!(!complexity.is_simple(0.6));
                assert!(attempt.is_none());
            }
            other => panic!("expected escalation, got {:?}", other),
        }
    }

    #[test]
    fn test_low_confidence_result_is_never_the_answer() {
        let router = Router::new(Domain::Purchase, SolverConfig::default());
        match router.route(&split_purchase()) {
            RouteOutcome::Escalate {
                reason, attempt, ..
            } => {
                assert_eq!(reason, EscalationReason::LowConfidence);
                let attempt = attempt.expect("solve was attempted");
                assert!(attempt.success);
                assert!((attempt.confidence - 0.5).abs() < 1e-9);
            }
            other => panic!("expected escalation, got {:?}", other),
        }
    }

    #[test]
    fn test_solver_failure_escalates() {
        let router = Router::new(Domain::Meeting, SolverConfig::default());
        let one = vec![Participant::new("Ana")];
        match router.route(&one) {
            RouteOutcome::Escalate {
                reason, attempt, ..
            } => {
                assert_eq!(reason, EscalationReason::SolverFailed);
                assert!(!attempt.unwrap().success);
            }
            other => panic!("expected escalation, got {:?}", other),
        }
    }

    #[test]
    fn test_force_algorithmic_flags_instead_of_escalating() {
        let router =
            Router::new(Domain::Purchase, SolverConfig::default()).with_force_algorithmic(true);
        match router.route(&split_purchase()) {
            RouteOutcome::Algorithmic {
                result,
                low_confidence,
                ..
            } => {
                assert!(result.success);
                assert!(low_confidence);
            }
            other => panic!("expected algorithmic, got {:?}", other),
        }
    }

    #[test]
    fn test_force_algorithmic_still_gates_nothing_on_complexity() {
        let router =
            Router::new(Domain::Meeting, SolverConfig::default()).with_force_algorithmic(true);
        match router.route(&disjoint_meeting()) {
            RouteOutcome::Algorithmic { result, .. } => assert!(result.success),
            other => panic!("expected algorithmic, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_use_case_calls_gateway_on_escalation() {
        let gateway = FakeGateway::new();
        let router = Router::new(Domain::Purchase, SolverConfig::default());
        let use_case = RunDecisionUseCase::new(router, gateway);

        let outcome = use_case.execute(&split_purchase(), None).await.unwrap();
        match outcome {
            DecisionOutcome::Reasoned { text, reason, .. } => {
                assert_eq!(reason, EscalationReason::LowConfidence);
                assert!(text.starts_with("DECISION"));
            }
            other => panic!("expected reasoned outcome, got {:?}", other),
        }

        let requests = use_case.gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].domain, Domain::Purchase);
        assert_eq!(requests[0].task, TaskKind::Decide);
        assert_eq!(requests[0].participants.len(), 2);
    }

    #[tokio::test]
    async fn test_use_case_skips_gateway_when_confident() {
        let gateway = FakeGateway::new();
        let router = Router::new(Domain::Meeting, SolverConfig::default());
        let use_case = RunDecisionUseCase::new(router, gateway);

        let outcome = use_case.execute(&aligned_meeting(), None).await.unwrap();
        assert!(matches!(outcome, DecisionOutcome::Algorithmic { .. }));
        assert!(use_case.gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prior_votes_travel_with_escalation() {
        let gateway = FakeGateway::new();
        let router = Router::new(Domain::Purchase, SolverConfig::default());
        let use_case = RunDecisionUseCase::new(router, gateway);

        let mut votes = RoundVotes::new(1);
        votes.record("Ana", "2");
        use_case
            .execute(&split_purchase(), Some(votes))
            .await
            .unwrap();

        let requests = use_case.gateway.requests.lock().unwrap();
        let prior = requests[0].prior_votes.as_ref().unwrap();
        assert_eq!(prior.round, 1);
        assert_eq!(prior.choices(), vec!["2"]);
    }
}
