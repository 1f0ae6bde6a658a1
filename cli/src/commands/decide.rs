//! `consenso decide` - solve or escalate a group decision

use crate::cli::DecideArgs;
use anyhow::{Result, ensure};
use colored::Colorize;
use consenso_application::ports::reasoning_gateway::{EscalationRequest, ReasoningGateway};
use consenso_application::ports::round_store::{Proposal, RoundStore, RoundVotes};
use consenso_application::{
    DecisionOutcome, RouteOutcome, Router, RunDecisionUseCase,
};
use consenso_domain::{Domain, Participant, SolverConfig, SolverResult};
use consenso_infrastructure::{
    ConfigLoader, FileConfig, FileRoundStore, GeminiGateway, ParticipantLoader,
};
use std::path::{Path, PathBuf};

pub async fn run(args: &DecideArgs) -> Result<()> {
    let file_config =
        ConfigLoader::load(args.config.as_ref()).map_err(|e| anyhow::Error::new(*e))?;
    let solver_config = solver_config(args, &file_config)?;

    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&file_config.data.dir));
    let participants = ParticipantLoader::load(&data_dir)?;

    let domain: Domain = match &args.domain {
        Some(tag) => tag.parse()?,
        None => ParticipantLoader::detect_domain(&participants),
    };

    println!("{} {}", "Tipo:".cyan(), domain.data_tag());
    println!("{} {}", "Participantes:".cyan(), participants.len());
    for participant in &participants {
        println!(
            "  - {} ({})",
            participant.name,
            summary_extra(domain, participant)
        );
    }

    let store = FileRoundStore::new(Path::new("."));

    if let Some(options) = args.rounds {
        return propose(args, &file_config, &store, domain, &participants, options).await;
    }

    let prior_votes = prior_votes(args, &store)?;
    let router =
        Router::new(domain, solver_config).with_force_algorithmic(args.force_algorithmic);

    if args.no_llm {
        return decide_offline(&router, &participants);
    }

    let gateway = GeminiGateway::from_env(model(args, &file_config))?;
    println!("{} {}", "Modelo:".cyan(), gateway.model());

    let use_case = RunDecisionUseCase::new(router, gateway);
    match use_case.execute(&participants, prior_votes).await? {
        DecisionOutcome::Algorithmic {
            result,
            low_confidence,
            ..
        } => print_algorithmic(&result, low_confidence),
        DecisionOutcome::Reasoned { text, reason, .. } => {
            println!("\n{} {}", "Escalado a Gemini:".yellow(), reason);
            println!("\n{}", text);
        }
    }
    Ok(())
}

/// Iterative mode: ask Gemini for N options and persist them as a round.
async fn propose(
    args: &DecideArgs,
    file_config: &FileConfig,
    store: &FileRoundStore,
    domain: Domain,
    participants: &[Participant],
    options: u32,
) -> Result<()> {
    ensure!(
        !args.no_llm,
        "--rounds requiere acceso a Gemini, es incompatible con --no-llm"
    );

    let gateway = GeminiGateway::from_env(model(args, file_config))?;
    println!("{} {}", "Modelo:".cyan(), gateway.model());

    let round = store.current_round()?;
    let prior = prior_votes(args, store)?;
    if prior.is_some() {
        println!(
            "{}",
            format!("Continuando desde ronda {} con votos", round - 1).cyan()
        );
    }
    println!(
        "{}",
        format!("Ronda {}: proponiendo {} opciones", round, options).cyan()
    );

    let request = EscalationRequest::propose(domain, participants.to_vec(), options)
        .with_prior_votes(prior);
    let text = gateway.reason(&request).await?;
    println!("\n{}", text);

    store.save_proposal(&Proposal {
        round,
        domain,
        content: text,
    })?;
    println!(
        "\n{}",
        format!("Propuesta guardada en proposals/round_{}.json", round).dimmed()
    );
    println!(
        "{}",
        format!(
            "Para votar: consenso vote --round {} --participant NOMBRE --choice N",
            round
        )
        .dimmed()
    );
    Ok(())
}

/// Route without a gateway: report the escalation instead of executing it.
fn decide_offline(router: &Router, participants: &[Participant]) -> Result<()> {
    match router.route(participants) {
        RouteOutcome::Algorithmic {
            result,
            low_confidence,
            ..
        } => print_algorithmic(&result, low_confidence),
        RouteOutcome::Escalate {
            reason,
            complexity,
            attempt,
        } => {
            println!(
                "\n{} {} (score {:.2})",
                "Se requiere razonamiento externo:".yellow(),
                reason,
                complexity.score
            );
            for factor in &complexity.factors {
                println!("  - {}", factor);
            }
            if let Some(attempt) = attempt.filter(|a| a.success) {
                println!("\n{}", "Resultado algoritmico descartado:".dimmed());
                println!("{}", attempt.render().dimmed());
            }
        }
    }
    Ok(())
}

fn print_algorithmic(result: &SolverResult, low_confidence: bool) {
    println!("\n{}", result.render());
    if low_confidence {
        println!(
            "{}",
            "ADVERTENCIA: confianza por debajo del minimo (70%)".yellow()
        );
    }
}

fn solver_config(args: &DecideArgs, file_config: &FileConfig) -> Result<SolverConfig> {
    let mut config = file_config.solver;
    if let Some(voting) = &args.voting {
        config.voting = voting.parse()?;
    }
    if let Some(budget) = &args.budget {
        config.budget = budget.parse()?;
    }
    if let Some(matching) = &args.matching {
        config.matching = matching.parse()?;
    }
    if let Some(threshold) = args.threshold {
        config.simplicity_threshold = threshold;
    }
    Ok(config)
}

fn model(args: &DecideArgs, file_config: &FileConfig) -> String {
    if args.pro {
        file_config.gemini.pro_model.clone()
    } else {
        file_config.gemini.model.clone()
    }
}

fn prior_votes(args: &DecideArgs, store: &FileRoundStore) -> Result<Option<RoundVotes>> {
    if !args.continue_round {
        return Ok(None);
    }
    let current = store.current_round()?;
    if current <= 1 {
        return Ok(None);
    }
    Ok(store.load_votes(current - 1)?)
}

fn summary_extra(domain: Domain, participant: &Participant) -> String {
    match domain {
        Domain::Meeting => participant.text("zona").unwrap_or("").to_string(),
        Domain::Trip | Domain::Purchase => {
            format!("Q{}", participant.number("presupuesto_max").unwrap_or(0.0) as i64)
        }
        Domain::Project => {
            format!("{}h", participant.number("disponibilidad_horas").unwrap_or(0.0) as i64)
        }
    }
}
