//! `consenso vote` - record one participant's vote for a round

use crate::cli::VoteArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use consenso_application::ports::round_store::{RoundStore, RoundVotes};
use consenso_infrastructure::FileRoundStore;
use std::collections::BTreeMap;
use std::path::Path;

pub fn run(args: &VoteArgs) -> Result<()> {
    let store = FileRoundStore::new(Path::new("."));

    let proposal = store
        .load_proposal(args.round)
        .with_context(|| format!("Primero ejecuta: consenso decide --rounds N (ronda {})", args.round))?;

    println!("\n{}", format!("Propuestas de Ronda {}", args.round).cyan());
    println!("{}", format!("Tipo: {}", proposal.domain.data_tag()).dimmed());

    let mut votes = store
        .load_votes(args.round)?
        .unwrap_or_else(|| RoundVotes::new(args.round));
    votes.record(&args.participant, &args.choice);
    if let Some(comment) = &args.comment {
        votes.comments.push(comment.clone());
    }
    store.save_votes(&votes)?;

    println!("\n{}", "Resumen de votos:".cyan());
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for vote in &votes.votes {
        *counts.entry(vote.choice.as_str()).or_default() += 1;
    }
    for (choice, count) in counts {
        println!("  Opcion {}: {} voto(s)", choice, count);
    }

    println!(
        "\n{}",
        format!("Votos guardados en votes/round_{}.json", args.round).green()
    );
    println!("{}", "Para continuar: consenso decide --continue".dimmed());
    Ok(())
}
