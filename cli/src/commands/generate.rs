//! `consenso generate` - synthetic participant data

use crate::cli::GenerateArgs;
use anyhow::Result;
use colored::Colorize;
use consenso_domain::Domain;
use consenso_infrastructure::DataGenerator;

pub fn run(args: &GenerateArgs) -> Result<()> {
    let domain: Domain = args.domain.parse()?;

    let mut generator = match args.seed {
        Some(seed) => DataGenerator::seeded(seed),
        None => DataGenerator::new(),
    };

    println!("{}", "Generando datos de participantes...".cyan());

    let participants = generator.generate(domain, args.count);
    let paths = DataGenerator::write(&args.out, &participants)?;

    for (path, participant) in paths.iter().zip(&participants) {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("  {} {}: {}", "+".green(), file, participant.name);
    }

    println!(
        "\n{}",
        format!(
            "Se generaron {} archivos en {}/",
            participants.len(),
            args.out.display()
        )
        .green()
    );
    Ok(())
}
