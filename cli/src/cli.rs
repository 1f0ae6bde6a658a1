//! Command-line argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "consenso")]
#[command(about = "Decisiones de consenso grupal: solvers algoritmicos + Gemini")]
#[command(version)]
pub struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generar datos sinteticos de participantes
    Generate(GenerateArgs),
    /// Decidir parametros de consenso para el grupo
    Decide(DecideArgs),
    /// Registrar el voto de un participante sobre una ronda
    Vote(VoteArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Dominio de decision (meeting|trip|project|purchase, o en espanol)
    #[arg(long, default_value = "meeting")]
    pub domain: String,

    /// Numero de participantes a generar
    #[arg(long, default_value_t = 10)]
    pub count: usize,

    /// Semilla para generacion reproducible
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directorio de salida
    #[arg(long, default_value = "data")]
    pub out: PathBuf,
}

#[derive(Args)]
pub struct DecideArgs {
    /// Directorio con archivos JSON de participantes
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Dominio de decision (se detecta del campo `tipo` si se omite)
    #[arg(long)]
    pub domain: Option<String>,

    /// Metodo de votacion (plurality|borda)
    #[arg(long)]
    pub voting: Option<String>,

    /// Metodo de presupuesto (minimum|median)
    #[arg(long)]
    pub budget: Option<String>,

    /// Metodo de matching (greedy|gale-shapley)
    #[arg(long)]
    pub matching: Option<String>,

    /// Umbral de simplicidad (score >= umbral escala)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Aceptar el resultado algoritmico aunque la confianza sea baja
    #[arg(long)]
    pub force_algorithmic: bool,

    /// No llamar a Gemini; reportar la escalada en vez de ejecutarla
    #[arg(long)]
    pub no_llm: bool,

    /// Proponer N opciones (modo iterativo) en vez de decidir
    #[arg(long, short = 'r')]
    pub rounds: Option<u32>,

    /// Continuar desde la ultima ronda incluyendo sus votos
    #[arg(long = "continue", short = 'c')]
    pub continue_round: bool,

    /// Usar el modelo pro en vez del flash
    #[arg(long)]
    pub pro: bool,

    /// Archivo de configuracion explicito
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct VoteArgs {
    /// Numero de ronda a votar
    #[arg(long, short = 'r')]
    pub round: u32,

    /// Nombre del participante
    #[arg(long)]
    pub participant: String,

    /// Opcion elegida (numero de OPCION)
    #[arg(long)]
    pub choice: String,

    /// Comentario adicional
    #[arg(long)]
    pub comment: Option<String>,
}
