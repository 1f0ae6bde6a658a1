//! Escalation prompt assembly
//!
//! Deterministic string building: one system template per domain plus a
//! decide/propose task block. The participant data travels verbatim as
//! pretty-printed JSON; prior-round votes become an extra context block.

use consenso_application::ports::reasoning_gateway::{EscalationRequest, TaskKind};
use consenso_application::ports::round_store::RoundVotes;
use consenso_domain::Domain;

const MEETING_PROMPT: &str = "\
Eres un asistente que ayuda a coordinar reuniones sociales en Ciudad de Guatemala.

Tienes los datos de {count} participantes. Cada participante tiene:
- Disponibilidad de fechas y horas
- Zona donde vive/trabaja
- Restricciones alimentarias
- Preferencias de tipo de lugar

DATOS DE PARTICIPANTES:
{data}

{extra_context}

TAREA:
{task}

FORMATO DE RESPUESTA:
Responde en espanol con formato estructurado.";

const TRIP_PROMPT: &str = "\
Eres un asistente que ayuda a planificar viajes grupales en Guatemala.

Tienes los datos de {count} participantes. Cada participante tiene:
- Fechas disponibles
- Duracion preferida
- Presupuesto maximo
- Destinos de interes
- Actividades preferidas
- Restricciones

DATOS DE PARTICIPANTES:
{data}

{extra_context}

TAREA:
{task}

FORMATO DE RESPUESTA:
Responde en espanol con formato estructurado.";

const PROJECT_PROMPT: &str = "\
Eres un asistente que ayuda a asignar tareas en proyectos de software.

Tienes los datos de {count} participantes. Cada participante tiene:
- Habilidades
- Disponibilidad en horas
- Tareas de interes
- Tareas a evitar

DATOS DE PARTICIPANTES:
{data}

{extra_context}

TAREA:
{task}

FORMATO DE RESPUESTA:
Responde en espanol con formato estructurado.";

const PURCHASE_PROMPT: &str = "\
Eres un asistente que ayuda a organizar compras grupales.

Tienes los datos de {count} participantes. Cada participante tiene:
- Presupuesto maximo
- Productos de interes
- Marcas preferidas
- Prioridad (precio, calidad, etc.)

DATOS DE PARTICIPANTES:
{data}

{extra_context}

TAREA:
{task}

FORMATO DE RESPUESTA:
Responde en espanol con formato estructurado.";

fn system_template(domain: Domain) -> &'static str {
    match domain {
        Domain::Meeting => MEETING_PROMPT,
        Domain::Trip => TRIP_PROMPT,
        Domain::Project => PROJECT_PROMPT,
        Domain::Purchase => PURCHASE_PROMPT,
    }
}

fn decide_task(domain: Domain) -> &'static str {
    match domain {
        Domain::Meeting => {
            "Analiza y decide:
1. Fecha que maximiza asistencia
2. Rango de hora optimo
3. Zona mas conveniente
4. Tipo de lugar
5. Consideraciones alimentarias

Incluye DECISION, JUSTIFICACION y NOTAS."
        }
        Domain::Trip => {
            "Analiza y decide:
1. Destino optimo
2. Fechas del viaje
3. Duracion
4. Presupuesto grupal
5. Actividades principales

Incluye DECISION, JUSTIFICACION y NOTAS."
        }
        Domain::Project => {
            "Analiza y asigna tareas:
1. Lista de tareas identificadas
2. Asignacion de cada tarea a un participante
3. Horas estimadas por persona
4. Dependencias entre tareas

Incluye ASIGNACION, JUSTIFICACION y NOTAS."
        }
        Domain::Purchase => {
            "Analiza y decide:
1. Productos prioritarios a comprar
2. Marcas/modelos recomendados
3. Presupuesto total
4. Distribucion de costos

Incluye DECISION, JUSTIFICACION y NOTAS."
        }
    }
}

fn propose_task(domain: Domain, options: u32) -> String {
    let template = match domain {
        Domain::Meeting => {
            "Propone {num_options} opciones diferentes para la reunion.
Para cada opcion incluye: fecha, hora, zona, tipo de lugar.
Explica pros y contras de cada opcion.
Formatea como OPCION 1, OPCION 2, etc."
        }
        Domain::Trip => {
            "Propone {num_options} opciones diferentes de viaje.
Para cada opcion incluye: destino, fechas, duracion, presupuesto estimado, actividades.
Explica pros y contras de cada opcion.
Formatea como OPCION 1, OPCION 2, etc."
        }
        Domain::Project => {
            "Propone {num_options} formas diferentes de organizar el proyecto.
Para cada opcion incluye: distribucion de tareas, timeline sugerido.
Explica pros y contras de cada organizacion.
Formatea como OPCION 1, OPCION 2, etc."
        }
        Domain::Purchase => {
            "Propone {num_options} opciones diferentes de compra.
Para cada opcion incluye: productos, marcas, costo total, distribucion.
Explica pros y contras de cada opcion.
Formatea como OPCION 1, OPCION 2, etc."
        }
    };
    template.replace("{num_options}", &options.to_string())
}

fn votes_context(votes: &RoundVotes) -> String {
    let json = serde_json::to_string_pretty(votes).unwrap_or_default();
    format!(
        "VOTOS DE LA RONDA ANTERIOR:\n{}\n\nConsidera estos votos para refinar tu decision.",
        json
    )
}

/// Assemble the full prompt for an escalation request.
pub fn build_prompt(request: &EscalationRequest) -> String {
    let data = serde_json::to_string_pretty(&request.participants).unwrap_or_default();
    let extra_context = request
        .prior_votes
        .as_ref()
        .map(votes_context)
        .unwrap_or_default();
    let task = match request.task {
        TaskKind::Decide => decide_task(request.domain).to_string(),
        TaskKind::Propose { options } => propose_task(request.domain, options),
    };

    system_template(request.domain)
        .replace("{count}", &request.participants.len().to_string())
        .replace("{data}", &data)
        .replace("{extra_context}", &extra_context)
        .replace("{task}", &task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use consenso_domain::Participant;
    use serde_json::json;

    fn travelers() -> Vec<Participant> {
        vec![
            Participant::new("Ana Garcia").with_field("presupuesto_max", json!(500)),
            Participant::new("Carlos Lopez").with_field("presupuesto_max", json!(750)),
        ]
    }

    #[test]
    fn test_decide_prompt_contains_data_and_task() {
        let request = EscalationRequest::decide(Domain::Trip, travelers());
        let prompt = build_prompt(&request);

        assert!(prompt.contains("datos de 2 participantes"));
        assert!(prompt.contains("Ana Garcia"));
        assert!(prompt.contains("1. Destino optimo"));
        assert!(prompt.contains("Incluye DECISION, JUSTIFICACION y NOTAS."));
        assert!(!prompt.contains("{count}"));
        assert!(!prompt.contains("{data}"));
        assert!(!prompt.contains("{task}"));
    }

    #[test]
    fn test_propose_prompt_injects_option_count() {
        let request = EscalationRequest::propose(Domain::Meeting, travelers(), 3);
        let prompt = build_prompt(&request);

        assert!(prompt.contains("Propone 3 opciones diferentes para la reunion."));
        assert!(prompt.contains("Formatea como OPCION 1, OPCION 2, etc."));
    }

    #[test]
    fn test_prior_votes_become_extra_context() {
        let mut votes = RoundVotes::new(1);
        votes.record("Ana Garcia", "2");
        let request =
            EscalationRequest::decide(Domain::Purchase, travelers()).with_prior_votes(Some(votes));
        let prompt = build_prompt(&request);

        assert!(prompt.contains("VOTOS DE LA RONDA ANTERIOR:"));
        assert!(prompt.contains("Considera estos votos para refinar tu decision."));
    }

    #[test]
    fn test_no_votes_leaves_no_context_block() {
        let request = EscalationRequest::decide(Domain::Project, travelers());
        let prompt = build_prompt(&request);
        assert!(!prompt.contains("VOTOS DE LA RONDA ANTERIOR"));
    }
}
