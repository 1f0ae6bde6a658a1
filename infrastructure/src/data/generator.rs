//! Synthetic participant data generation
//!
//! One catalog per domain; every generated record carries the `tipo` tag the
//! loader uses for domain detection. Seedable for reproducible fixtures.

use consenso_domain::{Domain, Participant};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

const NAMES: [&str; 10] = [
    "Ana Garcia",
    "Carlos Lopez",
    "Maria Rodriguez",
    "Jose Martinez",
    "Sofia Hernandez",
    "Diego Perez",
    "Lucia Gonzalez",
    "Fernando Diaz",
    "Valentina Morales",
    "Andres Castillo",
];

const ZONES: [&str; 6] = [
    "Zona 1 - Centro Historico",
    "Zona 4 - Cuatro Grados Norte",
    "Zona 10 - Zona Viva",
    "Zona 14 - Oakland",
    "Zona 15 - Vista Hermosa",
    "Zona 16 - Cayala",
];

const MEETING_DATES: [&str; 10] = [
    "2026-01-15", "2026-01-16", "2026-01-17", "2026-01-18", "2026-01-19",
    "2026-01-22", "2026-01-23", "2026-01-24", "2026-01-25", "2026-01-26",
];

const MEETING_HOURS: [&str; 5] = [
    "12:00-14:00",
    "13:00-15:00",
    "18:00-21:00",
    "19:00-22:00",
    "20:00-23:00",
];

const DIETARY_RESTRICTIONS: [&[&str]; 10] = [
    &[],
    &[],
    &[],
    &["vegetariano"],
    &["vegano"],
    &["sin gluten"],
    &["sin lactosa"],
    &["kosher"],
    &["sin mariscos"],
    &["vegetariano", "sin gluten"],
];

const VENUE_PREFERENCES: [&[&str]; 7] = [
    &["restaurante"],
    &["cafe"],
    &["bar"],
    &["restaurante", "cafe"],
    &["restaurante", "bar"],
    &["cafe", "bar"],
    &["restaurante", "cafe", "bar"],
];

const DESTINATIONS: [&str; 10] = [
    "Antigua Guatemala",
    "Semuc Champey",
    "Lago de Atitlan",
    "Tikal",
    "Rio Dulce",
    "Monterrico",
    "Chichicastenango",
    "Quetzaltenango",
    "Coban",
    "Flores",
];

const ACTIVITIES: [&str; 10] = [
    "senderismo",
    "cultura",
    "playa",
    "aventura",
    "gastronomia",
    "naturaleza",
    "arqueologia",
    "fotografia",
    "relax",
    "deportes acuaticos",
];

const DURATIONS: [&str; 4] = ["1-2 dias", "3-4 dias", "5-7 dias", "1 semana+"];

const TRIP_RESTRICTIONS: [&[&str]; 7] = [
    &[],
    &["no vuelos"],
    &["vegetariano"],
    &["accesibilidad requerida"],
    &["no caminar mucho"],
    &["no alturas"],
    &["no vuelos", "vegetariano"],
];

const TRIP_DATES: [&str; 10] = [
    "2026-02-01", "2026-02-08", "2026-02-15", "2026-02-22", "2026-03-01",
    "2026-03-08", "2026-03-15", "2026-03-22", "2026-04-01", "2026-04-08",
];

const TRIP_BUDGETS: [u32; 6] = [300, 500, 750, 1000, 1500, 2000];

const SKILLS: [&str; 10] = [
    "frontend",
    "backend",
    "base de datos",
    "devops",
    "diseno UI/UX",
    "testing",
    "documentacion",
    "gestion de proyecto",
    "mobile",
    "machine learning",
];

const TASKS: [&str; 10] = [
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

const AVAILABLE_HOURS: [u32; 7] = [5, 10, 15, 20, 25, 30, 40];

const PRODUCTS: [&str; 10] = [
    "monitor",
    "teclado mecanico",
    "mouse ergonomico",
    "laptop stand",
    "webcam",
    "audifonos",
    "microfono",
    "hub USB",
    "silla ergonomica",
    "escritorio standing",
];

const BRANDS: [&str; 10] = [
    "Logitech", "Apple", "Samsung", "Dell", "HP",
    "Razer", "Corsair", "Sony", "LG", "sin preferencia",
];

const PRIORITIES: [&str; 5] = ["precio", "calidad", "marca", "garantia", "envio rapido"];

const PURCHASE_BUDGETS: [u32; 6] = [50, 100, 150, 200, 300, 500];

/// Generates synthetic participant records from the fixed catalogs
pub struct DataGenerator {
    rng: StdRng,
}

impl DataGenerator {
    /// Unseeded generator (OS entropy)
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded generator for reproducible fixtures
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate `count` participants for a domain. Names cycle through the
    /// catalog when `count` exceeds it.
    pub fn generate(&mut self, domain: Domain, count: usize) -> Vec<Participant> {
        (0..count)
            .map(|i| {
                let name = NAMES[i % NAMES.len()];
                match domain {
                    Domain::Meeting => self.meeting(name),
                    Domain::Trip => self.trip(name),
                    Domain::Project => self.project(name),
                    Domain::Purchase => self.purchase(name),
                }
            })
            .collect()
    }

    /// Write participants as `participante_NN.json` files, returning the
    /// paths written.
    pub fn write(dir: &Path, participants: &[Participant]) -> io::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut paths = Vec::with_capacity(participants.len());
        for (i, participant) in participants.iter().enumerate() {
            let path = dir.join(format!("participante_{:02}.json", i + 1));
            let json = serde_json::to_string_pretty(participant)?;
            std::fs::write(&path, json)?;
            paths.push(path);
        }
        info!(count = participants.len(), dir = %dir.display(), "datos generados");
        Ok(paths)
    }

    fn meeting(&mut self, name: &str) -> Participant {
        let mut dates = self.sample(&MEETING_DATES, 2..=5);
        dates.sort();
        let hours = self.sample(&MEETING_HOURS, 1..=3);

        Participant::new(name)
            .with_field("tipo", json!("reunion"))
            .with_field("disponibilidad", json!({ "fechas": dates, "horas": hours }))
            .with_field("zona", json!(self.pick(&ZONES)))
            .with_field(
                "restricciones_alimentarias",
                str_array(self.pick(&DIETARY_RESTRICTIONS)),
            )
            .with_field(
                "preferencias_lugar",
                str_array(self.pick(&VENUE_PREFERENCES)),
            )
    }

    fn trip(&mut self, name: &str) -> Participant {
        let mut dates = self.sample(&TRIP_DATES, 2..=4);
        dates.sort();

        Participant::new(name)
            .with_field("tipo", json!("viaje"))
            .with_field("fechas_disponibles", json!(dates))
            .with_field("duracion_preferida", json!(self.pick(&DURATIONS)))
            .with_field("presupuesto_max", json!(self.pick(&TRIP_BUDGETS)))
            .with_field("destinos_interes", json!(self.sample(&DESTINATIONS, 2..=4)))
            .with_field("actividades", json!(self.sample(&ACTIVITIES, 2..=4)))
            .with_field("restricciones", str_array(self.pick(&TRIP_RESTRICTIONS)))
    }

    fn project(&mut self, name: &str) -> Participant {
        let interests = self.sample(&TASKS, 2..=4);
        let remaining: Vec<&str> = TASKS
            .iter()
            .copied()
            .filter(|t| !interests.iter().any(|i| i == t))
            .collect();
        let avoid_count = self.rng.random_range(1..=3usize).min(remaining.len());
        let avoided = self.sample(&remaining, avoid_count..=avoid_count);

        Participant::new(name)
            .with_field("tipo", json!("proyecto"))
            .with_field("habilidades", json!(self.sample(&SKILLS, 2..=4)))
            .with_field("disponibilidad_horas", json!(self.pick(&AVAILABLE_HOURS)))
            .with_field("tareas_interes", json!(interests))
            .with_field("tareas_evitar", json!(avoided))
    }

    fn purchase(&mut self, name: &str) -> Participant {
        Participant::new(name)
            .with_field("tipo", json!("compra"))
            .with_field("presupuesto_max", json!(self.pick(&PURCHASE_BUDGETS)))
            .with_field("productos_interes", json!(self.sample(&PRODUCTS, 2..=4)))
            .with_field("marcas_preferidas", json!(self.sample(&BRANDS, 1..=3)))
            .with_field("prioridad", json!(self.pick(&PRIORITIES)))
    }

    fn pick<'a, T: Copy>(&mut self, options: &'a [T]) -> T {
        // Catalogs are never empty
        *options.choose(&mut self.rng).unwrap_or(&options[0])
    }

    fn sample(
        &mut self,
        options: &[&str],
        range: std::ops::RangeInclusive<usize>,
    ) -> Vec<String> {
        let n = self.rng.random_range(range).min(options.len());
        options
            .choose_multiple(&mut self.rng, n)
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for DataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn str_array(items: &[&str]) -> Value {
    Value::Array(items.iter().map(|s| json!(s)).collect())
}
