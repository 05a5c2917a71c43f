//! Question Catalog - Maps the questionnaire's full question text to short identifiers.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Column holding the form submission timestamp. Carries no categorical signal.
pub const TIMESTAMP_COLUMN: &str = "Carimbo de data/hora";

/// Full question text (after header normalization) paired with its identifier.
const QUESTIONS: &[(&str, &str)] = &[
    ("Gênero", "Genero"),
    ("Faixa Etária", "FaixaEtaria"),
    ("Escolaridade", "Escolaridade"),
    (
        "A qual ou quais grupo(s) minoritário(s) você pertence?",
        "GrupoMinoritario",
    ),
    ("Tempo de experiência em equipes ágeis", "ExperienciaAgil"),
    (
        "Nas equipes ágeis em que você atuou/atua, a diversidade foi/é valorizada?",
        "Diversidade",
    ),
    (
        "Nas equipes ágeis em que você atuou/atua, havia/há representatividade de grupos minoritários?",
        "Representatividade",
    ),
    (
        "Em alguma das equipes ágeis em que você atuou/atua, você já sofreu algum tipo de discriminação?",
        "Discriminacao",
    ),
    (
        "Nas equipes em que você atuou/atua, você sentiu/sente liberdade para expressar opiniões e dúvidas sem medo de julgamento?",
        "SegurancaPsicologica",
    ),
    (
        "Como você avalia seu bem-estar emocional nos ambientes ágeis em que atuou/atua?",
        "BemEstarEmocional",
    ),
    (
        "Você já se sentiu inseguro(a) em alguma equipe ágil devido a estereótipos ou discriminação?",
        "Inseguranca",
    ),
    (
        "Essas inseguranças afetaram/afetam sua confiança profissional ou desempenho na equipe?",
        "ImpactoDesempenho",
    ),
    (
        "Nas equipes ágeis em que você atuou/atua, a liderança promoveu/promove um ambiente seguro e acolhedor para os membros de grupos minoritários?",
        "LiderancaSegura",
    ),
    (
        "A liderança dessas equipes contribuiu/contribui para lidar com situações que impactam a segurança psicológica dos membros?",
        "LiderancaSuporte",
    ),
    (
        "A liderança dessas equipes promoveu/promove práticas inclusivas?",
        "LiderancaInclusiva",
    ),
    (
        "Havia/há representatividade de pessoas como você em cargos de liderança nessas equipes?",
        "RepresentatividadeNaLideranca",
    ),
];

static SURVEY_CATALOG: Lazy<QuestionCatalog> =
    Lazy::new(|| QuestionCatalog::from_pairs(QUESTIONS.iter().copied()));

/// Normalizes a raw CSV header.
///
/// Strips a leading byte-order mark and surrounding whitespace, then
/// replaces embedded newlines with single spaces.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().replace('\n', " ")
}

/// Lookup from question text to short identifier.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    aliases: HashMap<String, String>,
}

impl QuestionCatalog {
    /// Returns the catalog for the agile-teams diversity questionnaire.
    pub fn survey() -> &'static QuestionCatalog {
        &SURVEY_CATALOG
    }

    /// Builds a catalog from (question, identifier) pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            aliases: pairs
                .into_iter()
                .map(|(question, id)| (question.to_string(), id.to_string()))
                .collect(),
        }
    }

    /// Returns the identifier for a normalized question, if catalogued.
    pub fn identifier(&self, question: &str) -> Option<&str> {
        self.aliases.get(question).map(String::as_str)
    }

    /// Normalizes a raw header and maps it to its identifier when known.
    pub fn resolve(&self, raw_header: &str) -> String {
        let normalized = normalize_header(raw_header);
        match self.identifier(&normalized) {
            Some(id) => id.to_string(),
            None => normalized,
        }
    }

    /// Returns the number of catalogued questions.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
