//! Grammar topic catalogues per language.

use crate::core::error::DomainError;
use crate::core::language::Language;
use rand::Rng;
use rand::seq::SliceRandom;

const ENGLISH_GRAMMAR_TOPICS: &[&str] = &[
    "Present and past",
    "Present perfect and past",
    "Future",
    "Modals",
    "If and wish",
    "Passive",
    "Reported speech",
    "Questions and auxiliary verbs",
    "-ing and the infinitive",
    "Articles and nouns",
    "Pronouns and determiners",
    "Relative clauses",
    "Prepositions",
    "Adjectives and adverbs",
    "Conjunctions and prepositions",
    "Phrasal verbs",
    "Adverbial clauses and conjunctions",
    "Pronouns, substitution and leaving out words",
    "Relative clauses and other types of clause",
    "Articles, determiners and quantifiers",
    "Verb complementation: what follows verbs",
    "Linking verbs, passives, questions",
    "Modals and semi-modals",
];

const SPANISH_GRAMMAR_TOPICS: &[&str] = &[
    "Present Tense (Presente)",
    "Past Tenses: Preterite and Imperfect (Pretérito y Imperfecto)",
    "Present Perfect and Past Perfect (Pretérito Perfecto y Pluscuamperfecto)",
    "Future Tense (Futuro)",
    "Conditional Tense (Condicional)",
    "Modal Verbs (Verbos Modales)",
    "Subjunctive Mood (Presente de Subjuntivo)",
    "Commands/Imperative (Imperativo)",
    "Passive Voice (Voz Pasiva)",
    "Reported Speech (Estilo Indirecto)",
    "Questions and Question Words (Interrogativos)",
    "Gerunds and Infinitives (Gerundios e Infinitivos)",
    "Definite and Indefinite Articles (Artículos Definidos e Indefinidos)",
    "Nouns and Gender (Sustantivos y Género)",
    "Pronouns (Pronombres)",
    "Adjectives (Adjetivos)",
    "Adverbs (Adverbios)",
    "Prepositions (Preposiciones)",
    "Conjunctions (Conjunciones)",
    "Relative Clauses (Oraciones de Relativo)",
    "Phrasal Verbs and Verb Phrases (Verbos Frasales y Frases Verbales)",
    "Direct and Indirect Object Pronouns (Pronombres de Objeto Directo e Indirecto)",
    "Reflexive Verbs (Verbos Reflexivos)",
    "Comparatives and Superlatives (Comparativos y Superlativos)",
    "Tense Agreement (Concordancia de Tiempos)",
    "Ser vs. Estar (Usage of 'Ser' and 'Estar')",
    "Por vs. Para (Usage of 'Por' and 'Para')",
    "Impersonal Expressions (Expresiones Impersonales)",
    "Negation (Negación)",
    "Word Order (Orden de las Palabras)",
];

/// Grammar topic vocabulary for a language; empty for unknown languages.
pub fn grammar_topics(language: &Language) -> &'static [&'static str] {
    match language.as_str() {
        "english" => ENGLISH_GRAMMAR_TOPICS,
        "spanish" => SPANISH_GRAMMAR_TOPICS,
        _ => &[],
    }
}

/// Draw `count` distinct grammar topics for a language.
pub fn sample_topics<R: Rng + ?Sized>(
    language: &Language,
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, DomainError> {
    let topics = grammar_topics(language);
    if topics.len() < count {
        return Err(DomainError::NotEnoughTopics {
            language: language.to_string(),
            needed: count,
            available: topics.len(),
        });
    }
    Ok(topics
        .choose_multiple(rng, count)
        .map(|t| t.to_string())
        .collect())
}
