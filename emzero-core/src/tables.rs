//! Closed vocabularies of the Hungarian drop rules.
//!
//! Swapping these for another language's paradigm leaves the engine untouched.

use crate::PartOfSpeech;
use crate::features::{Number, Person};

/// Surface form of every synthesized token
pub const DROP_FORM: &str = "DROP";
/// `anas` column of a synthesized token: no morphological analyses
pub const EMPTY_ANALYSES: &str = "[]";
/// Head of a token attached to the root
pub const ROOT_HEAD: &str = "0";

/// Relations that make a token a core dependent of its governor
pub const ARGUMENT_RELATIONS: &[&str] = &["SUBJ", "OBJ", "OBL", "DAT", "POSS", "INF", "LOCY"];

/// Relations by which an overt possessor attaches to its possessum
pub const POSSESSOR_RELATIONS: &[&str] = &["POSS", "ATT"];

/// Relation of an infinitival complement, which blocks a zero object
pub const INFINITIVE_RELATION: &str = "INF";

pub const NOMINAL_CATEGORIES: &[PartOfSpeech] = &[
    PartOfSpeech::Noun,
    PartOfSpeech::Propn,
    PartOfSpeech::Adj,
    PartOfSpeech::Num,
    PartOfSpeech::Det,
    PartOfSpeech::Pron,
];

pub const VERB_CATEGORIES: &[PartOfSpeech] = &[PartOfSpeech::Verb];

pub fn is_argument(deprel: &str) -> bool {
    ARGUMENT_RELATIONS.contains(&deprel)
}

/// Lemma of the personal pronoun with the given number and person.
///
/// `None` for combinations the paradigm has no pronoun for.
pub fn pronoun_lemma(number: Number, person: Person) -> Option<&'static str> {
    match (number, person) {
        (Number::Sing, Person::First) => Some("én"),
        (Number::Sing, Person::Second) => Some("te"),
        (Number::Sing, Person::Third) => Some("ő/az"),
        (Number::Plur, Person::First) => Some("mi"),
        (Number::Plur, Person::Second) => Some("ti"),
        (Number::Plur, Person::Third) => Some("ők/azok"),
        (Number::X, Person::X) => Some("X"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pronoun_paradigm() {
        assert_eq!(pronoun_lemma(Number::Sing, Person::Third), Some("ő/az"));
        assert_eq!(pronoun_lemma(Number::Plur, Person::First), Some("mi"));
        assert_eq!(pronoun_lemma(Number::X, Person::X), Some("X"));
        assert_eq!(pronoun_lemma(Number::Sing, Person::X), None);
        assert_eq!(pronoun_lemma(Number::X, Person::Second), None);
    }

    #[test]
    fn test_argument_relations() {
        assert!(is_argument("SUBJ"));
        assert!(is_argument("LOCY"));
        assert!(!is_argument("ATT"));
        assert!(!is_argument("subj"));
    }
}
