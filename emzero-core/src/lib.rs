//! Zero pronoun insertion for dependency parsed Hungarian.
//!
//! A sentence goes through [`index`] and then [`synthesize_and_merge`], which
//! returns the original tokens with a `DROP` token after every verb or
//! possessed noun whose subject, object or possessor is left unexpressed.

pub mod error;
pub mod features;
pub mod index;
pub mod sequence;
pub mod tables;
pub mod token;
pub mod zero;

pub use error::{Diagnostic, Error};
pub use features::{Features, parse_features, serialize_features};
pub use index::{SentenceIndex, index};
pub use sequence::{Augmented, synthesize_and_merge};
pub use token::{Field, Schema, Sentence, Token};

/// Universal POS tags, as found in the `upos` column.
#[derive(
    Clone,
    Debug,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Copy,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display(style = "UPPERCASE")]
pub enum PartOfSpeech {
    Adj,   // adjective
    Adp,   // adposition
    Adv,   // adverb
    Aux,   // auxiliary
    Cconj, // coordinating conjunction
    Det,   // determiner
    Intj,  // interjection
    Noun,  // noun
    Num,   // numeral
    Part,  // particle
    Pron,  // pronoun
    Propn, // proper noun
    Punct, // punctuation
    Sconj, // subordinating conjunction
    Sym,   // symbol
    Verb,  // verb
    X,     // other
}

impl PartOfSpeech {
    pub fn is_nominal(self) -> bool {
        tables::NOMINAL_CATEGORIES.contains(&self)
    }

    pub fn is_verb(self) -> bool {
        tables::VERB_CATEGORIES.contains(&self)
    }
}

/// The grammatical role a zero pronoun fills; also its `deprel`.
///
/// Zeros anchored to the same token are emitted in this order.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    serde::Serialize,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display(style = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Subj,
    Obj,
    Poss,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Subj, Role::Obj, Role::Poss];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Subj => "SUBJ",
            Role::Obj => "OBJ",
            Role::Poss => "POSS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_round_trips_through_upos_tags() {
        assert_eq!("PROPN".parse::<PartOfSpeech>().ok(), Some(PartOfSpeech::Propn));
        assert_eq!("CCONJ".parse::<PartOfSpeech>().ok(), Some(PartOfSpeech::Cconj));
        assert_eq!(PartOfSpeech::Verb.to_string(), "VERB");
        assert!("verb".parse::<PartOfSpeech>().is_err());
    }

    #[test]
    fn test_role_order_and_labels() {
        assert!(Role::Subj < Role::Obj && Role::Obj < Role::Poss);
        for role in Role::ALL {
            assert_eq!(role.to_string(), role.as_str());
        }
    }
}
