/// Universal Dependencies morphological features
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Separator between `name=value` pairs in a feature string
pub const FEATURE_SEPARATOR: char = '|';
/// Separator between a feature name and its value
pub const VALUE_SEPARATOR: char = '=';
/// The whole feature column when a token has no features
pub const EMPTY_FEATURES: &str = "_";

pub trait FeatureSet: FromStr + fmt::Display + Copy {
    fn name() -> &'static str;
}

/// Result of looking a typed feature up in a [`Features`] map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a, F> {
    Absent,
    Value(F),
    /// The feature is there but its value is outside the closed vocabulary
    Unrecognized(&'a str),
}

impl<F: FeatureSet> Lookup<'_, F> {
    pub fn value(self) -> Option<F> {
        match self {
            Lookup::Value(value) => Some(value),
            Lookup::Absent | Lookup::Unrecognized(_) => None,
        }
    }
}

/// Case is usually an inflectional feature of nouns and, depending on language, other parts of speech (pronouns, adjectives, determiners, numerals, verbs) that mark agreement with nouns.
///
/// Hungarian has a large case inventory; the zero pronouns only ever use `Nom`, `Acc` and `Gen`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
pub enum Case {
    Nom,
    Acc,
    Gen,
    Dat,
    Ins,
    Tra,
    Ess,
    Cau,
    Ine,
    Ela,
    Ill,
    Ade,
    Abl,
    All,
    Sup,
    Sub,
    Del,
    Ter,
    Tem,
    Dis,
    Loc,
}

/// Number is usually an inflectional feature of nouns and, depending on language, other parts of speech (pronouns, adjectives, determiners, numerals, verbs) that mark agreement with nouns.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
pub enum Number {
    Sing,
    Plur,
    /// Unspecified, used for the arbitrary controller of an infinitive
    X,
}

impl Number {
    /// Abbreviation used inside emMorph tags
    pub fn abbreviation(self) -> &'static str {
        match self {
            Number::Sing => "Sg",
            Number::Plur => "Pl",
            Number::X => "X",
        }
    }
}

/// Person is typically feature of personal and possessive pronouns / determiners, and of verbs. On verbs it is in fact an agreement feature that marks the person of the verb’s subject (some languages, e.g. Basque, can also mark person of objects). Person marked on verbs makes it unnecessary to always add a personal pronoun as subject and thus subjects are sometimes dropped (pro-drop languages).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
pub enum Person {
    #[display("1")]
    First,
    #[display("2")]
    Second,
    #[display("3")]
    Third,
    X,
}

/// This feature typically applies to pronouns, pronominal adjectives (determiners), pronominal numerals (quantifiers) and pronominal adverbs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
pub enum PronType {
    Prs,
    Rcp,
    Art,
    Int,
    Rel,
    Dem,
    Tot,
    Neg,
    Ind,
}

/// Even though the name of the feature seems to suggest that it is used exclusively with verbs, it is not the case. Some verb forms in some languages actually form a gray zone between verbs and other parts of speech (nouns, adjectives and adverbs).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
pub enum VerbForm {
    Fin,
    Inf,
    Part,
    Conv,
    Ger,
    Vnoun,
}

/// On Hungarian verbs this is the conjugation type: definite conjugation agrees with a definite object.
///
/// `2` marks the -lak/-lek forms, whose object is second person.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
pub enum Definite {
    Def,
    Ind,
    #[display("2")]
    Second,
}

/// Possessor agreement, e.g. `Number[psor]` on a possessed noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Psor<F>(pub F);

impl<F: fmt::Display> fmt::Display for Psor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<F: FromStr> FromStr for Psor<F> {
    type Err = F::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Psor)
    }
}

impl FeatureSet for Case {
    fn name() -> &'static str {
        "Case"
    }
}

impl FeatureSet for Number {
    fn name() -> &'static str {
        "Number"
    }
}

impl FeatureSet for Person {
    fn name() -> &'static str {
        "Person"
    }
}

impl FeatureSet for PronType {
    fn name() -> &'static str {
        "PronType"
    }
}

impl FeatureSet for VerbForm {
    fn name() -> &'static str {
        "VerbForm"
    }
}

impl FeatureSet for Definite {
    fn name() -> &'static str {
        "Definite"
    }
}

impl FeatureSet for Psor<Number> {
    fn name() -> &'static str {
        "Number[psor]"
    }
}

impl FeatureSet for Psor<Person> {
    fn name() -> &'static str {
        "Person[psor]"
    }
}

/// The feature column of a token: unique names mapped to their raw values.
///
/// Features outside the typed vocabulary are kept as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Features(BTreeMap<String, String>);

impl Features {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `Name=Value|Name=Value`, or `_` for no features.
    ///
    /// Only the first `=` of a pair separates name from value.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let mut features = BTreeMap::new();
        if raw == EMPTY_FEATURES {
            return Ok(Self(features));
        }

        for pair in raw.split(FEATURE_SEPARATOR) {
            let (name, value) = pair.split_once(VALUE_SEPARATOR).ok_or_else(|| {
                Error::MalformedFeatureString {
                    raw: raw.to_string(),
                    reason: "pair without '='",
                }
            })?;
            if name.is_empty() {
                return Err(Error::MalformedFeatureString {
                    raw: raw.to_string(),
                    reason: "empty feature name",
                });
            }
            if features
                .insert(name.to_string(), value.to_string())
                .is_some()
            {
                return Err(Error::MalformedFeatureString {
                    raw: raw.to_string(),
                    reason: "repeated feature name",
                });
            }
        }

        Ok(Self(features))
    }

    pub fn get<F: FeatureSet>(&self) -> Lookup<'_, F> {
        match self.0.get(F::name()) {
            None => Lookup::Absent,
            Some(raw) => match raw.parse() {
                Ok(value) => Lookup::Value(value),
                Err(_) => Lookup::Unrecognized(raw),
            },
        }
    }

    pub fn contains<F: FeatureSet>(&self) -> bool {
        self.0.contains_key(F::name())
    }

    pub fn set<F: FeatureSet>(&mut self, value: F) {
        self.0.insert(F::name().to_string(), value.to_string());
    }

    /// Raw value of any feature, typed or not
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in output order: by name, ignoring case.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        // stable, so names differing only in case keep their byte order
        pairs.sort_by_key(|(name, _)| name.to_lowercase());
        pairs.into_iter()
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(EMPTY_FEATURES);
        }
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "{FEATURE_SEPARATOR}")?;
            }
            write!(f, "{name}{VALUE_SEPARATOR}{value}")?;
        }
        Ok(())
    }
}

impl FromStr for Features {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

pub fn parse_features(raw: &str) -> Result<Features, Error> {
    Features::parse(raw)
}

pub fn serialize_features(features: &Features) -> String {
    features.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscore_is_empty() {
        let features = parse_features("_").unwrap();
        assert!(features.is_empty());
        assert_eq!(serialize_features(&features), "_");
        assert_eq!(serialize_features(&Features::new()), "_");
    }

    #[test]
    fn test_value_keeps_later_separators() {
        let features = parse_features("Foo=a=b|Case=Nom").unwrap();
        assert_eq!(features.raw("Foo"), Some("a=b"));
        assert_eq!(features.get::<Case>(), Lookup::Value(Case::Nom));
    }

    #[test]
    fn test_pair_without_separator_is_rejected() {
        let err = parse_features("Case=Nom|Plural").unwrap_err();
        assert_eq!(err.kind(), "MalformedFeatureString");
        assert!(parse_features("").is_err());
        assert!(parse_features("Case=Nom|Case=Acc").is_err());
    }

    #[test]
    fn test_serialization_ignores_case_and_insertion_order() {
        let mut features = Features::new();
        features.set(PronType::Prs);
        features.set(Person::Third);
        features.set(Case::Nom);
        features.set(Number::Sing);
        assert_eq!(
            features.to_string(),
            "Case=Nom|Number=Sing|Person=3|PronType=Prs"
        );

        let mixed = parse_features("b=1|A=2|c=3").unwrap();
        assert_eq!(mixed.to_string(), "A=2|b=1|c=3");
    }

    #[test]
    fn test_sorted_string_survives_parse_and_serialize() {
        let raw = "Definite=Def|Mood=Ind|Number=Sing|Person=3|Tense=Pres|VerbForm=Fin|Voice=Act";
        assert_eq!(serialize_features(&parse_features(raw).unwrap()), raw);

        let psor = "Case=Nom|Number=Sing|Number[psor]=Sing|Person=3|Person[psor]=1";
        assert_eq!(serialize_features(&parse_features(psor).unwrap()), psor);
    }

    #[test]
    fn test_typed_lookup_is_three_way() {
        let features = parse_features("VerbForm=Fin|Definite=2|Person=4").unwrap();
        assert_eq!(features.get::<VerbForm>(), Lookup::Value(VerbForm::Fin));
        assert_eq!(features.get::<Definite>(), Lookup::Value(Definite::Second));
        assert_eq!(features.get::<Person>(), Lookup::Unrecognized("4"));
        assert_eq!(features.get::<Number>(), Lookup::Absent);
    }

    #[test]
    fn test_possessor_features() {
        let features = parse_features("Number[psor]=Plur|Person[psor]=2").unwrap();
        assert!(features.contains::<Psor<Number>>());
        assert_eq!(
            features.get::<Psor<Person>>(),
            Lookup::Value(Psor(Person::Second))
        );
        assert!(!features.contains::<Number>());
    }
}
