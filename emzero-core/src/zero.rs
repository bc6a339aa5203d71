//! The drop rules: which zero pronouns a sentence needs, and their features.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::features::{
    Case, Definite, FeatureSet, Features, Lookup, Number, Person, PronType, Psor, VerbForm,
};
use crate::tables::{INFINITIVE_RELATION, pronoun_lemma};
use crate::{Diagnostic, Error, Role, SentenceIndex, Token};

/// Zeros of one sentence, grouped by the id of the token they follow.
#[derive(Debug, Default)]
pub struct Zeros {
    by_anchor: FxHashMap<String, Vec<Token>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Zeros {
    /// Removes and returns the zeros anchored to `id`, subjects first.
    pub fn take(&mut self, id: &str) -> Vec<Token> {
        let mut zeros = self.by_anchor.remove(id).unwrap_or_default();
        zeros.sort_by_key(|zero| zero.role());
        zeros
    }

    pub fn len(&self) -> usize {
        self.by_anchor.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Id of the zero filling `role` next to `anchor`: `7` becomes `7.SUBJ`.
///
/// A role suffix already on `anchor` is replaced rather than stacked.
pub fn zero_id(anchor: &str, role: Role) -> String {
    let base = Role::ALL
        .iter()
        .find_map(|existing| {
            anchor
                .strip_suffix(existing.as_str())
                .and_then(|rest| rest.strip_suffix('.'))
        })
        .unwrap_or(anchor);
    format!("{base}.{role}")
}

/// Applies the subject, object and possessor rules to an indexed sentence.
///
/// A zero that cannot be derived is left out and reported; the rest of the
/// sentence is unaffected.
pub fn synthesize(index: &SentenceIndex<'_>) -> Zeros {
    let mut synthesizer = Synthesizer {
        index,
        taken: index.ids().map(str::to_string).collect(),
        zeros: Zeros::default(),
    };

    for verb in index.verbs() {
        synthesizer.subject(verb);
        synthesizer.object(verb);
    }
    for possessum in index.possessa() {
        synthesizer.possessor(possessum);
    }

    synthesizer.zeros
}

struct Synthesizer<'i, 'a> {
    index: &'i SentenceIndex<'a>,
    // ids in use, real and synthesized
    taken: FxHashSet<String>,
    zeros: Zeros,
}

impl Synthesizer<'_, '_> {
    fn subject(&mut self, verb: &Token) {
        if self.index.has_dependent(&verb.id, Role::Subj.as_str()) {
            return;
        }
        let zero = subject_agreement(verb)
            .and_then(|(person, number)| build(verb, Role::Subj, Case::Nom, person, number));
        self.push(verb, zero);
    }

    fn object(&mut self, verb: &Token) {
        if self.index.has_dependent(&verb.id, Role::Obj.as_str()) {
            return;
        }
        let person = match verb.feats.get::<Definite>() {
            Lookup::Value(Definite::Def) => Person::Third,
            Lookup::Value(Definite::Second) => Person::Second,
            Lookup::Value(Definite::Ind) | Lookup::Unrecognized(_) | Lookup::Absent => return,
        };
        // an infinitival complement saturates the object slot itself
        if self.index.has_dependent(&verb.id, INFINITIVE_RELATION) {
            return;
        }
        let zero = build(verb, Role::Obj, Case::Acc, person, Number::Sing);
        self.push(verb, zero);
    }

    fn possessor(&mut self, possessum: &Token) {
        // only possessa filling an argument slot of a verb
        let is_argument_of_verb = self.index.is_verb(&possessum.head)
            && self
                .index
                .dependents(&possessum.head)
                .iter()
                .any(|dependent| dependent.id == possessum.id);
        if !is_argument_of_verb || self.index.has_dependent(&possessum.id, Role::Poss.as_str()) {
            return;
        }
        let zero = require::<Psor<Person>>(possessum, Role::Poss).and_then(|Psor(person)| {
            let Psor(number) = require::<Psor<Number>>(possessum, Role::Poss)?;
            build(possessum, Role::Poss, Case::Gen, person, number)
        });
        self.push(possessum, zero);
    }

    fn push(&mut self, anchor: &Token, zero: Result<Token, Error>) {
        let error = match zero {
            Ok(zero) if self.taken.insert(zero.id.clone()) => {
                log::trace!(
                    "Sentence {}: {} zero {} after token {}",
                    self.index.sentence(),
                    zero.deprel,
                    zero.lemma,
                    anchor.id
                );
                self.zeros
                    .by_anchor
                    .entry(anchor.id.clone())
                    .or_default()
                    .push(zero);
                return;
            }
            Ok(zero) => Error::DuplicateTokenId { id: zero.id },
            Err(error) => error,
        };
        self.zeros.diagnostics.push(Diagnostic {
            sentence: self.index.sentence(),
            anchor: anchor.id.clone(),
            error,
        });
    }
}

/// Person and number of the subject a verb agrees with.
fn subject_agreement(verb: &Token) -> Result<(Person, Number), Error> {
    match verb.feats.get::<VerbForm>() {
        Lookup::Value(VerbForm::Fin) => Ok((
            require::<Person>(verb, Role::Subj)?,
            require::<Number>(verb, Role::Subj)?,
        )),
        // a dative-marked infinitive carries its subject's agreement, a bare one has an arbitrary controller
        Lookup::Value(VerbForm::Inf) => match verb.feats.get::<Person>() {
            Lookup::Absent => Ok((Person::X, Number::X)),
            Lookup::Value(_) | Lookup::Unrecognized(_) => Ok((
                require::<Person>(verb, Role::Subj)?,
                require::<Number>(verb, Role::Subj)?,
            )),
        },
        Lookup::Value(other) => Err(Error::UnexpectedFeatureValue {
            token: verb.id.clone(),
            role: Role::Subj,
            feature: VerbForm::name(),
            value: other.to_string(),
        }),
        Lookup::Unrecognized(value) => Err(Error::UnexpectedFeatureValue {
            token: verb.id.clone(),
            role: Role::Subj,
            feature: VerbForm::name(),
            value: value.to_string(),
        }),
        Lookup::Absent => Err(Error::MissingRequiredFeature {
            token: verb.id.clone(),
            role: Role::Subj,
            feature: VerbForm::name(),
        }),
    }
}

fn require<F: FeatureSet>(token: &Token, role: Role) -> Result<F, Error> {
    match token.feats.get::<F>() {
        Lookup::Value(value) => Ok(value),
        Lookup::Unrecognized(value) => Err(Error::UnexpectedFeatureValue {
            token: token.id.clone(),
            role,
            feature: F::name(),
            value: value.to_string(),
        }),
        Lookup::Absent => Err(Error::MissingRequiredFeature {
            token: token.id.clone(),
            role,
            feature: F::name(),
        }),
    }
}

fn build(
    governor: &Token,
    role: Role,
    case: Case,
    person: Person,
    number: Number,
) -> Result<Token, Error> {
    let lemma = pronoun_lemma(number, person).ok_or_else(|| Error::UnknownPronounForm {
        token: governor.id.clone(),
        number: number.to_string(),
        person: person.to_string(),
    })?;
    let xpostag = format!("[/N|Pro][{person}{}][{case}]", number.abbreviation());

    let mut feats = Features::new();
    feats.set(case);
    feats.set(PronType::Prs);
    feats.set(person);
    feats.set(number);

    Ok(Token::zero(
        zero_id(&governor.id, role),
        role,
        governor,
        lemma,
        xpostag,
        feats,
    ))
}
