//! Dependency lookups for one sentence.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::features::{Number, Psor};
use crate::tables::{POSSESSOR_RELATIONS, ROOT_HEAD, is_argument};
use crate::{Diagnostic, Error, Sentence, Token};

/// What the drop rules need to know about a sentence, built by [`index`].
///
/// Verbs and possessa keep input order so zeros come out deterministically.
#[derive(Debug)]
pub struct SentenceIndex<'a> {
    sentence: usize,
    ids: FxHashSet<&'a str>,
    /// governor id -> its argument dependents, in input order
    dependents: FxHashMap<&'a str, Vec<&'a Token>>,
    verbs: IndexMap<&'a str, &'a Token>,
    /// nominals agreeing with a possessor that is not overtly there
    possessa: IndexMap<&'a str, &'a Token>,
    diagnostics: Vec<Diagnostic>,
}

/// Indexes `sentence`.
///
/// Dangling heads and repeated ids are reported in
/// [`SentenceIndex::diagnostics`]. A token with a dangling head contributes
/// no dependents. A token repeating an earlier id still counts as an argument
/// of its governor but is not indexed as a verb or possessum.
pub fn index(sentence: &Sentence) -> SentenceIndex<'_> {
    let mut ids = FxHashSet::default();
    let mut diagnostics = Vec::new();
    let mut tokens = Vec::with_capacity(sentence.tokens.len());

    // heads that already have an overt possessor
    let mut possessed = FxHashSet::default();

    for token in &sentence.tokens {
        let first = ids.insert(token.id.as_str());
        if !first {
            diagnostics.push(Diagnostic {
                sentence: sentence.nr,
                anchor: token.id.clone(),
                error: Error::DuplicateTokenId {
                    id: token.id.clone(),
                },
            });
        }
        tokens.push((token, first));

        if POSSESSOR_RELATIONS.contains(&token.deprel.as_str())
            && token.pos().is_some_and(|pos| pos.is_nominal())
        {
            possessed.insert(token.head.as_str());
        }
    }

    let mut dependents: FxHashMap<&str, Vec<&Token>> = FxHashMap::default();
    let mut verbs = IndexMap::new();
    let mut possessa = IndexMap::new();

    for (token, first) in tokens {
        let head = token.head.as_str();
        if head != ROOT_HEAD && !ids.contains(head) {
            log::debug!(
                "Sentence {}: token {} points at missing head {head}",
                sentence.nr,
                token.id
            );
            diagnostics.push(Diagnostic {
                sentence: sentence.nr,
                anchor: token.id.clone(),
                error: Error::DanglingHeadReference {
                    token: token.id.clone(),
                    head: token.head.clone(),
                },
            });
        } else if head != ROOT_HEAD && is_argument(&token.deprel) {
            dependents.entry(head).or_default().push(token);
        }

        if !first {
            continue;
        }
        if token.pos().is_some_and(|pos| pos.is_verb()) {
            verbs.insert(token.id.as_str(), token);
        }

        if token.feats.contains::<Psor<Number>>() && !possessed.contains(token.id.as_str()) {
            possessa.insert(token.id.as_str(), token);
        }
    }

    SentenceIndex {
        sentence: sentence.nr,
        ids,
        dependents,
        verbs,
        possessa,
        diagnostics,
    }
}

impl<'a> SentenceIndex<'a> {
    pub fn sentence(&self) -> usize {
        self.sentence
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.ids.iter().copied()
    }

    /// Argument dependents of `governor`, in input order
    pub fn dependents(&self, governor: &str) -> &[&'a Token] {
        self.dependents
            .get(governor)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_dependent(&self, governor: &str, deprel: &str) -> bool {
        self.dependents(governor)
            .iter()
            .any(|dependent| dependent.deprel == deprel)
    }

    pub fn is_verb(&self, id: &str) -> bool {
        self.verbs.contains_key(id)
    }

    pub fn verbs(&self) -> impl Iterator<Item = &'a Token> + '_ {
        self.verbs.values().copied()
    }

    pub fn possessa(&self) -> impl Iterator<Item = &'a Token> + '_ {
        self.possessa.values().copied()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
