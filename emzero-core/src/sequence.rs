use std::borrow::Cow;

use crate::zero::{Zeros, synthesize};
use crate::{Diagnostic, Role, Sentence, SentenceIndex, Token};

/// A sentence with its zeros in place, plus whatever went wrong on the way.
#[derive(Debug)]
pub struct Augmented<'a> {
    pub sentence: usize,
    pub tokens: Vec<Cow<'a, Token>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Augmented<'_> {
    /// Synthesized tokens only, in output order
    pub fn zeros(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .map(|token| token.as_ref())
            .filter(|token| token.is_zero())
    }

    pub fn zero_count(&self, role: Role) -> usize {
        self.zeros()
            .filter(|token| token.role() == Some(role))
            .count()
    }
}

/// Runs the drop rules over an indexed sentence and slots every zero in right
/// after the token it belongs to.
///
/// Input tokens keep their order. Zeros sharing an anchor come out as subject,
/// object, possessor.
pub fn synthesize_and_merge<'a>(sentence: &'a Sentence, index: &SentenceIndex<'_>) -> Augmented<'a> {
    let mut zeros = synthesize(index);

    let mut diagnostics = index.diagnostics().to_vec();
    diagnostics.append(&mut zeros.diagnostics);

    Augmented {
        sentence: sentence.nr,
        tokens: merge(sentence, zeros),
        diagnostics,
    }
}

fn merge(sentence: &Sentence, mut zeros: Zeros) -> Vec<Cow<'_, Token>> {
    let mut tokens = Vec::with_capacity(sentence.tokens.len() + zeros.len());
    for token in &sentence.tokens {
        tokens.push(Cow::Borrowed(token));
        tokens.extend(zeros.take(&token.id).into_iter().map(Cow::Owned));
    }
    tokens
}
