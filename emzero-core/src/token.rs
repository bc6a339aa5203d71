use rustc_hash::FxHashMap;

use crate::features::Features;
use crate::tables::{DROP_FORM, EMPTY_ANALYSES};
use crate::{Diagnostic, Error, PartOfSpeech, Role};

/// Placeholder for a column a token has no value for
pub const UNSET: &str = "_";

/// The columns the engine knows by name.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    Eq,
    PartialEq,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display(style = "lowercase")]
pub enum Field {
    Id,
    Form,
    Anas,
    Lemma,
    Upos,
    Xpostag,
    Feats,
    Head,
    Deprel,
    Deps,
    Misc,
}

impl Field {
    pub const REQUIRED: [Field; 8] = [
        Field::Id,
        Field::Form,
        Field::Lemma,
        Field::Upos,
        Field::Xpostag,
        Field::Feats,
        Field::Head,
        Field::Deprel,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Form => "form",
            Field::Anas => "anas",
            Field::Lemma => "lemma",
            Field::Upos => "upos",
            Field::Xpostag => "xpostag",
            Field::Feats => "feats",
            Field::Head => "head",
            Field::Deprel => "deprel",
            Field::Deps => "deps",
            Field::Misc => "misc",
        }
    }
}

/// Column layout of a token stream, resolved from its header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    // the known field behind each column, if any
    fields: Vec<Option<Field>>,
    positions: FxHashMap<Field, usize>,
}

impl Schema {
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self, Error> {
        let columns: Vec<String> = header.iter().map(|name| name.as_ref().to_string()).collect();
        let mut fields = Vec::with_capacity(columns.len());
        let mut positions = FxHashMap::default();

        for (position, name) in columns.iter().enumerate() {
            let field = name.parse::<Field>().ok();
            if let Some(field) = field {
                if positions.contains_key(&field) {
                    log::warn!("Column {name} appears twice in the header, using the first one");
                    fields.push(None);
                    continue;
                }
                positions.insert(field, position);
            }
            fields.push(field);
        }

        if let Some(missing) = Field::REQUIRED
            .into_iter()
            .find(|field| !positions.contains_key(field))
        {
            return Err(Error::MissingColumn {
                field: missing.as_str(),
            });
        }

        Ok(Self {
            columns,
            fields,
            positions,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions.get(&field).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    /// Read from input; the row is written back untouched
    Row(Vec<String>),
    Zero(Role),
}

/// One token of a sentence, either read from input or synthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: String,
    pub form: String,
    pub anas: Option<String>,
    pub lemma: String,
    pub upos: String,
    pub xpostag: String,
    pub feats: Features,
    pub head: String,
    pub deprel: String,
    pub deps: Option<String>,
    pub misc: Option<String>,
    /// Sentence counter, shared with every zero synthesized from this token
    pub sent_nr: usize,
    /// Corpus-wide counter of input tokens; zeros inherit their governor's
    pub abs_index: usize,
    source: Source,
}

impl Token {
    pub fn from_row(
        row: Vec<String>,
        schema: &Schema,
        sent_nr: usize,
        abs_index: usize,
    ) -> Result<Self, Error> {
        if row.len() != schema.width() {
            return Err(Error::RaggedRow {
                expected: schema.width(),
                found: row.len(),
            });
        }

        let optional = |field| schema.position(field).map(|i: usize| row[i].clone());
        // required fields are guaranteed by Schema::from_header
        let required = |field| optional(field).unwrap_or_default();

        let feats = Features::parse(&required(Field::Feats))?;

        Ok(Self {
            id: required(Field::Id),
            form: required(Field::Form),
            anas: optional(Field::Anas),
            lemma: required(Field::Lemma),
            upos: required(Field::Upos),
            xpostag: required(Field::Xpostag),
            feats,
            head: required(Field::Head),
            deprel: required(Field::Deprel),
            deps: optional(Field::Deps),
            misc: optional(Field::Misc),
            sent_nr,
            abs_index,
            source: Source::Row(row),
        })
    }

    /// A `DROP` pronoun governed by `governor`, whose counters it inherits.
    pub(crate) fn zero(
        id: String,
        role: Role,
        governor: &Token,
        lemma: &str,
        xpostag: String,
        feats: Features,
    ) -> Self {
        Self {
            id,
            form: DROP_FORM.to_string(),
            anas: Some(EMPTY_ANALYSES.to_string()),
            lemma: lemma.to_string(),
            upos: PartOfSpeech::Pron.to_string(),
            xpostag,
            feats,
            head: governor.id.clone(),
            deprel: role.to_string(),
            deps: None,
            misc: None,
            sent_nr: governor.sent_nr,
            abs_index: governor.abs_index,
            source: Source::Zero(role),
        }
    }

    /// `None` if the `upos` column holds something outside the UD tagset
    pub fn pos(&self) -> Option<PartOfSpeech> {
        self.upos.parse().ok()
    }

    pub fn is_zero(&self) -> bool {
        matches!(self.source, Source::Zero(_))
    }

    /// The role of a synthesized token
    pub fn role(&self) -> Option<Role> {
        match self.source {
            Source::Zero(role) => Some(role),
            Source::Row(_) => None,
        }
    }

    /// The token as a row of `schema`.
    ///
    /// Input tokens come back exactly as read. Zeros fill the columns they know
    /// and leave `_` everywhere else.
    pub fn format(&self, schema: &Schema) -> Vec<String> {
        if let Source::Row(row) = &self.source {
            return row.clone();
        }

        schema
            .fields
            .iter()
            .map(|field| match field {
                Some(field) => self.value(*field),
                None => UNSET.to_string(),
            })
            .collect()
    }

    fn value(&self, field: Field) -> String {
        let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| UNSET.to_string());
        match field {
            Field::Id => self.id.clone(),
            Field::Form => self.form.clone(),
            Field::Anas => optional(&self.anas),
            Field::Lemma => self.lemma.clone(),
            Field::Upos => self.upos.clone(),
            Field::Xpostag => self.xpostag.clone(),
            Field::Feats => self.feats.to_string(),
            Field::Head => self.head.clone(),
            Field::Deprel => self.deprel.clone(),
            Field::Deps => optional(&self.deps),
            Field::Misc => optional(&self.misc),
        }
    }
}

/// One sentence: its number in the corpus and its tokens in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub nr: usize,
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Builds a sentence from raw rows; the n-th row gets `abs_index = first_abs_index + n`.
    ///
    /// Fails on the first row that does not fit `schema`.
    pub fn from_rows(
        nr: usize,
        first_abs_index: usize,
        rows: Vec<Vec<String>>,
        schema: &Schema,
    ) -> Result<Self, Diagnostic> {
        let id_position = schema.position(Field::Id);
        let tokens = rows
            .into_iter()
            .enumerate()
            .map(|(offset, row)| {
                let abs_index = first_abs_index + offset;
                let anchor = id_position
                    .and_then(|i| row.get(i).cloned())
                    .unwrap_or_else(|| format!("#{abs_index}"));
                Token::from_row(row, schema, nr, abs_index).map_err(|error| Diagnostic {
                    sentence: nr,
                    anchor,
                    error,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { nr, tokens })
    }
}
