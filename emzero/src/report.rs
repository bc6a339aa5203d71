use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use emzero_core::{Diagnostic, Role};

/// Diagnostics as JSON lines, one object per problem.
pub struct Report<W: Write> {
    writer: W,
}

impl Report<BufWriter<File>> {
    pub fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Report<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, diagnostic: &Diagnostic) -> anyhow::Result<()> {
        let json = serde_json::to_string(diagnostic)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    pub fn finish(mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Totals for the end-of-run log line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub sentences: usize,
    pub tokens: usize,
    pub subjects: usize,
    pub objects: usize,
    pub possessors: usize,
    pub diagnostics: usize,
}

impl Summary {
    pub fn add_zeros(&mut self, role: Role, count: usize) {
        match role {
            Role::Subj => self.subjects += count,
            Role::Obj => self.objects += count,
            Role::Poss => self.possessors += count,
        }
    }

    pub fn zeros(&self) -> usize {
        self.subjects + self.objects + self.possessors
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} sentences, {} tokens, {} zeros (SUBJ {}, OBJ {}, POSS {}), {} diagnostics",
            self.sentences,
            self.tokens,
            self.zeros(),
            self.subjects,
            self.objects,
            self.possessors,
            self.diagnostics
        )
    }
}
