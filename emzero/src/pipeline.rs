use emzero_core::{Diagnostic, Error, Role, Schema, Sentence, index, synthesize_and_merge};

use crate::xtsv::RawSentence;

/// Output rows of one sentence plus what it took to produce them.
#[derive(Debug)]
pub struct Processed {
    pub nr: usize,
    pub rows: Vec<Vec<String>>,
    /// input token rows, zeros not included
    pub tokens: usize,
    pub zeros: Vec<(Role, usize)>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Inserts the zeros of one sentence.
///
/// A sentence whose rows cannot be read is passed through untouched, with
/// the reason in `diagnostics`.
pub fn process(raw: RawSentence, schema: &Schema) -> Processed {
    let tokens = raw.rows.len();
    let parsed = match raw.undecodable {
        Some(undecodable) => Err(Diagnostic {
            sentence: raw.nr,
            anchor: format!("#{}", undecodable.abs_index),
            error: Error::InvalidEncoding {
                line: undecodable.line,
            },
        }),
        None => Sentence::from_rows(raw.nr, raw.first_abs_index, raw.rows.clone(), schema),
    };
    let sentence = match parsed {
        Ok(sentence) => sentence,
        Err(diagnostic) => {
            return Processed {
                nr: raw.nr,
                rows: raw.rows,
                tokens,
                zeros: Vec::new(),
                diagnostics: vec![diagnostic],
            };
        }
    };

    let index = index(&sentence);
    let augmented = synthesize_and_merge(&sentence, &index);

    Processed {
        nr: raw.nr,
        rows: augmented
            .tokens
            .iter()
            .map(|token| token.format(schema))
            .collect(),
        tokens,
        zeros: Role::ALL
            .iter()
            .map(|&role| (role, augmented.zero_count(role)))
            .collect(),
        diagnostics: augmented.diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::xtsv::{XtsvReader, XtsvWriter};

    fn annotate(input: &str) -> (String, Vec<Processed>) {
        annotate_bytes(input.as_bytes())
    }

    fn annotate_bytes(input: &[u8]) -> (String, Vec<Processed>) {
        let reader = XtsvReader::new(Cursor::new(input)).unwrap();
        let schema = Schema::from_header(reader.header()).unwrap();

        let mut output = Vec::new();
        let mut writer = XtsvWriter::new(&mut output);
        writer.write_header(schema.columns()).unwrap();

        let mut processed = Vec::new();
        for raw in reader {
            let sentence = process(raw.unwrap(), &schema);
            writer.write_sentence(&sentence.rows).unwrap();
            processed.push(sentence);
        }
        writer.flush().unwrap();
        drop(writer);

        (String::from_utf8(output).unwrap(), processed)
    }

    const HEADER: &str = "form\twsafter\tanas\tlemma\txpostag\tupos\tfeats\tid\tdeprel\thead";

    #[test]
    fn test_subject_zero_is_written_after_its_verb() {
        let input = format!(
            "{HEADER}\n\
             Alszik\t\" \"\t[]\talszik\t[/V][Prs.NDef.3Sg]\tVERB\tMood=Ind|Number=Sing|Person=3|Tense=Pres|VerbForm=Fin\t1\tROOT\t0\n\
             .\t\"\\n\"\t[]\t.\t[Punct]\tPUNCT\t_\t2\tPUNCT\t1\n"
        );
        let (output, processed) = annotate(&input);

        let expected = format!(
            "{HEADER}\n\
             Alszik\t\" \"\t[]\talszik\t[/V][Prs.NDef.3Sg]\tVERB\tMood=Ind|Number=Sing|Person=3|Tense=Pres|VerbForm=Fin\t1\tROOT\t0\n\
             DROP\t_\t[]\tő/az\t[/N|Pro][3Sg][Nom]\tPRON\tCase=Nom|Number=Sing|Person=3|PronType=Prs\t1.SUBJ\tSUBJ\t1\n\
             .\t\"\\n\"\t[]\t.\t[Punct]\tPUNCT\t_\t2\tPUNCT\t1\n\
             \n"
        );
        assert_eq!(output, expected);
        assert_eq!(processed[0].tokens, 2);
        assert_eq!(
            processed[0].zeros,
            vec![(Role::Subj, 1), (Role::Obj, 0), (Role::Poss, 0)]
        );
    }

    #[test]
    fn test_unreadable_sentence_passes_through() {
        let input = format!(
            "{HEADER}\n\
             Jön\t\" \"\t[]\tjön\t_\tVERB\tVerbForm\t1\tROOT\t0\n\
             \n\
             Megy\t\" \"\t[]\tmegy\t_\tVERB\tVerbForm=Fin|Number=Plur|Person=1\t1\tROOT\t0\n"
        );
        let (output, processed) = annotate(&input);

        let sentences: Vec<&str> = output.split("\n\n").collect();
        // the broken row comes back exactly as it went in
        assert_eq!(
            sentences[0],
            format!("{HEADER}\nJön\t\" \"\t[]\tjön\t_\tVERB\tVerbForm\t1\tROOT\t0")
        );
        assert!(sentences[1].contains("\tmi\t[/N|Pro][1Pl][Nom]\t"));

        assert_eq!(processed[0].diagnostics.len(), 1);
        assert_eq!(processed[0].diagnostics[0].error.kind(), "MalformedFeatureString");
        assert_eq!(processed[0].diagnostics[0].sentence, 0);
        assert!(processed[1].diagnostics.is_empty());
    }

    #[test]
    fn test_short_row_is_reported() {
        let input = format!("{HEADER}\nJön\t\" \"\t[]\tjön\n");
        let (_, processed) = annotate(&input);

        assert_eq!(processed[0].diagnostics[0].error.kind(), "RaggedRow");
        assert_eq!(processed[0].diagnostics[0].anchor, "#1");
        assert_eq!(processed[0].rows.len(), 1);
    }

    #[test]
    fn test_undecodable_sentence_passes_through_and_the_rest_is_processed() {
        let mut input = format!("{HEADER}\n").into_bytes();
        input.extend_from_slice(b"Alszik\t_\t[]\talszik\t_\tVERB\tNumber=Sing|Person=3|VerbForm=Fin\t1\tROOT\t0\n\n");
        input.extend_from_slice(b"J\xf6n\t_\t[]\tj\xf6n\t_\tVERB\tNumber=Sing|Person=3|VerbForm=Fin\t1\tROOT\t0\n\n");
        input.extend_from_slice(b"Megy\t_\t[]\tmegy\t_\tVERB\tNumber=Plur|Person=1|VerbForm=Fin\t1\tROOT\t0\n");
        let (output, processed) = annotate_bytes(&input);

        assert_eq!(processed.len(), 3);
        assert_eq!(processed[0].zeros[0], (Role::Subj, 1));
        assert_eq!(processed[1].rows.len(), 1);
        assert_eq!(processed[1].zeros, Vec::new());
        assert_eq!(
            processed[1].diagnostics,
            vec![Diagnostic {
                sentence: 1,
                anchor: "#2".to_string(),
                error: Error::InvalidEncoding { line: 4 },
            }]
        );
        assert_eq!(processed[2].zeros[0], (Role::Subj, 1));
        assert!(output.contains("\tmi\t[/N|Pro][1Pl][Nom]\t"));
    }
}
