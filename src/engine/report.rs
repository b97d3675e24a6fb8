//! The output table.
//!
//! Records are final once every rule has run; this module turns them into
//! [`Row`]s by:
//!
//! - joining the context window with single spaces;
//! - expanding the field set into one 0/1 column per registry field;
//! - running the writing rule's extraction regex over the context string
//!   (`extraction_regex` / `final_extraction`);
//! - resolving a region from locality names, `"NA"` when none is found.
//!
//! ```text
//! Record { index: 12, word: "درهم", fields: AMOUNT, rule: 5 }
//!   └─▶ Row { index: 12, context: "بمبلغ 5000 درهم عن", is_amount: 1, ...,
//!             extraction_regex: "\b\d+\b", final_extraction: "5000", region: "NA" }
//! ```

use super::registry::Registry;
use super::tokenizer::Document;
use crate::api::RegionScope;
use crate::{Field, Record, RuleKind};

/// Region value when no locality is found.
pub const NO_REGION: &str = "NA";

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Token index in the source document.
    pub index: usize,
    pub word: String,
    pub context: String,
    /// One entry per registry field, in column order.
    pub flags: Vec<(Field, bool)>,
    pub is_regex: bool,
    pub is_keyword: bool,
    /// Extraction regex of the rule that wrote the row, empty when none.
    pub extraction_regex: String,
    /// First match of `extraction_regex` in `context`, empty when none.
    pub final_extraction: String,
    pub region: String,
}

impl Row {
    /// Flag for `field`, `None` if the registry doesn't know the field.
    pub fn flag(&self, field: Field) -> Option<bool> {
        self.flags.iter().find(|(f, _)| *f == field).map(|(_, set)| *set)
    }

    /// Cell values in [`Report::columns`] order.
    pub fn cells(&self) -> Vec<String> {
        let bit = |set: bool| String::from(if set { "1" } else { "0" });

        let mut cells = Vec::with_capacity(self.flags.len() + 8);
        cells.push(self.index.to_string());
        cells.push(self.word.clone());
        cells.push(self.context.clone());
        cells.extend(self.flags.iter().map(|(_, set)| bit(*set)));
        cells.push(bit(self.is_regex));
        cells.push(bit(self.is_keyword));
        cells.push(self.extraction_regex.clone());
        cells.push(self.final_extraction.clone());
        cells.push(self.region.clone());
        cells
    }
}

/// Rows sorted by index, one column per registry field plus derived columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    fields: Vec<Field>,
    rows: Vec<Row>,
}

impl Report {
    /// Column headers, matching [`Row::cells`].
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = vec!["index", "word", "context"];
        columns.extend(self.fields.iter().map(|f| f.name()));
        columns.extend(["is_regex", "is_keyword", "extraction_regex", "final_extraction", "region"]);
        columns
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row for token `index`, if any rule matched there.
    pub fn row_at(&self, index: usize) -> Option<&Row> {
        self.rows.binary_search_by_key(&index, |row| row.index).ok().map(|pos| &self.rows[pos])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the report from finalized records.
pub(crate) fn build(mut records: Vec<Record>, registry: &Registry, document: &Document, scope: RegionScope) -> Report {
    records.sort_by_key(|record| record.index);

    let localities = registry.localities();
    let document_region = match scope {
        RegionScope::Document => Some(localities.resolve(document.raw()).unwrap_or(NO_REGION)),
        RegionScope::Context => None,
    };

    let rows = records
        .into_iter()
        .map(|record| {
            let context = record.context.join(" ");
            let rule = &registry.rules()[record.rule];

            let extraction_regex = rule.extraction_pattern().unwrap_or_default().to_string();
            let final_extraction = rule
                .extraction
                .as_ref()
                .and_then(|re| re.find(&context))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            let region = document_region
                .unwrap_or_else(|| localities.resolve(&record.context).unwrap_or(NO_REGION))
                .to_string();

            Row {
                index: record.index,
                flags: registry.fields().iter().map(|f| (*f, record.fields.contains(f.flag()))).collect(),
                is_regex: record.kind.contains(RuleKind::REGEX),
                is_keyword: record.kind.contains(RuleKind::KEYWORD),
                word: record.word,
                context,
                extraction_regex,
                final_extraction,
                region,
            }
        })
        .collect();

    Report { fields: registry.fields().to_vec(), rows }
}
