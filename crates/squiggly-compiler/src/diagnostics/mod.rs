//! Errors found while parsing and lowering a filter.
//!
//! The parser reports everything it trips over. Most of that is fallout from
//! one real mistake, so [`Diagnostics::filtered`] drops any diagnostic that
//! another one masks before anything is shown or turned into an error.

mod kind;
mod report;


use std::fmt;

use rowan::TextRange;

pub use kind::DiagnosticKind;
pub use report::Report;

/// A secondary location shown alongside a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    range: TextRange,
    message: String,
}

impl Note {
    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    /// Underlined in rendered output.
    range: TextRange,
    /// Lower-ranked diagnostics starting inside this range are masked.
    cover: TextRange,
    message: String,
    notes: Vec<Note>,
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    fn masks(&self, other: &Diagnostic) -> bool {
        let inside = self.cover.start() < other.range.start() && other.range.end() <= self.cover.end();
        if inside && self.kind.outranks(other.kind) {
            return true;
        }
        self.range.start() == other.range.start()
            && ((self.kind.is_missing() && other.kind.is_unclosed())
                || self.kind.outranks(other.kind))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = |r: TextRange| format!("{}..{}", u32::from(r.start()), u32::from(r.end()));
        write!(f, "{} @ {}", self.message, span(self.range))?;
        for note in &self.notes {
            write!(f, "; {} @ {}", note.message, span(note.range))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

#[must_use = "call .emit() to record the diagnostic"]
pub struct DiagnosticBuilder<'a> {
    sink: &'a mut Vec<Diagnostic>,
    diagnostic: Diagnostic,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a diagnostic whose message is the kind's summary until
    /// overridden on the builder.
    pub fn error(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            sink: &mut self.items,
            diagnostic: Diagnostic {
                kind,
                range,
                cover: range,
                message: kind.summary().to_owned(),
                notes: Vec::new(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Everything not masked by another diagnostic, in report order.
    ///
    /// Inputs are short and the parser reports once per position, so the
    /// pairwise scan stays small. A masked diagnostic masks nothing itself.
    pub fn filtered(&self) -> Vec<Diagnostic> {
        let mut hidden = vec![false; self.items.len()];
        for (i, a) in self.items.iter().enumerate() {
            for (j, b) in self.items.iter().enumerate() {
                if i != j && !hidden[i] && !hidden[j] && a.masks(b) {
                    hidden[j] = true;
                }
            }
        }
        self.items
            .iter()
            .zip(hidden)
            .filter_map(|(diag, hidden)| (!hidden).then(|| diag.clone()))
            .collect()
    }

    /// The diagnostic a failed compile reports: earliest surviving one,
    /// ties broken by rank.
    pub fn first_error(&self) -> Option<Diagnostic> {
        self.filtered()
            .into_iter()
            .min_by_key(|diag| (diag.range.start(), diag.kind))
    }

    pub fn report<'src>(&self, source: &'src str) -> Report<'src> {
        Report::new(self.items.clone(), source)
    }

    pub fn report_filtered<'src>(&self, source: &'src str) -> Report<'src> {
        Report::new(self.filtered(), source)
    }

    pub fn render(&self, source: &str) -> String {
        self.report(source).render()
    }

    pub fn render_filtered(&self, source: &str) -> String {
        self.report_filtered(source).render()
    }
}

impl DiagnosticBuilder<'_> {
    /// Folds `detail` into the kind's message.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.diagnostic.message = self.diagnostic.kind.describe(Some(&detail));
        self
    }

    /// Replaces the message outright.
    pub fn verbatim(mut self, message: impl Into<String>) -> Self {
        self.diagnostic.message = message.into();
        self
    }

    pub fn note(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.diagnostic.notes.push(Note {
            range,
            message: message.into(),
        });
        self
    }

    /// Widens the range this diagnostic masks others in.
    pub fn covering(mut self, cover: TextRange) -> Self {
        self.diagnostic.cover = cover;
        self
    }

    pub fn emit(self) {
        self.sink.push(self.diagnostic);
    }
}
