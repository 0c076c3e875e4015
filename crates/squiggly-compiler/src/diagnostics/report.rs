//! Source-annotated rendering of diagnostics.

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostic;

pub struct Report<'src> {
    diagnostics: Vec<Diagnostic>,
    source: &'src str,
    origin: Option<&'src str>,
    renderer: Renderer,
}

impl<'src> Report<'src> {
    pub fn new(diagnostics: Vec<Diagnostic>, source: &'src str) -> Self {
        Self {
            diagnostics,
            source,
            origin: None,
            renderer: Renderer::plain(),
        }
    }

    /// Names where the filter came from, shown as `--> origin:line:col`.
    pub fn origin(mut self, origin: &'src str) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.renderer = if colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        self
    }

    pub fn render(&self) -> String {
        let blocks: Vec<String> = self
            .diagnostics
            .iter()
            .map(|diag| {
                let mut snippet = Snippet::source(self.source).line_start(1).annotation(
                    AnnotationKind::Primary
                        .span(self.caret(diag.range))
                        .label(&diag.message),
                );
                if let Some(origin) = self.origin {
                    snippet = snippet.path(origin);
                }
                for note in &diag.notes {
                    snippet = snippet.annotation(
                        AnnotationKind::Context
                            .span(self.caret(note.range))
                            .label(&note.message),
                    );
                }
                self.renderer
                    .render(&[Level::ERROR.primary_title(&diag.message).element(snippet)])
            })
            .collect();
        blocks.join("\n")
    }

    /// An empty range still gets one column of caret.
    fn caret(&self, range: TextRange) -> Range<usize> {
        let start = usize::from(range.start());
        let end = usize::from(range.end());
        if start == end {
            start..(start + 1).min(self.source.len())
        } else {
            start..end
        }
    }
}
