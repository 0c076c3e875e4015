//! Text rendering of the syntax tree, one element per line.

use std::fmt::Write;

use rowan::{NodeOrToken, WalkEvent};

use super::Parse;
use super::cst::SyntaxElement;

/// Prints `Kind` for nodes and `Kind "text"` for tokens, children indented
/// under their parent. Whitespace and spans are opt-in.
pub struct CstPrinter<'p> {
    parse: &'p Parse,
    trivia: bool,
    spans: bool,
}

impl<'p> CstPrinter<'p> {
    pub fn new(parse: &'p Parse) -> Self {
        Self {
            parse,
            trivia: false,
            spans: false,
        }
    }

    pub fn with_trivia(mut self, trivia: bool) -> Self {
        self.trivia = trivia;
        self
    }

    pub fn with_spans(mut self, spans: bool) -> Self {
        self.spans = spans;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut depth = 0;
        for event in self.parse.syntax().preorder_with_tokens() {
            match event {
                WalkEvent::Enter(element) => {
                    if self.shows(&element) {
                        self.line(&mut out, depth, &element);
                    }
                    depth += 1;
                }
                WalkEvent::Leave(_) => depth -= 1,
            }
        }
        out
    }

    fn shows(&self, element: &SyntaxElement) -> bool {
        self.trivia || !element.kind().is_trivia()
    }

    fn line(&self, out: &mut String, depth: usize, element: &SyntaxElement) {
        write!(out, "{:indent$}{:?}", "", element.kind(), indent = depth * 2)
            .expect("String write never fails");
        if self.spans {
            let range = element.text_range();
            write!(out, " [{}..{}]", u32::from(range.start()), u32::from(range.end()))
                .expect("String write never fails");
        }
        if let NodeOrToken::Token(token) = element {
            write!(out, " {:?}", token.text()).expect("String write never fails");
        }
        out.push('\n');
    }
}
