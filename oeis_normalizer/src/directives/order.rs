//! Directive-order validation as an explicit finite-state acceptor
//!
//! The one legal shape of an entry is
//!
//! ```text
//! I (S | ST | STU) N C* D* H* F* e* p* t* o* Y* K O? A? E*
//! ```
//!
//! The acceptor walks the directive codes line by line and rejects, never
//! repairs, any ordering violation. Each state transition below is an
//! auditable restatement of one alternative of the grammar.

use super::error::StructureError;
use super::{DirectiveCode, DirectiveLine};

/// The middle section of the grammar: repeatable directives in this fixed
/// relative order, each zero-or-more times.
const BODY_ORDER: [DirectiveCode; 9] = [
    DirectiveCode::Comment,
    DirectiveCode::Reference,
    DirectiveCode::Link,
    DirectiveCode::Formula,
    DirectiveCode::Example,
    DirectiveCode::MapleProgram,
    DirectiveCode::MathematicaProgram,
    DirectiveCode::OtherProgram,
    DirectiveCode::CrossReference,
];

fn body_rank(code: DirectiveCode) -> Option<usize> {
    BODY_ORDER.iter().position(|&c| c == code)
}

/// Acceptor state. `Body` and `Tail` carry the progress made so far:
/// `min_rank` is the lowest body rank still admissible, and the two tail
/// flags record whether `O` and `A` may still appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrderState {
    ExpectIdentification,
    ExpectSequence,
    AfterSequenceStart,
    AfterSequenceSecond,
    AfterSequenceThird,
    Body {
        min_rank: usize,
    },
    Tail {
        offset_allowed: bool,
        author_allowed: bool,
    },
}

impl OrderState {
    fn step(self, code: DirectiveCode) -> Option<OrderState> {
        use DirectiveCode as D;
        use OrderState::*;

        match (self, code) {
            (ExpectIdentification, D::Identification) => Some(ExpectSequence),
            (ExpectSequence, D::SequenceStart) => Some(AfterSequenceStart),
            (AfterSequenceStart, D::SequenceSecond) => Some(AfterSequenceSecond),
            (AfterSequenceStart, D::Name) => Some(Body { min_rank: 0 }),
            (AfterSequenceSecond, D::SequenceThird) => Some(AfterSequenceThird),
            (AfterSequenceSecond, D::Name) => Some(Body { min_rank: 0 }),
            (AfterSequenceThird, D::Name) => Some(Body { min_rank: 0 }),
            (Body { .. }, D::Keywords) => Some(Tail {
                offset_allowed: true,
                author_allowed: true,
            }),
            (Body { min_rank }, code) => match body_rank(code) {
                Some(rank) if rank >= min_rank => Some(Body { min_rank: rank }),
                _ => None,
            },
            (
                Tail {
                    offset_allowed: true,
                    ..
                },
                D::Offset,
            ) => Some(Tail {
                offset_allowed: false,
                author_allowed: true,
            }),
            (
                Tail {
                    author_allowed: true,
                    ..
                },
                D::Author,
            ) => Some(Tail {
                offset_allowed: false,
                author_allowed: false,
            }),
            (Tail { .. }, D::Extension) => Some(Tail {
                offset_allowed: false,
                author_allowed: false,
            }),
            _ => None,
        }
    }

    /// Accepting iff the mandatory `K` has been consumed.
    fn is_accepting(self) -> bool {
        matches!(self, OrderState::Tail { .. })
    }
}

/// Validate that the directive codes of `lines` spell a word of the entry
/// grammar. On failure, the error names the full code string and the
/// 0-based position of the first offending line (or the line count when
/// the input ended in a non-accepting state).
pub fn validate_order(lines: &[DirectiveLine]) -> Result<(), StructureError> {
    let order: String = lines.iter().map(|l| l.code.as_char()).collect();

    let mut state = OrderState::ExpectIdentification;
    for (position, line) in lines.iter().enumerate() {
        state = match state.step(line.code) {
            Some(next) => next,
            None => return Err(StructureError::out_of_order(order, position)),
        };
    }

    if state.is_accepting() {
        Ok(())
    } else {
        Err(StructureError::out_of_order(order, lines.len()))
    }
}
