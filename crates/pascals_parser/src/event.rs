// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! The parser records what it recognized as a flat list of events. A failed parse
//! throws the events away, so every list that reaches [`process`] is balanced.

use crate::{output::Output, SyntaxKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    /// Opens a node. Matched by a later `Finish`.
    Start { kind: SyntaxKind },
    Finish,
    /// Consumes the next input token.
    Token { kind: SyntaxKind },
}

pub(super) fn process(events: Vec<Event>) -> Output {
    let mut res = Output::default();
    for event in events {
        match event {
            Event::Start { kind } => res.enter_node(kind),
            Event::Finish => res.leave_node(),
            Event::Token { kind } => res.token(kind),
        }
    }
    res
}
