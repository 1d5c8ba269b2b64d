// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use crate::SyntaxKind;

/// Output of the parser: a pre-order walk of the parse tree. The `n`-th
/// `Step::Token` stands for the `n`-th input token.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Output {
    steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Enter { kind: SyntaxKind },
    Token { kind: SyntaxKind },
    Exit,
}

impl Output {
    pub fn iter(&self) -> impl Iterator<Item = Step> + '_ {
        self.steps.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn token(&mut self, kind: SyntaxKind) {
        self.steps.push(Step::Token { kind });
    }

    pub(crate) fn enter_node(&mut self, kind: SyntaxKind) {
        self.steps.push(Step::Enter { kind });
    }

    pub(crate) fn leave_node(&mut self) {
        self.steps.push(Step::Exit);
    }
}
