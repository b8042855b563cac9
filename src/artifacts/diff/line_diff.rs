//! Index-aligned line comparison
//!
//! Line `n` of one file is compared with line `n` of the other, nothing
//! more. There is no alignment step, so inserting a single line near the top
//! of a file reports every later line as changed.

use derive_new::new;

/// A line number where the two sides disagree
///
/// `None` on one side means that file has already ended.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LineChange<'t> {
    /// 1-based
    pub line: usize,
    pub left: Option<&'t str>,
    pub right: Option<&'t str>,
}

#[derive(Debug, Clone, new)]
pub struct LineDiff<'t> {
    left: &'t str,
    right: &'t str,
}

impl<'t> LineDiff<'t> {
    pub fn changes(&self) -> Vec<LineChange<'t>> {
        let mut left = self.left.lines();
        let mut right = self.right.lines();
        let mut changes = Vec::new();
        let mut line = 0;

        loop {
            line += 1;
            match (left.next(), right.next()) {
                (None, None) => break,
                (l, r) if l == r => {}
                (l, r) => changes.push(LineChange::new(line, l, r)),
            }
        }

        changes
    }
}
