//! Generic tree visitor.
//!
//! One traversal, [`apply`], serves both expression trees and statement
//! trees. Passes supply the per-node operation and decide at each node
//! whether the walk descends into it:
//!
//! ```ignore
//! let mut calls = 0;
//! apply(root, &mut |stmt| {
//!     calls += 1;
//!     if stmt.must_emit() { Walk::Skip } else { Walk::Continue }
//! });
//! ```

use crate::{Vec, expr::Expr, stmt::Stmt};

/// Whether [`apply`] should descend into the node just visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Walk {
    /// Visit the node's subtrees next.
    Continue,
    /// Leave the subtrees out; the enclosing walk carries on.
    Skip,
}

/// Read access to the immediate subtrees of a node.
pub trait TreeView {
    /// Immediate subtrees in their natural order.
    fn subtrees(&self) -> Vec<&Self>;
}

impl<'a> TreeView for dyn Expr + 'a {
    fn subtrees(&self) -> Vec<&Self> {
        self.exprs()
    }
}

impl<'a> TreeView for dyn Stmt + 'a {
    fn subtrees(&self) -> Vec<&Self> {
        self.children()
    }
}

/// Visit `node` and, unless `op` returns [`Walk::Skip`], every subtree below
/// it, depth first and in natural order.
pub fn apply<N, F>(node: &N, op: &mut F)
where
    N: TreeView + ?Sized,
    F: FnMut(&N) -> Walk,
{
    if op(node) == Walk::Skip {
        return;
    }
    for child in node.subtrees() {
        apply(child, op);
    }
}

/// Run the expression operation `op` over every expression tree embedded in
/// any statement of `root`.
///
/// Statements are visited in the same order as [`apply`]; within a statement
/// its own expressions come before those of its children.
pub fn apply_exprs<F>(root: &dyn Stmt, op: &mut F)
where
    F: FnMut(&(dyn Expr + 'static)) -> Walk,
{
    apply(root, &mut |stmt| {
        for expr in stmt.exprs() {
            apply(expr, &mut *op);
        }
        Walk::Continue
    });
}
