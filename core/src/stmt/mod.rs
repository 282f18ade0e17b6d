//! Statement nodes.
//!
//! Statements are shared as `Rc<dyn Stmt>` so that each one can hold a weak
//! back-reference to the statement that owns it. The owning parent is the
//! only strong holder; the back-reference is set once, while the parent is
//! being built (see [`adopting`]), and never changes afterwards.

mod control;
mod shape;
mod simple;


use core::cell::{Cell, OnceCell};
use core::fmt;

use tracing::trace;

use crate::{
    Rc, Vec, Weak,
    compiler::InstructionSink,
    expr::Expr,
    loc::SourceLoc,
    mapping::Mapping,
};

pub use control::{DoStmt, IfStmt, WhileStmt};
pub use shape::{Pair, Single};
pub use simple::{AssignStmt, BlockStmt, ExprStmt};

/// State every statement carries.
pub struct StmtBase {
    loc: Cell<SourceLoc>,
    must_emit: Cell<bool>,
    parent: OnceCell<Weak<dyn Stmt>>,
}

impl StmtBase {
    pub fn new(loc: SourceLoc) -> Self {
        Self {
            loc: Cell::new(loc),
            must_emit: Cell::new(false),
            parent: OnceCell::new(),
        }
    }

    fn is_adopted(&self) -> bool {
        self.parent.get().is_some()
    }
}

impl fmt::Debug for StmtBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The parent is left out; printing it would recurse back down here.
        f.debug_struct("StmtBase")
            .field("loc", &self.loc.get())
            .field("must_emit", &self.must_emit.get())
            .field("adopted", &self.is_adopted())
            .finish()
    }
}

/// A statement kind.
///
/// Every method here is a hook for [`StmtExt`]; the fixed entry points
/// (`emit`, `clone_mapped`) live there.
pub trait Stmt: fmt::Debug {
    fn base(&self) -> &StmtBase;

    /// Owned child statements in execution order.
    fn children(&self) -> Vec<&(dyn Stmt + 'static)>;

    /// This statement's own expressions, not those of its children.
    fn exprs(&self) -> Vec<&(dyn Expr + 'static)> {
        Vec::new()
    }

    fn emit_actual(&self, b: &mut dyn InstructionSink);

    /// Build a parentless deep copy with `mapping` applied to every
    /// expression in the subtree.
    fn clone_actual(&self, mapping: Option<&Mapping>) -> Rc<dyn Stmt>;
}

/// Fixed entry points for statements. Implemented for every [`Stmt`].
pub trait StmtExt: Stmt {
    fn loc(&self) -> SourceLoc {
        self.base().loc.get()
    }

    fn set_location(&self, loc: SourceLoc) {
        self.base().loc.set(loc);
    }

    /// The statement that owns this one, if it has been adopted and the
    /// owner is still alive.
    fn parent(&self) -> Option<Rc<dyn Stmt>> {
        self.base().parent.get()?.upgrade()
    }

    /// True if `other` is a strict ancestor of this statement.
    fn is_descendant_of(&self, other: &dyn Stmt) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if core::ptr::addr_eq(Rc::as_ptr(&node), other) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// True if dead-code elimination must keep this statement.
    fn must_emit(&self) -> bool {
        self.base().must_emit.get()
    }

    fn set_must_emit(&self, must_emit: bool) {
        self.base().must_emit.set(must_emit);
    }

    fn emit(&self, b: &mut dyn InstructionSink) {
        b.set_source_loc(self.loc());
        trace!(loc = %self.loc(), "emitting statement");
        self.emit_actual(b);
    }

    /// Deep copy of the subtree, with `mapping` substituted throughout.
    ///
    /// The copy has no parent and shares nothing with the original.
    fn clone_mapped(&self, mapping: Option<&Mapping>) -> Rc<dyn Stmt> {
        let copy = self.clone_actual(mapping);
        copy.set_location(self.loc());
        copy.set_must_emit(self.must_emit());
        copy
    }
}

impl<T: Stmt + ?Sized> StmtExt for T {}

/// Make `child` an owned child of `parent` and return the handle to store.
///
/// A statement belongs to one parent for its whole life. If `child` already
/// has one, a parentless deep copy is adopted in its place and returned.
pub fn adopt_child(parent: &Weak<dyn Stmt>, child: Rc<dyn Stmt>) -> Rc<dyn Stmt> {
    let child = if child.base().is_adopted() {
        trace!(loc = %child.loc(), "child already owned, adopting a copy");
        child.clone_mapped(None)
    } else {
        child
    };
    // A fresh copy or a parentless node, so the cell is empty
    let _ = child.base().parent.set(parent.clone());
    child
}

/// Build a statement that adopts children during construction.
///
/// `build` receives the weak handle of the statement being created, to pass
/// to [`Single::new`], [`Pair::new`] or [`adopt_child`].
pub fn adopting<S: Stmt + 'static>(build: impl FnOnce(&Weak<dyn Stmt>) -> S) -> Rc<S> {
    Rc::new_cyclic(|me: &Weak<S>| {
        let me: Weak<dyn Stmt> = me.clone();
        build(&me)
    })
}
