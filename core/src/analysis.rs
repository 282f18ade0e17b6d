//! Queries over statement trees, all driven by [`crate::visitor`].

use brickc_values::{EvalAddr, VarId};
use hashbrown::HashSet;

use crate::{
    expr::{Expr, ExprEmit},
    stmt::Stmt,
    visitor::{Walk, apply, apply_exprs},
};

/// True if any expression in the tree reads or writes `var`.
pub fn uses_var(root: &dyn Stmt, var: VarId) -> bool {
    let mut found = false;
    apply_exprs(root, &mut |expr| {
        if found {
            return Walk::Skip;
        }
        found = expr.static_ea().and_then(EvalAddr::as_var) == Some(var);
        Walk::Continue
    });
    found
}

/// Every variable referenced anywhere in the tree.
pub fn collect_vars(root: &dyn Stmt) -> HashSet<VarId> {
    let mut vars = HashSet::new();
    apply_exprs(root, &mut |expr| {
        vars.extend(expr.static_ea().and_then(EvalAddr::as_var));
        Walk::Continue
    });
    vars
}

/// Number of statements in the tree, `root` included.
pub fn count_stmts(root: &dyn Stmt) -> usize {
    let mut count = 0;
    apply(root, &mut |_| {
        count += 1;
        Walk::Continue
    });
    count
}

/// True if every expression in the tree promises a constant value, so the
/// tree can be evaluated repeatedly without observable effects.
pub fn is_pure(root: &dyn Stmt) -> bool {
    let mut pure = true;
    apply_exprs(root, &mut |expr| {
        if !expr.promise_constant() {
            pure = false;
        }
        // Composite expressions already answer for their operands
        Walk::Skip
    });
    pure
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        Box, Rc,
        expr::{AtomExpr, BinaryExpr, RelExpr},
        loc::SourceLoc,
        stmt::{AssignStmt, BlockStmt, ExprStmt, WhileStmt},
        values::ValueKind,
        vm::{MathOp, Relation},
    };

    fn var(n: u16) -> Box<AtomExpr> {
        Box::new(AtomExpr::var(SourceLoc::UNKNOWN, VarId(n)))
    }

    fn num(n: i16) -> Box<AtomExpr> {
        Box::new(AtomExpr::constant(SourceLoc::UNKNOWN, n))
    }

    /// `while v0 < 10 { v1 = v1 + v2; v0 += 1 }`
    fn sample_loop() -> Rc<dyn Stmt> {
        let body: Vec<Rc<dyn Stmt>> = vec![
            AssignStmt::new(
                SourceLoc::at(2, 5),
                var(1),
                None,
                Box::new(BinaryExpr::new(SourceLoc::at(2, 10), MathOp::Add, var(1), var(2))),
            ),
            AssignStmt::new(SourceLoc::at(3, 5), var(0), Some(MathOp::Add), num(1)),
        ];
        WhileStmt::new(
            SourceLoc::at(1, 1),
            Box::new(RelExpr::new(SourceLoc::at(1, 7), Relation::Lt, var(0), num(10))),
            Some(BlockStmt::new(SourceLoc::at(1, 16), body)),
        )
    }

    #[test]
    fn test_uses_var() {
        let root = sample_loop();
        assert!(uses_var(&*root, VarId(0)));
        assert!(uses_var(&*root, VarId(2)));
        assert!(!uses_var(&*root, VarId(3)));
    }

    #[test]
    fn test_collect_vars() {
        let root = sample_loop();
        let mut vars: Vec<_> = collect_vars(&*root).into_iter().collect();
        vars.sort();
        assert_eq!(vars, vec![VarId(0), VarId(1), VarId(2)]);
    }

    #[test]
    fn test_count_stmts() {
        assert_eq!(count_stmts(&*sample_loop()), 4);
    }

    #[test]
    fn test_is_pure() {
        assert!(is_pure(&*sample_loop()));

        let roll = ExprStmt::new(
            SourceLoc::UNKNOWN,
            Box::new(AtomExpr::source(SourceLoc::UNKNOWN, ValueKind::Random, 6)),
        );
        let body: Vec<Rc<dyn Stmt>> = vec![sample_loop(), roll];
        let block = BlockStmt::new(SourceLoc::UNKNOWN, body);
        assert!(!is_pure(&*block));
    }
}
