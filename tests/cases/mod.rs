//! Tree-building shorthands and a compile-and-run harness shared by the
//! integration tests.
#![allow(dead_code)]

use std::rc::Rc;

use brickc::expr::{AtomExpr, BinaryExpr, Expr, LogicalExpr, LogicalOp, NotExpr, RelExpr};
use brickc::stmt::{AssignStmt, BlockStmt, DoStmt, ExprStmt, IfStmt, Stmt, WhileStmt};
use brickc::vm::{Code, Machine, MathOp, Relation, Vm};
use brickc::{Bytecode, CompileOptions, ExecutionOptions, SourceLoc, ValueKind, VarId};

pub const NO_LOC: SourceLoc = SourceLoc::UNKNOWN;

pub fn var(n: u16) -> Box<dyn Expr> {
    Box::new(AtomExpr::var(NO_LOC, VarId(n)))
}

pub fn num(n: i16) -> Box<dyn Expr> {
    Box::new(AtomExpr::constant(NO_LOC, n))
}

pub fn source(kind: ValueKind, data: i16) -> Box<dyn Expr> {
    Box::new(AtomExpr::source(NO_LOC, kind, data))
}

pub fn math(op: MathOp, lhs: Box<dyn Expr>, rhs: Box<dyn Expr>) -> Box<dyn Expr> {
    Box::new(BinaryExpr::new(NO_LOC, op, lhs, rhs))
}

pub fn rel(rel: Relation, lhs: Box<dyn Expr>, rhs: Box<dyn Expr>) -> Box<dyn Expr> {
    Box::new(RelExpr::new(NO_LOC, rel, lhs, rhs))
}

pub fn and(lhs: Box<dyn Expr>, rhs: Box<dyn Expr>) -> Box<dyn Expr> {
    Box::new(LogicalExpr::new(NO_LOC, LogicalOp::And, lhs, rhs))
}

pub fn or(lhs: Box<dyn Expr>, rhs: Box<dyn Expr>) -> Box<dyn Expr> {
    Box::new(LogicalExpr::new(NO_LOC, LogicalOp::Or, lhs, rhs))
}

pub fn not(operand: Box<dyn Expr>) -> Box<dyn Expr> {
    Box::new(NotExpr::new(NO_LOC, operand))
}

/// `v{dst} = value`
pub fn assign(dst: u16, value: Box<dyn Expr>) -> Rc<dyn Stmt> {
    AssignStmt::new(NO_LOC, var(dst), None, value)
}

/// `v{dst} op= value`
pub fn update(dst: u16, op: MathOp, value: Box<dyn Expr>) -> Rc<dyn Stmt> {
    AssignStmt::new(NO_LOC, var(dst), Some(op), value)
}

pub fn eval(expr: Box<dyn Expr>) -> Rc<dyn Stmt> {
    ExprStmt::new(NO_LOC, expr)
}

pub fn block(body: Vec<Rc<dyn Stmt>>) -> Rc<dyn Stmt> {
    BlockStmt::new(NO_LOC, body)
}

pub fn while_loop(cond: Box<dyn Expr>, body: Rc<dyn Stmt>) -> Rc<dyn Stmt> {
    WhileStmt::new(NO_LOC, cond, Some(body))
}

pub fn do_loop(body: Rc<dyn Stmt>, cond: Box<dyn Expr>) -> Rc<dyn Stmt> {
    DoStmt::new(NO_LOC, Some(body), cond)
}

pub fn if_else(
    cond: Box<dyn Expr>,
    then: Rc<dyn Stmt>,
    otherwise: Option<Rc<dyn Stmt>>,
) -> Rc<dyn Stmt> {
    IfStmt::new(NO_LOC, cond, then, otherwise)
}

/// Variables after a program ran, along with what it compiled to.
pub struct Outcome {
    pub code: Code,
    pub vars: Vec<i16>,
    pub steps: usize,
}

pub fn compile(program: &dyn Stmt) -> Code {
    Bytecode::compile(program, CompileOptions::default()).unwrap()
}

pub fn run_with(program: &dyn Stmt, machine: Machine) -> Outcome {
    let options = ExecutionOptions::default();
    let num_vars = options.num_vars;
    let code = compile(program);

    let (vars, steps) = {
        let mut vm = Vm::new(&code, options).with_machine(machine);
        let steps = vm.run().unwrap();
        let vars = (0..num_vars as u16).map(|n| vm.var(VarId(n))).collect();
        (vars, steps)
    };

    Outcome { code, vars, steps }
}

pub fn run(program: &dyn Stmt) -> Outcome {
    run_with(program, Machine::default())
}

/// Declares a test that compiles `program`, runs it from all-zero variables
/// and checks the listed variables afterwards.
#[allow(unused_macros)]
macro_rules! program_case {
    (
        name: $name:ident,
        program: $program:expr,
        expect: { $($var:literal => $value:expr),* $(,)? } $(,)?
    ) => {
        #[test]
        fn $name() {
            let program: std::rc::Rc<dyn brickc::stmt::Stmt> = $program;
            let outcome = cases::run(&*program);
            $(
                pretty_assertions::assert_eq!(outcome.vars[$var], $value, "v{}", $var);
            )*
        }
    };
}
