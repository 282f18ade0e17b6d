#[macro_use]
mod cases;

use brickc::vm::{Edge, EdgeKind, Instruction, MathOp, Relation};
use cases::*;
use pretty_assertions::assert_eq;

fn edges(code: &brickc::Code, pc: usize) -> Vec<(usize, EdgeKind)> {
    code.successors(pc).iter().map(|e: &Edge| (e.to, e.kind)).collect()
}

#[test]
fn test_while_control_flow() {
    // while v0 { v1 += 1 }
    let program = while_loop(var(0), update(1, MathOp::Add, num(1)));
    let code = compile(&*program);
    assert_eq!(code.len(), 3);

    let exit = code.len();
    let entry = 0;
    let body = 1;

    // The entry test leaves the loop when the condition is false and
    // otherwise falls into the body
    assert!(matches!(
        code.instructions[entry],
        Instruction::Test {
            rel: Relation::Eq,
            ..
        }
    ));
    assert_eq!(
        edges(&code, entry),
        vec![(body, EdgeKind::Fallthrough), (exit, EdgeKind::Taken)]
    );
    assert_eq!(edges(&code, body), vec![(2, EdgeKind::Fallthrough)]);
    assert_eq!(edges(&code, 2), vec![(entry, EdgeKind::Jump)]);
}

#[test]
fn test_while_runs_body_until_condition_fails() {
    // v0 = 5; while v0 { v0 -= 1; v1 += 2 }
    let program = block(vec![
        assign(0, num(5)),
        while_loop(
            var(0),
            block(vec![
                update(0, MathOp::Sub, num(1)),
                update(1, MathOp::Add, num(2)),
            ]),
        ),
    ]);
    let outcome = run(&*program);

    assert_eq!(outcome.vars[0], 0);
    assert_eq!(outcome.vars[1], 10);
    // set, then five rounds of test/sub/add/jmp and the final test
    assert_eq!(outcome.steps, 1 + 5 * 4 + 1);
}

#[test]
fn test_while_with_false_condition_skips_body() {
    let program = while_loop(num(0), assign(1, num(9)));
    let outcome = run(&*program);

    assert_eq!(outcome.vars[1], 0);
    assert_eq!(outcome.code.instructions[0], Instruction::Jump(brickc::vm::Label(1)));
    assert_eq!(outcome.steps, 1);
}

#[test]
fn test_loop_with_compound_condition() {
    // while v0 < 10 && v1 < 3 { v0 += 4; v1 += 1 }
    let program = while_loop(
        and(
            rel(Relation::Lt, var(0), num(10)),
            rel(Relation::Lt, var(1), num(3)),
        ),
        block(vec![
            update(0, MathOp::Add, num(4)),
            update(1, MathOp::Add, num(1)),
        ]),
    );
    let outcome = run(&*program);

    assert_eq!(outcome.vars[0], 12);
    assert_eq!(outcome.vars[1], 3);
}

#[test]
fn test_step_limit_catches_endless_loop() {
    let program = while_loop(num(1), update(0, MathOp::Add, num(1)));
    let code = compile(&*program);

    let options = brickc::ExecutionOptions {
        max_steps: 50,
        ..Default::default()
    };
    let err = brickc::Vm::new(&code, options).run().unwrap_err();
    assert_eq!(err, brickc::ExecutionError::StepLimit { limit: 50 });
}

program_case! {
    name: nested_loops_multiply,
    // v0 = 0; while v0 < 4 { v0 += 1; v1 = 0; while v1 < 3 { v1 += 1; v2 += 1 } }
    program: block(vec![
        while_loop(
            rel(Relation::Lt, var(0), num(4)),
            block(vec![
                update(0, MathOp::Add, num(1)),
                assign(1, num(0)),
                while_loop(
                    rel(Relation::Lt, var(1), num(3)),
                    block(vec![
                        update(1, MathOp::Add, num(1)),
                        update(2, MathOp::Add, num(1)),
                    ]),
                ),
            ]),
        ),
    ]),
    expect: { 0 => 4, 1 => 3, 2 => 12 },
}

program_case! {
    name: do_loop_runs_at_least_once,
    program: do_loop(update(0, MathOp::Add, num(1)), num(0)),
    expect: { 0 => 1 },
}

program_case! {
    name: do_loop_counts_down,
    // v0 = 3; do { v1 += v0; v0 -= 1 } while v0 > 0
    program: block(vec![
        assign(0, num(3)),
        do_loop(
            block(vec![
                update(1, MathOp::Add, var(0)),
                update(0, MathOp::Sub, num(1)),
            ]),
            rel(Relation::Gt, var(0), num(0)),
        ),
    ]),
    expect: { 0 => 0, 1 => 6 },
}

program_case! {
    name: if_else_inside_loop,
    // Sum of the even and odd numbers below 6, kept apart
    program: while_loop(
        rel(Relation::Lt, var(0), num(6)),
        block(vec![
            assign(3, math(MathOp::And, var(0), num(1))),
            if_else(
                var(3),
                update(2, MathOp::Add, var(0)),
                Some(update(1, MathOp::Add, var(0))),
            ),
            update(0, MathOp::Add, num(1)),
        ]),
    ),
    expect: { 1 => 0 + 2 + 4, 2 => 1 + 3 + 5 },
}
