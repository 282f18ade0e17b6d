//! Child layouts shared by statement kinds.
//!
//! Statements without children simply return nothing from
//! [`Stmt::children`](super::Stmt::children).

use crate::{Rc, Vec, Weak};

use super::{Stmt, adopt_child};

/// At most one child, such as a loop body.
///
/// A body that already belongs to another statement is copied, not shared.
#[derive(Debug)]
pub struct Single {
    body: Option<Rc<dyn Stmt>>,
}

impl Single {
    pub fn new(parent: &Weak<dyn Stmt>, body: Option<Rc<dyn Stmt>>) -> Self {
        Self {
            body: body.map(|body| adopt_child(parent, body)),
        }
    }

    pub fn body(&self) -> Option<&Rc<dyn Stmt>> {
        self.body.as_ref()
    }

    pub fn children(&self) -> Vec<&(dyn Stmt + 'static)> {
        self.body.iter().map(|body| &**body).collect()
    }
}

/// A required primary child and an optional secondary one, such as the two
/// arms of a conditional. Children already owned elsewhere are copied.
#[derive(Debug)]
pub struct Pair {
    primary: Rc<dyn Stmt>,
    secondary: Option<Rc<dyn Stmt>>,
}

impl Pair {
    pub fn new(
        parent: &Weak<dyn Stmt>,
        primary: Rc<dyn Stmt>,
        secondary: Option<Rc<dyn Stmt>>,
    ) -> Self {
        Self {
            primary: adopt_child(parent, primary),
            secondary: secondary.map(|stmt| adopt_child(parent, stmt)),
        }
    }

    pub fn primary(&self) -> &Rc<dyn Stmt> {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&Rc<dyn Stmt>> {
        self.secondary.as_ref()
    }

    pub fn children(&self) -> Vec<&(dyn Stmt + 'static)> {
        let mut out: Vec<&(dyn Stmt + 'static)> = Vec::with_capacity(2);
        out.push(&*self.primary);
        out.extend(self.secondary.as_deref());
        out
    }
}
