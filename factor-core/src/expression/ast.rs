use std::mem;

/// Parsed form of a free expression.
///
/// Percent literals do not survive parsing: `5%` is already `Number(0.05)`.
/// A long operator chain such as `1+1+...+1` nests on the left as deep as
/// it is long, so dropping a tree never recurses.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Identifier(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Expr {
    pub(crate) fn unary(
        op: UnaryOp,
        operand: Expr,
    ) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub(crate) fn binary(
        op: BinaryOp,
        lhs: Expr,
        rhs: Expr,
    ) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_children(&mut node, &mut pending);
        }
    }
}

/// Moves the children of `expr` into `pending`, leaving leaves behind.
fn detach_children(
    expr: &mut Expr,
    pending: &mut Vec<Expr>,
) {
    match expr {
        Expr::Number(_) | Expr::Identifier(_) => {}
        Expr::Unary { operand, .. } => {
            pending.push(mem::replace(operand.as_mut(), Expr::Number(0.0)));
        }
        Expr::Binary { lhs, rhs, .. } => {
            pending.push(mem::replace(lhs.as_mut(), Expr::Number(0.0)));
            pending.push(mem::replace(rhs.as_mut(), Expr::Number(0.0)));
        }
        Expr::Call { args, .. } => pending.append(args),
    }
}
