use super::Type;
use crate::ast::BinaryOp;

/// How two operands are brought to a common representation.
///
/// `convert_left`/`convert_right` mark operands that need an int-to-float
/// conversion right after their own code. `operand` is the type both
/// operands have once converted, which is also the result type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Promotion {
    pub convert_left: bool,
    pub convert_right: bool,
    pub operand: Type,
}

/// Decides how the operands of `op` meet.
///
/// Division always works on Float. Every other operator stays Int only
/// when both sides are Int; otherwise the Int side is widened.
pub fn promote(op: BinaryOp, left: Type, right: Type) -> Promotion {
    match op {
        BinaryOp::Div => Promotion::widen(left, right),
        _ => Promotion::unify(left, right),
    }
}

impl Promotion {
    fn unify(left: Type, right: Type) -> Self {
        match (left, right) {
            (Type::Int, Type::Int) => Self::none(Type::Int),
            (Type::Float, Type::Float) => Self::none(Type::Float),
            (Type::Int, Type::Float) => Self {
                convert_left: true,
                convert_right: false,
                operand: Type::Float,
            },
            (Type::Float, Type::Int) => Self {
                convert_left: false,
                convert_right: true,
                operand: Type::Float,
            },
        }
    }

    fn widen(left: Type, right: Type) -> Self {
        Self {
            convert_left: left == Type::Int,
            convert_right: right == Type::Int,
            operand: Type::Float,
        }
    }

    fn none(operand: Type) -> Self {
        Self {
            convert_left: false,
            convert_right: false,
            operand,
        }
    }
}
