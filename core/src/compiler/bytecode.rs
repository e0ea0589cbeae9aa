//! Bytecode compiler implementation.

use tracing::trace;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::errors::{Error, ErrorKind, Phase};
use crate::lexer::Token;
use crate::types::{Type, promote};
use crate::visitor::{ExtentVisitor, Visitor};
use crate::vm::{Codegen, ErrorData, Opcode};

/// Error type recorded for a division's divisor.
const DIVISION_FAULT: &str = "ZeroDivisionError";

/// A compiled subtree: its resolved type and its code.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub ty: Type,
    pub code: Codegen,
}

/// Compiles expression trees into instruction fragments.
///
/// With `debug` set, every division is preceded by an `ERROR_DATA` record
/// locating its divisor so a division by zero can be traced to source.
#[derive(Debug, Default)]
pub struct BytecodeCompiler {
    debug: bool,
}

impl BytecodeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn compile(&mut self, expr: &Expr) -> Result<Compiled, Error> {
        expr.accept(self)
    }

    fn divisor_context(divisor: &Expr) -> ErrorData {
        let span = ExtentVisitor::span(divisor);
        let token = divisor.token();
        if span.is_single_line() {
            ErrorData::new(
                DIVISION_FAULT,
                span.start_line,
                span.start_column,
                span.length(),
                &token.source_line,
                &token.file,
            )
        } else {
            ErrorData::new(
                DIVISION_FAULT,
                token.line,
                token.column,
                token.length,
                &token.source_line,
                &token.file,
            )
        }
    }
}

/// Instruction implementing `op` on two operands of type `ty`.
fn binary_opcode(op: BinaryOp, ty: Type) -> Option<Opcode> {
    match (op, ty) {
        (BinaryOp::Add, Type::Int) => Some(Opcode::IntAdd),
        (BinaryOp::Add, Type::Float) => Some(Opcode::FloatAdd),
        (BinaryOp::Sub, Type::Int) => Some(Opcode::IntSub),
        (BinaryOp::Sub, Type::Float) => Some(Opcode::FloatSub),
        (BinaryOp::Mul, Type::Int) => Some(Opcode::IntMul),
        (BinaryOp::Mul, Type::Float) => Some(Opcode::FloatMul),
        (BinaryOp::Div, _) => Some(Opcode::FloatDiv),
        (BinaryOp::Mod, Type::Int) => Some(Opcode::IntMod),
        (BinaryOp::Mod, Type::Float) => None,
    }
}

impl Visitor for BytecodeCompiler {
    type Output = Result<Compiled, Error>;

    fn visit_int(&mut self, value: i64, _token: &Token) -> Self::Output {
        let mut code = Codegen::new();
        code.int_push(value);
        Ok(Compiled { ty: Type::Int, code })
    }

    fn visit_float(&mut self, value: f64, _token: &Token) -> Self::Output {
        let mut code = Codegen::new();
        code.float_push(value);
        Ok(Compiled {
            ty: Type::Float,
            code,
        })
    }

    fn visit_unary(&mut self, op: UnaryOp, operand: &Expr, token: &Token) -> Self::Output {
        let Compiled { ty, mut code } = operand.accept(self)?;
        match (op, ty) {
            (UnaryOp::Plus, _) => {}
            (UnaryOp::Neg, Type::Int) => {
                code.int_neg();
            }
            (UnaryOp::Neg, Type::Float) => {
                code.float_neg();
            }
        }
        trace!(op = %op, %ty, line = token.line, column = token.column, "Resolved unary");
        Ok(Compiled { ty, code })
    }

    fn visit_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        token: &Token,
    ) -> Self::Output {
        let Compiled {
            ty: left_ty,
            code: mut left_code,
        } = left.accept(self)?;
        let Compiled {
            ty: right_ty,
            code: mut right_code,
        } = right.accept(self)?;

        let promotion = promote(op, left_ty, right_ty);
        let Some(opcode) = binary_opcode(op, promotion.operand) else {
            return Err(Error::new(
                ErrorKind::TypeMismatchError,
                format!(
                    "Invalid binary operation '{}' for types {} and {}",
                    op, left_ty, right_ty
                ),
                token.location(),
                Phase::Compiler,
            )
            .with_trail(vec!["BinaryExpression.compile"]));
        };

        if promotion.convert_left {
            left_code.int_float();
        }
        if promotion.convert_right {
            right_code.int_float();
        }

        let mut code = left_code;
        code.extend(&right_code);
        if op == BinaryOp::Div && self.debug {
            code.error_data(&Self::divisor_context(right));
        }
        code.emit(opcode);

        trace!(
            op = %op,
            left = %left_ty,
            right = %right_ty,
            ty = %promotion.operand,
            line = token.line,
            column = token.column,
            "Resolved binary"
        );
        Ok(Compiled {
            ty: promotion.operand,
            code,
        })
    }
}
