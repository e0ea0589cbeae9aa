//! Public API for the Moa expression compiler.
//!
//! [`compile_source`] runs the whole pipeline on one source unit:
//! tokenize, parse, then compile to bytecode. The first failure aborts the
//! unit; no partial output is produced.
//!
//! # Example
//!
//! ```
//! use moa_core::api::{CompilationOptions, compile_source};
//! use moa_core::types::Type;
//!
//! let compilation = compile_source("1 + 2.5", "example.moa", &CompilationOptions::default())
//!     .unwrap();
//! assert_eq!(compilation.ty, Type::Float);
//! ```

pub mod options;

pub use options::CompilationOptions;

use tracing::debug;

use crate::ast::Expr;
use crate::compiler::{BytecodeCompiler, Compiled};
use crate::errors::Error;
use crate::lexer::tokenize;
use crate::parser::parse_with_max_depth;
use crate::types::Type;
use crate::vm::Bytecode;

/// Result of compiling one source unit.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub ast: Expr,
    /// Resolved type of the whole expression.
    pub ty: Type,
    pub bytecode: Bytecode,
}

pub fn compile_source(
    source: &str,
    file: &str,
    options: &CompilationOptions,
) -> Result<Compilation, Error> {
    let tokens = tokenize(source, file)?;
    let ast = parse_with_max_depth(tokens, file, options.max_depth)?;
    let Compiled { ty, code } = BytecodeCompiler::new()
        .with_debug(options.debug)
        .compile(&ast)?;
    let bytecode = code.build();

    debug!(file, %ty, bytes = bytecode.len(), debug = options.debug, "Compiled source");
    Ok(Compilation { ast, ty, bytecode })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, Phase};
    use crate::parser::DEFAULT_MAX_DEPTH;

    #[test]
    fn test_pipeline() {
        let compilation =
            compile_source("4 / 2", "api.moa", &CompilationOptions::default()).unwrap();
        assert_eq!(compilation.ty, Type::Float);
        assert_eq!(compilation.bytecode.len(), 9 + 1 + 9 + 1 + 1);
    }

    #[test]
    fn test_errors_carry_their_phase() {
        let options = CompilationOptions::default();
        let cases = [
            ("1 $ 2", ErrorKind::SyntaxError, Phase::Lexer),
            ("1 +", ErrorKind::SyntaxError, Phase::Parser),
            ("1.5 % 2", ErrorKind::TypeMismatchError, Phase::Compiler),
        ];
        for (source, kind, phase) in cases {
            let err = compile_source(source, "api.moa", &options).unwrap_err();
            assert_eq!((err.kind, err.phase), (kind, phase), "{}", source);
        }
    }

    /// Runs `f` on a thread with the default 2 MiB test stack.
    fn on_test_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(f)
            .unwrap()
            .join()
            .unwrap()
    }

    fn nested_parens(n: usize) -> String {
        format!("{}1{}", "(".repeat(n), ")".repeat(n))
    }

    fn right_nested_sum(levels: usize) -> String {
        format!("{}1{}", "(1 + ".repeat(levels), ")".repeat(levels))
    }

    #[test]
    fn test_default_depth_compiles() {
        let limit = DEFAULT_MAX_DEPTH;
        let sources = vec![
            nested_parens(limit),
            format!("1{}", " / 2".repeat(limit)),
            format!("1{}", " - 2.5".repeat(limit)),
            right_nested_sum(limit / 2),
        ];

        let results = on_test_stack(move || {
            sources
                .iter()
                .map(|source| {
                    let options = CompilationOptions {
                        debug: true,
                        ..Default::default()
                    };
                    compile_source(source, "deep.moa", &options).map(|c| c.ty)
                })
                .collect::<Vec<_>>()
        });
        assert_eq!(
            results,
            vec![Ok(Type::Int), Ok(Type::Float), Ok(Type::Float), Ok(Type::Int)]
        );
    }

    #[test]
    fn test_one_level_past_default_depth() {
        let limit = DEFAULT_MAX_DEPTH;
        let sources = vec![
            nested_parens(limit + 1),
            format!("1{}", " * 2".repeat(limit + 1)),
            format!("-{}", nested_parens(limit)),
        ];

        let kinds = on_test_stack(move || {
            sources
                .iter()
                .map(|source| {
                    compile_source(source, "deep.moa", &CompilationOptions::default())
                        .map(|_| ())
                        .map_err(|e| (e.kind, e.phase))
                })
                .collect::<Vec<_>>()
        });
        for result in kinds {
            assert_eq!(result, Err((ErrorKind::SyntaxError, Phase::Parser)));
        }
    }

    #[test]
    fn test_long_inputs_fail_without_exhausting_the_stack() {
        let sources = vec![
            format!("1{}", "+1".repeat(10_000)),
            format!("2.0{}", "*3".repeat(10_000)),
            nested_parens(10_000),
        ];

        let results = on_test_stack(move || {
            sources
                .iter()
                .map(|source| {
                    compile_source(source, "long.moa", &CompilationOptions::default())
                        .map(|_| ())
                        .map_err(|e| e.message)
                })
                .collect::<Vec<_>>()
        });
        let expected = format!(
            "Expression nesting depth exceeds maximum of {} levels",
            DEFAULT_MAX_DEPTH
        );
        for result in results {
            assert_eq!(result, Err(expected.clone()));
        }
    }

    #[test]
    fn test_max_depth_option() {
        let options = CompilationOptions {
            max_depth: 1,
            ..Default::default()
        };
        assert!(compile_source("(1)", "api.moa", &options).is_ok());
        assert!(compile_source("((1))", "api.moa", &options).is_err());
    }
}
