#![allow(dead_code, unused_macros)]

use moa::{Compilation, CompilationOptions, Error, compile_source, disassemble};
use once_cell::sync::Lazy;

pub const FILE: &str = "case.moa";

pub fn compile(source: &str) -> Result<Compilation, Error> {
    compile_source(source, FILE, &CompilationOptions::default())
}

pub fn compile_debug(source: &str) -> Result<Compilation, Error> {
    let options = CompilationOptions {
        debug: true,
        ..Default::default()
    };
    compile_source(source, FILE, &options)
}

pub fn mnemonics(compilation: &Compilation) -> Vec<&'static str> {
    disassemble(&compilation.bytecode)
        .unwrap_or_else(|e| panic!("disassembly failed: {}", e))
        .mnemonics()
}

/// Syntactically valid expressions covering every operator, both literal
/// kinds, signs and nesting.
pub static VALID_EXPRESSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "0",
        "42",
        "2.5",
        ".5",
        "7.",
        "-3",
        "+3",
        "-2.5",
        "1 + 2",
        "1 - 2.5",
        "2.5 * 4",
        "4 / 2",
        "4.0 / 2.0",
        "7 % 3",
        "-(1 + 2) * 3",
        "4 * (10 + (4 - 5)) / 2.5",
        "1 / 2 / 3 / 4",
        "((((1))))",
        "1 + 2 * 3 - 4 / 5 * 1",
        "9223372036854775807 - 1",
        "1 +:\n 2",
        "\n\n  1.25 * -(3 - 0.5)\n",
    ]
});

/// Checks that `input` compiles to a value of type `ty` made of exactly the
/// instructions in `listing`, or fails with the given error kind and message.
macro_rules! compile_case {
    ($name:ident, input: $input:expr, ty: $ty:expr, listing: [$($mnemonic:literal),* $(,)?] $(,)?) => {
        #[test]
        fn $name() {
            let compilation = cases::compile($input)
                .unwrap_or_else(|e| panic!("compilation failed:\n{}", e.report()));
            assert_eq!(compilation.ty, $ty);
            pretty_assertions::assert_eq!(
                cases::mnemonics(&compilation),
                vec![$($mnemonic),*] as Vec<&str>
            );
        }
    };
    ($name:ident, input: $input:expr, error: ($kind:expr, $message:expr) $(,)?) => {
        #[test]
        fn $name() {
            let err = match cases::compile($input) {
                Ok(compilation) => panic!("expected an error, got {:?}", compilation.bytecode),
                Err(err) => err,
            };
            assert_eq!(err.kind, $kind);
            pretty_assertions::assert_eq!(err.message, $message);
        }
    };
}
