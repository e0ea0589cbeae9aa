use std::path::PathBuf;

use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use moa::{
    CompilationOptions, DebugVisitor, Error, TreePrinter, compile_source, default_output_path,
    disassemble, read_source, render_error, tokenize,
};
use tracing::info;

/// moac - Moa expression compiler
#[derive(Parser, Debug)]
#[command(name = "moac")]
#[command(about = "Compile Moa expressions to Moa VM bytecode", long_about = None)]
struct Args {
    /// Path to the Moa source file
    source: PathBuf,

    /// Path to the output file (defaults to the source path with a .mvm extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug mode (emit source records before every division)
    #[arg(short, long)]
    debug: bool,

    /// Print the token stream (for debugging)
    #[arg(long)]
    debug_tokens: bool,

    /// Print the parsed AST (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Print a disassembly of the emitted bytecode
    #[arg(long)]
    disassemble: bool,

    /// Render errors with source snippets and colors
    #[arg(long)]
    fancy: bool,
}

fn report_and_exit(error: &Error, source: &str, fancy: bool) -> ! {
    if fancy {
        render_error(error, source);
    } else {
        eprintln!("{}", error.report());
    }
    std::process::exit(1);
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let file = args.source.display().to_string();
    let source = match read_source(&args.source) {
        Ok(source) => source,
        Err(e) => report_and_exit(&e, "", args.fancy),
    };

    if args.debug_tokens {
        // Lexing errors are reported by the compilation below.
        if let Ok(tokens) = tokenize(&source, &file) {
            println!("=== Tokens ===");
            for token in &tokens {
                println!("at {}:{} {}", token.line, token.column, token);
            }
            println!();
        }
    }

    let options = CompilationOptions {
        debug: args.debug,
        ..Default::default()
    };
    let compilation = match compile_source(&source, &file, &options) {
        Ok(compilation) => compilation,
        Err(e) => report_and_exit(&e, &source, args.fancy),
    };

    if args.debug_parse {
        println!("=== Parsed AST ===");
        print!("{}", TreePrinter::render(&compilation.ast));
        println!("{}", DebugVisitor::render(&compilation.ast));
        println!();
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.source));
    std::fs::write(&output, &*compilation.bytecode)
        .into_diagnostic()
        .wrap_err_with(|| format!("Cannot write '{}'", output.display()))?;
    info!(
        output = %output.display(),
        bytes = compilation.bytecode.len(),
        ty = %compilation.ty,
        "Wrote bytecode"
    );

    if args.disassemble {
        let listing = disassemble(&compilation.bytecode)
            .into_diagnostic()
            .wrap_err("Emitted bytecode does not disassemble")?;
        println!("=== Disassembly ({}) ===", compilation.ty);
        print!("{}", listing);
    }

    Ok(())
}
