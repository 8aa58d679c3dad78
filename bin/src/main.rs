use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use itertools::Itertools;

use interpreter::InterpretError;
use scanner::Token;

/// Evaluates Lox expressions, either from a file or line by line in a prompt.
#[derive(clap::Parser)]
struct Args {
    file: Option<PathBuf>,

    /// What to print for each input.
    #[arg(long, value_enum, default_value = "value")]
    emit: Emit,
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
enum Emit {
    Tokens,
    Ast,
    Value,
}

fn render(source: &str, emit: Emit) -> Result<String, InterpretError> {
    Ok(match emit {
        Emit::Tokens => scanner::scan(source)?.iter().map(Token::dump).join("\n"),
        Emit::Ast => parser::parse(scanner::scan(source)?)?.to_string(),
        Emit::Value => interpreter::run_source(source)?.to_string(),
    })
}

fn exit_code(error: &InterpretError) -> u8 {
    match error {
        InterpretError::Lex(_) | InterpretError::Parse(_) => 65,
        InterpretError::Runtime(_) => 70,
    }
}

fn run_file(path: PathBuf, emit: Emit) -> anyhow::Result<ExitCode> {
    log::debug!("Running {}", path.display());
    let source = std::fs::read_to_string(path)?;

    match render(&source, emit) {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}", e);
            Ok(ExitCode::from(exit_code(&e)))
        }
    }
}

fn run_prompt(emit: Emit) -> anyhow::Result<ExitCode> {
    loop {
        print!("> ");
        stdout().flush()?;

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(ExitCode::SUCCESS);
        }

        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        match render(line, emit) {
            Ok(output) => println!("{}", output),
            Err(e) => println!("{}", e),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    match args.file {
        Some(file) => run_file(file, args.emit),
        None => run_prompt(args.emit),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn renders_each_phase() {
        assert_eq!(render("-1.5", Emit::Tokens).unwrap(), "Minus - null\nNumber 1.5 1.5\nEof  null");
        assert_eq!(render("2 + 3 * 4", Emit::Ast).unwrap(), "(+ 2 (* 3 4))");
        assert_eq!(render("2 + 3 * 4", Emit::Value).unwrap(), "14");
    }

    #[test]
    fn ast_emission_does_not_evaluate() {
        assert_eq!(render("-\"x\"", Emit::Ast).unwrap(), "(- x)");
        assert!(render("-\"x\"", Emit::Value).is_err());
    }

    #[test]
    fn exit_codes() {
        let lex = render("@", Emit::Value).unwrap_err();
        let parse = render("(", Emit::Value).unwrap_err();
        let runtime = render("-nil", Emit::Value).unwrap_err();

        assert_eq!(exit_code(&lex), 65);
        assert_eq!(exit_code(&parse), 65);
        assert_eq!(exit_code(&runtime), 70);
    }

    #[test]
    fn args() {
        let args = Args::try_parse_from(["lox", "script.lox", "--emit", "ast"]).unwrap();
        assert_eq!(args.file, Some(PathBuf::from("script.lox")));
        assert_eq!(args.emit, Emit::Ast);

        let args = Args::try_parse_from(["lox"]).unwrap();
        assert_eq!(args.file, None);
        assert_eq!(args.emit, Emit::Value);
    }
}
