use x_lang::compiler::Compiler;
use x_lang::error::Result;
use x_lang::interpreter::{self, RunStatus};

use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    let code = match dispatch(&args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error);
            1
        }
    };

    process::exit(code);
}

fn dispatch(args: &[String]) -> Result<i32> {
    match args {
        [_, mode, input, output] if mode.as_str() == "compile" => compile(input, output),
        [_, mode, input] if mode.as_str() == "run" => run(input),
        _ => {
            eprintln!("usage: x compile <input.x> <output.cpp> | x run <input.x>");
            Ok(2)
        }
    }
}

fn compile(input: &str, output: &str) -> Result<i32> {
    let source = fs::read_to_string(input)?;

    let mut compiler = Compiler::new();
    match compiler.compile(&source) {
        Some(unit) => {
            fs::write(output, unit)?;
            Ok(0)
        }
        None => {
            eprintln!("{}", compiler.diagnostics());
            Ok(1)
        }
    }
}

fn run(input: &str) -> Result<i32> {
    let source = fs::read_to_string(input)?;

    match interpreter::run(&source)? {
        RunStatus::Success => Ok(0),
        RunStatus::Failure => Ok(1),
    }
}
