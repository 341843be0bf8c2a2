use std::{
    fs::read_to_string,
    io::{self, Read},
    path::{Path, PathBuf},
    process::exit,
};

use clap::{ArgAction, Parser};
use milner_checker::{context::Ctx, prelude};
use tracing_subscriber::EnvFilter;

mod program;

use program::Program;

/// Infers the types of a program given as a JSON tree.
#[derive(Parser, Debug)]
#[command(name = "milner", version)]
struct Cli {
    /// JSON file with the program, `-` reads it from stdin.
    file: PathBuf,

    /// Start from an empty environment instead of the builtin prelude.
    #[arg(long)]
    no_prelude: bool,

    /// Log unification steps (-v) or every inferred node (-vv) to stderr.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::from_default_env(),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(file: &Path) -> io::Result<String> {
    if file.as_os_str() == "-" {
        let mut code = String::new();
        io::stdin().read_to_string(&mut code)?;
        Ok(code)
    } else {
        read_to_string(file)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_name = cli.file.display().to_string();

    let json = read_input(&cli.file).unwrap_or_else(|err| {
        eprintln!("[error]: cannot read '{file_name}': {err}");
        exit(1)
    });

    let program = Program::from_json(&json).unwrap_or_else(|err| {
        eprintln!("[error]: '{file_name}' is not a valid program: {err}");
        exit(1)
    });

    let mut ctx = if cli.no_prelude {
        Ctx::new()
    } else {
        prelude::context()
    };

    match program.check(&mut ctx) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("{}", program.render_error(&err, &file_name));
            exit(1)
        }
    }
}
