use std::io::{self, BufRead};

use enfa_compiler::Compiler;
use enfa_runtime::Renumbering;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "re [--debug] [--renumber=bfs|sorted|none] PATTERN";

#[derive(Debug)]
struct Args {
    debug: bool,
    renumbering: Option<Renumbering>,
    pattern: String,
}

fn parse_args() -> Result<Args, String> {
    let mut debug = false;
    let mut renumbering = Some(Renumbering::Reachability);
    let mut positional = vec![];

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--debug" | "-d" => debug = true,
            "--renumber=bfs" => renumbering = Some(Renumbering::Reachability),
            "--renumber=sorted" => renumbering = Some(Renumbering::SortedById),
            "--renumber=none" => renumbering = None,
            _ if arg.starts_with("--") => return Err(USAGE.to_string()),
            _ => positional.push(arg),
        }
    }

    match <[String; 1]>::try_from(positional) {
        Ok([pattern]) => Ok(Args {
            debug,
            renumbering,
            pattern,
        }),
        Err(_) => Err(USAGE.to_string()),
    }
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = parse_args()?;
    let compilation = Compiler::default()
        .with_renumbering(args.renumbering)
        .compile_traced(&args.pattern)
        .map_err(|e| e.to_string())?;

    if args.debug {
        println!(
            "DEBUG
--------
{}
--------
",
            compilation
        )
    }

    let input = io::stdin();
    for line in input.lock().lines() {
        match line {
            Ok(line) if enfa_runtime::accepts(&compilation.nfa, &line) => println!("{}", line),
            Ok(_) => continue,
            Err(e) => return Err(format!("{}", e)),
        }
    }

    Ok(())
}
