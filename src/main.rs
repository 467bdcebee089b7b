//! CLI tool to validate, inspect, and resolve `.env` files.

use std::collections::BTreeMap;
use std::fs;
use std::process::ExitCode;

use envfile_rs::{Loader, TokenKind, parse_strict, tokenize};

fn usage() {
    eprintln!("Usage: envfile <command> [options] [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  check   Strictly validate .env file(s)");
    eprintln!("  print   Load file(s) in order and print the resolved variables");
    eprintln!("  tokens  Print the token stream of .env file(s)");
    eprintln!();
    eprintln!("Options (print):");
    eprintln!("  --overload  Later files replace variables set by earlier ones");
    eprintln!("  --strict    Stop at the first file with a syntax error");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  envfile check .env");
    eprintln!("  envfile print .env .env.local --overload");
    eprintln!("  envfile tokens .env");
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        usage();
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let mut overload = false;
    let mut strict = false;
    let mut files = Vec::new();
    for arg in &args[2..] {
        match arg.as_str() {
            "--overload" => overload = true,
            "--strict" => strict = true,
            _ => files.push(arg.as_str()),
        }
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let ok = match command {
        "check" => check(&files),
        "print" => print(&files, overload, strict),
        "tokens" => tokens(&files),
        _ => {
            eprintln!("Unknown command: {command}");
            return ExitCode::from(2);
        }
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn check(files: &[&str]) -> bool {
    let mut ok = true;
    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                ok = false;
                continue;
            }
        };

        let result = parse_strict(&content);
        match result.error {
            None => eprintln!("{path}: valid ({} variable(s))", result.entries.len()),
            Some(e) => {
                eprintln!("{path}: {e}");
                ok = false;
            }
        }
    }
    ok
}

fn print(files: &[&str], overload: bool, strict: bool) -> bool {
    let mut env: BTreeMap<String, String> = BTreeMap::new();
    let result = Loader::new()
        .paths(files)
        .overwrite(overload)
        .strict(strict)
        .load_into(&mut env);

    for (key, value) in &env {
        println!("{key}={value}");
    }

    match result {
        Ok(report) => {
            eprintln!(
                "{} file(s), {} loaded, {} skipped",
                report.files_read, report.loaded, report.skipped_existing
            );
            true
        }
        Err(e) => {
            eprintln!("{e}");
            false
        }
    }
}

fn tokens(files: &[&str]) -> bool {
    let mut ok = true;
    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                ok = false;
                continue;
            }
        };

        println!("# {path}");
        for token in tokenize(&content) {
            if token.kind == TokenKind::Illegal {
                ok = false;
            }
            println!("{token}");
        }
    }
    ok
}
