//! Command-line front-end: fix files (or stdin) in place, to a chosen
//! output, or as a dry run.

use std::env;
use std::fs;
use std::io::{self, Read, Write};

use crate::{Options, Repair, loads_relaxed};

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} FILE [FILE ...] [OPTIONS]\n\
         \n\
         Fix 'almost JSON' files with trailing commas, comments, smart quotes, and more.\n\
         \n\
         FILE: one or more JSON files. Use '-' for stdin.\n\
         \n\
         Options:\n\
           -o, --output FILE   Output file (default: overwrite input). Use '-' for stdout.\n\
           -v, --verbose       Show repairs made.\n\
           -b, --backup        Create FILE.bak before overwriting.\n\
               --dry-run       Show what would change without writing.\n\
               --version       Print version and exit.\n\
           -h, --help          Show this help.\n",
        prog = program
    );
}

struct CliArgs {
    files: Vec<String>,
    output: Option<String>,
    verbose: bool,
    backup: bool,
    dry_run: bool,
}

enum Parsed {
    Run(CliArgs),
    Exit(i32),
}

fn parse_args(program: &str, args: &[String]) -> Parsed {
    let mut files = Vec::new();
    let mut output = None;
    let mut verbose = false;
    let mut backup = false;
    let mut dry_run = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help(program);
                return Parsed::Exit(0);
            }
            "--version" => {
                println!("{} {}", program, env!("CARGO_PKG_VERSION"));
                return Parsed::Exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: missing FILE for --output");
                    return Parsed::Exit(1);
                }
                output = Some(args[i].clone());
            }
            "-v" | "--verbose" => verbose = true,
            "-b" | "--backup" => backup = true,
            "--dry-run" => dry_run = true,
            "-" => files.push("-".to_string()),
            s if s.starts_with('-') => {
                eprintln!("Error: unknown option: {}", s);
                return Parsed::Exit(1);
            }
            path => files.push(path.to_string()),
        }
        i += 1;
    }

    if files.is_empty() {
        print_help(program);
        return Parsed::Exit(1);
    }
    if output.is_some() && files.len() > 1 {
        eprintln!("Error: --output can only be used with a single input file");
        return Parsed::Exit(1);
    }
    Parsed::Run(CliArgs {
        files,
        output,
        verbose,
        backup,
        dry_run,
    })
}

fn read_input(path: &str) -> io::Result<(String, String)> {
    if path == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        return Ok((content, "<stdin>".to_string()));
    }
    Ok((fs::read_to_string(path)?, path.to_string()))
}

fn report_repairs(display_name: &str, repairs: &[Repair]) {
    if repairs.is_empty() {
        eprintln!("No changes needed in {}", display_name);
        return;
    }
    eprintln!("Fixed {} issue(s) in {}:", repairs.len(), display_name);
    for r in repairs {
        eprintln!("  Line {}: {}", r.line, r.message);
    }
}

fn process_file(path: &str, args: &CliArgs) -> bool {
    let (content, display_name) = match read_input(path) {
        Ok(pair) => pair,
        Err(e) => {
            match e.kind() {
                io::ErrorKind::NotFound => eprintln!("Error: File not found: {}", path),
                io::ErrorKind::PermissionDenied => {
                    eprintln!("Error: Permission denied: {}", path)
                }
                _ => eprintln!("Error reading {}: {}", path, e),
            }
            return false;
        }
    };

    let (value, repairs) = match loads_relaxed(&content, &Options::default()) {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Error parsing {}: {}", display_name, e);
            return false;
        }
    };
    let mut fixed = match serde_json::to_string_pretty(&value) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing {}: {}", display_name, e);
            return false;
        }
    };

    if args.verbose {
        report_repairs(&display_name, &repairs);
    }
    if args.dry_run {
        if !repairs.is_empty() {
            eprintln!("Would fix {} issue(s) in {}", repairs.len(), display_name);
        }
        return true;
    }

    let to_stdout =
        args.output.as_deref() == Some("-") || (path == "-" && args.output.is_none());
    if to_stdout {
        // No trailing newline on stdout.
        if let Err(e) = io::stdout().write_all(fixed.as_bytes()) {
            eprintln!("Error writing to stdout: {}", e);
            return false;
        }
        return true;
    }

    fixed.push('\n');
    let dest = args.output.as_deref().unwrap_or(path);
    let overwriting_in_place = args.output.is_none() || args.output.as_deref() == Some(path);
    if args.backup && overwriting_in_place && fs::metadata(dest).is_ok() {
        let backup_path = format!("{}.bak", dest);
        if let Err(e) = fs::copy(dest, &backup_path) {
            eprintln!("Error writing to {}: {}", backup_path, e);
            return false;
        }
    }
    if let Err(e) = fs::write(dest, fixed) {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                eprintln!("Error: Permission denied writing to: {}", dest)
            }
            _ => eprintln!("Error writing to {}: {}", dest, e),
        }
        return false;
    }
    true
}

/// Entry point for the `jsonfix` binary; returns the process exit code
/// (0 when every file succeeded, 1 otherwise).
pub fn run() -> i32 {
    let argv: Vec<String> = env::args().collect();
    let program = argv
        .first()
        .map(|p| {
            p.rsplit(['/', '\\'])
                .next()
                .unwrap_or("jsonfix")
                .to_string()
        })
        .unwrap_or_else(|| "jsonfix".to_string());
    let rest = argv.get(1..).unwrap_or(&[]);
    let args = match parse_args(&program, rest) {
        Parsed::Run(a) => a,
        Parsed::Exit(code) => return code,
    };

    let mut success = true;
    for file in &args.files {
        if !process_file(file, &args) {
            success = false;
        }
    }
    if success { 0 } else { 1 }
}
