//! Command-line interface for cxxlex
//! This binary tokenizes and preprocesses C/C++ header files so the
//! results can be inspected without wiring up a full binding generator.
//!
//! Usage:
//!   cxxlex tokens `<path>` [--format `<format>`]                 - Dump the raw token stream
//!   cxxlex preprocess `<path>` [--define `<name[=body]>`]...     - Resolve conditionals and macros
//!   cxxlex text `<path>` [--define `<name[=body]>`]...           - Preprocess and print reconstructed text

use clap::{Arg, ArgAction, Command};

use cxxlex::cxx::{detokenize, Info, InfoTable, Token, TokenIndex, TokenKind, Tokenizer};

fn main() {
    let define = Arg::new("define")
        .long("define")
        .short('D')
        .help("Treat NAME as defined; NAME=BODY also makes it a macro")
        .value_name("NAME[=BODY]")
        .action(ArgAction::Append);
    let undef = Arg::new("undef")
        .long("undef")
        .short('U')
        .help("Treat NAME as undefined")
        .value_name("NAME")
        .action(ArgAction::Append);
    let path = Arg::new("path")
        .help("Path to the header file")
        .required(true)
        .index(1);
    let format = Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format ('simple' or 'json')")
        .default_value("simple");

    let matches = Command::new("cxxlex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting tokenized and preprocessed C/C++ headers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Dump the raw token stream of a header")
                .arg(path.clone())
                .arg(format.clone()),
        )
        .subcommand(
            Command::new("preprocess")
                .about("Dump the token stream after conditional and macro resolution")
                .arg(path.clone())
                .arg(format.clone())
                .arg(define.clone())
                .arg(undef.clone()),
        )
        .subcommand(
            Command::new("text")
                .about("Print the reconstructed text after preprocessing")
                .arg(path)
                .arg(define)
                .arg(undef),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            handle_tokens_command(path, format);
        }
        Some(("preprocess", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            handle_preprocess_command(path, format, &symbol_table(sub));
        }
        Some(("text", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            handle_text_command(path, &symbol_table(sub));
        }
        _ => unreachable!(),
    }
}

/// Build the symbol table from --define and --undef arguments.
fn symbol_table(matches: &clap::ArgMatches) -> InfoTable {
    let mut table = InfoTable::new();
    if let Some(defines) = matches.get_many::<String>("define") {
        for entry in defines {
            let info = match entry.split_once('=') {
                Some((name, body)) => Info::new(&[name])
                    .define(true)
                    .cpp_text(&format!("#define {} {}", name, body)),
                None => Info::new(&[entry.as_str()]).define(true),
            };
            table.put(info);
        }
    }
    if let Some(undefs) = matches.get_many::<String>("undef") {
        for name in undefs {
            table.put(Info::new(&[name.as_str()]).define(false));
        }
    }
    table
}

fn tokenize_file(path: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::from_file(std::path::Path::new(path)).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });
    tokenizer.tokenize()
}

fn print_tokens(tokens: &[Token], format: &str) {
    match format {
        "json" => {
            let output = serde_json::to_string_pretty(tokens).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            println!("{}", output);
        }
        "simple" => {
            for token in tokens {
                println!("{}\t{:?}\t{:?}", token.line, token.kind, token.text);
            }
        }
        other => {
            eprintln!("Unknown format: {}", other);
            std::process::exit(1);
        }
    }
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, format: &str) {
    print_tokens(&tokenize_file(path), format);
}

/// Handle the preprocess command
fn handle_preprocess_command(path: &str, format: &str, table: &InfoTable) {
    let index = TokenIndex::new(table, tokenize_file(path));
    print_tokens(&index.drain(), format);
}

/// Handle the text command
fn handle_text_command(path: &str, table: &InfoTable) {
    let index = TokenIndex::new(table, tokenize_file(path));
    let tokens: Vec<Token> = index
        .drain()
        .into_iter()
        .filter(|t| t.kind != TokenKind::Comment || !t.text.starts_with("// #"))
        .collect();
    print!("{}", detokenize(&tokens));
}
