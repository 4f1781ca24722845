//! Command-line interface for searchq
//! This binary parses query strings and prints the resulting token sequence
//! in different formats, mainly for inspecting what the grammar does with a
//! given input.
//!
//! Usage:
//!   searchq parse `<query>` [--format `<format>`]         - Parse a full query
//!   searchq rule `<name>` `<input>` [--format `<format>`] - Parse from a named grammar rule

use clap::{Arg, Command};
use std::io::Read;

use searchq::query::{parse, parse_rule, ParseRuleError, StartRule, SyntaxError};

fn main() {
    let matches = Command::new("searchq")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting parses of search query strings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse a query into its token sequence")
                .arg(
                    Arg::new("query")
                        .help("The query string; use - to read it from stdin")
                        .required(true)
                        .index(1),
                )
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("rule")
                .about("Parse from a named grammar rule")
                .arg(
                    Arg::new("name")
                        .help("Rule name (e.g. 'Pair', 'Operator')")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("input")
                        .help("The input string; use - to read it from stdin")
                        .required(true)
                        .index(2),
                )
                .arg(format_arg()),
        )
        .get_matches();

    // Handle subcommands
    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let query = parse_matches.get_one::<String>("query").unwrap();
            let format = parse_matches.get_one::<String>("format").unwrap();
            handle_parse_command(&read_input(query), format);
        }
        Some(("rule", rule_matches)) => {
            let name = rule_matches.get_one::<String>("name").unwrap();
            let input = rule_matches.get_one::<String>("input").unwrap();
            let format = rule_matches.get_one::<String>("format").unwrap();
            handle_rule_command(name, &read_input(input), format);
        }
        _ => unreachable!(),
    }
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format: 'json', 'yaml', or 'debug'")
        .default_value("json")
}

/// Handle the parse command
fn handle_parse_command(input: &str, format: &str) {
    match parse(input) {
        Ok(tokens) => print_serialized(&tokens, format),
        Err(err) => report_syntax_error(&err),
    }
}

/// Handle the rule command
fn handle_rule_command(name: &str, input: &str, format: &str) {
    match parse_rule(input, name) {
        Ok(value) => print_serialized(&value, format),
        Err(ParseRuleError::Syntax(err)) => report_syntax_error(&err),
        Err(ParseRuleError::UnknownRule(err)) => {
            let known: Vec<&str> = StartRule::names().collect();
            eprintln!("Error: {}", err);
            eprintln!("  known rules: {}", known.join(", "));
            std::process::exit(1);
        }
    }
}

fn print_serialized<T: serde::Serialize + std::fmt::Debug>(value: &T, format: &str) {
    let output = match format {
        "json" => serde_json::to_string_pretty(value).unwrap_or_else(|e| {
            eprintln!("Serialization error: {}", e);
            std::process::exit(1);
        }),
        "yaml" => serde_yaml::to_string(value).unwrap_or_else(|e| {
            eprintln!("Serialization error: {}", e);
            std::process::exit(1);
        }),
        "debug" => format!("{:#?}", value),
        other => {
            eprintln!("Unknown format: {}", other);
            std::process::exit(1);
        }
    };
    println!("{}", output);
}

fn report_syntax_error(err: &SyntaxError) {
    eprintln!("Error: {}", err);
    eprintln!("  at {}", err.location);
    std::process::exit(1);
}

fn read_input(arg: &str) -> String {
    if arg != "-" {
        return arg.to_string();
    }
    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        eprintln!("Error reading stdin: {}", e);
        std::process::exit(1);
    }
    // the shell's trailing newline is not part of the query
    buffer
        .trim_end_matches(|c| c == '\n' || c == '\r')
        .to_string()
}
