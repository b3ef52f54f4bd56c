use std::fs;
use std::process;

use clap::clap_app;

fn main() {
    let matches = clap_app!(hexagony =>
        (version: "0.1.0")
        (@arg grid: -g [N] "Prints an empty hex grid of side-length N")
        (@arg FILE: "Path to a source file to run")
        (@arg debug: -d "Prints diagnostics when a breakpoint-flagged instruction runs")
        (@arg diag: -D "Prints diagnostics after every program tick")
    )
    .get_matches();
    // Check for grid argument
    if let Some(s) = matches.value_of("grid") {
        match s.parse() {
            Ok(size) => print!("{}", hexagony::source_template(size)),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
        return;
    }
    // Choose highest debug level that has a flag set
    let debug_level = match (matches.is_present("debug"), matches.is_present("diag")) {
        (_, true) => 2,
        (true, false) => 1,
        (false, false) => 0,
    };
    let path = match matches.value_of("FILE") {
        Some(path) => path,
        None => {
            eprintln!("No filename specified.");
            process::exit(1);
        }
    };
    let src = match fs::read_to_string(path) {
        Ok(src) => src,
        Err(e) => {
            eprintln!("Error opening file: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = hexagony::run(&src, debug_level) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
