//! restyle CLI
//!
//! Scans CSS declarations, dumps tokens, rewrites stylesheets with the
//! bundled rules, and writes rule table assets.

use std::path::PathBuf;

use restyle::commands::{
    build_rules, dump_tokens, parse_scan_options, rewrite_file, scan_file, ScanOptions,
};

fn main() {
    restyle::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "scan" => {
            let (file, options) = collect_args(&args[2..]);
            let Some(file) = file else {
                eprintln!("Usage: restyle scan <file.css> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --rules=<file>      Rule table asset (default: bundled rules)");
                eprintln!("  --format=<fmt>      Output format: text, tsv");
                eprintln!("  -o <path>           Output file");
                std::process::exit(1);
            };
            scan_file(&file, &options)
        }
        "tokens" => {
            let (file, options) = collect_args(&args[2..]);
            let Some(file) = file else {
                eprintln!("Usage: restyle tokens <file.css> [--format=<fmt>] [-o <path>]");
                std::process::exit(1);
            };
            dump_tokens(&file, &options)
        }
        "rewrite" => {
            let (file, options) = collect_args(&args[2..]);
            let Some(file) = file else {
                eprintln!("Usage: restyle rewrite <file.css> [-o <path>] [--children=<path>]");
                std::process::exit(1);
            };
            rewrite_file(&file, &options)
        }
        "build-rules" => {
            let (_, options) = collect_args(&args[2..]);
            build_rules(&options).map(|(path, len)| {
                println!("wrote {len} bytes to '{}'", path.display());
            })
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("restyle {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Split arguments into the first positional file and merged options,
/// handling `-o <path>` specially (needs lookahead).
fn collect_args(args: &[String]) -> (Option<PathBuf>, ScanOptions) {
    let mut options = ScanOptions::default();
    let mut file = None;
    let mut i = 0;
    while i < args.len() {
        if args[i] == "-o" && i + 1 < args.len() {
            options.output = Some(PathBuf::from(&args[i + 1]));
            i += 2;
        } else if !args[i].starts_with('-') && file.is_none() {
            file = Some(PathBuf::from(&args[i]));
            i += 1;
        } else {
            let parsed = parse_scan_options(&args[i..=i]);
            options.merge(&parsed);
            i += 1;
        }
    }
    (file, options)
}

fn print_usage() {
    println!("restyle: CSS declaration scanner and rule rewriter");
    println!();
    println!("Usage: restyle <command> [options]");
    println!();
    println!("Commands:");
    println!("  scan <file.css>      List declarations and their resolved rules");
    println!("  tokens <file.css>    Tokenize and display tokens");
    println!("  rewrite <file.css>   Apply the bundled rules and print the result");
    println!("  build-rules -o <f>   Write the bundled rules as a table asset");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --rules=<file>      Rule table asset for scan (default: bundled rules)");
    println!("  --format=<fmt>      Output format for scan and tokens: text, tsv");
    println!("  -o <path>           Output file (default: stdout)");
    println!("  --children=<path>   Children declarations from rewrite (default: dropped)");
    println!();
    println!("Environment:");
    println!("  RESTYLE_LOG         Tracing filter, e.g. restyle_scan=trace");
    println!("  RUST_LOG            Fallback tracing filter");
    println!();
    println!("Examples:");
    println!("  restyle scan style.css");
    println!("  restyle scan style.css --rules=rules.bin --format=tsv");
    println!("  restyle rewrite style.css -o out.css");
    println!("  restyle rewrite style.css -o out.css --children=kids.css");
    println!("  restyle build-rules -o rules.bin");
}
