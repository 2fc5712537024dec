use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use ucd_tablegen::{build_case_folding_table, write_case_folding_table};

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} generate-<property> <ucd-dir>", program);
    eprintln!();
    eprintln!("Generates a static Rust table from Unicode Character Database files.");
    eprintln!("Supported properties:");
    eprintln!("  case-folding    reads <ucd-dir>/CaseFolding.txt");
    process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        usage(&args[0]);
    }
    let Some(property) = args[1].strip_prefix("generate-") else {
        usage(&args[0]);
    };
    let ucd_dir = Path::new(&args[2]);

    match property {
        "case-folding" => {
            // Build the full table before writing anything, so a parse
            // error can never leave a truncated table on stdout.
            let entries = match build_case_folding_table(ucd_dir) {
                Ok(entries) => entries,
                Err(e) => {
                    eprintln!("{}", e);
                    process::exit(1);
                }
            };
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if let Err(e) = write_case_folding_table(&mut out, &entries).and_then(|_| out.flush())
            {
                eprintln!("I/O error: {}", e);
                process::exit(1);
            }
        }
        // Other properties are accepted but have no generator yet.
        _ => {}
    }
}
