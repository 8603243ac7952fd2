use std::process::exit;

use clap::Parser;
use inventory_graph::{cmd::{run, ToolOpts}, logging::init_logging};

fn main() {
    init_logging();
    let opts = ToolOpts::parse();

    match run(&opts) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') && !output.is_empty() {
                println!();
            }
        }
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    }
}
