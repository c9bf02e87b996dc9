//! entity-synonyms CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;

use entity_synonyms::cli::args::EntitySynonymsArgs;
use entity_synonyms::cli::commands::execute_command;

fn main() {
    let args = EntitySynonymsArgs::parse();

    Builder::new()
        .filter_level(args.log_level())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
