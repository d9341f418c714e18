//! Generates the man page from the CLI definition.

use std::path::PathBuf;

use clap::CommandFactory;

#[path = "src/cli_args.rs"]
#[allow(dead_code)]
mod cli_args;

fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli_args.rs");

    let out_dir = match std::env::var_os("OUT_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => return Ok(()),
    };

    let cmd = cli_args::Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer)?;
    std::fs::write(out_dir.join("shadesmith.1"), buffer)?;

    Ok(())
}
