use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cpu16_asm::listing::{fmt_row, fmt_row_json, header};
use cpu16_asm::{assemble_file, AsmConfig, AsmError, ListingFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble CPU16 source into a hex word file")]
struct Opts {
    /// Input assembly file (one instruction per line)
    #[arg(value_name = "INPUT", default_value = "input.asm")]
    input: PathBuf,
    /// Output hex file, one 4-digit word per line
    #[arg(short, long, default_value = "program.hex")]
    output: PathBuf,
    /// Listing format written to stdout
    #[arg(long, value_enum, default_value_t = ListingFormat::Text)]
    format: ListingFormat,
    /// Do not print the listing
    #[arg(short, long)]
    quiet: bool,
}

impl From<Opts> for AsmConfig {
    fn from(o: Opts) -> Self {
        AsmConfig {
            input: o.input,
            output: o.output,
            format: o.format,
            quiet: o.quiet,
        }
    }
}

fn run(cfg: &AsmConfig) -> Result<()> {
    let text = cfg.format == ListingFormat::Text && !cfg.quiet;
    if text {
        println!("Assembling '{}'...", cfg.input.display());
        println!("{}", header());
    }

    let mut json_err = None;
    let summary = assemble_file(cfg, |row| {
        if cfg.quiet {
            return;
        }
        match cfg.format {
            ListingFormat::Text => println!("{}", fmt_row(row)),
            ListingFormat::Json => match fmt_row_json(row) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    json_err.get_or_insert(e);
                }
            },
        }
    })?;
    if let Some(e) = json_err {
        return Err(e.into());
    }

    if text {
        println!("----------------------------------------------------");
        println!(
            "encoded {}, rejected {} -> {}",
            summary.encoded,
            summary.rejected,
            cfg.output.display()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cfg = AsmConfig::from(Opts::parse());
    match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err.downcast_ref::<AsmError>().map_or(1, AsmError::exit_code);
            ExitCode::from(code)
        }
    }
}
