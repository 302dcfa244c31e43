use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use log::info;
use schema2msg::generator::{render_class, Target};
use schema2msg::{build_contract, contract_name_from_path};

#[derive(Parser, Debug)]
#[command(name = "cw-msggen", version)]
#[command(
    about = "Generate message constructors from the JSON schemas of a CosmWasm contract",
    long_about = None
)]
struct Cli {
    /// Contract directory, e.g. ./terraswap/contracts/terraswap_pair
    contract_dir: Option<PathBuf>,
    /// Name of the generated class, derived from the contract directory when omitted
    #[arg(long)]
    name: Option<String>,
    /// Language of the generated code (python or rust)
    #[arg(long, default_value_t = Target::Python)]
    target: Target,
}

/// Accepts the single-dash `-help` spelling as well
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| if arg == "-help" { OsString::from("--help") } else { arg })
        .collect()
}

fn class_name(contract_dir: &Path) -> Result<String> {
    let canonical = contract_dir
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", contract_dir.display()))?;
    Ok(contract_name_from_path(contract_dir).or_else(|_| contract_name_from_path(&canonical))?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    let Some(contract_dir) = cli.contract_dir else {
        Cli::command().print_help()?;
        return Ok(());
    };
    if !contract_dir.is_dir() {
        bail!("contract directory {} does not exist", contract_dir.display());
    }

    let name = match cli.name {
        Some(name) => name,
        None => match class_name(&contract_dir) {
            Ok(name) => name,
            Err(err) => {
                eprintln!("error: {:#}\n\n{}", err, Cli::command().render_usage());
                process::exit(2);
            }
        },
    };
    info!("generating {} for {}", cli.target, name);

    let class = build_contract(&name, &contract_dir);
    print!("{}", render_class(&class, cli.target));
    Ok(())
}
