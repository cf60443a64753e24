//! Compiles a declarative dictionary source into a Rust seed module.
//!
//! ```text
//! generate-seeds <input.json> <output.rs> [--exclude a,b] [--allow-missing-parents] [--fn NAME]
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use dictionary_seeds::logic::codegen::{is_identifier, render_plan, source_digest, RenderOptions, DEFAULT_FUNCTION_NAME};
use dictionary_seeds::logic::compile::{compile_json, CompileOptions};
use dictionary_seeds::model::MissingParentPolicy;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "generate-seeds")]
#[command(about = "Compile a dictionary source into a Rust seed module")]
struct Cli {
    /// Declarative JSON source
    input: PathBuf,

    /// Rust file to write
    output: PathBuf,

    /// Sets to leave out, comma separated
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Store options whose parent is not defined at root level instead of failing
    #[arg(long)]
    allow_missing_parents: bool,

    /// Name of the generated plan function
    #[arg(long = "fn", value_name = "NAME", default_value = DEFAULT_FUNCTION_NAME, value_parser = parse_function_name)]
    function_name: String,
}

impl Cli {
    fn missing_parent(&self) -> MissingParentPolicy {
        if self.allow_missing_parents {
            MissingParentPolicy::TreatAsRoot
        } else {
            MissingParentPolicy::Fail
        }
    }

    fn excluded_sets(&self) -> Vec<String> {
        self.exclude
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn parse_function_name(value: &str) -> Result<String, String> {
    if is_identifier(value) {
        Ok(value.to_string())
    } else {
        Err(format!("'{}' is not a valid Rust function name", value))
    }
}

fn run(args: &Cli) -> Result<(usize, usize)> {
    let excluded = args.excluded_sets();
    let data = std::fs::read(&args.input).with_context(|| format!("failed to read {}", args.input.display()))?;
    let text = std::str::from_utf8(&data).with_context(|| format!("{} is not valid UTF-8", args.input.display()))?;

    let options = CompileOptions::default()
        .excluding(excluded.iter().cloned())
        .with_missing_parent(args.missing_parent());
    let compilation =
        compile_json(text, &options).with_context(|| format!("failed to compile {}", args.input.display()))?;

    for name in &compilation.implicit_sets {
        log::warn!("set '{}' was declared implicitly", name);
    }

    let render = RenderOptions {
        function_name: args.function_name.clone(),
        source_name: file_name(&args.input),
        source_digest: source_digest(&data),
        excluded_sets: excluded,
    };
    let code = render_plan(&compilation.plan, &render);

    std::fs::write(&args.output, code).with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok((compilation.set_count, compilation.option_count))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Usage errors exit with 1 like every other failure; help and version exit with 0
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok((sets, options)) => {
            println!(
                "Generated {} with {} sets and {} options",
                args.output.display(),
                sets,
                options
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
