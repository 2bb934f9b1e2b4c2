mod error;

use std::{
    fs,
    io::{self, Read},
    process::exit,
};

use clap::{Args, Parser, Subcommand};
use error::Error;
use pipeplate::{
    ProcessorOptions, PropsResolver, Spanned, TemplateError, TemplateProcessor, diagnostics,
    parse, tokenize,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Render and inspect templates
#[derive(Parser, Debug)]
#[command(name = "pipeplate", author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand a template
    Render {
        /// Path to template, `-` reads stdin
        path: String,
        /// JSON file with the variables
        #[arg(long)]
        vars: Option<String>,
        /// Fail on variables resolving to nothing
        #[arg(long)]
        strict: bool,
        /// Separator used when printing lists
        #[arg(long)]
        separator: Option<String>,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Print the tokens of a template as JSON
    Tokens {
        /// Path to template, `-` reads stdin
        path: String,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Print the syntax tree of a template as JSON
    Ast {
        /// Path to template, `-` reads stdin
        path: String,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Check that a template parses
    Check {
        /// Path to template, `-` reads stdin
        path: String,
        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args, Debug)]
struct OptionArgs {
    /// TOML file with processor options
    #[arg(long)]
    config: Option<String>,
    /// Block open marker
    #[arg(long)]
    open: Option<String>,
    /// Block close marker
    #[arg(long)]
    close: Option<String>,
}

impl OptionArgs {
    /// Options from the config file, overridden by the command line
    fn load(&self) -> Result<ProcessorOptions, Error> {
        let mut options: ProcessorOptions = match &self.config {
            Some(path) => toml::from_str(&read(path)?)?,
            None => ProcessorOptions::default(),
        };

        if let Some(open) = &self.open {
            options.tokenize.open_block_marker = open.clone();
        }

        if let Some(close) = &self.close {
            options.tokenize.close_block_marker = close.clone();
        }

        debug!(?options, "loaded options");

        Ok(options)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(code) => exit(code),
        Err(err) => {
            eprintln!("{err}");
            exit(2);
        }
    }
}

async fn run(command: Command) -> Result<i32, Error> {
    match command {
        Command::Render {
            path,
            vars,
            strict,
            separator,
            options,
        } => {
            let source = read(&path)?;

            let mut options = options.load()?;
            options.strict_var_resolve |= strict;
            if let Some(separator) = separator {
                options.list_separator = separator;
            }

            let vars: serde_json::Value = match vars {
                Some(vars) => serde_json::from_str(&read(&vars)?)?,
                None => serde_json::Value::Object(Default::default()),
            };

            let processor = TemplateProcessor::with_resolver(PropsResolver::from(vars), options);

            match processor.process(&source).await {
                Ok(output) => {
                    print!("{output}");
                    Ok(0)
                }
                Err(err) => report(&err, &path, &source),
            }
        }
        Command::Tokens { path, options } => {
            let source = read(&path)?;

            match tokenize(&source, &options.load()?.tokenize) {
                Ok(tokens) => {
                    println!("{}", serde_json::to_string_pretty(&tokens)?);
                    Ok(0)
                }
                Err(err) => report(&err, &path, &source),
            }
        }
        Command::Ast { path, options } => {
            let source = read(&path)?;

            match parse(&source, &options.load()?.tokenize) {
                Ok(ast) => {
                    println!("{}", serde_json::to_string_pretty(&ast)?);
                    Ok(0)
                }
                Err(err) => report(&err, &path, &source),
            }
        }
        Command::Check { path, options } => {
            let source = read(&path)?;

            match parse(&source, &options.load()?.tokenize) {
                Ok(_) => Ok(0),
                Err(err) => report(&err, &path, &source),
            }
        }
    }
}

fn read(path: &str) -> Result<String, Error> {
    if path == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .map_err(|err| Error::Io(format!("stdin: {err}")))?;
        return Ok(input);
    }

    fs::read_to_string(path).map_err(|err| Error::Io(format!("{path}: {err}")))
}

fn report(err: &Spanned<TemplateError>, path: &str, source: &str) -> Result<i32, Error> {
    let report = diagnostics::render(err, path, source)
        .map_err(|err| Error::Report(err.to_string()))?;

    eprint!("{report}");

    Ok(1)
}
