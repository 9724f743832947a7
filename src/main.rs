use clap::Parser;
use std::process;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use linguee::env::{generate_env_docs, EnvConfig};
use linguee::{LingueeError, TranslateRequest, Translator};

#[derive(Parser, Debug)]
#[command(version, about = "Look words up on linguee.com and print the result as JSON")]
struct Cli {
    /// Word or phrase to look up
    #[arg(required_unless_present = "env_docs")]
    query: Option<String>,

    /// Source language code, e.g. PT
    #[arg(short, long, default_value = "pt")]
    src: String,

    /// Destination language code, e.g. EN
    #[arg(short, long, default_value = "en")]
    dst: String,

    /// Let the dictionary pick the translation direction
    #[arg(short, long)]
    guess_direction: bool,

    /// Do not follow spelling suggestions
    #[arg(long)]
    no_correction: bool,

    /// Print pretty JSON
    #[arg(short, long)]
    pretty: bool,

    /// List supported environment variables and exit
    #[arg(long)]
    env_docs: bool,
}

fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if cli.env_docs {
        print!("{}", generate_env_docs());
        return;
    }

    let config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("linguee={}", config.log_level)))
        .with_writer(std::io::stderr)
        .init();

    let cache = match config.build_cache() {
        Ok(cache) => cache,
        Err(e) => {
            error!("Unable to open the cache at {}: {}", config.cache_path.display(), e);
            process::exit(1);
        }
    };
    debug!("Using {:?} cache", config.cache_backend);

    let translator = Translator::new(config.translator_options(), cache);
    let mut request = TranslateRequest::new(
        cli.query.as_deref().unwrap_or_default(),
        &cli.src,
        &cli.dst,
    );
    request.guess_direction = cli.guess_direction;
    request.allow_correction = !cli.no_correction;

    match translator.translate(&request) {
        Ok(response) => print_json(&response, cli.pretty),
        Err(e) => {
            print_json(&e, cli.pretty);
            process::exit(exit_code(&e));
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: unable to serialize output: {}", e);
            process::exit(1);
        }
    }
}

fn exit_code(error: &LingueeError) -> i32 {
    match error.status_code() {
        400 => 2,
        404 | 302 => 3,
        _ => 1,
    }
}
