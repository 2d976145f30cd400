use anyhow::{Context, Result};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs;
use termcal::cli::{CliArgs, Command, print_help};
use termcal::config::Config;
use termcal::context::{AppContext, StandardContext};

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .build();
    // Logs go to stderr so stdout stays a clean .ics stream.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn load_config(args: &CliArgs, ctx: &dyn AppContext) -> Result<Config> {
    if let Some(path) = &args.config {
        return Config::load_from_path(path);
    }
    match Config::load(ctx) {
        Ok(cfg) => Ok(cfg),
        Err(e) if Config::is_missing_config_error(&e) => {
            log::info!("No config file found, using built-in defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

fn main() -> Result<()> {
    let raw: Vec<String> = env::args().collect();
    let binary_name = raw.first().map(String::as_str).unwrap_or("termcal");

    let args = match CliArgs::parse(raw.get(1..).unwrap_or_default()) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Run '{} --help' for usage.", binary_name);
            std::process::exit(2);
        }
    };
    init_logging(args.verbose);

    let ctx = StandardContext::new(args.root.clone());

    match &args.command {
        Command::Help => {
            print_help(binary_name);
            Ok(())
        }
        Command::InitConfig => {
            let path = ctx.get_config_file_path()?;
            if path.exists() {
                anyhow::bail!("Config file already exists: {}", path.display());
            }
            Config::default().save(&ctx)?;
            println!("Wrote default config to {}", path.display());
            Ok(())
        }
        Command::Convert { input } => {
            let config = load_config(&args, &ctx)?;
            let converter = config.converter()?;
            let html = fs::read_to_string(input)
                .with_context(|| format!("Failed to read '{}'", input.display()))?;

            let result = converter.run(&html);
            let text = if args.json {
                serde_json::to_string_pretty(&result)?
            } else if let Some(payload) = result.payload.clone() {
                payload
            } else {
                anyhow::bail!(result.error.unwrap_or_default());
            };

            match &args.output {
                Some(path) => {
                    fs::write(path, &text)
                        .with_context(|| format!("Failed to write '{}'", path.display()))?;
                    log::info!("Calendar written to {}", path.display());
                }
                None => print!("{}", text),
            }

            if !result.ok {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
