// File: ./src/cli.rs
//! Command-line argument handling and help text for the `termcal` binary.
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    InitConfig,
    Convert { input: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub verbose: bool,
}

impl CliArgs {
    /// Parses everything after the binary name.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut command = None;
        let mut input = None;
        let mut output = None;
        let mut config = None;
        let mut root = None;
        let mut json = false;
        let mut verbose = false;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .map(PathBuf::from)
                    .ok_or_else(|| format!("Missing value for {}", flag))
            };
            match arg.as_str() {
                "-h" | "--help" | "help" => command = Some(Command::Help),
                "-o" | "--output" => output = Some(value(arg.as_str())?),
                "-c" | "--config" => config = Some(value(arg.as_str())?),
                "-r" | "--root" => root = Some(value(arg.as_str())?),
                "--json" => json = true,
                "-v" | "--verbose" => verbose = true,
                "convert" if command.is_none() => {
                    command = Some(Command::Convert {
                        input: PathBuf::new(),
                    })
                }
                "init-config" if command.is_none() => command = Some(Command::InitConfig),
                other if other.starts_with('-') => {
                    return Err(format!("Unknown option '{}'", other));
                }
                other if input.is_none() => input = Some(PathBuf::from(other)),
                other => return Err(format!("Unexpected argument '{}'", other)),
            }
        }

        let command = match command {
            Some(Command::Convert { .. }) => Command::Convert {
                input: input.ok_or("convert needs an HTML file")?,
            },
            Some(Command::Help) | None => Command::Help,
            Some(cmd) => {
                if let Some(extra) = input {
                    return Err(format!("Unexpected argument '{}'", extra.display()));
                }
                cmd
            }
        };

        Ok(Self {
            command,
            output,
            config,
            root,
            json,
            verbose,
        })
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Termcal v{} - Turn a weekly timetable page into an .ics calendar",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} convert <timetable.html> [OPTIONS]", binary_name);
    println!("    {} init-config [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -o, --output <file>   Write the calendar to a file instead of stdout.");
    println!("    -c, --config <file>   Use this config file instead of the default one.");
    println!("    -r, --root <path>     Use a different directory for config.");
    println!("    --json                Print {{\"ok\": ..., \"payload\"|\"error\": ...}} instead.");
    println!("    -v, --verbose         Debug logging on stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXAMPLES:");
    println!("    {} convert saved.html > timetable.ics", binary_name);
    println!("    {} convert saved.html -o autumn.ics -c autumn.toml", binary_name);
    println!();
    println!("CONFIG (config.toml):");
    println!("    anchor_week = 8               Week number of the anchor date");
    println!("    anchor_date = \"2024-09-23\"    Monday on which that week starts");
    println!("    location_prefix = \"Location: \"");
    println!("    timezone = \"Europe/London\"    Optional TZID for event times");
    println!("    payload_encoding = \"plain\"    or \"base64\"");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_convert_with_options() {
        let parsed = CliArgs::parse(&args(&["convert", "page.html", "-o", "out.ics", "--json"])).unwrap();
        assert_eq!(
            parsed.command,
            Command::Convert {
                input: PathBuf::from("page.html")
            }
        );
        assert_eq!(parsed.output, Some(PathBuf::from("out.ics")));
        assert!(parsed.json);
        assert!(!parsed.verbose);
    }

    #[test]
    fn test_no_args_is_help() {
        assert_eq!(CliArgs::parse(&[]).unwrap().command, Command::Help);
    }

    #[test]
    fn test_errors() {
        assert!(CliArgs::parse(&args(&["convert"])).is_err());
        assert!(CliArgs::parse(&args(&["convert", "a.html", "-o"])).is_err());
        assert!(CliArgs::parse(&args(&["convert", "a.html", "--bogus"])).is_err());
        assert!(CliArgs::parse(&args(&["init-config", "extra"])).is_err());
    }
}
