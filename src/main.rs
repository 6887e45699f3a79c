use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{debug, info};
use std::path::PathBuf;

use funcmap::config::Config;
use funcmap::config_loader::{self, CliOverrides};
use funcmap::funcs::{FuncMap, Value};
use funcmap::{ip, rng};

/// Template helpers for IP address arithmetic
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the shared random source
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Call a helper with string arguments
    Call {
        /// Helper name, e.g. ip4_inc
        name: String,

        /// Helper arguments, in template order
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Apply an ip_math expression to an address
    Math {
        /// Expression, e.g. "_._.[+1].[R]"
        expression: String,

        /// Address to transform
        address: String,

        /// Fail on the first skipped step
        #[arg(long)]
        strict: bool,
    },

    /// List registered helpers
    List,
}

fn render(value: &Value, json: bool) -> Result<String> {
    if json {
        serde_json::to_string(value).wrap_err("Failed to serialize result")
    } else {
        Ok(value.to_string())
    }
}

impl Cli {
    /// Command-line settings that take precedence over the configuration file
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            seed: self.seed,
            log_level: self.log_level.clone(),
            strict: matches!(self.command, Command::Math { strict: true, .. }),
        }
    }
}

fn run(cli: &Cli, config: &Config, funcs: &FuncMap) -> Result<String> {
    match &cli.command {
        Command::Call { name, args } => {
            let args: Vec<Value> = args.iter().map(|a| Value::from(a.as_str())).collect();
            let value = funcs
                .call(name, &args)
                .wrap_err_with(|| format!("Helper '{}' failed", name))?;
            render(&value, cli.json)
        }
        Command::Math { expression, address, .. } => {
            let text = if config.strict {
                ip::ip_math_strict(expression, address)
                    .wrap_err_with(|| format!("ip_math '{}' on '{}'", expression, address))?
            } else {
                ip::ip_math(expression, address)
            };
            render(&Value::Str(text), cli.json)
        }
        Command::List => {
            let names: Vec<String> = funcs.names().map(String::from).collect();
            if cli.json {
                render(&Value::Strs(names), true)
            } else {
                Ok(names.join("\n"))
            }
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config_loader::load_config(path)?,
        None => Config::default(),
    };
    config_loader::apply_overrides(&mut config, &cli.overrides())?;

    // Initialize logging with default filter level of "warn"
    let level = config.log_level.clone().unwrap_or_else(|| "warn".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Some(path) = &cli.config {
        info!("Configuration file: {:?}", path);
    }
    if let Some(seed) = config.seed {
        rng::reseed(seed);
    }

    let funcs = config.func_map()?;
    debug!("{} helpers registered", funcs.len());

    let output = run(&cli, &config, &funcs)?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["funcmap", "call", "ip4_inc", "0", "-1", "0.0.0.0"]);
        assert!(cli.config.is_none());
        assert!(!cli.json);
        match &cli.command {
            Command::Call { name, args } => {
                assert_eq!(name, "ip4_inc");
                assert_eq!(args, &["0", "-1", "0.0.0.0"]);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let funcs = FuncMap::new();
        assert_eq!(run(&cli, &Config::default(), &funcs).unwrap(), "255.0.0.0");
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "funcmap",
            "--config", "funcmap.yaml",
            "--seed", "5",
            "--json",
            "list",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("funcmap.yaml")));
        assert_eq!(cli.seed, Some(5));
        assert!(cli.json);
        assert!(matches!(cli.command, Command::List));

        let overrides = cli.overrides();
        assert_eq!(overrides.seed, Some(5));
        assert!(overrides.log_level.is_none());
        assert!(!overrides.strict);
    }

    #[test]
    fn test_math_command() {
        let cli = Cli::parse_from(["funcmap", "math", "[-1,/2,%10]._._._", "255.255.255.255"]);
        let funcs = FuncMap::new();
        assert_eq!(run(&cli, &Config::default(), &funcs).unwrap(), "7.255.255.255");

        let cli = Cli::parse_from(["funcmap", "math", "--strict", "[/0]._._._", "1.2.3.4"]);
        let mut config = Config::default();
        config_loader::apply_overrides(&mut config, &cli.overrides()).unwrap();
        assert!(config.strict);
        assert!(run(&cli, &config, &funcs).is_err());

        let cli = Cli::parse_from(["funcmap", "math", "[/0]._._._", "1.2.3.4"]);
        let strict = Config { strict: true, ..Config::default() };
        assert!(run(&cli, &strict, &funcs).is_err());
        assert_eq!(run(&cli, &Config::default(), &funcs).unwrap(), "1.2.3.4");
    }

    #[test]
    fn test_json_output() {
        let cli = Cli::parse_from(["funcmap", "--json", "call", "ip_ints", "10.0.0.1"]);
        let funcs = FuncMap::new();
        assert_eq!(run(&cli, &Config::default(), &funcs).unwrap(), "[10,0,0,1]");
    }

    #[test]
    fn test_unknown_helper() {
        let cli = Cli::parse_from(["funcmap", "call", "nope"]);
        let funcs = FuncMap::new();
        let err = run(&cli, &Config::default(), &funcs).unwrap_err();
        assert!(err.to_string().contains("Helper 'nope' failed"));
    }
}
