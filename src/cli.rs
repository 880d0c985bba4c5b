//! Command-line options for the self-play driver.

use anyhow::{Context, Result, bail};
use rookery_engine::{SearchConfig, Strategy};

/// Plies played when `--plies` is not given.
pub const DEFAULT_PLIES: u32 = 40;

pub const USAGE: &str = "usage: rookery [--depth N] [--strategy minimax|alphabeta|shallow] [--plies N] [--seed N] [--pst]";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub search: SearchConfig,
    /// Upper bound on plies to play before stopping.
    pub plies: u32,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            plies: DEFAULT_PLIES,
            help: false,
        }
    }
}

/// Parse arguments (without the program name).
pub fn parse_args<I, S>(args: I) -> Result<Options>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<S> = args.into_iter().collect();
    let tokens: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
    let mut options = Options::default();

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "--depth" => {
                options.search.depth = parse_value(tokens.get(i + 1), "--depth")?;
                if options.search.depth == 0 {
                    bail!("--depth must be at least 1");
                }
                i += 2;
            }
            "--strategy" => {
                let value = tokens.get(i + 1).context("--strategy needs a value")?;
                options.search.strategy = value.parse::<Strategy>()?;
                i += 2;
            }
            "--plies" => {
                options.plies = parse_value(tokens.get(i + 1), "--plies")?;
                i += 2;
            }
            "--seed" => {
                options.search.seed = Some(parse_value(tokens.get(i + 1), "--seed")?);
                i += 2;
            }
            "--pst" => {
                options.search.eval.piece_square_tables = true;
                i += 1;
            }
            "-h" | "--help" => {
                options.help = true;
                i += 1;
            }
            other => bail!("unknown argument \"{other}\"\n{USAGE}"),
        }
    }

    Ok(options)
}

fn parse_value<T: std::str::FromStr>(token: Option<&&str>, flag: &str) -> Result<T> {
    let value = token.with_context(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid value \"{value}\" for {flag}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let options = parse_args(Vec::<String>::new()).unwrap();
        assert_eq!(options, Options::default());
        assert_eq!(options.search.depth, 2);
        assert_eq!(options.plies, DEFAULT_PLIES);
    }

    #[test]
    fn all_flags() {
        let options = parse_args([
            "--depth", "3", "--strategy", "minimax", "--plies", "10", "--seed", "99", "--pst",
        ])
        .unwrap();
        assert_eq!(options.search.depth, 3);
        assert_eq!(options.search.strategy, Strategy::Minimax);
        assert_eq!(options.plies, 10);
        assert_eq!(options.search.seed, Some(99));
        assert!(options.search.eval.piece_square_tables);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(["--depth"]).is_err());
        assert!(parse_args(["--depth", "zero"]).is_err());
        assert!(parse_args(["--depth", "0"]).is_err());
        assert!(parse_args(["--strategy", "random"]).is_err());
        assert!(parse_args(["--fast"]).is_err());
    }
}
