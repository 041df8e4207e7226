use clap::{ArgAction, Parser, Subcommand};
use eyre::{Result, WrapErr};
use itertools::Itertools;
use log::LevelFilter;
use rangenotation::{
    compress, count_elements, expand_to_ints, expand_to_numeral_strings, join, Settings,
};
use std::io::{self, BufRead};

#[derive(Parser, Debug)]
#[command(name = "rn", version, about = "Fold and expand range notations such as 0-6,8-10,42")]
struct Cli {
    /// Increase verbosity, may be repeated
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fold sorted ids into a range notation
    Fold {
        /// Ids separated by commas or spaces, read from stdin if missing
        ids: Vec<String>,
    },
    /// Expand range notations, one line per notation
    Expand {
        /// Zero-pad ids to the width of their range's lower bound
        #[arg(short, long)]
        padded: bool,

        /// Do not zero-pad ids even if enabled in the configuration
        #[arg(long, conflicts_with = "padded")]
        no_padded: bool,

        /// Separator between expanded ids
        #[arg(short = 'S', long)]
        separator: Option<String>,

        /// Notations to expand, read from stdin if missing
        notations: Vec<String>,
    },
    /// Count the ids in range notations, one line per notation
    Count {
        /// Notations to count, read from stdin if missing
        notations: Vec<String>,
    },
    /// Join ids with commas without folding them
    Join {
        /// Ids separated by commas or spaces, read from stdin if missing
        ids: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG takes precedence over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Fold { ids } => {
            let ids = parse_ids(&read_inputs(ids)?)?;
            if !is_strictly_sorted(&ids) {
                log::warn!("ids are not sorted and deduplicated, the result may not be minimal");
            }
            println!("{}", compress(&ids));
        }
        Commands::Join { ids } => {
            let ids = parse_ids(&read_inputs(ids)?)?;
            println!("{}", join(&ids));
        }
        Commands::Expand {
            padded,
            no_padded,
            separator,
            notations,
        } => {
            let settings = Settings::from_config().wrap_err("failed to load configuration")?;
            log::debug!("using {settings:?}");

            let padded = (padded || settings.padded) && !no_padded;
            let separator = separator.unwrap_or(settings.separator);

            for notation in read_inputs(notations)? {
                let ids = if padded {
                    expand_to_numeral_strings(&notation)?.join(separator.as_str())
                } else {
                    expand_to_ints(&notation)?.iter().join(&separator)
                };
                println!("{ids}");
            }
        }
        Commands::Count { notations } => {
            for notation in read_inputs(notations)? {
                println!("{}", count_elements(&notation)?);
            }
        }
    }

    Ok(())
}

/// Returns the command line arguments or, if there are none, the non-empty lines of stdin
fn read_inputs(args: Vec<String>) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }

    log::debug!("reading input from stdin");
    let mut inputs = vec![];
    for line in io::stdin().lock().lines() {
        let line = line.wrap_err("failed to read from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            inputs.push(line.to_string());
        }
    }

    Ok(inputs)
}

/// Parses ids separated by commas or whitespace
fn parse_ids(inputs: &[String]) -> Result<Vec<u32>> {
    inputs
        .iter()
        .flat_map(|input| input.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<u32>()
                .wrap_err_with(|| format!("invalid id '{id}'"))
        })
        .collect()
}

fn is_strictly_sorted(ids: &[u32]) -> bool {
    ids.iter().tuple_windows().all(|(a, b)| a < b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ids() {
        let inputs = vec!["1,2 3".to_string(), " 7\t8, 9 ".to_string()];
        assert_eq!(parse_ids(&inputs).unwrap(), vec![1, 2, 3, 7, 8, 9]);
        assert!(parse_ids(&[]).unwrap().is_empty());
        assert!(parse_ids(&["1,a".to_string()]).is_err());
        assert!(parse_ids(&["-1".to_string()]).is_err());
    }

    #[test]
    fn test_is_strictly_sorted() {
        assert!(is_strictly_sorted(&[]));
        assert!(is_strictly_sorted(&[1]));
        assert!(is_strictly_sorted(&[1, 2, 5]));
        assert!(!is_strictly_sorted(&[1, 1, 2]));
        assert!(!is_strictly_sorted(&[3, 1]));
    }

    #[test]
    fn test_expand_args() {
        let cli =
            Cli::try_parse_from(["rn", "-vv", "expand", "-p", "-S", ",", "008-011"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Expand {
                padded,
                no_padded,
                separator,
                notations,
            } => {
                assert!(padded);
                assert!(!no_padded);
                assert_eq!(separator.as_deref(), Some(","));
                assert_eq!(notations, vec!["008-011"]);
            }
            c => panic!("Expected expand command, got {c:?}"),
        }

        assert!(Cli::try_parse_from(["rn", "expand", "-p", "--no-padded", "1-2"]).is_err());
    }
}
