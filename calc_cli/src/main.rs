//! # Reckon CLI
//!
//! Terminal front end for calc_core. Each subcommand builds one
//! [`Request`], evaluates it, and prints the outcome as text or JSON.
//!
//! ```text
//! calc convert 100 C F
//! calc ncr 52 5 --config reckon.toml
//! calc periods 2024-01-01 --cycle 30 --count 6
//! calc eval '{"type":"Amortize","principal":250000,"annual_rate_percent":6.5,"term_months":360}'
//! ```

mod config;
mod render;

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use calc_core::amortization::LoanTerms;
use calc_core::combinatorics::CombinatoricsRequest;
use calc_core::units::{ConversionRequest, Domain};
use calc_core::{CalcError, Request, Settings};

/// Unit conversion, exact combinatorics, date and loan calculators
#[derive(Parser, Debug)]
#[command(name = "calc", author, version, about, long_about = None)]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a value between units of one domain
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },
    /// List unit ids, optionally for one domain
    Units {
        #[arg(long, value_parser = parse_domain_arg)]
        domain: Option<Domain>,
    },
    /// Permutations nPr (exact)
    Npr {
        #[arg(allow_negative_numbers = true)]
        n: i64,
        #[arg(allow_negative_numbers = true)]
        r: i64,
    },
    /// Combinations nCr (exact)
    Ncr {
        #[arg(allow_negative_numbers = true)]
        n: i64,
        #[arg(allow_negative_numbers = true)]
        r: i64,
    },
    /// Years, months, days between two dates (YYYY-MM-DD)
    Diff {
        #[arg(value_parser = parse_date_arg)]
        from: NaiveDate,
        #[arg(value_parser = parse_date_arg)]
        to: NaiveDate,
    },
    /// Age as of today (or --today)
    Age {
        #[arg(value_parser = parse_date_arg)]
        birth_date: NaiveDate,
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
    },
    /// Upcoming periods from the last period's start date
    Periods {
        #[arg(value_parser = parse_date_arg)]
        last_period: NaiveDate,
        #[arg(long, default_value_t = 28, allow_negative_numbers = true)]
        cycle: i64,
        #[arg(long, default_value_t = 3)]
        count: usize,
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
    },
    /// Ovulation and fertile window for one cycle
    Ovulation {
        #[arg(value_parser = parse_date_arg)]
        last_period: NaiveDate,
        #[arg(long, default_value_t = 28, allow_negative_numbers = true)]
        cycle: i64,
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
    },
    /// Due date from the last period's start date
    DueDate {
        #[arg(value_parser = parse_date_arg)]
        last_period: NaiveDate,
        #[arg(long, default_value_t = 28, allow_negative_numbers = true)]
        cycle: i64,
    },
    /// Weeks and days since the last period
    Gestation {
        #[arg(value_parser = parse_date_arg)]
        last_period: NaiveDate,
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
    },
    /// Monthly payment (EMI), total interest and total payment
    Emi {
        #[arg(allow_negative_numbers = true)]
        principal: f64,
        /// Annual rate in percent
        #[arg(allow_negative_numbers = true)]
        rate: f64,
        /// Term in months
        #[arg(allow_negative_numbers = true)]
        months: i64,
    },
    /// Month-by-month amortization schedule
    Schedule {
        #[arg(allow_negative_numbers = true)]
        principal: f64,
        /// Annual rate in percent
        #[arg(allow_negative_numbers = true)]
        rate: f64,
        /// Term in months
        #[arg(allow_negative_numbers = true)]
        months: i64,
    },
    /// Evaluate a JSON request (argument or stdin)
    Eval { request: Option<String> },
}

fn parse_date_arg(text: &str) -> Result<NaiveDate, String> {
    calc_core::calendar::parse_date(text).map_err(|e| e.to_string())
}

fn parse_domain_arg(text: &str) -> Result<Domain, String> {
    text.parse::<Domain>().map_err(|e| e.to_string())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "calc_core=debug,calc=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr) // Keep stdout clean for results
        .init();
}

fn local_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

/// Turn a subcommand into a calc_core request. `Units` has none.
fn build_request(command: Command) -> Result<Option<Request>> {
    let request = match command {
        Command::Units { .. } => return Ok(None),
        Command::Convert { value, from, to } => Request::Convert(ConversionRequest::new(value, from, to)),
        Command::Npr { n, r } => Request::Permutations(CombinatoricsRequest::new(n, r)),
        Command::Ncr { n, r } => Request::Combinations(CombinatoricsRequest::new(n, r)),
        Command::Diff { from, to } => Request::DateDiff { from, to },
        Command::Age { birth_date, today } => Request::Age {
            birth_date,
            today: local_today(today),
        },
        Command::Periods {
            last_period,
            cycle,
            count,
            today,
        } => Request::NextPeriods {
            last_period,
            cycle_length_days: cycle,
            today: local_today(today),
            count,
        },
        Command::Ovulation {
            last_period,
            cycle,
            today,
        } => Request::Ovulation {
            last_period,
            cycle_length_days: cycle,
            today: local_today(today),
        },
        Command::DueDate { last_period, cycle } => Request::DueDate {
            last_period,
            cycle_length_days: cycle,
        },
        Command::Gestation { last_period, today } => Request::GestationalAge {
            last_period,
            today: local_today(today),
        },
        Command::Emi {
            principal,
            rate,
            months,
        } => Request::Amortize(LoanTerms::new(principal, rate, months)),
        Command::Schedule {
            principal,
            rate,
            months,
        } => Request::Schedule(LoanTerms::new(principal, rate, months)),
        Command::Eval { request } => {
            let text = match request {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf).context("reading request from stdin")?;
                    buf
                }
            };
            serde_json::from_str(&text).context("parsing JSON request")?
        }
    };
    Ok(Some(request))
}

fn report_error(err: &CalcError, json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string_pretty(err) {
            println!("{}", text);
        }
        return;
    }
    eprintln!("Error: {}", err);
    if let Ok(text) = serde_json::to_string_pretty(err) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", text);
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings: Settings = config::load_settings(cli.config.as_deref())?;

    if let Command::Units { domain } = &cli.command {
        if cli.json {
            let units: Vec<_> = match domain {
                Some(d) => calc_core::units::domain_units(*d).iter().map(|u| u.info()).collect(),
                None => calc_core::units::all_units().map(|u| u.info()).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&units)?);
        } else {
            print!("{}", render::unit_list(*domain));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let json = cli.json;
    let Some(request) = build_request(cli.command)? else {
        return Ok(ExitCode::SUCCESS);
    };
    debug!(?request, "built request");

    match request.evaluate(&settings) {
        Ok(outcome) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render::outcome(&outcome, &settings));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report_error(&err, json);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}
