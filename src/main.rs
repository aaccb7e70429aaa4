//! Command-line interface for controlling Elgato Key Light devices.
//!
//! With no flags, every light on the device is toggled. Absolute values turn
//! the lights on; increments only adjust the values and leave the power state
//! alone.
//!
//! Run with: cargo run -- --help

use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::{error, info};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use keylight_rs::{Brightness, Client, Deadline, Kelvin, Options, command};

#[derive(Parser, Debug)]
#[command(name = "keylight")]
#[command(about = "Control Elgato Key Light devices from the command line", long_about = None)]
struct Cli {
    /// The address of an Elgato Key Light's HTTP API
    #[arg(short = 'a', long, default_value = Options::DEFAULT_ADDRESS)]
    address: String,

    /// Set the brightness of a light to the specified percentage (valid: 3-100 %)
    #[arg(short = 'b', long, default_value_t = 0, value_parser = parse_brightness)]
    brightness: u8,

    /// Change the brightness of a light by the specified percentage if light is on
    #[arg(short = 'B', long, default_value_t = 0, allow_negative_numbers = true)]
    brightness_incr: i32,

    /// Set the display name of an Elgato Key Light device
    #[arg(short = 'd', long)]
    display: Option<String>,

    /// Display the current status of an Elgato Key Light without changing its state
    #[arg(short = 'i', long)]
    info: bool,

    /// Set the color temperature of a light to the specified value (valid: 2900-7000 K)
    #[arg(short = 't', long, default_value_t = 0, value_parser = parse_temperature)]
    temperature: u16,

    /// Change the color temperature of a light by the specified value if light is on
    #[arg(short = 'T', long, default_value_t = 0, allow_negative_numbers = true)]
    temperature_incr: i32,

    /// Increase log output (-v for requests, -vv for everything)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Options {
            address: cli.address,
            brightness: Brightness::create(cli.brightness),
            brightness_delta: cli.brightness_incr,
            display_name: cli.display,
            info: cli.info,
            temperature: Kelvin::create(cli.temperature),
            temperature_delta: cli.temperature_incr,
        }
    }
}

/// `0` leaves brightness unset; anything else must be in range.
fn parse_brightness(s: &str) -> Result<u8, String> {
    if let Ok(0) = s.trim().parse::<u8>() {
        return Ok(0);
    }
    s.parse::<Brightness>().map(|b| b.value())
}

/// `0` leaves temperature unset; anything else must be in range.
fn parse_temperature(s: &str) -> Result<u16, String> {
    if let Ok(0) = s.trim().parse::<u16>() {
        return Ok(0);
    }
    s.parse::<Kelvin>().map(|k| k.kelvin())
}

fn init_logging(verbose: u8) -> Result<(), log::SetLoggerError> {
    TermLogger::init(
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        },
        ConfigBuilder::new()
            .add_filter_allow_str("keylight")
            .set_max_level(LevelFilter::Off)
            .set_time_level(LevelFilter::Off)
            .set_thread_level(LevelFilter::Off)
            .set_target_level(LevelFilter::Off)
            .set_location_level(LevelFilter::Off)
            .build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("failed to initialise logging: {e}");
    }

    // One budget for the whole invocation, starting now.
    let deadline = Deadline::default();
    let options = Options::from(cli);

    let client = match Client::new(&options.address, None) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to create Key Light client: {e}");
            return ExitCode::FAILURE;
        }
    };

    match command::run(&client, &options, &deadline).await {
        Ok(report) => {
            for line in report.lines() {
                info!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, clap::Error> {
        let args = std::iter::once("keylight").chain(args.iter().copied());
        Cli::try_parse_from(args).map(Options::from)
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]).unwrap();
        assert_eq!(options, Options::default());
        assert_eq!(options.address, "http://keylight:9123");
    }

    #[test]
    fn test_all_flags() {
        let options = parse(&[
            "-a",
            "http://10.0.0.5:9123",
            "-b",
            "50",
            "-B",
            "-10",
            "-d",
            "Desk",
            "-i",
            "-t",
            "4500",
            "-T",
            "-300",
        ])
        .unwrap();

        assert_eq!(options.address, "http://10.0.0.5:9123");
        assert_eq!(options.brightness, Brightness::create(50));
        assert_eq!(options.brightness_delta, -10);
        assert_eq!(options.display_name.as_deref(), Some("Desk"));
        assert!(options.info);
        assert_eq!(options.temperature, Kelvin::create(4500));
        assert_eq!(options.temperature_delta, -300);
    }

    #[test]
    fn test_rejects_out_of_range_absolute_values() {
        assert!(parse(&["-b", "101"]).is_err());
        assert!(parse(&["-b", "2"]).is_err());
        assert!(parse(&["-t", "2800"]).is_err());
        assert!(parse(&["-t", "7001"]).is_err());
    }

    #[test]
    fn test_zero_means_unset() {
        let options = parse(&["-b", "0", "-t", "0"]).unwrap();
        assert_eq!(options, Options::default());

        let options = parse(&["-t", "0", "-T", "100"]).unwrap();
        assert_eq!(options.temperature, None);
        assert_eq!(options.brightness, None);
        assert_eq!(options.temperature_delta, 100);
    }

    #[test]
    fn test_increments_are_unbounded() {
        let options = parse(&["-B", "500", "-T", "-9000"]).unwrap();
        assert_eq!(options.brightness_delta, 500);
        assert_eq!(options.temperature_delta, -9000);
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["keylight", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
