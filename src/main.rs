use anyhow::Result;
use clap::Parser;
use log::debug;
use rust_decimal::Decimal;

use zerofolio::conversion;
use zerofolio::data;

/// Convert a Zerodha trade book CSV to the Ghostfolio activities CSV format.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the input Zerodha trade book CSV file
    input_file: String,

    /// Path to the output Ghostfolio CSV file
    output_file: String,

    /// Round up total amount to nearest value (accepted for compatibility;
    /// fee derivation always rounds to the nearest 100)
    #[arg(long, default_value_t = 100)]
    round_to: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.round_to != 100 {
        debug!(
            "ignoring --round-to={}, fees are derived from rounding to the nearest 100",
            args.round_to
        );
    }

    let trades = data::read_trades(&args.input_file)?;
    let activities = conversion::convert_trades(&trades)?;
    data::write_activities(&args.output_file, &activities)?;

    let total_fees = activities
        .iter()
        .fold(Decimal::ZERO, |total, activity| total + activity.fee);

    println!("\nConversion Summary:");
    println!("Total trades processed: {}", activities.len());
    println!("Total fees calculated: ₹{total_fees:.2}");
    println!("\nFile saved to: {}", args.output_file);

    Ok(())
}
