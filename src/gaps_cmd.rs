//! Gaps command: list the Gregorian days synthesised in a year.

use anyhow::{Context, Result};
use tracing::info_span;

use recal_calendar::{YearKind, standard_gap_dates};

use crate::cli::GapsArgs;

/// Print one gap date per line.
pub fn run(args: GapsArgs) -> Result<()> {
    let _cmd = info_span!("gaps", year = args.year).entered();

    let dates = standard_gap_dates(args.year)
        .with_context(|| format!("year {} is out of range", args.year))?;
    let kind = YearKind::of_standard(args.year);
    println!(
        "{}: {} days, {} synthesised from 360",
        args.year,
        kind.days(),
        dates.len()
    );
    for date in dates {
        println!("{date}");
    }
    Ok(())
}
