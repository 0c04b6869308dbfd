//! Convert command: rebuild one 360-day NetCDF file on the Gregorian calendar.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use recal_convert::{ConversionReport, ConvertConfig};
use recal_io::{
    Dataset, ReaderConfig, WriterConfig, convert_dataset, file_name_date_range, read_dataset,
    write_dataset,
};

use crate::cli::ConvertArgs;
use crate::config::RecalConfig;
use crate::convert;

/// Crate configs for reading, converting and writing one file.
pub struct Pipeline {
    reader: ReaderConfig,
    convert: ConvertConfig,
    writer: WriterConfig,
}

impl Pipeline {
    /// Builds every stage's config, failing on unknown names.
    pub fn from_config(config: &RecalConfig) -> Result<Self> {
        Ok(Self {
            reader: convert::build_reader_config(&config.io),
            convert: convert::build_convert_config(&config.convert)?,
            writer: convert::build_writer_config(&config.io),
        })
    }

    /// Reads, converts and writes one file.
    ///
    /// The whole dataset is converted in memory before anything is written.
    pub fn run_file(&self, input: &Path, output: &Path) -> Result<ConversionReport> {
        let _file = info_span!("file", path = %input.display()).entered();

        let dataset = read_dataset(input, &self.reader)
            .with_context(|| format!("failed to read NetCDF: {}", input.display()))?;
        check_name_range(input, &dataset, self.reader.time_var());

        let (converted, report) = convert_dataset(&dataset, self.reader.time_var(), &self.convert)
            .with_context(|| format!("failed to convert calendar: {}", input.display()))?;
        info!(
            input_days = report.input_days,
            output_days = report.output_days,
            synthesised = report.synthesised(),
            missing = report.missing,
            dropped = report.dropped,
            "converted to {}",
            self.convert.target()
        );

        write_dataset(output, &converted, &self.writer)
            .with_context(|| format!("failed to write NetCDF: {}", output.display()))?;
        Ok(report)
    }
}

/// Warns when the date range in the file name disagrees with the time axis.
fn check_name_range(path: &Path, dataset: &Dataset, time_var: &str) {
    let (name_start, name_end) = match file_name_date_range(path) {
        Ok(range) => range,
        Err(e) => {
            warn!(error = %e, "cannot check time axis against file name");
            return;
        }
    };
    let dates = match dataset.time_axis(time_var).map(|axis| axis.decode_day360()) {
        Ok(Ok(dates)) => dates,
        // Conversion reports the decoding error.
        _ => return,
    };
    if let (Some(&first), Some(&last)) = (dates.first(), dates.last())
        && (first != name_start || last != name_end)
    {
        warn!(
            %name_start,
            %name_end,
            %first,
            %last,
            "file name date range does not match time axis"
        );
    }
}

/// Run the single-file conversion.
pub fn run(args: ConvertArgs) -> Result<()> {
    let _cmd = info_span!("convert").entered();

    let mut config = RecalConfig::load(args.conversion.config.as_deref())?;
    convert::apply_overrides(&mut config, &args.conversion);
    let pipeline = Pipeline::from_config(&config)?;

    let report = pipeline.run_file(&args.input, &args.output)?;
    info!(
        output = %args.output.display(),
        days = report.output_days,
        "conversion complete"
    );
    Ok(())
}
