//! Pure conversion functions: TOML config structs and CLI overrides -> crate API config types.

use anyhow::{Result, bail};

use recal_calendar::Calendar;
use recal_convert::{ConvertConfig, EdgeFill, Interpolation};
use recal_io::{ReaderConfig, WriterConfig};

use crate::cli::ConversionArgs;
use crate::config::{ConvertToml, IoConfig, RecalConfig};

/// Parses an interpolation method name into the corresponding enum variant.
pub fn parse_interpolation(s: &str) -> Result<Interpolation> {
    Ok(s.parse()?)
}

/// Parses an edge fill name into the corresponding enum variant.
pub fn parse_edge_fill(s: &str) -> Result<EdgeFill> {
    Ok(s.parse()?)
}

/// Parses a CF calendar name, accepting only Gregorian targets.
pub fn parse_target_calendar(s: &str) -> Result<Calendar> {
    let calendar: Calendar = s.parse()?;
    if !calendar.is_gregorian() {
        bail!("target calendar must be standard or proleptic_gregorian, got {calendar}");
    }
    Ok(calendar)
}

/// Applies CLI flags on top of the loaded file.
pub fn apply_overrides(config: &mut RecalConfig, args: &ConversionArgs) {
    if let Some(ref v) = args.variable {
        config.io.variable = v.clone();
    }
    if let Some(ref v) = args.interpolation {
        config.convert.interpolation = v.clone();
    }
    if let Some(ref v) = args.edge_fill {
        config.convert.edge_fill = v.clone();
    }
    if args.overwrite {
        config.io.overwrite = true;
    }
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoConfig) -> ReaderConfig {
    ReaderConfig::default()
        .with_variable(&io.variable)
        .with_time_var(&io.time_var)
}

/// Builds a [`ConvertConfig`] from the TOML conversion configuration.
pub fn build_convert_config(convert: &ConvertToml) -> Result<ConvertConfig> {
    let target = parse_target_calendar(&convert.target_calendar)?;
    let interpolation = parse_interpolation(&convert.interpolation)?;
    let edge_fill = parse_edge_fill(&convert.edge_fill)?;
    let cfg = ConvertConfig::new()
        .with_target(target)
        .with_interpolation(interpolation)
        .with_edge_fill(edge_fill);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoConfig) -> WriterConfig {
    WriterConfig::default().with_overwrite(io.overwrite)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> ConversionArgs {
        ConversionArgs {
            config: None,
            variable: None,
            interpolation: None,
            edge_fill: None,
            overwrite: false,
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!(parse_interpolation("Nearest").unwrap(), Interpolation::Nearest);
        assert_eq!(parse_edge_fill("extrapolate").unwrap(), EdgeFill::Extrapolate);
        assert_eq!(parse_target_calendar("gregorian").unwrap(), Calendar::Standard);
        assert!(parse_interpolation("cubic").is_err());
        assert!(parse_edge_fill("zero").is_err());
    }

    #[test]
    fn target_must_be_gregorian() {
        let err = parse_target_calendar("noleap").unwrap_err();
        assert!(err.to_string().contains("standard or proleptic_gregorian"));
        assert!(parse_target_calendar("lunar").is_err());
    }

    #[test]
    fn default_convert_config() {
        let cfg = build_convert_config(&ConvertToml::default()).unwrap();
        assert_eq!(cfg.target(), Calendar::Standard);
        assert_eq!(cfg.interpolation(), Interpolation::Linear);
        assert_eq!(cfg.edge_fill(), EdgeFill::Extrapolate);
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = RecalConfig::default();
        let args = ConversionArgs {
            variable: Some("pr".into()),
            interpolation: Some("nearest".into()),
            overwrite: true,
            ..no_overrides()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.io.variable, "pr");
        assert_eq!(config.convert.interpolation, "nearest");
        assert_eq!(config.convert.edge_fill, "extrapolate");
        assert!(config.io.overwrite);

        assert_eq!(build_reader_config(&config.io).variable(), "pr");
        assert!(build_writer_config(&config.io).overwrite());
    }

    #[test]
    fn overwrite_flag_does_not_clear_file_setting() {
        let mut config = RecalConfig::default();
        config.io.overwrite = true;
        apply_overrides(&mut config, &no_overrides());
        assert!(config.io.overwrite);
    }
}
