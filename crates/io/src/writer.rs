//! High-level NetCDF writer configuration and orchestration.

use std::fs;
use std::path::{Path, PathBuf};

use netcdf::AttributeValue;
use tracing::{debug, info};

use crate::dataset::{Attribute, Dataset, FILL_ATTRIBUTES, Storage, TextVariable, Variable, numeric_value};
use crate::error::IoError;

/// Configuration for writing a converted dataset.
#[derive(Debug, Clone, Default)]
pub struct WriterConfig {
    /// Replace an existing file at the output path.
    overwrite: bool,
}

impl WriterConfig {
    /// Sets whether an existing output file is replaced.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Returns whether an existing output file is replaced.
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }
}

/// Write `dataset` to a NetCDF file at `path`.
///
/// The file is written beside `path` under a temporary name and renamed
/// into place once complete, so an interrupted write never leaves a
/// truncated file at `path`. Missing parent directories are created.
///
/// Numeric variables keep their [`Storage`] type when every value, and the
/// fill value, fits it, and are widened to `f64` otherwise. In variables
/// that carry a `_FillValue` or `missing_value`, NaN is written as that
/// value. Text variables are written as NetCDF strings.
///
/// # Errors
///
/// Returns [`IoError::OutputExists`] when `path` exists and overwriting is
/// off, [`IoError::Validation`] when the dataset is inconsistent, and
/// [`IoError::Fs`] or [`IoError::Netcdf`] when writing fails.
pub fn write_dataset(path: &Path, dataset: &Dataset, config: &WriterConfig) -> Result<(), IoError> {
    if path.exists() && !config.overwrite {
        return Err(IoError::OutputExists {
            path: path.to_path_buf(),
        });
    }
    dataset.validate()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| IoError::Fs {
            path: parent.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    let partial = partial_path(path);
    if let Err(e) = write_file(&partial, dataset) {
        let _ = fs::remove_file(&partial);
        return Err(e);
    }
    fs::rename(&partial, path).map_err(|e| IoError::Fs {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(
        path = %path.display(),
        variables = dataset.variables().len(),
        "wrote dataset"
    );
    Ok(())
}

/// Sibling of `path` used while the file is being written.
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

fn write_file(path: &Path, dataset: &Dataset) -> Result<(), IoError> {
    let mut file = netcdf::create(path)?;

    for dim in dataset.dimensions() {
        file.add_dimension(&dim.name, dim.len)?;
    }
    for attr in dataset.attributes() {
        file.add_attribute(&attr.name, attr.value.clone())?;
    }

    for variable in dataset.variables() {
        write_variable(&mut file, variable)?;
    }
    for text in dataset.text_variables() {
        write_text_variable(&mut file, text)?;
    }
    Ok(())
}

fn write_variable(file: &mut netcdf::FileMut, variable: &Variable) -> Result<(), IoError> {
    let values = output_values(variable);
    let storage = output_storage(variable, &values);
    let name = variable.name();
    let dims: Vec<&str> = variable.dims().iter().map(String::as_str).collect();

    let mut var = match storage {
        Storage::I8 => file.add_variable::<i8>(name, &dims)?,
        Storage::U8 => file.add_variable::<u8>(name, &dims)?,
        Storage::I16 => file.add_variable::<i16>(name, &dims)?,
        Storage::U16 => file.add_variable::<u16>(name, &dims)?,
        Storage::I32 => file.add_variable::<i32>(name, &dims)?,
        Storage::U32 => file.add_variable::<u32>(name, &dims)?,
        Storage::I64 => file.add_variable::<i64>(name, &dims)?,
        Storage::U64 => file.add_variable::<u64>(name, &dims)?,
        Storage::F32 => file.add_variable::<f32>(name, &dims)?,
        Storage::F64 => file.add_variable::<f64>(name, &dims)?,
    };
    for attr in variable.attributes() {
        let (attr_name, value) = output_attribute(attr, storage);
        var.put_attribute(attr_name, value)?;
    }

    match storage {
        Storage::I8 => put_as(&mut var, &values, |v| v as i8)?,
        Storage::U8 => put_as(&mut var, &values, |v| v as u8)?,
        Storage::I16 => put_as(&mut var, &values, |v| v as i16)?,
        Storage::U16 => put_as(&mut var, &values, |v| v as u16)?,
        Storage::I32 => put_as(&mut var, &values, |v| v as i32)?,
        Storage::U32 => put_as(&mut var, &values, |v| v as u32)?,
        Storage::I64 => put_as(&mut var, &values, |v| v as i64)?,
        Storage::U64 => put_as(&mut var, &values, |v| v as u64)?,
        Storage::F32 => put_as(&mut var, &values, |v| v as f32)?,
        Storage::F64 => var.put_values(&values, ..)?,
    }
    debug!(variable = name, len = values.len(), storage = ?storage, "wrote variable");
    Ok(())
}

fn put_as<T: netcdf::NcTypeDescriptor>(
    var: &mut netcdf::VariableMut<'_>,
    values: &[f64],
    cast: impl Fn(f64) -> T,
) -> Result<(), IoError> {
    let values: Vec<T> = values.iter().map(|&v| cast(v)).collect();
    var.put_values(&values, ..)?;
    Ok(())
}

fn write_text_variable(file: &mut netcdf::FileMut, text: &TextVariable) -> Result<(), IoError> {
    let mut var = file.add_string_variable(text.name(), &[text.dim()])?;
    for attr in text.attributes() {
        var.put_attribute(&attr.name, attr.value.clone())?;
    }
    for (i, value) in text.values().iter().enumerate() {
        var.put_string(value, [i])?;
    }
    debug!(variable = text.name(), len = text.values().len(), "wrote text variable");
    Ok(())
}

/// The variable's own type when every output value and its fill value fit
/// it, `f64` otherwise.
fn output_storage(variable: &Variable, values: &[f64]) -> Storage {
    let storage = variable.storage();
    let fits = values.iter().all(|&v| storage.holds(v))
        && variable.fill_value().is_none_or(|fill| storage.holds(fill));
    if fits {
        storage
    } else {
        debug!(variable = variable.name(), from = ?storage, "widening to f64");
        Storage::F64
    }
}

/// Fill attributes must share the variable's output type.
fn output_attribute(attr: &Attribute, storage: Storage) -> (&str, AttributeValue) {
    let value = if FILL_ATTRIBUTES.contains(&attr.name.as_str())
        && let Some(v) = numeric_value(&attr.value)
    {
        storage.attribute(v)
    } else {
        attr.value.clone()
    };
    (attr.name.as_str(), value)
}

/// Data in logical order, with NaN written as the fill value.
fn output_values(variable: &Variable) -> Vec<f64> {
    match variable.fill_value() {
        Some(fill) => variable
            .data()
            .iter()
            .map(|&v| if v.is_nan() { fill } else { v })
            .collect(),
        None => variable.data().iter().copied().collect(),
    }
}
