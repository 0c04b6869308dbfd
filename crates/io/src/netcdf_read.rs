//! Low-level NetCDF extraction helpers.

use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use netcdf::types::{FloatType, IntType, NcVariableType};
use tracing::{debug, warn};

use crate::dataset::{Attribute, Dataset, Storage, TextVariable, Variable};
use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Collect attributes, skipping any whose value cannot be decoded.
fn read_attributes<'a>(attrs: impl Iterator<Item = netcdf::Attribute<'a>>, owner: &str) -> Vec<Attribute> {
    attrs
        .filter_map(|attr| match attr.value() {
            Ok(value) => Some(Attribute {
                name: attr.name().to_string(),
                value,
            }),
            Err(e) => {
                warn!(owner, attribute = attr.name(), error = %e, "skipping unreadable attribute");
                None
            }
        })
        .collect()
}

/// On-disk type of a numeric variable, or `None` for any other kind.
fn storage_of(var_type: &NcVariableType) -> Option<Storage> {
    Some(match var_type {
        NcVariableType::Int(IntType::I8) => Storage::I8,
        NcVariableType::Int(IntType::U8) => Storage::U8,
        NcVariableType::Int(IntType::I16) => Storage::I16,
        NcVariableType::Int(IntType::U16) => Storage::U16,
        NcVariableType::Int(IntType::I32) => Storage::I32,
        NcVariableType::Int(IntType::U32) => Storage::U32,
        NcVariableType::Int(IntType::I64) => Storage::I64,
        NcVariableType::Int(IntType::U64) => Storage::U64,
        NcVariableType::Float(FloatType::F32) => Storage::F32,
        NcVariableType::Float(FloatType::F64) => Storage::F64,
        _ => return None,
    })
}

/// Read one numeric variable as `f64`, with fill values replaced by NaN.
fn read_variable(var: &netcdf::Variable<'_>, storage: Storage) -> Result<Variable, IoError> {
    let name = var.name();
    let dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let attributes = read_attributes(var.attributes(), &name);

    let values = var.get_values::<f64, _>(..)?;
    let data = ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|e| IoError::Validation {
        count: 1,
        details: format!("variable '{name}' data does not match its dimensions: {e}"),
    })?;

    let mut variable = Variable::new(name, dims, data)
        .with_attributes(attributes)
        .with_storage(storage);
    if let Some(fill) = variable.fill_value() {
        variable.data_mut().mapv_inplace(|v| if v == fill { f64::NAN } else { v });
    }
    Ok(variable)
}

/// Read a `char (dim, width)` or `string (dim)` variable as one string per
/// index of its first dimension. Returns `Ok(None)` for other shapes.
fn read_text_variable(
    var: &netcdf::Variable<'_>,
    var_type: &NcVariableType,
) -> Result<Option<TextVariable>, IoError> {
    let name = var.name();
    let (dim, values) = match (var_type, var.dimensions()) {
        (NcVariableType::Char, [rows, width]) => {
            let values = if width.len() == 0 {
                vec![String::new(); rows.len()]
            } else {
                let bytes = var.get_raw_values(..)?;
                bytes.chunks(width.len()).map(decode_chars).collect()
            };
            (rows.name(), values)
        }
        (NcVariableType::String, [rows]) => {
            let values = (0..rows.len())
                .map(|i| var.get_string([i]))
                .collect::<Result<Vec<_>, _>>()?;
            (rows.name(), values)
        }
        _ => {
            warn!(variable = %name, "skipping text variable with unsupported dimensions");
            return Ok(None);
        }
    };
    let attributes = read_attributes(var.attributes(), &name);
    Ok(Some(TextVariable::new(name, dim, values).with_attributes(attributes)))
}

/// Fixed-width characters with NUL or space padding removed.
fn decode_chars(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\0', ' '])
        .to_string()
}

/// Load every dimension, global attribute and numeric or text variable of
/// `file`.
pub(crate) fn load_dataset(file: &netcdf::File, path: &Path) -> Result<Dataset, IoError> {
    let mut dataset = Dataset::new().with_source(path);
    for dim in file.dimensions() {
        dataset = dataset.with_dimension(&dim.name(), dim.len());
    }
    for attr in read_attributes(file.attributes(), "global") {
        dataset = dataset.with_attribute(&attr.name, attr.value);
    }
    for var in file.variables() {
        let var_type = var.vartype();
        if let Some(storage) = storage_of(&var_type) {
            let variable = read_variable(&var, storage)?;
            debug!(
                variable = variable.name(),
                dims = ?variable.dims(),
                storage = ?storage,
                "read variable"
            );
            dataset = dataset.with_variable(variable);
        } else if matches!(var_type, NcVariableType::Char | NcVariableType::String) {
            if let Some(text) = read_text_variable(&var, &var_type)? {
                debug!(variable = text.name(), dim = text.dim(), "read text variable");
                dataset = dataset.with_text_variable(text);
            }
        } else {
            warn!(variable = %var.name(), "skipping variable of unsupported type");
        }
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_padding_removed() {
        assert_eq!(decode_chars(b"19801201"), "19801201");
        assert_eq!(decode_chars(b"1980\0\0\0\0"), "1980");
        assert_eq!(decode_chars(b"ab  "), "ab");
    }

    #[test]
    fn numeric_types_map_to_storage() {
        assert_eq!(storage_of(&NcVariableType::Int(IntType::I32)), Some(Storage::I32));
        assert_eq!(storage_of(&NcVariableType::Float(FloatType::F32)), Some(Storage::F32));
        assert_eq!(storage_of(&NcVariableType::Char), None);
        assert_eq!(storage_of(&NcVariableType::String), None);
    }
}
