//! In-memory model of a NetCDF dataset.
//!
//! Numeric variables are held as `f64` with NaN for missing values and
//! remember their on-disk [`Storage`] type. Character and string variables
//! are held as [`TextVariable`]s. Attributes keep their NetCDF types so they
//! round-trip unchanged.

use std::path::{Path, PathBuf};

use ndarray::ArrayD;
use netcdf::AttributeValue;
use recal_calendar::{Calendar, TimeAxis, TimeUnits};

use crate::error::IoError;
use crate::validate::ValidationCollector;

/// A named attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

/// A named dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub len: usize,
}

/// Numeric type a variable is stored as on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Storage {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    #[default]
    F64,
}

impl Storage {
    /// Whether `value` can be stored in this type. Integer types need a
    /// whole number in range; float types take anything, with `F32`
    /// rounding to single precision.
    pub fn holds(self, value: f64) -> bool {
        let (min, max_exclusive) = match self {
            Self::F32 | Self::F64 => return true,
            Self::I8 => (-128.0, 128.0),
            Self::U8 => (0.0, 256.0),
            Self::I16 => (-32_768.0, 32_768.0),
            Self::U16 => (0.0, 65_536.0),
            Self::I32 => (-2_147_483_648.0, 2_147_483_648.0),
            Self::U32 => (0.0, 4_294_967_296.0),
            Self::I64 => (-9_223_372_036_854_775_808.0, 9_223_372_036_854_775_808.0),
            Self::U64 => (0.0, 18_446_744_073_709_551_616.0),
        };
        value.fract() == 0.0 && value >= min && value < max_exclusive
    }

    /// `value` as an attribute of this type. Only meaningful when
    /// [`Storage::holds`] accepts it.
    pub(crate) fn attribute(self, value: f64) -> AttributeValue {
        match self {
            Self::I8 => AttributeValue::Schar(value as i8),
            Self::U8 => AttributeValue::Uchar(value as u8),
            Self::I16 => AttributeValue::Short(value as i16),
            Self::U16 => AttributeValue::Ushort(value as u16),
            Self::I32 => AttributeValue::Int(value as i32),
            Self::U32 => AttributeValue::Uint(value as u32),
            Self::I64 => AttributeValue::Longlong(value as i64),
            Self::U64 => AttributeValue::Ulonglong(value as u64),
            Self::F32 => AttributeValue::Float(value as f32),
            Self::F64 => AttributeValue::Double(value),
        }
    }
}

/// A numeric variable: dimension names, data, attributes and storage type.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    dims: Vec<String>,
    data: ArrayD<f64>,
    attributes: Vec<Attribute>,
    storage: Storage,
}

impl Variable {
    /// Creates an `f64` variable without attributes.
    pub fn new(name: impl Into<String>, dims: Vec<String>, data: ArrayD<f64>) -> Self {
        Self {
            name: name.into(),
            dims,
            data,
            attributes: Vec::new(),
            storage: Storage::default(),
        }
    }

    /// Sets the on-disk type.
    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    /// Adds or replaces an attribute.
    pub fn with_attribute(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Replaces all attributes.
    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn storage(&self) -> Storage {
        self.storage
    }

    pub(crate) fn data_mut(&mut self) -> &mut ArrayD<f64> {
        &mut self.data
    }

    /// Position of dimension `dim` in this variable, if it has it.
    pub fn axis_of(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    /// Value of attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    /// Value of attribute `name` when it is a string.
    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        match self.attribute(name)? {
            AttributeValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Adds or replaces an attribute.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<AttributeValue>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// The `_FillValue`, or failing that the `missing_value`, as `f64`.
    pub fn fill_value(&self) -> Option<f64> {
        FILL_ATTRIBUTES
            .iter()
            .find_map(|name| self.attribute(name).and_then(numeric_value))
    }
}

/// Attributes that mark missing data, in order of precedence.
pub(crate) const FILL_ATTRIBUTES: [&str; 2] = ["_FillValue", "missing_value"];

/// Single numeric value of an attribute, widened to `f64`.
pub(crate) fn numeric_value(value: &AttributeValue) -> Option<f64> {
    match value {
        AttributeValue::Double(v) => Some(*v),
        AttributeValue::Float(v) => Some(f64::from(*v)),
        AttributeValue::Int(v) => Some(f64::from(*v)),
        AttributeValue::Uint(v) => Some(f64::from(*v)),
        AttributeValue::Short(v) => Some(f64::from(*v)),
        AttributeValue::Ushort(v) => Some(f64::from(*v)),
        AttributeValue::Schar(v) => Some(f64::from(*v)),
        AttributeValue::Uchar(v) => Some(f64::from(*v)),
        AttributeValue::Longlong(v) => Some(*v as f64),
        AttributeValue::Ulonglong(v) => Some(*v as f64),
        AttributeValue::Doubles(v) if v.len() == 1 => Some(v[0]),
        AttributeValue::Floats(v) if v.len() == 1 => Some(f64::from(v[0])),
        _ => None,
    }
}

/// A variable of strings along one dimension, such as the `yyyymmdd`
/// date stamps in CPM files.
#[derive(Debug, Clone, PartialEq)]
pub struct TextVariable {
    name: String,
    dim: String,
    values: Vec<String>,
    attributes: Vec<Attribute>,
}

impl TextVariable {
    pub fn new(name: impl Into<String>, dim: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            dim: dim.into(),
            values,
            attributes: Vec::new(),
        }
    }

    /// Replaces all attributes.
    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dim(&self) -> &str {
        &self.dim
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

/// A whole dataset: dimensions, variables and global attributes.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    source: PathBuf,
    dimensions: Vec<Dimension>,
    variables: Vec<Variable>,
    text_variables: Vec<TextVariable>,
    attributes: Vec<Attribute>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the file this dataset came from, used in error messages.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = path.into();
        self
    }

    /// Adds a dimension, replacing the length of an existing one.
    pub fn with_dimension(mut self, name: &str, len: usize) -> Self {
        self.set_dimension(name, len);
        self
    }

    /// Adds a variable, replacing one of the same name.
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.push_variable(variable);
        self
    }

    /// Adds a text variable, replacing one of the same name.
    pub fn with_text_variable(mut self, text: TextVariable) -> Self {
        match self.text_variables.iter_mut().find(|t| t.name == text.name) {
            Some(existing) => *existing = text,
            None => self.text_variables.push(text),
        }
        self
    }

    /// Adds or replaces a global attribute.
    pub fn with_attribute(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn text_variables(&self) -> &[TextVariable] {
        &self.text_variables
    }

    pub fn text_variable(&self, name: &str) -> Option<&TextVariable> {
        self.text_variables.iter().find(|t| t.name == name)
    }

    /// Global attributes.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Length of dimension `name`.
    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.len)
    }

    /// Looks up a variable, failing with [`IoError::MissingVariable`].
    pub fn require_variable(&self, name: &str) -> Result<&Variable, IoError> {
        self.variable(name).ok_or_else(|| IoError::MissingVariable {
            name: name.to_string(),
            path: self.source.clone(),
        })
    }

    pub(crate) fn set_dimension(&mut self, name: &str, len: usize) {
        match self.dimensions.iter_mut().find(|d| d.name == name) {
            Some(existing) => existing.len = len,
            None => self.dimensions.push(Dimension {
                name: name.to_string(),
                len,
            }),
        }
    }

    pub(crate) fn push_variable(&mut self, variable: Variable) {
        match self.variables.iter_mut().find(|v| v.name == variable.name) {
            Some(existing) => *existing = variable,
            None => self.variables.push(variable),
        }
    }

    /// Decodes the CF time coordinate `time_var`.
    ///
    /// A missing `calendar` attribute means `standard`, as in CF.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`] when the variable is missing or not 1-D, when
    /// `units` is absent or malformed, or when `calendar` is unknown.
    pub fn time_axis(&self, time_var: &str) -> Result<TimeAxis, IoError> {
        let var = self.require_variable(time_var)?;
        if var.dims.len() != 1 {
            return Err(IoError::DimensionMismatch {
                name: format!("{time_var} dimensions"),
                expected: 1,
                got: var.dims.len(),
            });
        }
        let units: TimeUnits = var
            .attribute_str("units")
            .ok_or_else(|| IoError::MissingAttribute {
                variable: time_var.to_string(),
                attribute: "units".to_string(),
            })?
            .parse()?;
        let calendar: Calendar = var.attribute_str("calendar").unwrap_or("standard").parse()?;
        Ok(TimeAxis::new(calendar, units, var.data.iter().copied().collect()))
    }

    /// Checks that every variable's dimensions exist and its data shape
    /// matches their lengths.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        for var in &self.variables {
            let mut expected = Vec::with_capacity(var.dims.len());
            for dim in &var.dims {
                match self.dimension_len(dim) {
                    Some(len) => expected.push(len),
                    None => c.push(format!("variable '{}' uses undefined dimension '{dim}'", var.name)),
                }
            }
            if expected.len() == var.dims.len() && expected.as_slice() != var.data.shape() {
                c.push(format!(
                    "variable '{}' has shape {:?}, dimensions imply {:?}",
                    var.name,
                    var.data.shape(),
                    expected
                ));
            }
        }
        for text in &self.text_variables {
            match self.dimension_len(&text.dim) {
                None => c.push(format!(
                    "variable '{}' uses undefined dimension '{}'",
                    text.name, text.dim
                )),
                Some(len) if len != text.values.len() => c.push(format!(
                    "variable '{}' has {} strings, dimension '{}' has length {len}",
                    text.name,
                    text.values.len(),
                    text.dim
                )),
                Some(_) => {}
            }
        }
        c.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, ArrayD, IxDyn};

    fn time_variable(units: &str, calendar: Option<&str>) -> Variable {
        let data = Array1::from(vec![0.5, 1.5, 2.5]).into_dyn();
        let mut var = Variable::new("time", vec!["time".into()], data).with_attribute("units", units);
        if let Some(cal) = calendar {
            var.set_attribute("calendar", cal);
        }
        var
    }

    #[test]
    fn time_axis_decodes() {
        let ds = Dataset::new()
            .with_dimension("time", 3)
            .with_variable(time_variable("days since 1980-12-01", Some("360_day")));
        let axis = ds.time_axis("time").unwrap();
        assert_eq!(axis.calendar, Calendar::Day360);
        assert_eq!(axis.len(), 3);
    }

    #[test]
    fn time_axis_defaults_to_standard() {
        let ds = Dataset::new()
            .with_dimension("time", 3)
            .with_variable(time_variable("days since 1980-12-01", None));
        assert_eq!(ds.time_axis("time").unwrap().calendar, Calendar::Standard);
    }

    #[test]
    fn time_axis_without_units() {
        let data = Array1::from(vec![0.0]).into_dyn();
        let ds = Dataset::new()
            .with_dimension("time", 1)
            .with_variable(Variable::new("time", vec!["time".into()], data));
        assert!(matches!(
            ds.time_axis("time"),
            Err(IoError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn time_axis_unknown_calendar() {
        let ds = Dataset::new()
            .with_dimension("time", 3)
            .with_variable(time_variable("days since 1980-12-01", Some("lunar")));
        assert!(matches!(ds.time_axis("time"), Err(IoError::Calendar { .. })));
    }

    #[test]
    fn missing_variable_names_source() {
        let ds = Dataset::new().with_source("cpm.nc");
        let err = ds.require_variable("tasmax").unwrap_err();
        assert_eq!(err.to_string(), "variable 'tasmax' not found in cpm.nc");
    }

    #[test]
    fn validate_catches_shape_mismatch() {
        let data = ArrayD::zeros(IxDyn(&[2, 3]));
        let ds = Dataset::new()
            .with_dimension("y", 2)
            .with_dimension("x", 4)
            .with_variable(Variable::new("v", vec!["y".into(), "x".into()], data));
        assert!(matches!(ds.validate(), Err(IoError::Validation { count: 1, .. })));
    }

    #[test]
    fn validate_catches_undefined_dimension() {
        let data = ArrayD::zeros(IxDyn(&[2]));
        let ds = Dataset::new().with_variable(Variable::new("v", vec!["z".into()], data));
        assert!(matches!(ds.validate(), Err(IoError::Validation { count: 1, .. })));
    }

    #[test]
    fn validate_checks_text_length() {
        let stamps = vec!["19801201".to_string(), "19801202".to_string()];
        let ds = Dataset::new()
            .with_dimension("time", 3)
            .with_text_variable(TextVariable::new("yyyymmdd", "time", stamps));
        assert!(matches!(ds.validate(), Err(IoError::Validation { count: 1, .. })));
        assert!(ds.with_dimension("time", 2).validate().is_ok());
    }

    #[test]
    fn storage_holds_whole_numbers_in_range() {
        assert!(Storage::I32.holds(1981.0));
        assert!(Storage::I32.holds(-2_147_483_648.0));
        assert!(!Storage::I32.holds(2_147_483_648.0));
        assert!(!Storage::I32.holds(0.5));
        assert!(!Storage::I32.holds(f64::NAN));
        assert!(!Storage::U8.holds(-1.0));
        assert!(Storage::F32.holds(f64::NAN));
        assert_eq!(Storage::I16.attribute(-999.0), AttributeValue::Short(-999));
    }

    #[test]
    fn fill_value_precedence() {
        let data = ArrayD::zeros(IxDyn(&[1]));
        let var = Variable::new("v", vec!["x".into()], data)
            .with_attribute("missing_value", 1.0e20_f32)
            .with_attribute("_FillValue", -9999.0);
        assert_eq!(var.fill_value(), Some(-9999.0));
    }

    #[test]
    fn set_attribute_replaces() {
        let mut var = time_variable("days since 1980-12-01", Some("360_day"));
        var.set_attribute("calendar", "standard");
        assert_eq!(var.attribute_str("calendar"), Some("standard"));
        assert_eq!(
            var.attributes().iter().filter(|a| a.name == "calendar").count(),
            1
        );
    }
}
