//! Feature values and how they flatten into matrix rows.

/// The output of one feature for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    /// A single column.
    Scalar(f64),
    /// One column per element, e.g. per embedding dimension or per window
    /// span.
    Vector(Vec<f64>),
}

impl FeatureValue {
    /// Number of matrix columns this value occupies.
    pub fn width(&self) -> usize {
        match self {
            FeatureValue::Scalar(_) => 1,
            FeatureValue::Vector(values) => values.len(),
        }
    }

    /// Append this value to a row, extending inline for vectors.
    pub fn extend_row(&self, row: &mut Vec<f64>) {
        match self {
            FeatureValue::Scalar(value) => row.push(*value),
            FeatureValue::Vector(values) => row.extend_from_slice(values),
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Scalar(value)
    }
}

impl From<Vec<f64>> for FeatureValue {
    fn from(values: Vec<f64>) -> Self {
        FeatureValue::Vector(values)
    }
}
