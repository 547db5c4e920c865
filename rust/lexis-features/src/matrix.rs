//! The feature matrix: one row per (instance, candidate) pair, one column
//! per emitted feature value.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FeatureError;
use crate::feature::FeatureDescriptor;
use crate::orientation::Orientation;
use crate::value::FeatureValue;

/// Identifier and orientation of one matrix column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub identifier: String,
    pub orientation: Orientation,
}

/// Feature values of a batch, rows in candidate order and columns in
/// registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    columns: Vec<Column>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Concatenate per-descriptor outputs row by row. `outputs[d][r]` is the
    /// value of descriptor `d` for row `r`.
    pub fn assemble(
        descriptors: &[FeatureDescriptor],
        outputs: Vec<Vec<FeatureValue>>,
        rows: usize,
    ) -> Result<Self, FeatureError> {
        let columns: Vec<Column> = descriptors
            .iter()
            .flat_map(|descriptor| {
                descriptor.columns.iter().map(|identifier| Column {
                    identifier: identifier.clone(),
                    orientation: descriptor.orientation,
                })
            })
            .collect();

        let mut matrix = vec![Vec::with_capacity(columns.len()); rows];
        for (descriptor, values) in descriptors.iter().zip(outputs) {
            if values.len() != rows {
                return Err(FeatureError::OutputWidth {
                    feature: descriptor.columns.first().cloned().unwrap_or_default(),
                    expected: rows,
                    found: values.len(),
                });
            }
            for (row, value) in matrix.iter_mut().zip(&values) {
                value.extend_row(row);
            }
        }

        if let Some(row) = matrix.iter().find(|row| row.len() != columns.len()) {
            return Err(FeatureError::OutputWidth {
                feature: "feature matrix".to_string(),
                expected: columns.len(),
                found: row.len(),
            });
        }

        Ok(FeatureMatrix {
            columns,
            rows: matrix,
        })
    }

    /// Divide every column by its Euclidean norm. Columns whose norm is zero
    /// (or not finite) are left unchanged.
    pub fn normalize_columns(&mut self) {
        for column in 0..self.columns.len() {
            let norm = self
                .rows
                .iter()
                .map(|row| row[column] * row[column])
                .sum::<f64>()
                .sqrt();
            if norm == 0.0 || !norm.is_finite() {
                debug!(
                    column = %self.columns[column].identifier,
                    norm,
                    "column left unnormalized"
                );
                continue;
            }
            for row in &mut self.rows {
                row[column] /= norm;
            }
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// The values of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index).copied())
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::Batch;
    use crate::feature::Feature;
    use pretty_assertions::assert_eq;

    struct Fixed(Vec<String>);

    impl Feature for Fixed {
        fn columns(&self) -> Vec<String> {
            self.0.clone()
        }

        fn compute(&self, _: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
            Ok(Vec::new())
        }
    }

    fn descriptors() -> Vec<FeatureDescriptor> {
        vec![
            FeatureDescriptor::new(Box::new(Fixed(vec!["length".into()])), Orientation::Complexity),
            FeatureDescriptor::new(
                Box::new(Fixed(vec!["v0".into(), "v1".into()])),
                Orientation::Simplicity,
            ),
        ]
    }

    #[test]
    fn scalars_and_vectors_flatten_inline() {
        let matrix = FeatureMatrix::assemble(
            &descriptors(),
            vec![
                vec![3.0.into(), 4.0.into()],
                vec![vec![1.0, 2.0].into(), vec![0.0, 0.0].into()],
            ],
            2,
        )
        .unwrap();

        assert_eq!(matrix.rows(), &[vec![3.0, 1.0, 2.0], vec![4.0, 0.0, 0.0]]);
        assert_eq!(matrix.columns()[1].orientation, Orientation::Simplicity);
        assert_eq!(matrix.width(), 3);
    }

    #[test]
    fn missing_rows_are_rejected() {
        let result = FeatureMatrix::assemble(
            &descriptors(),
            vec![vec![3.0.into()], vec![vec![1.0, 2.0].into()]],
            2,
        );
        assert!(matches!(result, Err(FeatureError::OutputWidth { .. })));
    }

    #[test]
    fn normalization_gives_unit_columns_and_keeps_zero_columns() {
        let mut matrix = FeatureMatrix::assemble(
            &descriptors(),
            vec![
                vec![3.0.into(), 4.0.into()],
                vec![vec![1.0, 0.0].into(), vec![0.0, 0.0].into()],
            ],
            2,
        )
        .unwrap();
        matrix.normalize_columns();

        assert_eq!(matrix.column(0).collect::<Vec<_>>(), vec![0.6, 0.8]);
        assert_eq!(matrix.column(1).collect::<Vec<_>>(), vec![1.0, 0.0]);
        assert_eq!(matrix.column(2).collect::<Vec<_>>(), vec![0.0, 0.0]);
    }
}
