//! Column typing captured at load time

use polars::prelude::*;

/// How a column is treated by the preprocessing stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Numeric and categorical column names, in dataset order.
///
/// Columns of any other dtype (booleans, dates) belong to neither list and
/// are left untouched by imputation, encoding and scaling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnPartition {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

/// Split the columns of a freshly loaded dataset by dtype.
pub fn partition_columns(df: &DataFrame) -> ColumnPartition {
    let mut partition = ColumnPartition::default();

    for col in df.get_columns() {
        let dtype = col.dtype();
        if dtype.is_primitive_numeric() {
            partition.numeric.push(col.name().to_string());
        } else if matches!(dtype, DataType::String) {
            partition.categorical.push(col.name().to_string());
        }
    }

    partition
}
