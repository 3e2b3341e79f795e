//! One-hot encoding of categorical columns

use std::collections::BTreeSet;

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};

/// Name of the indicator column for `value` of `column`.
pub fn indicator_name(column: &str, value: &str) -> String {
    format!("{}_{}", column, value)
}

/// Replace each categorical column with one `UInt8` indicator per observed value.
///
/// Indicators are appended after the existing columns in sorted value order;
/// the source column is dropped. Returns the names of the created columns.
pub fn one_hot_encode(df: &mut DataFrame, categorical: &[String]) -> PipelineResult<Vec<String>> {
    let mut created = Vec::new();

    for name in categorical {
        let source = df.drop_in_place(name)?;
        let ca = source.str()?;

        let categories: BTreeSet<&str> = ca.iter().flatten().collect();

        for category in categories {
            let indicator = indicator_name(name, category);
            if df.get_column_index(&indicator).is_some() {
                return Err(PipelineError::Encoding(format!(
                    "indicator column '{}' for '{}' collides with an existing column",
                    indicator, name
                )));
            }

            let values: Vec<u8> = ca
                .iter()
                .map(|v| u8::from(v == Some(category)))
                .collect();
            df.with_column(Column::new(indicator.as_str().into(), values))?;
            created.push(indicator);
        }
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_replaces_source_column() {
        let mut df = df! {
            "Gr Liv Area" => [1710.0f64, 1262.0, 1786.0],
            "Street" => ["Pave", "Grvl", "Pave"],
        }
        .unwrap();

        let created = one_hot_encode(&mut df, &["Street".to_string()]).unwrap();

        assert_eq!(created, vec!["Street_Grvl", "Street_Pave"]);
        assert!(df.column("Street").is_err());
        let pave: Vec<u8> = df
            .column("Street_Pave")
            .unwrap()
            .u8()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(pave, vec![1, 0, 1]);
    }

    #[test]
    fn test_encode_collision_is_error() {
        let mut df = df! {
            "Street" => ["Pave", "Grvl"],
            "Street_Pave" => [1.0f64, 0.0],
        }
        .unwrap();

        let err = one_hot_encode(&mut df, &["Street".to_string()]).unwrap_err();
        assert!(matches!(err, PipelineError::Encoding(_)));
    }
}
