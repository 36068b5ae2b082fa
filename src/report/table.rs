use anyhow::Result;
use polars::prelude::*;

use crate::nport::flatten::FlatRecord;
use crate::nport::schema::ExtractionSchema;

/// Columns coerced to floats before the derived metrics are computed.
const NUMERIC_COLUMNS: [&str; 3] = ["valUSD", "balance", "pctVal"];

/// Assembles flat records into a DataFrame with one column per schema
/// column, in schema order. The flattener guarantees every record has the
/// full column set, so no per-record branching is needed here.
pub fn records_to_dataframe(
    records: &[FlatRecord],
    schema: &ExtractionSchema,
) -> Result<DataFrame> {
    let columns: Vec<Column> = schema
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values: Vec<String> = records.iter().map(|r| r.values()[i].clone()).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Coerces the numeric columns and appends the derived metrics:
/// average price per share, and the amount invested given the caller's
/// share count. "N/A" and empty values become nulls and stay null through
/// the arithmetic.
pub fn with_derived_metrics(df: DataFrame, shares: f64) -> Result<DataFrame> {
    let mut lf = df.lazy();
    for name in NUMERIC_COLUMNS {
        lf = lf.with_column(
            when(col(name).eq(lit("N/A")).or(col(name).eq(lit(""))))
                .then(lit(NULL))
                .otherwise(col(name))
                .cast(DataType::Float64)
                .alias(name),
        );
    }
    let df = lf
        .with_column((col("valUSD") / col("balance")).alias("avgPricePerShare"))
        .with_column(
            (col("avgPricePerShare") * col("pctVal").abs() * lit(shares)).alias("amtInvested"),
        )
        .collect()?;
    Ok(df)
}
