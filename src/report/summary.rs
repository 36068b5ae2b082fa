use anyhow::{anyhow, Result};
use polars::prelude::*;

/// Join keys shared by every fund table. There is no single reliable
/// unique key across funds, so records are matched on the identifier plus
/// the instrument name.
const JOIN_KEYS: [&str; 2] = ["ID", "name"];

/// Per-fund columns carried into the summary, suffixed with the ticker.
const SUMMARY_COLUMNS: [&str; 7] = [
    "ID",
    "name",
    "balance",
    "valUSD",
    "pctVal",
    "avgPricePerShare",
    "amtInvested",
];

/// Builds the cross-fund summary: starts from the first fund's (ID, name)
/// pairs and full-outer-joins every fund's holdings onto it, coalescing
/// the join keys so each instrument appears on a single row.
pub fn build_summary(tables: &[(String, DataFrame)]) -> Result<DataFrame> {
    let (_, first) = tables
        .first()
        .ok_or_else(|| anyhow!("no fund tables to summarize"))?;
    let mut summary = first.select(JOIN_KEYS)?;

    for (ticker, df) in tables {
        let mut slice = df.select(SUMMARY_COLUMNS)?;
        for name in SUMMARY_COLUMNS {
            if JOIN_KEYS.contains(&name) {
                continue;
            }
            slice.rename(name, format!("{}_{}", name, ticker).into())?;
        }
        summary = summary
            .lazy()
            .join(
                slice.lazy(),
                [col("ID"), col("name")],
                [col("ID"), col("name")],
                JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
            )
            .collect()?;
    }

    Ok(summary)
}
