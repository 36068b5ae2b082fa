use anyhow::Result;
use log::{debug, info};

use crate::core::config::PipelineConfig;
use crate::nport::filing;
use crate::nport::schema::ExtractionSchema;
use crate::report::{summary, table, xlsx};

/// Runs the whole extraction: one filing per configured fund, flattened
/// and tabulated, then the cross-fund summary, then the workbook. Each
/// filing is processed independently; any failure aborts the run.
pub fn run(config: &PipelineConfig) -> Result<()> {
    let schema = ExtractionSchema::nport_default();
    let mut fund_tables = Vec::with_capacity(config.funds.len());

    for fund in &config.funds {
        let path = config.input_dir.join(format!("{}.xml", fund.series_id));
        debug!("loading filing for {} from {}", fund.ticker, path.display());

        let xml = filing::read_filing(&path)?;
        let records = filing::extract_records(&xml, schema)?;
        let df = table::records_to_dataframe(&records, schema)?;
        let df = table::with_derived_metrics(df, fund.shares)?;

        info!(
            "{}: contains {} investment instruments",
            fund.ticker,
            df.height()
        );
        fund_tables.push((fund.ticker.clone(), df));
    }

    let summary = summary::build_summary(&fund_tables)?;
    xlsx::write_workbook(&config.output_path, &summary, &fund_tables)?;
    info!(
        "wrote summary and {} fund sheets to {}",
        fund_tables.len(),
        config.output_path.display()
    );

    Ok(())
}
