use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One fund to process: its ticker, the SEC series identifier naming its
/// filing file, and the share count used for the invested-amount metric.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FundConfig {
    pub ticker: String,
    pub series_id: String,
    pub shares: f64,
}

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub funds: Vec<FundConfig>,
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
}

impl PipelineConfig {
    pub fn new(funds: Vec<FundConfig>, input_dir: PathBuf, output_path: PathBuf) -> Self {
        Self {
            funds,
            input_dir,
            output_path,
        }
    }

    /// Loads a fund list from a JSON file: an array of
    /// `{"ticker": ..., "series_id": ..., "shares": ...}` objects.
    pub fn load_funds(path: &Path) -> Result<Vec<FundConfig>> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read fund list {}: {}", path.display(), e))?;
        let funds: Vec<FundConfig> = serde_json::from_str(&content)
            .map_err(|e| anyhow!("failed to parse fund list {}: {}", path.display(), e))?;
        if funds.is_empty() {
            return Err(anyhow!("fund list {} is empty", path.display()));
        }
        Ok(funds)
    }

    /// The built-in fund list.
    pub fn default_funds() -> Vec<FundConfig> {
        let funds = [
            ("VEMIX", "S000005786", 62.01),
            ("VIIIX", "S000002853", 7.065),
            ("VTIVX", "S000002574", 0.045),
            ("VMCPX", "S000002844", 4.66),
            ("VSCPX", "S000002845", 5.041),
            ("FSMDX", "S000033637", 91.872),
            ("FSSNX", "S000033638", 112.97),
            ("VTSPX", "S000038501", 1197.552),
            ("FXAIX", "S000006027", 33.225),
        ];
        funds
            .iter()
            .map(|(ticker, series_id, shares)| FundConfig {
                ticker: ticker.to_string(),
                series_id: series_id.to_string(),
                shares: *shares,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_funds() {
        let funds = PipelineConfig::default_funds();
        assert_eq!(funds.len(), 9);
        assert_eq!(funds[0].ticker, "VEMIX");
        assert_eq!(funds[0].series_id, "S000005786");
    }

    #[test]
    fn test_load_funds_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("funds.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[{{"ticker": "FXAIX", "series_id": "S000006027", "shares": 33.225}}]"#
        )
        .unwrap();

        let funds = PipelineConfig::load_funds(&path).unwrap();
        assert_eq!(funds.len(), 1);
        assert_eq!(funds[0].ticker, "FXAIX");
        assert_eq!(funds[0].shares, 33.225);
    }

    #[test]
    fn test_empty_fund_list_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("funds.json");
        fs::write(&path, "[]").unwrap();
        assert!(PipelineConfig::load_funds(&path).is_err());
    }
}
