use anyhow::{anyhow, Result};
use std::fs;
use std::path::Path;

use super::flatten::{flatten, FlatRecord};
use super::nport_child;
use super::schema::ExtractionSchema;

/// Reads one NPORT-P filing from disk. An unreadable file is fatal for the
/// run; there is nothing to retry.
pub fn read_filing(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read filing {}: {}", path.display(), e))
}

/// Parses a filing and flattens every instrument node under
/// formData/invstOrSecs. A filing with an empty instrument list yields an
/// empty vector; a filing missing the fixed path does not conform to the
/// NPORT-P structure and is an error.
pub fn extract_records(xml: &str, schema: &ExtractionSchema) -> Result<Vec<FlatRecord>> {
    let doc =
        roxmltree::Document::parse(xml).map_err(|e| anyhow!("failed to parse filing XML: {}", e))?;
    let root = doc.root_element();
    let form_data =
        nport_child(root, "formData").ok_or_else(|| anyhow!("filing has no formData element"))?;
    let instruments = nport_child(form_data, "invstOrSecs")
        .ok_or_else(|| anyhow!("filing has no invstOrSecs element"))?;

    instruments
        .children()
        .filter(|n| n.is_element())
        .map(|n| flatten(n, schema))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<edgarSubmission xmlns="http://www.sec.gov/edgar/nport">
  <formData>
    <genInfo><regName>Test Trust</regName></genInfo>
    <invstOrSecs>
      <invstOrSec>
        <name>APPLE INC</name>
        <identifiers><isin value="US0378331005"/></identifiers>
        <valUSD>1000</valUSD>
      </invstOrSec>
      <invstOrSec>
        <name>MICROSOFT CORP</name>
        <identifiers><cusip value="594918104"/></identifiers>
        <valUSD>2000</valUSD>
      </invstOrSec>
    </invstOrSecs>
  </formData>
</edgarSubmission>"#;

    #[test]
    fn test_extract_records() {
        let schema = ExtractionSchema::nport_default();
        let records = extract_records(FILING, schema).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(schema, "name"), Some("APPLE INC"));
        assert_eq!(records[1].get(schema, "IDtype"), Some("cusip"));
        assert_eq!(records[1].get(schema, "ID"), Some("594918104"));
    }

    #[test]
    fn test_missing_form_data_is_error() {
        let schema = ExtractionSchema::nport_default();
        let xml = r#"<edgarSubmission xmlns="http://www.sec.gov/edgar/nport"/>"#;
        assert!(extract_records(xml, schema).is_err());
    }

    #[test]
    fn test_empty_instrument_list() {
        let schema = ExtractionSchema::nport_default();
        let xml = r#"<edgarSubmission xmlns="http://www.sec.gov/edgar/nport">
  <formData><invstOrSecs></invstOrSecs></formData>
</edgarSubmission>"#;
        assert!(extract_records(xml, schema).unwrap().is_empty());
    }
}
