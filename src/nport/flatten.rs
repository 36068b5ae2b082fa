use anyhow::{anyhow, Result};
use roxmltree::Node;

use super::nport_child;
use super::schema::{ExtractionSchema, FieldRule};

/// Container tag holding exactly one typed identifier child per instrument.
const IDENTIFIERS_TAG: &str = "identifiers";
/// Field with a documented two-tier fallback: some filing variants carry the
/// issuer category as an attribute of `issuerConditional` instead of a
/// direct `issuerCat` tag.
const ISSUER_CATEGORY_FIELD: &str = "issuerCat";
const ISSUER_CONDITIONAL_TAG: &str = "issuerConditional";

/// One flattened investment record. Values align index-for-index with the
/// schema's `columns()`, so every record built from the same schema has an
/// identical column set regardless of which optional tags were present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatRecord {
    values: Vec<String>,
}

impl FlatRecord {
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn get<'a>(&'a self, schema: &ExtractionSchema, column: &str) -> Option<&'a str> {
        schema
            .column_index(column)
            .map(|i| self.values[i].as_str())
    }
}

/// Flattens one instrument node (`invstOrSec`) into a flat record.
///
/// Missing optional tags degrade to empty strings; a missing or malformed
/// `identifiers` container is a fatal error, since the filing format
/// guarantees exactly one typed identifier child per instrument. Callers
/// must not attempt per-filing recovery from that error.
pub fn flatten(node: Node, schema: &ExtractionSchema) -> Result<FlatRecord> {
    let mut values = Vec::with_capacity(schema.columns().len());

    // The identifier is unique in that its tag name varies (isin, cusip,
    // ticker, other). The tag's local name becomes IDtype, its value
    // attribute becomes ID.
    let identifiers = nport_child(node, IDENTIFIERS_TAG)
        .ok_or_else(|| anyhow!("instrument node has no identifiers container"))?;
    let id_child = identifiers
        .children()
        .find(|n| n.is_element())
        .ok_or_else(|| anyhow!("identifiers container holds no identifier element"))?;
    let id_value = id_child.attribute("value").ok_or_else(|| {
        anyhow!(
            "identifier element {} has no value attribute",
            id_child.tag_name().name()
        )
    })?;
    values.push(id_child.tag_name().name().to_string());
    values.push(id_value.to_string());

    for (key, rule) in schema.fields() {
        match rule {
            FieldRule::Text => {
                let value = match nport_child(node, key) {
                    Some(tag) => tag.text().unwrap_or("").to_string(),
                    // The fallback triggers only when the direct tag is
                    // absent, not when it is present with empty text.
                    None if key == ISSUER_CATEGORY_FIELD => issuer_category_fallback(node),
                    None => String::new(),
                };
                values.push(value);
            }
            FieldRule::Attrs(attrs) => {
                // Absence of the parent tag voids all its sub-attributes.
                let tag = nport_child(node, key);
                for attr in attrs {
                    let value = tag.and_then(|t| t.attribute(attr.as_str())).unwrap_or("");
                    values.push(value.to_string());
                }
            }
        }
    }

    Ok(FlatRecord { values })
}

fn issuer_category_fallback(node: Node) -> String {
    nport_child(node, ISSUER_CONDITIONAL_TAG)
        .and_then(|t| t.attribute(ISSUER_CATEGORY_FIELD))
        .unwrap_or("")
        .to_string()
}
