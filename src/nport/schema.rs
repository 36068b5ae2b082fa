use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;

/// Column name for the identifier type (e.g. "isin", "cusip", "ticker").
pub const ID_TYPE_COLUMN: &str = "IDtype";
/// Column name for the identifier value itself.
pub const ID_COLUMN: &str = "ID";

/// How to extract one schema field from an instrument node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldRule {
    /// Read the text content of the same-named child tag.
    Text,
    /// Descend into the same-named child tag and read each listed attribute.
    /// Every attribute becomes its own output column.
    Attrs(Vec<String>),
}

/// Declarative description of the data elements to pull out of each
/// investment-instrument node. Ordered, immutable after construction; the
/// iteration order fixes the column order of every extracted record.
#[derive(Clone, Debug)]
pub struct ExtractionSchema {
    fields: Vec<(String, FieldRule)>,
    columns: Vec<String>,
}

impl ExtractionSchema {
    /// Builds a schema, deriving the fixed output column set up front: the
    /// two identifier columns, then one column per `Text` field and one per
    /// attribute of every `Attrs` field.
    pub fn new(fields: Vec<(String, FieldRule)>) -> Result<Self> {
        let mut columns = vec![ID_TYPE_COLUMN.to_string(), ID_COLUMN.to_string()];
        for (key, rule) in &fields {
            match rule {
                FieldRule::Text => columns.push(key.clone()),
                FieldRule::Attrs(attrs) => {
                    if attrs.is_empty() {
                        return Err(anyhow!("schema field {} lists no sub-attributes", key));
                    }
                    columns.extend(attrs.iter().cloned());
                }
            }
        }
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].contains(col) {
                return Err(anyhow!("duplicate column in extraction schema: {}", col));
            }
        }
        Ok(ExtractionSchema { fields, columns })
    }

    /// The default NPORT-P field set.
    pub fn nport_default() -> &'static ExtractionSchema {
        &NPORT_DEFAULT
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Output column names, in record order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

static NPORT_DEFAULT: Lazy<ExtractionSchema> = Lazy::new(|| {
    let text = FieldRule::Text;
    ExtractionSchema::new(vec![
        ("name".into(), text.clone()),
        ("lei".into(), text.clone()),
        ("title".into(), text.clone()),
        ("cusip".into(), text.clone()),
        ("balance".into(), text.clone()),
        ("units".into(), text.clone()),
        (
            "currencyConditional".into(),
            FieldRule::Attrs(vec!["curCd".into(), "exchangeRt".into()]),
        ),
        ("valUSD".into(), text.clone()),
        ("pctVal".into(), text.clone()),
        ("payoffProfile".into(), text.clone()),
        ("assetCat".into(), text.clone()),
        ("issuerCat".into(), text.clone()),
        ("invCountry".into(), text.clone()),
        ("isRestrictedSec".into(), text.clone()),
        ("fairValLevel".into(), text),
    ])
    .expect("default NPORT schema is well formed")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_columns() {
        let schema = ExtractionSchema::nport_default();
        let columns = schema.columns();
        assert_eq!(columns[0], "IDtype");
        assert_eq!(columns[1], "ID");
        // 2 identifier columns + 14 text fields + 2 currency attributes
        assert_eq!(columns.len(), 18);
        assert!(columns.contains(&"curCd".to_string()));
        assert!(columns.contains(&"exchangeRt".to_string()));
        // The compound parent tag itself is not a column.
        assert!(!columns.contains(&"currencyConditional".to_string()));
    }

    #[test]
    fn test_column_order_follows_field_order() {
        let schema = ExtractionSchema::new(vec![
            ("b".into(), FieldRule::Text),
            ("a".into(), FieldRule::Attrs(vec!["x".into(), "y".into()])),
            ("c".into(), FieldRule::Text),
        ])
        .unwrap();
        assert_eq!(schema.columns(), &["IDtype", "ID", "b", "x", "y", "c"]);
        assert_eq!(schema.column_index("y"), Some(4));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        assert!(ExtractionSchema::new(vec![
            ("a".into(), FieldRule::Text),
            ("a".into(), FieldRule::Text),
        ])
        .is_err());
        // An attribute name colliding with a text field is also a duplicate.
        assert!(ExtractionSchema::new(vec![
            ("a".into(), FieldRule::Text),
            ("b".into(), FieldRule::Attrs(vec!["a".into()])),
        ])
        .is_err());
    }

    #[test]
    fn test_empty_attr_list_rejected() {
        assert!(ExtractionSchema::new(vec![("a".into(), FieldRule::Attrs(vec![]))]).is_err());
    }
}
