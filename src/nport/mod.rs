pub mod filing;
pub mod flatten;
pub mod schema;

/// Namespace used on every tag in NPORT-P filings.
pub const NPORT_NS: &str = "http://www.sec.gov/edgar/nport";

/// Finds a direct child element with the given local name in the NPORT namespace.
pub(crate) fn nport_child<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children().find(|n| {
        n.is_element() && n.tag_name().name() == name && n.tag_name().namespace() == Some(NPORT_NS)
    })
}
