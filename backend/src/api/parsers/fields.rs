use chrono::{DateTime, NaiveDate, NaiveDateTime};
use roxmltree::Node;

/// Read a field from an attribute, or failing that from a child element.
/// Blank values count as missing.
pub fn field(node: Node, name: &str) -> Option<String> {
    node.attribute(name)
        .map(str::to_string)
        .or_else(|| child_text(node, name))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn child_text(node: Node, name: &str) -> Option<String> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
        .and_then(|child| child.text())
        .map(str::to_string)
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time or an RFC 3339 offset
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}
