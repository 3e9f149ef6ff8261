use crate::parsers::Row;
use scraper::{ElementRef, Html, Selector};

/// Parses a report leniently; malformed markup only degrades the tree
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Builds the selector matching `element` nodes whose class attribute contains `marker`
pub fn marker_selector(element: &str, marker: &str) -> Result<Selector, String> {
    if element.is_empty() || !element.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("unusable row element {:?}", element));
    }
    if marker.is_empty() || marker.contains(['"', '\\']) {
        return Err(format!("unusable row marker {:?}", marker));
    }
    Selector::parse(&format!("{}[class*=\"{}\"]", element, marker)).map_err(|e| e.to_string())
}

/// Collects the matching rows in document order, numbering them from 1
pub fn select_rows(doc: &Html, selector: &Selector) -> Result<Vec<Row>, String> {
    let anchor_selector = Selector::parse("a").map_err(|e| e.to_string())?;

    let rows = doc
        .select(selector)
        .enumerate()
        .map(|(i, node)| Row::new(i + 1, collect_hrefs(node, &anchor_selector)))
        .collect::<Vec<_>>();

    ::log::debug!("Report holds {} matching rows", rows.len());
    Ok(rows)
}

/// Reads the href of every descendant anchor; a missing href reads as ""
fn collect_hrefs(node: ElementRef<'_>, anchor_selector: &Selector) -> Vec<String> {
    node.select(anchor_selector)
        .map(|a| a.value().attr("href").unwrap_or_default().to_string())
        .collect()
}
