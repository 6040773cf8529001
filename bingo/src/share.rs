use serde_json::Value;

use crate::{Grid, ImportError};

/// Query parameter that carries the card labels in a share link,
/// including the `=` separator.
const SHARE_PARAM: &str = "cards=";

/// Parses a share payload into its label sequence.
///
/// The payload must be a JSON array of strings; anything else is rejected
/// before it can reach the grid. The two failure modes are kept apart so
/// the UI can tell "not JSON" from "JSON of the wrong shape".
pub fn import_labels(payload: &str) -> Result<Vec<String>, ImportError> {
    let value: Value = serde_json::from_str(payload).map_err(|_| ImportError::MalformedPayload)?;
    let Value::Array(items) = value else {
        return Err(ImportError::InvalidShape);
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(label) => Ok(label),
            _ => Err(ImportError::InvalidShape),
        })
        .collect()
}

/// Builds the link that reproduces this card on somebody else's screen.
///
/// The payload is the raw JSON export appended as a query parameter.
pub fn share_url(base: &str, grid: &Grid) -> String {
    // Serializing a Vec<String> cannot fail.
    let payload = serde_json::to_string(&grid.export_labels()).unwrap();
    format!("{}?{}{}", base.trim_end_matches('?'), SHARE_PARAM, payload)
}

/// Pulls the label payload out of a share link.
///
/// Accepts a full link (`...?cards=[...]`), a bare `cards=[...]` pair, or
/// the naked payload itself. Everything after the parameter belongs to the
/// payload, since the JSON is embedded unescaped. Returns `None` for a
/// link whose query string has no `cards` parameter.
pub fn extract_payload(link: &str) -> Option<&str> {
    match link.split_once('?') {
        Some((_, query)) => query.split_once(SHARE_PARAM).map(|(_, payload)| payload),
        None => Some(link.strip_prefix(SHARE_PARAM).unwrap_or(link)),
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::CheckedGrid;

    #[test]
    fn rejects_garbage() {
        assert_eq!(import_labels("not json"), Err(ImportError::MalformedPayload));
        assert_eq!(import_labels(""), Err(ImportError::MalformedPayload));
    }

    #[test]
    fn rejects_wrong_shapes() {
        assert_eq!(import_labels("{\"a\":1}"), Err(ImportError::InvalidShape));
        assert_eq!(import_labels("\"just a string\""), Err(ImportError::InvalidShape));
        assert_eq!(import_labels("[\"a\",1]"), Err(ImportError::InvalidShape));
    }

    #[test]
    fn accepts_a_string_array() {
        assert_eq!(
            import_labels("[\"a\",\"b\"]"),
            Ok(vec![String::from("a"), String::from("b")])
        );
        assert_eq!(import_labels("[]"), Ok(vec![]));
    }

    #[test]
    fn share_link_round_trip() {
        let grid = Grid::with_labels(&["first", "second & third"]);
        let url = share_url("https://bingo.example.com", &grid);
        let payload = extract_payload(&url).unwrap();
        assert_eq!(import_labels(payload), Ok(grid.export_labels()));
    }

    #[test]
    fn extract_handles_bare_payloads() {
        assert_eq!(extract_payload("[\"a\"]"), Some("[\"a\"]"));
        assert_eq!(extract_payload("cards=[\"a\"]"), Some("[\"a\"]"));
        assert_eq!(extract_payload("https://example.com?other=1"), None);
    }

    quickcheck! {
        fn export_survives_a_round_trip(input: CheckedGrid) -> bool {
            let labels = input.0.export_labels();
            // The export only ever contains trimmed labels, so importing
            // it and exporting again is a fixed point.
            let json = serde_json::to_string(&labels).unwrap();
            let imported = import_labels(&json).unwrap();
            imported == labels && Grid::with_labels(&imported).export_labels() == labels
        }
    }
}
