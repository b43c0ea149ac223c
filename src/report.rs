use std::fmt::Write as _;

use crate::error::CrawlError;
use crate::validator::UrlErrors;

/// Renders the error report to the textual form described in
/// spec.md §6: one block per erroring URL, with the URL, the error
/// kind, optionally the sorted list of missing fragments, and the
/// list of referring pages.
pub fn render(errors: &UrlErrors) -> String {
    let mut out = String::new();

    for (url, error) in errors.iter() {
        let _ = writeln!(out, "{url}  [{}]", error.kind.label());
        let _ = writeln!(out, "    {}", describe(&error.kind));

        if let Some(fragments) = &error.missing_fragments {
            let list = fragments.iter().cloned().collect::<Vec<_>>().join(", ");
            let _ = writeln!(out, "    missing fragments: {list}");
        }

        if error.refs.is_empty() {
            let _ = writeln!(out, "    referenced by: (root)");
        } else {
            let _ = writeln!(out, "    referenced by:");
            for reference in &error.refs {
                let _ = writeln!(out, "      - {reference}");
            }
        }

        out.push('\n');
    }

    out
}

fn describe(kind: &CrawlError) -> String {
    kind.to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use url::Url;

    use super::*;
    use crate::validator::PageError;

    #[test]
    fn renders_basic_not_found() {
        let mut report = std::collections::HashMap::new();
        report.insert(
            Url::parse("https://fixture/404").unwrap(),
            PageError {
                kind: CrawlError::NotFound,
                refs: Vec::new(),
                missing_fragments: None,
            },
        );
        let errors = crate::validator::test_support::from_map(report);

        let text = render(&errors);
        assert!(text.contains("https://fixture/404"));
        assert!(text.contains("404"));
    }

    #[test]
    fn renders_sorted_missing_fragments() {
        let mut report = std::collections::HashMap::new();
        let mut fragments = BTreeSet::new();
        fragments.insert("zeta".to_string());
        fragments.insert("alpha".to_string());
        report.insert(
            Url::parse("https://fixture/page").unwrap(),
            PageError {
                kind: CrawlError::MissingFragment,
                refs: vec![Url::parse("https://fixture/other").unwrap()],
                missing_fragments: Some(fragments),
            },
        );
        let errors = crate::validator::test_support::from_map(report);

        let text = render(&errors);
        let alpha_pos = text.find("alpha").unwrap();
        let zeta_pos = text.find("zeta").unwrap();
        assert!(alpha_pos < zeta_pos);
        assert!(text.contains("https://fixture/other"));
    }
}
