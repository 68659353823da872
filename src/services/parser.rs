use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::LogAnalysisResponse;

static NUMBERED_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").unwrap());
static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-\s*").unwrap());

/// Splits a model reply into the three marker-delimited sections. Total:
/// missing markers degrade to empty fields, never to an error.
pub fn parse_analysis(analysis: &str) -> LogAnalysisResponse {
    let root_cause = extract_section(analysis, "ROOT_CAUSE:", Some("POSSIBLE_FIXES:"));
    let fixes_text = extract_section(analysis, "POSSIBLE_FIXES:", Some("CONTEXT:"));
    let context = extract_section(analysis, "CONTEXT:", None);

    LogAnalysisResponse::new(root_cause, parse_fixes(&fixes_text), context)
}

/// Returns the trimmed text between `start` and `end`. The end marker is
/// searched from the section start; when it is absent (or `None` for the
/// terminal section) the section runs to the end of the text. Markers are
/// literal and case-sensitive.
pub fn extract_section(text: &str, start: &str, end: Option<&str>) -> String {
    let Some(start_idx) = text.find(start) else {
        return String::new();
    };

    let section_start = start_idx + start.len();
    let section_end = end
        .and_then(|marker| text[section_start..].find(marker))
        .map(|offset| section_start + offset)
        .unwrap_or(text.len());

    text[section_start..section_end].trim().to_string()
}

/// Normalizes the fixes region into individual items: keeps lines shaped
/// like `1. ...` or `- ...` and strips the list prefix. If no line
/// qualifies, the whole region is returned as a single item so the caller
/// never loses content the model produced.
pub fn parse_fixes(fixes_text: &str) -> Vec<String> {
    let fixes: Vec<String> = fixes_text
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty() && (NUMBERED_PREFIX.is_match(line) || line.starts_with('-'))
        })
        .map(|line| {
            let stripped = NUMBERED_PREFIX.replace(line, "");
            BULLET_PREFIX.replace(&stripped, "").into_owned()
        })
        .collect();

    if fixes.is_empty() {
        vec![fixes_text.to_string()]
    } else {
        fixes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn extract_section_returns_empty_when_marker_is_absent() {
        let text = "nothing to see here";
        assert_eq!(extract_section(text, "ROOT_CAUSE:", Some("POSSIBLE_FIXES:")), "");
        assert_eq!(extract_section(text, "CONTEXT:", None), "");
    }

    #[test]
    fn extract_section_stops_at_the_end_marker() {
        let text = "POSSIBLE_FIXES:\n1. Fix A\nCONTEXT:\nstuff";
        assert_eq!(
            extract_section(text, "POSSIBLE_FIXES:", Some("CONTEXT:")),
            "1. Fix A"
        );
    }

    #[test]
    fn extract_section_runs_to_the_end_when_end_marker_is_missing() {
        let text = "ROOT_CAUSE:\ndisk full\nno more markers";
        assert_eq!(
            extract_section(text, "ROOT_CAUSE:", Some("POSSIBLE_FIXES:")),
            "disk full\nno more markers"
        );
    }

    #[test]
    fn terminal_section_is_open_ended() {
        let text = "CONTEXT:\nthe disk filled up overnight\n";
        assert_eq!(
            extract_section(text, "CONTEXT:", None),
            "the disk filled up overnight"
        );
    }

    #[rstest]
    #[case(
        "1. Restart the service\n- Check the config\nNote: unrelated line",
        vec!["Restart the service", "Check the config"]
    )]
    #[case("23. Rotate the logs", vec!["Rotate the logs"])]
    #[case("-Check permissions", vec!["Check permissions"])]
    #[case("  2.  Reindex   \n\n  - Vacuum  ", vec!["Reindex", "Vacuum"])]
    fn parse_fixes_keeps_numbered_and_bulleted_lines(
        #[case] input: &str,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(parse_fixes(input), expected);
    }

    #[test]
    fn parse_fixes_falls_back_to_the_whole_region() {
        assert_eq!(
            parse_fixes("just a sentence with no markers"),
            vec!["just a sentence with no markers"]
        );
    }

    #[test]
    fn parse_fixes_of_empty_region_yields_single_empty_item() {
        assert_eq!(parse_fixes(""), vec![""]);
    }

    #[test]
    fn parse_analysis_extracts_all_three_sections() {
        let reply = "ROOT_CAUSE:\nOut of memory\n\nPOSSIBLE_FIXES:\n1. Raise the heap limit\n2. Fix the leak\n\nCONTEXT:\nThe JVM was killed by the OOM killer";
        let result = parse_analysis(reply);

        assert_eq!(result.root_cause.as_deref(), Some("Out of memory"));
        assert_eq!(
            result.possible_fixes,
            Some(vec![
                "Raise the heap limit".to_string(),
                "Fix the leak".to_string()
            ])
        );
        assert_eq!(
            result.context.as_deref(),
            Some("The JVM was killed by the OOM killer")
        );
    }

    #[test]
    fn parse_analysis_without_markers_degrades_to_empty_fields() {
        let result = parse_analysis("the model ignored the format entirely");

        assert_eq!(result.root_cause.as_deref(), Some(""));
        assert_eq!(result.possible_fixes, Some(vec!["".to_string()]));
        assert_eq!(result.context.as_deref(), Some(""));
    }
}
