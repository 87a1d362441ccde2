//! Pretty-print diagnostics with source context using ariadne

use crate::token::Analysis;
use ariadne::{Color, Label, Report, ReportKind, Source};

/// Render every diagnostic in `analysis` against `source`.
pub fn format_diagnostics(source: &str, filename: &str, analysis: &Analysis) -> String {
    let mut output = Vec::new();

    for diagnostic in &analysis.diagnostics {
        let start = diagnostic.position.min(source.len());
        let end = (diagnostic.position + diagnostic.length).clamp(start, source.len());

        let report = Report::build(ReportKind::Error, filename, start)
            .with_message(&diagnostic.message)
            .with_label(
                Label::new((filename, start..end))
                    .with_color(Color::Red)
                    .with_message(&diagnostic.message),
            )
            .finish();

        report
            .write((filename, Source::from(source)), &mut output)
            .ok();
    }

    String::from_utf8(output).unwrap_or_else(|_| "Error formatting failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::analyze;

    #[test]
    fn test_formats_unterminated_string() {
        let source = "import \"abc";
        let analysis = analyze(source);
        assert!(!analysis.diagnostics.is_empty());

        let rendered = format_diagnostics(source, "test.proto", &analysis);
        assert!(rendered.contains("string is not terminated"));
    }

    #[test]
    fn test_clean_source_renders_nothing() {
        let source = "message M {}";
        let analysis = analyze(source);
        let rendered = format_diagnostics(source, "test.proto", &analysis);
        assert!(rendered.is_empty());
    }
}
