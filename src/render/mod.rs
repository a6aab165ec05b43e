//! Result rendering.
//!
//! Pure functions from the ordered result list to a display representation;
//! no side effects, fully derivable from the batch output. All
//! user-supplied and model-generated text is escaped before it is embedded
//! in markup.

use crate::batch::FileResult;
use crate::locale::{LocaleText, UiLang};

/// Escape text for embedding in HTML bodies and attributes.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn format_seconds(seconds: f64) -> String {
    format!("{:.2}", seconds)
}

fn pane(title: &str, body: &str, placeholder: &str) -> String {
    let content = if body.is_empty() { placeholder } else { body };
    format!(
        "<div class='result-pane'>\
         <div class='pane-title'>{}</div>\
         <div class='pane-body'>{}</div>\
         </div>",
        html_escape(title),
        html_escape(content)
    )
}

/// Render the result set as escaped HTML cards.
///
/// The summary and bullets panes appear only when the corresponding
/// enrichment was requested for the batch; empty pane text renders the
/// localized placeholder instead.
pub fn render_html(
    results: &[FileResult],
    summarize_enabled: bool,
    bullets_enabled: bool,
    lang: UiLang,
) -> String {
    let texts = LocaleText::get(lang);

    if results.is_empty() {
        return format!(
            "<div class='empty'>{}</div>",
            html_escape(texts.empty_results)
        );
    }

    let mut cards = String::new();
    for result in results {
        let mut panes = pane(
            texts.pane_transcription,
            &result.text,
            texts.transcription_empty,
        );
        if summarize_enabled {
            panes.push_str(&pane(
                texts.pane_summary,
                &result.summary,
                texts.summary_placeholder,
            ));
        }
        if bullets_enabled {
            panes.push_str(&pane(
                texts.pane_bullets,
                &result.bullets,
                texts.bullets_placeholder,
            ));
        }

        let time = texts
            .result_time
            .replace("{seconds}", &format_seconds(result.seconds));

        cards.push_str(&format!(
            "<div class='result-card'>\
             <div class='result-header'>\
             <div class='result-title'>{}</div>\
             </div>\
             <div class='result-meta'>{}</div>\
             <div class='result-body'>{}</div>\
             </div>",
            html_escape(&result.file),
            html_escape(&time),
            panes
        ));
    }

    format!("<div class='results-grid'>{}</div>", cards)
}

/// Render the result set as plain text for terminal output.
pub fn render_text(
    results: &[FileResult],
    summarize_enabled: bool,
    bullets_enabled: bool,
    lang: UiLang,
) -> String {
    let texts = LocaleText::get(lang);

    if results.is_empty() {
        return texts.empty_results.to_string();
    }

    let mut out = String::new();
    for result in results {
        let time = texts
            .result_time
            .replace("{seconds}", &format_seconds(result.seconds));
        out.push_str(&format!("=== {} ({})\n", result.file, time));

        let text = if result.text.is_empty() {
            texts.transcription_empty
        } else {
            &result.text
        };
        out.push_str(&format!("{}:\n{}\n", texts.pane_transcription, text));

        if summarize_enabled {
            let summary = if result.summary.is_empty() {
                texts.summary_placeholder
            } else {
                &result.summary
            };
            out.push_str(&format!("\n{}:\n{}\n", texts.pane_summary, summary));
        }
        if bullets_enabled {
            let bullets = if result.bullets.is_empty() {
                texts.bullets_placeholder
            } else {
                &result.bullets
            };
            out.push_str(&format!("\n{}:\n{}\n", texts.pane_bullets, bullets));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(file: &str, text: &str, summary: &str, bullets: &str, seconds: f64) -> FileResult {
        FileResult {
            file: file.to_string(),
            text: text.to_string(),
            summary: summary.to_string(),
            bullets: bullets.to_string(),
            seconds,
        }
    }

    #[test]
    fn test_empty_results_html() {
        let html = render_html(&[], false, false, UiLang::En);
        assert!(html.contains("No results to display."));
        assert!(html.contains("class='empty'"));
    }

    #[test]
    fn test_single_card() {
        let results = vec![result("a.wav", "hello", "", "", 1.5)];
        let html = render_html(&results, false, false, UiLang::En);

        assert!(html.contains("a.wav"));
        assert!(html.contains("hello"));
        assert!(html.contains("Time: 1.50s"));
        assert!(!html.contains("Summary"));
        assert!(!html.contains("Bullet list"));
    }

    #[test]
    fn test_seconds_formatted_to_two_decimals() {
        let results = vec![result("a.wav", "x", "", "", 0.123456)];
        let html = render_html(&results, false, false, UiLang::En);
        assert!(html.contains("0.12s"));

        let results = vec![result("a.wav", "x", "", "", 0.0)];
        let html = render_html(&results, false, false, UiLang::En);
        assert!(html.contains("0.00s"));
    }

    #[test]
    fn test_panes_follow_flags() {
        let results = vec![result("a.wav", "text", "the summary", "the bullets", 1.0)];

        let html = render_html(&results, true, false, UiLang::En);
        assert!(html.contains("the summary"));
        assert!(!html.contains("the bullets"));

        let html = render_html(&results, true, true, UiLang::En);
        assert!(html.contains("the summary"));
        assert!(html.contains("the bullets"));
    }

    #[test]
    fn test_placeholders_for_empty_panes() {
        let results = vec![result("a.wav", "", "", "", 0.0)];
        let html = render_html(&results, true, true, UiLang::En);

        assert!(html.contains("Empty transcription."));
        assert!(html.contains("Summary not available."));
        assert!(html.contains("Bullet list not available."));
    }

    #[test]
    fn test_html_escaping() {
        let results = vec![result(
            "<evil>.wav",
            "a < b & \"c\" > 'd'",
            "<script>alert(1)</script>",
            "",
            1.0,
        )];
        let html = render_html(&results, true, false, UiLang::En);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;evil&gt;.wav"));
        assert!(html.contains("a &lt; b &amp; &quot;c&quot; &gt; &#39;d&#39;"));
    }

    #[test]
    fn test_localized_card_labels() {
        let results = vec![result("a.wav", "ciao", "", "", 2.0)];
        let html = render_html(&results, true, true, UiLang::It);

        assert!(html.contains("Trascrizione"));
        assert!(html.contains("Riassunto non disponibile."));
        assert!(html.contains("Lista puntata non disponibile."));
        assert!(html.contains("Tempo: 2.00s"));
    }

    #[test]
    fn test_cards_keep_result_order() {
        let results = vec![
            result("first.wav", "one", "", "", 1.0),
            result("second.wav", "two", "", "", 2.0),
        ];
        let html = render_html(&results, false, false, UiLang::En);

        let first = html.find("first.wav").unwrap();
        let second = html.find("second.wav").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_render_text_empty() {
        let text = render_text(&[], false, false, UiLang::It);
        assert_eq!(text, "Nessun risultato da mostrare.");
    }

    #[test]
    fn test_render_text_sections() {
        let results = vec![result("a.wav", "hello", "sum", "", 1.0)];
        let text = render_text(&results, true, true, UiLang::En);

        assert!(text.contains("=== a.wav (Time: 1.00s)"));
        assert!(text.contains("Transcription:\nhello"));
        assert!(text.contains("Summary:\nsum"));
        assert!(text.contains("Bullet list:\nBullet list not available."));
    }
}
