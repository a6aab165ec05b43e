//! Interface language tables.
//!
//! All user-visible strings live here: enrichment prompt templates, error
//! messages substituted into result slots, and the labels the renderer
//! needs. Adding a language means adding one `LocaleText` constant and one
//! arm in the lookup functions.

use serde::{Deserialize, Serialize};

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiLang {
    /// Italian (default)
    #[default]
    It,
    /// English
    En,
}

impl UiLang {
    /// Parse an interface language code, falling back to the default for
    /// unknown codes.
    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "it" => Self::It,
            "en" => Self::En,
            _ => Self::default(),
        }
    }

    /// The interface language code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::It => "it",
            Self::En => "en",
        }
    }

    /// Language name passed to the speech-recognition engine.
    ///
    /// Unknown interface codes never reach this point because `from_code`
    /// already falls back to the default.
    pub fn asr_language(&self) -> &'static str {
        match self {
            Self::It => "italian",
            Self::En => "english",
        }
    }

    /// Supported (label, code) pairs for display.
    pub fn choices() -> &'static [(&'static str, &'static str)] {
        &[("Italiano", "it"), ("English", "en")]
    }
}

/// Localized string table.
pub struct LocaleText {
    /// Summary prompt template ({content} placeholder)
    pub prompt_summary: &'static str,
    /// Bullet-list prompt template ({content} placeholder)
    pub prompt_bullets: &'static str,

    pub err_converter_missing: &'static str,
    pub err_conversion_failed: &'static str,
    pub err_file_not_found: &'static str,
    /// Generic per-file failure ({error} placeholder)
    pub err_job_failed: &'static str,

    pub empty_results: &'static str,
    /// Elapsed-time label ({seconds} placeholder, pre-formatted)
    pub result_time: &'static str,
    pub pane_transcription: &'static str,
    pub pane_summary: &'static str,
    pub pane_bullets: &'static str,
    pub transcription_empty: &'static str,
    pub summary_placeholder: &'static str,
    pub bullets_placeholder: &'static str,
    pub default_audio_name: &'static str,

    /// Recording queued status ({name} placeholder)
    pub record_added: &'static str,
    pub record_missing: &'static str,
}

static IT: LocaleText = LocaleText {
    prompt_summary: "Fai un riassunto schematico del testo seguente. \
        Includi solo gli elementi chiave in un testo sintetico. \
        Non usare elenchi puntati e non aggiungere testo extra.\n\n\
        Testo da riassumere:\n{content}",
    prompt_bullets: "Crea una lista puntata con gli elementi essenziali del testo seguente. \
        Frasi brevi, senza testo extra.\n\nTesto:\n{content}",

    err_converter_missing: "ffmpeg non trovato per la conversione in WAV.",
    err_conversion_failed: "Conversione in WAV non riuscita.",
    err_file_not_found: "File non trovato.",
    err_job_failed: "Errore durante conversione/trascrizione: {error}",

    empty_results: "Nessun risultato da mostrare.",
    result_time: "Tempo: {seconds}s",
    pane_transcription: "Trascrizione",
    pane_summary: "Riassunto",
    pane_bullets: "Lista puntata",
    transcription_empty: "Trascrizione vuota.",
    summary_placeholder: "Riassunto non disponibile.",
    bullets_placeholder: "Lista puntata non disponibile.",
    default_audio_name: "audio",

    record_added: "Registrazione aggiunta alla coda: {name}",
    record_missing: "Nessuna registrazione da aggiungere.",
};

static EN: LocaleText = LocaleText {
    prompt_summary: "Provide a structured summary of the following text. \
        Include only the key elements in a concise text. \
        Do not use bullet points and do not add extra text.\n\n\
        Text to summarize:\n{content}",
    prompt_bullets: "Create a bullet list with the essential elements of the following text. \
        Short sentences, without extra text.\n\nText:\n{content}",

    err_converter_missing: "ffmpeg not found for WAV conversion.",
    err_conversion_failed: "WAV conversion failed.",
    err_file_not_found: "File not found.",
    err_job_failed: "Error during conversion/transcription: {error}",

    empty_results: "No results to display.",
    result_time: "Time: {seconds}s",
    pane_transcription: "Transcription",
    pane_summary: "Summary",
    pane_bullets: "Bullet list",
    transcription_empty: "Empty transcription.",
    summary_placeholder: "Summary not available.",
    bullets_placeholder: "Bullet list not available.",
    default_audio_name: "audio",

    record_added: "Recording added to the queue: {name}",
    record_missing: "No recording to add.",
};

impl LocaleText {
    /// Look up the string table for a language.
    pub fn get(lang: UiLang) -> &'static LocaleText {
        match lang {
            UiLang::It => &IT,
            UiLang::En => &EN,
        }
    }

    /// Render the summary prompt with the transcript embedded.
    pub fn summary_prompt(&self, content: &str) -> String {
        self.prompt_summary.replace("{content}", content)
    }

    /// Render the bullet-list prompt with the transcript embedded.
    pub fn bullets_prompt(&self, content: &str) -> String {
        self.prompt_bullets.replace("{content}", content)
    }

    /// Render the per-file failure message with the error detail embedded.
    pub fn job_failed(&self, error: &str) -> String {
        self.err_job_failed.replace("{error}", error)
    }

    /// Render the recording-queued status with the file name embedded.
    pub fn recording_added(&self, name: &str) -> String {
        self.record_added.replace("{name}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(UiLang::from_code("it"), UiLang::It);
        assert_eq!(UiLang::from_code("EN"), UiLang::En);
    }

    #[test]
    fn test_from_code_unknown_falls_back() {
        assert_eq!(UiLang::from_code("de"), UiLang::default());
        assert_eq!(UiLang::from_code(""), UiLang::default());
    }

    #[test]
    fn test_asr_language_mapping() {
        assert_eq!(UiLang::It.asr_language(), "italian");
        assert_eq!(UiLang::En.asr_language(), "english");
    }

    #[test]
    fn test_choices_cover_all_codes() {
        for (_, code) in UiLang::choices() {
            let lang = UiLang::from_code(code);
            assert_eq!(lang.code(), *code);
        }
    }

    #[test]
    fn test_prompt_substitution() {
        let texts = LocaleText::get(UiLang::En);
        let prompt = texts.summary_prompt("hello transcript");
        assert!(prompt.contains("hello transcript"));
        assert!(!prompt.contains("{content}"));

        let prompt = texts.bullets_prompt("bullet source");
        assert!(prompt.contains("bullet source"));
        assert!(!prompt.contains("{content}"));
    }

    #[test]
    fn test_job_failed_substitution() {
        let texts = LocaleText::get(UiLang::It);
        let msg = texts.job_failed("disk on fire");
        assert!(msg.contains("disk on fire"));
        assert!(!msg.contains("{error}"));
    }

    #[test]
    fn test_recording_added_substitution() {
        let texts = LocaleText::get(UiLang::En);
        let msg = texts.recording_added("take1.wav");
        assert!(msg.contains("take1.wav"));
    }

    #[test]
    fn test_tables_have_prompt_placeholders() {
        for lang in [UiLang::It, UiLang::En] {
            let texts = LocaleText::get(lang);
            assert!(texts.prompt_summary.contains("{content}"));
            assert!(texts.prompt_bullets.contains("{content}"));
            assert!(texts.err_job_failed.contains("{error}"));
            assert!(texts.record_added.contains("{name}"));
        }
    }
}
