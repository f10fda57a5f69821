use crate::config::{Config, ConfigManager};
use crate::enrich::{ImageOutcome, TranslationOutcome};
use crate::lookup::Origin;
use crate::providers::WordEntry;
use colored::Colorize;

fn colorize(text: &str, color_name: &str) -> String {
    match ConfigManager::parse_color(color_name) {
        Some(color) => text.color(color).to_string(),
        None => text.to_string(),
    }
}

fn notice(text: &str, config: &Config) -> String {
    colorize(text, &config.notice_color)
}

/// Format a word entry for terminal display.
pub fn format_entry(entry: &WordEntry, origin: Origin, config: &Config) -> String {
    let mut lines = Vec::new();

    let headword = colorize(&entry.word, &config.headword_color);
    match &entry.phonetic_text {
        Some(text) => lines.push(format!("{}  {}", headword, text)),
        None => lines.push(headword),
    }

    if origin == Origin::Cache {
        lines.push(notice("(served from offline cache)", config));
    }

    lines.push(String::new());
    lines.push("Definitions:".to_string());
    for meaning in &entry.meanings {
        lines.push(format!(
            "  [{}] {}",
            meaning.part_of_speech, meaning.definition
        ));
    }

    let examples: Vec<&str> = entry
        .meanings
        .iter()
        .filter_map(|m| m.example.as_deref())
        .collect();
    if !examples.is_empty() {
        lines.push(String::new());
        lines.push("Examples:".to_string());
        for example in examples {
            lines.push(format!("  \"{}\"", example));
        }
    }

    let synonyms = entry.synonyms();
    if !synonyms.is_empty() {
        lines.push(String::new());
        lines.push(format!("Synonyms: {}", synonyms.join(", ")));
    }

    let antonyms = entry.antonyms();
    if !antonyms.is_empty() {
        if synonyms.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("Antonyms: {}", antonyms.join(", ")));
    }

    if config.enable_audio && entry.phonetic_audio.is_some() {
        lines.push(String::new());
        lines.push(notice("Pronunciation audio available - use 'play'", config));
    }

    lines.join("\n")
}

/// Format an image enrichment outcome. Empty and failed searches render
/// distinct markers.
pub fn format_images(outcome: &ImageOutcome) -> String {
    match outcome {
        ImageOutcome::Images(urls) => {
            let mut lines = vec!["Related images:".to_string()];
            for url in urls {
                lines.push(format!("  {}", url));
            }
            lines.join("\n")
        }
        ImageOutcome::NoImages => "No images found.".to_string(),
        ImageOutcome::Error(_) => "Error fetching images.".to_string(),
    }
}

/// Format a translation enrichment outcome.
pub fn format_translation(outcome: &TranslationOutcome, target_code: &str) -> String {
    match outcome {
        TranslationOutcome::Translated(text) => {
            format!("Translation [{}]: {}", target_code, text)
        }
        TranslationOutcome::Unavailable => "Translation failed. Try again later.".to_string(),
        TranslationOutcome::Unreachable(_) => {
            "Translation service unreachable or blocked.".to_string()
        }
        TranslationOutcome::NoWordSelected => "Please search a word first.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::Meaning;

    fn plain_config() -> Config {
        Config {
            prompt_color: "None".to_string(),
            headword_color: "None".to_string(),
            notice_color: "None".to_string(),
            ..Config::default()
        }
    }

    fn entry() -> WordEntry {
        WordEntry {
            word: "hello".to_string(),
            phonetic_text: Some("/həˈləʊ/".to_string()),
            phonetic_audio: Some("https://audio.example/hello.mp3".to_string()),
            meanings: vec![
                Meaning {
                    part_of_speech: "noun".to_string(),
                    definition: "A greeting.".to_string(),
                    example: Some("polite nods and hellos".to_string()),
                    synonyms: vec!["greeting".to_string()],
                    antonyms: vec!["farewell".to_string()],
                },
                Meaning {
                    part_of_speech: "verb".to_string(),
                    definition: "To say hello.".to_string(),
                    example: None,
                    synonyms: vec![],
                    antonyms: vec![],
                },
            ],
        }
    }

    #[test]
    fn entry_renders_all_sections() {
        let text = format_entry(&entry(), Origin::Network, &plain_config());

        assert!(text.starts_with("hello  /həˈləʊ/"));
        assert!(text.contains("[noun] A greeting."));
        assert!(text.contains("[verb] To say hello."));
        assert!(text.contains("\"polite nods and hellos\""));
        assert!(text.contains("Synonyms: greeting"));
        assert!(text.contains("Antonyms: farewell"));
        assert!(!text.contains("offline cache"));
    }

    #[test]
    fn cache_origin_is_marked() {
        let text = format_entry(&entry(), Origin::Cache, &plain_config());
        assert!(text.contains("(served from offline cache)"));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let mut e = entry();
        e.phonetic_text = None;
        e.phonetic_audio = None;
        e.meanings.truncate(1);
        e.meanings[0].example = None;
        e.meanings[0].synonyms.clear();
        e.meanings[0].antonyms.clear();

        let text = format_entry(&e, Origin::Network, &plain_config());
        assert!(text.starts_with("hello\n"));
        assert!(!text.contains("Examples:"));
        assert!(!text.contains("Synonyms:"));
        assert!(!text.contains("Antonyms:"));
        assert!(!text.contains("audio"));
    }

    #[test]
    fn image_outcomes_render_distinct_markers() {
        assert!(format_images(&ImageOutcome::Images(vec!["a.jpg".to_string()]))
            .contains("a.jpg"));
        assert_eq!(format_images(&ImageOutcome::NoImages), "No images found.");
        assert_eq!(
            format_images(&ImageOutcome::Error("boom".to_string())),
            "Error fetching images."
        );
    }

    #[test]
    fn translation_outcomes_render() {
        assert_eq!(
            format_translation(&TranslationOutcome::Translated("hola".to_string()), "es"),
            "Translation [es]: hola"
        );
        assert_eq!(
            format_translation(&TranslationOutcome::NoWordSelected, "es"),
            "Please search a word first."
        );
    }
}
