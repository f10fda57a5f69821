use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

#[derive(Debug, Clone)]
pub struct Config {
    pub target_language: String,  // Translation target (name or ISO code)
    pub dictionary_source: String, // Dictionary lookup service
    pub translate_source: String,  // Translation service
    pub image_source: String,      // Image search service
    pub show_images: bool,         // Fetch related images after a lookup
    pub image_count: usize,        // How many image results to request
    pub image_api_key: String,     // API key for the image service
    pub enable_audio: bool,        // Offer pronunciation playback
    pub voice_command: String,     // External speech recognizer command
    pub prompt_color: String,      // Color for the input prompt
    pub headword_color: String,    // Color for the looked-up word
    pub notice_color: String,      // Color for cache/offline notices
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_language: "Spanish".to_string(),
            dictionary_source: "dictionaryapi".to_string(),
            translate_source: "mymemory".to_string(),
            image_source: "pixabay".to_string(),
            show_images: true,
            image_count: 4,
            image_api_key: "50329140-a5f985ecd8f676e38555cc27f".to_string(),
            enable_audio: true,
            voice_command: String::new(),
            prompt_color: "BrightCyan".to_string(),
            headword_color: "BrightYellow".to_string(),
            notice_color: "BrightBlack".to_string(),
        }
    }
}

pub struct ConfigManager {
    config_path: String,
    config: Arc<Mutex<Config>>,
    last_modified: Arc<Mutex<Option<SystemTime>>>,
}

impl ConfigManager {
    /// Get default configuration file path in the user config directory
    pub fn get_default_config_path() -> Result<PathBuf, Box<dyn Error>> {
        let config_dir = dirs::config_dir()
            .ok_or("Failed to get config directory")?
            .join("Wordbook");

        // Create directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        Ok(config_dir.join("wordbook.conf"))
    }

    pub fn new(config_path: &str) -> Result<Self, Box<dyn Error>> {
        let manager = Self {
            config_path: config_path.to_string(),
            config: Arc::new(Mutex::new(Config::default())),
            last_modified: Arc::new(Mutex::new(None)),
        };

        // Load or create config file
        manager.load_or_create_config()?;

        Ok(manager)
    }

    /// Load configuration from file or create default if not exists
    fn load_or_create_config(&self) -> Result<(), Box<dyn Error>> {
        if Path::new(&self.config_path).exists() {
            self.load_config()?;
        } else {
            self.create_default_config()?;
        }
        Ok(())
    }

    /// Create default configuration file
    fn create_default_config(&self) -> Result<(), Box<dyn Error>> {
        let default_config = Config::default();
        let ini_content = self.create_ini_content(&default_config);

        fs::write(&self.config_path, ini_content)?;
        println!("Created default configuration file: {}", self.config_path);

        // Update last modified time
        self.update_last_modified_time()?;

        Ok(())
    }

    /// Create INI format content
    fn create_ini_content(&self, config: &Config) -> String {
        format!(
            r#"; Wordbook Configuration File
; Dictionary lookup with offline cache, search history and enrichment
;
; Usage:
; 1. Type a word at the prompt (or pass it as an argument) to look it up
; 2. Definitions are cached, so previous lookups keep working offline
; 3. Use 'lang <code>' to translate the current word
;
; Configuration changes take effect immediately (no restart required)

[Sources]
; Dictionary lookup service
; Supported values: dictionaryapi
DictionarySource = {}

; Translation service
; Supported values: mymemory
TranslateSource = {}

; Image search service
; Supported values: pixabay
ImageSource = {}

[Translation]
; Target language for the 'lang' command and -t option
; Supported values: English, Spanish, French, German, Russian, Chinese,
; Japanese, Korean, Italian, Portuguese, Dutch, Polish, Turkish, Arabic, Hindi
; An ISO language code (e.g. "es") is also accepted
TargetLanguage = {}

[Images]
; Fetch related images after each successful lookup
; Set to false to skip image search entirely
ShowImages = {}

; How many image results to request
ImageCount = {}

; API key for the image search service
ImageApiKey = {}

[Audio]
; Offer pronunciation playback when an entry carries an audio recording
; Set to false to disable the 'play' command
EnableAudio = {}

[Voice]
; External speech recognizer command for the 'voice' command
; The command must print the recognized text to stdout, e.g.:
;   VoiceCommand = whisper-cli --once
; Leave empty to disable voice input
VoiceCommand = {}

[Colors]
; Supported values: Black, Red, Green, Yellow, Blue, Magenta, Cyan, White,
; BrightBlack, BrightRed, BrightGreen, BrightYellow, BrightBlue, BrightMagenta, BrightCyan, BrightWhite
; Use "None" to disable color
PromptColor = {}
HeadwordColor = {}
NoticeColor = {}
"#,
            config.dictionary_source,
            config.translate_source,
            config.image_source,
            config.target_language,
            config.show_images,
            config.image_count,
            config.image_api_key,
            config.enable_audio,
            config.voice_command,
            config.prompt_color,
            config.headword_color,
            config.notice_color
        )
    }

    /// Load configuration from INI file
    fn load_config(&self) -> Result<(), Box<dyn Error>> {
        let content = fs::read_to_string(&self.config_path)?;
        let parsed_config = self.parse_ini(&content)?;

        let dictionary_source = parsed_config
            .get("Sources")
            .and_then(|section| section.get("DictionarySource"))
            .cloned()
            .unwrap_or_else(|| "dictionaryapi".to_string());

        let translate_source = parsed_config
            .get("Sources")
            .and_then(|section| section.get("TranslateSource"))
            .cloned()
            .unwrap_or_else(|| "mymemory".to_string());

        let image_source = parsed_config
            .get("Sources")
            .and_then(|section| section.get("ImageSource"))
            .cloned()
            .unwrap_or_else(|| "pixabay".to_string());

        let target_language = parsed_config
            .get("Translation")
            .and_then(|section| section.get("TargetLanguage"))
            .cloned()
            .unwrap_or_else(|| "Spanish".to_string());

        let show_images = parsed_config
            .get("Images")
            .and_then(|section| section.get("ShowImages"))
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(true);

        let image_count = parsed_config
            .get("Images")
            .and_then(|section| section.get("ImageCount"))
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(4);

        let image_api_key = parsed_config
            .get("Images")
            .and_then(|section| section.get("ImageApiKey"))
            .cloned()
            .unwrap_or_else(|| Config::default().image_api_key);

        let enable_audio = parsed_config
            .get("Audio")
            .and_then(|section| section.get("EnableAudio"))
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(true);

        let voice_command = parsed_config
            .get("Voice")
            .and_then(|section| section.get("VoiceCommand"))
            .cloned()
            .unwrap_or_default();

        // Color settings
        let prompt_color = parsed_config
            .get("Colors")
            .and_then(|section| section.get("PromptColor"))
            .cloned()
            .unwrap_or_else(|| "BrightCyan".to_string());

        let headword_color = parsed_config
            .get("Colors")
            .and_then(|section| section.get("HeadwordColor"))
            .cloned()
            .unwrap_or_else(|| "BrightYellow".to_string());

        let notice_color = parsed_config
            .get("Colors")
            .and_then(|section| section.get("NoticeColor"))
            .cloned()
            .unwrap_or_else(|| "BrightBlack".to_string());

        let new_config = Config {
            target_language,
            dictionary_source,
            translate_source,
            image_source,
            show_images,
            image_count,
            image_api_key,
            enable_audio,
            voice_command,
            prompt_color,
            headword_color,
            notice_color,
        };

        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }

        self.update_last_modified_time()?;

        Ok(())
    }

    /// Parse INI format content
    fn parse_ini(
        &self,
        content: &str,
    ) -> Result<HashMap<String, HashMap<String, String>>, Box<dyn Error>> {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            // Section header
            if line.starts_with('[') && line.ends_with(']') {
                let section_name = line[1..line.len() - 1].to_string();
                current_section = Some(section_name.clone());
                sections.insert(section_name, HashMap::new());
            }
            // Key-value pair
            else if let Some(eq_pos) = line.find('=') {
                let key = line[..eq_pos].trim().to_string();
                let value = line[eq_pos + 1..].trim().to_string();

                if let Some(section_name) = &current_section {
                    if let Some(section) = sections.get_mut(section_name) {
                        section.insert(key, value);
                    }
                }
            }
        }

        Ok(sections)
    }

    /// Get current configuration
    pub fn get_config(&self) -> Config {
        self.config.lock().unwrap().clone()
    }

    /// Check if config file was modified and reload if necessary
    pub fn check_and_reload(&self) -> Result<bool, Box<dyn Error>> {
        if !Path::new(&self.config_path).exists() {
            return Ok(false);
        }

        let metadata = fs::metadata(&self.config_path)?;
        let current_modified = metadata.modified()?;

        let should_reload = {
            let last_modified = self.last_modified.lock().unwrap();
            match *last_modified {
                Some(last) => current_modified > last,
                None => true,
            }
        };

        if should_reload {
            self.load_config()?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Update last modified time
    fn update_last_modified_time(&self) -> Result<(), Box<dyn Error>> {
        if Path::new(&self.config_path).exists() {
            let metadata = fs::metadata(&self.config_path)?;
            let modified = metadata.modified()?;

            if let Ok(mut last_modified) = self.last_modified.lock() {
                *last_modified = Some(modified);
            }
        }
        Ok(())
    }

    /// Convert language name to ISO language code
    pub fn language_to_code(language: &str) -> &str {
        match language.to_lowercase().as_str() {
            "english" => "en",
            "russian" => "ru",
            "spanish" => "es",
            "french" => "fr",
            "german" => "de",
            "chinese" => "zh",
            "japanese" => "ja",
            "korean" => "ko",
            "italian" => "it",
            "portuguese" => "pt",
            "dutch" => "nl",
            "polish" => "pl",
            "turkish" => "tr",
            "arabic" => "ar",
            "hindi" => "hi",
            _ => language, // Return as-is if not found (might be a code already)
        }
    }

    /// Get the target language code for translation
    pub fn target_language_code(&self) -> String {
        let config = self.get_config();
        Self::language_to_code(&config.target_language).to_string()
    }

    /// Parse color name to colored::Color enum
    /// Returns None for "None" or empty string (no color)
    pub fn parse_color(color_name: &str) -> Option<colored::Color> {
        let color_lower = color_name.trim().to_lowercase();

        // Handle "None" or empty string as no color
        if color_lower.is_empty() || color_lower == "none" {
            return None;
        }

        match color_lower.as_str() {
            "black" => Some(colored::Color::Black),
            "red" => Some(colored::Color::Red),
            "green" => Some(colored::Color::Green),
            "yellow" => Some(colored::Color::Yellow),
            "blue" => Some(colored::Color::Blue),
            "magenta" => Some(colored::Color::Magenta),
            "cyan" => Some(colored::Color::Cyan),
            "white" => Some(colored::Color::White),
            "brightblack" | "bright_black" => Some(colored::Color::BrightBlack),
            "brightred" | "bright_red" => Some(colored::Color::BrightRed),
            "brightgreen" | "bright_green" => Some(colored::Color::BrightGreen),
            "brightyellow" | "bright_yellow" => Some(colored::Color::BrightYellow),
            "brightblue" | "bright_blue" => Some(colored::Color::BrightBlue),
            "brightmagenta" | "bright_magenta" => Some(colored::Color::BrightMagenta),
            "brightcyan" | "bright_cyan" => Some(colored::Color::BrightCyan),
            "brightwhite" | "bright_white" => Some(colored::Color::BrightWhite),
            _ => None,
        }
    }

    /// Display current configuration
    pub fn display_config(&self) -> Result<(), Box<dyn Error>> {
        self.check_and_reload()?;
        let config = self.get_config();
        let target_code = self.target_language_code();

        println!();
        println!("=== Current Configuration ===");
        println!(
            "Target Language: {} ({})",
            config.target_language, target_code
        );
        println!("Dictionary Source: {}", config.dictionary_source);
        println!("Translate Source: {}", config.translate_source);
        println!("Image Source: {}", config.image_source);
        println!(
            "Related Images: {}",
            if config.show_images {
                format!("Enabled ({} results)", config.image_count)
            } else {
                "Disabled".to_string()
            }
        );
        println!(
            "Pronunciation Audio: {}",
            if config.enable_audio { "Enabled" } else { "Disabled" }
        );
        println!(
            "Voice Input: {}",
            if config.voice_command.is_empty() {
                "Disabled (no recognizer command)".to_string()
            } else {
                config.voice_command.clone()
            }
        );
        println!();

        // Show config file location
        if let Ok(config_path) = ConfigManager::get_default_config_path() {
            println!("Config file: {}", config_path.display());
        } else {
            println!("Config file: {}", self.config_path);
        }
        println!("Edit this file to change settings (changes take effect immediately)");
        println!("============================");
        println!();

        Ok(())
    }

    /// Display help information (unified for CLI and Interactive modes)
    pub fn display_help() {
        println!();
        println!("=== Wordbook v{} ===", env!("CARGO_PKG_VERSION"));
        println!();
        println!("MODES:");
        println!();
        println!("1. Interactive Mode (default): Run without arguments");
        println!("   - Prompt loop with lookup, history and enrichment commands");
        println!();
        println!("2. CLI Mode: Run 'wordbook <word>' for a one-time lookup");
        println!();

        println!("USAGE:");
        println!("  wordbook [OPTIONS] [word]");
        println!();

        println!("ARGUMENTS:");
        println!("  <word>    Word to look up");
        println!();

        println!("OPTIONS:");
        println!("  -h, --help       Show this help message");
        println!("  -c, --config     Show current configuration");
        println!("  -v, --version    Show version information");
        println!("  -t, --translate  Translate the looked-up word: wordbook -t <lang> <word>");
        println!();

        println!("EXAMPLES:");
        println!("  wordbook                   Start interactive mode");
        println!("  wordbook hello             Look up 'hello' (CLI mode)");
        println!("  wordbook -t es hello       Look up 'hello' and translate it to Spanish");
        println!("  wordbook --config          Show configuration");
        println!();

        println!("INTERACTIVE COMMANDS:");
        println!("  help, ?        - Show this help");
        println!("  config         - Show current settings");
        println!("  history        - List previous searches (type a number to replay one)");
        println!("  clear-history  - Delete the search history (asks for confirmation)");
        println!("  lang <code>    - Translate the current word (e.g. 'lang fr')");
        println!("  play           - Play pronunciation audio for the current word");
        println!("  voice          - Speak a word instead of typing it");
        println!("  clear, cls     - Clear screen");
        println!("  exit, quit, q  - Exit program");
        println!();

        println!("OFFLINE USE:");
        println!("- Every successful lookup is cached on disk");
        println!("- When the dictionary service is unreachable, cached entries are served");
        println!("- Cached results are marked as such in the output");
        println!("===============================================");
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with_defaults() -> ConfigManager {
        // Path never touched: parse_ini and the code tables are path-independent
        ConfigManager {
            config_path: String::new(),
            config: Arc::new(Mutex::new(Config::default())),
            last_modified: Arc::new(Mutex::new(None)),
        }
    }

    #[test]
    fn parses_sections_keys_and_comments() {
        let manager = manager_with_defaults();
        let content = r#"
; comment line
[Translation]
TargetLanguage = French

[Images]
ShowImages = false
ImageCount = 8
"#;

        let parsed = manager.parse_ini(content).unwrap();
        assert_eq!(
            parsed.get("Translation").and_then(|s| s.get("TargetLanguage")),
            Some(&"French".to_string())
        );
        assert_eq!(
            parsed.get("Images").and_then(|s| s.get("ShowImages")),
            Some(&"false".to_string())
        );
        assert_eq!(
            parsed.get("Images").and_then(|s| s.get("ImageCount")),
            Some(&"8".to_string())
        );
    }

    #[test]
    fn default_ini_content_parses_back_to_defaults() {
        let manager = manager_with_defaults();
        let config = Config::default();
        let content = manager.create_ini_content(&config);

        let parsed = manager.parse_ini(&content).unwrap();
        assert_eq!(
            parsed.get("Translation").and_then(|s| s.get("TargetLanguage")),
            Some(&config.target_language)
        );
        assert_eq!(
            parsed.get("Sources").and_then(|s| s.get("DictionarySource")),
            Some(&config.dictionary_source)
        );
        assert_eq!(
            parsed.get("Voice").and_then(|s| s.get("VoiceCommand")),
            Some(&String::new())
        );
    }

    #[test]
    fn language_names_map_to_codes() {
        assert_eq!(ConfigManager::language_to_code("Spanish"), "es");
        assert_eq!(ConfigManager::language_to_code("FRENCH"), "fr");
        // Codes pass through unchanged
        assert_eq!(ConfigManager::language_to_code("pt-BR"), "pt-BR");
    }

    #[test]
    fn color_names_parse_and_none_disables() {
        assert_eq!(
            ConfigManager::parse_color("BrightYellow"),
            Some(colored::Color::BrightYellow)
        );
        assert_eq!(ConfigManager::parse_color("None"), None);
        assert_eq!(ConfigManager::parse_color(""), None);
        assert_eq!(ConfigManager::parse_color("sparkly"), None);
    }
}
