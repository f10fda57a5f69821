use crate::config::{Config, ConfigManager};
use crate::enrich::Enricher;
use crate::history::HistoryManager;
use crate::lookup::{LookupOutcome, Orchestrator, Origin};
use crate::playback::AudioPlayer;
use crate::providers::{self, WordEntry};
use crate::render;
use crate::store::{FileStore, Store};
use crate::voice::VoiceInput;
use chrono::Local;
use colored::Colorize;
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

pub struct InteractiveMode {
    config_manager: Arc<ConfigManager>,
    orchestrator: Orchestrator,
    enricher: Enricher,
}

impl InteractiveMode {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let config_path = ConfigManager::get_default_config_path()?;
        let config_manager = Arc::new(ConfigManager::new(config_path.to_string_lossy().as_ref())?);
        let config = config_manager.get_config();

        let store: Arc<dyn Store> = Arc::new(FileStore::open_default());
        let history = Arc::new(HistoryManager::new(store.clone()));
        let source = providers::create_dictionary_source(&config.dictionary_source)?;
        let orchestrator = Orchestrator::new(source, store, history);

        let images = providers::create_image_source(&config.image_source, &config.image_api_key)?;
        let translator = providers::create_translation_source(&config.translate_source)?;
        let enricher = Enricher::new(images, translator, config.image_count);

        Ok(Self {
            config_manager,
            orchestrator,
            enricher,
        })
    }

    /// Start the interactive prompt loop
    pub async fn start(&self) -> Result<(), Box<dyn Error>> {
        println!("Type a word to look it up, 'help' for commands, 'exit' to quit.");
        println!();

        // Session state: the entry on screen and the last observed
        // connectivity, for online/offline transition notices
        let mut current_entry: Option<WordEntry> = None;
        let mut last_online: Option<bool> = None;

        loop {
            // Check if config file was modified and reload if necessary
            self.config_manager.check_and_reload().ok();
            let config = self.config_manager.get_config();

            self.show_prompt(&config)?;

            let mut input = String::new();
            match io::stdin().read_line(&mut input) {
                Ok(0) => {
                    // EOF (Ctrl+D)
                    println!();
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    println!("Input error: {}", e);
                    continue;
                }
            }

            let text = input.trim();

            match text {
                "" => continue, // Skip empty lines
                "exit" | "quit" | "q" => {
                    println!("Goodbye!");
                    break;
                }
                "help" | "?" => {
                    ConfigManager::display_help();
                    continue;
                }
                "config" => {
                    if let Err(e) = self.config_manager.display_config() {
                        println!("Config error: {}", e);
                    }
                    continue;
                }
                "clear" | "cls" => {
                    print!("\x1B[2J\x1B[1;1H");
                    io::stdout().flush().map_err(|e| format!("IO error: {}", e))?;
                    println!("=== Wordbook v{} ===", env!("CARGO_PKG_VERSION"));
                    println!("Type a word to look it up, 'help' for commands.");
                    println!();
                    continue;
                }
                "history" => {
                    self.show_history();
                    continue;
                }
                "clear-history" => {
                    self.clear_history_confirmed()?;
                    continue;
                }
                "play" => {
                    self.play_current(&current_entry, &config);
                    continue;
                }
                "voice" => {
                    if let Some(word) = self.listen_for_word(&config).await {
                        self.look_up(&word, &mut current_entry, &mut last_online)
                            .await;
                    }
                    continue;
                }
                _ => {}
            }

            if let Some(code) = text.strip_prefix("lang ") {
                self.translate_current(code.trim(), &current_entry).await;
                continue;
            }
            if text == "lang" {
                let target = self.config_manager.target_language_code();
                self.translate_current(&target, &current_entry).await;
                continue;
            }

            // A bare number replays that history entry
            if let Ok(index) = text.parse::<usize>() {
                match self.history_word(index) {
                    Some(word) => {
                        self.look_up(&word, &mut current_entry, &mut last_online)
                            .await;
                    }
                    None => println!("No history entry #{}\n", index),
                }
                continue;
            }

            self.look_up(text, &mut current_entry, &mut last_online).await;
        }

        Ok(())
    }

    fn show_prompt(&self, config: &Config) -> Result<(), Box<dyn Error>> {
        let prompt = "word>";
        match ConfigManager::parse_color(&config.prompt_color) {
            Some(color) => print!("{} ", prompt.color(color)),
            None => print!("{} ", prompt),
        }
        io::stdout().flush().map_err(|e| format!("IO error: {}", e))?;
        Ok(())
    }

    /// Look up a word, render the outcome and refresh session state
    async fn look_up(
        &self,
        word: &str,
        current_entry: &mut Option<WordEntry>,
        last_online: &mut Option<bool>,
    ) {
        let config = self.config_manager.get_config();

        let outcome = match self.orchestrator.lookup_word(word).await {
            Ok(outcome) => outcome,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };

        // The upstream answered iff the outcome did not come from fallback
        let online = matches!(
            outcome,
            LookupOutcome::Found {
                origin: Origin::Network,
                ..
            } | LookupOutcome::NotFoundUpstream
        );
        Self::announce_connectivity(online, last_online);

        match outcome {
            LookupOutcome::Found { entry, origin } => {
                println!("{}", render::format_entry(&entry, origin, &config));

                if config.show_images {
                    let images = self.enricher.fetch_related_images(&entry.word).await;
                    println!();
                    println!("{}", render::format_images(&images));
                }

                *current_entry = Some(entry);
            }
            LookupOutcome::NotFoundUpstream => {
                println!("Word not found.");
                *current_entry = None;
            }
            LookupOutcome::NoCacheAvailable => {
                println!("Word not found and no cached data available.");
                *current_entry = None;
            }
        }

        println!();
    }

    /// Print a notice when connectivity flips between consecutive lookups
    fn announce_connectivity(online: bool, last_online: &mut Option<bool>) {
        if let Some(last) = *last_online {
            if last != online {
                let stamp = Local::now().format("%H:%M:%S");
                if online {
                    println!("[{}] You are back online.", stamp);
                } else {
                    println!("[{}] You are now offline. Cached entries remain available.", stamp);
                }
            }
        }
        *last_online = Some(online);
    }

    fn show_history(&self) {
        let words = self.orchestrator.history().list();
        if words.is_empty() {
            println!("No searches yet.");
        } else {
            for (i, word) in words.iter().enumerate() {
                println!("{:3}. {}", i + 1, word);
            }
            println!("Type a number to look one up again.");
        }
        println!();
    }

    fn history_word(&self, index: usize) -> Option<String> {
        let words = self.orchestrator.history().list();
        if index == 0 {
            return None;
        }
        words.get(index - 1).cloned()
    }

    /// Destructive, so ask first
    fn clear_history_confirmed(&self) -> Result<(), Box<dyn Error>> {
        print!("Clear search history? [y/N]: ");
        io::stdout().flush().map_err(|e| format!("IO error: {}", e))?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;

        if answer.trim().eq_ignore_ascii_case("y") {
            self.orchestrator.history().clear();
            println!("Search history cleared.");
        } else {
            println!("Cancelled.");
        }
        println!();
        Ok(())
    }

    async fn translate_current(&self, target: &str, current_entry: &Option<WordEntry>) {
        let target_code = ConfigManager::language_to_code(target).to_string();
        let word = current_entry.as_ref().map(|entry| entry.word.as_str());

        let outcome = self.enricher.translate(word, &target_code).await;
        println!("{}", render::format_translation(&outcome, &target_code));
        println!();
    }

    fn play_current(&self, current_entry: &Option<WordEntry>, config: &Config) {
        if !config.enable_audio {
            println!("Pronunciation audio is disabled in the configuration.\n");
            return;
        }

        match current_entry {
            Some(entry) => match &entry.phonetic_audio {
                Some(url) => {
                    println!("Playing pronunciation of '{}'...\n", entry.word);
                    AudioPlayer::play_url_async(url.clone());
                }
                None => println!("No pronunciation audio for '{}'.\n", entry.word),
            },
            None => println!("Please search a word first.\n"),
        }
    }

    /// One voice recognition session; returns the transcript to look up
    async fn listen_for_word(&self, config: &Config) -> Option<String> {
        let voice = VoiceInput::new(&config.voice_command);

        if let Err(e) = voice.availability() {
            println!("{}\n", e);
            return None;
        }

        println!("Listening...");
        match voice.listen_once().await {
            Ok(transcript) => {
                println!("Heard: {}", transcript);
                Some(transcript)
            }
            Err(e) => {
                println!("{}\n", e);
                None
            }
        }
    }
}
