use crate::config::ConfigManager;
use crate::enrich::Enricher;
use crate::history::HistoryManager;
use crate::lookup::{LookupOutcome, Orchestrator, Origin};
use crate::playback::AudioPlayer;
use crate::providers;
use crate::render;
use crate::store::{FileStore, Store};
use std::error::Error;
use std::sync::Arc;

pub struct CliHandler {
    config_manager: Arc<ConfigManager>,
    orchestrator: Orchestrator,
    enricher: Enricher,
    player: AudioPlayer,
}

impl CliHandler {
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
            player: AudioPlayer::new(),
        })
    }

    /// Display CLI help information
    pub fn show_help() {
        ConfigManager::display_help();
    }

    /// Show version information
    pub fn show_version() {
        println!("Wordbook v{}", env!("CARGO_PKG_VERSION"));
        println!("Dictionary lookup tool with offline cache, search history and unified Interactive/CLI mode");
        println!();
    }

    /// Show current configuration
    pub fn show_config(&self) -> Result<(), Box<dyn Error>> {
        self.config_manager.display_config()
    }

    /// Process CLI arguments and determine action
    pub async fn process_args(&self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        if args.len() < 2 {
            println!("Error: No arguments provided");
            println!("Use --help for usage information");
            return Ok(());
        }

        let command = &args[1];

        match command.as_str() {
            "-h" | "--help" => {
                Self::show_help();
                Ok(())
            }
            "-c" | "--config" => self.show_config(),
            "-v" | "--version" => {
                Self::show_version();
                Ok(())
            }
            "-t" | "--translate" => {
                if args.len() < 4 {
                    eprintln!("Error: Missing language or word");
                    eprintln!("Usage: wordbook -t <lang> <word>");
                    return Ok(());
                }
                let target_code = ConfigManager::language_to_code(&args[2]).to_string();
                let word = args[3..].join(" ");
                self.look_up(&word, Some(&target_code)).await
            }
            "-p" | "--play" => {
                if args.len() < 3 {
                    eprintln!("Error: No word provided");
                    eprintln!("Usage: wordbook -p <word>");
                    return Ok(());
                }
                let word = args[2..].join(" ");
                self.play_pronunciation(&word).await
            }
            other if other.starts_with('-') => {
                eprintln!("Error: Unknown option '{}'", other);
                eprintln!("Use --help for usage information");
                Ok(())
            }
            _ => {
                // Treat as a word to look up
                let word = args[1..].join(" ");
                self.look_up(&word, None).await
            }
        }
    }

    /// Look up a word and render the result; optionally translate it too.
    pub async fn look_up(
        &self,
        word: &str,
        translate_to: Option<&str>,
    ) -> Result<(), Box<dyn Error>> {
        self.config_manager.check_and_reload().ok(); // Ignore errors, use current settings
        let config = self.config_manager.get_config();

        let outcome = match self.orchestrator.lookup_word(word).await {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(());
            }
        };

        match outcome {
            LookupOutcome::Found { entry, origin } => {
                println!("{}", render::format_entry(&entry, origin, &config));

                if let Some(target_code) = translate_to {
                    let translation = self.enricher.translate(Some(&entry.word), target_code).await;
                    println!();
                    println!("{}", render::format_translation(&translation, target_code));
                }

                if config.show_images {
                    let images = self.enricher.fetch_related_images(&entry.word).await;
                    println!();
                    println!("{}", render::format_images(&images));
                }
            }
            LookupOutcome::NotFoundUpstream => {
                println!("Word not found.");
            }
            LookupOutcome::NoCacheAvailable => {
                println!("Word not found and no cached data available.");
            }
        }

        Ok(())
    }

    /// Look up a word and play its pronunciation audio.
    async fn play_pronunciation(&self, word: &str) -> Result<(), Box<dyn Error>> {
        self.config_manager.check_and_reload().ok();
        let config = self.config_manager.get_config();

        if !config.enable_audio {
            println!("Pronunciation audio is disabled in the configuration.");
            return Ok(());
        }

        let outcome = match self.orchestrator.lookup_word(word).await {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(());
            }
        };

        match outcome {
            LookupOutcome::Found { entry, origin } => {
                if origin == Origin::Cache {
                    println!("(entry served from offline cache)");
                }
                match entry.phonetic_audio {
                    Some(url) => {
                        println!("Playing pronunciation of '{}'...", entry.word);
                        self.player.play_url(&url).await?;
                    }
                    None => println!("No pronunciation audio for '{}'.", entry.word),
                }
            }
            LookupOutcome::NotFoundUpstream => {
                println!("Word not found.");
            }
            LookupOutcome::NoCacheAvailable => {
                println!("Word not found and no cached data available.");
            }
        }

        Ok(())
    }
}
