mod cli;
mod config;
mod enrich;
mod history;
mod interactive;
mod lookup;
mod playback;
mod providers;
mod render;
mod store;
mod voice;

use cli::CliHandler;
use interactive::InteractiveMode;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();

    let rt = tokio::runtime::Runtime::new()?;

    if args.len() > 1 {
        // CLI mode: one-shot command, then exit
        let handler = CliHandler::new()?;
        return rt.block_on(handler.process_args(args));
    }

    println!("=== Wordbook v{} ===", env!("CARGO_PKG_VERSION"));
    println!("Definitions, pronunciation and related images for English words.");
    println!("Previously looked-up words stay available offline.");
    println!();

    let mode = InteractiveMode::new()?;
    rt.block_on(mode.start())?;
    println!("Program terminated successfully.");

    Ok(())
}
