use std::env;

use markov_text_core::config::MarkovConfig;
use markov_text_core::model::builder::ModelBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log level is read from RUST_LOG (ex. RUST_LOG=debug)
    env_logger::init();

    // Usage: markov-text-exemple [resource] [length] [config.json]
    let mut args = env::args().skip(1);

    // Resources are looked up as-is, then under "./res"
    let resource = args.next().unwrap_or_else(|| "pride_and_prejudice.txt".to_owned());

    // Number of characters to generate
    let length: usize = match args.next() {
        Some(length) => length.parse()?,
        None => 1000,
    };

    // Optional JSON config, ex. { "prefix_length": 7, "suffix_length": 4, "seed": 321 }
    // Without it, a 7/4 model with a random seed is used
    let config = match args.next() {
        Some(path) => MarkovConfig::from_json_file(path)?,
        None => MarkovConfig { prefix_length: 7, suffix_length: 4, seed: None },
    };
    log::info!("Generating {length} characters from {resource} with {config:?}");

    let mut generator = ModelBuilder::from_file(&resource)?.with_config(&config)?.build()?;

    let model = generator.model();
    log::info!("{} prefixes, {} observations", model.prefix_count(), model.observation_count());

    println!("{}", generator.of_length(length)?);

    Ok(())
}
