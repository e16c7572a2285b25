//! `screenfit personas`: list personas and what they add to a summary.

use crate::commands::{load_config, persona_registry};
use screenfit_engine::persona::overhead;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let registry = persona_registry(&config);

    println!("🎭 Personas");
    println!("===========");
    println!();
    for persona in registry.iter() {
        println!(
            "  {:<12} placement {:<8} overhead {:>4} chars  vocabulary {}",
            persona.name,
            persona.examples_placement.as_str(),
            overhead(persona),
            persona.vocabulary_mappings.len()
        );
        if let Some(context) = persona.context_text() {
            println!("               {context}");
        }
    }

    Ok(())
}
