//! `screenfit config`: configuration management commands.

use screenfit_config::AppConfig;

pub fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();

            if config.default_profiles.is_empty() {
                warnings.push("No default profiles; every run must pass --profiles".to_string());
            }

            if let Some(persona) = &config.default_persona
                && crate::commands::persona_registry(&config).get(persona).is_none()
            {
                warnings.push(format!("Default persona '{persona}' is not defined"));
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Profiles:  {}", config.default_profiles.join(", "));
            println!("   Layers:    {}", config.default_layers.join(", "));
            println!(
                "   Persona:   {}",
                config.default_persona.as_deref().unwrap_or("(none)")
            );
            println!("   Format:    {}", config.output_format);
            println!(
                "   Custom:    {} profiles, {} personas",
                config.profiles.len(),
                config.personas.len()
            );
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = crate::commands::load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
