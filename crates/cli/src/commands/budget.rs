//! `screenfit budget`: character budgets per profile.

use crate::commands::{load_config, resolve_profiles};
use screenfit_core::{Budget, DisplayProfile, LAYER_SPECS};
use screenfit_engine::{budget_for_profile, plan_layer};

pub fn run(
    profiles: Option<String>,
    buffer: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let profiles = resolve_profiles(&config, profiles.as_deref(), buffer)?;

    println!("📐 Character budgets");
    println!("====================");
    for profile in &profiles {
        println!();
        print!("{}", describe(profile, &budget_for_profile(profile)));
    }

    Ok(())
}

fn describe(profile: &DisplayProfile, budget: &Budget) -> String {
    let mut out = format!(
        "  {} ({}x{} px, {} px font, buffer {:.2})\n",
        profile.name(),
        profile.width_px(),
        profile.height_px(),
        profile.font_size_px(),
        profile.buffer()
    );
    out.push_str(&format!(
        "    Grid:    {} cols x {} lines\n",
        budget.columns, budget.lines
    ));
    out.push_str(&format!("    Budget:  {} chars\n", budget.char_budget));
    out.push_str(&format!("    Target:  {} chars\n", budget.target_chars));
    for spec in &LAYER_SPECS {
        let plan = plan_layer(spec.name, budget.target_chars, None);
        out.push_str(&format!(
            "    {:<11} {} chars ({} for content)\n",
            format!("{}:", spec.name),
            plan.layer_budget,
            plan.content_budget
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laptop_description() {
        let laptop = DisplayProfile::new("laptop", 1920, 1080, 14, 80, 0.9).unwrap();
        let text = describe(&laptop, &budget_for_profile(&laptop));
        assert!(text.contains("80 cols x 51 lines"));
        assert!(text.contains("Budget:  4080 chars"));
        assert!(text.contains("Target:  3672 chars"));
        assert!(text.contains("headline:   367 chars"));
        assert!(text.contains("deep:       3672 chars (3656 for content)"));
    }
}
