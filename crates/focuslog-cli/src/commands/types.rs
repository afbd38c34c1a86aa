use focuslog_core::error::Result;
use focuslog_core::DISTRACTION_TYPES;

pub fn run(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&DISTRACTION_TYPES)?);
        return Ok(());
    }

    for cfg in &DISTRACTION_TYPES {
        let max = match cfg.max_duration_secs {
            Some(secs) => format!("{secs}s"),
            None => "unbounded".to_string(),
        };
        println!(
            "{} {:<15} {:<16} {:<32} max {}",
            cfg.icon, cfg.label, cfg.id, cfg.description, max
        );
    }
    Ok(())
}
