use crate::scheduler::GeneratorConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Charge et valide une configuration JSON ; les champs absents prennent
/// leur valeur par défaut.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<GeneratorConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: GeneratorConfig = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("validating config {}", path.display()))?;
    Ok(config)
}

pub fn export_config_json<P: AsRef<Path>>(path: P, config: &GeneratorConfig) -> Result<()> {
    config.validate()?;
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
