use std::fs;
use std::path::Path;

use sl_settings::{load_settings, save_settings, Settings};

pub fn read_settings(path: &Path) -> Result<Settings, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    load_settings(&content)
        .map_err(|e| format!("Failed to load '{}': {}", path.display(), e))
}

pub fn write_settings(path: &Path, settings: &Settings) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
    }
    let json = save_settings(settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;
    fs::write(path, json)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}
