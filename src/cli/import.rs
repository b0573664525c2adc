//! CLI command handler for CSV import

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::Settings;
use crate::error::{FintrackError, FintrackResult};
use crate::services::ImportService;
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    path: &Path,
) -> FintrackResult<()> {
    if !path.exists() {
        return Err(FintrackError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| FintrackError::Import(format!("Failed to read file: {}", e)))?;

    let catalog = settings.catalog();
    let result = ImportService::new(storage, &catalog).import_csv(BufReader::new(file))?;

    println!("Import from '{}'", path.display());
    println!("{}", "=".repeat(40));
    println!("  Imported:  {}", result.imported);
    println!("  Skipped:   {}", result.skipped);

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  line {}: {}", warning.line, warning.message);
        }
    }

    Ok(())
}
