//! The `mnemo validate` command.

use std::path::PathBuf;

use anyhow::Result;

use mnemo_service::config::load_config_from;

pub fn execute(bank_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let bank_path = match bank_path {
        Some(path) => path,
        None => load_config_from(config_path.as_deref())?.bank_dir,
    };

    let banks = if bank_path.is_dir() {
        mnemo_core::bank::load_bank_directory(&bank_path)?
    } else {
        vec![mnemo_core::bank::parse_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for bank in &banks {
        println!("Bank: {} ({} questions)", bank.name, bank.questions.len());

        let warnings = mnemo_core::bank::validate_bank(bank);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
