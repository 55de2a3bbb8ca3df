use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::assessment::{AssessmentRecord, Snapshot};

/// Load an assessment snapshot from a YAML or JSON file
///
/// Files ending in `.json` are parsed as JSON, anything else as YAML.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read assessment file at {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let snapshot: Snapshot = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse assessment: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse assessment: invalid YAML in {}", path.display()))?
    };

    debug!(path = %path.display(), fields = snapshot.len(), "loaded snapshot");
    Ok(snapshot)
}

/// Save a finalized record as JSON atomically
///
/// The file is never left half-written. Refuses to replace an existing file
/// unless `overwrite` is set. Creates the parent directory if needed.
pub fn save_record(path: &Path, record: &AssessmentRecord, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        anyhow::bail!(
            "Refusing to overwrite existing file at {} (use --force)",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, record).context("Failed to serialize assessment")?;

    file.commit()
        .with_context(|| format!("Failed to save assessment to {}", path.display()))?;

    info!(path = %path.display(), mode = %record.mode(), score = record.score(), "saved assessment");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::AssessmentMode;
    use std::env;

    const HOLISTIC_YAML: &str = r#"
originality: GOOD
innovation: GOOD
technicalProficiency: GOOD
applicability: GOOD
designFunctionality: GOOD
impactPotential: GOOD
presentationCommunication: GOOD
sustainability: BAD
description: "Needs a clearer maintenance plan"
"#;

    #[test]
    fn test_load_yaml_snapshot() {
        let temp_path = env::temp_dir().join("refscore_test_load.yaml");
        fs::write(&temp_path, HOLISTIC_YAML).unwrap();

        let snapshot = load_snapshot(&temp_path).unwrap();
        assert_eq!(snapshot.mode().unwrap(), AssessmentMode::Holistic);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_path = env::temp_dir().join("refscore_test_does_not_exist.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_snapshot(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Failed to read assessment file"));
    }

    #[test]
    fn test_save_and_reload_record() {
        let source = env::temp_dir().join("refscore_test_save_source.yaml");
        let target = env::temp_dir().join("refscore_test_save_target.json");
        let _ = fs::remove_file(&target);
        fs::write(&source, HOLISTIC_YAML).unwrap();

        let record = AssessmentRecord::from_snapshot(&load_snapshot(&source).unwrap()).unwrap();
        save_record(&target, &record, false).unwrap();

        // Saved JSON is itself a valid snapshot carrying the computed score
        let reloaded = load_snapshot(&target).unwrap();
        assert_eq!(reloaded.stored_score(), Some(68.75));
        assert_eq!(AssessmentRecord::from_snapshot(&reloaded).unwrap(), record);

        // Second save without overwrite is refused
        let err = save_record(&target, &record, false).unwrap_err();
        assert!(err.to_string().contains("Refusing to overwrite"));
        save_record(&target, &record, true).unwrap();

        let _ = fs::remove_file(&source);
        let _ = fs::remove_file(&target);
    }
}
