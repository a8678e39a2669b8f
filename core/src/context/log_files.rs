use std::path::Path;

use relink_types::EncounterLog;

use super::LogError;

/// Parse a stored encounter log. `path` is only used for error context.
pub fn parse_encounter_log(content: &str, path: &Path) -> Result<EncounterLog, LogError> {
    serde_json::from_str(content).map_err(|source| LogError::ParseJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a stored encounter log from disk.
pub fn load_encounter_log(path: &Path) -> Result<EncounterLog, LogError> {
    let content = std::fs::read_to_string(path).map_err(|source| LogError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let log = parse_encounter_log(&content, path)?;

    tracing::debug!(
        path = %path.display(),
        players = log.encounter_state.players.len(),
        chart_len = log.chart_len,
        sba_chart_len = log.sba_chart_len,
        "Loaded encounter log"
    );
    Ok(log)
}
