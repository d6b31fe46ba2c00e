use crate::commands::{CmdMessage, CmdResult};
use crate::config::FrontdeskConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Reads or updates the config stored in `dir`.
///
/// Unknown keys and rejected values come back as error messages; only I/O and
/// parse failures of the file itself are `Err`.
pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = FrontdeskConfig::load(dir)?;
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => {
            let mut result = CmdResult::default();
            match config.get(&key) {
                Ok(value) => result.add_message(CmdMessage::info(value)),
                Err(e) => result.add_message(CmdMessage::error(e.to_string())),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e.to_string()));
                return Ok(result);
            }
            config.save(dir)?;
            let display = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::ids::IdPolicy;
    use tempfile::TempDir;

    #[test]
    fn set_persists_and_show_reads_back() {
        let temp = TempDir::new().unwrap();
        let set = run(
            temp.path(),
            ConfigAction::Set("patient-ids".into(), "stable".into()),
        )
        .unwrap();
        assert_eq!(set.messages[0].level, MessageLevel::Success);

        let shown = run(temp.path(), ConfigAction::ShowKey("patient-ids".into())).unwrap();
        assert_eq!(shown.messages[0].content, "stable");

        let all = run(temp.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(all.config.unwrap().patient_ids, IdPolicy::Stable);
    }

    #[test]
    fn bad_value_is_an_error_message_and_not_saved() {
        let temp = TempDir::new().unwrap();
        let result = run(
            temp.path(),
            ConfigAction::Set("rows-per-page".into(), "7".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!temp.path().join("config.json").exists());
    }

    #[test]
    fn unknown_key_is_reported() {
        let temp = TempDir::new().unwrap();
        let result = run(temp.path(), ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(result.messages[0].content.contains("Unknown config key"));
    }
}
