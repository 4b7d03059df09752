use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use folio_shared::api::ProfileInput;
use serde_json::{Map, Value};
use std::io::{self, Write};
use std::process::Command;
use tempfile::NamedTempFile;

/// Scalar fields always shown in the document, even when empty
const SCALAR_FIELDS: &[&str] = &[
    "name",
    "profession",
    "photo",
    "company",
    "address",
    "email",
    "phone",
    "website",
    "bio",
    "cover_image",
    "cv_url",
    "years_of_experience",
    "linkedin",
    "github",
    "twitter",
    "instagram",
];

/// Edit a profile as JSON in `$EDITOR`; `None` when nothing was changed
pub fn edit_profile(input: &ProfileInput) -> Result<Option<ProfileInput>> {
    let document = profile_document(input)?;
    let edited = launch_external_editor(&document, ".json")?;
    parse_profile_document(&document, &edited)
}

fn profile_document(input: &ProfileInput) -> Result<String> {
    let mut document = match serde_json::to_value(input)? {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };

    for key in SCALAR_FIELDS {
        document.entry(key.to_string()).or_insert(Value::Null);
    }

    Ok(serde_json::to_string_pretty(&Value::Object(document))?)
}

fn parse_profile_document(original: &str, edited: &str) -> Result<Option<ProfileInput>> {
    if edited.trim() == original.trim() {
        return Ok(None);
    }

    let input = serde_json::from_str(edited).context("Profile document is not valid JSON")?;
    Ok(Some(input))
}

/// Launch external editor with current content, return edited content
pub fn launch_external_editor(content: &str, file_extension: &str) -> Result<String> {
    // Get editor from environment, fallback to vim
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| "vim".to_string());

    // Create temp file with content
    let mut temp_file = NamedTempFile::with_suffix(file_extension)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    let temp_path = temp_file.path().to_path_buf();

    // Leave TUI mode
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    tracing::debug!(%editor, path = %temp_path.display(), "Launching editor");
    let status = Command::new(&editor).arg(&temp_path).status();

    // Restore TUI mode (always, even on error)
    let restore_result = (|| -> Result<()> {
        execute!(io::stdout(), EnterAlternateScreen)?;
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        enable_raw_mode()?;
        Ok(())
    })();

    if let Err(e) = restore_result {
        anyhow::bail!("Failed to restore terminal: {}", e);
    }

    match status {
        Ok(exit_status) if exit_status.success() => {
            let edited = std::fs::read_to_string(&temp_path)?;
            Ok(edited)
        }
        Ok(exit_status) => {
            anyhow::bail!("Editor exited with status: {}", exit_status)
        }
        Err(e) => {
            anyhow::bail!("Failed to launch editor '{}': {}", editor, e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_field() {
        let document = profile_document(&ProfileInput::default()).unwrap();
        let value: Value = serde_json::from_str(&document).unwrap();

        for key in SCALAR_FIELDS {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["skills"], serde_json::json!([]));
    }

    #[test]
    fn test_edited_document_parses_back_to_input() {
        let input = ProfileInput {
            name: Some("Ana".to_string()),
            years_of_experience: Some(4),
            ..Default::default()
        };
        let document = profile_document(&input).unwrap();

        let edited = document.replace("\"Ana\"", "\"Ana Silva\"");
        let parsed = parse_profile_document(&document, &edited).unwrap().unwrap();

        assert_eq!(parsed.name.as_deref(), Some("Ana Silva"));
        assert_eq!(parsed.years_of_experience, Some(4));
        assert_eq!(parsed.email, None);
    }

    #[test]
    fn test_unchanged_document_is_none() {
        let document = profile_document(&ProfileInput::default()).unwrap();
        let edited = format!("{}\n", document);
        assert!(parse_profile_document(&document, &edited).unwrap().is_none());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = parse_profile_document("{}", "{ name: ").unwrap_err();
        assert_eq!(err.to_string(), "Profile document is not valid JSON");
    }
}
