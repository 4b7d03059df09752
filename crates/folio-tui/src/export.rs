use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_shared::{vcard, vcard::Variant, Profile};

/// Write the profile's vCard into `dir`, creating it if needed
pub fn write_vcard(dir: &Path, profile: &Profile, variant: Variant) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(vcard::file_name(&profile.name));
    fs::write(&path, variant.render(profile))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(profile_id = %profile.id, path = %path.display(), ?variant, "vCard exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use folio_shared::api::ProfileInput;
    use uuid::Uuid;

    use super::*;

    fn profile() -> Profile {
        let now = Utc::now();
        ProfileInput {
            name: Some("Jean Dupont".to_string()),
            profession: Some("Développeur".to_string()),
            photo: Some("http://x/y.png".to_string()),
            skills: vec!["Rust".to_string()],
            ..Default::default()
        }
        .validate()
        .unwrap()
        .into_profile(Uuid::new_v4(), now, now)
    }

    #[test]
    fn test_write_vcard() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("cards");

        let path = write_vcard(&target, &profile(), Variant::Portfolio).unwrap();

        assert_eq!(path, target.join("Jean_Dupont.vcf"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("BEGIN:VCARD\nVERSION:3.0\nFN:Jean Dupont"));
        assert!(written.contains("NOTE:Compétences: Rust"));
    }

    #[test]
    fn test_write_vcard_keeps_hostile_names_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        let profile = Profile {
            name: "../../etc/evil".to_string(),
            ..profile()
        };

        let path = write_vcard(&target, &profile, Variant::Contact).unwrap();

        assert_eq!(path.parent(), Some(target.as_path()));
        assert!(path.exists());
        assert!(!dir.path().join("etc").exists());
    }

    #[test]
    fn test_contact_variant_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let profile = profile();

        write_vcard(dir.path(), &profile, Variant::Portfolio).unwrap();
        let path = write_vcard(dir.path(), &profile, Variant::Contact).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), vcard::contact_card(&profile));
    }
}
