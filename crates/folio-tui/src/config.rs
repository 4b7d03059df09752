use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
    /// Base of the shareable portfolio links
    pub public_url: String,
    /// Where exported vCards are written
    pub export_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok(), dirs::download_dir())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>, downloads: Option<PathBuf>) -> Self {
        Self {
            server_url: var("FOLIO_SERVER_URL")
                .unwrap_or_else(|| "http://localhost:5000".to_string()),
            public_url: var("FOLIO_PUBLIC_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            export_dir: var("FOLIO_EXPORT_DIR")
                .map(PathBuf::from)
                .or(downloads)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)], downloads: Option<&str>) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned(), downloads.map(PathBuf::from))
    }

    #[test]
    fn test_defaults() {
        let config = config(&[], None);
        assert_eq!(config.server_url, "http://localhost:5000");
        assert_eq!(config.public_url, "http://localhost:8080");
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_export_dir_prefers_env_over_downloads() {
        assert_eq!(
            config(&[], Some("/home/ana/Downloads")).export_dir,
            PathBuf::from("/home/ana/Downloads")
        );
        assert_eq!(
            config(&[("FOLIO_EXPORT_DIR", "/tmp/cards")], Some("/home/ana/Downloads")).export_dir,
            PathBuf::from("/tmp/cards")
        );
    }

    #[test]
    fn test_urls_from_env() {
        let config = config(
            &[
                ("FOLIO_SERVER_URL", "https://api.folio.example.com"),
                ("FOLIO_PUBLIC_URL", "https://folio.example.com"),
            ],
            None,
        );
        assert_eq!(config.server_url, "https://api.folio.example.com");
        assert_eq!(config.public_url, "https://folio.example.com");
    }
}
