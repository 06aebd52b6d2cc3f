use crate::vars::Vars;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub(crate) fn load<F>(vars: &Vars<F>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = vars
            .get("ALLOWED_ORIGINS")
            .or_else(|| vars.get("FRONTEND_URL"))
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string());

        Self::from_list(&raw)
    }

    pub fn from_list(raw: &str) -> Self {
        let allowed_origins = raw
            .split(',')
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }

    /// `*` in the list allows every origin.
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::from_list(DEFAULT_ORIGINS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_list_trims_entries() {
        let config = CorsConfig::from_list(" https://a.school/ , ,https://b.school");
        assert_eq!(config.allowed_origins, vec!["https://a.school", "https://b.school"]);
        assert!(!config.allows_any());
    }

    #[test]
    fn test_frontend_url_fallback() {
        let vars = Vars::new(|key: &str| {
            (key == "FRONTEND_URL").then(|| "https://portal.eduzone.com".to_string())
        });
        let config = CorsConfig::load(&vars);
        assert_eq!(config.allowed_origins, vec!["https://portal.eduzone.com"]);
    }

    #[test]
    fn test_wildcard() {
        assert!(CorsConfig::from_list("*").allows_any());
    }
}
