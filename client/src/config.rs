/// Build-time defaults. A `<meta>` tag of the same purpose in `index.html` wins.
const BUILD_SUPABASE_URL: Option<&str> = option_env!("CSMETA_SUPABASE_URL");
const BUILD_SUPABASE_ANON_KEY: Option<&str> = option_env!("CSMETA_SUPABASE_ANON_KEY");

const META_SUPABASE_URL: &str = "csmeta-supabase-url";
const META_SUPABASE_ANON_KEY: &str = "csmeta-supabase-anon-key";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn from_parts(url: Option<&str>, anon_key: Option<&str>) -> Option<Self> {
        let url = normalize(url)?.trim_end_matches('/').to_string();
        let anon_key = normalize(anon_key)?;
        if url.is_empty() {
            return None;
        }
        Some(Self { url, anon_key })
    }

    pub fn token_url(&self, grant_type: &str) -> String {
        format!("{}/auth/v1/token?grant_type={grant_type}", self.url)
    }

    pub fn logout_url(&self) -> String {
        format!("{}/auth/v1/logout", self.url)
    }

    /// First DNS label of the project URL (`https://abcd.supabase.co` -> `abcd`).
    pub fn project_ref(&self) -> &str {
        let host = self
            .url
            .split_once("://")
            .map_or(self.url.as_str(), |(_, rest)| rest);
        host.split(['.', ':', '/']).next().unwrap_or(host)
    }

    /// localStorage key the persisted session lives under.
    pub fn storage_key(&self) -> String {
        format!("sb-{}-auth-token", self.project_ref())
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document
        .query_selector(&format!("meta[name='{name}']"))
        .ok()
        .flatten()?;
    element.get_attribute("content")
}

pub fn supabase_config() -> Option<SupabaseConfig> {
    let url = normalize(meta_content(META_SUPABASE_URL).as_deref())
        .or_else(|| BUILD_SUPABASE_URL.map(str::to_string));
    let anon_key = normalize(meta_content(META_SUPABASE_ANON_KEY).as_deref())
        .or_else(|| BUILD_SUPABASE_ANON_KEY.map(str::to_string));
    SupabaseConfig::from_parts(url.as_deref(), anon_key.as_deref())
}

#[cfg(test)]
mod tests {
    use super::SupabaseConfig;

    #[test]
    fn trims_values_and_trailing_slash() {
        let config =
            SupabaseConfig::from_parts(Some(" https://abcd.supabase.co/ "), Some(" key ")).unwrap();
        assert_eq!(config.url, "https://abcd.supabase.co");
        assert_eq!(config.anon_key, "key");
    }

    #[test]
    fn blank_values_count_as_missing() {
        assert!(SupabaseConfig::from_parts(Some("   "), Some("key")).is_none());
        assert!(SupabaseConfig::from_parts(Some("https://abcd.supabase.co"), Some("")).is_none());
        assert!(SupabaseConfig::from_parts(None, Some("key")).is_none());
        assert!(SupabaseConfig::from_parts(Some("/"), Some("key")).is_none());
    }

    #[test]
    fn builds_endpoint_urls() {
        let config =
            SupabaseConfig::from_parts(Some("https://abcd.supabase.co"), Some("key")).unwrap();
        assert_eq!(
            config.token_url("password"),
            "https://abcd.supabase.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(config.logout_url(), "https://abcd.supabase.co/auth/v1/logout");
    }

    #[test]
    fn derives_storage_key_from_project_ref() {
        let config =
            SupabaseConfig::from_parts(Some("https://abcd.supabase.co"), Some("key")).unwrap();
        assert_eq!(config.project_ref(), "abcd");
        assert_eq!(config.storage_key(), "sb-abcd-auth-token");

        let local = SupabaseConfig::from_parts(Some("http://localhost:54321"), Some("key")).unwrap();
        assert_eq!(local.storage_key(), "sb-localhost-auth-token");
    }
}
