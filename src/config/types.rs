use serde::Deserialize;

/// Main configuration structure for HCPCS-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Source site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the code reference site
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Path of the group directory page, relative to the base URL
    #[serde(rename = "directory-path", default = "default_directory_path")]
    pub directory_path: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            directory_path: default_directory_path(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV catalog file (overwritten on each successful run)
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.hcpcsdata.com".to_string()
}

fn default_directory_path() -> String {
    "/Codes".to_string()
}

// The site serves a stripped-down page to unknown agents, so identify as a
// desktop browser.
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3"
        .to_string()
}

fn default_csv_path() -> String {
    "hcps_code_dtl.csv".to_string()
}
