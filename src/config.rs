use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// CSV file holding the ratings matrix
    #[serde(default = "default_ratings_path")]
    pub ratings_path: String,

    /// 0-based user to compute the report for
    #[serde(default = "default_target_user")]
    pub target_user: usize,

    /// Number of recommendations to produce
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Where the HTML report is written
    #[serde(default = "default_report_path")]
    pub report_path: String,

    /// Decimal places shown for predicted ratings
    #[serde(default = "default_score_precision")]
    pub score_precision: usize,

    /// Serve the HTTP API instead of writing a single report
    #[serde(default)]
    pub serve: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_ratings_path() -> String {
    "very_large_ratings_dataset.csv".to_string()
}

fn default_target_user() -> usize {
    2
}

fn default_top_n() -> usize {
    5
}

fn default_report_path() -> String {
    "recommendations.html".to_string()
}

fn default_score_precision() -> usize {
    2
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ratings_path: default_ratings_path(),
            target_user: default_target_user(),
            top_n: default_top_n(),
            report_path: default_report_path(),
            score_precision: default_score_precision(),
            serve: false,
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
