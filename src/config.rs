use std::time::Duration;

use envconfig::Envconfig;
use url::Url;

#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    // Base URL of the minting service, requests go to `{base}/mint`
    #[envconfig(from = "MINT_API_URL", default = "https://your-backend-api.com")]
    pub mint_api_url: String,

    #[envconfig(from = "MINT_REQUEST_TIMEOUT_MS", default = "30000")]
    pub request_timeout_ms: u64,

    #[envconfig(from = "MINT_CONNECT_TIMEOUT_MS", default = "10000")]
    pub connect_timeout_ms: u64,

    #[envconfig(from = "INTERACTIVE", default = "true")]
    pub interactive: bool,
}

impl Config {
    pub fn test_default() -> Self {
        Config {
            mint_api_url: "http://127.0.0.1:1".to_string(),
            request_timeout_ms: 2_000,
            connect_timeout_ms: 1_000,
            interactive: false,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.mint_api_url = url.into();
        self
    }

    /// Full URL of the mint endpoint.
    pub fn mint_endpoint(&self) -> eyre::Result<Url> {
        let base = Url::parse(&self.mint_api_url)
            .map_err(|e| eyre::eyre!("Invalid MINT_API_URL '{}': {}", self.mint_api_url, e))?;

        match base.scheme() {
            "http" | "https" => {}
            scheme => eyre::bail!("MINT_API_URL must be http or https, got {}", scheme),
        }

        let joined = format!("{}/mint", base.as_str().trim_end_matches('/'));
        Ok(Url::parse(&joined)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn validate(self) -> eyre::Result<Self> {
        self.mint_endpoint()?;
        if self.request_timeout_ms == 0 {
            eyre::bail!("MINT_REQUEST_TIMEOUT_MS must be greater than 0");
        }
        Ok(self)
    }
}

pub fn init() -> eyre::Result<Config> {
    Config::init_from_env()
        .map_err(|e| eyre::eyre!("Failed to load config: {}", e))?
        .validate()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mint_endpoint() {
        let config = Config::test_default().with_api_url("https://api.example.com");
        assert_eq!(
            config.mint_endpoint().unwrap().as_str(),
            "https://api.example.com/mint"
        );

        let config = Config::test_default().with_api_url("https://api.example.com/v1/");
        assert_eq!(
            config.mint_endpoint().unwrap().as_str(),
            "https://api.example.com/v1/mint"
        );
    }

    #[test]
    fn test_invalid_urls() {
        let config = Config::test_default().with_api_url("not a url");
        assert!(config.mint_endpoint().is_err());

        let config = Config::test_default().with_api_url("ftp://files.example.com");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::test_default();
        config.request_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeouts() {
        let config = Config::test_default();
        assert_eq!(config.request_timeout(), Duration::from_secs(2));
        assert_eq!(config.connect_timeout(), Duration::from_secs(1));
    }
}
