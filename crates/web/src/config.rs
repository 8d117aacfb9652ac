use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub change_feed_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            change_feed_enabled: parse_flag(std::env::var("RESULTS_CHANGE_FEED").ok().as_deref())
                .context("RESULTS_CHANGE_FEED must be true or false")?,
        })
    }
}

fn parse_flag(value: Option<&str>) -> Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(true),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => anyhow::bail!("unrecognised flag value '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_defaults_to_enabled() {
        assert!(parse_flag(None).unwrap());
        assert!(parse_flag(Some("")).unwrap());
    }

    #[test]
    fn test_flag_values() {
        assert!(parse_flag(Some("TRUE")).unwrap());
        assert!(!parse_flag(Some("off")).unwrap());
        assert!(parse_flag(Some("maybe")).is_err());
    }
}
