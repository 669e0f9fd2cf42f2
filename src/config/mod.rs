//! Process configuration, read once at startup from flags or environment.
//!
//! Every flag falls back to an environment variable, so a `.env`-style
//! deployment and a local `--flag` run share the same code path.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Result, bail};
use clap::Parser;

use crate::consts::{
    DEFAULT_DB_PATH, DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_TABLE,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-ai", version, about = "A todo backend that understands plain English.")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Base URL of the hosted store (e.g. https://xyz.supabase.co)
    #[arg(long, env = "SUPABASE_URL")]
    pub store_url: Option<String>,

    /// Access key for the hosted store
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    pub store_key: Option<String>,

    /// Table holding the todos in the hosted store
    #[arg(long, env = "TODO_TABLE", default_value = DEFAULT_TABLE)]
    pub table: String,

    /// SQLite database path, used when no hosted store is configured (use :memory: for ephemeral)
    #[arg(long, env = "TODO_DB", default_value = DEFAULT_DB_PATH)]
    pub db: String,

    /// Gemini API key; without it the /ai route is unavailable
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Gemini API host
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,
}

/// Which store the server should talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Rest {
        url: String,
        key: String,
        table: String,
    },
    Sqlite {
        path: String,
    },
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// A store URL and key must come together; with neither, fall back to SQLite.
    pub fn store_backend(&self) -> Result<StoreBackend> {
        match (present(&self.store_url), present(&self.store_key)) {
            (Some(url), Some(key)) => Ok(StoreBackend::Rest {
                url: url.to_string(),
                key: key.to_string(),
                table: self.table.clone(),
            }),
            (Some(_), None) => bail!("SUPABASE_URL is set but SUPABASE_KEY is missing"),
            (None, Some(_)) => bail!("SUPABASE_KEY is set but SUPABASE_URL is missing"),
            (None, None) => Ok(StoreBackend::Sqlite {
                path: self.db.clone(),
            }),
        }
    }

    pub fn gemini_key(&self) -> Option<&str> {
        present(&self.gemini_api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["todo-ai"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn explicit_port_and_host() {
        let config = parse(&["--port", "8080", "--host", "127.0.0.1"]);
        assert_eq!(config.addr(), "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn rest_backend_needs_url_and_key() {
        let config = parse(&[
            "--store-url",
            "https://x.supabase.co",
            "--store-key",
            "anon",
            "--table",
            "items",
        ]);
        assert_eq!(
            config.store_backend().unwrap(),
            StoreBackend::Rest {
                url: "https://x.supabase.co".to_string(),
                key: "anon".to_string(),
                table: "items".to_string(),
            }
        );
    }

    #[test]
    fn url_without_key_is_an_error() {
        let mut config = parse(&["--store-url", "https://x.supabase.co"]);
        config.store_key = None;
        let err = config.store_backend().unwrap_err();
        assert!(err.to_string().contains("SUPABASE_KEY"));
    }

    #[test]
    fn key_without_url_is_an_error() {
        let mut config = parse(&["--store-key", "anon"]);
        config.store_url = None;
        assert!(config.store_backend().is_err());
    }

    #[test]
    fn falls_back_to_sqlite() {
        let mut config = parse(&["--db", ":memory:"]);
        config.store_url = None;
        config.store_key = None;
        assert_eq!(
            config.store_backend().unwrap(),
            StoreBackend::Sqlite {
                path: ":memory:".to_string()
            }
        );
    }

    #[test]
    fn blank_gemini_key_counts_as_missing() {
        let mut config = parse(&[]);
        config.gemini_api_key = Some("  ".to_string());
        assert!(config.gemini_key().is_none());
        config.gemini_api_key = Some("abc".to_string());
        assert_eq!(config.gemini_key(), Some("abc"));
    }
}
