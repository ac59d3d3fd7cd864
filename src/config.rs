use std::{env, net::SocketAddr};

use anyhow::Context;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    // Prefix of every todo URI handed back to clients
    pub public_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let host = env::var("TODO_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("TODO_PORT") {
            Ok(port) => port
                .parse()
                .with_context(|| format!("TODO_PORT is not a valid port: {port}"))?,
            Err(_) => DEFAULT_PORT,
        };
        let public_url = env::var("TODO_PUBLIC_URL").ok();

        Ok(Self::new(host, port, public_url))
    }

    pub fn new(host: String, port: u16, public_url: Option<String>) -> Self {
        let public_url = public_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{port}"));
        Config {
            host,
            port,
            public_url,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    pub fn todo_uri(&self, id: u64) -> String {
        format!("{}/todo/{}", self.public_url, id)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_HOST.to_string(), DEFAULT_PORT, None)
    }
}
