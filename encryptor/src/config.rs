//! # config — อ่าน Config จาก Environment Variables

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

#[derive(Clone)]
pub struct Config {
    pub bind_addr:      SocketAddr,
    /// Raw key bytes — ต้องยาว 32 bytes พอดี (ตรวจใน `Aes256Encryption::new`)
    pub key:            Vec<u8>,
    pub server_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8081".to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let key = std::env::var("ENCRYPTOR_KEY")
            .context("ENCRYPTOR_KEY environment variable is required")?
            .into_bytes();

        let timeout_secs: u64 = std::env::var("SERVER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("SERVER_TIMEOUT_SECS must be a number")?;

        Ok(Self {
            bind_addr,
            key,
            server_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// key ห้ามหลุดไปใน log
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .field("server_timeout", &self.server_timeout)
            .finish()
    }
}
