// Pixpie Server SDK - Configuration
// Copyright (C) 2025 Akaere Networks
// SPDX-License-Identifier: AGPL-3.0-or-later

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::client::error::{PixpieError, PixpieResult};
use crate::client::models::{CropAlign, ImageTransform};

// SDK identification sent during authentication
pub const SDK_VERSION: &str = "1.0.0";
pub const SERVER_SDK_TYPE: &str = "2";

// Default API endpoint
pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_HOST: &str = "api.pixpie.co";
pub const DEFAULT_PORT: u16 = 9443;
pub const DEFAULT_SALT: &str = "yuuRiesahs3niet7thac";

// API paths
pub const PATH_AUTH_SDK: &str = "authentication/token/server_sdk";
pub const PATH_IMAGE_UPLOAD: &str = "images/upload";
pub const PATH_IMAGE_UPLOAD_ASYNC: &str = "async/images/upload";
pub const PATH_BATCH_DELETE: &str = "storage/delete/batch";
pub const PATH_LIST_ITEMS: &str = "storage/list";

pub const AUTH_TOKEN_HEADER: &str = "pixpieAuthToken";
pub const USER_AGENT: &str = concat!("PixpieServerSdk/", env!("CARGO_PKG_VERSION"), " (Rust)");

// Environment variables read by ClientConfig::from_env
pub const ENV_REVERSE_URL_ID: &str = "PIXPIE_REVERSE_URL_ID";
pub const ENV_SECRET_KEY: &str = "PIXPIE_SECRET_KEY";
pub const ENV_SALT: &str = "PIXPIE_SALT";
pub const ENV_SCHEME: &str = "PIXPIE_SCHEME";
pub const ENV_HOST: &str = "PIXPIE_HOST";
pub const ENV_PORT: &str = "PIXPIE_PORT";
pub const ENV_TIMEOUT_SECS: &str = "PIXPIE_TIMEOUT_SECS";

fn default_salt() -> String {
    DEFAULT_SALT.to_string()
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Connection settings for one tenant
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    pub reverse_url_id: String,
    pub secret_key: String,
    #[serde(default = "default_salt")]
    pub salt: String,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout; the HTTP client's default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(reverse_url_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            reverse_url_id: reverse_url_id.into(),
            secret_key: secret_key.into(),
            salt: default_salt(),
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            timeout_secs: None,
        }
    }

    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = salt.into();
        self
    }

    pub fn with_endpoint(
        mut self,
        scheme: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        self.scheme = scheme.into();
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// `scheme://host:port`
    pub fn base_address(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> PixpieResult<Self> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> PixpieResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| PixpieError::EnvVar(key.to_string()))
        };

        let mut config = Self::new(required(ENV_REVERSE_URL_ID)?, required(ENV_SECRET_KEY)?);

        if let Some(salt) = lookup(ENV_SALT) {
            config.salt = salt;
        }
        if let Some(scheme) = lookup(ENV_SCHEME) {
            config.scheme = scheme;
        }
        if let Some(host) = lookup(ENV_HOST) {
            config.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.port = port.trim().parse().map_err(|_| {
                PixpieError::Config(format!("{} is not a valid port: {}", ENV_PORT, port))
            })?;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            let secs = timeout.trim().parse().map_err(|_| {
                PixpieError::Config(format!("{} is not a number: {}", ENV_TIMEOUT_SECS, timeout))
            })?;
            config.timeout_secs = Some(secs);
        }

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> PixpieResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> PixpieResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("reverse_url_id", &self.reverse_url_id)
            .field("secret_key", &"<redacted>")
            .field("salt", &"<redacted>")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Parser)]
#[command(author, version, about = "Command-line client for the Pixpie image CDN")]
pub struct Cli {
    /// TOML configuration file (defaults to PIXPIE_* environment variables)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Format log output for journald
    #[arg(long)]
    pub journald: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the CDN URL for an image
    Url {
        /// Storage path, or a full URL with --remote
        image: String,
        #[arg(long)]
        remote: bool,
        #[command(flatten)]
        transform: TransformArgs,
    },
    /// Download a transformed image
    Fetch {
        image: String,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        remote: bool,
        #[command(flatten)]
        transform: TransformArgs,
    },
    /// Upload a local image into tenant storage
    Upload {
        file: PathBuf,
        inner_path: String,
        /// Use the asynchronous upload endpoint
        #[arg(long = "async")]
        async_upload: bool,
    },
    /// List a storage folder
    List {
        #[arg(default_value = "")]
        inner_path: String,
    },
    /// Check whether a folder exists inside another
    DirExists { parent: String, folder: String },
    /// Delete images and folders in one request
    Delete {
        #[arg(long = "image")]
        images: Vec<String>,
        #[arg(long = "folder")]
        folders: Vec<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct TransformArgs {
    #[arg(short = 'W', long)]
    pub width: Option<u32>,
    #[arg(short = 'H', long)]
    pub height: Option<u32>,
    #[arg(short, long)]
    pub quality: Option<u32>,
    #[arg(long)]
    pub webp: bool,
    /// top, bottom, left, right, top_left, top_right, bottom_left, bottom_right
    #[arg(long, default_value = "default")]
    pub crop: CropAlign,
}

impl From<TransformArgs> for ImageTransform {
    fn from(args: TransformArgs) -> Self {
        ImageTransform {
            width: args.width,
            height: args.height,
            quality: args.quality,
            webp: args.webp,
            crop: args.crop,
        }
    }
}
