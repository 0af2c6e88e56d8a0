//! Client configuration loaded from environment variables.

use std::env;

use secrecy::{ExposeSecret, SecretString};

/// Default values used when a variable is not set.
pub mod defaults {
    pub const HOST: &str = "localhost";
    pub const PORT: u16 = 5432;
    pub const BUILD_NAME: &str = "Smoke";
}

/// Backend login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Parameters for opening a report session against a database.
#[derive(Debug, Clone)]
pub struct ConnectParams {
    /// Database host
    pub host: String,
    /// Database port
    pub port: u16,
    /// Optional login; connects anonymously when absent
    pub credentials: Option<Credentials>,
    /// Project name, used as the database name
    pub project: String,
    /// Human readable label of the build this session records
    pub build_name: String,
    /// Full connection string overriding host/port/credentials/project
    pub database_url: Option<String>,
}

impl ConnectParams {
    /// Parameters for an anonymous connection.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        project: impl Into<String>,
        build_name: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            credentials: None,
            project: project.into(),
            build_name: build_name.into(),
            database_url: None,
        }
    }

    /// Attach a login to the connection.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Connect through an explicit URL instead of host/port/project.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Build the database connection string.
    ///
    /// The project selects the database, mirroring one report database per project.
    pub fn database_url(&self) -> String {
        if let Some(ref url) = self.database_url {
            return url.clone();
        }

        let project = urlencoding::encode(&self.project);
        match self.credentials {
            Some(ref creds) => format!(
                "postgres://{}:{}@{}:{}/{}",
                urlencoding::encode(&creds.user),
                urlencoding::encode(creds.password.expose_secret()),
                self.host,
                self.port,
                project
            ),
            None => format!("postgres://{}:{}/{}", self.host, self.port, project),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub connect: ConnectParams,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `QA_REPORT_PROJECT`: Project / database name - REQUIRED
    /// - `QA_REPORT_HOST`: Database host (default: localhost)
    /// - `QA_REPORT_PORT`: Database port (default: 5432)
    /// - `QA_REPORT_USER` / `QA_REPORT_PASSWORD`: Login, both or neither
    /// - `QA_REPORT_BUILD_NAME`: Build label (default: Smoke)
    /// - `QA_REPORT_DATABASE_URL`: Full connection string override
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let project = lookup("QA_REPORT_PROJECT")
            .filter(|p| !p.trim().is_empty())
            .ok_or(ConfigError::MissingEnvVar("QA_REPORT_PROJECT"))?;

        let host = lookup("QA_REPORT_HOST").unwrap_or_else(|| defaults::HOST.to_string());

        let port = match lookup("QA_REPORT_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                ConfigError::InvalidValue("QA_REPORT_PORT must be a valid port number")
            })?,
            None => defaults::PORT,
        };

        let credentials = match (lookup("QA_REPORT_USER"), lookup("QA_REPORT_PASSWORD")) {
            (Some(user), Some(password)) => Some(Credentials::new(user, password)),
            (None, None) => None,
            _ => {
                return Err(ConfigError::InvalidValue(
                    "QA_REPORT_USER and QA_REPORT_PASSWORD must be set together",
                ));
            }
        };

        let build_name =
            lookup("QA_REPORT_BUILD_NAME").unwrap_or_else(|| defaults::BUILD_NAME.to_string());

        Ok(Config {
            connect: ConnectParams {
                host,
                port,
                credentials,
                project,
                build_name,
                database_url: lookup("QA_REPORT_DATABASE_URL"),
            },
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),
}
