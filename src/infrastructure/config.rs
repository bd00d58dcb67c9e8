use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub pagination: PaginationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaginationSettings {
    pub items_per_page: u32,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.url", "postgres://localhost/aquarium")?
        .set_default("database.max_connections", 5)?
        .set_default("pagination.items_per_page", 5)?)
}

fn validate(config: AppConfig) -> anyhow::Result<AppConfig> {
    if config.pagination.items_per_page == 0 {
        anyhow::bail!("pagination.items_per_page must be greater than 0");
    }
    Ok(config)
}

/// Defaults, then `config/server.*` if present, then `AQUARIUM__*` variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/server").required(false))
        .add_source(
            config::Environment::with_prefix("AQUARIUM")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    validate(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: AppConfig = builder().unwrap().build().unwrap().try_deserialize().unwrap();

        assert_eq!(config.server.address(), "0.0.0.0:8080");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.pagination.items_per_page, 5);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config: AppConfig = builder()
            .unwrap()
            .set_override("pagination.items_per_page", 0)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(validate(config).is_err());
    }
}
