#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
    pub pool_size: u32,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "tournament_standings.db".to_string()),
            pool_size: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RebuildSettings {
    /// Run ranking rebuilds as detached background tasks after a mutation
    pub detached: bool,
}

impl Default for RebuildSettings {
    fn default() -> Self {
        Self {
            detached: std::env::var("DETACHED_REBUILD")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub rebuild: RebuildSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            storage: StorageSettings::default(),
            rebuild: RebuildSettings::default(),
        }
    }
}
