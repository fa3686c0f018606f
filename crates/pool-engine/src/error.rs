/// Errors raised while building a table from configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The config text is not valid JSON for `PoolConfig`.
    Json(serde_json::Error),
    /// Width or height is zero.
    DegenerateTable { width: u32, height: u32 },
    /// Friction outside `[0, 1)`.
    InvalidFriction(f64),
    /// Ball radius not strictly positive. `index` is the position in the config list.
    DegenerateBall { index: usize, radius: f64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "config parse error: {}", e),
            ConfigError::DegenerateTable { width, height } => {
                write!(f, "table must have positive area, got {}x{}", width, height)
            }
            ConfigError::InvalidFriction(v) => {
                write!(f, "table friction must be in [0, 1), got {}", v)
            }
            ConfigError::DegenerateBall { index, radius } => {
                write!(f, "ball {} must have a positive radius, got {}", index, radius)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}
