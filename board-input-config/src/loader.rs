// Configuration loader with two-pass loading

use std::path::Path;

use board_input::config::BoardConfig;
use config::{Config, File, FileFormat};

use crate::BoardTomlConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::validation::validate_config;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a board configuration file:
    ///
    /// **Pass 1**: Parse the user file alone, to report syntax errors against that file
    /// **Pass 2**: Merge the built-in defaults with the user file
    ///
    /// The merged config is validated before it is returned.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use board_input_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::load("board.toml").unwrap();
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<BoardTomlConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::check_syntax(&path.display().to_string(), &content)?;

        let config = Self::merge(File::from(path))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load a board configuration from a TOML string, see [`ConfigLoader::load`].
    pub fn load_str(content: &str) -> ConfigResult<BoardTomlConfig> {
        Self::check_syntax("<string>", content)?;
        let config = Self::merge(File::from_str(content, FileFormat::Toml))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load a board configuration file and convert it into the runtime configuration.
    pub fn load_board_config<P: AsRef<Path>>(path: P) -> ConfigResult<BoardConfig> {
        Self::load(path)?.to_board_config()
    }

    /// First pass, only checks that the user file is valid TOML
    fn check_syntax(path: &str, content: &str) -> ConfigResult<()> {
        content
            .parse::<toml::Table>()
            .map(|_| ())
            .map_err(|e| ConfigError::TomlParse {
                path: path.to_string(),
                message: e.message().to_string(),
            })
    }

    /// Second pass, merges defaults with user config
    fn merge<S>(user: S) -> ConfigResult<BoardTomlConfig>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(user)
            .build()
            .map_err(|e| ConfigError::Merge { message: e.to_string() })?
            .try_deserialize()
            .map_err(|e| ConfigError::Merge { message: e.to_string() })
    }
}
