use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use mva_core::altitude::AltitudeValue;
use mva_core::map::{MapHeader, MapSelection, Season};
use serde::Deserialize;
use thiserror::Error;

/// 应用配置的根结构。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub geometry: GeometryConfig,
}

impl AppConfig {
    /// 从显式路径加载配置。
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 自动发现配置文件：优先读取环境变量 `MVA_CONFIG`，否则寻找 `./config/default.toml`。
    /// 若文件缺失，则返回默认配置。
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os("MVA_CONFIG") {
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = env::current_dir()
            .map(|dir| dir.join("config").join("default.toml"))
            .map_err(|source| ConfigError::Context {
                message: "获取当前工作目录失败".to_string(),
                source,
            })?;

        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// 日志配置，支持设置默认等级或 `EnvFilter` 指令。
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// 输入 CSV 的列名。
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_geometry_column")]
    pub geometry_column: String,
    #[serde(default = "InputConfig::default_warm_column")]
    pub warm_column: String,
    #[serde(default = "InputConfig::default_cold_column")]
    pub cold_column: String,
}

impl InputConfig {
    fn default_geometry_column() -> String {
        "_geometry".to_string()
    }

    fn default_warm_column() -> String {
        "LOWERLIMIT".to_string()
    }

    fn default_cold_column() -> String {
        "MRVA_COLD".to_string()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            geometry_column: Self::default_geometry_column(),
            warm_column: Self::default_warm_column(),
            cold_column: Self::default_cold_column(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub maps: MapSelection,
    #[serde(default = "OutputConfig::default_summer_name")]
    pub summer_map_name: String,
    #[serde(default = "OutputConfig::default_winter_name")]
    pub winter_map_name: String,
    #[serde(default = "OutputConfig::default_folder")]
    pub folder: String,
    #[serde(default = "OutputConfig::default_color")]
    pub color: String,
    #[serde(default = "OutputConfig::default_style")]
    pub style: String,
    /// 两列高度都缺失时使用的值，单位与数据源一致（英尺）。
    #[serde(default = "OutputConfig::default_altitude")]
    pub default_altitude: i64,
}

impl OutputConfig {
    fn default_summer_name() -> String {
        "MVA Germany Summer".to_string()
    }

    fn default_winter_name() -> String {
        "MVA Germany Winter".to_string()
    }

    fn default_folder() -> String {
        "MVA".to_string()
    }

    fn default_color() -> String {
        "green".to_string()
    }

    fn default_style() -> String {
        "Solid:1".to_string()
    }

    fn default_altitude() -> i64 {
        3000
    }

    pub fn header(&self, season: Season) -> MapHeader {
        let name = match season {
            Season::Summer => &self.summer_map_name,
            Season::Winter => &self.winter_map_name,
        };
        MapHeader {
            name: name.clone(),
            folder: self.folder.clone(),
            color: self.color.clone(),
            style: self.style.clone(),
        }
    }

    /// 非正数的默认高度无效。
    pub fn default_altitude_value(&self) -> Result<AltitudeValue, ConfigError> {
        AltitudeValue::new(self.default_altitude)
            .ok_or(ConfigError::InvalidDefaultAltitude(self.default_altitude))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            maps: MapSelection::default(),
            summer_map_name: Self::default_summer_name(),
            winter_map_name: Self::default_winter_name(),
            folder: Self::default_folder(),
            color: Self::default_color(),
            style: Self::default_style(),
            default_altitude: Self::default_altitude(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryBackend {
    #[default]
    Geo,
    Mean,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeometryConfig {
    #[serde(default)]
    pub backend: GeometryBackend,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件 {path:?} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析配置文件 {path:?} 失败: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: std::io::Error,
    },
    #[error("默认高度必须为正数（当前值：{0}）")]
    InvalidDefaultAltitude(i64),
}
