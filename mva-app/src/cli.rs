use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use mva_config::GeometryBackend;
use mva_core::map::MapSelection;

/// 将 MVA 扇区 CSV 转换为 Topsky 夏季/冬季地图。
#[derive(Debug, Parser)]
#[command(name = "mva2topsky", version)]
pub struct Cli {
    /// 输入 CSV 文件
    pub input: PathBuf,
    /// 输出 Topsky .txt 文件
    pub output: PathBuf,
    /// 输出调试日志（包括前五行的解析详情）
    #[arg(long)]
    pub debug: bool,
    /// 只输出指定的图块
    #[arg(long, value_enum)]
    pub maps: Option<MapsArg>,
    /// 配置文件路径
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// 标注定位使用的几何后端
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum MapsArg {
    Both,
    Summer,
    Winter,
}

impl From<MapsArg> for MapSelection {
    fn from(arg: MapsArg) -> Self {
        match arg {
            MapsArg::Both => MapSelection::Both,
            MapsArg::Summer => MapSelection::Summer,
            MapsArg::Winter => MapSelection::Winter,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum BackendArg {
    /// 面积质心 + 内部点二分（需要 `geo` 特性）
    Geo,
    /// 顶点算术均值
    Mean,
}

impl From<BackendArg> for GeometryBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Geo => GeometryBackend::Geo,
            BackendArg::Mean => GeometryBackend::Mean,
        }
    }
}
