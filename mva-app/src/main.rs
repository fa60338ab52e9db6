use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use mva_config::{AppConfig, ConfigError, GeometryBackend};
use mva_engine::centroid::CentroidLocator;
use mva_engine::geometry::{MeanBackend, PolygonGeometry, full_backend};
use mva_engine::sector::AltitudePolicy;
use mva_io::{CsvLoader, MapSaver, TableLoader, TopskyWriter};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod convert;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let config = load_configuration(cli.config.clone());
    init_logging(&config, cli.debug);

    if let Err(err) = run(&cli, &config) {
        error!(error = %format!("{err:#}"), "转换失败");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    if !cli.input.is_file() {
        bail!("输入文件 '{}' 不存在", cli.input.display());
    }

    let table = CsvLoader::new()
        .load(&cli.input)
        .with_context(|| format!("无法读取 CSV 文件 {}", cli.input.display()))?;
    info!(columns = ?table.headers(), rows = table.len(), "已读取 CSV");
    if table.is_empty() {
        bail!("CSV 文件 {} 中没有数据行", cli.input.display());
    }

    let policy = AltitudePolicy::new(config.output.default_altitude_value()?);
    let sectors = convert::collect_sectors(&table, &config.input, &policy);

    let backend = cli.backend.map(Into::into).unwrap_or(config.geometry.backend);
    let locator = CentroidLocator::new(select_geometry(backend));
    let selection = cli.maps.map(Into::into).unwrap_or(config.output.maps);
    let maps = convert::build_maps(&sectors, &config.output, selection, &locator);

    TopskyWriter::new()
        .save(&maps, &cli.output)
        .with_context(|| format!("无法写入输出文件 {}", cli.output.display()))?;

    for map in &maps {
        info!(
            map = %map.header.name,
            lines = map.line_count(),
            texts = map.text_count(),
            "已写入图块"
        );
    }
    info!(path = %cli.output.display(), "Topsky MVA 地图生成完成");
    Ok(())
}

fn select_geometry(backend: GeometryBackend) -> Box<dyn PolygonGeometry> {
    match backend {
        GeometryBackend::Mean => Box::new(MeanBackend),
        GeometryBackend::Geo => full_backend().unwrap_or_else(|err| {
            warn!(error = %err, "几何后端不可用，退回顶点均值定位");
            Box::new(MeanBackend)
        }),
    }
}

fn load_configuration(override_path: Option<PathBuf>) -> AppConfig {
    match override_path {
        Some(path) => AppConfig::from_file(&path).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "加载指定配置失败，使用默认配置");
            AppConfig::default()
        }),
        None => match AppConfig::discover() {
            Ok(cfg) => cfg,
            Err(err) => {
                match &err {
                    ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } => {
                        warn!(path = %path.display(), error = %err, "加载默认配置失败，使用内建默认值");
                    }
                    ConfigError::Context { .. } | ConfigError::InvalidDefaultAltitude(_) => {
                        warn!(error = %err, "加载默认配置失败，使用内建默认值");
                    }
                }
                AppConfig::default()
            }
        },
    }
}

fn init_logging(config: &AppConfig, debug: bool) {
    let level = if debug {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if subscriber.try_init().is_err() {
        // 已初始化，忽略
    }
}
