use mva_config::{InputConfig, OutputConfig};
use mva_core::altitude::format_altitude;
use mva_core::map::{MapBlock, MapSelection};
use mva_engine::centroid::CentroidLocator;
use mva_engine::entries::build_map;
use mva_engine::sector::{AltitudePolicy, Sector};
use mva_io::{CsvTable, parse_polygon};
use tracing::{debug, info, warn};

/// 调试模式下详细输出的前几行。
const TRACED_ROWS: usize = 5;
const GEOMETRY_PREVIEW_CHARS: usize = 50;

/// 逐行解析几何与高度，跳过缺少几何或几何无法解析的行。
pub fn collect_sectors(
    table: &CsvTable,
    input: &InputConfig,
    policy: &AltitudePolicy,
) -> Vec<Sector> {
    let Some(geometry_column) = table.geometry_column(&input.geometry_column) else {
        warn!(headers = ?table.headers(), "CSV 中没有几何列，所有行都将被跳过");
        return Vec::new();
    };
    debug!(
        column = %table.headers()[geometry_column],
        "已确定几何列"
    );

    let mut sectors = Vec::new();
    for row in table.rows() {
        let geometry = row.field(geometry_column).filter(|text| !text.is_empty());
        let Some(geometry) = geometry else {
            debug!(row = row.index() + 1, "缺少几何，跳过该行");
            continue;
        };

        let warm = row.get(&input.warm_column);
        let cold = row.get(&input.cold_column);
        if row.index() < TRACED_ROWS {
            let preview: String = geometry.chars().take(GEOMETRY_PREVIEW_CHARS).collect();
            debug!(
                row = row.index() + 1,
                geometry = %preview,
                warm = ?warm,
                cold = ?cold,
                warm_label = ?format_altitude(warm),
                cold_label = ?format_altitude(cold),
                "行解析详情"
            );
        }

        let Some(polygon) = parse_polygon(Some(geometry)) else {
            debug!(row = row.index() + 1, "几何无法解析或有效顶点不足 3 个，跳过该行");
            continue;
        };

        sectors.push(Sector {
            row: row.index() + 1,
            polygon,
            altitudes: policy.resolve_raw(warm, cold),
        });
    }

    info!(
        rows = table.len(),
        sectors = sectors.len(),
        skipped = table.len() - sectors.len(),
        "扇区解析完成"
    );
    sectors
}

/// 按选择生成夏季/冬季图块，顺序固定为夏季在前。
pub fn build_maps(
    sectors: &[Sector],
    output: &OutputConfig,
    selection: MapSelection,
    locator: &CentroidLocator,
) -> Vec<MapBlock> {
    selection
        .seasons()
        .iter()
        .map(|&season| build_map(output.header(season), season, sectors, locator))
        .collect()
}
