pub mod centroid;
pub mod geometry;

pub mod errors {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum EngineError {
        #[error("geometry backend `{0}` is not compiled in")]
        BackendUnavailable(&'static str),
    }
}

pub mod sector {
    use mva_core::altitude::AltitudeValue;
    use mva_core::geometry::Polygon;
    use mva_core::map::Season;

    /// 每张图使用的高度，已经过回退策略处理。
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SeasonAltitudes {
        pub summer: AltitudeValue,
        pub winter: AltitudeValue,
    }

    impl SeasonAltitudes {
        #[inline]
        pub fn for_season(self, season: Season) -> AltitudeValue {
            match season {
                Season::Summer => self.summer,
                Season::Winter => self.winter,
            }
        }
    }

    /// 暖/冷高度互为回退，两者都缺失时使用固定默认值。
    #[derive(Debug, Clone, Copy)]
    pub struct AltitudePolicy {
        default: AltitudeValue,
    }

    impl AltitudePolicy {
        pub fn new(default: AltitudeValue) -> Self {
            Self { default }
        }

        pub fn resolve(
            &self,
            warm: Option<AltitudeValue>,
            cold: Option<AltitudeValue>,
        ) -> SeasonAltitudes {
            match (warm, cold) {
                (Some(summer), Some(winter)) => SeasonAltitudes { summer, winter },
                (Some(value), None) | (None, Some(value)) => SeasonAltitudes {
                    summer: value,
                    winter: value,
                },
                (None, None) => SeasonAltitudes {
                    summer: self.default,
                    winter: self.default,
                },
            }
        }

        /// 直接处理原始单元格文本。
        pub fn resolve_raw(&self, warm: Option<&str>, cold: Option<&str>) -> SeasonAltitudes {
            self.resolve(AltitudeValue::parse(warm), AltitudeValue::parse(cold))
        }
    }

    /// 一行输入对应的 MVA 扇区。
    #[derive(Debug, Clone)]
    pub struct Sector {
        pub row: usize,
        pub polygon: Polygon,
        pub altitudes: SeasonAltitudes,
    }

}

pub mod entries {
    use mva_core::geometry::Polygon;
    use mva_core::map::{MapBlock, MapEntry, MapHeader, Season};
    use tracing::{debug, info};

    use crate::centroid::{CentroidLocator, LabelAnchor};
    use crate::sector::Sector;

    /// 每个多边形输出与顶点数相同的线段，包含闭合边。
    pub fn generate_line_entries<'a>(
        polygons: impl IntoIterator<Item = &'a Polygon>,
    ) -> Vec<MapEntry> {
        polygons
            .into_iter()
            .flat_map(|polygon| polygon.edges())
            .map(|(from, to)| MapEntry::Line { from, to })
            .collect()
    }

    /// 每个扇区输出一条高度标注。
    pub fn generate_text_entries(
        sectors: &[Sector],
        season: Season,
        locator: &CentroidLocator,
    ) -> Vec<MapEntry> {
        sectors
            .iter()
            .map(|sector| {
                let anchor = locator.locate(&sector.polygon);
                if !matches!(anchor, LabelAnchor::Centroid(_)) {
                    debug!(
                        row = sector.row,
                        method = anchor.method(),
                        backend = locator.backend_name(),
                        "质心不可直接使用，已改用回退位置"
                    );
                }
                MapEntry::Text {
                    at: anchor.point(),
                    altitude: sector.altitudes.for_season(season),
                }
            })
            .collect()
    }

    /// 组装一张完整的图：所有边界线段在前，所有标注在后。
    pub fn build_map(
        header: MapHeader,
        season: Season,
        sectors: &[Sector],
        locator: &CentroidLocator,
    ) -> MapBlock {
        let mut block = MapBlock::new(header);
        block.extend_lines(generate_line_entries(
            sectors.iter().map(|sector| &sector.polygon),
        ));
        for entry in generate_text_entries(sectors, season, locator) {
            if let MapEntry::Text { at, altitude } = entry {
                block.push_text(at, altitude);
            }
        }
        info!(
            map = %block.header.name,
            %season,
            lines = block.line_count(),
            texts = block.text_count(),
            "MVA 图生成完成"
        );
        block
    }

}
