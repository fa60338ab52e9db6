pub mod geometry {
    use glam::DVec2;
    use serde::{Deserialize, Serialize};

    /// 坐标轴，决定 DMS 输出时使用的方向字母。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Axis {
        Latitude,
        Longitude,
    }

    impl Axis {
        /// 非负值取 N/E，负值取 S/W。
        #[inline]
        pub fn hemisphere(self, value: f64) -> char {
            match (self, value < 0.0) {
                (Axis::Latitude, false) => 'N',
                (Axis::Latitude, true) => 'S',
                (Axis::Longitude, false) => 'E',
                (Axis::Longitude, true) => 'W',
            }
        }

        /// 由方向字母反查坐标轴与符号。
        pub fn from_hemisphere(letter: char) -> Option<(Self, f64)> {
            match letter {
                'N' => Some((Axis::Latitude, 1.0)),
                'S' => Some((Axis::Latitude, -1.0)),
                'E' => Some((Axis::Longitude, 1.0)),
                'W' => Some((Axis::Longitude, -1.0)),
                _ => None,
            }
        }

        #[inline]
        pub fn limit(self) -> f64 {
            match self {
                Axis::Latitude => 90.0,
                Axis::Longitude => 180.0,
            }
        }
    }

    /// WGS84 顶点。内部以 `glam::DVec2` 存储，`x` 为经度、`y` 为纬度，
    /// 便于直接参与平面运算；对外接口一律按 (纬度, 经度) 的顺序。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Vertex(DVec2);

    impl Vertex {
        #[inline]
        pub fn new(lat: f64, lon: f64) -> Self {
            Self(DVec2::new(lon, lat))
        }

        /// 仅当经纬度都有限且位于合法范围内时构造顶点。
        pub fn checked(lat: f64, lon: f64) -> Option<Self> {
            let valid = lat.is_finite()
                && lon.is_finite()
                && lat.abs() <= Axis::Latitude.limit()
                && lon.abs() <= Axis::Longitude.limit();
            valid.then(|| Self::new(lat, lon))
        }

        #[inline]
        pub fn from_vec(vec: DVec2) -> Self {
            Self(vec)
        }

        #[inline]
        pub fn lat(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn lon(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn as_vec2(self) -> DVec2 {
            self.0
        }

        /// 向 `other` 方向移动一半距离。
        #[inline]
        pub fn midpoint(self, other: Vertex) -> Self {
            Self(self.0.lerp(other.0, 0.5))
        }
    }

    impl From<DVec2> for Vertex {
        fn from(value: DVec2) -> Self {
            Self::from_vec(value)
        }
    }

    /// 至少包含 3 个顶点的简单多边形，隐式闭合（不保存重复的首点）。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Polygon {
        vertices: Vec<Vertex>,
    }

    impl Polygon {
        pub const MIN_VERTICES: usize = 3;

        /// 顶点不足 3 个时返回 `None`。
        pub fn new(vertices: Vec<Vertex>) -> Option<Self> {
            (vertices.len() >= Self::MIN_VERTICES).then_some(Self { vertices })
        }

        #[inline]
        pub fn vertices(&self) -> &[Vertex] {
            &self.vertices
        }

        #[inline]
        pub fn len(&self) -> usize {
            self.vertices.len()
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.vertices.is_empty()
        }

        /// 依次返回每条边，包含末点回到首点的闭合边。
        pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
            let count = self.vertices.len();
            (0..count).map(move |index| (self.vertices[index], self.vertices[(index + 1) % count]))
        }

        /// 顶点的算术平均值。
        pub fn vertex_mean(&self) -> Vertex {
            let sum = self
                .vertices
                .iter()
                .fold(DVec2::ZERO, |acc, vertex| acc + vertex.as_vec2());
            Vertex::from_vec(sum / self.vertices.len() as f64)
        }

        /// 奇偶规则射线法判定点是否在多边形内部。边界上的点结果不确定。
        pub fn ray_cast_contains(&self, point: Vertex) -> bool {
            let p = point.as_vec2();
            let mut inside = false;
            for (start, end) in self.edges() {
                let a = start.as_vec2();
                let b = end.as_vec2();
                if (a.y > p.y) != (b.y > p.y) {
                    let crossing = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                    if p.x < crossing {
                        inside = !inside;
                    }
                }
            }
            inside
        }
    }

}

pub mod dms {
    use std::fmt;

    use crate::geometry::Axis;

    /// Topsky 使用的度分秒坐标，秒以下精度固定输出 `000`。
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Dms {
        pub hemisphere: char,
        pub degrees: u32,
        pub minutes: u32,
        pub seconds: u32,
    }

    impl Dms {
        /// 十进制度转度分秒。秒四舍五入，满 60 向上进位。
        pub fn from_decimal(value: f64, axis: Axis) -> Self {
            let hemisphere = axis.hemisphere(value);
            let value = value.abs();

            let mut degrees = value.floor();
            let decimal_minutes = (value - degrees) * 60.0;
            let mut minutes = decimal_minutes.floor();
            let mut seconds = ((decimal_minutes - minutes) * 60.0).round();

            if seconds >= 60.0 {
                seconds = 0.0;
                minutes += 1.0;
            }
            if minutes >= 60.0 {
                minutes = 0.0;
                degrees += 1.0;
            }

            Self {
                hemisphere,
                degrees: degrees as u32,
                minutes: minutes as u32,
                seconds: seconds as u32,
            }
        }

        /// 解析 `N052.30.00.000` 形式的文本。
        pub fn parse(token: &str) -> Option<(Axis, Self)> {
            let mut chars = token.chars();
            let hemisphere = chars.next()?;
            let (axis, _) = Axis::from_hemisphere(hemisphere)?;

            let mut fields = chars.as_str().split('.');
            let mut next_field = || fields.next()?.parse::<u32>().ok();
            let degrees = next_field()?;
            let minutes = next_field()?;
            let seconds = next_field()?;
            let _millis = next_field()?;
            if fields.next().is_some() || minutes >= 60 || seconds >= 60 {
                return None;
            }

            Some((
                axis,
                Self {
                    hemisphere,
                    degrees,
                    minutes,
                    seconds,
                },
            ))
        }

        pub fn to_decimal(self) -> f64 {
            let sign = Axis::from_hemisphere(self.hemisphere).map_or(1.0, |(_, sign)| sign);
            let magnitude = f64::from(self.degrees)
                + f64::from(self.minutes) / 60.0
                + f64::from(self.seconds) / 3600.0;
            sign * magnitude
        }
    }

    impl fmt::Display for Dms {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "{}{:03}.{:02}.{:02}.000",
                self.hemisphere, self.degrees, self.minutes, self.seconds
            )
        }
    }

    /// 十进制度转 Topsky DMS 文本，例如 `to_dms(52.5, Axis::Latitude) == "N052.30.00.000"`。
    pub fn to_dms(value: f64, axis: Axis) -> String {
        Dms::from_decimal(value, axis).to_string()
    }

    /// `to_dms` 的逆运算，返回坐标轴与十进制度。
    pub fn parse_dms(token: &str) -> Option<(Axis, f64)> {
        Dms::parse(token).map(|(axis, dms)| (axis, dms.to_decimal()))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn formats_reference_values() {
            assert_eq!(to_dms(52.5, Axis::Latitude), "N052.30.00.000");
            assert_eq!(to_dms(-0.5, Axis::Longitude), "W000.30.00.000");
            assert_eq!(to_dms(13.0, Axis::Longitude), "E013.00.00.000");
            assert_eq!(to_dms(-33.25, Axis::Latitude), "S033.15.00.000");
        }

        #[test]
        fn seconds_carry_into_minutes_and_degrees() {
            // 13.1 的二进制表示略小于 13.1，秒会舍入到 60。
            assert_eq!(to_dms(13.1, Axis::Longitude), "E013.06.00.000");
            assert_eq!(to_dms(52.999_999_9, Axis::Latitude), "N053.00.00.000");
        }

        #[test]
        fn zero_is_north_and_east() {
            assert_eq!(to_dms(0.0, Axis::Latitude), "N000.00.00.000");
            assert_eq!(to_dms(0.0, Axis::Longitude), "E000.00.00.000");
        }

        #[test]
        fn longitude_uses_three_degree_digits() {
            assert_eq!(to_dms(179.5, Axis::Longitude), "E179.30.00.000");
            assert_eq!(to_dms(-7.016_666_666, Axis::Longitude), "W007.01.00.000");
        }

        #[test]
        fn parse_dms_reads_back_formatted_tokens() {
            let (axis, value) = parse_dms("S033.15.00.000").expect("valid token");
            assert_eq!(axis, Axis::Latitude);
            assert!((value + 33.25).abs() < 1e-12);
        }

        #[test]
        fn parse_dms_rejects_malformed_tokens() {
            assert!(parse_dms("").is_none());
            assert!(parse_dms("X052.30.00.000").is_none());
            assert!(parse_dms("N052.30.00").is_none());
            assert!(parse_dms("N052.61.00.000").is_none());
            assert!(parse_dms("N052.30.00.000.1").is_none());
        }
    }
}

pub mod altitude {
    use serde::{Deserialize, Serialize};

    /// 扇区下限高度，单位与数据源一致（英尺），恒为正数。
    ///
    /// 显示时按"百英尺"约定输出：整数除以 100，不补零，例如 3500 → `35`。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    pub struct AltitudeValue(u32);

    impl AltitudeValue {
        pub fn new(feet: i64) -> Option<Self> {
            if feet <= 0 {
                return None;
            }
            u32::try_from(feet).ok().map(Self)
        }

        /// 解析原始单元格。空值、非数字、非有限值以及截断后 ≤ 0 的值都视为缺失。
        pub fn parse(raw: Option<&str>) -> Option<Self> {
            let raw = raw?.trim();
            if raw.is_empty() {
                return None;
            }
            let value = raw.parse::<f64>().ok()?;
            if !value.is_finite() {
                return None;
            }
            Self::new(value.trunc() as i64)
        }

        #[inline]
        pub fn feet(self) -> u32 {
            self.0
        }

        /// Topsky 标注文本（百英尺）。
        pub fn label(self) -> String {
            (self.0 / 100).to_string()
        }
    }

    /// 将原始高度文本转换为标注文本；缺失时返回 `None`。
    pub fn format_altitude(raw: Option<&str>) -> Option<String> {
        AltitudeValue::parse(raw).map(AltitudeValue::label)
    }

}

pub mod map {
    use std::fmt;

    use serde::{Deserialize, Serialize};

    use crate::altitude::AltitudeValue;
    use crate::dms::to_dms;
    use crate::geometry::{Axis, Vertex};

    /// 夏季（暖）或冬季（冷）MVA 图。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Season {
        Summer,
        Winter,
    }

    impl Season {
        pub const ALL: [Season; 2] = [Season::Summer, Season::Winter];
    }

    impl fmt::Display for Season {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Season::Summer => f.write_str("summer"),
                Season::Winter => f.write_str("winter"),
            }
        }
    }

    /// 输出哪些图块。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum MapSelection {
        #[default]
        Both,
        Summer,
        Winter,
    }

    impl MapSelection {
        pub fn seasons(self) -> &'static [Season] {
            match self {
                MapSelection::Both => &Season::ALL,
                MapSelection::Summer => &[Season::Summer],
                MapSelection::Winter => &[Season::Winter],
            }
        }
    }

    /// 输出记录：边界线段或高度标注。
    #[derive(Debug, Clone, PartialEq)]
    pub enum MapEntry {
        Line { from: Vertex, to: Vertex },
        Text { at: Vertex, altitude: AltitudeValue },
    }

    impl fmt::Display for MapEntry {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                MapEntry::Line { from, to } => write!(
                    f,
                    "LINE:{}:{}:{}:{}",
                    to_dms(from.lat(), Axis::Latitude),
                    to_dms(from.lon(), Axis::Longitude),
                    to_dms(to.lat(), Axis::Latitude),
                    to_dms(to.lon(), Axis::Longitude)
                ),
                MapEntry::Text { at, altitude } => write!(
                    f,
                    "TEXT:{}:{}:{}",
                    to_dms(at.lat(), Axis::Latitude),
                    to_dms(at.lon(), Axis::Longitude),
                    altitude.label()
                ),
            }
        }
    }

    /// 图块头部字段。
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MapHeader {
        pub name: String,
        pub folder: String,
        pub color: String,
        pub style: String,
    }

    /// 单张 MVA 图：所有线段在前，所有标注在后。
    #[derive(Debug, Clone, PartialEq)]
    pub struct MapBlock {
        pub header: MapHeader,
        lines: Vec<MapEntry>,
        texts: Vec<MapEntry>,
    }

    impl MapBlock {
        pub fn new(header: MapHeader) -> Self {
            Self {
                header,
                lines: Vec::new(),
                texts: Vec::new(),
            }
        }

        pub fn extend_lines(&mut self, lines: impl IntoIterator<Item = MapEntry>) {
            self.lines.extend(lines);
        }

        pub fn push_text(&mut self, at: Vertex, altitude: AltitudeValue) {
            self.texts.push(MapEntry::Text { at, altitude });
        }

        #[inline]
        pub fn line_count(&self) -> usize {
            self.lines.len()
        }

        #[inline]
        pub fn text_count(&self) -> usize {
            self.texts.len()
        }

        pub fn entries(&self) -> impl Iterator<Item = &MapEntry> {
            self.lines.iter().chain(self.texts.iter())
        }
    }

}
