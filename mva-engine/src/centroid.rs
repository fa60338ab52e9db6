//! 标注定位：为（可能是凹的）多边形找到一个位于内部的点。

use mva_core::geometry::{Polygon, Vertex};

use crate::geometry::PolygonGeometry;

/// 质心落在多边形外时，向内部锚点二分逼近的最大次数。
pub const MAX_BISECTION_STEPS: u32 = 10;

/// 定位结果，同时记录得到该点的途径。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelAnchor {
    /// 面积加权质心本身位于内部。
    Centroid(Vertex),
    /// 质心在外部，第 `step` 次二分后的候选点位于内部。
    Bisected { point: Vertex, step: u32 },
    /// 二分全部失败，使用内部锚点。
    InteriorAnchor(Vertex),
    /// 零面积或后端不支持面积运算，使用顶点算术均值。
    VertexMean(Vertex),
}

impl LabelAnchor {
    #[inline]
    pub fn point(self) -> Vertex {
        match self {
            LabelAnchor::Centroid(point)
            | LabelAnchor::Bisected { point, .. }
            | LabelAnchor::InteriorAnchor(point)
            | LabelAnchor::VertexMean(point) => point,
        }
    }

    pub fn method(self) -> &'static str {
        match self {
            LabelAnchor::Centroid(_) => "centroid",
            LabelAnchor::Bisected { .. } => "bisected",
            LabelAnchor::InteriorAnchor(_) => "interior_anchor",
            LabelAnchor::VertexMean(_) => "vertex_mean",
        }
    }
}

/// 依赖注入的标注定位器。
pub struct CentroidLocator {
    geometry: Box<dyn PolygonGeometry>,
}

impl CentroidLocator {
    pub fn new(geometry: Box<dyn PolygonGeometry>) -> Self {
        Self { geometry }
    }

    #[inline]
    pub fn backend_name(&self) -> &'static str {
        self.geometry.name()
    }

    pub fn locate(&self, polygon: &Polygon) -> LabelAnchor {
        locate_in_polygon(polygon, self.geometry.as_ref())
    }
}

/// 顶点不足 3 个时返回 `None`，否则总能给出一个点。
pub fn locate_centroid(vertices: &[Vertex], geometry: &dyn PolygonGeometry) -> Option<LabelAnchor> {
    let polygon = Polygon::new(vertices.to_vec())?;
    Some(locate_in_polygon(&polygon, geometry))
}

pub fn locate_in_polygon(polygon: &Polygon, geometry: &dyn PolygonGeometry) -> LabelAnchor {
    let Some(centroid) = geometry.area_centroid(polygon) else {
        return LabelAnchor::VertexMean(polygon.vertex_mean());
    };
    if geometry.contains(polygon, centroid) {
        return LabelAnchor::Centroid(centroid);
    }

    let Some(anchor) = geometry.interior_point(polygon) else {
        return LabelAnchor::VertexMean(polygon.vertex_mean());
    };

    let mut candidate = centroid;
    for step in 1..=MAX_BISECTION_STEPS {
        candidate = candidate.midpoint(anchor);
        if geometry.contains(polygon, candidate) {
            return LabelAnchor::Bisected {
                point: candidate,
                step,
            };
        }
    }
    LabelAnchor::InteriorAnchor(anchor)
}
