//! 多边形几何能力。标注定位算法只依赖 `PolygonGeometry`，
//! 具体实现在启动时选定后注入。

use mva_core::geometry::{Polygon, Vertex};

use crate::errors::EngineError;

pub trait PolygonGeometry: Send + Sync {
    fn name(&self) -> &'static str;

    /// 面积加权质心。零面积多边形或后端不具备该能力时返回 `None`。
    fn area_centroid(&self, polygon: &Polygon) -> Option<Vertex>;

    /// 点是否严格位于多边形内部。
    fn contains(&self, polygon: &Polygon, point: Vertex) -> bool;

    /// 保证位于多边形内部的代表点。
    fn interior_point(&self, polygon: &Polygon) -> Option<Vertex>;
}

/// 仅做算术平均的后备实现：不提供面积质心与内部点，定位时总是退回顶点均值。
#[derive(Debug, Default, Clone, Copy)]
pub struct MeanBackend;

impl PolygonGeometry for MeanBackend {
    fn name(&self) -> &'static str {
        "mean"
    }

    fn area_centroid(&self, _polygon: &Polygon) -> Option<Vertex> {
        None
    }

    fn contains(&self, polygon: &Polygon, point: Vertex) -> bool {
        polygon.ray_cast_contains(point)
    }

    fn interior_point(&self, _polygon: &Polygon) -> Option<Vertex> {
        None
    }
}

#[cfg(feature = "geo")]
pub use geo_backend::GeoBackend;

#[cfg(feature = "geo")]
mod geo_backend {
    use geo::{Area, Centroid, Contains, InteriorPoint, LineString, Point};
    use mva_core::geometry::{Polygon, Vertex};

    use super::PolygonGeometry;

    /// 基于 `geo` crate 的完整计算几何实现。`geo` 坐标以 x = 经度、y = 纬度表示。
    #[derive(Debug, Default, Clone, Copy)]
    pub struct GeoBackend;

    impl GeoBackend {
        fn to_geo(polygon: &Polygon) -> geo::Polygon<f64> {
            let ring: Vec<(f64, f64)> = polygon
                .vertices()
                .iter()
                .map(|vertex| (vertex.lon(), vertex.lat()))
                .collect();
            geo::Polygon::new(LineString::from(ring), Vec::new())
        }

        fn to_vertex(point: Point<f64>) -> Vertex {
            Vertex::new(point.y(), point.x())
        }
    }

    impl PolygonGeometry for GeoBackend {
        fn name(&self) -> &'static str {
            "geo"
        }

        fn area_centroid(&self, polygon: &Polygon) -> Option<Vertex> {
            let shape = Self::to_geo(polygon);
            let area = shape.unsigned_area();
            if !area.is_finite() || area <= f64::EPSILON {
                return None;
            }
            shape.centroid().map(Self::to_vertex)
        }

        fn contains(&self, polygon: &Polygon, point: Vertex) -> bool {
            Self::to_geo(polygon).contains(&Point::new(point.lon(), point.lat()))
        }

        fn interior_point(&self, polygon: &Polygon) -> Option<Vertex> {
            Self::to_geo(polygon).interior_point().map(Self::to_vertex)
        }
    }
}

/// 启动时解析的完整几何后端。未启用 `geo` 特性时返回错误，由调用方决定是否退回 `MeanBackend`。
pub fn full_backend() -> Result<Box<dyn PolygonGeometry>, EngineError> {
    #[cfg(feature = "geo")]
    {
        Ok(Box::new(GeoBackend))
    }
    #[cfg(not(feature = "geo"))]
    {
        Err(EngineError::BackendUnavailable("geo"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(0.0, 1.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(1.0, 0.0),
        ])
        .expect("four vertices")
    }

    #[test]
    fn mean_backend_has_no_area_capabilities() {
        let polygon = unit_square();
        assert!(MeanBackend.area_centroid(&polygon).is_none());
        assert!(MeanBackend.interior_point(&polygon).is_none());
        assert!(MeanBackend.contains(&polygon, Vertex::new(0.5, 0.5)));
        assert!(!MeanBackend.contains(&polygon, Vertex::new(1.5, 0.5)));
    }

    #[cfg(feature = "geo")]
    #[test]
    fn geo_backend_computes_area_centroid() {
        let centroid = GeoBackend
            .area_centroid(&unit_square())
            .expect("square has area");
        assert!((centroid.lat() - 0.5).abs() < 1e-9);
        assert!((centroid.lon() - 0.5).abs() < 1e-9);
    }

    #[cfg(feature = "geo")]
    #[test]
    fn geo_backend_rejects_zero_area() {
        let sliver = Polygon::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(2.0, 2.0),
        ])
        .expect("three vertices");
        assert!(GeoBackend.area_centroid(&sliver).is_none());
    }

    #[cfg(feature = "geo")]
    #[test]
    fn geo_backend_boundary_is_not_contained() {
        let polygon = unit_square();
        assert!(GeoBackend.contains(&polygon, Vertex::new(0.5, 0.5)));
        assert!(!GeoBackend.contains(&polygon, Vertex::new(0.0, 0.5)));
    }

    #[cfg(feature = "geo")]
    #[test]
    fn full_backend_is_geo_when_enabled() {
        let backend = full_backend().expect("geo feature enabled");
        assert_eq!(backend.name(), "geo");
    }
}
