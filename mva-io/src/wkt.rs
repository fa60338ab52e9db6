//! 宽松的 WKT 多边形提取。

use once_cell::sync::Lazy;
use regex::Regex;

use mva_core::geometry::{Polygon, Vertex};

static POLYGON_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)POLYGON\s*\(\((.*?)\)\)").expect("POLYGON 正则表达式应当合法")
});

static BARE_BODY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\(\((.*?)\)\)").expect("双括号正则表达式应当合法"));

/// 从 `POLYGON((lon lat, ...))` 形式的文本提取 (纬度, 经度) 顶点序列。
///
/// 找不到 `POLYGON` 包装时退回到任意双括号内容。无法解析或越界的坐标对会被丢弃，
/// 与首点重复的闭合点会被去掉；剩余顶点不足 3 个时返回空序列。
pub fn parse_geometry(text: Option<&str>) -> Vec<Vertex> {
    let Some(text) = text else {
        return Vec::new();
    };

    let body = POLYGON_BODY
        .captures(text)
        .or_else(|| BARE_BODY.captures(text))
        .and_then(|captures| captures.get(1));
    let Some(body) = body else {
        return Vec::new();
    };

    let mut vertices: Vec<Vertex> = body.as_str().split(',').filter_map(parse_pair).collect();
    // WKT 环以首点收尾，内部表示隐式闭合。
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    if vertices.len() < Polygon::MIN_VERTICES {
        return Vec::new();
    }
    vertices
}

/// `parse_geometry` 的多边形版本。
pub fn parse_polygon(text: Option<&str>) -> Option<Polygon> {
    Polygon::new(parse_geometry(text))
}

fn parse_pair(token: &str) -> Option<Vertex> {
    // 嵌套括号会把 `(` / `)` 留在首尾坐标上。
    let token = token.trim_matches(|ch: char| ch == '(' || ch == ')' || ch.is_whitespace());
    let mut numbers = token.split_whitespace();
    let lon = numbers.next()?.parse::<f64>().ok()?;
    let lat = numbers.next()?.parse::<f64>().ok()?;
    Vertex::checked(lat, lon)
}
