/*
 * HAVERSINE BENCH - POINT & RECORD MODEL
 * =================================================================
 * Component Name: engine/src/models/point.rs
 * Core Responsibility: تعريف النقطة وزوج النقاط (السجل) المتبادل بين المولد والماسح.
 * Design Pattern: Plain Value Objects
 * =================================================================
 */

use std::fmt;

/// نقطة ثنائية الأبعاد (x = خط الطول تقريباً، y = خط العرض تقريباً)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// السجل: زوج نقاط بأربعة حقول مسماة {x0, y0, x1, y1}
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointPair {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PointPair {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn from_points(p0: Point, p1: Point) -> Self {
        Self { x0: p0.x, y0: p0.y, x1: p1.x, y1: p1.y }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x1, self.y1)
    }
}

/// التمثيل النصي على السلك: `{"x0":..,"y0":..,"x1":..,"y1":..}` بدقة 16 خانة عشرية ثابتة
impl fmt::Display for PointPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"x0\":{:.16},\"y0\":{:.16},\"x1\":{:.16},\"y1\":{:.16}}}",
            self.x0, self.y0, self.x1, self.y1
        )
    }
}
