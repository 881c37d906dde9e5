//! Fixed tooth positions on the chart canvas.
//!
//! The table is process-wide constant data: 32 entries, upper arch ids 1→16 followed by lower
//! arch ids 17→32. Chart rendering iterates it in this order, which is what makes the output
//! deterministic.

/// Chart canvas width in user units.
pub const CANVAS_WIDTH: u32 = 800;

/// Chart canvas height in user units.
pub const CANVAS_HEIGHT: u32 = 600;

/// Corner radius of every tooth shape.
pub const TOOTH_CORNER_RADIUS: u32 = 3;

/// Which jaw a tooth belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arch {
    /// Maxillary, ids 1–16.
    Upper,
    /// Mandibular, ids 17–32.
    Lower,
}

/// Position and size of one tooth on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToothGeometry {
    pub id: &'static str,
    pub arch: Arch,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ToothGeometry {
    const fn upper(id: &'static str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            arch: Arch::Upper,
            x,
            y,
            width,
            height,
        }
    }

    const fn lower(id: &'static str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            arch: Arch::Lower,
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal centre, where the tooth number is anchored.
    pub fn label_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Text baseline: vertical centre nudged down so 14px digits sit inside the shape.
    pub fn label_y(&self) -> f64 {
        self.y + self.height / 2.0 + 5.0
    }
}

/// Every tooth, upper arch first.
pub const TOOTH_GEOMETRY: [ToothGeometry; 32] = [
    ToothGeometry::upper("1", 50.0, 80.0, 30.0, 25.0),
    ToothGeometry::upper("2", 90.0, 80.0, 30.0, 25.0),
    ToothGeometry::upper("3", 130.0, 80.0, 30.0, 25.0),
    ToothGeometry::upper("4", 170.0, 70.0, 25.0, 20.0),
    ToothGeometry::upper("5", 200.0, 70.0, 25.0, 20.0),
    ToothGeometry::upper("6", 230.0, 60.0, 20.0, 18.0),
    ToothGeometry::upper("7", 255.0, 50.0, 18.0, 15.0),
    ToothGeometry::upper("8", 275.0, 45.0, 15.0, 12.0),
    ToothGeometry::upper("9", 295.0, 45.0, 15.0, 12.0),
    ToothGeometry::upper("10", 315.0, 50.0, 18.0, 15.0),
    ToothGeometry::upper("11", 340.0, 60.0, 20.0, 18.0),
    ToothGeometry::upper("12", 370.0, 70.0, 25.0, 20.0),
    ToothGeometry::upper("13", 400.0, 70.0, 25.0, 20.0),
    ToothGeometry::upper("14", 440.0, 80.0, 30.0, 25.0),
    ToothGeometry::upper("15", 480.0, 80.0, 30.0, 25.0),
    ToothGeometry::upper("16", 520.0, 80.0, 30.0, 25.0),
    ToothGeometry::lower("17", 50.0, 400.0, 30.0, 25.0),
    ToothGeometry::lower("18", 90.0, 400.0, 30.0, 25.0),
    ToothGeometry::lower("19", 130.0, 400.0, 30.0, 25.0),
    ToothGeometry::lower("20", 170.0, 410.0, 25.0, 20.0),
    ToothGeometry::lower("21", 200.0, 410.0, 25.0, 20.0),
    ToothGeometry::lower("22", 230.0, 420.0, 20.0, 18.0),
    ToothGeometry::lower("23", 255.0, 430.0, 18.0, 15.0),
    ToothGeometry::lower("24", 275.0, 435.0, 15.0, 12.0),
    ToothGeometry::lower("25", 295.0, 435.0, 15.0, 12.0),
    ToothGeometry::lower("26", 315.0, 430.0, 18.0, 15.0),
    ToothGeometry::lower("27", 340.0, 420.0, 20.0, 18.0),
    ToothGeometry::lower("28", 370.0, 410.0, 25.0, 20.0),
    ToothGeometry::lower("29", 400.0, 410.0, 25.0, 20.0),
    ToothGeometry::lower("30", 440.0, 400.0, 30.0, 25.0),
    ToothGeometry::lower("31", 480.0, 400.0, 30.0, 25.0),
    ToothGeometry::lower("32", 520.0, 400.0, 30.0, 25.0),
];
