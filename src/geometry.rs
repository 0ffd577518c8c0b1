/// Signed rectangle in compositor pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Frame for a drop-down window inside a monitor work area.
///
/// Width and height are percentages of the work area, rounded to whole pixels.
/// The frame is centered horizontally and pinned to the work area's top edge,
/// so a hidden window can slide in by translating down from `-height`.
pub fn top_slide_frame(area: Rect, width_percent: i32, height_percent: i32) -> Rect {
    let width = (width_percent as f64 * area.width as f64 / 100.0).round() as i32;
    let height = (height_percent as f64 * area.height as f64 / 100.0).round() as i32;
    let x = ((area.width - width) as f64 / 2.0).round() as i32 + area.x;
    let y = area.y;
    Rect {
        x,
        y,
        width,
        height,
    }
}
