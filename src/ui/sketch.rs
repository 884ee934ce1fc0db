//! Flat diagrams of the body with rotating braces and the lifting foot.
//!
//! Shapes are laid out on a fixed virtual canvas and stretched to the
//! allocated rect; rotations happen in screen space around the stretched pivot.

use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, Vec2};

const BODY_FILL: Color32 = Color32::from_rgb(0xf5, 0x9e, 0x0b);
const BODY_STROKE: Color32 = Color32::from_rgb(120, 53, 15);
const BRACE_GRAY: Color32 = Color32::GRAY;
const PAIR_GREEN: Color32 = Color32::from_rgb(16, 185, 129);
const PAIR_BLUE: Color32 = Color32::from_rgb(59, 130, 246);

/// Maps a fixed virtual drawing size onto a screen rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualCanvas {
    pub rect: Rect,
    pub width: f32,
    pub height: f32,
}

impl VirtualCanvas {
    pub fn new(rect: Rect, width: f32, height: f32) -> Self {
        Self {
            rect,
            width,
            height,
        }
    }

    pub fn pos(&self, x: f32, y: f32) -> Pos2 {
        Pos2::new(
            self.rect.min.x + x * self.rect.width() / self.width,
            self.rect.min.y + y * self.rect.height() / self.height,
        )
    }

    pub fn rect(&self, x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_max(self.pos(x, y), self.pos(x + w, y + h))
    }

    /// Corners of a virtual rect rotated by `angle` (clockwise on screen) around `pivot`.
    pub fn rotated_rect(&self, x: f32, y: f32, w: f32, h: f32, pivot: (f32, f32), angle: f64) -> Vec<Pos2> {
        let p = self.pos(pivot.0, pivot.1);
        let (s, c) = (angle as f32).sin_cos();
        [(x, y), (x + w, y), (x + w, y + h), (x, y + h)]
            .iter()
            .map(|&(vx, vy)| {
                let d = self.pos(vx, vy) - p;
                p + Vec2::new(c * d.x - s * d.y, s * d.x + c * d.y)
            })
            .collect()
    }
}

fn fill_quad(painter: &Painter, pts: Vec<Pos2>, color: Color32) {
    painter.add(Shape::convex_polygon(pts, color, Stroke::NONE));
}

fn body(painter: &Painter, canvas: &VirtualCanvas, x: f32, y: f32, w: f32, h: f32) {
    painter.rect_filled(canvas.rect(x + 1.0, y + 1.0, w - 2.0, h - 2.0), 0.0, BODY_FILL);
    painter.rect_stroke(
        canvas.rect(x, y, w, h),
        0.0,
        Stroke::new(1.0, BODY_STROKE),
        StrokeKind::Middle,
    );
}

/// Virtual size of the single brace diagram.
pub const SINGLE_BRACE_SIZE: Vec2 = Vec2::new(354.0, 144.0);
/// Virtual size of both diagrams in the foot and brace panel.
pub const FOOT_PANEL_SIZE: Vec2 = Vec2::new(350.0, 160.0);

/// The two brace plates of a side view, rotated by `angle` around the body corner.
pub fn brace_quads(canvas: &VirtualCanvas, angle: f64) -> [Vec<Pos2>; 2] {
    let pivot = (120.0, 80.0);
    [
        canvas.rotated_rect(95.0, 50.0, 60.0, 60.0, pivot, angle),
        canvas.rotated_rect(120.0, 65.0, 65.0, 30.0, pivot, angle),
    ]
}

/// Side view of one body corner with its brace swung by `angle`, laid out on
/// a virtual canvas of `size`.
pub fn single_brace(painter: &Painter, rect: Rect, size: Vec2, angle: f64) {
    let canvas = VirtualCanvas::new(rect, size.x, size.y);
    painter.rect_filled(rect, 0.0, Color32::WHITE);
    body(painter, &canvas, 0.0, 0.0, 120.0, 80.0);
    for quad in brace_quads(&canvas, angle) {
        fill_quad(painter, quad, BRACE_GRAY);
    }
}

/// Brace angles for the four corner diagram.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FourBraceAngles {
    pub front_left: f64,
    pub front_right: f64,
    pub back_left: f64,
    pub back_right: f64,
}

/// Top view of the body with all four braces; the two diagonals are colored apart.
pub fn four_braces(painter: &Painter, rect: Rect, angles: FourBraceAngles) {
    let canvas = VirtualCanvas::new(rect, 288.0, 144.0);
    painter.rect_filled(rect, 0.0, Color32::WHITE);
    painter.rect_filled(canvas.rect(40.0, 40.0, 108.0, 68.0), 0.0, BODY_FILL);
    painter.rect_stroke(
        canvas.rect(39.0, 39.0, 110.0, 70.0),
        0.0,
        Stroke::new(1.0, BODY_STROKE),
        StrokeKind::Middle,
    );

    // Right-hand corners swing with the oscillator, left-hand ones mirrored.
    let right_brace = |pivot: (f32, f32), angle: f64, color: Color32| {
        let (px, py) = pivot;
        fill_quad(painter, canvas.rotated_rect(px - 15.0, py - 15.0, 30.0, 30.0, pivot, angle), color);
        fill_quad(painter, canvas.rotated_rect(px - 5.0, py - 7.5, 35.0, 15.0, pivot, angle), color);
    };
    let left_brace = |pivot: (f32, f32), angle: f64, color: Color32| {
        let (px, py) = pivot;
        fill_quad(painter, canvas.rotated_rect(px - 15.0, py - 15.0, 30.0, 30.0, pivot, -angle), color);
        fill_quad(painter, canvas.rotated_rect(px - 30.0, py - 7.5, 35.0, 15.0, pivot, -angle), color);
    };

    right_brace((150.0, 110.0), angles.back_right, PAIR_GREEN);
    left_brace((40.0, 40.0), angles.front_left, PAIR_GREEN);
    right_brace((150.0, 40.0), angles.front_right, PAIR_BLUE);
    left_brace((40.0, 110.0), angles.back_left, PAIR_BLUE);
}

/// Side view of brace and foot; the foot is raised by `lift` virtual units.
pub fn foot_and_brace(painter: &Painter, rect: Rect, lift: Option<f64>) {
    let canvas = VirtualCanvas::new(rect, FOOT_PANEL_SIZE.x, FOOT_PANEL_SIZE.y);
    painter.rect_filled(rect, 0.0, Color32::WHITE);
    body(painter, &canvas, 0.0, 30.0, 120.0, 40.0);
    painter.rect_filled(canvas.rect(100.0, 20.0, 50.0, 10.0), 0.0, BRACE_GRAY);
    painter.rect_filled(canvas.rect(130.0, 20.0, 30.0, 60.0), 0.0, BRACE_GRAY);
    painter.rect_filled(canvas.rect(100.0, 70.0, 50.0, 10.0), 0.0, BRACE_GRAY);
    if let Some(lift) = lift {
        painter.rect_filled(canvas.rect(180.0, 30.0 - lift as f32, 30.0, 80.0), 0.0, Color32::RED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> VirtualCanvas {
        VirtualCanvas::new(
            Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(200.0, 100.0)),
            100.0,
            50.0,
        )
    }

    #[test]
    fn virtual_coordinates_scale_into_rect() {
        let c = canvas();
        assert_eq!(c.pos(0.0, 0.0), Pos2::new(10.0, 20.0));
        assert_eq!(c.pos(100.0, 50.0), Pos2::new(210.0, 120.0));
        assert_eq!(c.rect(10.0, 10.0, 5.0, 5.0).size(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn zero_rotation_keeps_corners() {
        let c = canvas();
        let pts = c.rotated_rect(10.0, 10.0, 20.0, 10.0, (10.0, 10.0), 0.0);
        assert_eq!(pts[0], c.pos(10.0, 10.0));
        assert_eq!(pts[2], c.pos(30.0, 20.0));
    }

    #[test]
    fn quarter_turn_swings_clockwise_on_screen() {
        let c = canvas();
        let pts = c.rotated_rect(0.0, 0.0, 10.0, 0.0, (0.0, 0.0), std::f64::consts::FRAC_PI_2);
        let pivot = c.pos(0.0, 0.0);
        // (20, 0) on screen becomes (0, 20): pointing down.
        assert!((pts[1].x - pivot.x).abs() < 1e-4);
        assert!((pts[1].y - (pivot.y + 20.0)).abs() < 1e-4);
    }

    #[test]
    fn brace_plates_keep_their_layout_at_native_size() {
        let rect = Rect::from_min_size(Pos2::new(5.0, 5.0), FOOT_PANEL_SIZE);
        let native = VirtualCanvas::new(rect, FOOT_PANEL_SIZE.x, FOOT_PANEL_SIZE.y);
        let [_, arm] = brace_quads(&native, 0.0);
        assert_eq!(arm[0], Pos2::new(125.0, 70.0));
        assert_eq!(arm[2], Pos2::new(190.0, 100.0));

        // The single brace layout squeezed into the same rect lands elsewhere.
        let squeezed = VirtualCanvas::new(rect, SINGLE_BRACE_SIZE.x, SINGLE_BRACE_SIZE.y);
        let [_, arm] = brace_quads(&squeezed, 0.0);
        assert!((arm[0].y - 70.0).abs() > 1.0);
    }
}
