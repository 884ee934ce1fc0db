//! Perspective view of the robot and its eight joint oscillators.
//!
//! Geometry is built in world units with nalgebra (y up, x forward) and
//! projected through an [`OrbitCamera`] onto an egui painter. Faces are drawn
//! back to front; traces and guides are drawn on top.

use std::f64::consts::FRAC_PI_2;

use egui::{Color32, Pos2, Rect, Sense, Shape, Stroke, Vec2};
use nalgebra::{Point3, Rotation3, Vector3};

use crate::config::SceneConfig;
use crate::core::phase::wrap_0_tau;
use crate::core::trace::Trace;
use crate::gait::joint::JointKind;
use crate::gait::{GaitFrame, GaitOscillators, GaitSide, LegId};

const NEAR: f64 = 0.1;
const BACKGROUND: Color32 = Color32::from_rgb(0xaa, 0xaa, 0xaa);
const BODY_COLOR: Color32 = Color32::from_rgb(0xf5, 0x9e, 0x0b);
const GROUND_COLOR: Color32 = Color32::from_rgb(0x5f, 0xa5, 0xfa);
const ARROW_COLOR: Color32 = Color32::from_rgb(0x44, 0x38, 0xca);
const WAVE_COLOR: Color32 = Color32::from_rgb(0x00, 0x00, 0xff);
const ZERO_COLOR: Color32 = Color32::from_rgb(0x00, 0xaa, 0xaa);
const LIMIT_COLOR: Color32 = Color32::from_rgb(0xaa, 0x00, 0x00);
const GROUND_Y: f64 = -5.0;
const GROUND_HALF: f64 = 25.0;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Point3<f64>,
    pub yaw: f64,
    pub pitch: f64,
    pub distance: f64,
    pub fov_y: f64,
}

impl OrbitCamera {
    pub fn from_config(cfg: &SceneConfig) -> Self {
        Self {
            target: Point3::origin(),
            yaw: cfg.camera_yaw,
            pitch: cfg.camera_pitch,
            distance: cfg.camera_distance,
            fov_y: 40f64.to_radians(),
        }
    }

    pub fn eye(&self) -> Point3<f64> {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        self.target + Vector3::new(cp * cy, sp, cp * sy) * self.distance
    }

    /// Drag in screen points.
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw = wrap_0_tau(self.yaw + delta.x as f64 * 0.01);
        self.pitch = (self.pitch + delta.y as f64 * 0.01).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * (-scroll as f64 * 0.002).exp()).clamp(10.0, 400.0);
    }

    fn basis(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        let forward = (self.target - self.eye()).normalize();
        let right = forward.cross(&Vector3::y()).normalize();
        let up = right.cross(&forward);
        (forward, right, up)
    }

    /// Screen position and view depth of `p`, `None` behind the near plane.
    pub fn project(&self, p: &Point3<f64>, rect: Rect) -> Option<(Pos2, f64)> {
        let (forward, right, up) = self.basis();
        let d = p - self.eye();
        let depth = d.dot(&forward);
        if depth < NEAR {
            return None;
        }
        let focal = rect.height() as f64 * 0.5 / (self.fov_y * 0.5).tan();
        let c = rect.center();
        Some((
            Pos2::new(
                c.x + (d.dot(&right) * focal / depth) as f32,
                c.y - (d.dot(&up) * focal / depth) as f32,
            ),
            depth,
        ))
    }
}

/// Box primitive: `rotation * (center + half ⊙ corner)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    pub center: Point3<f64>,
    pub half: Vector3<f64>,
    pub rotation: Rotation3<f64>,
    pub color: Color32,
}

impl Cuboid {
    fn world(&self, local: Vector3<f64>) -> Point3<f64> {
        self.rotation * (self.center + self.half.component_mul(&local))
    }

    /// Outward normal and the four corners of each face.
    fn faces(&self) -> impl Iterator<Item = (Vector3<f64>, [Point3<f64>; 4])> + '_ {
        (0..3).flat_map(move |axis| {
            [-1.0, 1.0].into_iter().map(move |sign| {
                let mut n = Vector3::zeros();
                n[axis] = sign;
                let mut b = Vector3::zeros();
                b[(axis + 1) % 3] = 1.0;
                let mut c = Vector3::zeros();
                c[(axis + 2) % 3] = 1.0;
                let corners = [n - b - c, n + b - c, n + b + c, n - b + c].map(|v| self.world(v));
                (self.rotation * n, corners)
            })
        })
    }
}

/// Robot body, braces and legs for one gait frame.
pub fn robot_boxes(frame: &GaitFrame) -> Vec<Cuboid> {
    let mut boxes = vec![Cuboid {
        center: Point3::origin(),
        half: Vector3::new(5.0, 2.0, 5.0),
        rotation: Rotation3::identity(),
        color: BODY_COLOR,
    }];
    for id in LegId::ALL {
        let leg = frame.leg(id);
        let mount = id.mount();
        let signs = id.signs();
        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), leg.brace_rotation());
        boxes.push(Cuboid {
            center: Point3::new(mount.x, 0.0, mount.y),
            half: Vector3::new(2.0, 3.0, 2.0),
            rotation,
            color: BODY_COLOR,
        });
        let leg_center = Vector3::new(mount.x + 4.5 * signs.x, 0.0, mount.y + 4.5 * signs.y);
        boxes.push(Cuboid {
            center: Point3::from(leg_center + leg.pivot()),
            half: Vector3::new(2.0, 4.0, 2.0),
            rotation,
            color: BODY_COLOR,
        });
    }
    boxes
}

/// Where a joint's 3D oscilloscope floats next to the robot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceAnchor {
    pub position: Point3<f64>,
    pub rotation: Rotation3<f64>,
    pub limits: (f64, f64),
    pub gate: Option<GaitSide>,
}

pub fn trace_anchor(id: LegId, kind: JointKind) -> TraceAnchor {
    let s = id.signs();
    let (rot_x, position) = match kind {
        JointKind::Brace => (0.0, Point3::new(4.5 * s.x, 0.0, 4.5 * s.y)),
        JointKind::Leg => {
            // Right-side legs hang their scope at z = 7.5, left-side ones at -14.5.
            let z = if s.y > 0.0 { 7.5 } else { -14.5 };
            (FRAC_PI_2, Point3::new(14.5 * s.x, 0.0, z))
        }
    };
    let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), rot_x)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
    TraceAnchor {
        position,
        rotation,
        limits: kind.limits(),
        gate: match kind {
            JointKind::Brace => None,
            JointKind::Leg => Some(GaitSide::of_leg(id)),
        },
    }
}

#[derive(Debug, Clone)]
pub struct Scene3d {
    pub camera: OrbitCamera,
    points: usize,
    z_offset: f64,
    x_scale: f64,
    y_scale: f64,
}

impl Scene3d {
    pub fn new(cfg: &SceneConfig) -> Self {
        Self {
            camera: OrbitCamera::from_config(cfg),
            points: cfg.trace_points,
            z_offset: cfg.trace_z_offset,
            x_scale: cfg.trace_x_scale,
            y_scale: cfg.trace_y_scale,
        }
    }

    fn local(&self, x: f64, value: f64) -> Vector3<f64> {
        Vector3::new(x, self.z_offset, value * self.y_scale)
    }

    pub fn show(&mut self, ui: &mut egui::Ui, frame: &GaitFrame, oscillators: &GaitOscillators) {
        let size = Vec2::new(ui.available_width(), ui.available_width().min(520.0) * 0.6);
        let (response, painter) = ui.allocate_painter(size, Sense::drag());
        if response.dragged() {
            self.camera.orbit(response.drag_delta());
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom(scroll);
            }
        }

        let rect = response.rect;
        painter.rect_filled(rect, 0.0, BACKGROUND);
        let cam = &self.camera;
        let project = |p: &Point3<f64>| cam.project(p, rect).map(|(pos, _)| pos);

        let ground: Vec<Pos2> = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
            .iter()
            .filter_map(|(x, z)| project(&Point3::new(x * GROUND_HALF, GROUND_Y, z * GROUND_HALF)))
            .collect();
        if ground.len() == 4 {
            painter.add(Shape::convex_polygon(ground, GROUND_COLOR, Stroke::NONE));
        }

        let eye = cam.eye();
        let light = Vector3::new(50.0, 50.0, 50.0).normalize();
        let mut faces: Vec<(f64, Vec<Pos2>, Color32)> = Vec::new();
        for cuboid in robot_boxes(frame) {
            for (normal, corners) in cuboid.faces() {
                let centroid = Point3::from(
                    corners.iter().map(|p| p.coords).sum::<Vector3<f64>>() / 4.0,
                );
                if normal.dot(&(centroid - eye)) >= 0.0 {
                    continue;
                }
                let pts: Vec<Pos2> = corners.iter().filter_map(|p| project(p)).collect();
                if pts.len() != 4 {
                    continue;
                }
                let shade = (0.55 + 0.45 * normal.dot(&light).max(0.0)) as f32;
                let c = cuboid.color;
                let color = Color32::from_rgb(
                    (c.r() as f32 * shade) as u8,
                    (c.g() as f32 * shade) as u8,
                    (c.b() as f32 * shade) as u8,
                );
                faces.push(((centroid - eye).norm(), pts, color));
            }
        }
        faces.sort_by(|a, b| b.0.total_cmp(&a.0));
        for (_, pts, color) in faces {
            painter.add(Shape::convex_polygon(pts, color, Stroke::new(0.5, Color32::from_black_alpha(60))));
        }

        let arrow_base = Point3::new(10.0, 0.0, 0.0);
        let arrow_tip = Point3::new(20.0, 0.0, 0.0);
        if let (Some(a), Some(b)) = (project(&arrow_base), project(&arrow_tip)) {
            painter.arrow(a, b - a, Stroke::new(2.0, ARROW_COLOR));
        }

        for id in LegId::ALL {
            let osc = oscillators.get(id);
            for (kind, osc) in [(JointKind::Brace, &osc.brace), (JointKind::Leg, &osc.leg)] {
                let anchor = trace_anchor(id, kind);
                let to_world = |v: Vector3<f64>| anchor.position + anchor.rotation * v;
                let length = self.points as f64 * self.x_scale;
                let guide = |value: f64| -> Option<[Pos2; 2]> {
                    Some([
                        project(&to_world(self.local(0.0, value)))?,
                        project(&to_world(self.local(length, value)))?,
                    ])
                };

                if let Some(seg) = guide(0.0) {
                    painter.line_segment(seg, Stroke::new(1.0, ZERO_COLOR));
                }
                for limit in [anchor.limits.0, anchor.limits.1] {
                    if let Some(seg) = guide(limit) {
                        painter.line_segment(seg, Stroke::new(1.0, LIMIT_COLOR));
                    }
                }

                let trace = Trace::sample(osc, frame.t, self.points, anchor.gate.map(GaitSide::gate));
                let wave: Vec<Pos2> = trace
                    .scaled_points(self.x_scale, 1.0)
                    .filter_map(|[x, v]| project(&to_world(self.local(x, v))))
                    .collect();
                painter.add(Shape::line(wave, Stroke::new(1.0, WAVE_COLOR)));

                let head = trace.head.unwrap_or(0.0);
                let marker = to_world(self.local(0.0, head));
                if let Some((pos, depth)) = cam.project(&marker, rect) {
                    let focal = rect.height() as f64 * 0.5 / (cam.fov_y * 0.5).tan();
                    let radius = (self.y_scale * 0.05 * focal / depth) as f32;
                    painter.circle_filled(pos, radius.max(1.5), WAVE_COLOR);
                }
            }
        }
    }
}
