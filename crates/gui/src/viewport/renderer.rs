//! Painter rendering of the assembly
//!
//! Every piece is broken into shaded quads which are sorted back to front and
//! painted as egui meshes. Translucent parts blend over whatever was painted
//! before them.

use egui::epaint::{Mesh, Vertex};
use egui::{Color32, Pos2, Rect, Stroke, TextureId};
use glam::{Mat4, Vec3};

use super::camera::ArcBallCamera;
use crate::animation::Pose;
use crate::parts::{Material, PartSpec, Shape, Surface};

/// Height of the floor under the assembly
pub const FLOOR_Y: f32 = -4.0;

const GRID_STEP: f32 = 1.0;
const GRID_RANGE: i32 = 8;

/// Texture ids for the procedural surfaces
#[derive(Debug, Clone, Copy)]
pub struct SurfaceTextures {
    pub solar: TextureId,
    pub pcb: TextureId,
}

impl SurfaceTextures {
    fn get(&self, surface: Surface) -> Option<TextureId> {
        match surface {
            Surface::Solid => None,
            Surface::SolarCells => Some(self.solar),
            Surface::CircuitBoard => Some(self.pcb),
        }
    }
}

/// A world-space quad ready to be painted
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub corners: [Vec3; 4],
    pub uvs: [Pos2; 4],
    pub normal: Vec3,
    pub color: [u8; 3],
    pub opacity: f32,
    pub surface: Surface,
    /// Double sided faces are never culled
    pub double_sided: bool,
}

impl Face {
    fn center(&self) -> Vec3 {
        (self.corners[0] + self.corners[1] + self.corners[2] + self.corners[3]) * 0.25
    }
}

/// Transform shared by every part: the assembly faces away from the default
/// camera, with an optional slow sway
pub fn group_transform(time: f64, sway: bool) -> Mat4 {
    let wobble = if sway { (time as f32 * 0.3).sin() * 0.1 } else { 0.0 };
    Mat4::from_rotation_y(std::f32::consts::PI + wobble)
}

fn pose_transform(pose: &Pose) -> Mat4 {
    Mat4::from_translation(pose.position)
        * Mat4::from_rotation_x(pose.rotation_x)
        * Mat4::from_scale(pose.scale)
}

const FULL_UV: [Pos2; 4] = [
    Pos2::new(0.0, 1.0),
    Pos2::new(1.0, 1.0),
    Pos2::new(1.0, 0.0),
    Pos2::new(0.0, 0.0),
];

/// Quads of a piece in its local frame
fn local_faces(shape: Shape, material: Material) -> Vec<([Vec3; 4], Vec3, Surface, bool)> {
    match shape {
        Shape::Plane { width, height } => {
            let (w, h) = (width * 0.5, height * 0.5);
            vec![(
                [
                    Vec3::new(-w, -h, 0.0),
                    Vec3::new(w, -h, 0.0),
                    Vec3::new(w, h, 0.0),
                    Vec3::new(-w, h, 0.0),
                ],
                Vec3::Z,
                material.surface,
                true,
            )]
        }
        Shape::Slab { width, height, depth } => {
            let (w, h, d) = (width * 0.5, height * 0.5, depth * 0.5);
            let c = |x: f32, y: f32, z: f32| Vec3::new(x * w, y * h, z * d);
            // Texture only on the front face
            let front = material.surface;
            let side = Surface::Solid;
            vec![
                ([c(-1., -1., 1.), c(1., -1., 1.), c(1., 1., 1.), c(-1., 1., 1.)], Vec3::Z, front, false),
                ([c(1., -1., -1.), c(-1., -1., -1.), c(-1., 1., -1.), c(1., 1., -1.)], Vec3::NEG_Z, side, false),
                ([c(1., -1., 1.), c(1., -1., -1.), c(1., 1., -1.), c(1., 1., 1.)], Vec3::X, side, false),
                ([c(-1., -1., -1.), c(-1., -1., 1.), c(-1., 1., 1.), c(-1., 1., -1.)], Vec3::NEG_X, side, false),
                ([c(-1., 1., 1.), c(1., 1., 1.), c(1., 1., -1.), c(-1., 1., -1.)], Vec3::Y, side, false),
                ([c(-1., -1., -1.), c(1., -1., -1.), c(1., -1., 1.), c(-1., -1., 1.)], Vec3::NEG_Y, side, false),
            ]
        }
    }
}

/// World-space faces of a posed part
pub fn part_faces(part: &PartSpec, pose: &Pose, group: Mat4) -> Vec<Face> {
    if pose.opacity <= 0.0 {
        return Vec::new();
    }
    let part_matrix = group * pose_transform(pose);
    let mut faces = Vec::new();
    for piece in &part.pieces {
        let matrix = part_matrix * Mat4::from_translation(piece.offset);
        for (corners, normal, surface, double_sided) in local_faces(piece.shape, piece.material) {
            // Sides of textured slabs fall back to a dark edge colour
            let color = if surface == Surface::Solid && piece.material.surface != Surface::Solid {
                [0x1f, 0x29, 0x37]
            } else {
                piece.material.color
            };
            faces.push(Face {
                corners: corners.map(|p| matrix.transform_point3(p)),
                uvs: FULL_UV,
                normal: matrix.transform_vector3(normal).normalize_or_zero(),
                color,
                opacity: piece.material.opacity * pose.opacity,
                surface,
                double_sided,
            });
        }
    }
    faces
}

/// Drop faces turned away from the eye and order the rest back to front
pub fn sort_faces(mut faces: Vec<Face>, eye: Vec3) -> Vec<Face> {
    faces.retain(|face| face.double_sided || face.normal.dot(eye - face.center()) > 0.0);
    faces.sort_by(|a, b| {
        let da = a.center().distance_squared(eye);
        let db = b.center().distance_squared(eye);
        db.total_cmp(&da)
    });
    faces
}

/// Lambert term against the key light, with ambient floor
pub fn shade(normal: Vec3, eye_side: Vec3) -> f32 {
    let light = Vec3::new(10.0, 10.0, 5.0).normalize();
    // Double sided faces are lit from whichever side is visible
    let n = if normal.dot(eye_side) < 0.0 { -normal } else { normal };
    0.45 + 0.55 * n.dot(light).max(0.0)
}

/// Paint background, floor and every visible part
#[allow(clippy::too_many_arguments)]
pub fn paint_viewport(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    background: [u8; 3],
    show_grid: bool,
    parts: &[(&PartSpec, Pose)],
    group: Mat4,
    textures: &SurfaceTextures,
) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(background[0], background[1], background[2]));

    if show_grid {
        draw_grid(painter, rect, camera);
    }
    draw_contact_shadow(painter, rect, camera);

    let eye = camera.eye_position();
    let faces: Vec<Face> = parts
        .iter()
        .flat_map(|(part, pose)| part_faces(part, pose, group))
        .collect();

    for face in sort_faces(faces, eye) {
        paint_face(painter, rect, camera, &face, eye, textures);
    }
}

fn paint_face(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    face: &Face,
    eye: Vec3,
    textures: &SurfaceTextures,
) {
    let mut screen = [Pos2::ZERO; 4];
    for (out, corner) in screen.iter_mut().zip(face.corners) {
        match camera.project(corner, rect) {
            Some(p) => *out = p,
            None => return,
        }
    }

    let light = shade(face.normal, eye - face.center());
    let alpha = (face.opacity.clamp(0.0, 1.0) * 255.0) as u8;
    let tint = |c: u8| (c as f32 * light).min(255.0) as u8;
    let color = Color32::from_rgba_unmultiplied(tint(face.color[0]), tint(face.color[1]), tint(face.color[2]), alpha);

    let texture = textures.get(face.surface);
    let mut mesh = texture.map_or_else(Mesh::default, Mesh::with_texture);
    for (pos, uv) in screen.iter().zip(face.uvs) {
        let uv = if texture.is_some() { uv } else { egui::epaint::WHITE_UV };
        mesh.vertices.push(Vertex { pos: *pos, uv, color });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));

    if face.opacity >= 1.0 {
        let edge = Color32::from_rgba_unmultiplied(0, 0, 0, 40);
        painter.add(egui::Shape::closed_line(screen.to_vec(), Stroke::new(0.5, edge)));
    }
}

fn draw_grid(painter: &egui::Painter, rect: Rect, camera: &ArcBallCamera) {
    let stroke = Stroke::new(0.5, Color32::from_rgba_unmultiplied(120, 120, 130, 90));
    let extent = GRID_RANGE as f32 * GRID_STEP;

    for i in -GRID_RANGE..=GRID_RANGE {
        let f = i as f32 * GRID_STEP;
        for (a, b) in [
            (Vec3::new(f, FLOOR_Y, -extent), Vec3::new(f, FLOOR_Y, extent)),
            (Vec3::new(-extent, FLOOR_Y, f), Vec3::new(extent, FLOOR_Y, f)),
        ] {
            if let (Some(a), Some(b)) = (camera.project(a, rect), camera.project(b, rect)) {
                if rect.contains(a) || rect.contains(b) {
                    painter.line_segment([a, b], stroke);
                }
            }
        }
    }
}

/// Soft dark ellipse on the floor under the assembly
fn draw_contact_shadow(painter: &egui::Painter, rect: Rect, camera: &ArcBallCamera) {
    const RINGS: usize = 6;
    const SEGMENTS: usize = 32;
    for ring in 0..RINGS {
        let k = 1.0 - ring as f32 / RINGS as f32;
        let (rx, rz) = (2.2 * k + 0.4, 1.4 * k + 0.3);
        let points: Option<Vec<Pos2>> = (0..SEGMENTS)
            .map(|i| {
                let a = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
                camera.project(Vec3::new(a.cos() * rx, FLOOR_Y, a.sin() * rz), rect)
            })
            .collect();
        if let Some(points) = points {
            painter.add(egui::Shape::convex_polygon(
                points,
                Color32::from_rgba_unmultiplied(0, 0, 0, 14),
                Stroke::NONE,
            ));
        }
    }
}
