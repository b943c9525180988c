//! Part catalog of both assembly revisions.
//!
//! A part is visible exactly when the current step has reached its threshold
//! step. Visibility is always derived from the step, never stored.

use glam::Vec3;
use shared::{AssemblyRevision, AssemblyStep, PartId, PhoneModel};

use crate::animation::{Ease, Entrance, Pose, Tween};

/// Geometry of a single piece, centred on its offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Flat rectangle in the XY plane
    Plane { width: f32, height: f32 },
    /// Box with its thin side along Z
    Slab { width: f32, height: f32, depth: f32 },
}

/// How a piece's faces are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Solid,
    /// Procedural monocrystalline cell texture
    SolarCells,
    /// Procedural circuit board texture
    CircuitBoard,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [u8; 3],
    pub opacity: f32,
    pub surface: Surface,
}

impl Material {
    pub const fn solid(color: [u8; 3]) -> Self {
        Self {
            color,
            opacity: 1.0,
            surface: Surface::Solid,
        }
    }

    pub const fn translucent(color: [u8; 3], opacity: f32) -> Self {
        Self {
            color,
            opacity,
            surface: Surface::Solid,
        }
    }

    pub const fn textured(surface: Surface) -> Self {
        Self {
            color: [255, 255, 255],
            opacity: 1.0,
            surface,
        }
    }
}

/// One drawable element of a part, placed relative to the part origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    pub shape: Shape,
    pub offset: Vec3,
    pub material: Material,
}

impl Piece {
    fn new(shape: Shape, offset: [f32; 3], material: Material) -> Self {
        Self {
            shape,
            offset: Vec3::from(offset),
            material,
        }
    }
}

/// A part of the assembly together with its threshold and motion
#[derive(Debug, Clone, PartialEq)]
pub struct PartSpec {
    pub id: PartId,
    /// First step at which the part is shown
    pub threshold: AssemblyStep,
    pub pieces: Vec<Piece>,
    /// Pose while not visible; the entrance starts here unless it overrides it
    pub hidden: Pose,
    pub entrance: Entrance,
}

/// Direction of a threshold crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Appeared,
    Disappeared,
}

/// A part whose visibility flipped between two steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartEdge {
    pub part: PartId,
    pub kind: EdgeKind,
}

const CLASSIC_THRESHOLDS: [(PartId, AssemblyStep); 5] = [
    (PartId::PhoneBody, AssemblyStep::Chassis),
    (PartId::SolarModule, AssemblyStep::SolarModule),
    (PartId::Pcb, AssemblyStep::Pcb),
    (PartId::SlidingCover, AssemblyStep::Slider),
    (PartId::ThermalInsert, AssemblyStep::ThermalInsert),
];

const HYBRID_THRESHOLDS: [(PartId, AssemblyStep); 6] = [
    (PartId::PhoneCase, AssemblyStep::Case),
    (PartId::SolarModule, AssemblyStep::SolarModule),
    (PartId::Battery, AssemblyStep::Battery),
    (PartId::Pcb, AssemblyStep::Pcb),
    (PartId::ThermalInsert, AssemblyStep::ThermalInsert),
    (PartId::Phone, AssemblyStep::Phone),
];

/// Parts of a revision with their threshold step, in draw order
pub fn thresholds(revision: AssemblyRevision) -> &'static [(PartId, AssemblyStep)] {
    match revision {
        AssemblyRevision::Classic => &CLASSIC_THRESHOLDS,
        AssemblyRevision::Hybrid => &HYBRID_THRESHOLDS,
    }
}

/// `ordinal >= threshold`, the single visibility rule
pub fn is_visible(revision: AssemblyRevision, threshold: AssemblyStep, ordinal: usize) -> bool {
    revision
        .ordinal(threshold)
        .is_some_and(|t| ordinal >= t)
}

/// Visibility of every part of the revision at `ordinal`
pub fn visibility(revision: AssemblyRevision, ordinal: usize) -> Vec<(PartId, bool)> {
    thresholds(revision)
        .iter()
        .map(|(id, threshold)| (*id, is_visible(revision, *threshold, ordinal)))
        .collect()
}

/// Parts whose visibility differs between `from` and `to`
pub fn threshold_edges(revision: AssemblyRevision, from: usize, to: usize) -> Vec<PartEdge> {
    thresholds(revision)
        .iter()
        .filter_map(|(id, threshold)| {
            let before = is_visible(revision, *threshold, from);
            let after = is_visible(revision, *threshold, to);
            match (before, after) {
                (false, true) => Some(PartEdge {
                    part: *id,
                    kind: EdgeKind::Appeared,
                }),
                (true, false) => Some(PartEdge {
                    part: *id,
                    kind: EdgeKind::Disappeared,
                }),
                _ => None,
            }
        })
        .collect()
}

/// Full part list of a revision for the given phone model
pub fn catalog(revision: AssemblyRevision, model: PhoneModel) -> Vec<PartSpec> {
    match revision {
        AssemblyRevision::Classic => classic_catalog(model),
        AssemblyRevision::Hybrid => hybrid_catalog(model),
    }
}

// ── Classic (v1.0): parts stacked on the phone body ─────────────

fn classic_catalog(model: PhoneModel) -> Vec<PartSpec> {
    vec![
        PartSpec {
            id: PartId::PhoneBody,
            threshold: AssemblyStep::Chassis,
            pieces: device_pieces(model),
            hidden: Pose::default(),
            entrance: Entrance::instant(Pose::default()),
        },
        PartSpec {
            id: PartId::SolarModule,
            threshold: AssemblyStep::SolarModule,
            pieces: vec![Piece::new(
                Shape::Plane { width: 2.8, height: 5.5 },
                [0.0, 0.0, 0.0],
                Material::textured(Surface::SolarCells),
            )],
            hidden: Pose::at(0.0, 0.0, -5.0).with_opacity(0.0),
            entrance: Entrance::moving_to(Pose::at(0.0, 0.0, 0.22), Tween::new(1.5, Ease::Power3Out))
                .fading(Tween::new(1.0, Ease::Power1Out)),
        },
        PartSpec {
            id: PartId::Pcb,
            threshold: AssemblyStep::Pcb,
            pieces: vec![circuit_board()],
            hidden: Pose::at(0.0, -10.0, 0.0),
            entrance: Entrance::moving_to(
                Pose::at(0.0, -2.5, 0.23),
                Tween::new(1.5, Ease::BackOut(1.7)).delayed(0.2),
            )
            .starting_from(Pose::at(0.0, -10.0, 0.0).with_rotation_x(std::f32::consts::PI))
            .rotating(Tween::new(1.0, Ease::Power1Out)),
        },
        PartSpec {
            id: PartId::SlidingCover,
            threshold: AssemblyStep::Slider,
            pieces: vec![Piece::new(
                Shape::Slab { width: 3.1, height: 6.4, depth: 0.05 },
                [0.0, 0.0, 0.0],
                Material::solid([0xea, 0x58, 0x0c]),
            )],
            hidden: Pose::at(10.0, 0.0, 0.0),
            entrance: Entrance::moving_to(Pose::at(0.0, 0.0, 0.28), Tween::new(1.2, Ease::Power2InOut)),
        },
        PartSpec {
            id: PartId::ThermalInsert,
            threshold: AssemblyStep::ThermalInsert,
            pieces: vec![Piece::new(
                Shape::Plane { width: 3.0, height: 6.3 },
                [0.0, 0.0, 0.0],
                Material::translucent([0xff, 0xff, 0xff], 0.3),
            )],
            hidden: Pose::at(0.0, 10.0, -0.22).with_scale(Vec3::new(0.0, 0.0, 1.0)),
            entrance: Entrance::moving_to(Pose::at(0.0, 0.0, -0.22), Tween::new(2.0, Ease::ExpoOut))
                .scaling(Tween::new(1.0, Ease::Power1Out)),
        },
    ]
}

// ── Hybrid (v2.2): parts inside a translucent case, phone last ──

fn hybrid_catalog(model: PhoneModel) -> Vec<PartSpec> {
    vec![
        PartSpec {
            id: PartId::PhoneCase,
            threshold: AssemblyStep::Case,
            pieces: case_pieces(model),
            hidden: Pose::default(),
            entrance: Entrance::instant(Pose::default()),
        },
        PartSpec {
            id: PartId::SolarModule,
            threshold: AssemblyStep::SolarModule,
            pieces: vec![Piece::new(
                Shape::Plane { width: 2.8, height: 4.4 },
                [0.0, 0.0, 0.0],
                Material::textured(Surface::SolarCells),
            )],
            hidden: Pose::at(0.0, -10.0, -5.0).with_opacity(0.0),
            entrance: Entrance::moving_to(Pose::at(0.0, -0.9, 0.23), Tween::new(1.5, Ease::Power3Out))
                .fading(Tween::new(1.0, Ease::Power1Out)),
        },
        PartSpec {
            id: PartId::Battery,
            threshold: AssemblyStep::Battery,
            pieces: vec![
                Piece::new(
                    Shape::Slab { width: 2.4, height: 3.8, depth: 0.08 },
                    [0.0, 0.0, 0.0],
                    Material::solid([0xe5, 0xe7, 0xeb]),
                ),
                // Connector tab
                Piece::new(
                    Shape::Slab { width: 0.5, height: 0.2, depth: 0.01 },
                    [0.0, 2.0, 0.0],
                    Material::solid([0xfb, 0xbf, 0x24]),
                ),
            ],
            hidden: Pose::at(0.0, 10.0, 0.05),
            entrance: Entrance::moving_to(Pose::at(0.0, -0.5, 0.05), Tween::new(1.5, Ease::Power3Out)),
        },
        PartSpec {
            id: PartId::Pcb,
            threshold: AssemblyStep::Pcb,
            pieces: vec![circuit_board()],
            hidden: Pose::at(0.0, -10.0, 0.0),
            entrance: Entrance::moving_to(Pose::at(0.0, -2.6, 0.06), Tween::new(1.5, Ease::BackOut(1.7)))
                .starting_from(Pose::at(0.0, -10.0, 0.0).with_rotation_x(std::f32::consts::PI))
                .rotating(Tween::new(1.0, Ease::Power1Out)),
        },
        PartSpec {
            id: PartId::ThermalInsert,
            threshold: AssemblyStep::ThermalInsert,
            pieces: vec![Piece::new(
                Shape::Plane { width: 2.9, height: 6.2 },
                [0.0, 0.0, 0.0],
                // Kapton amber
                Material::translucent([0xf5, 0x9e, 0x0b], 0.5),
            )],
            hidden: Pose::at(0.0, 10.0, 0.12).with_scale(Vec3::new(0.0, 0.0, 1.0)),
            entrance: Entrance::moving_to(Pose::at(0.0, 0.0, 0.12), Tween::new(2.0, Ease::ExpoOut))
                .scaling(Tween::new(1.0, Ease::Power1Out)),
        },
        PartSpec {
            id: PartId::Phone,
            threshold: AssemblyStep::Phone,
            pieces: device_pieces(model),
            hidden: Pose::at(0.0, 10.0, -5.0),
            entrance: Entrance::moving_to(Pose::at(0.0, 0.0, -0.1), Tween::new(1.5, Ease::Power3Out))
                .starting_from(Pose::at(0.0, 10.0, -2.0)),
        },
    ]
}

// ── Shared geometry ─────────────────────────────────────────────

fn circuit_board() -> Piece {
    Piece::new(
        Shape::Plane { width: 2.5, height: 1.0 },
        [0.0, 0.0, 0.0],
        Material::textured(Surface::CircuitBoard),
    )
}

/// Phone body, back glass and camera bump
fn device_pieces(model: PhoneModel) -> Vec<Piece> {
    match model {
        PhoneModel::IPhone12 => {
            let frame = Material::solid([0x2d, 0x2d, 0x30]);
            vec![
                Piece::new(Shape::Slab { width: 3.2, height: 6.5, depth: 0.35 }, [0.0, 0.0, 0.0], frame),
                Piece::new(
                    Shape::Plane { width: 2.9, height: 6.2 },
                    [0.0, 0.0, 0.18],
                    Material::solid([0x1c, 0x1c, 0x1e]),
                ),
                Piece::new(Shape::Slab { width: 1.1, height: 1.2, depth: 0.05 }, [0.95, 2.4, 0.19], frame),
            ]
        }
        PhoneModel::GalaxyS22 => {
            let frame = Material::solid([0x20, 0x20, 0x20]);
            vec![
                Piece::new(Shape::Slab { width: 3.1, height: 6.4, depth: 0.34 }, [0.0, 0.0, 0.0], frame),
                Piece::new(
                    Shape::Plane { width: 2.9, height: 6.2 },
                    [0.0, 0.0, 0.175],
                    Material::solid([0x10, 0x10, 0x10]),
                ),
                // Vertical camera strip
                Piece::new(Shape::Slab { width: 0.9, height: 2.0, depth: 0.04 }, [0.95, 2.2, 0.18], frame),
            ]
        }
    }
}

/// Frosted shell, bumper rim and camera cut-out border
fn case_pieces(model: PhoneModel) -> Vec<Piece> {
    let shell = Material::translucent([0xff, 0xff, 0xff], 0.45);
    let bumper = Material::solid([0xe5, 0xe7, 0xeb]);
    let (w, h, half_w, half_h) = match model {
        PhoneModel::IPhone12 => (3.4, 6.7, 1.6, 3.25),
        PhoneModel::GalaxyS22 => (3.3, 6.6, 1.55, 3.2),
    };
    let camera_border = match model {
        PhoneModel::IPhone12 => Piece::new(Shape::Slab { width: 1.3, height: 1.4, depth: 0.05 }, [1.05, 2.5, 0.18], bumper),
        PhoneModel::GalaxyS22 => Piece::new(Shape::Slab { width: 1.1, height: 2.2, depth: 0.05 }, [1.0, 2.3, 0.18], bumper),
    };
    vec![
        Piece::new(Shape::Slab { width: w, height: h, depth: 0.15 }, [0.0, 0.0, 0.15], shell),
        Piece::new(Shape::Slab { width: w, height: 0.2, depth: 0.5 }, [0.0, half_h, -0.1], bumper),
        Piece::new(Shape::Slab { width: w, height: 0.2, depth: 0.5 }, [0.0, -half_h, -0.1], bumper),
        Piece::new(Shape::Slab { width: 0.2, height: h, depth: 0.5 }, [-half_w, 0.0, -0.1], bumper),
        Piece::new(Shape::Slab { width: 0.2, height: h, depth: 0.5 }, [half_w, 0.0, -0.1], bumper),
        camera_border,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_thresholds() {
        for revision in AssemblyRevision::all() {
            for model in PhoneModel::all() {
                let parts = catalog(*revision, *model);
                let ids: Vec<_> = parts.iter().map(|p| (p.id, p.threshold)).collect();
                assert_eq!(ids, thresholds(*revision).to_vec());
            }
        }
    }

    #[test]
    fn test_every_threshold_belongs_to_revision() {
        for revision in AssemblyRevision::all() {
            for (_, step) in thresholds(*revision) {
                assert!(revision.ordinal(*step).is_some(), "{step:?} not in {revision:?}");
            }
        }
    }

    #[test]
    fn test_base_part_always_visible() {
        assert!(is_visible(AssemblyRevision::Classic, AssemblyStep::Chassis, 0));
        assert!(is_visible(AssemblyRevision::Hybrid, AssemblyStep::Case, 0));
        assert!(!is_visible(AssemblyRevision::Hybrid, AssemblyStep::Phone, 4));
        assert!(is_visible(AssemblyRevision::Hybrid, AssemblyStep::Phone, 5));
    }

    #[test]
    fn test_step_outside_revision_never_visible() {
        assert!(!is_visible(AssemblyRevision::Classic, AssemblyStep::Battery, 4));
    }

    #[test]
    fn test_edges_forward_and_back() {
        let r = AssemblyRevision::Classic;
        assert_eq!(
            threshold_edges(r, 0, 1),
            vec![PartEdge { part: PartId::SolarModule, kind: EdgeKind::Appeared }]
        );
        assert!(threshold_edges(r, 4, 4).is_empty());

        let back = threshold_edges(r, 4, 0);
        assert_eq!(back.len(), 4);
        assert!(back.iter().all(|e| e.kind == EdgeKind::Disappeared));
        assert!(!back.iter().any(|e| e.part == PartId::PhoneBody));
    }

    #[test]
    fn test_device_geometry_follows_model() {
        let iphone = catalog(AssemblyRevision::Classic, PhoneModel::IPhone12);
        let galaxy = catalog(AssemblyRevision::Classic, PhoneModel::GalaxyS22);
        assert_ne!(iphone[0].pieces, galaxy[0].pieces);
        // Non-device parts are model independent
        assert_eq!(iphone[1..], galaxy[1..]);
    }
}
