use std::ops::Index;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::{Rgba, palette};

/// The closed set of body categories in the galaxy
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// The central black hole. Exactly one per galaxy, never respawned.
    CentralAttractor = 0,
    Star = 1,
    GasClump = 2,
    DustCloud = 3,
    /// Invisible mass that shapes the rotation curve
    DarkMatter = 4,
}

impl BodyKind {
    /// Kinds produced by the spawn generator, in store order
    pub const SPAWNABLE: [BodyKind; 4] = [
        BodyKind::Star,
        BodyKind::GasClump,
        BodyKind::DustCloud,
        BodyKind::DarkMatter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CentralAttractor => "Central Attractor",
            Self::Star => "Star",
            Self::GasClump => "Gas Clump",
            Self::DustCloud => "Dust Cloud",
            Self::DarkMatter => "Dark Matter",
        }
    }
}

/// One simulated point mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub kind: BodyKind,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Always > 0
    pub mass: f32,
    /// Render-only attributes, rewritten together with the physical state on respawn
    pub color: Rgba,
    pub radius: f32,
}

impl Body {
    pub fn new(kind: BodyKind, position: Vec3, velocity: Vec3, mass: f32) -> Self {
        Self {
            kind,
            position,
            velocity,
            mass,
            color: palette::WHITE,
            radius: 1.0,
        }
    }

    /// The black hole at rest at the origin
    pub fn attractor(mass: f32, radius: f32) -> Self {
        Self {
            kind: BodyKind::CentralAttractor,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            mass,
            color: palette::BLACK,
            radius,
        }
    }

    pub fn with_appearance(mut self, color: Rgba, radius: f32) -> Self {
        self.color = color;
        self.radius = radius;
        self
    }

    pub fn distance_from_origin(&self) -> f32 {
        self.position.length()
    }
}

/// Fixed-size, stably ordered collection of bodies.
///
/// Slots can be overwritten in place but never added or removed, so index `i`
/// names the same logical body for the whole run. The force pass partitions
/// work by these indices.
#[derive(Debug, Clone, Default)]
pub struct BodyStore {
    bodies: Vec<Body>,
}

impl BodyStore {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access to the slots. The slice cannot change the population size.
    pub fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn count(&self, kind: BodyKind) -> usize {
        self.bodies.iter().filter(|b| b.kind == kind).count()
    }

    /// Index of the central attractor, if the store has one
    pub fn attractor_index(&self) -> Option<usize> {
        self.bodies
            .iter()
            .position(|b| b.kind == BodyKind::CentralAttractor)
    }
}

impl Index<usize> for BodyStore {
    type Output = Body;

    fn index(&self, index: usize) -> &Body {
        &self.bodies[index]
    }
}

impl<'a> IntoIterator for &'a BodyStore {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}

/// Per-frame render record, Pod so the renderer can upload a snapshot as bytes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RenderBody {
    /// Position (x, y, z) + mass packed in w
    pub position: [f32; 4],
    /// Velocity (x, y, z) + visual radius packed in w
    pub velocity: [f32; 4],
    /// `BodyKind` discriminant
    pub kind: u32,
    pub color: Rgba,
    /// Padding for 16-byte alignment
    pub _pad: [u32; 2],
}

impl From<&Body> for RenderBody {
    fn from(body: &Body) -> Self {
        let p = body.position;
        let v = body.velocity;
        Self {
            position: [p.x, p.y, p.z, body.mass],
            velocity: [v.x, v.y, v.z, body.radius],
            kind: body.kind as u32,
            color: body.color,
            _pad: [0; 2],
        }
    }
}

impl RenderBody {
    pub fn mass(&self) -> f32 {
        self.position[3]
    }

    pub fn radius(&self) -> f32 {
        self.velocity[3]
    }

    pub fn pos(&self) -> [f32; 3] {
        [self.position[0], self.position[1], self.position[2]]
    }
}
