use glam::{EulerRot, Mat4, Vec3};

use crate::math::{wrap_angle, Rgb};
use crate::params::ParamRecord;
use crate::traits::GeometryId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Flat color, ignores lights
    Basic,
    Standard { metalness: f32, roughness: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub wireframe: bool,
    pub shading: Shading,
}

impl Material {
    pub fn basic_wireframe(color: Rgb) -> Self {
        Self {
            color,
            wireframe: true,
            shading: Shading::Basic,
        }
    }

    pub fn standard(color: Rgb, metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            wireframe: false,
            shading: Shading::Standard { metalness, roughness },
        }
    }

    /// Copy of `self` with the `color` and `wireframe` fields of `record` applied
    pub fn with_record(mut self, record: &ParamRecord) -> Self {
        if let Ok(color) = record.color("color") {
            self.color = color;
        }
        if let Ok(wireframe) = record.flag("wireframe") {
            self.wireframe = wireframe;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient { color: Rgb, intensity: f32 },
    Directional { color: Rgb, intensity: f32, direction: Vec3 },
}

impl Light {
    pub fn ambient(color: Rgb, intensity: f32) -> Self {
        Light::Ambient { color, intensity }
    }

    /// Light shining from `position` towards the origin
    pub fn directional(color: Rgb, intensity: f32, position: Vec3) -> Self {
        Light::Directional {
            color,
            intensity,
            direction: position.normalize_or_zero(),
        }
    }
}

/// Rotation of a mesh about X and Y, each kept in [0, 2π)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
}

impl Orientation {
    pub fn advance(&mut self, step: f32) {
        self.x = wrap_angle(self.x + step);
        self.y = wrap_angle(self.y + step);
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.x, self.y, 0.0)
    }
}

/// One displayed mesh: a geometry handle plus how to draw it
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMesh {
    pub geometry: GeometryId,
    pub material: Material,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

/// Display list of a viewport
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub lights: Vec<Light>,
    slots: Vec<Option<SceneMesh>>,
}

impl Scene {
    pub fn new(lights: Vec<Light>) -> Self {
        Self {
            lights,
            slots: Vec::new(),
        }
    }

    pub fn insert(&mut self, mesh: SceneMesh) -> SlotId {
        self.slots.push(Some(mesh));
        SlotId(self.slots.len() - 1)
    }

    pub fn get(&self, slot: SlotId) -> Option<&SceneMesh> {
        self.slots.get(slot.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut SceneMesh> {
        self.slots.get_mut(slot.0).and_then(Option::as_mut)
    }

    /// Points `slot` at `geometry` and hands back the handle it displaced
    pub fn swap_geometry(&mut self, slot: SlotId, geometry: GeometryId) -> Option<GeometryId> {
        self.get_mut(slot)
            .map(|mesh| std::mem::replace(&mut mesh.geometry, geometry))
    }

    pub fn remove(&mut self, slot: SlotId) -> Option<SceneMesh> {
        self.slots.get_mut(slot.0).and_then(Option::take)
    }

    pub fn meshes(&self) -> impl Iterator<Item = &SceneMesh> {
        self.slots.iter().flatten()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes().count()
    }

    /// Recolors the ambient lights from an `ambientColor` field, if present
    pub fn apply_lighting(&mut self, record: &ParamRecord) {
        let Ok(ambient) = record.color("ambientColor") else {
            return;
        };
        for light in &mut self.lights {
            if let Light::Ambient { color, .. } = light {
                *color = ambient;
            }
        }
    }

    /// Sums ambient light as linear RGB
    pub fn ambient_term(&self) -> Vec3 {
        self.lights
            .iter()
            .map(|light| match light {
                Light::Ambient { color, intensity } => Vec3::from_array(color.to_linear(*intensity)),
                Light::Directional { .. } => Vec3::ZERO,
            })
            .sum()
    }

    /// First directional light, if any
    pub fn key_light(&self) -> Option<(Vec3, Vec3)> {
        self.lights.iter().find_map(|light| match light {
            Light::Directional { color, intensity, direction } => Some((*direction, Vec3::from_array(color.to_linear(*intensity)))),
            Light::Ambient { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Affects, FieldDescriptor};

    fn mesh(id: u64) -> SceneMesh {
        SceneMesh {
            geometry: GeometryId(id),
            material: Material::basic_wireframe(Rgb::GREEN),
            orientation: Orientation::default(),
        }
    }

    #[test]
    fn swap_returns_displaced_geometry() {
        let mut scene = Scene::default();
        let slot = scene.insert(mesh(1));
        assert_eq!(scene.swap_geometry(slot, GeometryId(2)), Some(GeometryId(1)));
        assert_eq!(scene.get(slot).unwrap().geometry, GeometryId(2));
        assert_eq!(scene.mesh_count(), 1);
    }

    #[test]
    fn removed_slot_stays_empty() {
        let mut scene = Scene::default();
        let slot = scene.insert(mesh(1));
        assert!(scene.remove(slot).is_some());
        assert!(scene.remove(slot).is_none());
        assert_eq!(scene.swap_geometry(slot, GeometryId(3)), None);
        assert_eq!(scene.mesh_count(), 0);
    }

    #[test]
    fn orientation_wraps() {
        let mut o = Orientation { x: 6.28, y: 0.0 };
        o.advance(0.01);
        assert!(o.x < 0.01);
        assert!((o.y - 0.01).abs() < 1e-6);
    }

    #[test]
    fn ambient_color_follows_record() {
        let fields = [FieldDescriptor::color("ambientColor", Rgb::from_hex(0xff0000), Affects::Lighting)];
        let mut scene = Scene::new(vec![
            Light::ambient(Rgb::WHITE, 0.5),
            Light::directional(Rgb::WHITE, 1.0, Vec3::ONE),
        ]);
        scene.apply_lighting(&ParamRecord::from_fields(&fields));
        assert_eq!(scene.lights[0], Light::ambient(Rgb::from_hex(0xff0000), 0.5));
        assert!(scene.key_light().is_some());
    }

    #[test]
    fn material_picks_up_color_and_wireframe() {
        let fields = [
            FieldDescriptor::color("color", Rgb::from_hex(0x123456), Affects::Material),
            FieldDescriptor::boolean("wireframe", true, Affects::Material),
        ];
        let material = Material::standard(Rgb::WHITE, 0.5, 0.5).with_record(&ParamRecord::from_fields(&fields));
        assert_eq!(material.color, Rgb::from_hex(0x123456));
        assert!(material.wireframe);
    }
}
