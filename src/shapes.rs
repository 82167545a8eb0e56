//! Catalog of preview shapes
//!
//! A `ShapeKind` resolves to a `ShapeDescriptor` (field schema, default
//! material, lights, camera framing) and builds its mesh from a `ParamRecord`.

use clap::ValueEnum;
use glam::Vec3;
use serde::Serialize;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::error::ParamError;
use crate::geometry::{
    build_box, build_capsule, build_cone, build_cylinder, build_sphere, build_torus, build_torus_knot, BoxParams,
    CapsuleParams, ConeParams, CylinderParams, MeshData, SphereParams, TorusKnotParams, TorusParams,
};
use crate::math::Rgb;
use crate::params::{Affects, FieldDescriptor, ParamRecord};
use crate::scene::{Light, Material};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Cube,
    Cone,
    Cylinder,
    Sphere,
    Torus,
    TorusKnot,
    Capsule,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Cube,
        ShapeKind::Cone,
        ShapeKind::Cylinder,
        ShapeKind::Sphere,
        ShapeKind::Torus,
        ShapeKind::TorusKnot,
        ShapeKind::Capsule,
    ];

    /// Next shape in catalog order, wrapping around
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            ShapeKind::Cube => "Cube",
            ShapeKind::Cone => "Cone",
            ShapeKind::Cylinder => "Cylinder",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Torus => "Torus",
            ShapeKind::TorusKnot => "Torus Knot",
            ShapeKind::Capsule => "Capsule",
        }
    }

    pub fn descriptor(self) -> ShapeDescriptor {
        let wire = Material::basic_wireframe(Rgb::GREEN);
        let base = ShapeDescriptor {
            kind: self,
            title: self.title(),
            fields: Vec::new(),
            material: wire,
            lights: Vec::new(),
            camera_distance: 5.0,
            orbit: OrbitSettings::DAMPED_UPPER_HEMISPHERE,
        };

        match self {
            ShapeKind::Cube => ShapeDescriptor {
                fields: vec![
                    FieldDescriptor::numeric("width", 1.0, 0.1, 5.0),
                    FieldDescriptor::numeric("height", 1.0, 0.1, 5.0),
                    FieldDescriptor::numeric("depth", 1.0, 0.1, 5.0),
                    FieldDescriptor::stepped("widthSegments", 1.0, 1.0, 10.0),
                    FieldDescriptor::stepped("heightSegments", 1.0, 1.0, 10.0),
                    FieldDescriptor::stepped("depthSegments", 1.0, 1.0, 10.0),
                    FieldDescriptor::color("color", Rgb::GREEN, Affects::Material),
                    FieldDescriptor::boolean("wireframe", false, Affects::Material),
                    FieldDescriptor::color("ambientColor", Rgb::WHITE, Affects::Lighting),
                ],
                material: Material::standard(Rgb::GREEN, 0.5, 0.5),
                lights: studio_lights(),
                ..base
            },
            ShapeKind::Cone => ShapeDescriptor {
                fields: vec![
                    FieldDescriptor::numeric("radius", 1.0, 0.1, 3.0),
                    FieldDescriptor::numeric("height", 2.0, 0.1, 5.0),
                    FieldDescriptor::stepped("radialSegments", 16.0, 3.0, 32.0),
                    FieldDescriptor::stepped("heightSegments", 1.0, 1.0, 10.0),
                    FieldDescriptor::boolean("openEnded", false, Affects::Geometry),
                    FieldDescriptor::numeric("thetaStart", 0.0, 0.0, TAU),
                    FieldDescriptor::numeric("thetaLength", TAU, 0.0, TAU),
                ],
                ..base
            },
            ShapeKind::Cylinder => ShapeDescriptor {
                fields: vec![
                    FieldDescriptor::numeric("radiusTop", 1.0, 0.1, 3.0),
                    FieldDescriptor::numeric("radiusBottom", 1.0, 0.1, 3.0),
                    FieldDescriptor::numeric("height", 2.0, 0.1, 5.0),
                    FieldDescriptor::stepped("radialSegments", 16.0, 3.0, 32.0),
                    FieldDescriptor::stepped("heightSegments", 1.0, 1.0, 10.0),
                    FieldDescriptor::boolean("openEnded", false, Affects::Geometry),
                    FieldDescriptor::numeric("thetaStart", 0.0, 0.0, TAU),
                    FieldDescriptor::numeric("thetaLength", TAU, 0.0, TAU),
                ],
                ..base
            },
            ShapeKind::Sphere => ShapeDescriptor {
                fields: vec![
                    FieldDescriptor::numeric("radius", 1.0, 0.1, 3.0),
                    FieldDescriptor::stepped("widthSegments", 16.0, 3.0, 32.0),
                    FieldDescriptor::stepped("heightSegments", 8.0, 2.0, 16.0),
                ],
                ..base
            },
            ShapeKind::Torus => ShapeDescriptor {
                fields: vec![
                    FieldDescriptor::numeric("radius", 5.0, 1.0, 10.0),
                    FieldDescriptor::numeric("tube", 2.0, 0.1, 5.0),
                    FieldDescriptor::stepped("radialSegments", 16.0, 3.0, 32.0),
                    FieldDescriptor::stepped("tubularSegments", 100.0, 3.0, 100.0),
                    FieldDescriptor::numeric("arc", TAU, 0.0, TAU),
                ],
                camera_distance: 15.0,
                ..base
            },
            ShapeKind::TorusKnot => ShapeDescriptor {
                fields: vec![
                    FieldDescriptor::numeric("radius", 1.0, 1.0, 10.0),
                    FieldDescriptor::numeric("tube", 0.4, 0.1, 5.0),
                    FieldDescriptor::stepped("tubularSegments", 100.0, 3.0, 100.0),
                    FieldDescriptor::stepped("radialSegments", 16.0, 3.0, 32.0),
                    FieldDescriptor::stepped("p", 3.0, 1.0, 10.0),
                    FieldDescriptor::stepped("q", 4.0, 1.0, 10.0),
                ],
                orbit: OrbitSettings::FREE,
                ..base
            },
            ShapeKind::Capsule => ShapeDescriptor {
                fields: vec![
                    FieldDescriptor::numeric("radius", 1.0, 0.1, 5.0),
                    FieldDescriptor::numeric("length", 4.0, 0.1, 10.0),
                    FieldDescriptor::stepped("capSegments", 8.0, 3.0, 20.0),
                    FieldDescriptor::stepped("radialSegments", 16.0, 3.0, 20.0),
                    FieldDescriptor::boolean("wireframe", false, Affects::Material),
                ],
                material: Material::standard(Rgb::WHITE, 0.5, 0.5),
                lights: studio_lights(),
                ..base
            },
        }
    }

    /// Builds the mesh for this shape from every geometry field of `record`
    pub fn build(self, record: &ParamRecord) -> Result<MeshData, ParamError> {
        let n = |name: &str| record.number(name);

        let mesh = match self {
            ShapeKind::Cube => build_box(&BoxParams {
                width: n("width")?,
                height: n("height")?,
                depth: n("depth")?,
                width_segments: n("widthSegments")?,
                height_segments: n("heightSegments")?,
                depth_segments: n("depthSegments")?,
            }),
            ShapeKind::Cone => build_cone(&ConeParams {
                radius: n("radius")?,
                height: n("height")?,
                radial_segments: n("radialSegments")?,
                height_segments: n("heightSegments")?,
                open_ended: record.flag("openEnded")?,
                theta_start: n("thetaStart")?,
                theta_length: n("thetaLength")?,
            }),
            ShapeKind::Cylinder => build_cylinder(&CylinderParams {
                radius_top: n("radiusTop")?,
                radius_bottom: n("radiusBottom")?,
                height: n("height")?,
                radial_segments: n("radialSegments")?,
                height_segments: n("heightSegments")?,
                open_ended: record.flag("openEnded")?,
                theta_start: n("thetaStart")?,
                theta_length: n("thetaLength")?,
            }),
            ShapeKind::Sphere => build_sphere(&SphereParams {
                radius: n("radius")?,
                width_segments: n("widthSegments")?,
                height_segments: n("heightSegments")?,
                ..Default::default()
            }),
            ShapeKind::Torus => build_torus(&TorusParams {
                radius: n("radius")?,
                tube: n("tube")?,
                radial_segments: n("radialSegments")?,
                tubular_segments: n("tubularSegments")?,
                arc: n("arc")?,
            }),
            ShapeKind::TorusKnot => build_torus_knot(&TorusKnotParams {
                radius: n("radius")?,
                tube: n("tube")?,
                tubular_segments: n("tubularSegments")?,
                radial_segments: n("radialSegments")?,
                p: n("p")?,
                q: n("q")?,
            }),
            ShapeKind::Capsule => build_capsule(&CapsuleParams {
                radius: n("radius")?,
                length: n("length")?,
                cap_segments: n("capSegments")?,
                radial_segments: n("radialSegments")?,
            }),
        };

        Ok(mesh)
    }
}

/// Ambient fill plus one key light from the upper right front
fn studio_lights() -> Vec<Light> {
    vec![
        Light::ambient(Rgb::WHITE, 0.5),
        Light::directional(Rgb::WHITE, 1.0, Vec3::ONE),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitSettings {
    /// Velocity retained per frame is `1 - damping`; `None` stops immediately
    pub damping: Option<f32>,
    pub max_polar_angle: f32,
}

impl OrbitSettings {
    pub const DAMPED_UPPER_HEMISPHERE: OrbitSettings = OrbitSettings {
        damping: Some(0.25),
        max_polar_angle: FRAC_PI_2,
    };

    pub const FREE: OrbitSettings = OrbitSettings {
        damping: None,
        max_polar_angle: PI,
    };
}

/// Everything a preview session needs to know about one shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeDescriptor {
    pub kind: ShapeKind,
    pub title: &'static str,
    pub fields: Vec<FieldDescriptor>,
    #[serde(skip)]
    pub material: Material,
    #[serde(skip)]
    pub lights: Vec<Light>,
    pub camera_distance: f32,
    pub orbit: OrbitSettings,
}

impl ShapeDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn default_record(&self) -> ParamRecord {
        ParamRecord::from_fields(&self.fields)
    }

    pub fn build(&self, record: &ParamRecord) -> Result<MeshData, ParamError> {
        self.kind.build(record)
    }

    /// Default material with the record's material fields applied
    pub fn material_for(&self, record: &ParamRecord) -> Material {
        self.material.with_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{FieldKind, ParamValue};

    #[test]
    fn defaults_lie_within_ranges() {
        for kind in ShapeKind::ALL {
            for field in kind.descriptor().fields {
                assert_eq!(
                    field.kind.coerce(field.name, field.default),
                    Ok(field.default),
                    "{kind:?}.{}",
                    field.name
                );
            }
        }
    }

    #[test]
    fn every_default_record_builds() {
        for kind in ShapeKind::ALL {
            let descriptor = kind.descriptor();
            let mesh = descriptor.build(&descriptor.default_record()).unwrap();
            assert!(mesh.triangle_count() > 0, "{kind:?}");
        }
    }

    #[test]
    fn segment_fields_are_integer_stepped() {
        let descriptor = ShapeKind::Cylinder.descriptor();
        let radial = descriptor.field("radialSegments").unwrap();
        assert!(matches!(radial.kind, FieldKind::Numeric { step: Some(s), .. } if s == 1.0));
        assert_eq!(radial.default, ParamValue::Number(16.0));
    }

    #[test]
    fn build_rejects_missing_fields() {
        let record = ShapeKind::Sphere.descriptor().default_record();
        assert!(matches!(
            ShapeKind::Torus.build(&record),
            Err(ParamError::UnknownField(_))
        ));
    }

    #[test]
    fn framing_and_materials() {
        assert_eq!(ShapeKind::Torus.descriptor().camera_distance, 15.0);
        assert_eq!(ShapeKind::TorusKnot.descriptor().orbit, OrbitSettings::FREE);
        assert!(ShapeKind::Sphere.descriptor().material.wireframe);
        assert_eq!(ShapeKind::Capsule.descriptor().lights.len(), 2);
        assert!(ShapeKind::Cone.descriptor().lights.is_empty());
    }

    #[test]
    fn next_cycles_through_catalog() {
        let mut kind = ShapeKind::Cube;
        for _ in 0..ShapeKind::ALL.len() {
            kind = kind.next();
        }
        assert_eq!(kind, ShapeKind::Cube);
        assert_eq!(ShapeKind::Capsule.next(), ShapeKind::Cube);
    }
}
