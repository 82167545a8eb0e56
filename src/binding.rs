use crate::error::ParamError;
use crate::params::ParamRecord;
use crate::scene::{Orientation, SceneMesh, SlotId};
use crate::shapes::ShapeDescriptor;
use crate::traits::{GeometryId, RenderSurface};
use crate::viewport::ViewportSession;

/// Keeps exactly one mesh in the scene whose shape matches the current
/// parameter record
#[derive(Debug)]
pub struct GeometryBinding {
    slot: SlotId,
    spin_step: f32,
    rebuilds: u64,
    attached: bool,
}

impl GeometryBinding {
    /// Builds the initial mesh from `record` and inserts it into the scene
    pub fn attach<S: RenderSurface>(
        viewport: &mut ViewportSession<S>,
        descriptor: &ShapeDescriptor,
        record: &ParamRecord,
        spin_step: f32,
    ) -> Result<Self, ParamError> {
        let mesh = descriptor.build(record)?;
        let material = descriptor.material_for(record);
        let slot = viewport.insert_mesh(&mesh, |geometry| SceneMesh {
            geometry,
            material,
            orientation: Orientation::default(),
        });

        log::debug!(
            "{} attached: {} vertices, {} triangles",
            descriptor.title,
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(Self {
            slot,
            spin_step,
            rebuilds: 0,
            attached: true,
        })
    }

    /// Replaces the displayed geometry with one built from `record`.
    ///
    /// The new mesh is built before anything is touched, so a failed build
    /// leaves the old geometry on screen. Returns the released handle.
    pub fn rebuild<S: RenderSurface>(
        &mut self,
        viewport: &mut ViewportSession<S>,
        descriptor: &ShapeDescriptor,
        record: &ParamRecord,
    ) -> Result<Option<GeometryId>, ParamError> {
        if !self.attached {
            return Ok(None);
        }
        let mesh = descriptor.build(record)?;
        let released = viewport.replace_geometry(self.slot, &mesh);
        self.rebuilds += 1;
        log::trace!("{} rebuilt ({} triangles)", descriptor.title, mesh.triangle_count());
        Ok(released)
    }

    /// Updates material properties in place; the geometry is kept
    pub fn apply_material<S: RenderSurface>(
        &self,
        viewport: &mut ViewportSession<S>,
        descriptor: &ShapeDescriptor,
        record: &ParamRecord,
    ) {
        if let Some(mesh) = viewport.scene_mut().get_mut(self.slot) {
            mesh.material = descriptor.material_for(record);
        }
    }

    /// Advances the spin by one frame
    pub fn tick<S: RenderSurface>(&self, viewport: &mut ViewportSession<S>) {
        if let Some(mesh) = viewport.scene_mut().get_mut(self.slot) {
            mesh.orientation.advance(self.spin_step);
        }
    }

    pub fn orientation<S: RenderSurface>(&self, viewport: &ViewportSession<S>) -> Option<Orientation> {
        viewport.scene().get(self.slot).map(|mesh| mesh.orientation)
    }

    pub fn geometry<S: RenderSurface>(&self, viewport: &ViewportSession<S>) -> Option<GeometryId> {
        viewport.scene().get(self.slot).map(|mesh| mesh.geometry)
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Removes the mesh and releases its geometry. Safe to call twice.
    pub fn release<S: RenderSurface>(&mut self, viewport: &mut ViewportSession<S>) {
        if self.attached {
            viewport.remove_mesh(self.slot);
            self.attached = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::params::ParamValue;
    use crate::shapes::ShapeKind;
    use crate::traits::SurfaceSize;
    use crate::viewport::HeadlessSurface;

    fn viewport() -> ViewportSession<HeadlessSurface> {
        let surface = HeadlessSurface::new(SurfaceSize::new(320, 240));
        ViewportSession::start(surface, &CameraConfig::default(), ShapeKind::Sphere.descriptor().orbit)
    }

    #[test]
    fn failed_build_keeps_old_geometry() {
        let mut viewport = viewport();
        let descriptor = ShapeKind::Sphere.descriptor();
        let record = descriptor.default_record();
        let mut binding = GeometryBinding::attach(&mut viewport, &descriptor, &record, 0.01).unwrap();
        let before = binding.geometry(&viewport);

        // a torus record lacks the sphere fields
        let wrong = ShapeKind::Torus.descriptor().default_record();
        assert!(binding.rebuild(&mut viewport, &descriptor, &wrong).is_err());
        assert_eq!(binding.geometry(&viewport), before);
        assert_eq!(binding.rebuild_count(), 0);
    }

    #[test]
    fn material_update_keeps_geometry() {
        let mut viewport = viewport();
        let descriptor = ShapeKind::Capsule.descriptor();
        let mut record = descriptor.default_record();
        let binding = GeometryBinding::attach(&mut viewport, &descriptor, &record, 0.01).unwrap();
        let before = binding.geometry(&viewport);

        record.assign("wireframe", ParamValue::Bool(true)).unwrap();
        binding.apply_material(&mut viewport, &descriptor, &record);

        assert_eq!(binding.geometry(&viewport), before);
        assert!(viewport.scene().meshes().all(|m| m.material.wireframe));
    }

    #[test]
    fn release_is_idempotent() {
        let mut viewport = viewport();
        let ledger = viewport.surface().ledger();
        let descriptor = ShapeKind::Sphere.descriptor();
        let mut binding =
            GeometryBinding::attach(&mut viewport, &descriptor, &descriptor.default_record(), 0.01).unwrap();

        binding.release(&mut viewport);
        binding.release(&mut viewport);
        assert_eq!(ledger.borrow().released.len(), 1);
        assert_eq!(viewport.scene().mesh_count(), 0);
        assert_eq!(
            binding.rebuild(&mut viewport, &descriptor, &descriptor.default_record()),
            Ok(None)
        );
    }
}
