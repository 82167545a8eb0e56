//! Camera, orbit control and the session that drives a render surface

mod camera;
mod headless;
mod orbit;

pub use camera::PerspectiveCamera;
pub use headless::{FrameRecord, HeadlessLedger, HeadlessSurface};
pub use orbit::OrbitControls;

use glam::{Vec2, Vec3};

use crate::config::CameraConfig;
use crate::geometry::MeshData;
use crate::scene::{Light, Scene, SceneMesh, SlotId};
use crate::shapes::OrbitSettings;
use crate::traits::{FrameView, GeometryId, RenderSurface, SurfaceSize};

/// Owns the render surface, the camera and the display list
pub struct ViewportSession<S: RenderSurface> {
    surface: S,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    scene: Scene,
    released: bool,
}

impl<S: RenderSurface> ViewportSession<S> {
    /// Wraps an acquired surface with a camera sized to match it
    pub fn start(surface: S, camera: &CameraConfig, orbit: OrbitSettings) -> Self {
        let size = surface.size();
        log::debug!("Viewport started at {}x{}", size.width, size.height);

        Self {
            camera: PerspectiveCamera::new(camera.fov_y_degrees, camera.near, camera.far, size),
            controls: OrbitControls::new(orbit),
            scene: Scene::default(),
            surface,
            released: false,
        }
    }

    /// Places the lights and backs the camera off along +Z
    pub fn populate(&mut self, lights: Vec<Light>, camera_distance: f32) {
        self.scene.lights = lights;
        self.camera.position = Vec3::new(0.0, 0.0, camera_distance);
        self.camera.target = Vec3::ZERO;
    }

    /// Degenerate sizes are ignored; repeating a size is a no-op
    pub fn resize(&mut self, size: SurfaceSize) {
        if !self.camera.set_size(size) {
            log::debug!("Ignoring resize to {}x{}", size.width, size.height);
            return;
        }
        if self.surface.size() != size {
            self.surface.resize(size);
        }
    }

    pub fn render_frame(&mut self, overlay: &mut dyn FnMut(&egui::Context)) -> anyhow::Result<()> {
        self.controls.update(&mut self.camera);
        self.surface.draw(
            FrameView {
                scene: &self.scene,
                camera: &self.camera,
            },
            overlay,
        )
    }

    /// Releases anything left in the display list, then the surface
    pub fn stop(&mut self) {
        if self.released {
            return;
        }
        let leftover: Vec<GeometryId> = self.scene.meshes().map(|m| m.geometry).collect();
        for id in leftover {
            self.surface.release_geometry(id);
        }
        self.scene = Scene::default();
        self.surface.release();
        self.released = true;
        log::debug!("Viewport stopped");
    }

    pub fn insert_mesh(&mut self, mesh: &MeshData, build: impl FnOnce(GeometryId) -> SceneMesh) -> SlotId {
        let id = self.surface.upload_geometry(mesh);
        self.scene.insert(build(id))
    }

    /// Uploads `mesh`, points `slot` at it and releases what it displaced.
    ///
    /// The swap happens between frames, so no draw sees the slot empty or
    /// doubled. Returns the released handle.
    pub fn replace_geometry(&mut self, slot: SlotId, mesh: &MeshData) -> Option<GeometryId> {
        let id = self.surface.upload_geometry(mesh);
        match self.scene.swap_geometry(slot, id) {
            Some(old) => {
                self.surface.release_geometry(old);
                Some(old)
            }
            None => {
                // slot is gone; don't leak the upload
                self.surface.release_geometry(id);
                None
            }
        }
    }

    pub fn remove_mesh(&mut self, slot: SlotId) -> Option<GeometryId> {
        let mesh = self.scene.remove(slot)?;
        self.surface.release_geometry(mesh.geometry);
        Some(mesh.geometry)
    }

    pub fn pointer_down(&mut self, position: Vec2) {
        self.controls.pointer_down(position);
    }

    pub fn pointer_up(&mut self) {
        self.controls.pointer_up();
    }

    pub fn pointer_move(&mut self, position: Vec2) {
        let height = self.surface.size().height as f32;
        self.controls.pointer_move(position, height);
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.controls.wheel(delta_y);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}
