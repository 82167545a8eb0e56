use crate::geometry::MeshData;
use crate::scene::Scene;
use crate::viewport::PerspectiveCamera;

/// Handle to geometry uploaded to a render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub u64);

/// Drawable area size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> Option<f32> {
        (!self.is_degenerate()).then(|| self.width as f32 / self.height as f32)
    }
}

/// Everything needed to draw one frame
pub struct FrameView<'a> {
    pub scene: &'a Scene,
    pub camera: &'a PerspectiveCamera,
}

/// Render surface - owns GPU-side geometry and presents frames
pub trait RenderSurface {
    /// Current drawable size
    fn size(&self) -> SurfaceSize;

    /// Resize the drawable area. Degenerate sizes are never passed in.
    fn resize(&mut self, size: SurfaceSize);

    /// Upload a mesh and return the handle scene meshes refer to
    fn upload_geometry(&mut self, mesh: &MeshData) -> GeometryId;

    /// Free the resources behind `id`. Unknown ids are ignored.
    fn release_geometry(&mut self, id: GeometryId);

    /// Draw `frame`, then run `overlay` to build the egui layer on top
    fn draw(&mut self, frame: FrameView<'_>, overlay: &mut dyn FnMut(&egui::Context)) -> anyhow::Result<()>;

    /// Release the surface itself. Further draws fail.
    fn release(&mut self);
}
