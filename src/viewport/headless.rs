use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::geometry::MeshData;
use crate::scene::Orientation;
use crate::traits::{FrameView, GeometryId, RenderSurface, SurfaceSize};

/// What a headless surface saw on its last draw
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub geometries: Vec<GeometryId>,
    pub orientations: Vec<Orientation>,
    pub aspect: f32,
}

/// Resource accounting shared between a `HeadlessSurface` and its observers
#[derive(Debug, Clone, Default)]
pub struct HeadlessLedger {
    pub uploads: u64,
    pub released: Vec<GeometryId>,
    pub live: BTreeMap<GeometryId, MeshData>,
    pub frames_drawn: u64,
    pub last_frame: Option<FrameRecord>,
    pub resizes: Vec<SurfaceSize>,
    pub surface_released: bool,
}

impl HeadlessLedger {
    /// True once the surface and every uploaded geometry are gone
    pub fn fully_released(&self) -> bool {
        self.surface_released && self.live.is_empty()
    }
}

/// Render surface that keeps meshes on the CPU and records draws
///
/// The egui overlay still runs every frame so panel code is exercised.
pub struct HeadlessSurface {
    size: SurfaceSize,
    next_id: u64,
    ledger: Rc<RefCell<HeadlessLedger>>,
    egui_ctx: egui::Context,
}

impl HeadlessSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            next_id: 1,
            ledger: Rc::default(),
            egui_ctx: egui::Context::default(),
        }
    }

    pub fn ledger(&self) -> Rc<RefCell<HeadlessLedger>> {
        Rc::clone(&self.ledger)
    }

    fn raw_input(&self) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(self.size.width as f32, self.size.height as f32),
            )),
            ..Default::default()
        }
    }
}

impl RenderSurface for HeadlessSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.ledger.borrow_mut().resizes.push(size);
    }

    fn upload_geometry(&mut self, mesh: &MeshData) -> GeometryId {
        let id = GeometryId(self.next_id);
        self.next_id += 1;

        let mut ledger = self.ledger.borrow_mut();
        ledger.uploads += 1;
        ledger.live.insert(id, mesh.clone());
        id
    }

    fn release_geometry(&mut self, id: GeometryId) {
        let mut ledger = self.ledger.borrow_mut();
        if ledger.live.remove(&id).is_some() {
            ledger.released.push(id);
        }
    }

    fn draw(&mut self, frame: FrameView<'_>, overlay: &mut dyn FnMut(&egui::Context)) -> anyhow::Result<()> {
        if self.ledger.borrow().surface_released {
            anyhow::bail!("draw on a released surface");
        }

        let record = {
            let ledger = self.ledger.borrow();
            let mut record = FrameRecord {
                geometries: Vec::new(),
                orientations: Vec::new(),
                aspect: frame.camera.aspect(),
            };
            for mesh in frame.scene.meshes() {
                if !ledger.live.contains_key(&mesh.geometry) {
                    anyhow::bail!("scene references released geometry {:?}", mesh.geometry);
                }
                record.geometries.push(mesh.geometry);
                record.orientations.push(mesh.orientation);
            }
            record
        };

        let raw_input = self.raw_input();
        let _ = self.egui_ctx.run(raw_input, |ctx| overlay(ctx));

        let mut ledger = self.ledger.borrow_mut();
        ledger.frames_drawn += 1;
        ledger.last_frame = Some(record);
        Ok(())
    }

    fn release(&mut self) {
        let mut ledger = self.ledger.borrow_mut();
        if !ledger.surface_released {
            // whatever is still uploaded goes with the surface
            let leftover: Vec<GeometryId> = ledger.live.keys().copied().collect();
            ledger.live.clear();
            ledger.released.extend(leftover);
            ledger.surface_released = true;
        }
    }
}
