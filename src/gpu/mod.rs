//! wgpu-backed render surface with an egui overlay

mod surface;

pub use surface::{Globals, WgpuSurface};
