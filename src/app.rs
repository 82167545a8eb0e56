//! Desktop host: one window, one preview session at a time

use anyhow::Result;
use glam::Vec2;
use serde::Serialize;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::PreviewConfig;
use crate::gpu::WgpuSurface;
use crate::host::HostEvents;
use crate::lifecycle::PreviewSession;
use crate::params::ParamRecord;
use crate::scene::Orientation;
use crate::shapes::ShapeKind;
use crate::traits::{RenderSurface, SurfaceSize};
use crate::viewport::HeadlessSurface;

/// What to open and how
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub shape: ShapeKind,
    pub overrides: Vec<(String, String)>,
    pub show_panel: bool,
}

/// Applies `name=value` overrides; the first bad one aborts
fn apply_overrides<S: RenderSurface>(session: &mut PreviewSession<S>, overrides: &[(String, String)]) -> Result<()> {
    for (name, value) in overrides {
        let stored = session.edit_text(name, value)?;
        log::info!("{} = {}", name, stored);
    }
    Ok(())
}

/// Shape bound to a navigation key, if any
fn shape_for_key(code: KeyCode, current: ShapeKind) -> Option<ShapeKind> {
    let index = match code {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        KeyCode::Digit7 => 6,
        KeyCode::Tab => return Some(current.next()),
        _ => return None,
    };
    ShapeKind::ALL.get(index).copied()
}

pub struct PreviewApp {
    config: PreviewConfig,
    options: LaunchOptions,
    window: Option<Arc<Window>>,
    host: HostEvents,
    session: Option<PreviewSession<WgpuSurface>>,
    current: ShapeKind,
    cursor: Vec2,
}

impl PreviewApp {
    pub fn new(config: PreviewConfig, options: LaunchOptions) -> Self {
        Self {
            current: options.shape,
            config,
            options,
            window: None,
            host: HostEvents::new(),
            session: None,
            cursor: Vec2::ZERO,
        }
    }

    /// Stops whatever is showing and starts a fresh session for `kind`
    fn open(&mut self, kind: ShapeKind, event_loop: &ActiveEventLoop) {
        self.close();

        let Some(window) = self.window.clone() else {
            return;
        };
        window.set_title(&format!("{} - {}", self.config.window.title, kind.title()));

        let mut session = PreviewSession::new(kind, self.config.clone()).with_panel(self.options.show_panel);
        let acquire = |_size: SurfaceSize| pollster::block_on(WgpuSurface::new(window));
        if let Err(e) = session.start(&self.host, acquire) {
            log::error!("Failed to start {} preview: {}", kind.title(), e);
            event_loop.exit();
            return;
        }

        // overrides only seed the shape picked on the command line
        if kind == self.options.shape {
            if let Err(e) = apply_overrides(&mut session, &self.options.overrides) {
                log::warn!("Ignoring parameter override: {:#}", e);
            }
        }

        self.current = kind;
        self.session = Some(session);
    }

    fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
        }
    }
}

impl ApplicationHandler for PreviewApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(self.config.window.title.as_str())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.open(self.current, event_loop);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        // Let egui handle the event first
        if let Some(surface) = self.session.as_mut().and_then(|s| s.surface_mut()) {
            if surface.on_window_event(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.close();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(kind) = shape_for_key(code, self.current) {
                    self.open(kind, event_loop);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(session) = &mut self.session {
                    if let Err(e) = session.resize(SurfaceSize::new(size.width, size.height)) {
                        log::warn!("Resize ignored: {}", e);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                if let Some(session) = &mut self.session {
                    let _ = session.pointer_move(self.cursor);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(session) = &mut self.session {
                    let _ = match state {
                        ElementState::Pressed => session.pointer_down(self.cursor),
                        ElementState::Released => session.pointer_up(),
                    };
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // browser convention: negative is "scroll up"
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y,
                    MouseScrollDelta::PixelDelta(p) => -(p.y as f32),
                };
                if let Some(session) = &mut self.session {
                    let _ = session.wheel(delta_y);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(session) = &mut self.session {
                    if let Err(e) = session.render_frame() {
                        log::error!("Render error: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let wants_frame = self.session.as_ref().is_some_and(|s| s.wants_frame());
        if let (true, Some(window)) = (wants_frame, &self.window) {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.close();
    }
}

/// Opens the preview window and blocks until it is closed
pub fn run_windowed(config: PreviewConfig, options: LaunchOptions) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = PreviewApp::new(config, options);

    log::info!("Shape Preview - 1-7 / Tab: switch shape, drag: orbit, wheel: zoom, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}

/// Summary of an off-screen run
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessReport {
    pub shape: ShapeKind,
    pub params: ParamRecord,
    pub frames_drawn: u64,
    pub vertices: usize,
    pub triangles: usize,
    pub geometries_uploaded: u64,
    pub geometries_released: usize,
    pub rotation: [f32; 2],
    pub fully_released: bool,
}

/// Runs one session against a `HeadlessSurface` for `frames` frames
pub fn run_headless(config: PreviewConfig, options: &LaunchOptions, frames: u32) -> Result<HeadlessReport> {
    let host = HostEvents::new();
    let size = config.window.size();
    let mut session = PreviewSession::new(options.shape, config).with_panel(options.show_panel);

    let surface = HeadlessSurface::new(size);
    let ledger = surface.ledger();
    session.start(&host, move |_| Ok(surface))?;
    apply_overrides(&mut session, &options.overrides)?;

    for _ in 0..frames {
        session.render_frame()?;
    }

    let params = session.record().cloned().unwrap_or_default();
    let Orientation { x, y } = session.orientation().unwrap_or_default();
    let (vertices, triangles) = {
        let ledger = ledger.borrow();
        ledger
            .live
            .values()
            .next()
            .map_or((0, 0), |mesh| (mesh.vertex_count(), mesh.triangle_count()))
    };
    session.stop();

    let ledger = ledger.borrow();
    Ok(HeadlessReport {
        shape: options.shape,
        params,
        frames_drawn: ledger.frames_drawn,
        vertices,
        triangles,
        geometries_uploaded: ledger.uploads,
        geometries_released: ledger.released.len(),
        rotation: [x, y],
        fully_released: ledger.fully_released(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_and_tab_navigate() {
        assert_eq!(shape_for_key(KeyCode::Digit1, ShapeKind::Torus), Some(ShapeKind::Cube));
        assert_eq!(shape_for_key(KeyCode::Digit7, ShapeKind::Cube), Some(ShapeKind::Capsule));
        assert_eq!(shape_for_key(KeyCode::Tab, ShapeKind::Torus), Some(ShapeKind::TorusKnot));
        assert_eq!(shape_for_key(KeyCode::KeyW, ShapeKind::Cube), None);
    }

    #[test]
    fn headless_run_reports_spin_and_cleanup() {
        let options = LaunchOptions {
            shape: ShapeKind::Cylinder,
            overrides: vec![("radialSegments".to_string(), "3".to_string())],
            show_panel: false,
        };
        let report = run_headless(PreviewConfig::default(), &options, 10).unwrap();

        assert_eq!(report.frames_drawn, 10);
        assert!((report.rotation[0] - 0.1).abs() < 1e-5);
        assert_eq!(report.geometries_uploaded, 2);
        assert_eq!(report.geometries_released, 2);
        assert!(report.fully_released);
        assert_eq!(report.params.number("radialSegments"), Ok(3.0));
    }

    #[test]
    fn headless_run_rejects_unknown_override() {
        let options = LaunchOptions {
            shape: ShapeKind::Sphere,
            overrides: vec![("tube".to_string(), "1".to_string())],
            show_panel: false,
        };
        assert!(run_headless(PreviewConfig::default(), &options, 1).is_err());
    }
}
