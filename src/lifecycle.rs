//! Session controller: `Uninitialized -> Running -> Stopped`
//!
//! A session owns everything one shape preview needs. State that only exists
//! while running lives inside the `Running` variant, so it cannot be touched
//! before `start` or after `stop`.

use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

use crate::binding::GeometryBinding;
use crate::config::PreviewConfig;
use crate::error::{ParamError, SessionError};
use crate::frame::{FpsCounter, FrameLoop};
use crate::host::{HostEvents, ResizeSubscription};
use crate::overlay;
use crate::panel::ParameterPanel;
use crate::params::{Affects, ParamRecord, ParamValue};
use crate::scene::Orientation;
use crate::shapes::{ShapeDescriptor, ShapeKind};
use crate::traits::{RenderSurface, SurfaceSize};
use crate::viewport::ViewportSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Running,
    Stopped,
}

/// What panel callbacks have invalidated since the last sync
#[derive(Debug, Default)]
struct PendingChanges {
    geometry: Cell<bool>,
    material: Cell<bool>,
    lighting: Cell<bool>,
}

impl PendingChanges {
    fn mark(&self, affects: Affects) {
        match affects {
            Affects::Geometry => self.geometry.set(true),
            Affects::Material => self.material.set(true),
            Affects::Lighting => self.lighting.set(true),
        }
    }
}

struct RunningSession<S: RenderSurface> {
    descriptor: ShapeDescriptor,
    viewport: ViewportSession<S>,
    binding: GeometryBinding,
    panel: ParameterPanel,
    frames: FrameLoop,
    fps: FpsCounter,
    resize: ResizeSubscription,
    pending: Rc<PendingChanges>,
}

impl<S: RenderSurface> RunningSession<S> {
    /// Applies pending edits so the next frame shows the committed record
    fn sync(&mut self) -> Result<(), ParamError> {
        let record = self.panel.record();
        if self.pending.geometry.take() {
            self.binding.rebuild(&mut self.viewport, &self.descriptor, record)?;
        }
        if self.pending.material.take() {
            self.binding.apply_material(&mut self.viewport, &self.descriptor, record);
        }
        if self.pending.lighting.take() {
            self.viewport.scene_mut().apply_lighting(record);
        }
        Ok(())
    }

    fn teardown(self: Box<Self>) {
        let RunningSession {
            mut viewport,
            mut binding,
            mut panel,
            mut frames,
            resize,
            ..
        } = *self;

        panel.destroy();
        resize.cancel();
        frames.cancel();
        binding.release(&mut viewport);
        viewport.stop();
    }
}

enum SessionState<S: RenderSurface> {
    Uninitialized,
    Running(Box<RunningSession<S>>),
    Stopped,
}

/// One live preview of one shape
pub struct PreviewSession<S: RenderSurface> {
    kind: ShapeKind,
    config: PreviewConfig,
    show_panel: bool,
    state: SessionState<S>,
}

impl<S: RenderSurface> PreviewSession<S> {
    pub fn new(kind: ShapeKind, config: PreviewConfig) -> Self {
        Self {
            kind,
            config,
            show_panel: true,
            state: SessionState::Uninitialized,
        }
    }

    /// Hides the parameter panel; edits still go through `edit`
    pub fn with_panel(mut self, visible: bool) -> Self {
        self.show_panel = visible;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn state(&self) -> LifecycleState {
        match self.state {
            SessionState::Uninitialized => LifecycleState::Uninitialized,
            SessionState::Running(_) => LifecycleState::Running,
            SessionState::Stopped => LifecycleState::Stopped,
        }
    }

    /// Brings the session up: surface, scene, geometry, panel, frame loop,
    /// resize listener, in that order.
    ///
    /// A surface that cannot be acquired stops the session for good.
    pub fn start(
        &mut self,
        host: &HostEvents,
        acquire: impl FnOnce(SurfaceSize) -> anyhow::Result<S>,
    ) -> Result<(), SessionError> {
        if !matches!(self.state, SessionState::Uninitialized) {
            return Err(SessionError::AlreadyStarted(self.state()));
        }

        let surface = match acquire(self.config.window.size()) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("{} preview has no surface: {:#}", self.kind.title(), e);
                self.state = SessionState::Stopped;
                return Err(SessionError::SurfaceUnavailable(format!("{e:#}")));
            }
        };

        let descriptor = self.kind.descriptor();
        let mut viewport = ViewportSession::start(surface, &self.config.camera, descriptor.orbit);
        viewport.populate(descriptor.lights.clone(), descriptor.camera_distance);

        let record = descriptor.default_record();
        viewport.scene_mut().apply_lighting(&record);

        let binding = match GeometryBinding::attach(&mut viewport, &descriptor, &record, self.config.spin_step) {
            Ok(binding) => binding,
            Err(e) => {
                viewport.stop();
                self.state = SessionState::Stopped;
                return Err(e.into());
            }
        };

        let pending = Rc::new(PendingChanges::default());
        let mut panel = ParameterPanel::new(descriptor.title);
        for field in &descriptor.fields {
            let pending = Rc::clone(&pending);
            let affects = field.affects;
            // a fresh panel accepts every binding
            let _ = panel.bind(field.clone(), move || pending.mark(affects));
        }

        let mut frames = FrameLoop::new();
        frames.begin();
        let resize = host.subscribe_resize();

        log::info!(
            "{} preview started ({} fields)",
            descriptor.title,
            descriptor.fields.len()
        );

        self.state = SessionState::Running(Box::new(RunningSession {
            descriptor,
            viewport,
            binding,
            panel,
            frames,
            fps: FpsCounter::default(),
            resize,
            pending,
        }));
        Ok(())
    }

    /// Spins the mesh one step and draws a frame with the panel on top.
    ///
    /// Edits made through the panel during the frame are applied before
    /// this returns.
    pub fn render_frame(&mut self) -> Result<(), SessionError> {
        let show_panel = self.show_panel;
        let show_fps = self.config.show_fps;
        let running = self.running_mut()?;

        running.sync()?;
        let Some(frame) = running.frames.next_frame() else {
            return Ok(());
        };
        running.fps.update(frame.delta);
        running.binding.tick(&mut running.viewport);

        let RunningSession {
            descriptor,
            viewport,
            panel,
            fps,
            ..
        } = &mut *running;
        let fps = fps.fps();
        let title = descriptor.title;
        let mut draw_overlay = |ctx: &egui::Context| {
            if show_fps {
                overlay::fps_badge(ctx, fps);
            }
            if show_panel {
                panel.show(ctx);
                overlay::navigation_hint(ctx, title);
            }
        };
        viewport
            .render_frame(&mut draw_overlay)
            .map_err(|e| SessionError::Render(format!("{e:#}")))?;

        running.sync()?;
        Ok(())
    }

    /// Forwards a host resize while the session's listener is registered
    pub fn resize(&mut self, size: SurfaceSize) -> Result<(), SessionError> {
        let running = self.running_mut()?;
        if running.resize.is_active() {
            running.viewport.resize(size);
        }
        Ok(())
    }

    /// Commits an edit as if made in the panel and applies it immediately
    pub fn edit(&mut self, name: &str, value: ParamValue) -> Result<ParamValue, SessionError> {
        let running = self.running_mut()?;
        let stored = running.panel.set(name, value)?;
        running.sync()?;
        Ok(stored)
    }

    /// Like `edit`, with the value given as text
    pub fn edit_text(&mut self, name: &str, text: &str) -> Result<ParamValue, SessionError> {
        let running = self.running_mut()?;
        let stored = running.panel.set_text(name, text)?;
        running.sync()?;
        Ok(stored)
    }

    pub fn pointer_down(&mut self, position: Vec2) -> Result<(), SessionError> {
        self.running_mut()?.viewport.pointer_down(position);
        Ok(())
    }

    pub fn pointer_move(&mut self, position: Vec2) -> Result<(), SessionError> {
        self.running_mut()?.viewport.pointer_move(position);
        Ok(())
    }

    pub fn pointer_up(&mut self) -> Result<(), SessionError> {
        self.running_mut()?.viewport.pointer_up();
        Ok(())
    }

    pub fn wheel(&mut self, delta_y: f32) -> Result<(), SessionError> {
        self.running_mut()?.viewport.wheel(delta_y);
        Ok(())
    }

    /// Tears everything down. Safe from any state; the session never runs
    /// again afterwards.
    pub fn stop(&mut self) {
        let state = std::mem::replace(&mut self.state, SessionState::Stopped);
        if let SessionState::Running(running) = state {
            let title = running.descriptor.title;
            running.teardown();
            log::info!("{} preview stopped", title);
        }
    }

    /// True while the frame loop wants another frame
    pub fn wants_frame(&self) -> bool {
        self.running().is_some_and(|r| r.frames.is_running())
    }

    pub fn frame_count(&self) -> u64 {
        self.running().map_or(0, |r| r.frames.frame_number())
    }

    pub fn record(&self) -> Option<&ParamRecord> {
        self.running().map(|r| r.panel.record())
    }

    pub fn descriptor(&self) -> Option<&ShapeDescriptor> {
        self.running().map(|r| &r.descriptor)
    }

    pub fn viewport(&self) -> Option<&ViewportSession<S>> {
        self.running().map(|r| &r.viewport)
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.running().and_then(|r| r.binding.orientation(&r.viewport))
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        match &mut self.state {
            SessionState::Running(r) => Some(r.viewport.surface_mut()),
            _ => None,
        }
    }

    fn running(&self) -> Option<&RunningSession<S>> {
        match &self.state {
            SessionState::Running(r) => Some(&**r),
            _ => None,
        }
    }

    fn running_mut(&mut self) -> Result<&mut RunningSession<S>, SessionError> {
        let state = self.state();
        match &mut self.state {
            SessionState::Running(r) => Ok(&mut **r),
            _ => Err(SessionError::NotRunning(state)),
        }
    }
}

impl<S: RenderSurface> Drop for PreviewSession<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::HeadlessSurface;

    fn session(kind: ShapeKind) -> (PreviewSession<HeadlessSurface>, HostEvents) {
        let host = HostEvents::new();
        let mut session = PreviewSession::new(kind, PreviewConfig::default());
        session
            .start(&host, |size| Ok(HeadlessSurface::new(size)))
            .unwrap();
        (session, host)
    }

    #[test]
    fn pending_changes_are_consumed_by_sync() {
        let (mut session, _host) = session(ShapeKind::Cube);
        session.edit("color", ParamValue::Color(crate::math::Rgb::from_hex(0xff0000))).unwrap();
        let running = session.running().unwrap();
        assert!(!running.pending.material.get());
        assert!(!running.pending.geometry.get());
    }

    #[test]
    fn second_start_is_rejected() {
        let (mut session, host) = session(ShapeKind::Cone);
        let err = session
            .start(&host, |size| Ok(HeadlessSurface::new(size)))
            .unwrap_err();
        assert!(matches!(err, SessionError::AlreadyStarted(LifecycleState::Running)));
    }

    #[test]
    fn stopped_session_rejects_operations() {
        let (mut session, _host) = session(ShapeKind::Torus);
        session.stop();
        assert!(matches!(
            session.render_frame(),
            Err(SessionError::NotRunning(LifecycleState::Stopped))
        ));
        assert!(session.wheel(1.0).is_err());
        assert!(!session.wants_frame());
    }
}
