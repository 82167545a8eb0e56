use glam::Vec2;
use shape_preview::config::CameraConfig;
use shape_preview::geometry::{build_sphere, SphereParams};
use shape_preview::math::Rgb;
use shape_preview::scene::{Material, Orientation, SceneMesh};
use shape_preview::shapes::OrbitSettings;
use shape_preview::traits::SurfaceSize;
use shape_preview::viewport::{HeadlessSurface, ViewportSession};

fn viewport() -> ViewportSession<HeadlessSurface> {
    ViewportSession::start(
        HeadlessSurface::new(SurfaceSize::new(800, 600)),
        &CameraConfig::default(),
        OrbitSettings::DAMPED_UPPER_HEMISPHERE,
    )
}

fn mesh(geometry: shape_preview::traits::GeometryId) -> SceneMesh {
    SceneMesh {
        geometry,
        material: Material::basic_wireframe(Rgb::GREEN),
        orientation: Orientation::default(),
    }
}

#[cfg(test)]
mod viewport_tests {
    use super::*;

    #[test]
    fn test_resize_updates_aspect_once() {
        let mut viewport = viewport();
        let ledger = viewport.surface().ledger();

        viewport.resize(SurfaceSize::new(1200, 600));
        viewport.resize(SurfaceSize::new(1200, 600));

        assert!((viewport.camera().aspect() - 2.0).abs() < 1e-6);
        assert_eq!(ledger.borrow().resizes, vec![SurfaceSize::new(1200, 600)]);
    }

    #[test]
    fn test_replace_geometry_releases_previous() {
        let mut viewport = viewport();
        let ledger = viewport.surface().ledger();
        let slot = viewport.insert_mesh(&build_sphere(&SphereParams::default()), mesh);

        let old = viewport.replace_geometry(slot, &build_sphere(&SphereParams {
            radius: 2.0,
            ..Default::default()
        }));

        let ledger = ledger.borrow();
        assert_eq!(ledger.released, vec![old.unwrap()]);
        assert_eq!(ledger.live.len(), 1);
    }

    #[test]
    fn test_stop_releases_scene_and_surface() {
        let mut viewport = viewport();
        let ledger = viewport.surface().ledger();
        viewport.insert_mesh(&build_sphere(&SphereParams::default()), mesh);

        viewport.stop();
        viewport.stop();

        assert!(viewport.is_released());
        assert!(ledger.borrow().fully_released());
        assert!(viewport.render_frame(&mut |_: &egui::Context| {}).is_err());
    }

    #[test]
    fn test_drag_orbits_camera_around_target() {
        let mut viewport = viewport();
        viewport.populate(Vec::new(), 5.0);
        let before = viewport.camera().position;

        viewport.pointer_down(Vec2::new(400.0, 300.0));
        viewport.pointer_move(Vec2::new(500.0, 300.0));
        viewport.pointer_up();
        viewport.render_frame(&mut |_: &egui::Context| {}).unwrap();

        let after = viewport.camera().position;
        assert!((after.length() - before.length()).abs() < 1e-3);
        assert!(after.distance(before) > 1e-3);
    }

    #[test]
    fn test_wheel_zooms_in_and_out() {
        let mut viewport = viewport();
        viewport.populate(Vec::new(), 5.0);

        viewport.wheel(-1.0);
        viewport.render_frame(&mut |_: &egui::Context| {}).unwrap();
        let closer = viewport.camera().position.length();
        assert!(closer < 5.0);

        viewport.wheel(1.0);
        viewport.wheel(1.0);
        viewport.render_frame(&mut |_: &egui::Context| {}).unwrap();
        assert!(viewport.camera().position.length() > closer);
    }
}
