use crate::error::{PanelError, ParamError};
use crate::math::Rgb;
use crate::params::{FieldDescriptor, FieldKind, ParamRecord, ParamValue};

type ChangeCallback = Box<dyn FnMut()>;

struct Binding {
    field: &'static str,
    on_change: ChangeCallback,
}

/// Floating panel of editable fields over a parameter record.
///
/// Every committed edit is clamped into the field's range, written to the
/// record and then reported to the field's callbacks before `set` returns.
pub struct ParameterPanel {
    title: String,
    fields: Vec<FieldDescriptor>,
    record: ParamRecord,
    bindings: Vec<Binding>,
    destroyed: bool,
}

impl ParameterPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            record: ParamRecord::default(),
            bindings: Vec::new(),
            destroyed: false,
        }
    }

    /// Registers `field` with its default value and a callback fired on
    /// every committed edit of it. Binding a name twice adds a callback.
    pub fn bind(&mut self, field: FieldDescriptor, on_change: impl FnMut() + 'static) -> Result<(), PanelError> {
        if self.destroyed {
            return Err(PanelError::Destroyed);
        }
        let name = field.name;
        if self.field(name).is_none() {
            self.record.insert(name, field.default);
            self.fields.push(field);
        }
        self.bindings.push(Binding {
            field: name,
            on_change: Box::new(on_change),
        });
        Ok(())
    }

    /// Commits an edit. Returns the value actually stored.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<ParamValue, PanelError> {
        if self.destroyed {
            return Err(PanelError::Destroyed);
        }
        let field = self
            .field(name)
            .ok_or_else(|| ParamError::UnknownField(name.to_string()))?;
        let value = field.kind.coerce(name, value)?;

        self.record.assign(name, value)?;
        for binding in self.bindings.iter_mut().filter(|b| b.field == name) {
            (binding.on_change)();
        }
        Ok(value)
    }

    /// Commits an edit given as text, e.g. `"12"`, `"true"` or `"#ff0000"`
    pub fn set_text(&mut self, name: &str, text: &str) -> Result<ParamValue, PanelError> {
        let field = self
            .field(name)
            .ok_or_else(|| ParamError::UnknownField(name.to_string()))?;
        let value = field.kind.parse(name, text)?;
        self.set(name, value)
    }

    pub fn record(&self) -> &ParamRecord {
        &self.record
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn callback_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Drops every callback. Later edits are rejected.
    pub fn destroy(&mut self) {
        self.bindings.clear();
        self.destroyed = true;
    }

    /// Draws the panel and commits whatever the user changed this frame
    pub fn show(&mut self, ctx: &egui::Context) {
        if self.destroyed {
            return;
        }

        let mut edits = Vec::new();

        egui::Window::new(self.title.as_str())
            .resizable(false)
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
            .default_width(240.0)
            .show(ctx, |ui| {
                for field in &self.fields {
                    let Some(current) = self.record.get(field.name) else {
                        continue;
                    };
                    if let Some(edit) = field_editor(ui, field, current) {
                        edits.push((field.name, edit));
                    }
                }
            });

        for (name, value) in edits {
            if let Err(e) = self.set(name, value) {
                log::warn!("Rejected edit of {}: {}", name, e);
            }
        }
    }
}

/// One row of the panel. Returns the new value if the user changed it.
fn field_editor(ui: &mut egui::Ui, field: &FieldDescriptor, current: ParamValue) -> Option<ParamValue> {
    match (field.kind, current) {
        (FieldKind::Numeric { min, max, step }, ParamValue::Number(mut value)) => {
            let mut slider = egui::Slider::new(&mut value, min..=max).text(field.name);
            if let Some(step) = step {
                slider = slider.step_by(step as f64);
            }
            ui.add(slider).changed().then_some(ParamValue::Number(value))
        }
        (FieldKind::Boolean, ParamValue::Bool(mut value)) => ui
            .checkbox(&mut value, field.name)
            .changed()
            .then_some(ParamValue::Bool(value)),
        (FieldKind::Color, ParamValue::Color(Rgb(mut rgb))) => {
            ui.horizontal(|ui| {
                let changed = ui.color_edit_button_srgb(&mut rgb).changed();
                ui.label(field.name);
                changed
            })
            .inner
            .then_some(ParamValue::Color(Rgb(rgb)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Affects;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        (count, move || handle.set(handle.get() + 1))
    }

    fn radial() -> FieldDescriptor {
        FieldDescriptor::stepped("radialSegments", 16.0, 3.0, 32.0)
    }

    #[test]
    fn bind_seeds_default() {
        let mut panel = ParameterPanel::new("Cylinder");
        panel.bind(radial(), || {}).unwrap();
        assert_eq!(panel.record().number("radialSegments"), Ok(16.0));
    }

    #[test]
    fn set_fires_only_matching_callbacks() {
        let mut panel = ParameterPanel::new("Cylinder");
        let (radial_hits, on_radial) = counter();
        let (open_hits, on_open) = counter();
        panel.bind(radial(), on_radial).unwrap();
        panel
            .bind(FieldDescriptor::boolean("openEnded", false, Affects::Geometry), on_open)
            .unwrap();

        panel.set("radialSegments", ParamValue::Number(3.0)).unwrap();
        assert_eq!(radial_hits.get(), 1);
        assert_eq!(open_hits.get(), 0);
    }

    #[test]
    fn set_clamps_before_storing() {
        let mut panel = ParameterPanel::new("Cylinder");
        panel.bind(radial(), || {}).unwrap();
        assert_eq!(panel.set("radialSegments", ParamValue::Number(99.0)), Ok(ParamValue::Number(32.0)));
        assert_eq!(panel.record().number("radialSegments"), Ok(32.0));
    }

    #[test]
    fn rejected_edits_leave_record_alone() {
        let mut panel = ParameterPanel::new("Cylinder");
        let (hits, on_change) = counter();
        panel.bind(radial(), on_change).unwrap();

        assert!(panel.set("radialSegments", ParamValue::Bool(true)).is_err());
        assert!(panel.set("radialSegments", ParamValue::Number(f32::INFINITY)).is_err());
        assert_eq!(
            panel.set("tube", ParamValue::Number(1.0)),
            Err(PanelError::Param(ParamError::UnknownField("tube".into())))
        );
        assert_eq!(hits.get(), 0);
        assert_eq!(panel.record().number("radialSegments"), Ok(16.0));
    }

    #[test]
    fn set_text_parses_by_kind() {
        let mut panel = ParameterPanel::new("Cube");
        panel
            .bind(FieldDescriptor::color("color", Rgb::GREEN, Affects::Material), || {})
            .unwrap();
        assert_eq!(
            panel.set_text("color", "#ff00ff"),
            Ok(ParamValue::Color(Rgb::from_hex(0xff00ff)))
        );
    }

    #[test]
    fn destroy_releases_callbacks() {
        let mut panel = ParameterPanel::new("Cylinder");
        let (hits, on_change) = counter();
        panel.bind(radial(), on_change).unwrap();
        panel.destroy();

        assert_eq!(panel.callback_count(), 0);
        assert_eq!(panel.set("radialSegments", ParamValue::Number(3.0)), Err(PanelError::Destroyed));
        assert!(panel.bind(radial(), || {}).is_err());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn show_without_input_changes_nothing() {
        let mut panel = ParameterPanel::new("Cylinder");
        let (hits, on_change) = counter();
        panel.bind(radial(), on_change).unwrap();

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| panel.show(ctx));
        assert_eq!(hits.get(), 0);
    }
}
