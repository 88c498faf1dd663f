//! Debug panel: labeled, bounded, stepped controls over the galaxy
//! parameters.
//!
//! The panel never reaches into shared state: it edits a `GalaxyParams`
//! handed to it by the caller, and reports whether the edit should
//! regenerate immediately (color pickers) or on release (sliders).

use vela_core::{Color, GalaxyParams};

/// Preset colors the two color controls cycle through. The first two are
/// the defaults for inner and outer.
pub const PALETTE: [&str; 6] = [
    "#f12f43", "#823293", "#1b3984", "#ff6030", "#00ffcc", "#f5f5f5",
];

/// The tunable fields, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    Count,
    Size,
    Branches,
    Radius,
    Spin,
    Randomness,
    RandomnessPower,
    InnerColor,
    OuterColor,
}

impl ParamField {
    /// Numeric value of the field. Color fields are edited through the
    /// palette, not this accessor; they report their red channel here.
    pub fn get(&self, params: &GalaxyParams) -> f64 {
        match self {
            ParamField::Count => params.count as f64,
            ParamField::Size => params.size as f64,
            ParamField::Branches => params.branches as f64,
            ParamField::Radius => params.radius as f64,
            ParamField::Spin => params.spin as f64,
            ParamField::Randomness => params.randomness as f64,
            ParamField::RandomnessPower => params.randomness_power as f64,
            ParamField::InnerColor => params.inner_color.r as f64,
            ParamField::OuterColor => params.outer_color.r as f64,
        }
    }

    /// Write a numeric value back. Integer fields round.
    pub fn set(&self, params: &mut GalaxyParams, value: f64) {
        match self {
            ParamField::Count => params.count = value.round() as u32,
            ParamField::Size => params.size = value as f32,
            ParamField::Branches => params.branches = value.round() as u32,
            ParamField::Radius => params.radius = value as f32,
            ParamField::Spin => params.spin = value as f32,
            ParamField::Randomness => params.randomness = value as f32,
            ParamField::RandomnessPower => params.randomness_power = value as f32,
            ParamField::InnerColor | ParamField::OuterColor => {}
        }
    }

    fn is_color(&self) -> bool {
        matches!(self, ParamField::InnerColor | ParamField::OuterColor)
    }
}

/// A labeled control with declared bounds and step size.
#[derive(Debug, Clone, Copy)]
pub struct Control {
    pub field: ParamField,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// How an edit should be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Regenerate when the adjustment key is released.
    Deferred,
    /// Regenerate right away.
    Immediate,
    /// Nothing changed (already at a bound).
    None,
}

/// Keyboard-driven parameter panel.
pub struct DebugPanel {
    controls: Vec<Control>,
    selected: usize,
    inner_index: usize,
    outer_index: usize,
    pending: bool,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugPanel {
    /// Build the standard control table.
    pub fn new() -> Self {
        let controls = vec![
            Control {
                field: ParamField::Count,
                label: "count",
                min: 100.0,
                max: 1_000_000.0,
                step: 100.0,
            },
            Control {
                field: ParamField::Size,
                label: "size",
                min: 0.001,
                max: 0.1,
                step: 0.001,
            },
            Control {
                field: ParamField::Branches,
                label: "branches",
                min: 2.0,
                max: 20.0,
                step: 1.0,
            },
            Control {
                field: ParamField::Radius,
                label: "radius",
                min: 0.01,
                max: 20.0,
                step: 0.01,
            },
            Control {
                field: ParamField::Spin,
                label: "spin",
                min: -5.0,
                max: 5.0,
                step: 0.001,
            },
            Control {
                field: ParamField::Randomness,
                label: "randomness",
                min: 0.0,
                max: 2.0,
                step: 0.001,
            },
            Control {
                field: ParamField::RandomnessPower,
                label: "randomness power",
                min: 1.0,
                max: 10.0,
                step: 0.001,
            },
            Control {
                field: ParamField::InnerColor,
                label: "inner color",
                min: 0.0,
                max: (PALETTE.len() - 1) as f64,
                step: 1.0,
            },
            Control {
                field: ParamField::OuterColor,
                label: "outer color",
                min: 0.0,
                max: (PALETTE.len() - 1) as f64,
                step: 1.0,
            },
        ];
        Self {
            controls,
            selected: 0,
            inner_index: 0,
            outer_index: 1,
            pending: false,
        }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn selected(&self) -> &Control {
        &self.controls[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.controls.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.controls.len() - 1) % self.controls.len();
    }

    /// Step the selected control by `steps` (negative steps down). Values
    /// clamp to the control's bounds; color controls cycle the palette.
    pub fn adjust(&mut self, params: &mut GalaxyParams, steps: i32) -> Edit {
        let control = self.controls[self.selected];

        if control.field.is_color() {
            let len = PALETTE.len() as i32;
            let index = match control.field {
                ParamField::InnerColor => &mut self.inner_index,
                _ => &mut self.outer_index,
            };
            *index = ((*index as i32 + steps).rem_euclid(len)) as usize;
            let color = Color::from_hex(PALETTE[*index]).expect("palette entries are valid hex");
            match control.field {
                ParamField::InnerColor => params.inner_color = color,
                _ => params.outer_color = color,
            }
            return Edit::Immediate;
        }

        let current = control.field.get(params);
        let next = (current + steps as f64 * control.step).clamp(control.min, control.max);
        if next == current {
            return Edit::None;
        }
        control.field.set(params, next);
        self.pending = true;
        Edit::Deferred
    }

    /// True once after one or more deferred edits; callers regenerate on
    /// the release of the adjustment key.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// One-line panel state for the window title / log.
    pub fn status(&self, params: &GalaxyParams) -> String {
        let control = self.selected();
        let value = match control.field {
            ParamField::InnerColor => params.inner_color.to_hex(),
            ParamField::OuterColor => params.outer_color.to_hex(),
            ParamField::Count | ParamField::Branches => {
                format!("{}", control.field.get(params) as u64)
            }
            _ => format!("{:.3}", control.field.get(params)),
        };
        format!("{} = {}", control.label, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_steps_by_declared_step() {
        let mut panel = DebugPanel::new();
        let mut params = GalaxyParams::default();

        assert_eq!(panel.selected().field, ParamField::Count);
        assert_eq!(panel.adjust(&mut params, 5), Edit::Deferred);
        assert_eq!(params.count, 100_500);
    }

    #[test]
    fn adjust_clamps_to_bounds() {
        let mut panel = DebugPanel::new();
        let mut params = GalaxyParams::default();

        panel.adjust(&mut params, i32::MAX / 2);
        assert_eq!(params.count, 1_000_000);

        panel.adjust(&mut params, -(i32::MAX / 2));
        assert_eq!(params.count, 100);

        // Another step down is a no-op at the bound.
        assert_eq!(panel.adjust(&mut params, -1), Edit::None);
        assert_eq!(params.count, 100);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut panel = DebugPanel::new();
        let n = panel.controls().len();
        for _ in 0..n {
            panel.select_next();
        }
        assert_eq!(panel.selected().field, ParamField::Count);

        panel.select_prev();
        assert_eq!(panel.selected().field, ParamField::OuterColor);
    }

    #[test]
    fn color_adjust_is_immediate_and_cycles() {
        let mut panel = DebugPanel::new();
        let mut params = GalaxyParams::default();

        while panel.selected().field != ParamField::InnerColor {
            panel.select_next();
        }

        let before = params.inner_color;
        assert_eq!(panel.adjust(&mut params, 1), Edit::Immediate);
        assert_ne!(params.inner_color, before);

        // Full cycle returns to the starting color.
        for _ in 0..PALETTE.len() - 1 {
            panel.adjust(&mut params, 1);
        }
        assert_eq!(params.inner_color, before);
    }

    #[test]
    fn pending_flag_reports_once() {
        let mut panel = DebugPanel::new();
        let mut params = GalaxyParams::default();

        assert!(!panel.take_pending());
        panel.adjust(&mut params, 1);
        assert!(panel.take_pending());
        assert!(!panel.take_pending());
    }

    #[test]
    fn status_names_the_selected_control() {
        let mut panel = DebugPanel::new();
        let params = GalaxyParams::default();
        assert_eq!(panel.status(&params), "count = 100000");

        panel.select_next();
        assert!(panel.status(&params).starts_with("size = 0.010"));
    }

    #[test]
    fn palette_entries_parse() {
        for hex in PALETTE {
            assert!(Color::from_hex(hex).is_ok());
        }
    }
}
