use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::estimate::{self, Estimate};

/// Classification applied to a stroke, taken from the selection at draw time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineType {
    #[default]
    Gutter,
    Roof,
    Bush,
}

impl LineType {
    pub const ALL: [LineType; 3] = [LineType::Gutter, LineType::Roof, LineType::Bush];

    /// Human readable name shown in the selector
    pub fn label(self) -> &'static str {
        match self {
            LineType::Gutter => "Gutter",
            LineType::Roof => "Pitched Roof",
            LineType::Bush => "Bush/Ground",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            LineType::Gutter => "gutter",
            LineType::Roof => "roof",
            LineType::Bush => "bush",
        }
    }

    /// Installation rate in currency units per foot
    pub fn rate_per_foot(self) -> f64 {
        match self {
            LineType::Gutter => 7.0,
            LineType::Roof => 8.0,
            LineType::Bush => 5.0,
        }
    }

    /// Pen colour used while this line type is selected
    pub fn stroke_color(self) -> Color32 {
        match self {
            LineType::Gutter => Color32::from_rgb(255, 190, 30),
            LineType::Roof => Color32::from_rgb(220, 45, 45),
            LineType::Bush => Color32::from_rgb(40, 170, 70),
        }
    }
}

/// Bulb spacing in inches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Spacing {
    #[default]
    Inches12,
    Inches15,
}

impl Spacing {
    pub const ALL: [Spacing; 2] = [Spacing::Inches12, Spacing::Inches15];

    pub fn inches(self) -> u32 {
        match self {
            Spacing::Inches12 => 12,
            Spacing::Inches15 => 15,
        }
    }

    /// Multiplier applied to every stroke: inches per bulb over inches per foot
    pub fn feet_per_bulb(self) -> f64 {
        f64::from(self.inches()) / 12.0
    }

    pub fn label(self) -> String {
        format!("{} inches", self.inches())
    }
}

/// Pen width in pixels, always within `MIN..=MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct BrushSize(u8);

impl BrushSize {
    pub const MIN: u8 = 5;
    pub const MAX: u8 = 20;
    pub const DEFAULT: u8 = 10;

    pub fn new(pixels: u8) -> Self {
        Self(pixels.clamp(Self::MIN, Self::MAX))
    }

    pub fn pixels(self) -> u8 {
        self.0
    }

    pub fn width(self) -> f32 {
        f32::from(self.0)
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<u8> for BrushSize {
    fn from(pixels: u8) -> Self {
        Self::new(pixels)
    }
}

impl From<BrushSize> for u8 {
    fn from(size: BrushSize) -> Self {
        size.0
    }
}

/// Completed strokes per line type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrokeCounts {
    gutter: u32,
    roof: u32,
    bush: u32,
}

impl StrokeCounts {
    pub fn new(gutter: u32, roof: u32, bush: u32) -> Self {
        Self { gutter, roof, bush }
    }

    pub fn get(&self, line_type: LineType) -> u32 {
        match line_type {
            LineType::Gutter => self.gutter,
            LineType::Roof => self.roof,
            LineType::Bush => self.bush,
        }
    }

    /// Count one more stroke of the given type
    pub fn record(&mut self, line_type: LineType) {
        let counter = match line_type {
            LineType::Gutter => &mut self.gutter,
            LineType::Roof => &mut self.roof,
            LineType::Bush => &mut self.bush,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn total(&self) -> u32 {
        self.gutter + self.roof + self.bush
    }
}

/// The settings that survive a restart. Counts and drawings never do.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub line_type: LineType,
    pub spacing: Spacing,
    pub brush_size: BrushSize,
}

/// Session state owned by the application controller.
///
/// The three controls are independent toggles; the counters only grow.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    line_type: LineType,
    spacing: Spacing,
    brush_size: BrushSize,
    counts: StrokeCounts,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_preferences(prefs: Preferences) -> Self {
        Self {
            line_type: prefs.line_type,
            spacing: prefs.spacing,
            brush_size: prefs.brush_size,
            counts: StrokeCounts::default(),
        }
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            line_type: self.line_type,
            spacing: self.spacing,
            brush_size: self.brush_size,
        }
    }

    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    pub fn set_line_type(&mut self, line_type: LineType) {
        if self.line_type != line_type {
            log::debug!("Line type: {} -> {}", self.line_type.tag(), line_type.tag());
            self.line_type = line_type;
        }
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: Spacing) {
        self.spacing = spacing;
    }

    pub fn brush_size(&self) -> BrushSize {
        self.brush_size
    }

    pub fn set_brush_size(&mut self, brush_size: BrushSize) {
        self.brush_size = brush_size;
    }

    pub fn counts(&self) -> &StrokeCounts {
        &self.counts
    }

    /// Called once per completed stroke, with the line type selected when it began
    pub fn record_stroke(&mut self, line_type: LineType) {
        self.counts.record(line_type);
    }

    pub fn estimate(&self) -> Estimate {
        estimate::estimate(&self.counts, self.spacing)
    }
}
