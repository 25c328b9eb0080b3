use derivative::Derivative;
use serde::{Deserialize, Serialize};

use crate::draw::color::{Color, Position};

/// One step of a draw sequence.
///
/// The device plays a sequence in array order: primitives paint into the frame
/// buffer, `Show` pushes the buffer to the matrix, `Wait` pauses playback,
/// `Clear` blanks the buffer and `Exit` ends the sequence early.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Effect {
    Fill(Fill),
    Text(Text),
    Rect(Rect),
    Line(Line),
    Circle(Circle),
    Show,
    Wait { ms: u64 },
    Clear,
    Exit,
}

impl Effect {
    pub fn wait(ms: u64) -> Self {
        Effect::Wait { ms }
    }

    /// The `type` discriminator the device uses for this effect.
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::Fill(_) => "fill",
            Effect::Text(_) => "text",
            Effect::Rect(_) => "rect",
            Effect::Line(_) => "line",
            Effect::Circle(_) => "circle",
            Effect::Show => "show",
            Effect::Wait { .. } => "wait",
            Effect::Clear => "clear",
            Effect::Exit => "exit",
        }
    }
}

/// Fills the whole frame with one color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: Color,
}

impl Fill {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Fill {
            color: Color::new(red, green, blue),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub string: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub position: Position,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Text {
            string: text.into(),
            color: Color::default(),
            position: Position::default(),
        }
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_position(mut self, position: impl Into<Position>) -> Self {
        self.position = position.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// `[width, height]`
    pub size: [i32; 2],
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub position: Position,
}

impl Rect {
    pub fn new(width: i32, height: i32) -> Self {
        Rect {
            size: [width, height],
            color: Color::default(),
            position: Position::default(),
        }
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_position(mut self, position: impl Into<Position>) -> Self {
        self.position = position.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub start: Position,
    #[serde(default)]
    pub end: Position,
    #[serde(default)]
    pub color: Color,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: impl Into<Position>) -> Self {
        self.start = start.into();
        self
    }

    pub fn with_end(mut self, end: impl Into<Position>) -> Self {
        self.end = end.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }
}

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[derivative(Default(value = "DEFAULT_CIRCLE_RADIUS"))]
    #[serde(default = "default_radius")]
    pub radius: u32,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub position: Position,
}

pub const DEFAULT_CIRCLE_RADIUS: u32 = 3;

fn default_radius() -> u32 {
    DEFAULT_CIRCLE_RADIUS
}

impl Circle {
    pub fn new(radius: u32) -> Self {
        Circle {
            radius,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_position(mut self, position: impl Into<Position>) -> Self {
        self.position = position.into();
        self
    }
}

impl From<Fill> for Effect {
    fn from(fill: Fill) -> Self {
        Effect::Fill(fill)
    }
}

impl From<Text> for Effect {
    fn from(text: Text) -> Self {
        Effect::Text(text)
    }
}

impl From<Rect> for Effect {
    fn from(rect: Rect) -> Self {
        Effect::Rect(rect)
    }
}

impl From<Line> for Effect {
    fn from(line: Line) -> Self {
        Effect::Line(line)
    }
}

impl From<Circle> for Effect {
    fn from(circle: Circle) -> Self {
        Effect::Circle(circle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_json(effect: impl Into<Effect>) -> serde_json::Value {
        serde_json::to_value(effect.into()).unwrap()
    }

    #[test]
    fn test_fill_serialization() {
        assert_eq!(
            to_json(Fill::new(1, 2, 3)),
            json!({"type": "fill", "color": [1, 2, 3]})
        );
    }

    #[test]
    fn test_unit_effects_only_carry_type() {
        assert_eq!(to_json(Effect::Show), json!({"type": "show"}));
        assert_eq!(to_json(Effect::Clear), json!({"type": "clear"}));
        assert_eq!(to_json(Effect::Exit), json!({"type": "exit"}));
        assert_eq!(to_json(Effect::wait(1000)), json!({"type": "wait", "ms": 1000}));
    }

    #[test]
    fn test_text_defaults_and_builders() {
        assert_eq!(
            to_json(Text::new("Hello World")),
            json!({"type": "text", "string": "Hello World", "color": [0, 0, 255], "position": [0, 0]})
        );
        assert_eq!(
            to_json(
                Text::new("Hi")
                    .with_color((255, 0, 0))
                    .with_position((4, 1))
            ),
            json!({"type": "text", "string": "Hi", "color": [255, 0, 0], "position": [4, 1]})
        );
    }

    #[test]
    fn test_rect_serialization() {
        assert_eq!(
            to_json(Rect::new(5, 5).with_position((24, 2))),
            json!({"type": "rect", "size": [5, 5], "color": [0, 0, 255], "position": [24, 2]})
        );
    }

    #[test]
    fn test_line_serialization() {
        assert_eq!(
            to_json(
                Line::new()
                    .with_end((10, 10))
                    .with_color(Color::new(255, 0, 0))
            ),
            json!({"type": "line", "start": [0, 0], "end": [10, 10], "color": [255, 0, 0]})
        );
    }

    #[test]
    fn test_circle_default_radius() {
        assert_eq!(Circle::default().radius, 3);
        assert_eq!(
            to_json(Circle::default()),
            json!({"type": "circle", "radius": 3, "color": [0, 0, 255], "position": [0, 0]})
        );
    }

    #[test]
    fn test_negative_coordinates_pass_through() {
        assert_eq!(
            to_json(Rect::new(-1, 2).with_position((-5, -6))),
            json!({"type": "rect", "size": [-1, 2], "color": [0, 0, 255], "position": [-5, -6]})
        );
    }

    #[test]
    fn test_sequence_order_is_preserved() {
        let forward: Vec<Effect> = vec![Fill::new(1, 2, 3).into(), Effect::Show, Effect::Exit];
        let reversed: Vec<Effect> = forward.iter().rev().cloned().collect();
        let kinds = |effects: &[Effect]| -> Vec<serde_json::Value> {
            serde_json::to_value(effects)
                .unwrap()
                .as_array()
                .unwrap()
                .iter()
                .map(|effect| effect["type"].clone())
                .collect()
        };
        assert_eq!(kinds(&forward), vec![json!("fill"), json!("show"), json!("exit")]);
        assert_eq!(kinds(&reversed), vec![json!("exit"), json!("show"), json!("fill")]);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let effects: Vec<Effect> = serde_json::from_value(json!([
            {"type": "circle"},
            {"type": "text", "string": "hey", "position": [1, 2]},
            {"type": "wait", "ms": 50},
            {"type": "show"}
        ]))
        .unwrap();
        assert_eq!(
            effects,
            vec![
                Circle::new(3).into(),
                Text::new("hey").with_position((1, 2)).into(),
                Effect::wait(50),
                Effect::Show,
            ]
        );
    }

    #[test]
    fn test_out_of_range_values_are_rejected_when_parsing() {
        let too_bright = json!([{"type": "fill", "color": [300, 0, 0]}]);
        assert!(serde_json::from_value::<Vec<Effect>>(too_bright).is_err());
        let negative_radius = json!([{"type": "circle", "radius": -1}]);
        assert!(serde_json::from_value::<Vec<Effect>>(negative_radius).is_err());
    }

    #[test]
    fn test_unknown_effect_type_is_rejected() {
        assert!(serde_json::from_value::<Effect>(json!({"type": "sparkle"})).is_err());
    }

    #[test]
    fn test_kind_matches_serialized_type() {
        let effects: Vec<Effect> = vec![
            Fill::new(0, 0, 0).into(),
            Text::new("a").into(),
            Rect::new(1, 1).into(),
            Line::new().into(),
            Circle::default().into(),
            Effect::Show,
            Effect::wait(1),
            Effect::Clear,
            Effect::Exit,
        ];
        for effect in effects {
            assert_eq!(to_json(effect.clone())["type"], json!(effect.kind()));
        }
    }
}
