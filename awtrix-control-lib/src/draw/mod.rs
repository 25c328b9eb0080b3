//! Drawing primitives for the `/draw` endpoint.
//!
//! These are plain values. Nothing here checks colors or coordinates against
//! the matrix; the device gets exactly what was built.
pub mod color;
pub mod effect;

pub use color::{Color, NamedColor, ParseValueError, Position};
pub use effect::{Circle, Effect, Fill, Line, Rect, Text, DEFAULT_CIRCLE_RADIUS};
