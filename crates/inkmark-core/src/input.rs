//! Pointer events, so gestures can be recorded and replayed.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A single-pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { position: Point },
    Dragged { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Dragged { position }
            | PointerEvent::Up { position } => *position,
        }
    }

    /// Parse a JSON array of events.
    pub fn parse_script(json: &str) -> Result<Vec<PointerEvent>, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Events of a straight press-drag-release gesture through `points`.
    pub fn gesture(points: &[Point]) -> Vec<PointerEvent> {
        let Some((first, rest)) = points.split_first() else {
            return Vec::new();
        };
        let mut events = vec![PointerEvent::Down { position: *first }];
        events.extend(rest.iter().map(|&position| PointerEvent::Dragged { position }));
        let last = rest.last().unwrap_or(first);
        events.push(PointerEvent::Up { position: *last });
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let events = PointerEvent::parse_script(
            r#"[
                { "type": "down", "position": { "x": 0.0, "y": 0.0 } },
                { "type": "dragged", "position": { "x": 10.0, "y": 5.0 } },
                { "type": "up", "position": { "x": 10.0, "y": 5.0 } }
            ]"#,
        )
        .unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], PointerEvent::Dragged { position: Point::new(10.0, 5.0) });
    }

    #[test]
    fn test_gesture() {
        let events = PointerEvent::gesture(&[Point::ZERO, Point::new(3.0, 0.0)]);
        assert_eq!(
            events,
            vec![
                PointerEvent::Down { position: Point::ZERO },
                PointerEvent::Dragged { position: Point::new(3.0, 0.0) },
                PointerEvent::Up { position: Point::new(3.0, 0.0) },
            ]
        );
        assert!(PointerEvent::gesture(&[]).is_empty());
    }
}
