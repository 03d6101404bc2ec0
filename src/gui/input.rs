//! Translation of egui input into [`InputEvent`]s.

use crate::display::Rect;
use crate::event::InputEvent;
use crate::keycode::Key;
use eframe::egui;

/// Map an egui key to the overlay key set.
pub fn map_key(key: egui::Key) -> Key {
    match key {
        egui::Key::Escape => Key::Escape,
        egui::Key::Tab => Key::Tab,
        egui::Key::Space => Key::Space,
        egui::Key::Enter => Key::Enter,
        egui::Key::Backspace => Key::Backspace,
        egui::Key::Home => Key::Home,
        egui::Key::End => Key::End,
        egui::Key::PageUp => Key::PageUp,
        egui::Key::PageDown => Key::PageDown,
        egui::Key::ArrowUp => Key::ArrowUp,
        egui::Key::ArrowDown => Key::ArrowDown,
        egui::Key::ArrowLeft => Key::ArrowLeft,
        egui::Key::ArrowRight => Key::ArrowRight,
        other => {
            let mut chars = other.name().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Character(c.to_ascii_lowercase()),
                _ => Key::Unknown(other as u32),
            }
        }
    }
}

/// Convert a point in overlay points to global virtual screen pixels.
pub fn to_global(geometry: Rect, pos: egui::Pos2, pixels_per_point: f32) -> (i32, i32) {
    (
        geometry.x + (pos.x * pixels_per_point).round() as i32,
        geometry.y + (pos.y * pixels_per_point).round() as i32,
    )
}

/// Translate raw egui events; events without a counterpart are dropped.
pub fn translate(events: &[egui::Event], geometry: Rect, pixels_per_point: f32) -> Vec<InputEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key, pressed: true, ..
            } => Some(InputEvent::KeyPress(map_key(*key))),
            egui::Event::PointerMoved(pos) => {
                let (x, y) = to_global(geometry, *pos, pixels_per_point);
                Some(InputEvent::MouseMove { x, y })
            }
            egui::Event::PointerGone => Some(InputEvent::MouseLeave),
            _ => None,
        })
        .collect()
}

/// Collect the events an overlay received this frame.
///
/// Pointer motion with the primary button held becomes a drag measured in
/// pixels; every reported pointer position also yields a mouse move.
pub fn collect_events(input: &egui::InputState, geometry: Rect) -> Vec<InputEvent> {
    let ppp = input.pixels_per_point();
    let mut events = translate(&input.events, geometry, ppp);

    let delta = input.pointer.delta();
    if input.pointer.primary_down() && delta != egui::Vec2::ZERO {
        events.push(InputEvent::MouseDrag {
            dx: (delta.x * ppp).round() as i32,
            dy: (delta.y * ppp).round() as i32,
        });
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_navigation_keys() {
        assert_eq!(map_key(egui::Key::ArrowLeft), Key::ArrowLeft);
        assert_eq!(map_key(egui::Key::PageDown), Key::PageDown);
        assert_eq!(map_key(egui::Key::Escape), Key::Escape);
    }

    #[test]
    fn test_map_letters_to_characters() {
        assert_eq!(map_key(egui::Key::Q), Key::Character('q'));
        assert_eq!(map_key(egui::Key::Num1), Key::Character('1'));
        assert!(matches!(map_key(egui::Key::F1), Key::Unknown(_)));
    }

    #[test]
    fn test_to_global_scales_and_offsets() {
        let geometry = Rect::new(1920, -100, 1280, 1024);
        assert_eq!(
            to_global(geometry, egui::pos2(10.0, 20.0), 1.0),
            (1930, -80)
        );
        assert_eq!(
            to_global(geometry, egui::pos2(10.0, 20.0), 2.0),
            (1940, -60)
        );
    }

    #[test]
    fn test_pointer_leaving_is_reported() {
        let geometry = Rect::new(1920, 0, 1280, 1024);
        let events = [
            egui::Event::PointerMoved(egui::pos2(5.0, 6.0)),
            egui::Event::PointerGone,
            egui::Event::Text("x".into()),
        ];
        assert_eq!(
            translate(&events, geometry, 1.0),
            [
                InputEvent::MouseMove { x: 1925, y: 6 },
                InputEvent::MouseLeave
            ]
        );
    }
}
