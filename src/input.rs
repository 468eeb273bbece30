use egui::{Context, Event, PointerButton, Pos2, Rect};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

impl InputLocation {
    pub fn new(position: Pos2, is_in_canvas: bool) -> Self {
        Self { position, is_in_canvas }
    }

    pub fn is_finite(&self) -> bool {
        self.position.x.is_finite() && self.position.y.is_finite()
    }
}

/// Pointer notifications delivered to the tool engine
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
    },
    /// Mouse button was released
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
}

impl InputEvent {
    pub fn location(&self) -> &InputLocation {
        match self {
            InputEvent::PointerDown { location, .. }
            | InputEvent::PointerMove { location, .. }
            | InputEvent::PointerUp { location, .. } => location,
        }
    }

    /// Helper to check if an input event occurred within the canvas
    pub fn is_in_canvas(&self) -> bool {
        self.location().is_in_canvas
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    held_buttons: Vec<PointerButton>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            held_buttons: Vec::new(),
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation::new(pos, self.canvas_rect.contains(pos))
    }

    /// Process raw egui input and generate our InputEvents.
    ///
    /// Every raw pointer event of the frame becomes one `InputEvent`, in arrival order.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        ctx.input(|input| self.translate(&input.events))
    }

    fn translate(&mut self, raw: &[Event]) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for event in raw {
            match event {
                Event::PointerMoved(pos) => {
                    if Some(*pos) == self.last_pointer_pos {
                        continue;
                    }
                    self.last_pointer_pos = Some(*pos);
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(*pos),
                        held_buttons: self.held_buttons.clone(),
                    });
                }
                Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    self.last_pointer_pos = Some(*pos);
                    let location = self.make_location(*pos);
                    if *pressed {
                        if !self.held_buttons.contains(button) {
                            self.held_buttons.push(*button);
                        }
                        events.push(InputEvent::PointerDown {
                            location,
                            button: *button,
                        });
                    } else {
                        self.held_buttons.retain(|held| held != button);
                        events.push(InputEvent::PointerUp {
                            location,
                            button: *button,
                        });
                    }
                }
                _ => {}
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_location_accessor() {
        let location = InputLocation::new(pos2(3.0, 4.0), true);
        let event = InputEvent::PointerUp {
            location,
            button: PointerButton::Primary,
        };
        assert_eq!(event.location(), &location);
        assert!(event.is_in_canvas());
    }

    #[test]
    fn test_non_finite_detection() {
        assert!(InputLocation::new(pos2(1.0, 2.0), true).is_finite());
        assert!(!InputLocation::new(pos2(f32::NAN, 2.0), true).is_finite());
        assert!(!InputLocation::new(pos2(1.0, f32::INFINITY), false).is_finite());
    }

    #[test]
    fn test_canvas_membership() {
        let handler = InputHandler::new(Rect::from_min_size(pos2(10.0, 10.0), egui::vec2(20.0, 20.0)));
        assert!(handler.make_location(pos2(15.0, 15.0)).is_in_canvas);
        assert!(!handler.make_location(pos2(5.0, 15.0)).is_in_canvas);
    }

    fn button(pos: Pos2, button: PointerButton, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_events_keep_arrival_order() {
        let mut handler = InputHandler::new(Rect::from_min_size(Pos2::ZERO, egui::vec2(50.0, 50.0)));
        let raw = vec![
            Event::PointerMoved(pos2(1.0, 1.0)),
            button(pos2(1.0, 1.0), PointerButton::Primary, true),
            Event::PointerMoved(pos2(2.0, 2.0)),
            Event::PointerMoved(pos2(3.0, 3.0)),
            button(pos2(3.0, 3.0), PointerButton::Primary, false),
            button(pos2(4.0, 4.0), PointerButton::Primary, true),
        ];
        let ctx = Context::default();
        let mut events = Vec::new();
        let _ = ctx.run(
            egui::RawInput {
                events: raw,
                ..Default::default()
            },
            |ctx| events = handler.process_input(ctx),
        );

        let at = |x: f32| InputLocation::new(pos2(x, x), true);
        assert_eq!(
            events,
            vec![
                InputEvent::PointerMove {
                    location: at(1.0),
                    held_buttons: vec![],
                },
                InputEvent::PointerDown {
                    location: at(1.0),
                    button: PointerButton::Primary,
                },
                InputEvent::PointerMove {
                    location: at(2.0),
                    held_buttons: vec![PointerButton::Primary],
                },
                InputEvent::PointerMove {
                    location: at(3.0),
                    held_buttons: vec![PointerButton::Primary],
                },
                InputEvent::PointerUp {
                    location: at(3.0),
                    button: PointerButton::Primary,
                },
                InputEvent::PointerDown {
                    location: at(4.0),
                    button: PointerButton::Primary,
                },
            ]
        );
    }

    #[test]
    fn test_repeated_position_is_not_a_move() {
        let mut handler = InputHandler::new(Rect::from_min_size(Pos2::ZERO, egui::vec2(50.0, 50.0)));
        let events = handler.translate(&[
            Event::PointerMoved(pos2(5.0, 5.0)),
            Event::PointerMoved(pos2(5.0, 5.0)),
            Event::PointerMoved(pos2(80.0, 5.0)),
        ]);
        assert_eq!(events.len(), 2);
        assert!(!events[1].is_in_canvas());
    }
}
