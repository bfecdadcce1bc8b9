//! # Lattice Canvas Widget
//!
//! Draws a lattice snapshot in perspective: the reference ring, links,
//! node spheres and ratio labels. Dragging on the canvas orbits the camera
//! and the mouse wheel zooms. The widget only reads the snapshot it is
//! given.

use iced::alignment;
use iced::widget::canvas::{self, event, Event, Geometry, Path, Stroke};
use iced::{mouse, Color, Element, Length, Point, Rectangle, Renderer, Theme};
use lattice_core::{LatticeSnapshot, Node, Position, SchemeKind};

use crate::camera::{Camera, Projected};
use crate::Message;

/// Sphere radius in lattice units.
const SPHERE_RADIUS: f64 = 0.2;
/// Labels sit this far above their node, in lattice units.
const LABEL_OFFSET: f64 = 0.4;
const LABEL_SIZE: f32 = 16.0;
const RING_SEGMENTS: usize = 128;
const LINK_WIDTH: f32 = 1.5;

/// Pixels scrolled per wheel "line" on devices that report pixels.
const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Debug, Default)]
pub struct DragState {
    last_cursor: Option<Point>,
}

pub struct LatticeCanvas {
    snapshot: LatticeSnapshot,
    camera: Camera,
}

impl LatticeCanvas {
    pub fn new(snapshot: LatticeSnapshot, camera: Camera) -> Self {
        Self { snapshot, camera }
    }

    pub fn view(self) -> Element<'static, Message> {
        canvas::Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn node_color(&self) -> Color {
        match self.snapshot.scheme {
            SchemeKind::Radial => Color::from_rgb8(0xB2, 0x22, 0x22),
            SchemeKind::Grid => Color::from_rgb8(0xFF, 0x00, 0x00),
        }
    }

    fn draw_ring(&self, frame: &mut canvas::Frame, bounds: Rectangle) {
        let Some(ring) = self.snapshot.reference_ring else {
            return;
        };
        let points: Vec<Projected> = (0..=RING_SEGMENTS)
            .filter_map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / RING_SEGMENTS as f64;
                let on_ring = Position::polar(ring.radius(), angle);
                self.camera.project(on_ring, bounds.width, bounds.height)
            })
            .collect();
        if points.len() < 2 {
            return;
        }

        let band = ring.outer_radius - ring.inner_radius;
        let mean_scale = points.iter().map(|p| p.scale).sum::<f64>() / points.len() as f64;
        let path = Path::new(|builder| {
            builder.move_to(Point::new(points[0].x, points[0].y));
            for p in &points[1..] {
                builder.line_to(Point::new(p.x, p.y));
            }
        });
        frame.stroke(
            &path,
            Stroke::default()
                .with_width(((band * mean_scale) as f32).max(1.0))
                .with_color(Color { a: 0.5, ..Color::BLACK }),
        );
    }

    fn draw_links(&self, frame: &mut canvas::Frame, bounds: Rectangle) {
        for link in &self.snapshot.links {
            let from = self.camera.project(link.from, bounds.width, bounds.height);
            let to = self.camera.project(link.to, bounds.width, bounds.height);
            if let (Some(a), Some(b)) = (from, to) {
                let line = Path::line(Point::new(a.x, a.y), Point::new(b.x, b.y));
                frame.stroke(
                    &line,
                    Stroke::default().with_width(LINK_WIDTH).with_color(Color::BLACK),
                );
            }
        }
    }

    fn draw_nodes(&self, frame: &mut canvas::Frame, bounds: Rectangle) {
        let mut visible: Vec<(Projected, &Node)> = self
            .snapshot
            .nodes
            .iter()
            .filter_map(|node| {
                self.camera
                    .project(node.position, bounds.width, bounds.height)
                    .map(|p| (p, node))
            })
            .collect();
        // Painter's order: furthest first.
        visible.sort_by(|a, b| b.0.depth.partial_cmp(&a.0.depth).unwrap_or(std::cmp::Ordering::Equal));

        let color = self.node_color();
        for (projected, node) in visible {
            let radius = ((SPHERE_RADIUS * projected.scale) as f32).max(2.0);
            frame.fill(&Path::circle(Point::new(projected.x, projected.y), radius), color);

            let label_anchor = node.position + Position::new(0.0, LABEL_OFFSET, 0.0);
            if let Some(label) = self.camera.project(label_anchor, bounds.width, bounds.height) {
                frame.fill_text(canvas::Text {
                    content: node.label.clone(),
                    position: Point::new(label.x, label.y),
                    color: Color::BLACK,
                    size: LABEL_SIZE.into(),
                    horizontal_alignment: alignment::Horizontal::Center,
                    vertical_alignment: alignment::Vertical::Center,
                    ..canvas::Text::default()
                });
            }
        }
    }
}

impl canvas::Program<Message> for LatticeCanvas {
    type State = DragState;

    fn update(
        &self,
        state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    state.last_cursor = Some(position);
                    return (event::Status::Captured, None);
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                state.last_cursor = None;
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if let Some(last) = state.last_cursor {
                    state.last_cursor = Some(position);
                    return (
                        event::Status::Captured,
                        Some(Message::Orbit {
                            dx: position.x - last.x,
                            dy: position.y - last.y,
                        }),
                    );
                }
            }
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if cursor.is_over(bounds) {
                    let lines = match delta {
                        mouse::ScrollDelta::Lines { y, .. } => y,
                        mouse::ScrollDelta::Pixels { y, .. } => y / PIXELS_PER_LINE,
                    };
                    return (event::Status::Captured, Some(Message::Zoom(lines)));
                }
            }
            _ => {}
        }
        (event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        if !bounds.width.is_finite() || !bounds.height.is_finite() || bounds.height <= 0.0 {
            return vec![frame.into_geometry()];
        }

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::WHITE);
        self.draw_ring(&mut frame, bounds);
        self.draw_links(&mut frame, bounds);
        self.draw_nodes(&mut frame, bounds);

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.last_cursor.is_some() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}
