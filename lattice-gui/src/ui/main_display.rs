//! # Main Display Module
//!
//! This module contains the main display components and layout logic
//! for the ratio lattice application.

use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

use crate::widgets::lattice_canvas::LatticeCanvas;
use crate::{LatticeApp, Message};

const DESCRIPTION: &str = "Enter a just-intonation ratio to place it in the lattice. \
The grid view maps the primes 3, 5 and 7 onto the x, y and z axes, so it only \
supports 7-limit ratios.";

/// Different types of buttons with their styling requirements
#[derive(Debug, Clone, Copy)]
enum ButtonType {
    /// Standard button with no special styling
    Standard,
    /// Disabled button (no interaction)
    Disabled,
}

/// Creates the complete main application view
pub fn create_main_view(app: &LatticeApp) -> Element<'_, Message> {
    let header = column![
        text("Ratio Lattice Generator").size(28),
        text(DESCRIPTION).size(14),
    ]
    .spacing(6);

    let lattice_panel = container(
        LatticeCanvas::new(app.lattice.snapshot(), app.camera).view(),
    )
    .width(Length::Fill)
    .height(Length::Fill);

    container(
        column![
            header,
            Space::with_height(10),
            create_controls(app),
            create_mode_label(app),
            Space::with_height(10),
            lattice_panel,
        ]
        .spacing(5)
        .padding(20),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

/// Creates the ratio input row.
///
/// Undo is only offered when the active scheme supports it; otherwise the
/// button is drawn disabled.
fn create_controls(app: &LatticeApp) -> Element<'_, Message> {
    let input = text_input("Enter ratio (e.g. 3/2)", &app.ratio_input)
        .on_input(Message::RatioInputChanged)
        .on_submit(Message::AddRatio)
        .padding(8)
        .width(Length::Fixed(240.0));

    let undo_type = if app.lattice.supports_undo() {
        ButtonType::Standard
    } else {
        ButtonType::Disabled
    };
    let toggle_label = format!(
        "Switch to {} Visualization",
        scheme_title(app.lattice.scheme_kind().toggled())
    );

    row![
        input,
        make_button("Add Ratio".to_string(), Message::AddRatio, ButtonType::Standard),
        make_button("Undo".to_string(), Message::Undo, undo_type),
        make_button("Reset".to_string(), Message::Reset, ButtonType::Standard),
        make_button(toggle_label, Message::ToggleScheme, ButtonType::Standard),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

fn create_mode_label(app: &LatticeApp) -> Element<'_, Message> {
    text(format!(
        "Current Mode: {} visualization",
        scheme_title(app.lattice.scheme_kind())
    ))
    .size(14)
    .into()
}

fn scheme_title(kind: lattice_core::SchemeKind) -> &'static str {
    match kind {
        lattice_core::SchemeKind::Radial => "Radial",
        lattice_core::SchemeKind::Grid => "3D Grid",
    }
}

/// Creates a button, styled and wired according to its type.
fn make_button(
    label: String,
    message: Message,
    button_type: ButtonType,
) -> Element<'static, Message> {
    let button = button(text(label).size(14)).padding([6, 10]);

    match button_type {
        ButtonType::Standard => button.on_press(message).into(),
        ButtonType::Disabled => button
            .style(|_theme, _status| {
                use iced::widget::button;
                button::Style {
                    background: Some(iced::Background::Color(iced::Color::from_rgb(0.3, 0.3, 0.3))), // Gray background
                    text_color: iced::Color::from_rgb(0.6, 0.6, 0.6), // Gray text
                    ..button::Style::default()
                }
            })
            .into(),
    }
}
