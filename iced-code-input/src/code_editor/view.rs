//! Iced UI view and rendering logic.

use iced::widget::canvas::Canvas;
use iced::widget::{Row, Scrollable, Space, Stack, container, scrollable};
use iced::{Background, Border, Color, Element, Length, Shadow};

use super::{CodeEditor, Message};

impl CodeEditor {
    /// Creates the view element with scrollable wrapper.
    ///
    /// The backgrounds (editor and gutter) are handled by container styles
    /// to ensure proper clipping when the pane is resized.
    pub fn view(&self) -> Element<'_, Message> {
        let content_height = self.line_count() as f32 * self.line_height;

        // The canvas always covers at least the visible area
        let canvas_height = content_height.max(self.viewport_height);

        let canvas = Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fixed(canvas_height));

        // Capture style colors for closures
        let scrollbar_bg = self.style.scrollbar_background;
        let scroller_color = self.style.scroller_color;
        let background_color = self.style.background;
        let gutter_background = self.style.gutter_background;

        let rail = move || scrollable::Rail {
            background: Some(scrollbar_bg.into()),
            border: Border {
                radius: 4.0.into(),
                width: 0.0,
                color: Color::TRANSPARENT,
            },
            scroller: scrollable::Scroller {
                background: scroller_color.into(),
                border: Border {
                    radius: 4.0.into(),
                    width: 0.0,
                    color: Color::TRANSPARENT,
                },
            },
        };

        // Background is transparent here, the Stack layer below paints it
        let scrollable = Scrollable::new(canvas)
            .id(self.scrollable_id.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .on_scroll(Message::Scrolled)
            .style(move |_theme, _status| scrollable::Style {
                container: container::Style {
                    background: Some(Background::Color(Color::TRANSPARENT)),
                    ..container::Style::default()
                },
                vertical_rail: rail(),
                horizontal_rail: rail(),
                gap: None,
                auto_scroll: scrollable::AutoScroll {
                    background: Color::TRANSPARENT.into(),
                    border: Border::default(),
                    shadow: Shadow::default(),
                    icon: Color::TRANSPARENT,
                },
            });

        let code_background_container =
            container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(move |_| container::Style {
                    background: Some(Background::Color(background_color)),
                    ..container::Style::default()
                });

        let background_row = if self.line_numbers_enabled {
            let gutter =
                container(Space::new().width(Length::Fill).height(Length::Fill))
                    .width(Length::Fixed(self.gutter_width()))
                    .height(Length::Fill)
                    .style(move |_| container::Style {
                        background: Some(Background::Color(gutter_background)),
                        ..container::Style::default()
                    });
            Row::new().push(gutter).push(code_background_container)
        } else {
            Row::new().push(code_background_container)
        };

        let editor_stack = Stack::new().push(background_row).push(scrollable);

        container(editor_stack)
            .width(Length::Fill)
            .height(Length::Fill)
            .clip(true)
            .into()
    }
}
