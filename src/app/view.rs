use super::messages::Message;
use super::state::{App, SlideImage, ViewerScreen};
use crate::comments::{Comment, CommentPanel};
use crate::story::{PROGRESS_COMPLETE, PlaybackController};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    Column, Row, Space, button, column, container, horizontal_space, image, progress_bar, row,
    scrollable, stack, text, text_input,
};
use iced::{ContentFit, Element, Length, Padding};

/// Horizontal indent of replies under their root.
const REPLY_INDENT: f32 = 28.0;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        match &self.viewer {
            Some(screen) => self.viewer_view(screen),
            None => self.starter_view(),
        }
    }

    fn starter_view(&self) -> Element<'_, Message> {
        let open_row = row![
            text_input("Plan id", &self.starter.plan_input)
                .on_input(Message::OpenPlanInputChanged)
                .on_submit(Message::OpenPlanRequested)
                .width(Length::Fill),
            button("Open").on_press(Message::OpenPlanRequested),
        ]
        .spacing(8)
        .align_y(Vertical::Center);

        let mut content = column![text("Plan stories").size(28), open_row].spacing(16);

        if let Some(notice) = &self.starter.notice {
            content = content.push(text(notice.as_str()));
        }

        if !self.starter.recent.is_empty() {
            let recent = self.starter.recent.iter().fold(
                Column::new().spacing(6).push(text("Recent plans").size(18)),
                |list, plan_id| {
                    list.push(
                        button(text(plan_id.as_str()))
                            .width(Length::Fill)
                            .on_press(Message::OpenPlan(plan_id.clone())),
                    )
                },
            );
            content = content.push(scrollable(recent).height(Length::Fill));
        }

        container(content)
            .padding(24)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn viewer_view<'a>(&'a self, screen: &'a ViewerScreen) -> Element<'a, Message> {
        let close = button("Close").on_press(Message::CloseViewer);

        if screen.is_loading() {
            return centered(column![text("Loading plan…"), close].spacing(12));
        }
        if let Some(error) = &screen.load_error {
            return centered(
                column![
                    text(format!("Could not load plan {}", screen.plan_id)).size(20),
                    text(error.as_str()),
                    close
                ]
                .spacing(12),
            );
        }
        let (Some(detail), Some(controller)) = (&screen.detail, &screen.controller) else {
            return centered(close);
        };

        let header = row![
            column![
                text(detail.title.as_str()).size(20),
                text(detail.location_label.as_str()).size(14),
            ]
            .spacing(2),
            horizontal_space(),
            text(status_label(controller)).size(14),
            close,
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        let engagement = screen.engagement.state();
        let like_label = if engagement.liked {
            format!("♥ {}", engagement.count)
        } else {
            format!("♡ {}", engagement.count)
        };
        let like_button = if screen.engagement.is_mutating() {
            button(text(like_label))
        } else {
            button(text(like_label)).on_press(Message::ToggleLike)
        };
        let footer = row![
            like_button,
            button(text(format!("Comments {}", screen.comment_count)))
                .on_press(Message::ToggleComments),
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        let base = column![
            progress_strip(controller),
            header,
            slide_area(screen),
            footer
        ]
        .spacing(10)
        .padding(12)
        .width(Length::Fill)
        .height(Length::Fill);

        if screen.panel.is_open() {
            let overlay = column![
                Space::with_height(Length::FillPortion(2)),
                self.comment_panel(&screen.panel)
            ]
            .height(Length::Fill);
            stack![base, overlay].into()
        } else {
            base.into()
        }
    }

    fn comment_panel<'a>(&'a self, panel: &'a CommentPanel) -> Element<'a, Message> {
        let header = row![
            text(format!("Comments ({})", panel.comments().len())).size(18),
            horizontal_space(),
            button("Close").on_press(Message::CloseComments),
        ]
        .align_y(Vertical::Center);

        let mut body = Column::new().spacing(8);
        if panel.is_loading() && panel.comments().is_empty() {
            body = body.push(text("Loading comments…"));
        } else if panel.comments().is_empty() {
            body = body.push(text("No comments yet."));
        }
        for comment in panel.thread() {
            body = body.push(self.comment_row(panel, comment));
        }

        let mut content = column![header, scrollable(body).height(Length::Fill)].spacing(10);

        if let Some(error) = panel.last_error() {
            content = content.push(
                row![
                    text(error).size(14),
                    horizontal_space(),
                    button("Dismiss").on_press(Message::DismissCommentError),
                ]
                .align_y(Vertical::Center),
            );
        }
        if let Some(target) = panel.reply_target() {
            content = content.push(
                row![
                    text(format!("Replying to {}", target.author_name)).size(14),
                    horizontal_space(),
                    button("Cancel").on_press(Message::CancelReply),
                ]
                .align_y(Vertical::Center),
            );
        }
        content = content.push(
            row![
                text_input("Add a comment", panel.draft())
                    .on_input(Message::DraftChanged)
                    .on_submit(Message::SubmitComment)
                    .width(Length::Fill),
                button("Send").on_press(Message::SubmitComment),
            ]
            .spacing(8),
        );

        container(content)
            .padding(16)
            .width(Length::Fill)
            .height(Length::FillPortion(3))
            .style(container::rounded_box)
            .into()
    }

    fn comment_row<'a>(&'a self, panel: &'a CommentPanel, comment: &'a Comment) -> Element<'a, Message> {
        let mut actions = Row::new()
            .spacing(8)
            .push(button(text("Reply").size(13)).on_press(Message::BeginReply(comment.id.clone())));
        if comment.is_root() {
            let replies = panel.reply_count(&comment.id);
            if replies > 0 {
                let label = if panel.is_expanded(&comment.id) {
                    "Hide replies".to_string()
                } else {
                    format!("View {replies} replies")
                };
                actions = actions.push(
                    button(text(label).size(13))
                        .on_press(Message::ToggleReplies(comment.id.clone())),
                );
            }
        }
        if comment.author_id == self.config.viewer_id {
            actions = actions.push(
                button(text("Delete").size(13)).on_press(Message::DeleteComment(comment.id.clone())),
            );
        }

        let entry = column![
            row![
                text(comment.author_name.as_str()).size(14),
                text(comment.created_at.as_str()).size(11),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            text(comment.content.as_str()),
            actions,
        ]
        .spacing(4);

        let indent = if comment.is_root() { 0.0 } else { REPLY_INDENT };
        container(entry)
            .padding(Padding {
                left: indent,
                ..Padding::ZERO
            })
            .into()
    }
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn progress_strip(controller: &PlaybackController) -> Element<'_, Message> {
    controller
        .progress()
        .values()
        .iter()
        .fold(Row::new().spacing(4), |strip, value| {
            strip.push(
                progress_bar(0.0..=f32::from(PROGRESS_COMPLETE), f32::from(*value))
                    .height(Length::Fixed(4.0))
                    .width(Length::Fill),
            )
        })
        .into()
}

fn slide_area(screen: &ViewerScreen) -> Element<'_, Message> {
    let Some(index) = screen.current_index() else {
        return Space::new(Length::Fill, Length::Fill).into();
    };
    let content: Element<'_, Message> = match screen.images.get(&index) {
        Some(SlideImage::Ready(handle)) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        Some(SlideImage::Failed(error)) => text(format!("Slide unavailable: {error}")).into(),
        Some(SlideImage::Loading) | None => text("Loading slide…").into(),
    };
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn status_label(controller: &PlaybackController) -> String {
    let session = controller.session();
    let position = format!("{}/{}", session.current_index + 1, controller.slide_count());
    if session.is_holding {
        format!("{position} · paused")
    } else {
        position
    }
}
