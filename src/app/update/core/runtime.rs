use super::super::super::messages::{CommentAction, Message, PointerPhase};
use super::super::super::state::App;
use super::super::Effect;
use crate::cache::remember_plan;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::mouse;
use iced::touch;
use iced::window;
use std::sync::Arc;
use tracing::{debug, info};

/// Run a blocking provider call on tokio's blocking pool.
async fn run_blocking<T, F>(job: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(result) => result.map_err(|err| format!("{err:#}")),
        Err(err) => Err(format!("provider task failed: {err}")),
    }
}

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::FetchPlan { viewer, plan_id } => {
                let provider = Arc::clone(&self.provider);
                let viewer_id = self.config.viewer_id.clone();
                debug!(viewer, %plan_id, "Dispatching plan detail fetch");
                Task::perform(
                    run_blocking(move || provider.fetch_plan_detail(&plan_id, &viewer_id)),
                    move |result| Message::PlanLoaded { viewer, result },
                )
            }
            Effect::FetchComments { viewer, plan_id } => {
                let provider = Arc::clone(&self.provider);
                Task::perform(
                    run_blocking(move || provider.fetch_comments(&plan_id)),
                    move |result| Message::CommentsLoaded { viewer, result },
                )
            }
            Effect::LoadSlideImage {
                viewer,
                index,
                image_ref,
            } => {
                let provider = Arc::clone(&self.provider);
                Task::perform(
                    run_blocking(move || provider.load_image(&image_ref)),
                    move |result| Message::SlideImageLoaded {
                        viewer,
                        index,
                        result,
                    },
                )
            }
            Effect::ScheduleAdvance { viewer, task } => {
                self.abort_pending_advance();
                let stamp = task.stamp;
                let after = task.after;
                let (timer, handle) = Task::perform(
                    async move { tokio::time::sleep(after).await },
                    move |_| Message::AdvanceDue { viewer, stamp },
                )
                .abortable();
                self.advance_handle = Some(handle);
                timer
            }
            Effect::CancelAdvance => {
                self.abort_pending_advance();
                Task::none()
            }
            Effect::ScheduleHoldCheck { viewer, task } => {
                let stamp = task.stamp;
                let after = task.after;
                Task::perform(
                    async move { tokio::time::sleep(after).await },
                    move |_| Message::HoldCheckDue { viewer, stamp },
                )
            }
            Effect::PostComment {
                viewer,
                plan_id,
                submission,
            } => {
                let provider = Arc::clone(&self.provider);
                let viewer_id = self.config.viewer_id.clone();
                Task::perform(
                    run_blocking(move || {
                        provider.post_comment(
                            &plan_id,
                            &viewer_id,
                            &submission.content,
                            submission.parent_id.as_deref(),
                        )
                    }),
                    move |result| Message::CommentMutationFinished {
                        viewer,
                        action: CommentAction::Post,
                        result,
                    },
                )
            }
            Effect::DeleteComment {
                viewer,
                plan_id,
                comment_id,
            } => {
                let provider = Arc::clone(&self.provider);
                let viewer_id = self.config.viewer_id.clone();
                Task::perform(
                    run_blocking(move || provider.delete_comment(&plan_id, &comment_id, &viewer_id)),
                    move |result| Message::CommentMutationFinished {
                        viewer,
                        action: CommentAction::Delete,
                        result,
                    },
                )
            }
            Effect::SendEngagement {
                viewer,
                plan_id,
                request,
            } => {
                let provider = Arc::clone(&self.provider);
                let viewer_id = self.config.viewer_id.clone();
                let ticket = request.ticket;
                let action = request.action;
                info!(viewer, ticket, %action, "Dispatching engagement request");
                Task::perform(
                    run_blocking(move || match action {
                        crate::engagement::EngagementAction::Like => {
                            provider.like(&plan_id, &viewer_id)
                        }
                        crate::engagement::EngagementAction::Unlike => {
                            provider.unlike(&plan_id, &viewer_id)
                        }
                    }),
                    move |result| Message::LikeResolved {
                        viewer,
                        ticket,
                        result,
                    },
                )
            }
            Effect::RememberPlan(plan_id) => {
                remember_plan(&plan_id);
                self.refresh_recent_plans();
                Task::none()
            }
            Effect::QuitSafely => {
                self.abort_pending_advance();
                info!("Quitting");
                iced::exit()
            }
        }
    }

    fn abort_pending_advance(&mut self) {
        if let Some(handle) = self.advance_handle.take() {
            handle.abort();
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if let Event::Window(window::Event::Resized(size)) = event {
        return Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        });
    }
    if status == event::Status::Captured {
        return None;
    }
    let pointer = |phase: PointerPhase, position: Option<iced::Point>| {
        Some(Message::Pointer { phase, position })
    };
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        Event::Mouse(mouse::Event::CursorMoved { position }) => {
            pointer(PointerPhase::Moved, Some(position))
        }
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            pointer(PointerPhase::Down, None)
        }
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            pointer(PointerPhase::Up, None)
        }
        Event::Mouse(mouse::Event::CursorLeft) => pointer(PointerPhase::Lost, None),
        Event::Touch(touch::Event::FingerPressed { position, .. }) => {
            pointer(PointerPhase::Down, Some(position))
        }
        Event::Touch(touch::Event::FingerMoved { position, .. }) => {
            pointer(PointerPhase::Moved, Some(position))
        }
        Event::Touch(touch::Event::FingerLifted { position, .. }) => {
            pointer(PointerPhase::Up, Some(position))
        }
        Event::Touch(touch::Event::FingerLost { .. }) => pointer(PointerPhase::Lost, None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{Point, Size};

    fn window_id() -> window::Id {
        window::Id::unique()
    }

    #[test]
    fn captured_input_is_dropped_but_resize_is_not() {
        let released = Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));
        assert!(runtime_event_to_message(released, event::Status::Captured, window_id()).is_none());

        let resized = Event::Window(window::Event::Resized(Size::new(390.0, 844.0)));
        assert!(matches!(
            runtime_event_to_message(resized, event::Status::Captured, window_id()),
            Some(Message::WindowResized { width, .. }) if width == 390.0
        ));
    }

    #[test]
    fn touch_events_carry_their_position() {
        let lifted = Event::Touch(touch::Event::FingerLifted {
            id: touch::Finger(7),
            position: Point::new(12.0, 34.0),
        });
        assert!(matches!(
            runtime_event_to_message(lifted, event::Status::Ignored, window_id()),
            Some(Message::Pointer {
                phase: PointerPhase::Up,
                position: Some(position),
            }) if position == Point::new(12.0, 34.0)
        ));
    }
}
