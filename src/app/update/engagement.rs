use super::super::messages::ViewerId;
use super::super::state::App;
use super::Effect;
use tracing::debug;

impl App {
    pub(super) fn handle_toggle_like(&mut self, effects: &mut Vec<Effect>) {
        let Some(screen) = self.viewer.as_mut() else {
            return;
        };
        if screen.detail.is_none() {
            return;
        }
        let (_, request) = screen.engagement.toggle();
        if let Some(request) = request {
            effects.push(Effect::SendEngagement {
                viewer: screen.id,
                plan_id: screen.plan_id.clone(),
                request,
            });
        }
    }

    pub(super) fn handle_like_resolved(
        &mut self,
        viewer: ViewerId,
        ticket: u64,
        result: Result<(), String>,
    ) {
        let Some(screen) = self.viewer_mut(viewer) else {
            debug!(viewer, ticket, "Discarding engagement result for a closed viewer");
            return;
        };
        let state = screen.engagement.resolve(ticket, &result);
        debug!(viewer, ticket, liked = state.liked, count = state.count, "Engagement settled");
    }
}
