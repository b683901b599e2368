use std::sync::Arc;
use tracing::instrument;

use crate::destinations::entities::DestinationId;
use crate::notifications::gateway::{NotificationError, NotificationGateway};
use crate::status::entities::Transition;

/// Text sent for a single status change.
pub fn render_transition(transition: &Transition) -> String {
    format!(
        "[Steam] Friend {} changed status: {} -> {}",
        transition.display_name,
        transition.from.label(),
        transition.to.label()
    )
}

pub struct NotificationService<G: NotificationGateway> {
    notification_gateway: Arc<G>,
}

impl<G: NotificationGateway> NotificationService<G> {
    pub fn new(notification_gateway: Arc<G>) -> Self {
        Self {
            notification_gateway,
        }
    }

    #[instrument(skip(self, transition), fields(account_id = %transition.account_id))]
    pub async fn send_transition_notification(
        &self,
        destination: &DestinationId,
        transition: &Transition,
    ) -> Result<(), NotificationError> {
        let text = render_transition(transition);
        self.notification_gateway
            .send_message(destination, &text)
            .await
    }
}
