use log::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{Subscription, Toggled};
use crate::store::EntityStore;

pub async fn toggle_subscription(
    store: &dyn EntityStore,
    actor: Uuid,
    channel_id: Uuid,
) -> ApiResult<Toggled<Subscription>> {
    if store.find_user(channel_id).await?.is_none() {
        return Err(ApiError::not_found("Channel not found"));
    }
    let outcome = store.toggle_subscription(channel_id, actor).await?;
    if let Toggled::Created(_) = outcome {
        info!("User {} subscribed to channel {}", actor, channel_id);
    } else {
        info!("User {} unsubscribed from channel {}", actor, channel_id);
    }
    Ok(outcome)
}

/// Subscription rows whose channel is `channel_id`.
pub async fn channel_subscribers(store: &dyn EntityStore, channel_id: Uuid) -> ApiResult<Vec<Subscription>> {
    if store.find_user(channel_id).await?.is_none() {
        return Err(ApiError::not_found("Channel not found"));
    }
    Ok(store.subscribers_of(channel_id).await?)
}

/// Subscription rows whose subscriber is `subscriber_id`.
pub async fn subscribed_channels(store: &dyn EntityStore, subscriber_id: Uuid) -> ApiResult<Vec<Subscription>> {
    if store.find_user(subscriber_id).await?.is_none() {
        return Err(ApiError::not_found("Subscriber not found"));
    }
    Ok(store.subscriptions_of(subscriber_id).await?)
}
