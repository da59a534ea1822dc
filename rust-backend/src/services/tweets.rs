use log::info;
use uuid::Uuid;

use super::{ensure_owner, require_text};
use crate::error::{ApiError, ApiResult};
use crate::models::Tweet;
use crate::store::EntityStore;

pub async fn create_tweet(store: &dyn EntityStore, actor: Uuid, content: Option<String>) -> ApiResult<Tweet> {
    let content = require_text("Content", content)?;
    let tweet = store.insert_tweet(actor, content).await?;
    info!("User {} posted tweet {}", actor, tweet.id);
    Ok(tweet)
}

pub async fn user_tweets(store: &dyn EntityStore, user_id: Uuid) -> ApiResult<Vec<Tweet>> {
    if store.find_user(user_id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }
    Ok(store.tweets_by_owner(user_id).await?)
}

pub async fn update_tweet(
    store: &dyn EntityStore,
    actor: Uuid,
    tweet_id: Uuid,
    content: Option<String>,
) -> ApiResult<Tweet> {
    let content = require_text("Content", content)?;
    let tweet = store
        .find_tweet(tweet_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tweet not found"))?;
    ensure_owner(tweet.owner, actor, "update this tweet")?;

    store
        .update_tweet(tweet_id, content)
        .await?
        .ok_or_else(|| ApiError::not_found("Tweet not found"))
}

pub async fn delete_tweet(store: &dyn EntityStore, actor: Uuid, tweet_id: Uuid) -> ApiResult<()> {
    let tweet = store
        .find_tweet(tweet_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tweet not found"))?;
    ensure_owner(tweet.owner, actor, "delete this tweet")?;

    store
        .delete_tweet(tweet_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tweet not found"))?;
    info!("User {} deleted tweet {}", actor, tweet_id);
    Ok(())
}
