//! Games: sending, scoring and high score tables.

use serde::Serialize;
use serde_json::json;

use super::editing::EditedMessage;
use super::error::ApiError;
use super::params::{merge, MessageTarget, SendOptions};
use super::Api;
use crate::types::{GameHighScore, Message};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SetGameScoreOptions {
    /// Allow the score to decrease.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_edit_message: Option<bool>,
}

impl Api {
    /// `game_short_name` is the name set up with BotFather. Games can only go to private chats by id.
    pub async fn send_game(
        &self,
        chat_id: i64,
        game_short_name: &str,
        options: &SendOptions,
    ) -> Result<Message, ApiError> {
        let mut body = json!({ "chat_id": chat_id, "game_short_name": game_short_name });
        merge(&mut body, options)?;
        self.post("sendGame", &body).await
    }

    pub async fn set_game_score(
        &self,
        user_id: i64,
        score: i64,
        target: &MessageTarget,
        options: &SetGameScoreOptions,
    ) -> Result<EditedMessage, ApiError> {
        let mut body = target.to_body();
        body["user_id"] = json!(user_id);
        body["score"] = json!(score);
        merge(&mut body, options)?;
        self.post("setGameScore", &body).await
    }

    pub async fn get_game_high_scores(
        &self,
        user_id: i64,
        target: &MessageTarget,
    ) -> Result<Vec<GameHighScore>, ApiError> {
        let mut body = target.to_body();
        body["user_id"] = json!(user_id);
        self.post("getGameHighScores", &body).await
    }
}
