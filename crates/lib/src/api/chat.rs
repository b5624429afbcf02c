//! Chat administration, membership queries, callback answers and the command menu.

use serde::Serialize;
use serde_json::json;

use super::error::ApiError;
use super::params::{merge, ChatId};
use super::Api;
use crate::types::{BotCommand, Chat, ChatMember, ChatPermissions, InputFile};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromoteChatMemberOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_anonymous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_change_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_post_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_edit_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_delete_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_invite_users: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_restrict_members: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_pin_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_promote_members: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnswerCallbackQueryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_alert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<i64>,
}

impl AnswerCallbackQueryOptions {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

impl Api {
    /// Ban a user. `until_date` is Unix time; None bans forever.
    pub async fn kick_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        until_date: Option<i64>,
    ) -> Result<bool, ApiError> {
        let mut body = json!({ "chat_id": chat_id.into(), "user_id": user_id });
        if let Some(until) = until_date {
            body["until_date"] = json!(until);
        }
        self.post("kickChatMember", &body).await
    }

    pub async fn unban_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        only_if_banned: bool,
    ) -> Result<bool, ApiError> {
        let body = json!({
            "chat_id": chat_id.into(),
            "user_id": user_id,
            "only_if_banned": only_if_banned,
        });
        self.post("unbanChatMember", &body).await
    }

    pub async fn restrict_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        permissions: &ChatPermissions,
        until_date: Option<i64>,
    ) -> Result<bool, ApiError> {
        let mut body = json!({
            "chat_id": chat_id.into(),
            "user_id": user_id,
            "permissions": permissions,
        });
        if let Some(until) = until_date {
            body["until_date"] = json!(until);
        }
        self.post("restrictChatMember", &body).await
    }

    pub async fn promote_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        options: &PromoteChatMemberOptions,
    ) -> Result<bool, ApiError> {
        let mut body = json!({ "chat_id": chat_id.into(), "user_id": user_id });
        merge(&mut body, options)?;
        self.post("promoteChatMember", &body).await
    }

    pub async fn set_chat_administrator_custom_title(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        custom_title: &str,
    ) -> Result<bool, ApiError> {
        let body = json!({
            "chat_id": chat_id.into(),
            "user_id": user_id,
            "custom_title": custom_title,
        });
        self.post("setChatAdministratorCustomTitle", &body).await
    }

    pub async fn set_chat_permissions(
        &self,
        chat_id: impl Into<ChatId>,
        permissions: &ChatPermissions,
    ) -> Result<bool, ApiError> {
        let body = json!({ "chat_id": chat_id.into(), "permissions": permissions });
        self.post("setChatPermissions", &body).await
    }

    pub async fn export_chat_invite_link(&self, chat_id: impl Into<ChatId>) -> Result<String, ApiError> {
        self.post("exportChatInviteLink", &json!({ "chat_id": chat_id.into() }))
            .await
    }

    pub async fn set_chat_photo(
        &self,
        chat_id: impl Into<ChatId>,
        photo: &InputFile,
    ) -> Result<bool, ApiError> {
        if !photo.is_upload() {
            return Err(ApiError::InvalidInput(
                "chat photo must be uploaded, not referenced".into(),
            ));
        }
        let body = json!({ "chat_id": chat_id.into() });
        self.post_files("setChatPhoto", body, &[("photo", photo)], &[])
            .await
    }

    pub async fn delete_chat_photo(&self, chat_id: impl Into<ChatId>) -> Result<bool, ApiError> {
        self.post("deleteChatPhoto", &json!({ "chat_id": chat_id.into() }))
            .await
    }

    pub async fn set_chat_title(&self, chat_id: impl Into<ChatId>, title: &str) -> Result<bool, ApiError> {
        self.post("setChatTitle", &json!({ "chat_id": chat_id.into(), "title": title }))
            .await
    }

    pub async fn set_chat_description(
        &self,
        chat_id: impl Into<ChatId>,
        description: &str,
    ) -> Result<bool, ApiError> {
        let body = json!({ "chat_id": chat_id.into(), "description": description });
        self.post("setChatDescription", &body).await
    }

    pub async fn pin_chat_message(
        &self,
        chat_id: impl Into<ChatId>,
        message_id: i64,
        disable_notification: bool,
    ) -> Result<bool, ApiError> {
        let body = json!({
            "chat_id": chat_id.into(),
            "message_id": message_id,
            "disable_notification": disable_notification,
        });
        self.post("pinChatMessage", &body).await
    }

    /// Unpin one message, or the most recent pinned message when `message_id` is None.
    pub async fn unpin_chat_message(
        &self,
        chat_id: impl Into<ChatId>,
        message_id: Option<i64>,
    ) -> Result<bool, ApiError> {
        let mut body = json!({ "chat_id": chat_id.into() });
        if let Some(id) = message_id {
            body["message_id"] = json!(id);
        }
        self.post("unpinChatMessage", &body).await
    }

    pub async fn unpin_all_chat_messages(&self, chat_id: impl Into<ChatId>) -> Result<bool, ApiError> {
        self.post("unpinAllChatMessages", &json!({ "chat_id": chat_id.into() }))
            .await
    }

    pub async fn leave_chat(&self, chat_id: impl Into<ChatId>) -> Result<bool, ApiError> {
        self.post("leaveChat", &json!({ "chat_id": chat_id.into() }))
            .await
    }

    pub async fn get_chat(&self, chat_id: impl Into<ChatId>) -> Result<Chat, ApiError> {
        self.post("getChat", &json!({ "chat_id": chat_id.into() }))
            .await
    }

    pub async fn get_chat_administrators(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<Vec<ChatMember>, ApiError> {
        self.post("getChatAdministrators", &json!({ "chat_id": chat_id.into() }))
            .await
    }

    pub async fn get_chat_members_count(&self, chat_id: impl Into<ChatId>) -> Result<i64, ApiError> {
        self.post("getChatMembersCount", &json!({ "chat_id": chat_id.into() }))
            .await
    }

    pub async fn get_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
    ) -> Result<ChatMember, ApiError> {
        let body = json!({ "chat_id": chat_id.into(), "user_id": user_id });
        self.post("getChatMember", &body).await
    }

    pub async fn set_chat_sticker_set(
        &self,
        chat_id: impl Into<ChatId>,
        sticker_set_name: &str,
    ) -> Result<bool, ApiError> {
        let body = json!({ "chat_id": chat_id.into(), "sticker_set_name": sticker_set_name });
        self.post("setChatStickerSet", &body).await
    }

    pub async fn delete_chat_sticker_set(&self, chat_id: impl Into<ChatId>) -> Result<bool, ApiError> {
        self.post("deleteChatStickerSet", &json!({ "chat_id": chat_id.into() }))
            .await
    }

    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        options: &AnswerCallbackQueryOptions,
    ) -> Result<bool, ApiError> {
        let mut body = json!({ "callback_query_id": callback_query_id });
        merge(&mut body, options)?;
        self.post("answerCallbackQuery", &body).await
    }

    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<bool, ApiError> {
        self.post("setMyCommands", &json!({ "commands": commands }))
            .await
    }

    pub async fn get_my_commands(&self) -> Result<Vec<BotCommand>, ApiError> {
        self.get("getMyCommands").await
    }
}
