//! Bot API data types: updates, messages, media, keyboards, inline mode, payments, passport.

pub mod inline;
pub mod input_file;
pub mod input_media;
pub mod keyboard;
pub mod media;
pub mod message;
pub mod passport;
pub mod payments;
pub mod update;
pub mod user;

pub use inline::{
    Caption, ChosenInlineResult, InlineQuery, InlineQueryResult, InlineQueryResultArticle,
    InlineQueryResultAudio, InlineQueryResultCachedAudio, InlineQueryResultCachedDocument,
    InlineQueryResultCachedGif, InlineQueryResultCachedMpeg4Gif, InlineQueryResultCachedPhoto,
    InlineQueryResultCachedSticker, InlineQueryResultCachedVideo, InlineQueryResultCachedVoice,
    InlineQueryResultContact, InlineQueryResultDocument, InlineQueryResultGame,
    InlineQueryResultGif, InlineQueryResultLocation, InlineQueryResultMpeg4Gif,
    InlineQueryResultPhoto, InlineQueryResultVenue, InlineQueryResultVideo,
    InlineQueryResultVoice, InputContactMessageContent, InputLocationMessageContent,
    InputMessageContent, InputTextMessageContent, InputVenueMessageContent, Thumb,
};
pub use input_file::InputFile;
pub use input_media::{
    InputMedia, InputMediaAnimation, InputMediaAudio, InputMediaDocument, InputMediaPhoto,
    InputMediaVideo,
};
pub use keyboard::{
    CallbackGame, CallbackQuery, ForceReply, InlineKeyboardButton, InlineKeyboardMarkup,
    KeyboardButton, KeyboardButtonPollType, LoginUrl, ReplyKeyboardMarkup, ReplyKeyboardRemove,
};
pub use media::{
    Animation, Audio, Contact, Dice, Document, Game, GameHighScore, Location, MaskPosition,
    PhotoSize, Poll, PollAnswer, PollOption, PollType, ProximityAlertTriggered, Sticker, Venue,
    Video, VideoNote, Voice,
};
pub use message::{Message, MessageContent, MessageEntity, MessageKind, ParseMode, BOT_COMMAND_ENTITY};
pub use passport::{
    EncryptedCredentials, EncryptedPassportElement, PassportData, PassportElementError,
    PassportFile,
};
pub use payments::{
    Invoice, LabeledPrice, OrderInfo, PreCheckoutQuery, ShippingAddress, ShippingOption,
    ShippingQuery, SuccessfulPayment,
};
pub use update::{Update, UpdateKind, WebhookInfo};
pub use user::{
    BotCommand, Chat, ChatMember, ChatPermissions, ChatPhoto, ChatType, File, MemberStatus, User,
    UserProfilePhotos,
};
