use crate::utils::selection::DEFAULT_TIMEOUT;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub ability_data: String,
    pub character_data: String,
    pub item_data: String,
    pub usage_log: String,
    pub bot_log: Option<String>,
    pub log_level: String,
    pub selection_timeout_secs: u64,
    pub activity: String,
    pub footer: String,
    pub item_notice: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            ability_data: "abilities.json".to_string(),
            character_data: "characters.json".to_string(),
            item_data: "items.json".to_string(),
            usage_log: "command_logs.txt".to_string(),
            bot_log: Some("bot.log".to_string()),
            log_level: "info".to_string(),
            selection_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            activity: "for inquiries.".to_string(),
            footer: "*Support this bot: <:nerdhaven:973228882805268571> <https://www.buymeacoffee.com/nerdhaven>*".to_string(),
            item_notice: "*This feature is still in development and may have missing information or contain errors.*".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    /// 職業名稱（abilitysearch 以此比對）
    #[serde(default, deserialize_with = "text")]
    pub character: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub emoji: Option<String>,
    #[serde(rename = "imageURL", default, deserialize_with = "optional_text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub level: String,
    #[serde(default, deserialize_with = "locked_flag")]
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// 職業查詢鍵
    #[serde(default, deserialize_with = "text")]
    pub character: String,
    /// 未解鎖前也能公開的顯示名稱
    #[serde(default, deserialize_with = "text")]
    pub character_name: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub ancestry: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub emoji: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub expansion: String,
    #[serde(default, deserialize_with = "text")]
    pub creator: String,
    #[serde(rename = "frontURL", default, deserialize_with = "text")]
    pub front_url: String,
    #[serde(rename = "backURL", default, deserialize_with = "text")]
    pub back_url: String,
    #[serde(rename = "deckURL", default, deserialize_with = "text")]
    pub deck_url: String,
    #[serde(rename = "extraURL", default, deserialize_with = "optional_text")]
    pub extra_url: Option<String>,
    #[serde(default, deserialize_with = "locked_flag")]
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub expansion: String,
    #[serde(default, deserialize_with = "text")]
    pub count: String,
    #[serde(default, deserialize_with = "text")]
    pub slot: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub item_type: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub cost: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub negative_modifiers: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub faq: Option<String>,
    #[serde(rename = "frontURL", default, deserialize_with = "optional_text")]
    pub front_url: Option<String>,
    #[serde(rename = "backURL", default, deserialize_with = "optional_text")]
    pub back_url: Option<String>,
    #[serde(default, deserialize_with = "locked_flag")]
    pub locked: bool,
}

/// 物品卡的使用方式標記
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Spent,
    Loss,
    Remove,
    Flip,
}

impl ItemType {
    /// 不認得的標記回傳 None，不視為錯誤
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "spent" => Some(Self::Spent),
            "loss" => Some(Self::Loss),
            "remove" => Some(Self::Remove),
            "flip" => Some(Self::Flip),
            _ => None,
        }
    }

    pub fn icons(self) -> &'static str {
        match self {
            Self::Spent => "<:card_spent:1007832312320381040>",
            Self::Loss => "<:card_loss:973231480757157918>",
            Self::Remove => "<:card_loss:973231480757157918> <:card_remove:1007832506659262517>",
            Self::Flip => "<:card_flip:1007832399738044556>",
        }
    }
}

impl Item {
    pub fn kind(&self) -> Option<ItemType> {
        self.item_type.as_deref().and_then(ItemType::from_tag)
    }
}

// 資料檔裡的欄位有時是字串、有時是數字
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_text)
        .unwrap_or_default())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_text)
        .filter(|s| !s.trim().is_empty()))
}

fn locked_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => false,
        Some(Scalar::Flag(b)) => b,
        Some(other) => !other.into_text().trim().is_empty(),
    })
}
