use crate::models::types::{Ability, BotConfig, Character, Item};

/// Discord 的劇透標記
pub const SPOILER: &str = "||";

/// Discord 單則訊息的字數上限
pub const MESSAGE_LIMIT: usize = 2000;

const GOLD_ICON: &str = "<:resource_gold:1007833160672890881>";
const MINUS_ONE_ICON: &str = "<:AMD_minus1:1074840250003750912>";

/// 把查詢結果排成回覆文字，每則回覆都以贊助頁尾結束
#[derive(Debug, Clone)]
pub struct ReplyFormatter {
    footer: String,
    item_notice: String,
}

impl ReplyFormatter {
    pub fn new(footer: impl Into<String>, item_notice: impl Into<String>) -> Self {
        Self {
            footer: footer.into(),
            item_notice: item_notice.into(),
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(config.footer.clone(), config.item_notice.clone())
    }

    #[cfg(test)]
    pub fn footer(&self) -> &str {
        &self.footer
    }

    /// 鎖定的技能只露出表情符號，名稱與職業藏在劇透裡
    pub fn ability(&self, ability: &Ability) -> String {
        let emoji = ability.emoji.as_deref().unwrap_or_default();
        let image = ability.image_url.as_deref().unwrap_or_default();

        let mut message = if ability.locked {
            format!(
                "**SPOILER:** {}\n{SPOILER}**Ability Name:** {}\n**Class:** {}\n{} {SPOILER}",
                emoji, ability.name, ability.character, image
            )
        } else {
            format!(
                "**Ability Name:** {}\n**Class:** {} {}\n{}",
                ability.name, ability.character, emoji, image
            )
        };

        message.push('\n');
        message.push_str(&self.footer);
        message
    }

    pub fn ability_search(&self, abilities: &[&Ability]) -> String {
        let mut lines: Vec<String> = abilities
            .iter()
            .map(|ability| {
                let image = ability.image_url.as_deref().unwrap_or_default();
                if ability.locked {
                    format!("{SPOILER}{image}{SPOILER}")
                } else {
                    image.to_string()
                }
            })
            .collect();
        lines.push(self.footer.clone());
        lines.join("\n")
    }

    /// 鎖定的職業只公開顯示名稱與擴充，族裔與真正職業名藏在劇透裡
    pub fn character(&self, character: &Character) -> String {
        let emoji = character.emoji.as_deref().unwrap_or_default();
        let ancestry = character.ancestry.as_deref().unwrap_or_default();

        let mut message = if character.locked {
            format!(
                "**Class Name:** {} {}\n**Expansion:** {}\n{SPOILER}**Locked Class Name:** {} {}\n",
                character.character_name, emoji, character.expansion, ancestry, character.character
            )
        } else {
            format!(
                "**Class Name:** {} {} {}\n**Expansion:** {}\n",
                ancestry, character.character_name, emoji, character.expansion
            )
        };

        message.push_str(&format!(
            "**Designer:** {}\n**Mat Front:** {}\n**Mat Back:** {}\n**Cards:** {}",
            character.creator, character.front_url, character.back_url, character.deck_url
        ));

        if let Some(extra) = &character.extra_url {
            message.push('\n');
            message.push_str(extra);
        }

        if character.locked {
            message.push(' ');
            message.push_str(SPOILER);
        }

        message.push('\n');
        message.push_str(&self.footer);
        message
    }

    pub fn class_info(&self, characters: &[&Character]) -> String {
        characters
            .iter()
            .map(|character| self.character(character))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn item(&self, item: &Item) -> String {
        let mut message = String::new();

        if item.locked {
            message.push_str(SPOILER);
            message.push(' ');
        }

        message.push_str(&format!(
            "**Item Name:** {}\n**Item Number:** {}\n**Expansion:** {}\n**Item Count:** {}\n**Slot:** {}\n**Item Text:** {}",
            item.name, item.id, item.expansion, item.count, item.slot, item.description
        ));

        if let Some(kind) = item.kind() {
            message.push_str(&format!("\n**Item Type:** {}", kind.icons()));
        }
        if let Some(source) = &item.source {
            message.push_str(&format!("\n**Source:** {}", source));
        }
        if let Some(cost) = &item.cost {
            message.push_str(&format!("\n**Cost:** {} {}", GOLD_ICON, cost));
        }
        if let Some(modifiers) = &item.negative_modifiers {
            message.push_str(&format!(
                "\n**Negative Item Effects**: Add {} {} Modifiers.",
                modifiers, MINUS_ONE_ICON
            ));
        }
        if let Some(faq) = &item.faq {
            message.push_str(&format!("\n**FAQ:** {}", faq));
        }
        for url in [&item.front_url, &item.back_url].into_iter().flatten() {
            message.push('\n');
            message.push_str(url);
        }

        if item.locked {
            message.push(' ');
            message.push_str(SPOILER);
        }

        message.push('\n');
        message.push_str(&self.item_notice);
        message.push('\n');
        message.push_str(&self.footer);
        message
    }
}

impl Default for ReplyFormatter {
    fn default() -> Self {
        Self::from_config(&BotConfig::default())
    }
}

/// 依行切割過長的回覆；單行超過上限時硬切。
///
/// 切點落在劇透區段內時，前一段補上結尾標記、下一段補上開頭標記，
/// 每段的 `||` 數量都是偶數。
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if !text.contains(SPOILER) {
        return split_lines(text, limit);
    }

    // 預留頭尾各一組標記的空間
    let budget = limit.saturating_sub(2 * SPOILER.len()).max(1);
    let mut open = false;
    split_lines(text, budget)
        .into_iter()
        .map(|chunk| {
            let mut balanced = String::with_capacity(chunk.len() + 2 * SPOILER.len());
            if open {
                balanced.push_str(SPOILER);
            }
            balanced.push_str(&chunk);
            if chunk.matches(SPOILER).count() % 2 == 1 {
                open = !open;
            }
            if open {
                balanced.push_str(SPOILER);
            }
            balanced
        })
        .collect()
}

fn split_lines(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        let needed = if current.is_empty() {
            line.chars().count()
        } else {
            current.chars().count() + 1 + line.chars().count()
        };

        if needed <= limit {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        let mut rest: Vec<char> = line.chars().collect();
        while rest.len() > limit {
            let tail = rest.split_off(limit);
            chunks.push(rest.into_iter().collect());
            rest = tail;
        }
        current = rest.into_iter().collect();
    }

    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}
