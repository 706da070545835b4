pub mod ability;
pub mod ability_search;
pub mod class_info;
pub mod item;

use crate::bot::{Context, Error};
use crate::utils::format::{MESSAGE_LIMIT, split_message};
use poise::CreateReply;

/// 空白參數視為未提供
pub(crate) fn provided(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}

/// 只有發出指令的人看得到的回覆
pub(crate) async fn say_private(ctx: Context<'_>, text: impl Into<String>) -> Result<(), Error> {
    ctx.send(CreateReply::default().content(text).ephemeral(true))
        .await?;
    Ok(())
}

/// 超過字數上限時拆成多則訊息
pub(crate) async fn say_long(ctx: Context<'_>, text: &str) -> Result<(), Error> {
    for chunk in split_message(text, MESSAGE_LIMIT) {
        ctx.say(chunk).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_parameters_are_not_provided() {
        assert_eq!(provided("Quake"), Some("Quake"));
        assert_eq!(provided(" Quake "), Some(" Quake "));
        assert_eq!(provided(""), None);
        assert_eq!(provided("   "), None);
    }
}
