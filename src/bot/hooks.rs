use crate::bot::data::BotData;
use crate::bot::{Context, Error};
use crate::utils::usage_log::{CommandUsage, Source};
use poise::{CreateReply, serenity_prelude as serenity};
use serde_json::Value;

/// 每個指令執行前寫一筆使用紀錄（背景寫入，不影響回覆）
pub async fn record_usage(ctx: Context<'_>) {
    let usage = CommandUsage {
        command: ctx.command().qualified_name.clone(),
        parameters: parameters(&ctx),
        source: if ctx.guild_id().is_some() {
            Source::Guild
        } else {
            Source::Dm
        },
        user: ctx.author().tag(),
    };
    log::info!("收到指令 /{} 來自 {}", usage.command, usage.user);
    ctx.data().usage_log.record(usage);
}

fn parameters(ctx: &Context<'_>) -> Vec<(String, Value)> {
    match ctx {
        poise::Context::Application(app) => app
            .args
            .iter()
            .map(|option| (option.name.to_string(), option_value(&option.value)))
            .collect(),
        poise::Context::Prefix(_) => Vec::new(),
    }
}

fn option_value(value: &serenity::ResolvedValue<'_>) -> Value {
    match value {
        serenity::ResolvedValue::String(s) => Value::from(*s),
        serenity::ResolvedValue::Integer(n) => Value::from(*n),
        serenity::ResolvedValue::Number(n) => Value::from(*n),
        serenity::ResolvedValue::Boolean(b) => Value::from(*b),
        other => Value::from(format!("{:?}", other)),
    }
}

pub async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            log::error!(
                "指令 /{} 執行錯誤: {:?}",
                ctx.command().qualified_name,
                error
            );
            let reply = CreateReply::default()
                .content("Something went wrong while handling that command.")
                .ephemeral(true);
            if let Err(why) = ctx.send(reply).await {
                log::error!("發送錯誤訊息失敗: {}", why);
            }
        }
        other => {
            if let Err(why) = poise::builtins::on_error(other).await {
                log::error!("處理框架錯誤失敗: {}", why);
            }
        }
    }
}
