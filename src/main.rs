mod bot;
mod models;
mod utils;

use std::env;
use std::sync::Arc;

use anyhow::{Context as _, anyhow};
use poise::serenity_prelude as serenity;

use crate::bot::data::BotData;
use crate::utils::catalog::Catalog;
use crate::utils::config::ConfigManager;
use crate::utils::format::ReplyFormatter;
use crate::utils::usage_log::UsageLogger;

#[tokio::main]
async fn main() -> Result<(), bot::Error> {
    dotenvy::dotenv().ok();

    let config_manager = ConfigManager::new("config.json")
        .map_err(|e| anyhow!("設定管理器初始化失敗: {}", e))?;
    let selection_timeout = config_manager.selection_timeout();
    let config = config_manager.into_config();

    if let Err(e) = utils::logger::BotLogger::init(config.bot_log.as_deref(), &config.log_level) {
        eprintln!("日誌初始化失敗: {}", e);
    }

    let token = env::var("DISCORD_TOKEN")
        .or_else(|_| env::var("TOKEN"))
        .map_err(|_| anyhow!("預期 DISCORD_TOKEN 環境變數，但找不到!"))?;

    let catalog = Catalog::load(&config).context("載入參考資料失敗")?;

    let data = BotData {
        catalog: Arc::new(catalog),
        formatter: ReplyFormatter::from_config(&config),
        usage_log: Arc::new(UsageLogger::new(&config.usage_log)),
        selection_timeout,
    };
    let activity = config.activity.clone();

    let intents = serenity::GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: crate::bot::commands(),
            pre_command: |ctx| Box::pin(bot::hooks::record_usage(ctx)),
            on_error: |error| Box::pin(bot::hooks::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                // 註冊失敗不影響已註冊過的指令，繼續執行
                match poise::builtins::register_globally(ctx, &framework.options().commands).await
                {
                    Ok(()) => log::info!("已註冊 {} 個斜線指令", framework.options().commands.len()),
                    Err(e) => log::error!("註冊斜線指令失敗: {}", e),
                }
                ctx.set_activity(Some(serenity::ActivityData::listening(activity)));
                log::info!("{} 已經上線!", ready.user.tag());
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .map_err(|e| anyhow!("建立 Discord 客戶端失敗: {}", e))?;

    client
        .start()
        .await
        .map_err(|e| anyhow!("機器人啟動失敗: {}", e))?;

    Ok(())
}
