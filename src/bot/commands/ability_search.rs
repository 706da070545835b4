use crate::bot::commands::{provided, say_long, say_private};
use crate::bot::{Context, Error};

/// Search for abilities by class name and level
#[poise::command(slash_command, rename = "abilitysearch")]
pub async fn ability_search(
    ctx: Context<'_>,
    #[description = "Class name"] class_name: String,
    #[description = "Ability level"] ability_level: String,
) -> Result<(), Error> {
    let (Some(class_name), Some(level)) = (provided(&class_name), provided(&ability_level)) else {
        return say_private(ctx, "Please provide a character name and level.").await;
    };

    let data = ctx.data();
    let found = data.catalog.search_abilities(class_name, level);
    log::info!("技能搜尋 {:?} 等級 {:?}: {} 筆符合", class_name, level, found.len());

    if found.is_empty() {
        return say_private(
            ctx,
            format!(
                "Sorry, I couldn't find any abilities for {} at level {}.",
                class_name, level
            ),
        )
        .await;
    }

    say_long(ctx, &data.formatter.ability_search(&found)).await
}
