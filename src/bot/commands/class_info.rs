use crate::bot::commands::{provided, say_long, say_private};
use crate::bot::{Context, Error};

/// Lookup class info using class name
#[poise::command(slash_command, rename = "classinfo")]
pub async fn class_info(
    ctx: Context<'_>,
    #[description = "Class name"] class_name: String,
) -> Result<(), Error> {
    let Some(class_name) = provided(&class_name) else {
        return say_private(ctx, "Please provide a class name.").await;
    };

    let data = ctx.data();
    let found = data.catalog.find_classes(class_name);
    log::info!("職業查詢 {:?}: {} 筆符合", class_name, found.len());

    if found.is_empty() {
        return say_private(
            ctx,
            format!("Sorry, I couldn't find a class named **{}**.", class_name),
        )
        .await;
    }

    say_long(ctx, &data.formatter.class_info(&found)).await
}
