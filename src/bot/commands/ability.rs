use crate::bot::commands::{provided, say_long, say_private};
use crate::bot::{Context, Error, disambiguation};
use crate::models::types::Ability;
use crate::utils::selection::{ControlFace, SelectionWindow};

/// Lookup an ability by name
#[poise::command(slash_command)]
pub async fn ability(
    ctx: Context<'_>,
    #[description = "Name of the ability"] ability_name: String,
) -> Result<(), Error> {
    let Some(name) = provided(&ability_name) else {
        return say_private(ctx, "Please provide an ability name.").await;
    };

    let data = ctx.data();
    let matches = data.catalog.find_abilities(name);
    log::info!("技能查詢 {:?}: {} 筆符合", name, matches.len());

    if let Some(ability) = matches.single() {
        return say_long(ctx, &data.formatter.ability(ability)).await;
    }

    match SelectionWindow::open(matches, data.selection_timeout, control_face) {
        Some(window) => {
            disambiguation::run(ctx, prompt(name), window, |ability| {
                data.formatter.ability(ability)
            })
            .await
        }
        None => say_private(ctx, not_found(name)).await,
    }
}

fn prompt(name: &str) -> String {
    format!(
        "Multiple classes have an ability named **{}**. Select the class button for the version you want to see.",
        name
    )
}

fn not_found(name: &str) -> String {
    format!("Sorry, I couldn't find an ability named **{}**", name)
}

/// 按鈕顯示職業表情符號，沒有表情時改用職業名稱
fn control_face(category: &str, ability: &Ability) -> ControlFace {
    match &ability.emoji {
        Some(emoji) => ControlFace::Emoji(emoji.clone()),
        None if !ability.character.is_empty() => ControlFace::Label(ability.character.clone()),
        None => ControlFace::Label(category.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::catalog::tests::sample_catalog;

    #[test]
    fn test_control_face_prefers_emoji() {
        let catalog = sample_catalog();
        let mut ability = catalog.find_abilities("trample").single().unwrap().clone();
        assert_eq!(control_face("Brute", &ability), ControlFace::Emoji("🪓".to_string()));

        ability.emoji = None;
        assert_eq!(control_face("Brute", &ability), ControlFace::Label("Brute".to_string()));

        ability.character.clear();
        assert_eq!(control_face("Inox", &ability), ControlFace::Label("Inox".to_string()));
    }

    #[test]
    fn test_reply_texts() {
        assert_eq!(not_found("Quake"), "Sorry, I couldn't find an ability named **Quake**");
        assert!(prompt("Quake").starts_with("Multiple classes have an ability named **Quake**."));
    }
}
