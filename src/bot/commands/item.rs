use crate::bot::commands::{provided, say_long, say_private};
use crate::bot::{Context, Error, disambiguation};
use crate::models::types::Item;
use crate::utils::selection::{ControlFace, SelectionWindow};

/// Lookup an item by name
#[poise::command(slash_command)]
pub async fn item(
    ctx: Context<'_>,
    #[description = "Name of the item"] item_name: String,
) -> Result<(), Error> {
    let Some(name) = provided(&item_name) else {
        return say_private(ctx, "Please provide an item name.").await;
    };

    let data = ctx.data();
    let matches = data.catalog.find_items(name);
    log::info!("物品查詢 {:?}: {} 筆符合", name, matches.len());

    if let Some(item) = matches.single() {
        return say_long(ctx, &data.formatter.item(item)).await;
    }

    match SelectionWindow::open(matches, data.selection_timeout, control_face) {
        Some(window) => {
            disambiguation::run(ctx, prompt(name), window, |item| data.formatter.item(item)).await
        }
        None => say_private(ctx, not_found(name)).await,
    }
}

fn prompt(name: &str) -> String {
    format!(
        "Multiple expansions have an item named **{}**. Select the expansion button for the version you want to see.",
        name
    )
}

fn not_found(name: &str) -> String {
    format!("Sorry, I couldn't find an item named **{}**", name)
}

fn control_face(category: &str, item: &Item) -> ControlFace {
    if item.expansion.is_empty() {
        ControlFace::Label(category.to_string())
    } else {
        ControlFace::Label(item.expansion.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::catalog::tests::sample_catalog;
    use crate::utils::selection::{DEFAULT_TIMEOUT, SelectionEvent};

    #[test]
    fn test_buttons_are_labelled_by_expansion() {
        let catalog = sample_catalog();
        let window = SelectionWindow::open(
            catalog.find_items("boots of striding"),
            DEFAULT_TIMEOUT,
            control_face,
        )
        .unwrap();

        let faces: Vec<&ControlFace> = window.controls().iter().map(|c| &c.face).collect();
        assert_eq!(
            faces,
            vec![
                &ControlFace::Label("Gloomhaven".to_string()),
                &ControlFace::Label("Jaws of the Lion".to_string())
            ]
        );
    }

    #[test]
    fn test_second_button_renders_second_expansion() {
        let catalog = sample_catalog();
        let formatter = crate::utils::format::ReplyFormatter::default();
        let mut window = SelectionWindow::open(
            catalog.find_items("Boots of Striding"),
            DEFAULT_TIMEOUT,
            control_face,
        )
        .unwrap();
        let second = window.controls()[1].custom_id();

        let SelectionEvent::Resolved(item) = window.select(&second) else {
            panic!("second button should resolve");
        };
        assert!(formatter.item(item).contains("**Expansion:** Jaws of the Lion"));
    }

    #[test]
    fn test_reply_texts() {
        assert_eq!(not_found("Boots"), "Sorry, I couldn't find an item named **Boots**");
        assert!(prompt("Boots").contains("Select the expansion button"));
    }
}
