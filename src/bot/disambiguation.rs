use crate::bot::{Context, Error};
use crate::utils::format::{MESSAGE_LIMIT, split_message};
use crate::utils::selection::{
    BUTTONS_PER_ROW, ControlFace, SelectionControl, SelectionEvent, SelectionWindow,
};
use futures::StreamExt;
use poise::{
    CreateReply,
    serenity_prelude::{
        self as serenity, ButtonStyle, CreateActionRow, CreateButton, CreateInteractionResponse,
        CreateInteractionResponseFollowup, CreateInteractionResponseMessage, ReactionType,
    },
};

const ALREADY_CHOSEN: &str = "A version has already been picked for this lookup. Run the command again to see another one.";

/// 送出選擇按鈕並等待到期限為止。
///
/// 第一個有效點擊會以該筆資料回覆點擊事件本身（過長時拆成後續訊息）；
/// 之後的點擊只收到私訊提示。期限到時把原訊息的按鈕全部改為停用，不另外發送訊息。
pub async fn run<T>(
    ctx: Context<'_>,
    prompt: String,
    mut window: SelectionWindow<'_, T>,
    render: impl Fn(&T) -> String,
) -> Result<(), Error> {
    if window.is_truncated() {
        log::warn!(
            "符合項目超過按鈕上限，只顯示前 {} 個",
            window.controls().len()
        );
    }

    let reply = CreateReply::default()
        .content(prompt)
        .components(action_rows(window.controls(), false));
    let sent = ctx.send(reply).await?;
    let mut message = sent.into_message().await?;
    let serenity_ctx = ctx.serenity_context();

    let interactions = message
        .await_component_interactions(serenity_ctx)
        .timeout(window.timeout())
        .stream();
    let mut interactions = std::pin::pin!(interactions);

    while let Some(interaction) = interactions.next().await {
        let mut followups = Vec::new();
        let response = match window.select(&interaction.data.custom_id) {
            SelectionEvent::Resolved(entry) => {
                log::info!(
                    "{} 選擇了 {}",
                    interaction.user.name,
                    interaction.data.custom_id
                );
                let mut chunks = split_message(&render(entry), MESSAGE_LIMIT).into_iter();
                let first = chunks.next().unwrap_or_default();
                followups.extend(chunks);
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new().content(first),
                )
            }
            SelectionEvent::AlreadyResolved | SelectionEvent::Expired => {
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content(ALREADY_CHOSEN)
                        .ephemeral(true),
                )
            }
            SelectionEvent::Unrecognized => {
                log::warn!("忽略無法辨識的按鈕: {}", interaction.data.custom_id);
                CreateInteractionResponse::Acknowledge
            }
        };

        if let Err(e) = interaction.create_response(serenity_ctx, response).await {
            log::error!("回應按鈕互動失敗: {}", e);
            continue;
        }
        for chunk in followups {
            let followup = CreateInteractionResponseFollowup::new().content(chunk);
            if let Err(e) = interaction.create_followup(serenity_ctx, followup).await {
                log::error!("發送後續訊息失敗: {}", e);
                break;
            }
        }
    }

    window.expire();
    log::info!("選擇視窗結束: {:?}", window.state());

    let disabled = serenity::EditMessage::new().components(action_rows(window.controls(), true));
    if let Err(e) = message.edit(serenity_ctx, disabled).await {
        log::error!("停用選擇按鈕失敗: {}", e);
    }

    Ok(())
}

fn action_rows(controls: &[SelectionControl], disabled: bool) -> Vec<CreateActionRow> {
    controls
        .chunks(BUTTONS_PER_ROW)
        .map(|row| {
            CreateActionRow::Buttons(row.iter().map(|c| button(c, disabled)).collect())
        })
        .collect()
}

fn button(control: &SelectionControl, disabled: bool) -> CreateButton {
    let button = CreateButton::new(control.custom_id())
        .style(ButtonStyle::Secondary)
        .disabled(disabled);

    match &control.face {
        ControlFace::Emoji(raw) => match emoji_reaction(raw) {
            Some(reaction) => button.emoji(reaction),
            None => button.label(raw.clone()),
        },
        ControlFace::Label(label) => button.label(label.clone()),
    }
}

/// 只接受 `<:name:id>` 自訂表情或純非 ASCII 的短字串；其餘改當文字標籤
fn emoji_reaction(raw: &str) -> Option<ReactionType> {
    if raw.starts_with('<') {
        return match raw.parse::<ReactionType>() {
            Ok(reaction @ ReactionType::Custom { .. }) => Some(reaction),
            _ => None,
        };
    }

    let looks_like_emoji =
        !raw.is_empty() && raw.chars().count() <= 8 && raw.chars().all(|c| !c.is_ascii());
    looks_like_emoji.then(|| ReactionType::Unicode(raw.to_string()))
}
