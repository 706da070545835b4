pub mod commands;
pub mod data;
pub mod disambiguation;
pub mod hooks;

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, data::BotData, Error>;

pub fn commands() -> Vec<poise::Command<data::BotData, Error>> {
    vec![
        commands::ability::ability(),
        commands::ability_search::ability_search(),
        commands::class_info::class_info(),
        commands::item::item(),
    ]
}
