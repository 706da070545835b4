//! 多筆符合時的選擇視窗。
//!
//! 每個按鈕的 custom id 直接帶著 `(組, 組內位置)`，不再用第一組的大小反推，
//! 各組數量不同時也能選到正確的資料。視窗只接受第一個有效選擇，期限到了
//! 之後不論是否已選擇，按鈕一律停用。

use crate::utils::catalog::MatchSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Discord 一列最多 5 個按鈕、一則訊息最多 5 列
pub const BUTTONS_PER_ROW: usize = 5;
pub const MAX_CONTROLS: usize = BUTTONS_PER_ROW * 5;

const TAG_PREFIX: &str = "pick";

/// 按鈕上顯示的內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlFace {
    Emoji(String),
    Label(String),
}

/// 按鈕標籤：`pick:<nonce>:<index>:<group>:<member>`，index 從 1 開始
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlTag {
    pub nonce: String,
    pub index: usize,
    pub group: usize,
    pub member: usize,
}

impl fmt::Display for ControlTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            TAG_PREFIX, self.nonce, self.index, self.group, self.member
        )
    }
}

impl FromStr for ControlTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        if parts.next() != Some(TAG_PREFIX) {
            return Err(());
        }
        let nonce = parts.next().filter(|n| !n.is_empty()).ok_or(())?.to_string();
        let mut number = || -> Result<usize, ()> {
            parts.next().ok_or(())?.parse::<usize>().map_err(|_| ())
        };
        let index = number()?;
        let group = number()?;
        let member = number()?;
        if index == 0 || parts.next().is_some() {
            return Err(());
        }
        Ok(Self {
            nonce,
            index,
            group,
            member,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionControl {
    pub tag: ControlTag,
    pub face: ControlFace,
}

impl SelectionControl {
    pub fn custom_id(&self) -> String {
        self.tag.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    AwaitingSelection,
    Resolved { group: usize, member: usize },
    TimedOut,
}

/// 處理一次按鈕事件的結果
#[derive(Debug, PartialEq, Eq)]
pub enum SelectionEvent<'a, T> {
    Resolved(&'a T),
    AlreadyResolved,
    Expired,
    Unrecognized,
}

pub struct SelectionWindow<'a, T> {
    nonce: String,
    matches: MatchSet<'a, T>,
    controls: Vec<SelectionControl>,
    state: WindowState,
    timeout: Duration,
}

impl<'a, T> SelectionWindow<'a, T> {
    /// 只有超過一筆符合時才會開啟視窗
    pub fn open(
        matches: MatchSet<'a, T>,
        timeout: Duration,
        face: impl Fn(&str, &T) -> ControlFace,
    ) -> Option<Self> {
        if matches.len() <= 1 {
            return None;
        }

        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let controls = matches
            .flattened()
            .take(MAX_CONTROLS)
            .enumerate()
            .map(|(i, (group, member, category, entry))| SelectionControl {
                tag: ControlTag {
                    nonce: nonce.clone(),
                    index: i + 1,
                    group,
                    member,
                },
                face: face(category, entry),
            })
            .collect();

        Some(Self {
            nonce,
            matches,
            controls,
            state: WindowState::AwaitingSelection,
            timeout,
        })
    }

    pub fn controls(&self) -> &[SelectionControl] {
        &self.controls
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_truncated(&self) -> bool {
        self.controls.len() < self.matches.len()
    }

    /// 只認得本視窗發出的標籤，第一個有效選擇之後的事件都不再解析
    pub fn select(&mut self, custom_id: &str) -> SelectionEvent<'a, T> {
        let Ok(tag) = custom_id.parse::<ControlTag>() else {
            return SelectionEvent::Unrecognized;
        };
        if tag.nonce != self.nonce {
            return SelectionEvent::Unrecognized;
        }
        let Some(control) = self.controls.get(tag.index - 1) else {
            return SelectionEvent::Unrecognized;
        };
        if control.tag != tag {
            return SelectionEvent::Unrecognized;
        }

        match self.state {
            WindowState::AwaitingSelection => match self.matches.get(tag.group, tag.member) {
                Some(entry) => {
                    self.state = WindowState::Resolved {
                        group: tag.group,
                        member: tag.member,
                    };
                    SelectionEvent::Resolved(entry)
                }
                None => SelectionEvent::Unrecognized,
            },
            WindowState::Resolved { .. } => SelectionEvent::AlreadyResolved,
            WindowState::TimedOut => SelectionEvent::Expired,
        }
    }

    /// 期限到：未選擇則轉為 TimedOut，已選擇維持 Resolved
    pub fn expire(&mut self) {
        if self.state == WindowState::AwaitingSelection {
            self.state = WindowState::TimedOut;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::Ability;
    use crate::utils::catalog::tests::sample_catalog;
    use crate::utils::catalog::Catalog;

    fn emoji_face(_: &str, ability: &Ability) -> ControlFace {
        ControlFace::Emoji(ability.emoji.clone().unwrap_or_default())
    }

    fn quake_window(catalog: &Catalog) -> SelectionWindow<'_, Ability> {
        SelectionWindow::open(catalog.find_abilities("Quake"), DEFAULT_TIMEOUT, emoji_face)
            .expect("three matches open a window")
    }

    #[test]
    fn test_no_window_for_zero_or_one_match() {
        let catalog = sample_catalog();
        assert!(
            SelectionWindow::open(catalog.find_abilities("nothing"), DEFAULT_TIMEOUT, emoji_face)
                .is_none()
        );
        assert!(
            SelectionWindow::open(catalog.find_abilities("trample"), DEFAULT_TIMEOUT, emoji_face)
                .is_none()
        );
    }

    #[test]
    fn test_one_control_per_match_with_unique_indices() {
        let catalog = sample_catalog();
        let window = quake_window(&catalog);
        let controls = window.controls();

        assert_eq!(controls.len(), 3);
        let indices: Vec<usize> = controls.iter().map(|c| c.tag.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        let pairs: Vec<(usize, usize)> = controls.iter().map(|c| (c.tag.group, c.tag.member)).collect();
        assert_eq!(pairs, vec![(0, 0), (1, 0), (1, 1)]);
        assert_eq!(controls[0].face, ControlFace::Emoji("🪓".to_string()));
        assert_eq!(window.state(), WindowState::AwaitingSelection);
        assert!(!window.is_truncated());
    }

    #[test]
    fn test_uneven_groups_resolve_the_tagged_entry() {
        let catalog = sample_catalog();
        let mut window = quake_window(&catalog);
        let third = window.controls()[2].custom_id();

        match window.select(&third) {
            SelectionEvent::Resolved(ability) => {
                assert_eq!(ability.image_url.as_deref(), Some("https://img/sun-quake-2.png"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(window.state(), WindowState::Resolved { group: 1, member: 1 });
    }

    #[test]
    fn test_only_first_selection_is_honoured() {
        let catalog = sample_catalog();
        let mut window = quake_window(&catalog);
        let first = window.controls()[0].custom_id();
        let second = window.controls()[1].custom_id();

        assert!(matches!(window.select(&second), SelectionEvent::Resolved(_)));
        assert_eq!(window.select(&first), SelectionEvent::AlreadyResolved);
        assert_eq!(window.state(), WindowState::Resolved { group: 1, member: 0 });

        window.expire();
        assert_eq!(window.state(), WindowState::Resolved { group: 1, member: 0 });
    }

    #[test]
    fn test_expire_without_selection() {
        let catalog = sample_catalog();
        let mut window = quake_window(&catalog);
        let first = window.controls()[0].custom_id();

        window.expire();
        assert_eq!(window.state(), WindowState::TimedOut);
        assert_eq!(window.select(&first), SelectionEvent::Expired);
    }

    #[test]
    fn test_foreign_or_forged_tags_are_ignored() {
        let catalog = sample_catalog();
        let mut window = quake_window(&catalog);
        let other = quake_window(&catalog);
        let mut forged = window.controls()[0].tag.clone();
        forged.group = 1;

        assert_eq!(window.select(&other.controls()[0].custom_id()), SelectionEvent::Unrecognized);
        assert_eq!(window.select(&forged.to_string()), SelectionEvent::Unrecognized);
        assert_eq!(window.select("class-1-button"), SelectionEvent::Unrecognized);
        assert_eq!(window.state(), WindowState::AwaitingSelection);
    }

    #[test]
    fn test_tag_round_trip_and_rejects() {
        let tag = ControlTag {
            nonce: "abc".to_string(),
            index: 2,
            group: 1,
            member: 0,
        };
        assert_eq!(tag.to_string(), "pick:abc:2:1:0");
        assert_eq!("pick:abc:2:1:0".parse::<ControlTag>(), Ok(tag));
        assert!("pick:abc:0:1:0".parse::<ControlTag>().is_err());
        assert!("pick::1:0:0".parse::<ControlTag>().is_err());
        assert!("pick:abc:1:0:0:9".parse::<ControlTag>().is_err());
        assert!("pick:abc:x:0:0".parse::<ControlTag>().is_err());
    }

    #[test]
    fn test_controls_are_capped_at_platform_limit() {
        let entries: Vec<String> = (0..30)
            .map(|i| format!(r#"{{"name":"Loot","id":"{i}","expansion":"E{i}"}}"#))
            .collect();
        let json = format!(r#"{{"All":[{}]}}"#, entries.join(","));
        let items: crate::utils::catalog::Table<crate::models::types::Item> =
            serde_json::from_str(&json).unwrap();

        let matches = items.group_matching(|item| item.name == "Loot");
        let window = SelectionWindow::open(matches, DEFAULT_TIMEOUT, |_, item| {
            ControlFace::Label(item.expansion.clone())
        })
        .unwrap();

        assert_eq!(window.controls().len(), MAX_CONTROLS);
        assert!(window.is_truncated());
        assert_eq!(window.controls()[24].face, ControlFace::Label("E24".to_string()));
    }
}
