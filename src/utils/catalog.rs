use crate::models::types::{Ability, BotConfig, Character, Item};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("無法讀取資料檔 {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("資料檔 {path} 格式錯誤: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 同一個分類（職業或擴充）底下的資料，維持原檔案順序
#[derive(Debug, Clone)]
pub struct Category<T> {
    pub name: String,
    pub entries: Vec<T>,
}

/// 分類名稱 → 資料陣列，分類順序與資料檔一致
#[derive(Debug, Clone)]
pub struct Table<T> {
    categories: Vec<Category<T>>,
}

impl<T> Table<T> {
    #[cfg(test)]
    pub fn categories(&self) -> &[Category<T>] {
        &self.categories
    }

    pub fn entries(&self) -> impl Iterator<Item = &T> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    /// 依分類分組的查詢，只保留有符合資料的分類
    pub fn group_matching<'a>(&'a self, predicate: impl Fn(&T) -> bool) -> MatchSet<'a, T> {
        let groups = self
            .categories
            .iter()
            .filter_map(|category| {
                let entries: Vec<&T> = category.entries.iter().filter(|e| predicate(*e)).collect();
                (!entries.is_empty()).then(|| MatchGroup {
                    category: category.name.as_str(),
                    entries,
                })
            })
            .collect();
        MatchSet { groups }
    }

    /// 攤平後的查詢，不分組
    pub fn flat_matching<'a>(&'a self, predicate: impl Fn(&T) -> bool) -> Vec<&'a T> {
        self.entries().filter(|e| predicate(*e)).collect()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Table<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for TableVisitor<T> {
            type Value = Table<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping category names to entry arrays")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Table<T>, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut categories = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, entries)) = map.next_entry::<String, Vec<T>>()? {
                    categories.push(Category { name, entries });
                }
                Ok(Table { categories })
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

#[derive(Debug, Clone)]
pub struct MatchGroup<'a, T> {
    pub category: &'a str,
    pub entries: Vec<&'a T>,
}

/// 一次查詢的結果：非空的分組，組內維持資料順序
#[derive(Debug, Clone)]
pub struct MatchSet<'a, T> {
    groups: Vec<MatchGroup<'a, T>>,
}

impl<'a, T> MatchSet<'a, T> {
    #[cfg(test)]
    pub fn groups(&self) -> &[MatchGroup<'a, T>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 剛好一筆時直接回傳，否則 None
    pub fn single(&self) -> Option<&'a T> {
        match self.groups.as_slice() {
            [group] if group.entries.len() == 1 => Some(group.entries[0]),
            _ => None,
        }
    }

    pub fn get(&self, group: usize, member: usize) -> Option<&'a T> {
        self.groups.get(group)?.entries.get(member).copied()
    }

    /// 攤平順序：(組索引, 組內索引, 分類名稱, 資料)
    pub fn flattened(&self) -> impl Iterator<Item = (usize, usize, &'a str, &'a T)> + '_ {
        self.groups.iter().enumerate().flat_map(|(g, group)| {
            group
                .entries
                .iter()
                .enumerate()
                .map(move |(m, entry)| (g, m, group.category, *entry))
        })
    }
}

/// 啟動時載入一次、之後唯讀的參考資料
#[derive(Debug, Clone)]
pub struct Catalog {
    pub abilities: Table<Ability>,
    pub characters: Table<Character>,
    pub items: Table<Item>,
}

impl Catalog {
    pub fn load(config: &BotConfig) -> Result<Self, CatalogError> {
        let catalog = Self {
            abilities: read_table(&config.ability_data)?,
            characters: read_table(&config.character_data)?,
            items: read_table(&config.item_data)?,
        };
        log::info!(
            "參考資料載入完成: {} 個技能, {} 個職業, {} 件物品",
            catalog.abilities.len(),
            catalog.characters.len(),
            catalog.items.len()
        );
        Ok(catalog)
    }

    pub fn find_abilities(&self, name: &str) -> MatchSet<'_, Ability> {
        let needle = name.to_lowercase();
        self.abilities
            .group_matching(|ability| ability.name.to_lowercase() == needle)
    }

    /// 職業名稱不分大小寫，等級需完全相同
    pub fn search_abilities(&self, class_name: &str, level: &str) -> Vec<&Ability> {
        let needle = class_name.to_lowercase();
        self.abilities.flat_matching(|ability| {
            ability.character.to_lowercase() == needle && ability.level == level
        })
    }

    pub fn find_classes(&self, class_name: &str) -> Vec<&Character> {
        let needle = class_name.to_lowercase();
        self.characters
            .flat_matching(|character| character.character.to_lowercase() == needle)
    }

    pub fn find_items(&self, name: &str) -> MatchSet<'_, Item> {
        let needle = name.to_lowercase();
        self.items
            .group_matching(|item| item.name.to_lowercase() == needle)
    }
}

fn read_table<T>(path: &str) -> Result<Table<T>, CatalogError>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(Path::new(path)).map_err(|source| CatalogError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_string(),
        source,
    })
}
