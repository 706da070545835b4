use chrono::Local;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Guild,
    Dm,
}

impl Source {
    fn as_str(self) -> &'static str {
        match self {
            Source::Guild => "Guild",
            Source::Dm => "DM",
        }
    }
}

/// 一次指令呼叫的紀錄
#[derive(Debug, Clone)]
pub struct CommandUsage {
    pub command: String,
    pub parameters: Vec<(String, Value)>,
    pub source: Source,
    pub user: String,
}

impl CommandUsage {
    pub fn render(&self, timestamp: &str) -> String {
        let parameters: Map<String, Value> = self.parameters.iter().cloned().collect();
        format!(
            "[{}] Command received: {}\nParameters: {}\nSource: {}\nUser: {}\n\n",
            timestamp,
            self.command,
            Value::Object(parameters),
            self.source.as_str(),
            self.user
        )
    }
}

/// 只會附加的指令使用紀錄檔
#[derive(Debug)]
pub struct UsageLogger {
    path: PathBuf,
}

impl UsageLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn append(&self, usage: &CommandUsage) -> std::io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(usage.render(&timestamp).as_bytes()).await?;
        file.flush().await
    }

    /// 背景寫入，不等待結果；失敗只記錄在主控台
    pub fn record(self: &Arc<Self>, usage: CommandUsage) {
        let logger = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = logger.append(&usage).await {
                log::error!("儲存指令紀錄失敗: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage() -> CommandUsage {
        CommandUsage {
            command: "abilitysearch".to_string(),
            parameters: vec![
                ("class_name".to_string(), Value::from("Brute")),
                ("ability_level".to_string(), Value::from("1")),
            ],
            source: Source::Dm,
            user: "someone".to_string(),
        }
    }

    #[test]
    fn test_render_block() {
        assert_eq!(
            usage().render("2026-01-02 03:04:05"),
            "[2026-01-02 03:04:05] Command received: abilitysearch\n\
             Parameters: {\"ability_level\":\"1\",\"class_name\":\"Brute\"}\n\
             Source: DM\nUser: someone\n\n"
        );
    }

    #[tokio::test]
    async fn test_append_keeps_previous_entries() {
        let path = std::env::temp_dir().join(format!("usage-{}.txt", uuid::Uuid::new_v4()));
        let logger = UsageLogger::new(&path);

        logger.append(&usage()).await.unwrap();
        logger.append(&usage()).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content.matches("Command received: abilitysearch").count(), 2);
        assert!(content.ends_with("User: someone\n\n"));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_append_failure_is_an_error() {
        let dir = std::env::temp_dir().join(format!("usage-missing-{}", uuid::Uuid::new_v4()));
        let logger = UsageLogger::new(dir.join("nested").join("log.txt"));
        assert!(logger.append(&usage()).await.is_err());
    }
}
