use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to set logger: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}

const SUPPRESS_THRESHOLD: u32 = 10;

// serenity 的心跳與事件接收訊息
static NOISY_PATTERNS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["do_heartbeat", "recv_event", "recv;"]));

#[derive(Debug)]
struct LoggerState {
    file: Option<File>,
    last_entry: Option<String>,
    repeat_count: u32,
}

/// 主控台 + 檔案日誌，連續重複的訊息只輸出摘要
pub struct BotLogger {
    level: LevelFilter,
    state: Mutex<LoggerState>,
}

impl BotLogger {
    pub fn new(log_file: Option<&str>, level: LevelFilter) -> Result<BotLogger, std::io::Error> {
        let file = match log_file {
            Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
            None => None,
        };

        Ok(BotLogger {
            level,
            state: Mutex::new(LoggerState {
                file,
                last_entry: None,
                repeat_count: 0,
            }),
        })
    }

    /// 無法辨識的等級名稱一律視為 info
    pub fn init(log_file: Option<&str>, level: &str) -> Result<(), LoggerError> {
        let level = LevelFilter::from_str(level).unwrap_or(LevelFilter::Info);
        let logger = BotLogger::new(log_file, level)?;
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(level);
        Ok(())
    }

    fn write_line(state: &mut LoggerState, line: &str) {
        let stamped = format!("{} {}", Local::now().format("%Y-%m-%d %H:%M:%S"), line);
        println!("{}", stamped);
        if let Some(file) = state.file.as_mut() {
            if let Err(e) = writeln!(file, "{}", stamped) {
                eprintln!("寫入日誌檔失敗: {}", e);
            }
        }
    }

    fn flush_repeats(state: &mut LoggerState) {
        if state.repeat_count > 0 {
            let summary = format!("(previous message repeated {} times)", state.repeat_count);
            Self::write_line(state, &summary);
            state.repeat_count = 0;
        }
    }
}

impl Log for BotLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        if NOISY_PATTERNS.iter().any(|pattern| message.contains(pattern)) {
            return;
        }

        let entry = format!("[{}] {}", record.level(), message);
        let Ok(mut state) = self.state.lock() else {
            eprintln!("{}", entry);
            return;
        };

        if state.last_entry.as_deref() == Some(entry.as_str()) {
            state.repeat_count = state.repeat_count.saturating_add(1);
            if state.repeat_count >= SUPPRESS_THRESHOLD {
                Self::flush_repeats(&mut state);
            }
            return;
        }

        Self::flush_repeats(&mut state);
        Self::write_line(&mut state, &entry);
        state.last_entry = Some(entry);
    }

    fn flush(&self) {
        if let Ok(mut state) = self.state.lock() {
            Self::flush_repeats(&mut state);
            if let Some(file) = state.file.as_mut() {
                let _ = file.flush();
            }
        }
    }
}
