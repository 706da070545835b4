use std::sync::Arc;
use std::time::Duration;

use crate::utils::catalog::Catalog;
use crate::utils::format::ReplyFormatter;
use crate::utils::usage_log::UsageLogger;

/// 啟動時建立一次，傳給每個指令的共用狀態；除了紀錄檔之外都是唯讀
#[derive(Clone)]
pub struct BotData {
    pub catalog: Arc<Catalog>,
    pub formatter: ReplyFormatter,
    pub usage_log: Arc<UsageLogger>,
    pub selection_timeout: Duration,
}
