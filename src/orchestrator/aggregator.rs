//! 结果去重汇集 - 编排层

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::{AggregatedResult, BookingRecord};

/// 按请求顺序收集记录
///
/// - 所有记录都进入 `all`（not_found / error 保留用于审计）
/// - 只有成功分类的记录才进入 `unique_by_identifier`，按首次出现顺序去重
#[derive(Debug, Default)]
pub struct DedupAggregator {
    result: AggregatedResult,
    seen: HashSet<String>,
}

impl DedupAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入一条记录，返回是否进入了去重列表
    pub fn push(&mut self, record: BookingRecord) -> bool {
        if record.status.is_failure() {
            warn!("the status is \"{}\": {}", record.status, record.message);
            self.result.all.push(record);
            return false;
        }

        let first_seen = self.seen.insert(record.identifier.clone());
        if first_seen {
            self.result.unique_by_identifier.push(record.clone());
        } else {
            debug!("重复的预订，已跳过去重列表: {}", record.identifier);
        }
        self.result.all.push(record);
        first_seen
    }

    pub fn finish(self) -> AggregatedResult {
        self.result
    }
}
