//! 运行报告 - 业务能力层
//!
//! 把核对结果和汇总渲染为控制台文字，也可以导出为 JSON。

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{BookingError, BookingResult};
use crate::models::{AggregatedResult, Summary};
use crate::services::verification::VerificationReport;

/// 一次完整运行的结构化结果
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub aggregated: AggregatedResult,
    pub verification: VerificationReport,
    pub summary: Summary,
    pub details: Vec<String>,
}

impl RunReport {
    /// 核对部分的文字
    pub fn verification_lines(&self) -> Vec<String> {
        let mut lines = vec!["---Verifying On My Bookings Page---".to_string()];
        for name in &self.verification.verified {
            lines.push(format!("\t✔Verified: {}", name));
        }
        lines.push("---Verification results---".to_string());
        lines.push(format!("\tExpected: {} bookings", self.verification.expected_count));
        lines.push(format!("\tFound: {} bookings", self.verification.found_count));
        lines.push(format!("\t{}", self.verification.verdict()));
        lines
    }

    /// 汇总部分的文字
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "------BOOKING SUMMARY--------".to_string(),
            format!("New Bookings: {}", self.summary.new_bookings),
            format!("New Waitlists: {}", self.summary.new_waitlists),
            format!("Already Booked/Waitlisted: {}", self.summary.already_processed),
            format!("Total Processed Classes: {}", self.summary.total_processed),
            "------DETAILED CLASS LIST------".to_string(),
        ];
        lines.extend(self.details.iter().map(|detail| format!("⚫ {}", detail)));
        lines
    }

    /// 输出到日志
    pub fn log(&self) {
        info!("");
        for line in self.verification_lines() {
            info!("{}", line);
        }
        info!("");
        for line in self.summary_lines() {
            info!("{}", line);
        }
    }

    /// 导出为 JSON 文件
    pub async fn write_json(&self, path: &Path) -> BookingResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| BookingError::io(path.display().to_string(), e))?;
        info!("📄 运行报告已保存至: {}", path.display());
        Ok(())
    }
}
