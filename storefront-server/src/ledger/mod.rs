//! 订单导出镜像 (Ledger Export Mirror)
//!
//! 把订单生命周期事件镜像到一个扁平 CSV 文件，供人工对账使用。
//! 镜像是旁路通道，不是事实来源：允许滞后或漂移，绝不能阻塞或
//! 失败订单主操作 — 调用方把所有错误记日志后吞掉。
//!
//! 每次变更都是整文件读-改-重写 (O(n))；文件级互斥锁把并发的
//! 读-改-写串行化，避免 last-writer-wins 丢更新。

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

/// One exported order — one row per order, not per item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Customer")]
    pub customer: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Address")]
    pub address: String,
    /// Concatenated "name variant x qty, …" summary of the whole order
    #[serde(rename = "Items")]
    pub items: String,
    #[serde(rename = "Total")]
    pub total: String,
    #[serde(rename = "Status")]
    pub status: String,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("export file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export file parse error: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV mirror of the orders table
pub struct LedgerExporter {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LedgerExporter {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append one row, creating the file (with headers) on first use
    pub async fn append(&self, row: LedgerRow) -> Result<(), LedgerError> {
        let _guard = self.lock.lock().await;
        let mut rows = self.read_rows()?;
        rows.push(row);
        self.write_rows(&rows)?;
        tracing::info!(path = %self.path.display(), "Ledger row appended");
        Ok(())
    }

    /// Replace the Status field of the row whose Order ID matches.
    ///
    /// Silently a no-op when the file does not exist or no row matches.
    pub async fn update_status(&self, order_id: &str, status: &str) -> Result<(), LedgerError> {
        let _guard = self.lock.lock().await;
        if !self.path.exists() {
            return Ok(());
        }
        let mut rows = self.read_rows()?;
        let mut changed = false;
        for row in rows.iter_mut() {
            if row.order_id == order_id {
                row.status = status.to_string();
                changed = true;
            }
        }
        if changed {
            self.write_rows(&rows)?;
            tracing::info!(order_id = %order_id, status = %status, "Ledger status updated");
        }
        Ok(())
    }

    /// Drop the row whose Order ID matches; same silent-no-op on absence
    pub async fn delete_row(&self, order_id: &str) -> Result<(), LedgerError> {
        let _guard = self.lock.lock().await;
        if !self.path.exists() {
            return Ok(());
        }
        let rows = self.read_rows()?;
        let kept: Vec<LedgerRow> = rows
            .into_iter()
            .filter(|row| row.order_id != order_id)
            .collect();
        self.write_rows(&kept)?;
        tracing::info!(order_id = %order_id, "Ledger row deleted");
        Ok(())
    }

    fn read_rows(&self) -> Result<Vec<LedgerRow>, LedgerError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut rows = Vec::new();
        for record in reader.deserialize::<LedgerRow>() {
            rows.push(record?);
        }
        Ok(rows)
    }

    fn write_rows(&self, rows: &[LedgerRow]) -> Result<(), LedgerError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(id: &str, status: &str) -> LedgerRow {
        LedgerRow {
            order_id: id.to_string(),
            date: "2026-01-01 10:00:00".into(),
            customer: "Asha".into(),
            email: "a@example.com".into(),
            phone: "9000000000".into(),
            address: "12 Main Rd, Pune, MH - 411001".into(),
            items: "Shoe red/42 x2".into(),
            total: "₹1000".into(),
            status: status.into(),
        }
    }

    fn exporter() -> (LedgerExporter, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let exporter = LedgerExporter::new(dir.path().join("orders.csv"));
        (exporter, dir)
    }

    #[tokio::test]
    async fn append_creates_file_and_accumulates() {
        let (exporter, _dir) = exporter();
        exporter.append(sample_row("1", "Pending")).await.unwrap();
        exporter.append(sample_row("2", "Pending")).await.unwrap();

        let rows = exporter.read_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].order_id, "1");
        assert_eq!(rows[1].order_id, "2");

        // Header row is written once
        let raw = std::fs::read_to_string(exporter.path()).unwrap();
        assert!(raw.starts_with("Order ID,"));
    }

    #[tokio::test]
    async fn update_status_matches_by_string_id() {
        let (exporter, _dir) = exporter();
        exporter.append(sample_row("3", "Pending")).await.unwrap();
        exporter.append(sample_row("30", "Pending")).await.unwrap();

        exporter.update_status("3", "Confirmed").await.unwrap();

        let rows = exporter.read_rows().unwrap();
        assert_eq!(rows[0].status, "Confirmed");
        // "30" must not match "3"
        assert_eq!(rows[1].status, "Pending");
    }

    #[tokio::test]
    async fn missing_file_and_missing_row_are_silent() {
        let (exporter, _dir) = exporter();

        // No file yet: both operations succeed without creating one
        exporter.update_status("1", "Confirmed").await.unwrap();
        exporter.delete_row("1").await.unwrap();
        assert!(!exporter.path().exists());

        exporter.append(sample_row("1", "Pending")).await.unwrap();
        exporter.update_status("999", "Confirmed").await.unwrap();
        let rows = exporter.read_rows().unwrap();
        assert_eq!(rows[0].status, "Pending");
    }

    #[tokio::test]
    async fn delete_row_drops_only_the_match() {
        let (exporter, _dir) = exporter();
        exporter.append(sample_row("1", "Pending")).await.unwrap();
        exporter.append(sample_row("2", "Confirmed")).await.unwrap();

        exporter.delete_row("1").await.unwrap();

        let rows = exporter.read_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_id, "2");
    }
}
