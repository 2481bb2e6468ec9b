// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Writer, WriterBuilder};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::domain::models::domain_record::DomainRecord;
use crate::domain::models::table::{batch_columns, reconcile_headers, record_to_row, MergeReport, Table};
use crate::domain::repositories::table_repository::{TableError, TableRepository};

/// CSV 文件表存储实现
///
/// 第一行为表头，每行一条记录，UTF-8 编码。列只会追加到表头末尾；
/// 出现新列时整表重写到同目录临时文件再替换，否则直接追加。
pub struct CsvTableStore {
    path: PathBuf,
}

impl CsvTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open_existing(&self) -> Result<Option<File>, TableError> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 读取现有表头；文件不存在或为空时返回 `None`
    fn read_headers(&self) -> Result<Option<Vec<String>>, TableError> {
        let Some(file) = self.open_existing()? else {
            return Ok(None);
        };
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut record = StringRecord::new();
        if reader.read_record(&mut record)? {
            Ok(Some(record.iter().map(str::to_string).collect()))
        } else {
            Ok(None)
        }
    }

    fn ensure_parent_dir(&self) -> Result<(), TableError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    fn create(&self, headers: &[String], records: &[DomainRecord]) -> Result<(), TableError> {
        self.ensure_parent_dir()?;
        let mut writer = WriterBuilder::new().from_path(&self.path)?;
        writer.write_record(headers)?;
        for record in records {
            writer.write_record(record_to_row(record, headers))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn append(&self, headers: &[String], records: &[DomainRecord]) -> Result<(), TableError> {
        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;

        // 上一次写入若缺少行尾，先补一个换行
        if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        let mut writer = WriterBuilder::new().from_writer(file);
        for record in records {
            writer.write_record(record_to_row(record, headers))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// 表头扩展后重写整张表，旧行以空值补齐新列
    fn rewrite(&self, headers: &[String], records: &[DomainRecord]) -> Result<(), TableError> {
        let existing = self.load()?;

        self.replace_with(|writer| {
            writer.write_record(headers)?;
            for mut row in existing.rows {
                if row.len() < headers.len() {
                    row.resize(headers.len(), String::new());
                }
                writer.write_record(&row)?;
            }
            for record in records {
                writer.write_record(record_to_row(record, headers))?;
            }
            Ok(())
        })
    }

    /// 写入同目录下的临时文件，成功后替换表文件
    ///
    /// 任一步失败时临时文件随 `NamedTempFile` 释放而删除，原表保持不变。
    fn replace_with<F>(&self, write_rows: F) -> Result<(), TableError>
    where
        F: FnOnce(&mut Writer<&mut File>) -> Result<(), TableError>,
    {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = WriterBuilder::new().flexible(true).from_writer(tmp.as_file_mut());
            write_rows(&mut writer)?;
            writer.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| TableError::Io(e.error))?;
        Ok(())
    }
}

impl TableRepository for CsvTableStore {
    fn merge(&self, records: &[DomainRecord]) -> Result<MergeReport, TableError> {
        if records.is_empty() {
            debug!("No available domains found to save");
            return Ok(MergeReport::default());
        }

        let incoming = batch_columns(records);
        let report = match self.read_headers()? {
            None => {
                let headers = reconcile_headers(&[], &incoming);
                self.create(&headers, records)?;
                MergeReport {
                    rows_written: records.len(),
                    created: true,
                    added_columns: headers,
                }
            }
            Some(existing) => {
                let headers = reconcile_headers(&existing, &incoming);
                let added_columns = headers[existing.len()..].to_vec();
                if added_columns.is_empty() {
                    self.append(&headers, records)?;
                } else {
                    debug!(columns = ?added_columns, "Extending table header");
                    self.rewrite(&headers, records)?;
                }
                MergeReport {
                    rows_written: records.len(),
                    created: false,
                    added_columns,
                }
            }
        };

        info!(
            path = %self.path.display(),
            "{} {} domains to {}",
            if report.created { "Saved" } else { "Added" },
            report.rows_written,
            self.path.display()
        );
        Ok(report)
    }

    fn load(&self) -> Result<Table, TableError> {
        let Some(file) = self.open_existing()? else {
            return Ok(Table::default());
        };
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut records = reader.records();
        let headers = match records.next() {
            Some(first) => first?.iter().map(str::to_string).collect(),
            None => return Ok(Table::default()),
        };

        let mut rows = Vec::new();
        for record in records {
            rows.push(record?.iter().map(str::to_string).collect());
        }

        Ok(Table { headers, rows })
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
