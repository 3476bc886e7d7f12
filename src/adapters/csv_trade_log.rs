//! CSV trade log adapter.
//!
//! Append-only, single writer. Each append resolves the create-vs-exists
//! race explicitly: `create_new` wins the right to write the header, losing
//! it falls back to a plain append. A whole row (or header plus row) goes
//! out in one `write_all` so concurrent readers never observe a torn row.

use crate::domain::error::BotError;
use crate::domain::trade::TradeRecord;
use crate::ports::trade_log_port::{LogWrite, TradeLogPort};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

const HEADER: &str = "date,symbol,strategy,side,qty,entry,exit,pnl\n";

pub struct CsvTradeLog {
    path: PathBuf,
}

impl CsvTradeLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn encode_row(record: &TradeRecord) -> Result<Vec<u8>, BotError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer
            .serialize(record)
            .map_err(|e| BotError::TradeLog {
                reason: format!("encode failed: {e}"),
            })?;
        writer.into_inner().map_err(|e| BotError::TradeLog {
            reason: format!("encode failed: {e}"),
        })
    }
}

impl TradeLogPort for CsvTradeLog {
    fn append(&self, record: &TradeRecord) -> Result<LogWrite, BotError> {
        let row = Self::encode_row(record)?;

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                let mut buf = Vec::with_capacity(HEADER.len() + row.len());
                buf.extend_from_slice(HEADER.as_bytes());
                buf.extend_from_slice(&row);
                file.write_all(&buf)?;
                file.flush()?;
                Ok(LogWrite::Created)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let mut file = OpenOptions::new().append(true).open(&self.path)?;
                file.write_all(&row)?;
                file.flush()?;
                Ok(LogWrite::Appended)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn read_all(&self) -> Result<Vec<TradeRecord>, BotError> {
        if !self.path.exists() {
            return Ok(vec![]);
        }
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| BotError::TradeLog {
            reason: format!("open failed: {e}"),
        })?;
        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: TradeRecord = result.map_err(|e| BotError::TradeLog {
                reason: format!("parse failed: {e}"),
            })?;
            records.push(record);
        }
        Ok(records)
    }
}
