//! # Order Sources
//!
//! The boundary between the kitchen and whatever produces orders. The kitchen only
//! pulls [`OrderTicket`]s one at a time; the record format lives behind
//! [`OrderSource`].
//!
//! A source error is final for ingestion: the producer stops pulling, while orders
//! already on the shelves run out their lifecycle normally.

use crate::model::OrderTicket;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read orders: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed order record: {0}")]
    Json(#[from] serde_json::Error),
}

/// A pull-based stream of tickets. `None` means the stream is exhausted.
#[async_trait]
pub trait OrderSource: Send {
    async fn next_ticket(&mut self) -> Option<Result<OrderTicket, SourceError>>;
}

/// Tickets from an in-memory list.
#[derive(Debug, Clone, Default)]
pub struct VecOrderSource {
    tickets: VecDeque<OrderTicket>,
}

impl From<Vec<OrderTicket>> for VecOrderSource {
    fn from(tickets: Vec<OrderTicket>) -> Self {
        Self {
            tickets: tickets.into(),
        }
    }
}

#[async_trait]
impl OrderSource for VecOrderSource {
    async fn next_ticket(&mut self) -> Option<Result<OrderTicket, SourceError>> {
        self.tickets.pop_front().map(Ok)
    }
}

/// Tickets from a JSON array of order records.
///
/// The array itself must be well-formed up front; individual records are decoded
/// lazily, so a bad record surfaces only when ingestion reaches it.
#[derive(Debug)]
pub struct JsonOrderSource {
    records: std::vec::IntoIter<serde_json::Value>,
}

impl JsonOrderSource {
    pub fn from_json(content: &str) -> Result<Self, SourceError> {
        let records: Vec<serde_json::Value> = serde_json::from_str(content)?;
        Ok(Self {
            records: records.into_iter(),
        })
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    /// Records not yet handed out.
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

#[async_trait]
impl OrderSource for JsonOrderSource {
    async fn next_ticket(&mut self) -> Option<Result<OrderTicket, SourceError>> {
        let record = self.records.next()?;
        Some(serde_json::from_value(record).map_err(SourceError::from))
    }
}
