//! Test fixtures and data generators
//!
//! Provides reusable message histories for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use tapback_core::{Message, MessagePart, Snowflake};

pub const ALICE: &str = "+15550100";
pub const BOB: &str = "+15550199";
pub const CAROL: &str = "+15550142";

/// Counter for unique thread ids
static THREAD_COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique thread id
pub fn unique_thread() -> Snowflake {
    Snowflake::new(THREAD_COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Builds a message history one message per second
#[derive(Debug, Clone)]
pub struct History {
    thread_id: Snowflake,
    next_id: i64,
    clock: i64,
    messages: Vec<Message>,
}

impl History {
    pub fn new() -> Self {
        Self {
            thread_id: unique_thread(),
            next_id: 1,
            clock: 1_700_000_000,
            messages: Vec::new(),
        }
    }

    pub fn thread_id(&self) -> Snowflake {
        self.thread_id
    }

    /// Switch subsequent messages to another thread
    pub fn switch_thread(&mut self) -> Snowflake {
        self.thread_id = unique_thread();
        self.thread_id
    }

    fn tick(&mut self) -> (Snowflake, DateTime<Utc>) {
        let id = Snowflake::new(self.next_id);
        self.next_id += 1;
        self.clock += 1;
        let date = Utc.timestamp_opt(self.clock, 0).single().unwrap_or_default();
        (id, date)
    }

    /// Append an SMS and return its id
    pub fn sms(&mut self, from: &str, text: &str) -> Snowflake {
        let (id, date) = self.tick();
        self.messages
            .push(Message::new_sms(id, self.thread_id, from, date, text));
        id
    }

    /// Append an MMS and return its id
    pub fn mms(&mut self, from: &str, parts: Vec<MessagePart>) -> Snowflake {
        let (id, date) = self.tick();
        self.messages
            .push(Message::new_mms(id, self.thread_id, from, date, parts));
        id
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.clone()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
