//! Synthetic document generator
//!
//! Produces records whose timestamps land in a short window after a
//! reference time, each carrying a data point report whose entries are
//! timestamped relative to the record.

use crate::config::Config;
use crate::errors::{Result, StampError};
use crate::model::{entry_key, Body, Document, Entry, Message, Record};
use crate::schema::OP_GENERATE;
use crate::timestamp::{format_timestamp, parse_timestamp};
use crate::{log_op_end, log_op_error, log_op_start};
use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::time::Instant;

pub const MESSAGE_LEVEL: &str = "info";
pub const MESSAGE_SOURCE: &str = "wideco/svinbound";
pub const MESSAGE_KIND: &str = "ImportDataPointReport";
pub const MESSAGE_PARTNER: &str = "wideco";
pub const MESSAGE_LOCATION: &str = "Lejonfastigheter Djurgardsgatan 17";
pub const MESSAGE_STATE: &str = "provisioned";

/// First `rid` number; each further entry adds one
pub const FIRST_RID: u32 = 16675;
pub const RID_SUFFIX: &str = ";PT=0";
pub const FIRST_VERSION: f64 = 25.0;
pub const VERSION_STEP: f64 = 0.7;

/// Latest hour any generated timestamp can have
const LAST_HOUR: u32 = 12;
/// Hour range used on days after the reference day
const LATER_DAY_HOURS: (u32, u32) = (6, LAST_HOUR);

/// Random document generator
pub struct Generator {
    rng: StdRng,
    config: Config,
}

impl Generator {
    /// Reproducible generator: the same seed yields the same document
    pub fn seeded(config: &Config, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config: config.clone(),
        }
    }

    pub fn from_entropy(config: &Config) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            config: config.clone(),
        }
    }

    /// Random timestamp within the window starting at the reference's day
    ///
    /// The day offset is drawn from `0..=window_days`. On the reference day
    /// itself the hour, minute and second are drawn from just after the
    /// reference's own fields, so the result is later than the reference.
    /// Other days use hours 6..=12 and any minute/second.
    ///
    /// A reference whose minute or second is 59, or whose hour is past 12,
    /// leaves nothing to draw from on the reference day. That case returns
    /// `StampError::EmptyRange` rather than picking a different time.
    ///
    /// # Errors
    ///
    /// `EmptyRange` as above, `DateOutOfRange` if the window overflows the
    /// calendar.
    pub fn generate_timestamp(&mut self, reference: Option<&NaiveDateTime>) -> Result<String> {
        let reference = reference
            .copied()
            .unwrap_or(self.config.default_reference);
        let window_start = reference.date().and_time(NaiveTime::MIN);

        let day_offset = self.rng.random_range(0..=self.config.window_days);
        let (hour, minute, second) = if day_offset == 0 {
            (
                self.draw("hour", reference.hour(), LAST_HOUR)?,
                self.draw("minute", reference.minute() + 1, 59)?,
                self.draw("second", reference.second() + 1, 59)?,
            )
        } else {
            (
                self.draw("hour", LATER_DAY_HOURS.0, LATER_DAY_HOURS.1)?,
                self.draw("minute", 0, 59)?,
                self.draw("second", 0, 59)?,
            )
        };

        let days = i64::from(day_offset);
        let offset = Duration::days(days)
            + Duration::hours(i64::from(hour))
            + Duration::minutes(i64::from(minute))
            + Duration::seconds(i64::from(second));

        let generated = window_start
            .checked_add_signed(offset)
            .ok_or_else(|| StampError::DateOutOfRange {
                reference: format_timestamp(&reference),
                days,
            })?;

        Ok(format_timestamp(&generated))
    }

    /// Data point report whose entries are timestamped after `record_date`
    ///
    /// # Errors
    ///
    /// Propagates `generate_timestamp` failures.
    pub fn generate_message(&mut self, record_date: &NaiveDateTime) -> Result<Message> {
        let count = self.config.entries_per_message;
        let mut dp = BTreeMap::new();

        for index in 0..count {
            let step = u32::try_from(index).unwrap_or(u32::MAX);
            let entry = Entry {
                rid: format!("{}{}", FIRST_RID.saturating_add(step), RID_SUFFIX),
                v: round_one_decimal(FIRST_VERSION + VERSION_STEP * index as f64),
                ts: self.generate_timestamp(Some(record_date))?,
            };
            dp.insert(entry_key(index + 1), entry);
        }

        Ok(Message {
            level: MESSAGE_LEVEL.to_string(),
            s: MESSAGE_SOURCE.to_string(),
            m: MESSAGE_KIND.to_string(),
            pn: MESSAGE_PARTNER.to_string(),
            lid: MESSAGE_LOCATION.to_string(),
            pst: MESSAGE_STATE.to_string(),
            body: Body { c: count, dp },
        })
    }

    /// Build a full document of `record_count` records
    ///
    /// # Errors
    ///
    /// Propagates timestamp generation failures; nothing is partially
    /// returned.
    pub fn produce_document(&mut self) -> Result<Document> {
        let start = Instant::now();
        log_op_start!(OP_GENERATE, record_count = self.config.record_count);

        match self.build_records() {
            Ok(output) => {
                log_op_end!(
                    OP_GENERATE,
                    duration_ms = start.elapsed().as_millis() as u64,
                    record_count = output.len()
                );
                Ok(Document { output })
            }
            Err(err) => {
                log_op_error!(
                    OP_GENERATE,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn build_records(&mut self) -> Result<Vec<Record>> {
        (0..self.config.record_count)
            .map(|index| {
                let timestamp = self.generate_timestamp(None)?;
                let record_date = parse_timestamp(&timestamp)?;
                let message = self.generate_message(&record_date)?;
                tracing::debug!(
                    record_index = index + 1,
                    timestamp = %timestamp,
                    "generated record"
                );
                Ok(Record { timestamp, message })
            })
            .collect()
    }

    fn draw(&mut self, field: &'static str, low: u32, high: u32) -> Result<u32> {
        if low > high {
            return Err(StampError::EmptyRange { field, low, high });
        }
        Ok(self.rng.random_range(low..=high))
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
