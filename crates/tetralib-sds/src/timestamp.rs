//! The 24-bit SDS timestamp, \[AI\] 29.5.4.4.
//!
//! Layout:
//!
//! ```text
//! byte 0: TT00MMMM   T = timeframe, M = month (1..12)
//! byte 1: DDDDDHHH   D = day of month, H = upper 3 bits of hour
//! byte 2: HHmmmmmm   H = lower 2 bits of hour, m = minute
//! ```
//!
//! Year and seconds are not transmitted; the decoder defaults the year to the
//! current calendar year in the timestamp's timeframe. The encoder always
//! writes timeframe type UTC.

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use tetralib_core::{Error, Result};

/// Timeframe type of a transmitted timestamp.
///
/// The two reserved timeframe codes are treated as local time, like the
/// elapsed-time code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Local,
    Utc,
}

/// A decoded SDS timestamp: wall-clock fields plus the timeframe they are
/// expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub timeframe: Timeframe,
    pub datetime: PrimitiveDateTime,
}

impl Timestamp {
    /// Build a UTC timestamp from an absolute moment.
    pub fn utc(moment: OffsetDateTime) -> Self {
        let utc = moment.to_offset(UtcOffset::UTC);
        Timestamp {
            timeframe: Timeframe::Utc,
            datetime: PrimitiveDateTime::new(utc.date(), utc.time()),
        }
    }

    /// The current moment as a UTC timestamp.
    pub fn now_utc() -> Self {
        Self::utc(OffsetDateTime::now_utc())
    }

    /// Decode a timestamp from its 3-byte transmitted form.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 3 {
            return Err(Error::Parse(format!(
                "a timestamp must be 3 bytes long, got {}",
                bytes.len()
            )));
        }

        let timeframe = match (bytes[0] & 0xC0) >> 6 {
            1 => Timeframe::Utc,
            _ => Timeframe::Local,
        };
        let month = Month::try_from(bytes[0] & 0x0F)
            .map_err(|_| Error::Parse(format!("invalid timestamp month: {}", bytes[0] & 0x0F)))?;
        let day = (bytes[1] & 0xF8) >> 3;
        let hour = ((bytes[1] & 0x07) << 2) | ((bytes[2] & 0xC0) >> 6);
        let minute = bytes[2] & 0x3F;

        let date = Date::from_calendar_date(current_year(timeframe), month, day)
            .map_err(|e| Error::Parse(format!("invalid timestamp date: {e}")))?;
        let time = Time::from_hms(hour, minute, 0)
            .map_err(|e| Error::Parse(format!("invalid timestamp time: {e}")))?;

        Ok(Timestamp {
            timeframe,
            datetime: PrimitiveDateTime::new(date, time),
        })
    }

    /// Encode this timestamp into its 3-byte transmitted form, always using
    /// timeframe type UTC. Construct outbound timestamps with
    /// [`Timestamp::utc`].
    pub fn encode(&self) -> [u8; 3] {
        let datetime = self.datetime;
        let mut result = [0u8; 3];
        result[0] = 0x40;
        result[0] |= u8::from(datetime.month()) & 0x0F;
        result[1] = (datetime.day() << 3) & 0xF8;
        result[1] |= (datetime.hour() >> 2) & 0x07;
        result[2] = (datetime.hour() << 6) & 0xC0;
        result[2] |= datetime.minute() & 0x3F;
        result
    }
}

/// The current calendar year in the given timeframe.
///
/// When the local offset cannot be determined the UTC year is used; the two
/// only differ within hours of new year.
fn current_year(timeframe: Timeframe) -> i32 {
    let now = OffsetDateTime::now_utc();
    match timeframe {
        Timeframe::Utc => now.year(),
        Timeframe::Local => UtcOffset::current_local_offset()
            .map(|offset| now.to_offset(offset).year())
            .unwrap_or_else(|_| now.year()),
    }
}
