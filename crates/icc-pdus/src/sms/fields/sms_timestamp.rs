use core::fmt;

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, TimeZone, Timelike, Utc};
use icc_core::bcd::{bcd_to_octet, octet_to_bcd};
use icc_core::{IccErr, OctetBuffer};

const YEAR_OFFSET: i32 = 2000;
/// Sign bit of the swapped timezone octet
const TZ_NEGATIVE: u8 = 0x08;

/// 3GPP TS 23.040 clause 9.2.3.11 TP-Service-Centre-Time-Stamp, also used for TP-DT.
/// Fields are kept as transmitted so re-encoding reproduces the original octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmsTimestamp {
    /// Years since 2000
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Local time minus UTC, in quarter hours
    pub tz_quarters: i8,
}

impl SmsTimestamp {
    pub fn from_octetbuf(buf: &mut OctetBuffer) -> Result<Self, IccErr> {
        let year = buf.read_swapped_nibble_bcd_num(1)? as u8;
        let month = buf.read_swapped_nibble_bcd_num(1)? as u8;
        let day = buf.read_swapped_nibble_bcd_num(1)? as u8;
        let hour = buf.read_swapped_nibble_bcd_num(1)? as u8;
        let minute = buf.read_swapped_nibble_bcd_num(1)? as u8;
        let second = buf.read_swapped_nibble_bcd_num(1)? as u8;

        let tz_octet = buf.read_field("timezone")?;
        let quarters = octet_to_bcd(tz_octet & !TZ_NEGATIVE) as i8;
        let tz_quarters = if tz_octet & TZ_NEGATIVE != 0 { -quarters } else { quarters };

        Ok(SmsTimestamp { year, month, day, hour, minute, second, tz_quarters })
    }

    pub fn to_octetbuf(&self, buf: &mut OctetBuffer) {
        for v in [self.year, self.month, self.day, self.hour, self.minute, self.second] {
            buf.write_octet(bcd_to_octet(v));
        }
        let mut octet = bcd_to_octet(self.tz_quarters.unsigned_abs());
        if self.tz_quarters < 0 {
            octet |= TZ_NEGATIVE;
        }
        buf.write_octet(octet);
    }

    /// Local time at the given offset. The offset is rounded down to whole quarter hours.
    pub fn from_datetime(dt: &DateTime<FixedOffset>) -> Self {
        let offset_minutes = dt.offset().local_minus_utc() / 60;
        SmsTimestamp {
            year: (dt.year() - YEAR_OFFSET).rem_euclid(100) as u8,
            month: dt.month() as u8,
            day: dt.day() as u8,
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            second: dt.second() as u8,
            tz_quarters: (offset_minutes / 15) as i8,
        }
    }

    /// Current time. Uses the host's local offset unless `offset_minutes` is given.
    pub fn now(offset_minutes: Option<i32>) -> Self {
        let offset = offset_minutes
            .and_then(|m| FixedOffset::east_opt(m * 60))
            .unwrap_or_else(|| *Local::now().offset());
        Self::from_datetime(&Utc::now().with_timezone(&offset))
    }

    /// Interpret as an absolute point in time. None for impossible dates.
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.tz_quarters as i32 * 15 * 60)?;
        let naive = NaiveDate::from_ymd_opt(YEAR_OFFSET + self.year as i32, self.month as u32, self.day as u32)?
            .and_hms_opt(self.hour as u32, self.minute as u32, self.second as u32)?;
        offset.from_local_datetime(&naive).single()
    }

    /// Milliseconds since the UNIX epoch, if the timestamp is a valid date
    pub fn to_unix_millis(&self) -> Option<i64> {
        self.to_datetime().map(|dt| dt.timestamp_millis())
    }
}

impl fmt::Display for SmsTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "20{:02}-{:02}-{:02} {:02}:{:02}:{:02} {:+}q",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.tz_quarters
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timezone_sign() {
        // 2012-08-21 14:09:57, UTC+30min
        let mut buf = OctetBuffer::from_hex("21801241907520").unwrap();
        let ts = SmsTimestamp::from_octetbuf(&mut buf).unwrap();
        assert_eq!((ts.year, ts.month, ts.day), (12, 8, 21));
        assert_eq!((ts.hour, ts.minute, ts.second), (14, 9, 57));
        assert_eq!(ts.tz_quarters, 2);

        let mut buf = OctetBuffer::from_hex("21801241907528").unwrap();
        let ts = SmsTimestamp::from_octetbuf(&mut buf).unwrap();
        assert_eq!(ts.tz_quarters, -2);
        let mut out = OctetBuffer::new();
        ts.to_octetbuf(&mut out);
        assert_eq!(out.dump_hex(), "21801241907528");
    }

    #[test]
    fn test_to_datetime() {
        let ts = SmsTimestamp { year: 24, month: 2, day: 29, hour: 12, minute: 0, second: 0, tz_quarters: 4 };
        let dt = ts.to_datetime().unwrap();
        assert_eq!(dt.with_timezone(&Utc).hour(), 11);

        let bad = SmsTimestamp { month: 13, ..ts };
        assert!(bad.to_datetime().is_none());
    }

    #[test]
    fn test_from_datetime_with_offset() {
        let offset = FixedOffset::east_opt(-3 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(2031, 1, 5, 23, 59, 1).single().unwrap();
        let ts = SmsTimestamp::from_datetime(&dt);
        assert_eq!(ts.year, 31);
        assert_eq!(ts.tz_quarters, -12);
        let mut out = OctetBuffer::new();
        ts.to_octetbuf(&mut out);
        assert_eq!(out.dump_hex(), "13105032951029");
    }
}
