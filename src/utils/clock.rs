use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

/// Represents an entity responsible for providing the current time and the viewer's timezone
/// across the application. This allows pinning both of them in tests and from the command line.
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Utc>;

    /// Offset currently in effect for the viewer.
    fn local_offset(&self) -> FixedOffset;

    fn local_time(&self) -> DateTime<FixedOffset> {
        self.time().with_timezone(&self.local_offset())
    }
}

/// Uses the system clock and the machine's timezone.
pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_offset(&self) -> FixedOffset {
        Local::now().offset().fix()
    }
}

/// Uses the system clock but overrides the viewer's offset.
pub struct OffsetClock(pub FixedOffset);

impl Clock for OffsetClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_offset(&self) -> FixedOffset {
        self.0
    }
}

/// Pins both time and offset.
#[derive(Clone, Copy)]
pub struct FixedClock {
    pub time: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl Clock for FixedClock {
    fn time(&self) -> DateTime<Utc> {
        self.time
    }

    fn local_offset(&self) -> FixedOffset {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, Utc};

    use super::{Clock, FixedClock};

    #[test]
    fn test_local_time() {
        let clock = FixedClock {
            time: DateTime::parse_from_rfc3339("2024-01-01T23:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            offset: FixedOffset::east_opt(3600).unwrap(),
        };

        assert_eq!(clock.local_time().to_rfc3339(), "2024-01-02T00:30:00+01:00");
    }
}
