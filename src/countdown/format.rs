//! Remaining-time formatting

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Render milliseconds as zero-padded `HH,MM,SS`
pub fn time_to_string(ms: u64) -> String {
    ClockFace::from_millis(ms).to_string()
}

/// Remaining time split into the three labelled fields of the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFace {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl ClockFace {
    /// Split milliseconds into padded hour, minute and second fields
    pub fn from_millis(ms: u64) -> Self {
        Self {
            hours: format!("{:02}", ms / MS_PER_HOUR),
            minutes: format!("{:02}", (ms / MS_PER_MINUTE) % 60),
            seconds: format!("{:02}", (ms / MS_PER_SECOND) % 60),
        }
    }
}

impl std::fmt::Display for ClockFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_known_values() {
        assert_eq!(time_to_string(0), "00,00,00");
        assert_eq!(time_to_string(60_000), "00,01,00");
        assert_eq!(time_to_string(3_661_000), "01,01,01");
    }

    #[test]
    fn truncates_partial_seconds() {
        assert_eq!(time_to_string(59_999), "00,00,59");
        assert_eq!(time_to_string(999), "00,00,00");
    }

    #[test]
    fn every_second_of_the_countdown_is_padded() {
        for ms in (0..=60_000).step_by(250) {
            let text = time_to_string(ms);
            let fields: Vec<&str> = text.split(',').collect();
            assert_eq!(fields.len(), 3, "{text}");
            assert!(fields.iter().all(|f| f.len() == 2), "{text}");
            let seconds: u64 = fields[2].parse().unwrap();
            assert_eq!(seconds, (ms / 1000) % 60);
        }
    }

    #[test]
    fn hours_widen_instead_of_wrapping() {
        assert_eq!(time_to_string(100 * MS_PER_HOUR), "100,00,00");
    }

    #[test]
    fn clock_face_fields() {
        let face = ClockFace::from_millis(45_000);
        assert_eq!(face.hours, "00");
        assert_eq!(face.minutes, "00");
        assert_eq!(face.seconds, "45");
    }
}
