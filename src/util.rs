use std::time::Duration;

/// `MM:SS`, minutes keep growing past 59
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn format_throughput(rate: f64) -> String {
    format!("{:.2}", rate)
}

/// Maps a fall position onto `rows` screen rows; the floor lands on the last row
pub fn position_to_row(y: f64, floor: f64, rows: u16) -> u16 {
    if rows == 0 || floor <= 0.0 {
        return 0;
    }
    let last = (rows - 1) as f64;
    let ratio = (y / floor).clamp(0.0, 1.0);
    (ratio * last).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00");
        assert_eq!(format_elapsed(Duration::from_millis(999)), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(61)), "01:01");
        assert_eq!(format_elapsed(Duration::from_secs(3600)), "60:00");
    }

    #[test]
    fn test_format_throughput() {
        assert_eq!(format_throughput(0.0), "0.00");
        assert_eq!(format_throughput(2.456), "2.46");
        assert_eq!(format_throughput(10.0), "10.00");
    }

    #[test]
    fn test_position_to_row() {
        assert_eq!(position_to_row(0.0, 360.0, 10), 0);
        assert_eq!(position_to_row(-40.0, 360.0, 10), 0);
        assert_eq!(position_to_row(180.0, 360.0, 11), 5);
        assert_eq!(position_to_row(360.0, 360.0, 10), 9);
        assert_eq!(position_to_row(500.0, 360.0, 10), 9);
        assert_eq!(position_to_row(100.0, 360.0, 0), 0);
    }
}
