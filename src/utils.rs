use std::{fs, path::Path, time::Duration};

pub const COLOUR_BLUE: u32 = 0x3498DB;
pub const COLOUR_ORANGE: u32 = 0xE67E22;
pub const COLOUR_GREEN: u32 = 0x2ECC71;
pub const COLOUR_BLURPLE: u32 = 0x5865F2;

/// Read a text file line by line, skipping blank lines. A missing file is
/// treated as an empty one.
pub fn load_lines(path: impl AsRef<Path>) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Format remaining seconds as `1d 4h 20m 15s`. Zero components are omitted,
/// except seconds which are always shown.
pub fn format_remaining(sec: i64) -> String {
    let sec = sec.max(0);
    let (d, sec) = (sec / 86400, sec % 86400);
    let (h, sec) = (sec / 3600, sec % 3600);
    let (m, sec) = (sec / 60, sec % 60);

    let mut parts = Vec::new();
    if d > 0 {
        parts.push(format!("{d}d"));
    }
    if h > 0 {
        parts.push(format!("{h}h"));
    }
    if m > 0 {
        parts.push(format!("{m}m"));
    }
    parts.push(format!("{sec}s"));

    parts.join(" ")
}

/// Pick the countdown refresh interval from the remaining time: coarse far
/// from the deadline, fine close to it.
pub fn choose_update_interval(sec_left: i64) -> Duration {
    if sec_left > 10 * 60 {
        Duration::from_secs(30)
    } else if sec_left > 3 * 60 {
        Duration::from_secs(5)
    } else if sec_left > 60 {
        Duration::from_secs(2)
    } else if sec_left > 10 {
        Duration::from_secs(1)
    } else if sec_left > 3 {
        Duration::from_millis(500)
    } else {
        Duration::from_millis(250)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_zero_seconds() {
        assert_eq!(format_remaining(0), "0s");
    }

    #[test]
    fn format_all_components() {
        assert_eq!(format_remaining(90061), "1d 1h 1m 1s");
    }

    #[test]
    fn format_omits_zero_components() {
        assert_eq!(format_remaining(3605), "1h 5s");
        assert_eq!(format_remaining(59), "59s");
        assert_eq!(format_remaining(120), "2m 0s");
    }

    #[test]
    fn interval_thresholds() {
        assert_eq!(choose_update_interval(700), Duration::from_secs(30));
        assert_eq!(choose_update_interval(200), Duration::from_secs(5));
        assert_eq!(choose_update_interval(65), Duration::from_secs(2));
        assert_eq!(choose_update_interval(15), Duration::from_secs(1));
        assert_eq!(choose_update_interval(5), Duration::from_millis(500));
        assert_eq!(choose_update_interval(1), Duration::from_millis(250));
    }

    #[test]
    fn load_lines_missing_file() {
        assert!(load_lines("does/not/exist.txt").is_empty());
    }
}
