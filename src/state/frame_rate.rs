// Frames-per-second counter for the status panel.
#[derive(Default, Debug, Clone)]
pub struct FrameRate {
    window_start_ms: Option<f64>,
    /// Frame intervals seen since the window opened.
    frames: u32,
}

impl FrameRate {
    /// Counts a frame; returns the rate once a full second has elapsed.
    /// The first frame only opens the window.
    pub fn tick(&mut self, now_ms: f64) -> Option<u32> {
        let Some(start) = self.window_start_ms else {
            self.window_start_ms = Some(now_ms);
            return None;
        };
        self.frames += 1;
        let elapsed = now_ms - start;
        if elapsed < 1000.0 {
            return None;
        }
        let fps = (self.frames as f64 * 1000.0 / elapsed).round() as u32;
        self.window_start_ms = Some(now_ms);
        self.frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_after_one_second() {
        let mut fr = FrameRate::default();
        let mut reported = None;
        for i in 0..=60 {
            if let Some(f) = fr.tick(i as f64 * 1000.0 / 60.0) {
                reported = Some(f);
            }
        }
        assert_eq!(reported, Some(60));
    }

    #[test]
    fn silent_within_window() {
        let mut fr = FrameRate::default();
        assert_eq!(fr.tick(0.0), None);
        assert_eq!(fr.tick(500.0), None);
        assert_eq!(fr.tick(1000.0), Some(2));
        assert_eq!(fr.tick(1100.0), None);
    }

    #[test]
    fn steady_rate_after_first_window() {
        let mut fr = FrameRate::default();
        let reports: Vec<u32> = (0..=90)
            .filter_map(|i| fr.tick(i as f64 * 1000.0 / 30.0))
            .collect();
        assert_eq!(reports, vec![30, 30, 30]);
    }
}
