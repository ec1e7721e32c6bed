use crate::domain::ports::InputDriver;
use crate::utils::error::{Result, SnapError};
use enigo::{Axis, Button, Coordinate, Direction, Enigo, Mouse, Settings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 捲動腳本: 聚焦瀏覽器 → 捲到頂 → 分段往下 → 稍微往回讓清單置中
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollPlan {
    pub focus_pause_ms: u64,
    pub reset_scroll: i32,
    pub reset_pause_ms: u64,
    pub down_steps: u32,
    pub down_amount: i32,
    pub down_pause_ms: u64,
    pub recenter_delay_ms: u64,
    pub recenter_steps: u32,
    pub recenter_amount: i32,
    pub recenter_pause_ms: u64,
    pub settle_ms: u64,
    pub final_pause_ms: u64,
}

impl Default for ScrollPlan {
    fn default() -> Self {
        Self {
            focus_pause_ms: 1000,
            reset_scroll: 10,
            reset_pause_ms: 500,
            down_steps: 10,
            down_amount: 3,
            down_pause_ms: 200,
            recenter_delay_ms: 1000,
            recenter_steps: 2,
            recenter_amount: 2,
            recenter_pause_ms: 300,
            settle_ms: 2000,
            final_pause_ms: 1000,
        }
    }
}

impl ScrollPlan {
    /// 測試用: 所有等待時間歸零
    pub fn without_pauses() -> Self {
        Self {
            focus_pause_ms: 0,
            reset_pause_ms: 0,
            down_pause_ms: 0,
            recenter_delay_ms: 0,
            recenter_pause_ms: 0,
            settle_ms: 0,
            final_pause_ms: 0,
            ..Self::default()
        }
    }
}

/// Drive `driver` through `plan`. The first failing input event aborts the
/// script; the caller decides whether that is fatal.
pub fn run_input_script<D, P>(driver: &mut D, plan: &ScrollPlan, mut pause: P) -> Result<()>
where
    D: InputDriver + ?Sized,
    P: FnMut(Duration),
{
    let ms = Duration::from_millis;

    let (width, height) = driver.screen_size()?;
    driver.move_cursor(width / 2, height / 2)?;
    driver.click()?;
    pause(ms(plan.focus_pause_ms));

    tracing::info!("Scrolling to bring the ranked list into view...");
    driver.scroll(plan.reset_scroll)?;
    pause(ms(plan.reset_pause_ms));

    for _ in 0..plan.down_steps {
        driver.scroll(-plan.down_amount)?;
        pause(ms(plan.down_pause_ms));
    }

    pause(ms(plan.recenter_delay_ms));
    for _ in 0..plan.recenter_steps {
        driver.scroll(plan.recenter_amount)?;
        pause(ms(plan.recenter_pause_ms));
    }

    pause(ms(plan.settle_ms));
    pause(ms(plan.final_pause_ms));
    Ok(())
}

/// `enigo` 實作。enigo 的捲動方向與這裡相反 (正數向下)
pub struct EnigoDriver {
    enigo: Enigo,
}

impl EnigoDriver {
    pub fn connect() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| SnapError::input(format!("cannot connect to input backend: {}", e)))?;
        Ok(Self { enigo })
    }
}

impl InputDriver for EnigoDriver {
    fn screen_size(&mut self) -> Result<(i32, i32)> {
        self.enigo
            .main_display()
            .map_err(|e| SnapError::input(format!("cannot read display size: {}", e)))
    }

    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| SnapError::input(format!("move cursor to ({}, {}): {}", x, y, e)))
    }

    fn click(&mut self) -> Result<()> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| SnapError::input(format!("click: {}", e)))
    }

    fn scroll(&mut self, amount: i32) -> Result<()> {
        self.enigo
            .scroll(-amount, Axis::Vertical)
            .map_err(|e| SnapError::input(format!("scroll {}: {}", amount, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Event {
        Move(i32, i32),
        Click,
        Scroll(i32),
    }

    #[derive(Default)]
    struct RecordingDriver {
        events: Vec<Event>,
        fail_after: Option<usize>,
    }

    impl RecordingDriver {
        fn record(&mut self, event: Event) -> Result<()> {
            if self.fail_after == Some(self.events.len()) {
                return Err(SnapError::input("window lost focus"));
            }
            self.events.push(event);
            Ok(())
        }
    }

    impl InputDriver for RecordingDriver {
        fn screen_size(&mut self) -> Result<(i32, i32)> {
            Ok((1920, 1080))
        }

        fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
            self.record(Event::Move(x, y))
        }

        fn click(&mut self) -> Result<()> {
            self.record(Event::Click)
        }

        fn scroll(&mut self, amount: i32) -> Result<()> {
            self.record(Event::Scroll(amount))
        }
    }

    #[test]
    fn test_default_script_event_sequence() {
        let mut driver = RecordingDriver::default();
        run_input_script(&mut driver, &ScrollPlan::default(), |_| {}).unwrap();

        let mut expected = vec![Event::Move(960, 540), Event::Click, Event::Scroll(10)];
        expected.extend((0..10).map(|_| Event::Scroll(-3)));
        expected.extend((0..2).map(|_| Event::Scroll(2)));

        assert_eq!(driver.events, expected);
    }

    #[test]
    fn test_default_script_total_pause() {
        let mut driver = RecordingDriver::default();
        let mut total = Duration::ZERO;
        run_input_script(&mut driver, &ScrollPlan::default(), |d| total += d).unwrap();

        // 1s + 0.5s + 10 × 0.2s + 1s + 2 × 0.3s + 2s + 1s
        assert_eq!(total, Duration::from_millis(8100));
    }

    #[test]
    fn test_script_stops_at_first_failure() {
        let mut driver = RecordingDriver {
            fail_after: Some(3),
            ..Default::default()
        };
        let err = run_input_script(&mut driver, &ScrollPlan::without_pauses(), |_| {});

        assert!(matches!(err, Err(SnapError::InputError { .. })));
        assert_eq!(driver.events.len(), 3);
    }
}
