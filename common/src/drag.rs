//! パネルのドラッグ移動

use crate::types::PanelPosition;

/// ドラッグ開始座標を保持し、終了時にパネル位置を計算する
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    position: PanelPosition,
    origin: Option<(f64, f64)>,
}

impl DragTracker {
    pub fn position(&self) -> PanelPosition {
        self.position
    }

    pub fn start(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
    }

    /// ドラッグ終了。右端・下端のオフセットをそれぞれ開始点との差分だけ動かす
    ///
    /// 開始を見ていない終了イベントは無視する。
    pub fn end(&mut self, x: f64, y: f64) -> PanelPosition {
        if let Some((origin_x, origin_y)) = self.origin.take() {
            self.position.right += origin_x - x;
            self.position.bottom += origin_y - y;
            log::debug!(
                "panel moved to right={} bottom={}",
                self.position.right,
                self.position.bottom
            );
        }
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_moves_panel() {
        let mut tracker = DragTracker::default();
        tracker.start(500.0, 400.0);

        // 左上に動かすと右・下のオフセットが増える
        let position = tracker.end(450.0, 380.0);
        assert_eq!(position, PanelPosition { right: 70.0, bottom: 40.0 });

        // 開始点は一度の終了で消費される
        assert_eq!(tracker.end(0.0, 0.0), position);
    }

    #[test]
    fn test_drag_accumulates() {
        let mut tracker = DragTracker::default();
        tracker.start(100.0, 100.0);
        tracker.end(110.0, 90.0);
        tracker.start(200.0, 200.0);
        let position = tracker.end(195.0, 210.0);
        assert_eq!(position, PanelPosition { right: 15.0, bottom: 20.0 });
    }

    #[test]
    fn test_end_without_start_is_ignored() {
        let mut tracker = DragTracker::default();
        let position = tracker.end(300.0, 300.0);
        assert_eq!(position, PanelPosition::default());
    }
}
