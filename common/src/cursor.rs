//! キャプチャカーソル
//!
//! 項目リスト・値配列・カーソル位置を持つ状態機械。
//! 待ち受け中は現在の項目のリスナーを1つだけ登録し、遷移のたびに
//! 古い登録を解除してから新しい登録を取る。
//!
//! 状態:
//! - Idle: 未設定、または解放済み（リスナーなし）
//! - Listening(i): 項目iのキャプチャ待ち
//! - Complete: カーソルが末尾に到達

use crate::error::{Error, Result};
use crate::filter::{is_panel_event, TreeNode};
use crate::record::{assemble, Record};
use crate::registry::{self, CaptureContext, CaptureSpec};
use crate::types::{Field, FieldValue};
use crate::validation;

/// DOMリスナーの登録口
///
/// `bind` が返すガードをdropすると登録が解除される。
pub trait ListenerBinder {
    type Guard;

    fn bind(&mut self, index: usize, spec: CaptureSpec) -> Self::Guard;
}

/// 外から見たカーソルの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Idle,
    Listening(usize),
    Complete,
}

/// イベント1件の処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// 値を保存してカーソルを進めた
    Captured,
    /// パネル内で発生したイベント
    PanelEvent,
    /// 既に待ち受けていない項目宛てのイベント
    Stale,
    /// 抽出結果が空（選択なし、画像以外など）
    NoValue,
}

enum Phase<G> {
    Idle,
    Listening {
        index: usize,
        spec: CaptureSpec,
        _guard: G,
    },
    Complete,
}

/// UIへ反映するための状態のコピー
#[derive(Debug, Clone, PartialEq)]
pub struct CursorSnapshot {
    pub state: CursorState,
    pub position: usize,
    pub values: Vec<Option<FieldValue>>,
    pub ready: bool,
}

pub struct CaptureCursor<B: ListenerBinder> {
    fields: Vec<Field>,
    values: Vec<Option<FieldValue>>,
    position: usize,
    binder: B,
    phase: Phase<B::Guard>,
}

impl<B: ListenerBinder> CaptureCursor<B> {
    pub fn new(binder: B) -> Self {
        Self {
            fields: Vec::new(),
            values: Vec::new(),
            position: 0,
            binder,
            phase: Phase::Idle,
        }
    }

    /// 項目リストを差し替え、先頭から待ち受けをやり直す
    ///
    /// `values` は項目数に合わせて切り詰め・補完される。
    pub fn configure(&mut self, fields: Vec<Field>, mut values: Vec<Option<FieldValue>>) {
        self.release();
        values.resize(fields.len(), None);
        log::info!("capture session configured with {} fields", fields.len());
        self.fields = fields;
        self.values = values;
        self.position = 0;
        self.rearm();
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn values(&self) -> &[Option<FieldValue>] {
        &self.values
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn state(&self) -> CursorState {
        match self.phase {
            Phase::Idle => CursorState::Idle,
            Phase::Listening { index, .. } => CursorState::Listening(index),
            Phase::Complete => CursorState::Complete,
        }
    }

    pub fn is_ready(&self) -> bool {
        validation::is_ready(&self.fields, &self.values)
    }

    /// 必須項目が揃っていれば送信用のレコード
    pub fn record(&self) -> Option<Record> {
        self.is_ready().then(|| assemble(&self.fields, &self.values))
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            state: self.state(),
            position: self.position,
            values: self.values.clone(),
            ready: self.is_ready(),
        }
    }

    /// 現在のリスナーから届いたイベントを処理する
    ///
    /// パネル内のイベントは値として扱わない。`target` が無いイベントはページ側とみなす。
    pub fn dispatch<N, C>(
        &mut self,
        index: usize,
        root: &N,
        target: Option<&N>,
        ctx: &C,
    ) -> CaptureOutcome
    where
        N: TreeNode,
        C: CaptureContext + ?Sized,
    {
        if target.is_some_and(|target| is_panel_event(root, target)) {
            return CaptureOutcome::PanelEvent;
        }
        self.handle_event(index, ctx)
    }

    /// 抽出して保存する（パネル判定済みのイベント用）
    pub fn handle_event<C: CaptureContext + ?Sized>(
        &mut self,
        index: usize,
        ctx: &C,
    ) -> CaptureOutcome {
        let spec = match self.phase {
            Phase::Listening {
                index: active,
                spec,
                ..
            } if active == index => spec,
            _ => {
                log::debug!("dropping event for inactive field {}", index);
                return CaptureOutcome::Stale;
            }
        };

        match spec.extract(ctx) {
            Some(value) => {
                self.capture(index, value);
                CaptureOutcome::Captured
            }
            None => CaptureOutcome::NoValue,
        }
    }

    /// 待ち受け中の項目に値を入れて次へ進む
    ///
    /// 待ち受けていない項目、空の値はfalse（遷移しない）。
    pub fn capture(&mut self, index: usize, value: FieldValue) -> bool {
        if self.state() != CursorState::Listening(index) || !value.is_filled() {
            return false;
        }

        log::debug!("captured field {} ({})", index, self.fields[index].name);
        self.values[index] = Some(value);
        self.position = index + 1;
        self.rearm();
        true
    }

    /// pass: 値なしで次の項目へ
    pub fn skip(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        log::info!("pass field {}", index);
        self.position = index + 1;
        self.rearm();
        Ok(())
    }

    /// redo: カーソルを戻して再キャプチャ。既存の値は上書きされるまで残る
    pub fn redo(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        log::info!("redo field {}", index);
        self.position = index;
        self.rearm();
        Ok(())
    }

    /// reset: 値を消す。カーソルは動かさない
    pub fn reset(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        log::info!("reset field {}", index);
        self.values[index] = None;
        Ok(())
    }

    /// パネルのフォームから直接入力された値
    pub fn set_value(&mut self, index: usize, value: Option<FieldValue>) -> Result<()> {
        self.check_index(index)?;
        self.values[index] = value.filter(FieldValue::is_filled);
        Ok(())
    }

    /// リスナーを解除してIdleへ
    pub fn release(&mut self) {
        if let Phase::Listening { index, .. } = self.phase {
            log::debug!("releasing listener for field {}", index);
        }
        self.phase = Phase::Idle;
    }

    /// 項目・値ごと捨てて未設定に戻す（設定の読み込み失敗時）
    pub fn clear(&mut self) {
        self.release();
        self.fields.clear();
        self.values.clear();
        self.position = 0;
        log::info!("capture session cleared");
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.fields.len() {
            Ok(())
        } else {
            log::warn!("field index {} out of range", index);
            Err(Error::FieldIndex {
                index,
                len: self.fields.len(),
            })
        }
    }

    /// 現在の位置から待ち受けを張り直す
    ///
    /// 直接入力の項目は同期的に読み飛ばす。
    fn rearm(&mut self) {
        // 古い登録は新しい登録より先に解除する
        self.phase = Phase::Idle;

        while let Some(field) = self.fields.get(self.position) {
            match registry::resolve(field.field_type) {
                Some(spec) => {
                    let index = self.position;
                    log::debug!(
                        "listening for {} on field {} ({})",
                        spec.trigger.event_name(),
                        index,
                        field.name
                    );
                    let guard = self.binder.bind(index, spec);
                    self.phase = Phase::Listening {
                        index,
                        spec,
                        _guard: guard,
                    };
                    return;
                }
                None => {
                    log::debug!("skipping direct input field {} ({})", self.position, field.name);
                    self.position += 1;
                }
            }
        }

        log::debug!("capture complete");
        self.phase = Phase::Complete;
    }
}
