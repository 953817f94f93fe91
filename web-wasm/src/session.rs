//! オーバーレイのキャプチャセッション
//!
//! カーソル本体（DOMリスナーを持つので非Send）を `Rc<RefCell<..>>` で保持し、
//! 変化のたびにスナップショットをLeptosのシグナルへ流す。

use crate::dom::{DomBinder, SharedCursor};
use dejapaw_common::{CaptureCursor, CursorSnapshot, Field, FieldValue, Record};
use leptos::prelude::*;
use std::rc::Rc;

/// UIが購読するカーソルの写し
#[derive(Clone, Copy)]
pub struct CursorMirror {
    pub set_values: WriteSignal<Vec<Option<FieldValue>>>,
    pub set_position: WriteSignal<usize>,
    pub set_ready: WriteSignal<bool>,
}

impl CursorMirror {
    pub fn publish(&self, snapshot: CursorSnapshot) {
        self.set_values.set(snapshot.values);
        self.set_position.set(snapshot.position);
        self.set_ready.set(snapshot.ready);
    }
}

pub struct OverlaySession {
    cursor: SharedCursor,
    mirror: CursorMirror,
}

impl OverlaySession {
    /// `root` 配下（パネル）で起きたイベントはキャプチャしない
    pub fn new(root: web_sys::Node, mirror: CursorMirror) -> Result<Self, String> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| "document is not available".to_string())?;

        let cursor = DomBinder::shared_cursor(
            document,
            root,
            Rc::new(move |snapshot| mirror.publish(snapshot)),
        );

        Ok(Self { cursor, mirror })
    }

    pub fn configure(&self, fields: Vec<Field>, values: Vec<Option<FieldValue>>) {
        self.update(|cursor| cursor.configure(fields, values));
    }

    pub fn skip(&self, index: usize) {
        if let Err(e) = self.update(|cursor| cursor.skip(index)) {
            log::warn!("pass failed: {}", e);
        }
    }

    pub fn redo(&self, index: usize) {
        if let Err(e) = self.update(|cursor| cursor.redo(index)) {
            log::warn!("redo failed: {}", e);
        }
    }

    pub fn reset(&self, index: usize) {
        if let Err(e) = self.update(|cursor| cursor.reset(index)) {
            log::warn!("reset failed: {}", e);
        }
    }

    pub fn set_value(&self, index: usize, value: Option<FieldValue>) {
        if let Err(e) = self.update(|cursor| cursor.set_value(index, value)) {
            log::warn!("input ignored: {}", e);
        }
    }

    /// 必須項目が揃っていれば送信用のレコード
    pub fn record(&self) -> Option<Record> {
        self.cursor.borrow().record()
    }

    /// 設定の読み込みに失敗したら前の項目を捨て、空の状態をUIへ流す
    pub fn clear(&self) {
        self.update(|cursor| cursor.clear());
    }

    /// パネルを閉じるときにリスナーをすべて外す
    pub fn release(&self) {
        self.cursor.borrow_mut().release();
    }

    /// 借用を解いてからシグナルへ反映する
    fn update<R>(&self, f: impl FnOnce(&mut CaptureCursor<DomBinder>) -> R) -> R {
        let (result, snapshot) = {
            let mut cursor = self.cursor.borrow_mut();
            let result = f(&mut cursor);
            (result, cursor.snapshot())
        };
        self.mirror.publish(snapshot);
        result
    }
}
