//! テスト用モック（DOMの代わり）

use crate::cursor::ListenerBinder;
use crate::filter::TreeNode;
use crate::registry::{CaptureContext, CaptureSpec, CaptureTrigger};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// 親インデックスの配列で表す木
pub struct MockTree {
    parents: Rc<Vec<Option<usize>>>,
}

impl MockTree {
    pub fn new(parents: &[Option<usize>]) -> Self {
        Self {
            parents: Rc::new(parents.to_vec()),
        }
    }

    pub fn node(&self, id: usize) -> MockNode {
        MockNode {
            id,
            parents: Rc::clone(&self.parents),
        }
    }
}

pub struct MockNode {
    id: usize,
    parents: Rc<Vec<Option<usize>>>,
}

impl TreeNode for MockNode {
    fn parent(&self) -> Option<Self> {
        self.parents[self.id].map(|id| MockNode {
            id,
            parents: Rc::clone(&self.parents),
        })
    }

    fn is_same(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Default)]
pub struct MockContext {
    pub selection: RefCell<Option<String>>,
    pub cleared: Cell<bool>,
    pub image: Option<String>,
    pub clipboard: Option<String>,
}

impl MockContext {
    pub fn with_selection(text: &str) -> Self {
        Self {
            selection: RefCell::new(Some(text.to_string())),
            ..Default::default()
        }
    }

    pub fn with_image(src: &str) -> Self {
        Self {
            image: Some(src.to_string()),
            ..Default::default()
        }
    }

    pub fn with_clipboard(text: &str) -> Self {
        Self {
            clipboard: Some(text.to_string()),
            ..Default::default()
        }
    }
}

impl CaptureContext for MockContext {
    /// 選択があったときだけ解除済みにする
    fn take_selection(&self) -> Option<String> {
        let taken = self.selection.borrow_mut().take();
        if taken.is_some() {
            self.cleared.set(true);
        }
        taken
    }

    fn image_source(&self) -> Option<String> {
        self.image.clone()
    }

    fn clipboard_text(&self) -> Option<String> {
        self.clipboard.clone()
    }
}

#[derive(Default)]
pub struct BindLogInner {
    pub live: usize,
    pub max_live: usize,
    pub bound: Vec<(usize, CaptureTrigger)>,
    pub released: Vec<usize>,
}

/// 登録・解除の記録
#[derive(Clone, Default)]
pub struct BindLog(Rc<RefCell<BindLogInner>>);

impl BindLog {
    pub fn live(&self) -> usize {
        self.0.borrow().live
    }

    pub fn max_live(&self) -> usize {
        self.0.borrow().max_live
    }

    pub fn bound(&self) -> Vec<(usize, CaptureTrigger)> {
        self.0.borrow().bound.clone()
    }

    pub fn released(&self) -> Vec<usize> {
        self.0.borrow().released.clone()
    }
}

pub struct MockBinder {
    log: BindLog,
}

impl MockBinder {
    pub fn new() -> (Self, BindLog) {
        let log = BindLog::default();
        (Self { log: log.clone() }, log)
    }
}

pub struct MockGuard {
    index: usize,
    log: BindLog,
}

impl Drop for MockGuard {
    fn drop(&mut self) {
        let mut inner = self.log.0.borrow_mut();
        inner.live -= 1;
        inner.released.push(self.index);
    }
}

impl ListenerBinder for MockBinder {
    type Guard = MockGuard;

    fn bind(&mut self, index: usize, spec: CaptureSpec) -> Self::Guard {
        let mut inner = self.log.0.borrow_mut();
        inner.live += 1;
        inner.max_live = inner.max_live.max(inner.live);
        inner.bound.push((index, spec.trigger));
        MockGuard {
            index,
            log: self.log.clone(),
        }
    }
}
