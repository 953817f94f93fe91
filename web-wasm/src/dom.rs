//! DOMとの接続
//!
//! - DomBinder: キャプチャカーソルのリスナー登録（gloo `EventListener` をガードとして返す）
//! - DomCaptureContext: 選択テキスト・右クリック対象の画像・貼り付けテキストの読み出し
//! - DomNode: パネル判定用に親をたどれるノード

use dejapaw_common::{
    CaptureContext, CaptureCursor, CaptureOutcome, CaptureSpec, CursorSnapshot, ListenerBinder,
    TreeNode,
};
use gloo::events::{EventListener, EventListenerOptions};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, Document, Event, HtmlImageElement, Node};

/// パネル判定用ノード
#[derive(Clone)]
pub struct DomNode(pub Node);

impl TreeNode for DomNode {
    fn parent(&self) -> Option<Self> {
        self.0.parent_node().map(DomNode)
    }

    fn is_same(&self, other: &Self) -> bool {
        self.0.is_same_node(Some(&other.0))
    }
}

/// イベント1件分の抽出元
pub struct DomCaptureContext<'a> {
    event: &'a Event,
}

impl<'a> DomCaptureContext<'a> {
    pub fn new(event: &'a Event) -> Self {
        Self { event }
    }
}

impl CaptureContext for DomCaptureContext<'_> {
    fn take_selection(&self) -> Option<String> {
        let selection = web_sys::window()?.get_selection().ok().flatten()?;
        let text: String = selection.to_string().into();
        // 同じ選択を二度取らないよう解除する
        if let Err(e) = selection.remove_all_ranges() {
            log::debug!("selection could not be cleared: {:?}", e);
        }
        Some(text)
    }

    fn image_source(&self) -> Option<String> {
        let image = self.event.target()?.dyn_into::<HtmlImageElement>().ok()?;
        Some(image.current_src())
    }

    fn clipboard_text(&self) -> Option<String> {
        let event = self.event.dyn_ref::<ClipboardEvent>()?;
        event.clipboard_data()?.get_data("Text").ok()
    }
}

/// キャプチャ成功後に呼ばれる
pub type CaptureHook = Rc<dyn Fn(CursorSnapshot)>;

/// リスナーのクロージャと共有するカーソル
pub type SharedCursor = Rc<RefCell<CaptureCursor<DomBinder>>>;

/// document にキャプチャ用リスナーを張る
pub struct DomBinder {
    document: Document,
    root: DomNode,
    cursor: Weak<RefCell<CaptureCursor<DomBinder>>>,
    on_capture: CaptureHook,
}

impl DomBinder {
    /// `root` 配下（パネル）で起きたイベントはキャプチャしない
    pub fn shared_cursor(document: Document, root: Node, on_capture: CaptureHook) -> SharedCursor {
        Rc::new_cyclic(|weak: &Weak<RefCell<CaptureCursor<DomBinder>>>| {
            RefCell::new(CaptureCursor::new(DomBinder {
                document,
                root: DomNode(root),
                cursor: weak.clone(),
                on_capture,
            }))
        })
    }
}

impl ListenerBinder for DomBinder {
    type Guard = EventListener;

    fn bind(&mut self, index: usize, spec: CaptureSpec) -> EventListener {
        let cursor = self.cursor.clone();
        let root = self.root.clone();
        let on_capture = Rc::clone(&self.on_capture);

        // passiveなリスナーではpreventDefaultが効かない
        let options = if spec.trigger.suppresses_default() {
            EventListenerOptions::enable_prevent_default()
        } else {
            EventListenerOptions::default()
        };

        EventListener::new_with_options(
            &self.document,
            spec.trigger.event_name(),
            options,
            move |event| on_capture_event(&cursor, &root, &on_capture, index, spec, event),
        )
    }
}

fn on_capture_event(
    cursor: &Weak<RefCell<CaptureCursor<DomBinder>>>,
    root: &DomNode,
    on_capture: &CaptureHook,
    index: usize,
    spec: CaptureSpec,
    event: &Event,
) {
    let Some(cursor) = cursor.upgrade() else {
        return;
    };
    let target = event
        .target()
        .and_then(|target| target.dyn_into::<Node>().ok())
        .map(DomNode);
    let ctx = DomCaptureContext::new(event);

    let (outcome, snapshot) = {
        let Ok(mut cursor) = cursor.try_borrow_mut() else {
            log::warn!("capture cursor busy, dropping {} event", spec.trigger.event_name());
            return;
        };
        let outcome = cursor.dispatch(index, root, target.as_ref(), &ctx);
        (outcome, cursor.snapshot())
    };

    if spec.trigger.suppresses_default() && outcome != CaptureOutcome::PanelEvent {
        event.prevent_default();
        event.stop_propagation();
    }

    if outcome == CaptureOutcome::Captured {
        on_capture(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dejapaw_common::{is_panel_event, CursorState, Field, FieldType, FieldValue};
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const PIXEL_GIF: &str =
        "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn append(parent: &Node, tag: &str) -> web_sys::Element {
        let element = document().create_element(tag).expect("create_element failed");
        parent.append_child(&element).unwrap();
        element
    }

    /// バブリングする contextmenu を送り、既定動作が止められたかを返す
    fn fire_contextmenu(target: &web_sys::Element) -> bool {
        let init = web_sys::EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = Event::new_with_event_init_dict("contextmenu", &init).unwrap();
        target.dispatch_event(&event).unwrap();
        event.default_prevented()
    }

    #[wasm_bindgen_test]
    fn wasm_panel_descendant_is_panel_event() {
        let panel = document().create_element("div").unwrap();
        let list = append(&panel, "ol");
        let link = append(&list, "a");

        let root = DomNode(panel.clone().into());
        assert!(is_panel_event(&root, &DomNode(link.into())));
        assert!(is_panel_event(&root, &DomNode(panel.into())));
    }

    #[wasm_bindgen_test]
    fn wasm_page_element_is_not_panel_event() {
        let body = document().body().unwrap();
        let panel = append(&body, "div");
        let paragraph = append(&body, "p");

        let root = DomNode(panel.clone().into());
        assert!(!is_panel_event(&root, &DomNode(paragraph.clone().into())));

        body.remove_child(&panel).unwrap();
        body.remove_child(&paragraph).unwrap();
    }

    #[wasm_bindgen_test]
    fn wasm_selection_is_cleared_after_extract() {
        let body = document().body().unwrap();
        let paragraph = append(&body, "p");
        paragraph.set_text_content(Some("Book 1200"));

        let selection = web_sys::window().unwrap().get_selection().unwrap().unwrap();
        selection.select_all_children(&paragraph).unwrap();
        assert_eq!(String::from(selection.to_string()), "Book 1200");

        let event = Event::new("mouseup").unwrap();
        let ctx = DomCaptureContext::new(&event);
        assert_eq!(ctx.take_selection(), Some("Book 1200".to_string()));
        assert_eq!(String::from(selection.to_string()), "");
        // 解除済みなので二度目は空文字
        assert_eq!(ctx.take_selection(), Some(String::new()));

        body.remove_child(&paragraph).unwrap();
    }

    #[wasm_bindgen_test]
    async fn wasm_contextmenu_captures_only_page_images() {
        let body = document().body().unwrap();
        let panel = append(&body, "div");
        let panel_image = append(&panel, "img");
        let page_block = append(&body, "div");
        let image: HtmlImageElement = append(&body, "img").dyn_into().unwrap();
        image.set_src(PIXEL_GIF);
        JsFuture::from(image.decode()).await.unwrap();

        let captured = Rc::new(RefCell::new(Vec::<CursorSnapshot>::new()));
        let hook = Rc::clone(&captured);
        let cursor = DomBinder::shared_cursor(
            document(),
            panel.clone().into(),
            Rc::new(move |snapshot| hook.borrow_mut().push(snapshot)),
        );
        cursor
            .borrow_mut()
            .configure(vec![Field::new("cover", FieldType::Image)], vec![None]);

        // パネル内ではメニューを止めず、値も取らない
        assert!(!fire_contextmenu(&panel_image));
        // 画像以外では値は無いが、メニューは止める
        assert!(fire_contextmenu(&page_block));
        assert!(captured.borrow().is_empty());
        assert_eq!(cursor.borrow().state(), CursorState::Listening(0));

        assert!(fire_contextmenu(&image));
        assert!(!image.current_src().is_empty());
        assert_eq!(
            cursor.borrow().values(),
            &[Some(FieldValue::Text(image.current_src()))]
        );
        assert_eq!(cursor.borrow().state(), CursorState::Complete);
        assert_eq!(captured.borrow().len(), 1);

        // 完了後はリスナーが外れている
        assert!(!fire_contextmenu(&page_block));

        drop(cursor);
        body.remove_child(&panel).unwrap();
        body.remove_child(&page_block).unwrap();
        body.remove_child(&image).unwrap();
    }
}
