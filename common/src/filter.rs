//! パネル自身のイベント判定
//!
//! パネル内のクリック（pass/redo/reset等）がキャプチャとして扱われないように、
//! イベント対象からルートまで親をたどる。

/// 親をたどれるノード
pub trait TreeNode: Sized {
    fn parent(&self) -> Option<Self>;
    fn is_same(&self, other: &Self) -> bool;
}

/// `target` が `root` 自身かその子孫ならtrue
pub fn is_panel_event<N: TreeNode>(root: &N, target: &N) -> bool {
    if target.is_same(root) {
        return true;
    }

    let mut current = target.parent();
    while let Some(node) = current {
        if node.is_same(root) {
            return true;
        }
        current = node.parent();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTree;

    #[test]
    fn test_root_itself() {
        let tree = MockTree::new(&[None]);
        assert!(is_panel_event(&tree.node(0), &tree.node(0)));
    }

    #[test]
    fn test_descendant() {
        // 0: body, 1: panel, 2: list, 3: link
        let tree = MockTree::new(&[None, Some(0), Some(1), Some(2)]);
        assert!(is_panel_event(&tree.node(1), &tree.node(3)));
        assert!(is_panel_event(&tree.node(1), &tree.node(2)));
    }

    #[test]
    fn test_outside_panel() {
        // 0: body, 1: panel, 2: article, 3: paragraph
        let tree = MockTree::new(&[None, Some(0), Some(0), Some(2)]);
        assert!(!is_panel_event(&tree.node(1), &tree.node(3)));
        assert!(!is_panel_event(&tree.node(1), &tree.node(0)));
    }
}
