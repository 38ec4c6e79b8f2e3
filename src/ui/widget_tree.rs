//! Widget tree system for hierarchical UI composition
//!
//! The widget tree provides:
//! - Hierarchical widget composition (containers and leaves)
//! - Automatic layout computation via the layout engine
//! - Recursive drawing with theme support and clipping
//! - Event routing with focus management
//! - Tab navigation between focusable widgets

use crate::input::InputEvent;
use crate::screen::Screen;
use super::layout::{compute_child_bounds, LayoutItem, Rect, Size, SizeHint};
use super::theme::Theme;
use super::widget::{mouse_position, EventResult};
use std::any::Any;

/// Event dispatch phase for widget tree routing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventPhase {
    Capture,
    Target,
    Bubble,
}

/// A node in the widget tree - either a leaf widget or a container
pub enum WidgetNode {
    /// A leaf widget that draws itself
    Leaf {
        id: String,
        widget: Box<dyn TreeWidget>,
    },
    /// A container with layout and children
    Container {
        id: String,
        layout: ContainerLayout,
        children: Vec<WidgetNode>,
    },
}

/// Container layout direction
#[derive(Clone, Copy, Debug)]
pub enum ContainerLayout {
    /// Vertical stack (children arranged top to bottom)
    VStack { spacing: u16, padding: u16 },
    /// Horizontal stack (children arranged left to right)
    HStack { spacing: u16, padding: u16 },
}

impl WidgetNode {
    /// Create a new leaf widget node
    pub fn leaf(id: impl Into<String>, widget: impl TreeWidget + 'static) -> Self {
        WidgetNode::Leaf {
            id: id.into(),
            widget: Box::new(widget),
        }
    }

    /// Create a new vertical stack container
    pub fn vstack(id: impl Into<String>) -> ContainerBuilder {
        ContainerBuilder::new(id, ContainerLayout::VStack { spacing: 0, padding: 0 })
    }

    /// Create a new horizontal stack container
    pub fn hstack(id: impl Into<String>) -> ContainerBuilder {
        ContainerBuilder::new(id, ContainerLayout::HStack { spacing: 0, padding: 0 })
    }

    pub fn id(&self) -> &str {
        match self {
            WidgetNode::Leaf { id, .. } | WidgetNode::Container { id, .. } => id,
        }
    }

    /// Convert this node into a LayoutItem for the layout engine
    fn to_layout_item(&self) -> LayoutItem {
        match self {
            WidgetNode::Leaf { id, widget } => {
                let hint = widget.size_hint();
                let mut item = LayoutItem::leaf(id.clone());
                item.min_width = hint.min_width;
                item.min_height = hint.min_height;
                if widget.wants_tight_width() && hint.min_width > 0 {
                    item.width = Size::Fixed(hint.min_width);
                }
                if hint.flex > 0 {
                    item.height = Size::Flex(hint.flex);
                } else if hint.min_height > 0 {
                    item.height = Size::Fixed(hint.min_height);
                }
                item
            }
            WidgetNode::Container { children, layout, .. } => {
                let items = children.iter().map(|c| c.to_layout_item()).collect();
                match *layout {
                    ContainerLayout::VStack { spacing, padding } => {
                        LayoutItem::vstack(items).spacing(spacing).padding(padding)
                    }
                    ContainerLayout::HStack { spacing, padding } => {
                        LayoutItem::hstack(items).spacing(spacing).padding(padding)
                    }
                }
            }
        }
    }

    fn child_bounds(&self, bounds: Rect) -> Vec<Rect> {
        compute_child_bounds(&self.to_layout_item(), bounds)
    }

    /// Draw this node and all children
    pub fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        screen.push_clip(bounds);
        match self {
            WidgetNode::Leaf { widget, .. } => widget.draw(screen, bounds, theme),
            WidgetNode::Container { children, .. } => {
                for (child, rect) in children.iter().zip(self.child_bounds(bounds)) {
                    child.draw(screen, rect, theme);
                }
            }
        }
        screen.pop_clip();
    }

    /// Bounds of the widget at `path`, if it is laid out under this node
    fn bounds_of(&self, path: &[&str], bounds: Rect) -> Option<Rect> {
        if path.first() != Some(&self.id()) {
            return None;
        }
        if path.len() == 1 {
            return Some(bounds);
        }
        match self {
            WidgetNode::Leaf { .. } => None,
            WidgetNode::Container { children, .. } => children
                .iter()
                .zip(self.child_bounds(bounds))
                .find_map(|(child, rect)| child.bounds_of(&path[1..], rect)),
        }
    }

    fn find_path_at(&self, row: u16, col: u16, bounds: Rect) -> Option<Vec<String>> {
        if !bounds.contains(row, col) {
            return None;
        }
        match self {
            WidgetNode::Leaf { id, .. } => Some(vec![id.clone()]),
            WidgetNode::Container { id, children, .. } => {
                for (child, rect) in children.iter().zip(self.child_bounds(bounds)) {
                    if let Some(mut path) = child.find_path_at(row, col, rect) {
                        path.insert(0, id.clone());
                        return Some(path);
                    }
                }
                None
            }
        }
    }

    fn dispatch_event(
        &mut self,
        event: &InputEvent,
        bounds: Rect,
        target_path: &[String],
        depth: usize,
    ) -> EventResult {
        if target_path.get(depth).map(String::as_str) != Some(self.id()) {
            return EventResult::Ignored;
        }
        let is_target = depth + 1 == target_path.len();
        let rects = self.child_bounds(bounds);

        match self {
            WidgetNode::Leaf { widget, .. } if is_target => {
                widget.handle_event(event, bounds, EventPhase::Target)
            }
            WidgetNode::Leaf { .. } => EventResult::Ignored,
            WidgetNode::Container { .. } if is_target => EventResult::Ignored,
            WidgetNode::Container { children, .. } => children
                .iter_mut()
                .zip(rects)
                .find(|(child, _)| child.id() == target_path[depth + 1])
                .map(|(child, rect)| child.dispatch_event(event, rect, target_path, depth + 1))
                .unwrap_or(EventResult::Ignored),
        }
    }

    /// Find a widget by path (e.g., ["container", "child"])
    pub fn get_widget(&self, path: &[&str]) -> Option<&dyn TreeWidget> {
        match (self, path) {
            (WidgetNode::Leaf { id, widget }, [only]) if id == only => Some(widget.as_ref()),
            (WidgetNode::Container { id, children, .. }, [first, rest @ ..])
                if id == first && !rest.is_empty() =>
            {
                children.iter().find_map(|c| c.get_widget(rest))
            }
            _ => None,
        }
    }

    /// Find a mutable widget by path
    pub fn get_widget_mut(&mut self, path: &[&str]) -> Option<&mut dyn TreeWidget> {
        match (self, path) {
            (WidgetNode::Leaf { id, widget }, [only]) if id == only => Some(widget.as_mut()),
            (WidgetNode::Container { id, children, .. }, [first, rest @ ..])
                if id == first && !rest.is_empty() =>
            {
                children.iter_mut().find_map(|c| c.get_widget_mut(rest))
            }
            _ => None,
        }
    }

    /// Collect all focusable widget paths in order
    pub fn collect_focusable(&self, prefix: &[String]) -> Vec<Vec<String>> {
        let mut path = prefix.to_vec();
        path.push(self.id().to_string());

        match self {
            WidgetNode::Leaf { widget, .. } if widget.focusable() => vec![path],
            WidgetNode::Leaf { .. } => Vec::new(),
            WidgetNode::Container { children, .. } => children
                .iter()
                .flat_map(|child| child.collect_focusable(&path))
                .collect(),
        }
    }
}

/// Builder for creating container nodes
pub struct ContainerBuilder {
    id: String,
    layout: ContainerLayout,
    children: Vec<WidgetNode>,
}

impl ContainerBuilder {
    fn new(id: impl Into<String>, layout: ContainerLayout) -> Self {
        Self {
            id: id.into(),
            layout,
            children: Vec::new(),
        }
    }

    /// Set spacing between children
    pub fn spacing(mut self, spacing: u16) -> Self {
        match &mut self.layout {
            ContainerLayout::VStack { spacing: s, .. } | ContainerLayout::HStack { spacing: s, .. } => {
                *s = spacing
            }
        }
        self
    }

    /// Set padding around children
    pub fn padding(mut self, padding: u16) -> Self {
        match &mut self.layout {
            ContainerLayout::VStack { padding: p, .. } | ContainerLayout::HStack { padding: p, .. } => {
                *p = padding
            }
        }
        self
    }

    /// Add a child node
    pub fn child(mut self, node: WidgetNode) -> Self {
        self.children.push(node);
        self
    }

    /// Add a leaf widget child
    pub fn leaf(self, id: impl Into<String>, widget: impl TreeWidget + 'static) -> Self {
        self.child(WidgetNode::leaf(id, widget))
    }

    /// Reverse the order of the children added so far (right-to-left rows)
    pub fn mirrored(mut self, mirror: bool) -> Self {
        if mirror {
            self.children.reverse();
        }
        self
    }

    pub fn build(self) -> WidgetNode {
        WidgetNode::Container {
            id: self.id,
            layout: self.layout,
            children: self.children,
        }
    }
}

/// The main widget tree container
pub struct WidgetTree {
    root: WidgetNode,
    theme: Theme,
    /// Path to currently focused widget (e.g., ["root", "buttons", "ok"])
    focus_path: Vec<String>,
}

impl WidgetTree {
    pub fn with_theme(root: WidgetNode, theme: Theme) -> Self {
        Self {
            root,
            theme,
            focus_path: Vec::new(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Draw the entire tree
    pub fn draw(&self, screen: &mut Screen, bounds: Rect) {
        self.root.draw(screen, bounds, &self.theme);
    }

    /// Laid-out bounds of the widget at `path`
    pub fn bounds_of(&self, path: &[&str], bounds: Rect) -> Option<Rect> {
        self.root.bounds_of(path, bounds)
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: &InputEvent, bounds: Rect) -> EventResult {
        match event {
            InputEvent::Tab => {
                self.focus_next();
                return EventResult::Consumed;
            }
            InputEvent::ShiftTab => {
                self.focus_prev();
                return EventResult::Consumed;
            }
            _ => {}
        }

        let target_path = match mouse_position(event) {
            Some((row, col)) => self.root.find_path_at(row, col, bounds),
            None if self.focus_path.is_empty() => None,
            None => Some(self.focus_path.clone()),
        };
        let Some(path) = target_path else {
            return EventResult::Ignored;
        };

        // Click-to-focus
        if matches!(event, InputEvent::MouseClick { .. }) {
            let path_refs: Vec<&str> = path.iter().map(String::as_str).collect();
            if self.root.get_widget(&path_refs).is_some_and(|w| w.focusable()) {
                self.set_focus(&path_refs);
            }
        }

        self.root.dispatch_event(event, bounds, &path, 0)
    }

    /// Get a widget by path
    pub fn get_widget(&self, path: &[&str]) -> Option<&dyn TreeWidget> {
        self.root.get_widget(path)
    }

    /// Get a mutable widget by path
    pub fn get_widget_mut(&mut self, path: &[&str]) -> Option<&mut dyn TreeWidget> {
        self.root.get_widget_mut(path)
    }

    /// Get a widget by path, downcast to its concrete type
    pub fn get_as<T: TreeWidget>(&self, path: &[&str]) -> Option<&T> {
        self.get_widget(path).and_then(|w| w.as_any().downcast_ref::<T>())
    }

    /// Get a mutable widget by path, downcast to its concrete type
    pub fn get_as_mut<T: TreeWidget>(&mut self, path: &[&str]) -> Option<&mut T> {
        self.get_widget_mut(path).and_then(|w| w.as_any_mut().downcast_mut::<T>())
    }

    /// Move focus to the next focusable widget
    pub fn focus_next(&mut self) {
        let paths = self.root.collect_focusable(&[]);
        if paths.is_empty() {
            return;
        }
        let next = match paths.iter().position(|p| *p == self.focus_path) {
            Some(idx) => (idx + 1) % paths.len(),
            None => 0,
        };
        self.move_focus(paths[next].clone());
    }

    /// Move focus to the previous focusable widget
    pub fn focus_prev(&mut self) {
        let paths = self.root.collect_focusable(&[]);
        if paths.is_empty() {
            return;
        }
        let prev = match paths.iter().position(|p| *p == self.focus_path) {
            Some(idx) if idx > 0 => idx - 1,
            _ => paths.len() - 1,
        };
        self.move_focus(paths[prev].clone());
    }

    fn move_focus(&mut self, new_path: Vec<String>) {
        let refs: Vec<&str> = new_path.iter().map(String::as_str).collect();
        self.set_focus(&refs);
    }

    /// Set focus on a specific widget path
    pub fn set_focus(&mut self, path: &[&str]) {
        if !self.focus_path.is_empty() {
            let old: Vec<String> = std::mem::take(&mut self.focus_path);
            let old_refs: Vec<&str> = old.iter().map(String::as_str).collect();
            if let Some(widget) = self.root.get_widget_mut(&old_refs) {
                widget.set_focus(false);
            }
        }

        if let Some(widget) = self.root.get_widget_mut(path) {
            widget.set_focus(true);
        }
        self.focus_path = path.iter().map(|s| s.to_string()).collect();
    }

    /// Get the current focus path
    pub fn focus_path(&self) -> &[String] {
        &self.focus_path
    }

    /// Whether the widget at `path` holds focus
    pub fn is_focused(&self, path: &[&str]) -> bool {
        self.focus_path.len() == path.len() && self.focus_path.iter().zip(path).all(|(a, b)| a == b)
    }
}

/// Widget trait for use in widget trees
///
/// Widgets draw with theme colors and report size hints to the layout
/// engine.
pub trait TreeWidget: Any {
    /// Draw the widget using theme colors
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme);

    /// Handle an input event
    fn handle_event(&mut self, event: &InputEvent, bounds: Rect, phase: EventPhase) -> EventResult;

    /// Whether this widget wants a tight (fixed) width using its minimum size hint.
    fn wants_tight_width(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Get size hint for layout engine
    fn size_hint(&self) -> SizeHint {
        SizeHint::default()
    }

    /// Whether this widget can receive keyboard focus
    fn focusable(&self) -> bool {
        false
    }

    fn set_focus(&mut self, _focused: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widgets::{Button, Label, TextField};

    fn sample_tree() -> WidgetTree {
        let root = WidgetNode::vstack("root")
            .child(
                WidgetNode::hstack("row")
                    .leaf("label", Label::new("Name:").min_width(6))
                    .leaf("field", TextField::new("name"))
                    .build(),
            )
            .child(
                WidgetNode::hstack("buttons")
                    .leaf("ok", Button::new("OK", "ok"))
                    .leaf("cancel", Button::new("Cancel", "cancel"))
                    .build(),
            )
            .build();
        WidgetTree::with_theme(root, Theme::dos_dialog())
    }

    #[test]
    fn test_tab_cycles_focusable_widgets() {
        let mut tree = sample_tree();
        tree.focus_next();
        assert!(tree.is_focused(&["root", "row", "field"]));
        tree.focus_next();
        assert!(tree.is_focused(&["root", "buttons", "ok"]));
        tree.focus_next();
        assert!(tree.is_focused(&["root", "buttons", "cancel"]));
        tree.focus_next();
        assert!(tree.is_focused(&["root", "row", "field"]));
        tree.focus_prev();
        assert!(tree.is_focused(&["root", "buttons", "cancel"]));
    }

    #[test]
    fn test_disabled_button_is_skipped() {
        let mut tree = sample_tree();
        if let Some(ok) = tree.get_as_mut::<Button>(&["root", "buttons", "ok"]) {
            ok.set_enabled(false);
        }
        tree.focus_next();
        tree.focus_next();
        assert!(tree.is_focused(&["root", "buttons", "cancel"]));
    }

    #[test]
    fn test_mirrored_row_reverses_children() {
        let row = WidgetNode::hstack("row")
            .leaf("a", Label::new("a"))
            .leaf("b", Label::new("b"))
            .mirrored(true)
            .build();
        let WidgetNode::Container { children, .. } = row else {
            panic!("expected container");
        };
        let ids: Vec<&str> = children.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_click_focuses_and_dispatches() {
        let mut tree = sample_tree();
        let bounds = Rect::new(1, 1, 30, 2);
        let ok = tree.bounds_of(&["root", "buttons", "ok"], bounds).unwrap();
        let result = tree.handle_event(&InputEvent::MouseClick { row: ok.y, col: ok.x }, bounds);
        assert_eq!(result, EventResult::Action("ok".to_string()));
        assert!(tree.is_focused(&["root", "buttons", "ok"]));
    }
}
