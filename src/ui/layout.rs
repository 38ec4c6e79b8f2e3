//! Simple stack-based layout system (similar to SwiftUI/Flutter)

/// Represents a rectangular region
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, row: u16, col: u16) -> bool {
        row >= self.y && row < self.y.saturating_add(self.height) &&
        col >= self.x && col < self.x.saturating_add(self.width)
    }

    /// Overlapping region of two rects (zero-sized if disjoint)
    pub fn intersect(&self, other: Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.x.saturating_add(self.width).min(other.x.saturating_add(other.width));
        let bottom = self.y.saturating_add(self.height).min(other.y.saturating_add(other.height));
        Rect {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }

    /// A `width` x `height` rect centered on `owner`.
    ///
    /// When the rect is larger than the owner it is pinned to the owner's
    /// top-left corner instead of spilling past it.
    pub fn centered_on(owner: Rect, width: u16, height: u16) -> Rect {
        Rect {
            x: owner.x + owner.width.saturating_sub(width) / 2,
            y: owner.y + owner.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    /// Shrink by `padding` on every side
    pub fn inset(&self, padding: u16) -> Rect {
        Rect {
            x: self.x + padding,
            y: self.y + padding,
            width: self.width.saturating_sub(padding * 2),
            height: self.height.saturating_sub(padding * 2),
        }
    }
}

/// Column count of `s`, saturating at `u16::MAX`
pub fn text_width(s: &str) -> u16 {
    u16::try_from(s.chars().count()).unwrap_or(u16::MAX)
}

/// Size constraint for layout items
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Size {
    /// Fixed size in characters
    Fixed(u16),
    /// Flexible - takes up remaining space proportionally (weight)
    Flex(u16),
}

impl Default for Size {
    fn default() -> Self {
        Size::Flex(1)
    }
}

/// Size preferences reported by a widget to the layout engine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeHint {
    pub min_width: u16,
    pub min_height: u16,
    /// Flex weight along the stacking axis (0 = fixed)
    pub flex: u16,
}

/// A layout node
#[derive(Clone, Debug)]
pub enum LayoutNode {
    VStack {
        children: Vec<LayoutItem>,
        spacing: u16,
        padding: u16,
    },
    HStack {
        children: Vec<LayoutItem>,
        spacing: u16,
        padding: u16,
    },
    /// Leaf node (actual content)
    Leaf { id: String },
}

/// A layout item with size constraints
#[derive(Clone, Debug)]
pub struct LayoutItem {
    pub node: LayoutNode,
    pub width: Size,
    pub height: Size,
    pub min_width: u16,
    pub min_height: u16,
}

impl LayoutItem {
    pub fn vstack(children: Vec<LayoutItem>) -> Self {
        Self::with_node(LayoutNode::VStack { children, spacing: 0, padding: 0 }, Size::Flex(1))
    }

    pub fn hstack(children: Vec<LayoutItem>) -> Self {
        Self::with_node(LayoutNode::HStack { children, spacing: 0, padding: 0 }, Size::Flex(1))
    }

    pub fn leaf(id: impl Into<String>) -> Self {
        Self::with_node(LayoutNode::Leaf { id: id.into() }, Size::Fixed(1))
    }

    fn with_node(node: LayoutNode, height: Size) -> Self {
        Self {
            node,
            width: Size::Flex(1),
            height,
            min_width: 0,
            min_height: 0,
        }
    }

    pub fn width(mut self, w: Size) -> Self {
        self.width = w;
        self
    }

    pub fn height(mut self, h: Size) -> Self {
        self.height = h;
        self
    }

    pub fn spacing(mut self, s: u16) -> Self {
        match &mut self.node {
            LayoutNode::VStack { spacing, .. } | LayoutNode::HStack { spacing, .. } => *spacing = s,
            LayoutNode::Leaf { .. } => {}
        }
        self
    }

    pub fn padding(mut self, p: u16) -> Self {
        match &mut self.node {
            LayoutNode::VStack { padding, .. } | LayoutNode::HStack { padding, .. } => *padding = p,
            LayoutNode::Leaf { .. } => {}
        }
        self
    }
}

/// Compute the bounds of each direct child of a stack within `bounds`.
///
/// Leaves have no children and yield an empty list.
pub fn compute_child_bounds(item: &LayoutItem, bounds: Rect) -> Vec<Rect> {
    match &item.node {
        LayoutNode::VStack { children, spacing, padding } => {
            distribute(children, bounds.inset(*padding), *spacing, Axis::Vertical)
        }
        LayoutNode::HStack { children, spacing, padding } => {
            distribute(children, bounds.inset(*padding), *spacing, Axis::Horizontal)
        }
        LayoutNode::Leaf { .. } => Vec::new(),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

fn distribute(children: &[LayoutItem], bounds: Rect, spacing: u16, axis: Axis) -> Vec<Rect> {
    if children.is_empty() {
        return vec![];
    }

    // (main size, main min) along the stacking axis
    let main = |child: &LayoutItem| match axis {
        Axis::Vertical => (child.height, child.min_height),
        Axis::Horizontal => (child.width, child.min_width),
    };
    let available = match axis {
        Axis::Vertical => bounds.height,
        Axis::Horizontal => bounds.width,
    };

    let total_spacing = spacing * (children.len() as u16).saturating_sub(1);
    let available = available.saturating_sub(total_spacing);

    // First pass: fixed sizes and total flex weight
    let mut fixed_total = 0u16;
    let mut flex_total = 0u16;
    for child in children {
        match main(child) {
            (Size::Fixed(s), min) => fixed_total = fixed_total.saturating_add(s.max(min)),
            (Size::Flex(w), _) => flex_total += w,
        }
    }
    let flex_space = available.saturating_sub(fixed_total);

    // Second pass: assign sizes
    let mut rects = Vec::with_capacity(children.len());
    let mut offset = match axis {
        Axis::Vertical => bounds.y,
        Axis::Horizontal => bounds.x,
    };

    for child in children {
        let size = match main(child) {
            (Size::Fixed(s), min) => s.max(min),
            (Size::Flex(w), min) if flex_total > 0 => {
                ((flex_space as u32 * w as u32 / flex_total as u32) as u16).max(min)
            }
            (Size::Flex(_), min) => min,
        };

        let rect = match axis {
            Axis::Vertical => {
                let width = match child.width {
                    Size::Fixed(w) => w.max(child.min_width),
                    Size::Flex(_) => bounds.width,
                };
                Rect::new(bounds.x, offset, width, size)
            }
            Axis::Horizontal => {
                let height = match child.height {
                    Size::Fixed(h) => h.max(child.min_height),
                    Size::Flex(_) => bounds.height,
                };
                Rect::new(offset, bounds.y, size, height)
            }
        };
        rects.push(rect);
        offset = offset.saturating_add(size + spacing);
    }

    rects
}
