use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, Weak};

/// A mount point in the page model. Animation tasks hold it behind a `Weak`
/// so a detached element stops its animation instead of leaking the loop.
#[derive(Debug, Default, Clone)]
pub struct Element {
    text: String,
    classes: BTreeSet<String>,
}

pub type ElementRef = Arc<Mutex<Element>>;
pub type WeakElementRef = Weak<Mutex<Element>>;

impl Element {
    pub fn new() -> ElementRef {
        Arc::new(Mutex::new(Element::default()))
    }

    pub fn with_text(text: &str) -> ElementRef {
        Arc::new(Mutex::new(Element {
            text: text.to_string(),
            classes: BTreeSet::new(),
        }))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// Axis-aligned box in page coordinates, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Overlap of two rects, or `None` when they do not intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        if left < right && top < bottom {
            Some(Rect::new(left, top, right, bottom))
        } else {
            None
        }
    }
}
