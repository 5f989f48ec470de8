use crate::domain::page::Rect;
use crate::utils::error::{FolioError, Result};
use std::collections::{BTreeSet, HashMap, HashSet};

/// CSS-style root margin. Positive values grow the effective viewport on that
/// side, negative values shrink it (the page uses `0px 0px -50px 0px` so a
/// target must clear the bottom 50px before it counts as visible).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    /// Parses the CSS shorthand: 1 to 4 whitespace-separated `<n>px` values.
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |reason: &str| FolioError::InvalidConfigValue {
            field: "reveal_margin".to_string(),
            value: spec.to_string(),
            reason: reason.to_string(),
        };

        let mut values = Vec::new();
        for part in spec.split_whitespace() {
            let number = part
                .strip_suffix("px")
                .ok_or_else(|| invalid("Margin values must end in 'px'"))?;
            let value: f64 = number
                .parse()
                .map_err(|_| invalid("Margin values must be numbers"))?;
            values.push(value);
        }

        match values.as_slice() {
            [all] => Ok(Margin {
                top: *all,
                right: *all,
                bottom: *all,
                left: *all,
            }),
            [vertical, horizontal] => Ok(Margin {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Margin {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Margin {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            _ => Err(invalid("Expected 1 to 4 margin values")),
        }
    }

    pub fn apply(&self, viewport: &Rect) -> Rect {
        Rect::new(
            viewport.left - self.left,
            viewport.top - self.top,
            viewport.right + self.right,
            viewport.bottom + self.bottom,
        )
    }
}

/// Fraction of the target's area inside the (margin-adjusted) viewport.
/// Zero-area targets count as fully visible once their point lies inside.
pub fn intersection_ratio(target: &Rect, root: &Rect) -> f64 {
    if target.area() == 0.0 {
        return if root.contains_point(target.left, target.top) {
            1.0
        } else {
            0.0
        };
    }
    match target.intersection(root) {
        Some(overlap) => overlap.area() / target.area(),
        None => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    /// Minimum visible-area fraction, 0..=1.
    pub threshold: f64,
    pub margin: Margin,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            margin: Margin::default(),
        }
    }
}

/// One-shot visibility watcher. Each target moves Idle → Triggered →
/// Terminal; a terminal target is dropped from the watch set and never
/// re-evaluated, even if re-observed or if its visibility recrosses the
/// threshold later. Independent instances share no state.
#[derive(Debug)]
pub struct RevealObserver {
    config: RevealConfig,
    watched: BTreeSet<String>,
    done: HashSet<String>,
}

impl RevealObserver {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            watched: BTreeSet::new(),
            done: HashSet::new(),
        }
    }

    pub fn observe(&mut self, target: &str) {
        if !self.done.contains(target) {
            self.watched.insert(target.to_string());
        }
    }

    pub fn unobserve(&mut self, target: &str) {
        self.watched.remove(target);
    }

    pub fn is_watching(&self, target: &str) -> bool {
        self.watched.contains(target)
    }

    /// Evaluates every watched target against the current layout, firing
    /// `on_reveal` once per target that crosses the threshold. Targets with
    /// no layout entry stay idle.
    pub fn process(
        &mut self,
        viewport: &Rect,
        layout: &HashMap<String, Rect>,
        mut on_reveal: impl FnMut(&str),
    ) {
        let root = self.config.margin.apply(viewport);
        let mut triggered = Vec::new();

        for target in &self.watched {
            let Some(rect) = layout.get(target) else {
                continue;
            };
            let ratio = intersection_ratio(rect, &root);
            if ratio > 0.0 && ratio >= self.config.threshold {
                triggered.push(target.clone());
            }
        }

        for target in triggered {
            self.watched.remove(&target);
            self.done.insert(target.clone());
            on_reveal(&target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 800.0)
    }

    fn layout(entries: &[(&str, Rect)]) -> HashMap<String, Rect> {
        entries
            .iter()
            .map(|(id, rect)| (id.to_string(), *rect))
            .collect()
    }

    #[test]
    fn test_margin_parse_forms() {
        assert_eq!(
            Margin::parse("5px").unwrap(),
            Margin {
                top: 5.0,
                right: 5.0,
                bottom: 5.0,
                left: 5.0
            }
        );
        assert_eq!(
            Margin::parse("0px 0px -50px 0px").unwrap(),
            Margin {
                top: 0.0,
                right: 0.0,
                bottom: -50.0,
                left: 0.0
            }
        );
        assert!(Margin::parse("10").is_err());
        assert!(Margin::parse("1px 2px 3px 4px 5px").is_err());
    }

    #[test]
    fn test_intersection_ratio_half_visible() {
        let root = viewport();
        // Bottom half extends below the viewport.
        let target = Rect::new(0.0, 700.0, 100.0, 900.0);
        assert!((intersection_ratio(&target, &root) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_negative_bottom_margin_delays_trigger() {
        let config = RevealConfig {
            threshold: 0.5,
            margin: Margin::parse("0px 0px -50px 0px").unwrap(),
        };
        let mut observer = RevealObserver::new(config);
        observer.observe("card");

        // Half the card is inside the raw viewport, but the shrunken root
        // (bottom pulled up 50px) only covers a quarter of it.
        let rects = layout(&[("card", Rect::new(0.0, 700.0, 100.0, 900.0))]);
        let mut fired = Vec::new();
        observer.process(&viewport(), &rects, |id| fired.push(id.to_string()));
        assert!(fired.is_empty());

        // Scrolled further: card now fully above the adjusted bottom edge.
        let rects = layout(&[("card", Rect::new(0.0, 500.0, 100.0, 700.0))]);
        observer.process(&viewport(), &rects, |id| fired.push(id.to_string()));
        assert_eq!(fired, vec!["card"]);
    }

    #[test]
    fn test_reveal_is_strictly_one_shot() {
        let mut observer = RevealObserver::new(RevealConfig::default());
        observer.observe("section");

        let visible = layout(&[("section", Rect::new(0.0, 100.0, 500.0, 300.0))]);
        let hidden = layout(&[("section", Rect::new(0.0, 2000.0, 500.0, 2200.0))]);

        let mut count = 0;
        observer.process(&viewport(), &visible, |_| count += 1);
        assert_eq!(count, 1);
        assert!(!observer.is_watching("section"));

        // Leave and re-enter the viewport repeatedly: no further triggers,
        // even after an explicit re-observe.
        observer.process(&viewport(), &hidden, |_| count += 1);
        observer.observe("section");
        observer.process(&viewport(), &visible, |_| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_unobserve_deregisters_before_trigger() {
        let mut observer = RevealObserver::new(RevealConfig::default());
        observer.observe("card");
        observer.unobserve("card");

        let visible = layout(&[("card", Rect::new(0.0, 100.0, 500.0, 300.0))]);
        let mut count = 0;
        observer.process(&viewport(), &visible, |_| count += 1);
        assert_eq!(count, 0);

        // Never triggered, so observing again still works.
        observer.observe("card");
        observer.process(&viewport(), &visible, |_| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_observers_are_independent() {
        let mut reveals = RevealObserver::new(RevealConfig::default());
        let mut stats = RevealObserver::new(RevealConfig {
            threshold: 0.5,
            margin: Margin::default(),
        });
        reveals.observe("card");
        stats.observe("stats");

        let rects = layout(&[
            ("card", Rect::new(0.0, 100.0, 500.0, 300.0)),
            ("stats", Rect::new(0.0, 400.0, 500.0, 600.0)),
        ]);

        let mut from_reveals = Vec::new();
        reveals.process(&viewport(), &rects, |id| from_reveals.push(id.to_string()));
        assert_eq!(from_reveals, vec!["card"]);
        assert!(stats.is_watching("stats"));
    }

    #[test]
    fn test_missing_layout_keeps_target_idle() {
        let mut observer = RevealObserver::new(RevealConfig::default());
        observer.observe("late");

        let mut count = 0;
        observer.process(&viewport(), &HashMap::new(), |_| count += 1);
        assert_eq!(count, 0);
        assert!(observer.is_watching("late"));
    }
}
