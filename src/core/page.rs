use crate::core::counter::{self, AnimationHandle, DEFAULT_COUNTER_DURATION};
use crate::core::fetch::dataset;
use crate::core::render::{
    experience_markup, project_markup, render, technology_markup, Container,
};
use crate::core::reveal::{Margin, RevealConfig, RevealObserver};
use crate::core::typewriter::{self, Typewriter};
use crate::domain::model::{ExperienceLog, ProjectIndex, TechnologyCatalog};
use crate::domain::page::{ElementRef, Rect};
use crate::domain::ports::ContentSource;
use std::collections::HashMap;
use std::time::Duration;

/// Well-known id of the statistics block.
pub const STATS_BLOCK: &str = "stats";
/// Class applied to a reveal candidate when it first scrolls into view.
pub const REVEAL_CLASS: &str = "revealed";
/// A nav section activates this many pixels before its top reaches the
/// viewport top.
const NAV_ACTIVATION_BIAS: f64 = 200.0;

#[derive(Debug, Clone)]
pub struct SectionResources {
    pub technologies: String,
    pub projects: String,
    pub experience: String,
}

impl Default for SectionResources {
    fn default() -> Self {
        Self {
            technologies: "technologies.json".to_string(),
            projects: "projects.json".to_string(),
            experience: "experience.json".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub reveal: RevealConfig,
    pub stats: RevealConfig,
    pub counter_duration: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            reveal: RevealConfig {
                threshold: 0.1,
                margin: Margin {
                    bottom: -50.0,
                    ..Margin::default()
                },
            },
            stats: RevealConfig {
                threshold: 0.5,
                margin: Margin::default(),
            },
            counter_duration: DEFAULT_COUNTER_DURATION,
        }
    }
}

/// Outcome of one hydration pass, per section.
#[derive(Debug, Clone, Copy, Default)]
pub struct HydrateReport {
    pub technologies: bool,
    pub projects: bool,
    pub experience: bool,
}

impl HydrateReport {
    pub fn rendered(&self) -> usize {
        [self.technologies, self.projects, self.experience]
            .iter()
            .filter(|ok| **ok)
            .count()
    }

    pub fn all_failed(&self) -> bool {
        self.rendered() == 0
    }
}

/// The page model: three content containers, the reveal observers, and the
/// animation tasks they start. The generic reveal observer and the stats
/// observer are separate instances over disjoint target sets.
pub struct Page {
    pub technologies: Container,
    pub projects: Container,
    pub experience: Container,
    elements: HashMap<String, ElementRef>,
    reveals: RevealObserver,
    stats_observer: RevealObserver,
    stat_counters: Vec<(String, u64)>,
    counter_duration: Duration,
    animations: Vec<AnimationHandle>,
}

impl Page {
    pub fn new(config: PageConfig) -> Self {
        Self {
            technologies: Container::new(),
            projects: Container::new(),
            experience: Container::new(),
            elements: HashMap::new(),
            reveals: RevealObserver::new(config.reveal),
            stats_observer: RevealObserver::new(config.stats),
            stat_counters: Vec::new(),
            counter_duration: config.counter_duration,
            animations: Vec::new(),
        }
    }

    pub fn element(&self, id: &str) -> Option<&ElementRef> {
        self.elements.get(id)
    }

    pub fn add_reveal_candidate(&mut self, id: &str, element: ElementRef) {
        self.elements.insert(id.to_string(), element);
        self.reveals.observe(id);
    }

    /// Registers one numeric child of the statistics block. The block itself
    /// becomes the stats observer's single target.
    pub fn add_stat(&mut self, id: &str, element: ElementRef, target: u64) {
        self.elements.insert(id.to_string(), element);
        self.stat_counters.push((id.to_string(), target));
        self.stats_observer.observe(STATS_BLOCK);
    }

    /// Starts the hero typewriter. The task lives with the page's other
    /// animations and is cancelled on shutdown.
    pub fn attach_typewriter(&mut self, element: &ElementRef, typewriter: Typewriter) {
        self.animations.push(typewriter::run(element, typewriter));
    }

    /// Page-ready content load: the three resources are fetched in parallel
    /// and rendered independently. A failed section is logged and leaves its
    /// container exactly as it was; the others still render.
    pub async fn hydrate<S>(&mut self, source: &S, resources: &SectionResources) -> HydrateReport
    where
        S: ContentSource + ?Sized,
    {
        let (tech, projects, experience) = tokio::join!(
            dataset::<TechnologyCatalog, S>(source, &resources.technologies),
            dataset::<ProjectIndex, S>(source, &resources.projects),
            dataset::<ExperienceLog, S>(source, &resources.experience),
        );

        let mut report = HydrateReport::default();

        match tech {
            Ok(doc) => {
                render(&mut self.technologies, &doc.categories, technology_markup);
                report.technologies = true;
            }
            Err(e) => tracing::warn!("Technologies section left untouched: {}", e),
        }
        match projects {
            Ok(doc) => {
                render(&mut self.projects, &doc.projects, project_markup);
                report.projects = true;
            }
            Err(e) => tracing::warn!("Projects section left untouched: {}", e),
        }
        match experience {
            Ok(doc) => {
                render(&mut self.experience, &doc.experiences, experience_markup);
                report.experience = true;
            }
            Err(e) => tracing::warn!("Experience section left untouched: {}", e),
        }

        tracing::info!("Hydrated {}/3 content sections", report.rendered());
        report
    }

    /// Scroll/intersection notification: evaluates both observers against
    /// the current layout. Reveal candidates get `REVEAL_CLASS` once; the
    /// statistics block's first entry starts every registered counter.
    pub fn on_scroll(&mut self, viewport: &Rect, layout: &HashMap<String, Rect>) {
        let elements = &self.elements;
        self.reveals.process(viewport, layout, |id| {
            if let Some(element) = elements.get(id) {
                if let Ok(mut element) = element.lock() {
                    element.add_class(REVEAL_CLASS);
                }
            }
        });

        let mut stats_entered = false;
        self.stats_observer.process(viewport, layout, |id| {
            if id == STATS_BLOCK {
                stats_entered = true;
            }
        });
        if stats_entered {
            self.start_stat_counters();
        }
    }

    fn start_stat_counters(&mut self) {
        tracing::debug!("Statistics block entered view, starting counters");
        for (id, target) in &self.stat_counters {
            if let Some(element) = self.elements.get(id) {
                self.animations
                    .push(counter::animate(element, *target, self.counter_duration));
            }
        }
    }

    pub fn running_animations(&self) -> usize {
        self.animations
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Cancels every animation the page started.
    pub fn shutdown(&mut self) {
        for handle in self.animations.drain(..) {
            handle.cancel();
        }
    }
}

/// Nav highlight: the active section is the last one whose top edge has
/// scrolled within `NAV_ACTIVATION_BIAS` of the viewport top. `sections` is
/// (id, page offset) in document order.
pub fn active_section(scroll_y: f64, sections: &[(String, f64)]) -> Option<&str> {
    let mut current = None;
    for (id, top) in sections {
        if scroll_y >= top - NAV_ACTIVATION_BIAS {
            current = Some(id.as_str());
        }
    }
    current
}
