use crate::domain::model::{ExperienceEntry, Project, TechnologyCategory};

/// Content of a mount point. `replace` is the only mutation: rendering builds
/// the complete fragment list first and swaps it in atomically, so a failed
/// render can never leave old and new content mixed.
#[derive(Debug, Default, Clone)]
pub struct Container {
    html: String,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    pub fn replace(&mut self, html: String) {
        self.html = html;
    }
}

/// Renders one fragment per item, in input order, then replaces the container
/// in a single step. An empty collection clears the container.
pub fn render<T>(container: &mut Container, items: &[T], to_markup: impl Fn(&T) -> String) {
    let html: String = items.iter().map(to_markup).collect();
    container.replace(html);
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn technology_markup(category: &TechnologyCategory) -> String {
    let items: String = category
        .technologies
        .iter()
        .map(|tech| format!("<li class=\"tech-item\">{}</li>", escape(tech)))
        .collect();

    format!(
        "<div class=\"tech-category\"><h3>{}</h3><ul class=\"tech-list\">{}</ul></div>",
        escape(&category.name),
        items
    )
}

pub fn project_markup(project: &Project) -> String {
    let tags: String = project
        .tags
        .iter()
        .map(|tag| format!("<span class=\"project-tag\">{}</span>", escape(tag)))
        .collect();

    // Links are emitted only when present; a project without a live demo or
    // repository just has fewer links, not broken ones.
    let mut links = String::new();
    if !project.live_link.is_empty() {
        links.push_str(&format!(
            "<a class=\"project-link\" href=\"{}\" rel=\"noopener noreferrer\">Live</a>",
            escape(&project.live_link)
        ));
    }
    if !project.github_link.is_empty() {
        links.push_str(&format!(
            "<a class=\"project-link\" href=\"{}\" rel=\"noopener noreferrer\">Code</a>",
            escape(&project.github_link)
        ));
    }

    format!(
        "<article class=\"project-card\" data-project-id=\"{}\">\
         <h3 class=\"project-title\">{}</h3>\
         <p class=\"project-desc\">{}</p>\
         <div class=\"project-tags\">{}</div>\
         <nav class=\"project-links\">{}</nav>\
         </article>",
        escape(&project.id),
        escape(&project.title),
        escape(&project.description),
        tags,
        links
    )
}

pub fn experience_markup(entry: &ExperienceEntry) -> String {
    format!(
        "<div class=\"experience-entry\">\
         <span class=\"experience-period\">{}</span>\
         <h3 class=\"experience-role\">{}</h3>\
         <span class=\"experience-company\">{}</span>\
         <p class=\"experience-desc\">{}</p>\
         </div>",
        escape(&entry.period),
        escape(&entry.role),
        escape(&entry.company),
        escape(&entry.description)
    )
}
