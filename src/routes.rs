//! Page routes and navigation between sections.
//!
//! A course lives at `/{course}`, a module at `/{course}/{module}`, a
//! section at `/{course}/{module}/{section}` and a mock exam at
//! `/exams/{id}`. Course and module routes land on their first section.
//! Links authored in content may be absolute or relative; relative links
//! resolve against the current route the way nested client-side routes do,
//! so `../section-1` from `/hnc/module-8/section-2` is the sibling
//! `/hnc/module-8/section-1`.

use std::collections::HashMap;

use tracing::debug;

use crate::error::RouteError;
use crate::models::{Catalog, Section};

pub const EXAMS_PREFIX: &str = "/exams";

pub fn course_route(course: &str) -> String {
    format!("/{course}")
}

pub fn module_route(course: &str, module: &str) -> String {
    format!("/{course}/{module}")
}

pub fn section_route(course: &str, module: &str, section: &str) -> String {
    format!("/{course}/{module}/{section}")
}

pub fn exam_route(id: &str) -> String {
    format!("{EXAMS_PREFIX}/{id}")
}

/// Collapse `.`, `..`, empty segments and trailing slashes into an
/// absolute path. `..` at the root stays at the root.
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    push_segments(&mut segments, path);
    join(&segments)
}

/// Resolve `link` as seen from the page at `from`.
pub fn resolve(from: &str, link: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    if !link.starts_with('/') {
        push_segments(&mut segments, from);
    }
    push_segments(&mut segments, link);
    join(&segments)
}

fn push_segments<'a>(segments: &mut Vec<&'a str>, path: &'a str) {
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
}

fn join(segments: &[&str]) -> String {
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Position of a section inside a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionRef {
    pub course: usize,
    pub module: usize,
    pub section: usize,
}

/// What a route points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Course(usize),
    Module(usize, usize),
    Section(SectionRef),
    Exam(usize),
}

#[derive(Debug)]
struct Entry {
    route: String,
    at: SectionRef,
    previous: Option<String>,
    next: Option<String>,
}

/// Route table for every page in a catalog. Sections are also kept in
/// reading order for previous/next navigation.
#[derive(Debug, Default)]
pub struct Router {
    entries: Vec<Entry>,
    by_route: HashMap<String, usize>,
    by_ref: HashMap<SectionRef, usize>,
    pages: Vec<(String, Page)>,
    by_page: HashMap<String, usize>,
}

impl Router {
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, RouteError> {
        let mut router = Self::default();

        for (ci, course) in catalog.courses.iter().enumerate() {
            router.insert_page(course_route(&course.slug), Page::Course(ci))?;
            for (mi, module) in course.modules.iter().enumerate() {
                router.insert_page(module_route(&course.slug, &module.slug), Page::Module(ci, mi))?;
                for (si, section) in module.sections.iter().enumerate() {
                    let route = section_route(&course.slug, &module.slug, &section.slug);
                    let at = SectionRef {
                        course: ci,
                        module: mi,
                        section: si,
                    };
                    router.insert_page(route.clone(), Page::Section(at))?;
                    router.insert_section(route, at, section);
                }
            }
        }
        for (ei, exam) in catalog.exams.iter().enumerate() {
            router.insert_page(exam_route(&exam.config.id), Page::Exam(ei))?;
        }

        debug!(
            pages = router.pages.len(),
            sections = router.entries.len(),
            "built route table"
        );
        Ok(router)
    }

    fn insert_page(&mut self, route: String, page: Page) -> Result<(), RouteError> {
        if self.by_page.contains_key(&route) {
            return Err(RouteError::Duplicate(route));
        }
        self.by_page.insert(route.clone(), self.pages.len());
        self.pages.push((route, page));
        Ok(())
    }

    fn insert_section(&mut self, route: String, at: SectionRef, section: &Section) {
        let previous = section.previous.as_ref().map(|link| resolve(&route, &link.to));
        let next = section.next.as_ref().map(|link| resolve(&route, &link.to));

        let index = self.entries.len();
        self.by_route.insert(route.clone(), index);
        self.by_ref.insert(at, index);
        self.entries.push(Entry {
            route,
            at,
            previous,
            next,
        });
    }

    /// Number of section pages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All section routes in reading order.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.route.as_str())
    }

    /// Every known route with what it points at: courses, modules and
    /// sections in catalog order, then mock exams.
    pub fn pages(&self) -> impl Iterator<Item = (&str, Page)> {
        self.pages.iter().map(|(route, page)| (route.as_str(), *page))
    }

    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|entry| entry.route.as_str())
    }

    /// True for any known route, not only sections.
    pub fn contains(&self, route: &str) -> bool {
        self.by_page.contains_key(&normalize(route))
    }

    /// What the page at `route` is.
    pub fn page(&self, route: &str) -> Result<Page, RouteError> {
        let route = normalize(route);
        self.by_page
            .get(&route)
            .map(|&index| self.pages[index].1)
            .ok_or(RouteError::NotFound(route))
    }

    /// The section shown for `route`: the section itself, or the first
    /// section of a course or module. Mock exams have none.
    pub fn landing(&self, route: &str) -> Option<&str> {
        let at = match self.page(route).ok()? {
            Page::Section(at) => at,
            Page::Course(course) => self.entries.iter().find(|e| e.at.course == course)?.at,
            Page::Module(course, module) => {
                self.entries
                    .iter()
                    .find(|e| e.at.course == course && e.at.module == module)?
                    .at
            }
            Page::Exam(_) => return None,
        };
        self.route_of(at)
    }

    /// The section at `route`. Course, module and exam routes are not
    /// sections.
    pub fn lookup(&self, route: &str) -> Result<SectionRef, RouteError> {
        let route = normalize(route);
        self.by_route
            .get(&route)
            .map(|&index| self.entries[index].at)
            .ok_or(RouteError::NotFound(route))
    }

    pub fn route_of(&self, at: SectionRef) -> Option<&str> {
        self.by_ref
            .get(&at)
            .map(|&index| self.entries[index].route.as_str())
    }

    /// The section a "Previous" button leads to.
    pub fn previous(&self, route: &str) -> Option<&str> {
        let index = *self.by_route.get(&normalize(route))?;
        let entry = &self.entries[index];
        if let Some(explicit) = &entry.previous {
            return self.landing(explicit);
        }

        let prior = self.entries.get(index.checked_sub(1)?)?;
        (prior.at.course == entry.at.course).then_some(prior.route.as_str())
    }

    /// The section a "Next" button leads to.
    pub fn next(&self, route: &str) -> Option<&str> {
        let index = *self.by_route.get(&normalize(route))?;
        let entry = &self.entries[index];
        if let Some(explicit) = &entry.next {
            return self.landing(explicit);
        }

        let after = self.entries.get(index + 1)?;
        (after.at.course == entry.at.course).then_some(after.route.as_str())
    }

    /// Find the section at `route` in the catalog the router was built from.
    pub fn section<'a>(&self, catalog: &'a Catalog, route: &str) -> Option<&'a Section> {
        let at = self.lookup(route).ok()?;
        catalog
            .courses
            .get(at.course)?
            .modules
            .get(at.module)?
            .sections
            .get(at.section)
    }
}
