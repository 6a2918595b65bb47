use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::SCROLL_SPY_OFFSET_PX;
use crate::utils::dom;

const ACTIVE_CLASS: &str = "active";

/// Vertical extent of one tagged content section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Section under the sticky header at `scroll_y`.
///
/// When ranges overlap the first section in document order wins, so a later
/// section nested inside an earlier one never takes the highlight from it.
/// A last-match scan would pick the nested section instead.
pub fn current_section(sections: &[SectionBounds], scroll_y: f64) -> Option<&str> {
    let position = scroll_y + SCROLL_SPY_OFFSET_PX;
    sections
        .iter()
        .find(|section| section.contains(position))
        .map(|section| section.id.as_str())
}

/// Section id a TOC link points at (`#section-2` -> `section-2`).
pub fn link_target(href: &str) -> &str {
    href.strip_prefix('#').unwrap_or(href)
}

pub trait TocView {
    fn sections(&self) -> Vec<SectionBounds>;
    fn link_hrefs(&self) -> Vec<String>;
    fn set_entry_active(&self, index: usize, active: bool);
    fn scroll_y(&self) -> f64;
}

/// Marks the entry for the current section and clears the rest.
pub fn update_toc(view: &impl TocView) -> Option<String> {
    let sections = view.sections();
    let current = current_section(&sections, view.scroll_y()).map(str::to_string);
    for (index, href) in view.link_hrefs().iter().enumerate() {
        let active = current.as_deref() == Some(link_target(href));
        view.set_entry_active(index, active);
    }
    current
}

pub struct DomToc {
    links: Vec<Element>,
    sections: Vec<HtmlElement>,
}

impl TocView for DomToc {
    fn sections(&self) -> Vec<SectionBounds> {
        self.sections
            .iter()
            .map(|section| SectionBounds {
                id: section.id(),
                top: section.offset_top() as f64,
                height: section.offset_height() as f64,
            })
            .collect()
    }

    fn link_hrefs(&self) -> Vec<String> {
        self.links
            .iter()
            .map(|link| link.get_attribute("href").unwrap_or_default())
            .collect()
    }

    // the highlighted element is the list item around the link
    fn set_entry_active(&self, index: usize, active: bool) {
        let Some(item) = self.links.get(index).and_then(|l| l.parent_element()) else {
            return;
        };
        let classes = item.class_list();
        let _ = if active {
            classes.add_1(ACTIVE_CLASS)
        } else {
            classes.remove_1(ACTIVE_CLASS)
        };
    }

    fn scroll_y(&self) -> f64 {
        dom::scroll_y()
    }
}

/// Highlights TOC entries while the page scrolls, at most once per frame.
pub fn init(document: &Document) {
    let links = dom::query_all(document, ".event-toc a");
    let sections: Vec<HtmlElement> = dom::query_all(document, ".event-content[id^=\"section-\"]")
        .into_iter()
        .filter_map(|e| e.dyn_into().ok())
        .collect();
    if links.is_empty() || sections.is_empty() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };

    let toc = Rc::new(DomToc { links, sections });
    update_toc(&*toc);

    let pending_frame: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let on_frame = Rc::new(Closure::<dyn Fn()>::new({
        let pending_frame = pending_frame.clone();
        move || {
            pending_frame.set(None);
            update_toc(&*toc);
        }
    }));

    let on_scroll = Closure::<dyn Fn()>::new({
        let window = window.clone();
        move || {
            if let Some(frame) = pending_frame.take() {
                let _ = window.cancel_animation_frame(frame);
            }
            match window.request_animation_frame((*on_frame).as_ref().unchecked_ref()) {
                Ok(frame) => pending_frame.set(Some(frame)),
                Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
            }
        }
    });
    let _ = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
    on_scroll.forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn section(id: &str, top: f64, height: f64) -> SectionBounds {
        SectionBounds {
            id: id.to_string(),
            top,
            height,
        }
    }

    struct FakeToc {
        sections: Vec<SectionBounds>,
        hrefs: Vec<String>,
        active: RefCell<Vec<bool>>,
        scroll_y: f64,
    }

    impl FakeToc {
        fn new(scroll_y: f64) -> Self {
            Self {
                sections: vec![
                    section("section-1", 0.0, 300.0),
                    section("section-2", 300.0, 500.0),
                ],
                hrefs: vec!["#section-1".into(), "#section-2".into()],
                active: RefCell::new(vec![true, false]),
                scroll_y,
            }
        }
    }

    impl TocView for FakeToc {
        fn sections(&self) -> Vec<SectionBounds> {
            self.sections.clone()
        }

        fn link_hrefs(&self) -> Vec<String> {
            self.hrefs.clone()
        }

        fn set_entry_active(&self, index: usize, active: bool) {
            self.active.borrow_mut()[index] = active;
        }

        fn scroll_y(&self) -> f64 {
            self.scroll_y
        }
    }

    #[test]
    fn offset_scroll_moves_highlight_to_second_section() {
        let toc = FakeToc::new(250.0);
        assert_eq!(update_toc(&toc).as_deref(), Some("section-2"));
        assert_eq!(*toc.active.borrow(), vec![false, true]);
    }

    #[test]
    fn top_of_page_highlights_first_section() {
        let toc = FakeToc::new(0.0);
        assert_eq!(update_toc(&toc).as_deref(), Some("section-1"));
        assert_eq!(*toc.active.borrow(), vec![true, false]);
    }

    #[test]
    fn past_every_section_clears_all_entries() {
        let toc = FakeToc::new(900.0);
        assert_eq!(update_toc(&toc), None);
        assert_eq!(*toc.active.borrow(), vec![false, false]);
    }

    #[test]
    fn range_end_is_exclusive() {
        let sections = [section("a", 0.0, 300.0), section("b", 300.0, 100.0)];
        assert_eq!(current_section(&sections, 100.0), Some("b"));
        assert_eq!(current_section(&sections, 99.0), Some("a"));
    }

    #[test]
    fn overlapping_ranges_pick_first_in_document_order() {
        let sections = [section("outer", 0.0, 1000.0), section("inner", 400.0, 100.0)];
        assert_eq!(current_section(&sections, 250.0), Some("outer"));
    }

    #[test]
    fn link_target_strips_hash() {
        assert_eq!(link_target("#section-3"), "section-3");
        assert_eq!(link_target("section-3"), "section-3");
    }
}
