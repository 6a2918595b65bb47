use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlButtonElement, HtmlElement};
use yew::prelude::*;

use crate::config::{
    MEMBER_AUTOPLAY_MS, MEMBER_GAP_PX, MOBILE_MAX_WIDTH, RESIZE_DEBOUNCE_MS, TABLET_MAX_WIDTH,
};
use crate::sheets::records::{fetch_member_logos, ImageRecord};
use crate::utils::api::{SheetClient, SheetError};
use crate::utils::autoplay::{navigate, Autoplay, BrowserTicker, Debounce};
use crate::utils::dom;

/// How many logos fit side by side at the given viewport width.
pub fn logos_per_view(viewport_width: f64) -> usize {
    if viewport_width <= MOBILE_MAX_WIDTH {
        2
    } else if viewport_width <= TABLET_MAX_WIDTH {
        4
    } else {
        5
    }
}

/// Left-most visible logo. Forward navigation wraps to the start once the
/// last full view is reached, backward navigation stops at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberCursor {
    len: usize,
    index: usize,
    // bumped on resize so the track offset is re-measured
    layout: u32,
}

impl MemberCursor {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            layout: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn max_index(&self, per_view: usize) -> usize {
        self.len.saturating_sub(per_view)
    }

    pub fn prev(self) -> Self {
        Self {
            index: self.index.saturating_sub(1),
            ..self
        }
    }

    pub fn next(self, per_view: usize) -> Self {
        let index = if self.index < self.max_index(per_view) {
            self.index + 1
        } else {
            0
        };
        Self { index, ..self }
    }

    pub fn clamp(self, per_view: usize) -> Self {
        Self {
            index: self.index.min(self.max_index(per_view)),
            layout: self.layout.wrapping_add(1),
            ..self
        }
    }

    pub fn prev_disabled(&self) -> bool {
        self.index == 0
    }
}

pub enum MemberAction {
    Prev,
    Next { per_view: usize },
    Resize { per_view: usize },
}

impl Reducible for MemberCursor {
    type Action = MemberAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            MemberAction::Prev => self.prev(),
            MemberAction::Next { per_view } => self.next(per_view),
            MemberAction::Resize { per_view } => self.clamp(per_view),
        };
        Rc::new(next)
    }
}

/// Pixel distance the track shifts left to show `index` first.
pub fn track_offset(index: usize, item_width: f64) -> f64 {
    index as f64 * (item_width + MEMBER_GAP_PX)
}

pub fn track_transform(offset: f64) -> String {
    format!("translateX(-{}px)", offset)
}

fn current_logos_per_view() -> usize {
    logos_per_view(dom::viewport_width())
}

/// Page elements the strip drives. The track is also the mount root.
#[derive(Clone, PartialEq)]
pub struct MemberControls {
    pub track: HtmlElement,
    pub prev: HtmlButtonElement,
    pub next: HtmlButtonElement,
}

impl MemberControls {
    pub fn find(document: &Document) -> Option<Self> {
        Some(Self {
            track: dom::element_by_id(document, "memberCarouselTrack")?
                .dyn_into()
                .ok()?,
            prev: dom::element_by_id(document, "memberPrevBtn")?.dyn_into().ok()?,
            next: dom::element_by_id(document, "memberNextBtn")?.dyn_into().ok()?,
        })
    }

    fn apply(&self, cursor: &MemberCursor) {
        let item_width = self
            .track
            .first_element_child()
            .and_then(|child| child.dyn_into::<HtmlElement>().ok())
            .map(|child| child.offset_width() as f64)
            .unwrap_or(0.0);
        let offset = track_offset(cursor.index(), item_width);
        let _ = self
            .track
            .style()
            .set_property("transform", &track_transform(offset));

        self.prev.set_disabled(cursor.prev_disabled());
        self.next.set_disabled(false);
    }
}

#[derive(Properties, PartialEq)]
pub struct MemberCarouselProps {
    pub logos: Vec<ImageRecord>,
    pub controls: MemberControls,
}

#[function_component]
pub fn MemberCarousel(props: &MemberCarouselProps) -> Html {
    let logo_count = props.logos.len();
    let cursor = use_reducer(move || MemberCursor::new(logo_count));

    let autoplay = {
        let dispatcher = cursor.dispatcher();
        use_mut_ref(move || {
            Autoplay::new(BrowserTicker, MEMBER_AUTOPLAY_MS, move || {
                dispatcher.dispatch(MemberAction::Next {
                    per_view: current_logos_per_view(),
                })
            })
        })
    };

    // Buttons, resize handling and autoplay live as long as the strip.
    {
        let controls = props.controls.clone();
        let dispatcher = cursor.dispatcher();
        let autoplay = autoplay.clone();
        use_effect_with_deps(
            move |_| {
                let on_prev = Closure::<dyn Fn()>::new({
                    let dispatcher = dispatcher.clone();
                    let autoplay = autoplay.clone();
                    move || navigate(&autoplay, || dispatcher.dispatch(MemberAction::Prev))
                });
                let on_next = Closure::<dyn Fn()>::new({
                    let dispatcher = dispatcher.clone();
                    let autoplay = autoplay.clone();
                    move || {
                        navigate(&autoplay, || {
                            dispatcher.dispatch(MemberAction::Next {
                                per_view: current_logos_per_view(),
                            })
                        })
                    }
                });
                let resize_debounce = Rc::new(RefCell::new(Debounce::new(
                    BrowserTicker,
                    RESIZE_DEBOUNCE_MS,
                )));
                let on_resize = Closure::<dyn Fn()>::new({
                    let resize_debounce = resize_debounce.clone();
                    move || {
                        let dispatcher = dispatcher.clone();
                        resize_debounce.borrow_mut().schedule(move || {
                            dispatcher.dispatch(MemberAction::Resize {
                                per_view: current_logos_per_view(),
                            })
                        });
                    }
                });

                let _ = controls
                    .prev
                    .add_event_listener_with_callback("click", on_prev.as_ref().unchecked_ref());
                let _ = controls
                    .next
                    .add_event_listener_with_callback("click", on_next.as_ref().unchecked_ref());
                if let Some(window) = web_sys::window() {
                    let _ = window
                        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
                }
                autoplay.borrow_mut().start();

                move || {
                    let _ = controls.prev.remove_event_listener_with_callback(
                        "click",
                        on_prev.as_ref().unchecked_ref(),
                    );
                    let _ = controls.next.remove_event_listener_with_callback(
                        "click",
                        on_next.as_ref().unchecked_ref(),
                    );
                    if let Some(window) = web_sys::window() {
                        let _ = window.remove_event_listener_with_callback(
                            "resize",
                            on_resize.as_ref().unchecked_ref(),
                        );
                    }
                    autoplay.borrow_mut().stop();
                    drop(resize_debounce);
                }
            },
            (),
        );
    }

    {
        let controls = props.controls.clone();
        use_effect_with_deps(
            move |cursor: &MemberCursor| {
                controls.apply(cursor);
                || ()
            },
            *cursor,
        );
    }

    html! {
        <>
            { for props.logos.iter().map(|logo| html! {
                <div class="member-logo-item">
                    <img src={logo.url.clone()} alt={logo.alt.clone()} />
                </div>
            }) }
        </>
    }
}

pub fn mount(controls: MemberControls, logos: Vec<ImageRecord>) {
    log::info!("building member carousel with {} logo(s)", logos.len());
    let root = controls.track.clone();
    root.set_inner_html("");
    yew::Renderer::<MemberCarousel>::with_root_and_props(
        root.into(),
        MemberCarouselProps { logos, controls },
    )
    .render();
}

/// Fills the member strip from the sheet. Missing markup or a failed fetch
/// leaves the page untouched.
pub fn init(document: &Document, client: &SheetClient) {
    let Some(controls) = MemberControls::find(document) else {
        return;
    };
    let client = client.clone();
    spawn_local(async move {
        match fetch_member_logos(&client).await {
            Ok(logos) => mount(controls, logos),
            Err(SheetError::Empty(_)) => log::info!("No member logos in sheet, leaving strip empty"),
            Err(e) => log::error!("Error fetching member logos: {}", e),
        }
    });
}
