use std::rc::Rc;

use web_sys::Element;
use yew::prelude::*;

use crate::config::{HERO_AUTOPLAY_MS, HERO_STARTUP_DELAY_MS, PLACEHOLDER_HERO_IMAGE};
use crate::sheets::records::ImageRecord;
use crate::utils::autoplay::{navigate, start_after, Autoplay, BrowserTicker};

/// Index of the visible hero slide. Always `< len` when `len > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroCursor {
    len: usize,
    current: usize,
}

impl HeroCursor {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Moves by `direction` slides, wrapping at both ends.
    pub fn change(self, direction: isize) -> Self {
        if self.len == 0 {
            return self;
        }
        let len = self.len as isize;
        Self {
            current: (self.current as isize + direction).rem_euclid(len) as usize,
            ..self
        }
    }

    pub fn go_to(self, index: usize) -> Self {
        if index >= self.len {
            return self;
        }
        Self {
            current: index,
            ..self
        }
    }
}

pub enum HeroAction {
    Step(isize),
    GoTo(usize),
}

impl Reducible for HeroCursor {
    type Action = HeroAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            HeroAction::Step(direction) => self.change(direction),
            HeroAction::GoTo(index) => self.go_to(index),
        };
        Rc::new(next)
    }
}

/// False when the sheet has nothing new to show over the static slide.
pub fn should_rebuild(images: &[ImageRecord]) -> bool {
    match images {
        [] => false,
        [only] => only.url != PLACEHOLDER_HERO_IMAGE,
        _ => true,
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroCarouselProps {
    pub images: Vec<ImageRecord>,
}

#[function_component]
pub fn HeroCarousel(props: &HeroCarouselProps) -> Html {
    let slide_count = props.images.len();
    let cursor = use_reducer(move || HeroCursor::new(slide_count));

    let autoplay = {
        let dispatcher = cursor.dispatcher();
        use_mut_ref(move || {
            Autoplay::new(BrowserTicker, HERO_AUTOPLAY_MS, move || {
                dispatcher.dispatch(HeroAction::Step(1))
            })
        })
    };

    // Hold the first rotation back so the entry animation settles.
    {
        let autoplay = autoplay.clone();
        use_effect_with_deps(
            move |_| {
                let startup = start_after(&autoplay, HERO_STARTUP_DELAY_MS);
                move || {
                    drop(startup);
                    autoplay.borrow_mut().stop();
                }
            },
            (),
        );
    }

    let on_indicator = {
        let dispatcher = cursor.dispatcher();
        let autoplay = autoplay.clone();
        move |index: usize| {
            let dispatcher = dispatcher.clone();
            let autoplay = autoplay.clone();
            Callback::from(move |_: MouseEvent| {
                navigate(&autoplay, || dispatcher.dispatch(HeroAction::GoTo(index)));
            })
        }
    };

    let current = cursor.current();

    html! {
        <>
            { for props.images.iter().enumerate().map(|(index, image)| html! {
                <div class={classes!(
                    "hero-carousel-slide",
                    (index == current).then_some("active"),
                    (index == 0).then_some("no-animation")
                )}>
                    <img src={image.url.clone()} alt={image.alt.clone()} />
                </div>
            }) }
            <div class="hero-carousel-indicators-wrapper">
                { for (0..slide_count).map(|index| html! {
                    <span
                        class={classes!("hero-indicator", (index == current).then_some("active"))}
                        data-index={index.to_string()}
                        onclick={on_indicator(index)}
                    ></span>
                }) }
            </div>
        </>
    }
}

/// Replaces the static hero markup with the sheet-driven carousel.
pub fn mount(root: Element, images: Vec<ImageRecord>) {
    log::info!("building hero carousel with {} slide(s)", images.len());
    root.set_inner_html("");
    yew::Renderer::<HeroCarousel>::with_root_and_props(root, HeroCarouselProps { images }).render();
}
