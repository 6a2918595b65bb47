use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, HtmlIFrameElement, KeyboardEvent, MouseEvent};

use crate::sheets::records::{fetch_video_descriptor, VideoDescriptor};
use crate::utils::api::{SheetClient, SheetError};
use crate::utils::dom;

const VIDEO_ENABLED_CLASS: &str = "video-enabled";
const VIDEO_URL_ATTR: &str = "data-video-url";
const ACTIVE_CLASS: &str = "active";

/// The clickable thumbnail.
pub trait VideoBoxView {
    fn enable_video(&self, video_url: &str);
    fn disable_video(&self);
}

/// The full-screen overlay and the player frame inside it.
pub trait LightboxView {
    fn set_frame_src(&self, src: &str);
    fn set_active(&self, active: bool);
    fn lock_page_scroll(&self, locked: bool);
    fn is_active(&self) -> bool;
}

/// Turns the thumbnail into a player trigger when the sheet asks for it.
pub fn build_video_content_box(view: &impl VideoBoxView, descriptor: &VideoDescriptor) {
    if descriptor.video_url.is_empty() {
        log::error!("No video URL provided");
        return;
    }
    if descriptor.display_video {
        view.enable_video(&descriptor.video_url);
    } else {
        view.disable_video();
    }
}

// (video id, extra query parameters without `v`)
fn split_video_url(video_url: &str) -> (&str, String) {
    if let Some((_, rest)) = video_url.split_once("youtu.be/") {
        let (id, params) = rest.split_once('?').unwrap_or((rest, ""));
        return (id, params.to_string());
    }
    if video_url.contains("youtube.com/watch?v=") {
        let query = video_url.split_once('?').map(|(_, q)| q).unwrap_or("");
        let mut id = "";
        let mut params = Vec::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            match pair.strip_prefix("v=") {
                Some(v) if id.is_empty() => id = v,
                Some(_) => {}
                None => params.push(pair),
            }
        }
        return (id, params.join("&"));
    }
    ("", String::new())
}

/// Embed URL for a share or watch link. Unknown shapes give an empty id.
pub fn embed_url(video_url: &str) -> String {
    let (id, params) = split_video_url(video_url);
    let mut url = format!("https://www.youtube.com/embed/{}?autoplay=1", id);
    if !params.is_empty() {
        url.push('&');
        url.push_str(&params);
    }
    url
}

pub struct Lightbox<V: LightboxView> {
    view: V,
}

impl<V: LightboxView> Lightbox<V> {
    pub fn new(view: V) -> Self {
        Self { view }
    }

    pub fn open(&self, video_url: &str) {
        let src = embed_url(video_url);
        log::info!("Opening video with embed URL: {}", src);
        self.view.set_frame_src(&src);
        self.view.set_active(true);
        self.view.lock_page_scroll(true);
    }

    /// Clearing the frame source stops playback.
    pub fn close(&self) {
        self.view.set_frame_src("");
        self.view.set_active(false);
        self.view.lock_page_scroll(false);
    }

    /// Opens only for an enabled thumbnail that carries a URL. Returns
    /// whether it opened.
    pub fn handle_thumbnail_click(&self, video_enabled: bool, video_url: Option<&str>) -> bool {
        match video_url.filter(|url| !url.is_empty()) {
            Some(url) if video_enabled => {
                self.open(url);
                true
            }
            _ => false,
        }
    }

    /// Only clicks on the backdrop itself close, not clicks on the player.
    pub fn handle_backdrop_click(&self, target_is_backdrop: bool) -> bool {
        if target_is_backdrop {
            self.close();
        }
        target_is_backdrop
    }

    /// Closes on Escape while open. Returns whether it closed.
    pub fn handle_key(&self, key: &str) -> bool {
        if key == "Escape" && self.view.is_active() {
            self.close();
            true
        } else {
            false
        }
    }
}

pub struct DomVideoBox {
    element: Element,
}

impl VideoBoxView for DomVideoBox {
    fn enable_video(&self, video_url: &str) {
        let _ = self.element.class_list().add_1(VIDEO_ENABLED_CLASS);
        let _ = self.element.set_attribute(VIDEO_URL_ATTR, video_url);
    }

    fn disable_video(&self) {
        let _ = self.element.class_list().remove_1(VIDEO_ENABLED_CLASS);
        let _ = self.element.remove_attribute(VIDEO_URL_ATTR);
    }
}

pub struct DomLightbox {
    overlay: Element,
    frame: HtmlIFrameElement,
    body: Option<HtmlElement>,
}

impl DomLightbox {
    pub fn find(document: &Document) -> Option<Self> {
        Some(Self {
            overlay: dom::element_by_id(document, "videoLightbox")?,
            frame: dom::element_by_id(document, "videoFrame")?.dyn_into().ok()?,
            body: document.body(),
        })
    }
}

impl LightboxView for DomLightbox {
    fn set_frame_src(&self, src: &str) {
        self.frame.set_src(src);
    }

    fn set_active(&self, active: bool) {
        let classes = self.overlay.class_list();
        let _ = if active {
            classes.add_1(ACTIVE_CLASS)
        } else {
            classes.remove_1(ACTIVE_CLASS)
        };
    }

    fn lock_page_scroll(&self, locked: bool) {
        if let Some(body) = &self.body {
            let _ = body
                .style()
                .set_property("overflow", if locked { "hidden" } else { "" });
        }
    }

    fn is_active(&self) -> bool {
        self.overlay.class_list().contains(ACTIVE_CLASS)
    }
}

fn wire_lightbox(document: &Document, thumbnail: &Element) {
    let Some(view) = DomLightbox::find(document) else {
        log::warn!("video lightbox markup missing");
        return;
    };
    let overlay = view.overlay.clone();
    let lightbox = Rc::new(Lightbox::new(view));

    let on_thumbnail = Closure::<dyn Fn()>::new({
        let lightbox = lightbox.clone();
        let thumbnail = thumbnail.clone();
        move || {
            let url = thumbnail.get_attribute(VIDEO_URL_ATTR);
            lightbox.handle_thumbnail_click(
                thumbnail.class_list().contains(VIDEO_ENABLED_CLASS),
                url.as_deref(),
            );
        }
    });
    let _ = thumbnail.add_event_listener_with_callback("click", on_thumbnail.as_ref().unchecked_ref());
    on_thumbnail.forget();

    let on_backdrop = Closure::<dyn Fn(MouseEvent)>::new({
        let lightbox = lightbox.clone();
        let overlay = overlay.clone();
        move |e: MouseEvent| {
            let target = e.target().and_then(|t| t.dyn_into::<Element>().ok());
            lightbox.handle_backdrop_click(target.as_ref() == Some(&overlay));
        }
    });
    let _ = overlay.add_event_listener_with_callback("click", on_backdrop.as_ref().unchecked_ref());
    on_backdrop.forget();

    let on_key = Closure::<dyn Fn(KeyboardEvent)>::new(move |e: KeyboardEvent| {
        lightbox.handle_key(&e.key());
    });
    let _ = document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref());
    on_key.forget();
}

/// Wires the thumbnail and lightbox, then applies the video sheet.
pub fn init(document: &Document, client: &SheetClient) {
    let Some(thumbnail) = dom::element_by_id(document, "videoContentBox") else {
        return;
    };
    wire_lightbox(document, &thumbnail);

    let client = client.clone();
    spawn_local(async move {
        match fetch_video_descriptor(&client).await {
            Ok(descriptor) => {
                log::info!(
                    "video {} (display: {})",
                    descriptor.video_url,
                    descriptor.display_video
                );
                build_video_content_box(&DomVideoBox { element: thumbnail }, &descriptor);
            }
            Err(SheetError::Empty(_)) => log::info!("No video data found"),
            Err(e) => log::error!("Error fetching video content: {}", e),
        }
    });
}
