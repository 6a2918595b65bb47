use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::components::{hero_carousel, member_carousel, scroll_spy, video_lightbox};
use crate::sheets::records::fetch_hero_images;
use crate::utils::api::{SheetClient, SheetError};
use crate::utils::dom;

fn init_hero(document: &Document, client: &SheetClient) {
    let Some(root) = dom::element_by_id(document, "hero-carousel")
        .or_else(|| dom::element_by_id(document, "carousel"))
    else {
        return;
    };
    let client = client.clone();
    spawn_local(async move {
        match fetch_hero_images(&client).await {
            Ok(images) if hero_carousel::should_rebuild(&images) => hero_carousel::mount(root, images),
            Ok(_) => log::info!("hero sheet only lists the placeholder, keeping static slide"),
            Err(SheetError::Empty(_)) => {
                log::info!("No images found in sheet, keeping static placeholder")
            }
            // the static slide stays up, visitors never see fetch errors
            Err(e) => log::error!("Error loading carousel, keeping static placeholder: {}", e),
        }
    });
}

/// Enhances whichever widgets the landing page markup contains.
pub fn init_landing_page() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document, nothing to enhance");
        return;
    };
    let client = SheetClient::new();

    init_hero(&document, &client);
    video_lightbox::init(&document, &client);
    member_carousel::init(&document, &client);
    if matches!(document.query_selector(".event-toc"), Ok(Some(_))) {
        scroll_spy::init(&document);
    }
}
