pub mod config;

pub mod sheets {
    pub mod csv;
    pub mod records;
}

pub mod utils {
    pub mod api;
    pub mod autoplay;
    pub mod dom;
}

pub mod components {
    pub mod hero_carousel;
    pub mod member_carousel;
    pub mod scroll_spy;
    pub mod video_lightbox;
}

pub mod pages {
    pub mod landing;
}

pub use pages::landing::init_landing_page;
