// Published CSV tabs of the content spreadsheet. Each can be swapped at
// build time without touching the code.
const DEFAULT_HERO_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRcFCl8wWVnh4CUBuZig_1xrDjl_oaLELxa3tZHqa4shBr6Ff9ffiKPhcjx5cBXdy3YYV_JkoHmIHnn/pub?output=csv";
const DEFAULT_VIDEO_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRcFCl8wWVnh4CUBuZig_1xrDjl_oaLELxa3tZHqa4shBr6Ff9ffiKPhcjx5cBXdy3YYV_JkoHmIHnn/pub?gid=2124855345&single=true&output=csv";
const DEFAULT_MEMBER_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRcFCl8wWVnh4CUBuZig_1xrDjl_oaLELxa3tZHqa4shBr6Ff9ffiKPhcjx5cBXdy3YYV_JkoHmIHnn/pub?gid=1102148999&single=true&output=csv";
const DEFAULT_CORS_PROXY: &str = "https://corsproxy.io/?";

/// Image the static hero markup already shows before any sheet is loaded.
pub const PLACEHOLDER_HERO_IMAGE: &str =
    "https://cdn.ymaws.com/the-mia.site-ym.com/resource/resmgr/ingot/btcc_with_blur.jpg";

pub const HERO_AUTOPLAY_MS: u32 = 5_000;
pub const HERO_STARTUP_DELAY_MS: u32 = 1_000;
pub const MEMBER_AUTOPLAY_MS: u32 = 3_000;
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

/// Horizontal gap between member logos, matches the 2rem flex gap.
pub const MEMBER_GAP_PX: f64 = 32.0;

/// Sticky header height the scroll-spy compensates for.
pub const SCROLL_SPY_OFFSET_PX: f64 = 200.0;

pub const MOBILE_MAX_WIDTH: f64 = 768.0;
pub const TABLET_MAX_WIDTH: f64 = 1200.0;

/// The three spreadsheet tabs the page reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    HeroImages,
    Video,
    MemberLogos,
}

impl SheetKind {
    pub fn csv_url(self) -> &'static str {
        match self {
            SheetKind::HeroImages => {
                option_env!("INGOT_HERO_SHEET_URL").unwrap_or(DEFAULT_HERO_SHEET_URL)
            }
            SheetKind::Video => {
                option_env!("INGOT_VIDEO_SHEET_URL").unwrap_or(DEFAULT_VIDEO_SHEET_URL)
            }
            SheetKind::MemberLogos => {
                option_env!("INGOT_MEMBER_SHEET_URL").unwrap_or(DEFAULT_MEMBER_SHEET_URL)
            }
        }
    }

    /// Alt text used when a row leaves column 1 blank.
    pub fn default_alt(self) -> &'static str {
        match self {
            SheetKind::MemberLogos => "Member logo",
            SheetKind::HeroImages | SheetKind::Video => "Gallery image",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SheetKind::HeroImages => "hero images",
            SheetKind::Video => "video",
            SheetKind::MemberLogos => "member logos",
        }
    }
}

/// CORS relay prefix, `None` when the build disables it by setting
/// `INGOT_CORS_PROXY` to an empty string.
pub fn cors_proxy() -> Option<&'static str> {
    let proxy = option_env!("INGOT_CORS_PROXY").unwrap_or(DEFAULT_CORS_PROXY);
    if proxy.is_empty() {
        None
    } else {
        Some(proxy)
    }
}

/// Wraps a target URL in the relay prefix.
pub fn proxied_url(proxy: Option<&str>, target: &str) -> String {
    match proxy {
        Some(prefix) => format!("{}{}", prefix, urlencoding::encode(target)),
        None => target.to_string(),
    }
}

pub fn sheet_request_url(kind: SheetKind) -> String {
    proxied_url(cors_proxy(), kind.csv_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_prefix_is_prepended_to_encoded_target() {
        let url = proxied_url(Some("https://corsproxy.io/?"), "https://x.test/pub?gid=1&output=csv");
        assert_eq!(
            url,
            "https://corsproxy.io/?https%3A%2F%2Fx.test%2Fpub%3Fgid%3D1%26output%3Dcsv"
        );
    }

    #[test]
    fn disabled_relay_fetches_directly() {
        assert_eq!(proxied_url(None, "https://x.test/a.csv"), "https://x.test/a.csv");
    }

    #[test]
    fn member_rows_default_to_member_alt() {
        assert_eq!(SheetKind::MemberLogos.default_alt(), "Member logo");
        assert_eq!(SheetKind::HeroImages.default_alt(), "Gallery image");
    }
}
