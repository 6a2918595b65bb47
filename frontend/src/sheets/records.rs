use crate::config::SheetKind;
use crate::sheets::csv::{data_rows, parse_csv_row};
use crate::utils::api::{SheetClient, SheetError};

/// One picture in the hero carousel or the member strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub url: String,
    pub alt: String,
}

/// First row of the video tab.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoDescriptor {
    pub video_url: String,
    pub display_video: bool,
}

fn column(columns: &[String], index: usize) -> &str {
    columns.get(index).map(|c| c.trim()).unwrap_or("")
}

/// Maps every data row to an image record. Rows without a URL are dropped.
pub fn parse_image_records(csv_text: &str, default_alt: &str) -> Vec<ImageRecord> {
    data_rows(csv_text)
        .map(|row| {
            let columns = parse_csv_row(row);
            let alt = column(&columns, 1);
            ImageRecord {
                url: column(&columns, 0).to_string(),
                alt: if alt.is_empty() { default_alt } else { alt }.to_string(),
            }
        })
        .filter(|record| !record.url.is_empty())
        .collect()
}

/// Reads the first data row only. `None` when that row is missing or blank.
pub fn parse_video_descriptor(csv_text: &str) -> Option<VideoDescriptor> {
    let first = csv_text.split('\n').nth(1)?;
    if first.trim().is_empty() {
        return None;
    }
    let columns = parse_csv_row(first);
    Some(VideoDescriptor {
        video_url: column(&columns, 0).to_string(),
        display_video: column(&columns, 1).eq_ignore_ascii_case("yes"),
    })
}

/// Image records of one tab, or `SheetError::Empty` when no row has a URL.
pub fn image_records(csv_text: &str, kind: SheetKind) -> Result<Vec<ImageRecord>, SheetError> {
    let records = parse_image_records(csv_text, kind.default_alt());
    log::debug!("parsed {} {} record(s)", records.len(), kind.label());
    if records.is_empty() {
        return Err(SheetError::Empty(kind.label()));
    }
    Ok(records)
}

async fn fetch_images(client: &SheetClient, kind: SheetKind) -> Result<Vec<ImageRecord>, SheetError> {
    let csv_text = client.fetch_csv(kind).await?;
    image_records(&csv_text, kind)
}

pub async fn fetch_hero_images(client: &SheetClient) -> Result<Vec<ImageRecord>, SheetError> {
    fetch_images(client, SheetKind::HeroImages).await
}

pub async fn fetch_member_logos(client: &SheetClient) -> Result<Vec<ImageRecord>, SheetError> {
    fetch_images(client, SheetKind::MemberLogos).await
}

pub async fn fetch_video_descriptor(client: &SheetClient) -> Result<VideoDescriptor, SheetError> {
    let csv_text = client.fetch_csv(SheetKind::Video).await?;
    parse_video_descriptor(&csv_text).ok_or(SheetError::Empty(SheetKind::Video.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_without_url_are_excluded() {
        let text = "Image URL,Alt\n,has alt but no url\nhttps://a.png,First\n  ,\"x,y\"\n";
        let records = parse_image_records(text, "Gallery image");
        assert_eq!(
            records,
            vec![ImageRecord {
                url: "https://a.png".into(),
                alt: "First".into()
            }]
        );
    }

    #[test]
    fn blank_or_missing_alt_uses_default() {
        let text = "url,alt\r\nhttps://a.png,  \r\nhttps://b.png\r\n";
        let records = parse_image_records(text, "Member logo");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.alt == "Member logo"));
        assert_eq!(records[1].url, "https://b.png");
    }

    #[test]
    fn quoted_alt_with_comma_is_kept_whole() {
        let records = parse_image_records("h\nhttps://a.png,\"Ingots, stacked\"", "Gallery image");
        assert_eq!(records[0].alt, "Ingots, stacked");
    }

    #[test]
    fn video_flag_is_case_insensitive() {
        let d = parse_video_descriptor("url,show\nhttps://youtu.be/abc, YES \n").unwrap();
        assert_eq!(d.video_url, "https://youtu.be/abc");
        assert!(d.display_video);

        let d = parse_video_descriptor("url,show\nhttps://youtu.be/abc,no").unwrap();
        assert!(!d.display_video);

        let d = parse_video_descriptor("url,show\nhttps://youtu.be/abc").unwrap();
        assert!(!d.display_video);
    }

    #[test]
    fn video_reads_only_first_data_row() {
        let d = parse_video_descriptor("url,show\nhttps://one,yes\nhttps://two,yes").unwrap();
        assert_eq!(d.video_url, "https://one");
    }

    #[test]
    fn blank_first_video_row_means_no_data() {
        assert_eq!(parse_video_descriptor("url,show\n\nhttps://two,yes"), None);
        assert_eq!(parse_video_descriptor("url,show"), None);
    }

    #[test]
    fn sheet_without_urls_is_reported_as_empty() {
        let result = image_records("Image URL,Alt\n,only alt\n\n", SheetKind::MemberLogos);
        assert!(matches!(result, Err(SheetError::Empty("member logos"))));

        let result = image_records("Image URL,Alt", SheetKind::HeroImages);
        assert!(matches!(result, Err(SheetError::Empty("hero images"))));
    }

    #[test]
    fn sheet_with_urls_yields_records() {
        let records = image_records("h\nhttps://a.png,A", SheetKind::HeroImages).unwrap();
        assert_eq!(records.len(), 1);
    }
}
