use super::*;

use givemap::engine::ViewSnapshot;
use givemap::model::OpeningHours;

fn record(contents: usize) -> PointDetail {
    PointDetail {
        id: "givebox-1".into(),
        display_name: "Givebox Aasee".into(),
        address: "Aaseepark 5, 48151 Münster".into(),
        description: String::new(),
        coordinates: None,
        categories: vec![],
        kind: None,
        opening_hours: Some(OpeningHours::Always),
        preview_image: Some("preview.jpg".into()),
        images: Some(vec!["a.jpg".into()]),
        contents: Some(
            (0..contents)
                .map(|i| ContentItem { label: format!("item {i}"), description: format!("Buch {i}") })
                .collect(),
        ),
    }
}

fn view_with(state: Option<DetailState>) -> MapViewState {
    MapViewState {
        snapshot: ViewSnapshot { detail: state.map(|s| ("givebox-1".to_owned(), s)), ..ViewSnapshot::default() },
        ..MapViewState::default()
    }
}

#[test]
fn header_falls_back_to_placeholder() {
    assert_eq!(header(None), (PLACEHOLDER_TITLE.to_owned(), PLACEHOLDER_SUBTITLE.to_owned()));
    let detail = record(0);
    assert_eq!(header(Some(&detail)), ("Givebox Aasee".to_owned(), "Aaseepark 5, 48151 Münster".to_owned()));
}

#[test]
fn gallery_alt_text_marks_preview() {
    assert_eq!(image_alt("Box", 0, true), "Box Vorschaubild");
    assert_eq!(image_alt("Box", 1, true), "Box Bild 1");
    assert_eq!(image_alt("Box", 0, false), "Box Bild 1");
}

#[test]
fn expansion_follows_contents_length() {
    assert_eq!(expansion_key(&view_with(None)), None);
    assert_eq!(expansion_key(&view_with(Some(DetailState::Loading))), Some(("givebox-1".into(), true)));
    assert_eq!(expansion_key(&view_with(Some(DetailState::Ready(record(2))))), Some(("givebox-1".into(), true)));
    assert_eq!(expansion_key(&view_with(Some(DetailState::Ready(record(3))))), Some(("givebox-1".into(), false)));
}

#[test]
fn refresh_with_same_shape_keeps_key() {
    let mut refreshed = record(5);
    refreshed.images = None;
    assert_eq!(
        expansion_key(&view_with(Some(DetailState::Ready(record(5))))),
        expansion_key(&view_with(Some(DetailState::Ready(refreshed))))
    );
}
