use super::*;

#[test]
fn pathname_maps_to_route() {
    assert_eq!(route_from_pathname("/"), Route::Home);
    assert_eq!(route_from_pathname("/search"), Route::Search);
    assert_eq!(route_from_pathname("/category/books"), Route::Category("books".into()));
    assert_eq!(route_from_pathname("/place/givebox-1"), Route::Place("givebox-1".into()));
}

#[test]
fn place_ids_keep_slashes() {
    assert_eq!(route_from_pathname("/place/Kreuzviertel/Nord"), Route::Place("Kreuzviertel/Nord".into()));
}

#[test]
fn unknown_paths_fall_back_home() {
    assert_eq!(route_from_pathname("/impressum"), Route::Home);
}

#[test]
fn href_round_trips_plain_paths() {
    let path = Route::Place("givebox-2".into()).to_path();
    assert_eq!(route_from_pathname(&href_for(&path)), Route::Place("givebox-2".into()));
}

fn escape_reserved(segment: &str) -> String {
    segment.replace('#', "%23").replace('?', "%3F")
}

#[test]
fn segments_are_encoded_one_by_one() {
    let path = Route::Place("Box #2?".into()).to_path();
    assert_eq!(map_segments(&path, escape_reserved), "/place/Box %232%3F");
    assert_eq!(map_segments("/", escape_reserved), "/");
}

#[test]
fn encoded_separators_survive() {
    let path = Route::Place("Kreuzviertel/Nord#1".into()).to_path();
    assert_eq!(map_segments(&path, escape_reserved), "/place/Kreuzviertel/Nord%231");
}

fn unescape_reserved(segment: &str) -> String {
    segment.replace("%23", "#").replace("%3F", "?")
}

#[test]
fn reserved_characters_round_trip_per_segment() {
    let href = map_segments(&Route::Place("Box #2?".into()).to_path(), escape_reserved);
    assert_eq!(parse_encoded(&href, unescape_reserved), Route::Place("Box #2?".into()));
    assert_eq!(parse_encoded("/category/books", unescape_reserved), Route::Category("books".into()));
    assert_eq!(parse_encoded("/search", unescape_reserved), Route::Search);
}
