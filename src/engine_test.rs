use super::*;
use crate::gateway::fixture::FixtureGateway;
use crate::model::LatLng;

fn requests(effects: &[Effect]) -> Vec<Request> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Request(request) => Some(request.clone()),
            _ => None,
        })
        .collect()
}

fn only_request(effects: &[Effect]) -> Request {
    let mut found = requests(effects);
    assert_eq!(found.len(), 1, "expected one request in {effects:?}");
    found.remove(0)
}

fn viewports(effects: &[Effect]) -> Vec<ViewportTarget> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Viewport(target) => Some(*target),
            _ => None,
        })
        .collect()
}

fn navigations(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Navigate(path) => Some(path.clone()),
            _ => None,
        })
        .collect()
}

/// Resolve every request in `effects` against `gateway`, feeding results back
/// until nothing is left in flight. Returns every effect produced on the way.
async fn settle(engine: &mut ViewEngine, gateway: &FixtureGateway, effects: Vec<Effect>) -> Vec<Effect> {
    let mut produced = Vec::new();
    let mut queue = requests(&effects);
    while let Some(request) = queue.pop() {
        let event = request.resolve(gateway).await;
        let next = engine.handle(event);
        queue.extend(requests(&next));
        produced.extend(next);
    }
    produced
}

async fn loaded_engine(gateway: &FixtureGateway) -> ViewEngine {
    let mut engine = ViewEngine::default();
    let effects = engine.handle(Event::Mounted);
    settle(&mut engine, gateway, effects).await;
    assert_eq!(engine.points_status(), LoadStatus::Loaded);
    engine
}

fn summary(id: &str, name: &str) -> PointSummary {
    PointSummary {
        id: id.into(),
        display_name: name.into(),
        address: String::new(),
        description: String::new(),
        coordinates: None,
        categories: vec![],
    }
}

fn search_ticket(effects: &[Effect]) -> Ticket {
    match only_request(effects) {
        Request::Search(request) => request.ticket,
        other => panic!("expected search request, got {other:?}"),
    }
}

fn detail_ticket(effects: &[Effect]) -> Ticket {
    match only_request(effects) {
        Request::Detail(request) => request.ticket,
        other => panic!("expected detail request, got {other:?}"),
    }
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn events_before_mount_are_ignored() {
    let mut engine = ViewEngine::default();
    assert!(engine.handle(Event::SetQuery("aasee".into())).is_empty());
    assert!(engine.handle(Event::SelectPoint("givebox-1".into())).is_empty());
    assert_eq!(engine.search().query(), "");
}

#[tokio::test]
async fn mount_loads_points_and_fits_them() {
    let gateway = FixtureGateway::muenster();
    let mut engine = ViewEngine::default();
    let effects = engine.handle(Event::Mounted);
    assert!(matches!(only_request(&effects), Request::Points { .. }));
    assert!(engine.snapshot().is_loading_points);

    let produced = settle(&mut engine, &gateway, effects).await;
    let snapshot = engine.snapshot();
    assert!(!snapshot.is_loading_points);
    assert_eq!(snapshot.visible_points.len(), 3);
    assert!(matches!(viewports(&produced)[..], [ViewportTarget::FitBounds { .. }]));
}

#[tokio::test]
async fn remount_starts_from_an_empty_list() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    engine.handle(Event::Unmounted);
    engine.handle(Event::Mounted);
    assert!(engine.points().is_empty());
    assert!(engine.snapshot().is_loading_points);
}

#[test]
fn list_failure_is_reported_and_keeps_viewport() {
    let mut engine = ViewEngine::default();
    let Request::Points { ticket } = only_request(&engine.handle(Event::Mounted)) else {
        panic!("expected points request");
    };
    let effects = engine.handle(Event::PointsResolved {
        ticket,
        result: Err(GatewayError::Network("connection refused".into())),
    });
    assert!(effects.is_empty());
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.points_error, Some(ErrorKind::NetworkFailure));
    assert!(!snapshot.is_loading_points);
    assert!(snapshot.visible_points.is_empty());
}

// =============================================================
// Search
// =============================================================

#[tokio::test]
async fn typing_a_query_enters_search_once() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;

    let first = engine.handle(Event::SetQuery("A".into()));
    assert_eq!(navigations(&first), ["/search"]);
    let stale = search_ticket(&first);
    assert!(engine.snapshot().is_searching);
    engine.handle(Event::RouteChanged(Route::Search));

    let second = engine.handle(Event::SetQuery("Aa".into()));
    assert!(navigations(&second).is_empty());
    let third = engine.handle(Event::SetQuery("Aasee".into()));
    assert!(navigations(&third).is_empty());
    let Request::Search(current) = only_request(&third) else {
        panic!("expected search request");
    };
    assert_eq!(current.query, "Aasee");

    // The first keystroke's result lands last and must not show.
    engine.handle(Event::SearchResolved { ticket: stale, result: Ok(vec![summary("x", "stale")]) });
    assert!(engine.snapshot().is_searching);
    assert!(engine.snapshot().search_results.is_empty());

    settle(&mut engine, &gateway, third).await;
    let snapshot = engine.snapshot();
    assert!(!snapshot.is_searching);
    let ids: Vec<_> = snapshot.search_results.iter().map(|hit| hit.id.as_str()).collect();
    assert_eq!(ids, ["givebox-1"]);
}

#[tokio::test]
async fn out_of_order_results_keep_the_latest_query() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;

    let a = search_ticket(&engine.handle(Event::SetQuery("a".into())));
    let ab = search_ticket(&engine.handle(Event::SetQuery("ab".into())));

    engine.handle(Event::SearchResolved { ticket: ab, result: Ok(vec![summary("ab-hit", "Abtei")]) });
    engine.handle(Event::SearchResolved { ticket: a, result: Ok(vec![summary("a-hit", "Aasee")]) });

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.query, "ab");
    assert_eq!(snapshot.search_results, vec![summary("ab-hit", "Abtei")]);
}

#[tokio::test]
async fn clearing_the_query_drops_results() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    let effects = engine.handle(Event::SetQuery("givebox".into()));
    settle(&mut engine, &gateway, effects).await;
    assert_eq!(engine.snapshot().search_results.len(), 3);

    let effects = engine.handle(Event::SetQuery("  ".into()));
    assert!(requests(&effects).is_empty());
    let snapshot = engine.snapshot();
    assert!(snapshot.search_results.is_empty());
    assert!(!snapshot.is_searching);
}

#[tokio::test]
async fn search_failure_is_scoped_to_search() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    let ticket = search_ticket(&engine.handle(Event::SetQuery("aasee".into())));
    engine.handle(Event::SearchResolved { ticket, result: Err(GatewayError::Malformed("html".into())) });

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.search_error, Some(ErrorKind::Malformed));
    assert_eq!(snapshot.points_error, None);
    assert_eq!(snapshot.visible_points.len(), 3);
}

#[tokio::test]
async fn category_route_scopes_the_running_query() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    let effects = engine.handle(Event::SetQuery("givebox".into()));
    settle(&mut engine, &gateway, effects).await;

    let effects = engine.handle(Event::RouteChanged(Route::Category("tools".into())));
    let Request::Search(request) = only_request(&effects) else {
        panic!("expected scoped search");
    };
    assert_eq!(request.category.as_deref(), Some("tools"));
    settle(&mut engine, &gateway, effects).await;
    let ids: Vec<_> = engine.snapshot().search_results.iter().map(|hit| hit.id.clone()).collect();
    assert_eq!(ids, ["givebox-3"]);

    // Back home lifts the scope.
    let effects = engine.handle(Event::RouteChanged(Route::Home));
    let Request::Search(request) = only_request(&effects) else {
        panic!("expected unscoped search");
    };
    assert_eq!(request.category, None);
}

#[tokio::test]
async fn search_route_lifts_the_category_scope() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    engine.handle(Event::RouteChanged(Route::Category("tools".into())));

    let typed = engine.handle(Event::SetQuery("givebox".into()));
    assert_eq!(navigations(&typed), ["/search"]);
    let Request::Search(scoped) = only_request(&typed) else {
        panic!("expected search request");
    };
    assert_eq!(scoped.category.as_deref(), Some("tools"));

    let effects = engine.handle(Event::RouteChanged(Route::Search));
    let Request::Search(unscoped) = only_request(&effects) else {
        panic!("expected unscoped search");
    };
    assert_eq!(unscoped.category, None);

    // The scoped result arrives late and must not narrow the list.
    settle(&mut engine, &gateway, effects).await;
    settle(&mut engine, &gateway, typed).await;
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.active_category, None);
    let mut ids: Vec<_> = snapshot.search_results.iter().map(|hit| hit.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, ["givebox-1", "givebox-2", "givebox-3"]);
}

#[tokio::test]
async fn choosing_a_result_selects_the_point() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    let effects = engine.handle(Event::SetQuery("kreuz".into()));
    settle(&mut engine, &gateway, effects).await;

    let effects = engine.handle(Event::ChooseResult("givebox-2".into()));
    assert_eq!(navigations(&effects), ["/place/givebox-2"]);
    assert!(requests(&effects).is_empty());
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.query, "Givebox Kreuzviertel");
    assert!(snapshot.search_results.is_empty());
    assert!(!snapshot.is_searching);
}

// =============================================================
// Selection and detail
// =============================================================

#[tokio::test]
async fn selecting_a_point_centers_and_starts_polling() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;

    assert_eq!(navigations(&engine.handle(Event::SelectPoint("givebox-1".into()))), ["/place/givebox-1"]);
    let effects = engine.handle(Event::RouteChanged(Route::Place("givebox-1".into())));
    assert!(effects.contains(&Effect::StartPolling { id: "givebox-1".into(), every: crate::poll::DEFAULT_INTERVAL }));
    match viewports(&effects).as_slice() {
        [ViewportTarget::Center { center, zoom, .. }] => {
            assert_eq!(*center, LatLng::new(51.9507, 7.6166));
            assert_eq!(*zoom, 14);
        }
        other => panic!("expected center, got {other:?}"),
    }

    let produced = settle(&mut engine, &gateway, effects).await;
    assert!(viewports(&produced).is_empty());
    assert!(matches!(engine.snapshot().detail, Some((_, DetailState::Ready(_)))));
}

#[tokio::test]
async fn clearing_selection_fits_all_points() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    let effects = engine.handle(Event::RouteChanged(Route::Place("givebox-1".into())));
    settle(&mut engine, &gateway, effects).await;

    assert_eq!(navigations(&engine.handle(Event::ClearSelection)), ["/"]);
    let effects = engine.handle(Event::RouteChanged(Route::Home));
    assert!(effects.contains(&Effect::StopPolling));
    let expected = crate::viewport::Bounds::from_points(engine.points()).unwrap();
    assert_eq!(viewports(&effects), [ViewportTarget::FitBounds { bounds: expected, padding: 0.2 }]);
    assert_eq!(engine.snapshot().detail, None);
}

#[tokio::test]
async fn switching_selection_discards_the_previous_detail() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;

    let first = engine.handle(Event::RouteChanged(Route::Place("givebox-1".into())));
    let stale = only_request(&first);
    let second = engine.handle(Event::RouteChanged(Route::Place("givebox-2".into())));
    assert!(second.contains(&Effect::StopPolling));
    assert!(second.contains(&Effect::StartPolling { id: "givebox-2".into(), every: crate::poll::DEFAULT_INTERVAL }));

    // givebox-1's detail arrives after the switch.
    let event = stale.resolve(&gateway).await;
    assert!(engine.handle(event).is_empty());
    assert_eq!(engine.snapshot().detail, Some(("givebox-2".into(), DetailState::Loading)));

    settle(&mut engine, &gateway, second).await;
    let Some((id, DetailState::Ready(detail))) = engine.snapshot().detail else {
        panic!("expected ready detail");
    };
    assert_eq!(id, "givebox-2");
    assert_eq!(detail.display_name, "Givebox Kreuzviertel");
}

#[tokio::test]
async fn teardown_discards_in_flight_detail() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    let effects = engine.handle(Event::RouteChanged(Route::Place("givebox-1".into())));
    let in_flight = only_request(&effects);

    assert_eq!(engine.handle(Event::Unmounted), [Effect::StopPolling]);
    assert!(!engine.is_mounted());
    let event = in_flight.resolve(&gateway).await;
    assert!(engine.handle(event).is_empty());
    assert_eq!(engine.snapshot().detail, None);
}

#[tokio::test]
async fn remount_ignores_detail_from_before_teardown() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    let in_flight = only_request(&engine.handle(Event::RouteChanged(Route::Place("givebox-1".into()))));
    engine.handle(Event::Unmounted);

    let effects = engine.handle(Event::Mounted);
    settle(&mut engine, &gateway, effects).await;
    let effects = engine.handle(Event::RouteChanged(Route::Place("givebox-2".into())));
    let current = only_request(&effects);

    let stale = in_flight.resolve(&gateway).await;
    assert!(engine.handle(stale).is_empty());
    assert_eq!(engine.snapshot().detail, Some(("givebox-2".to_owned(), DetailState::Loading)));

    let fresh = current.resolve(&gateway).await;
    engine.handle(fresh);
    let Some((id, DetailState::Ready(detail))) = engine.snapshot().detail else {
        panic!("expected ready detail");
    };
    assert_eq!(id, "givebox-2");
    assert_eq!(detail.id, "givebox-2");
}

#[tokio::test]
async fn remount_rejects_old_ticket_for_the_same_point() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    let in_flight = only_request(&engine.handle(Event::RouteChanged(Route::Place("givebox-1".into()))));
    let Request::Detail(old) = &in_flight else {
        panic!("expected detail request");
    };
    let old_ticket = old.ticket;
    engine.handle(Event::Unmounted);

    let effects = engine.handle(Event::Mounted);
    settle(&mut engine, &gateway, effects).await;
    let effects = engine.handle(Event::RouteChanged(Route::Place("givebox-1".into())));
    assert_ne!(detail_ticket(&effects), old_ticket);

    // Same id, older generation: only the ticket tells them apart.
    let stale = engine.handle(Event::DetailResolved {
        ticket: old_ticket,
        id: "givebox-1".into(),
        result: Err(GatewayError::NotFound { id: "givebox-1".into() }),
    });
    assert!(stale.is_empty());
    assert_eq!(engine.snapshot().detail, Some(("givebox-1".to_owned(), DetailState::Loading)));
}

#[tokio::test]
async fn poll_tick_is_skipped_while_busy() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    let effects = engine.handle(Event::RouteChanged(Route::Place("givebox-3".into())));
    let first = detail_ticket(&effects);

    assert!(engine.handle(Event::PollTick { id: "givebox-3".into() }).is_empty());
    settle(&mut engine, &gateway, effects).await;

    let refresh = engine.handle(Event::PollTick { id: "givebox-3".into() });
    assert!(detail_ticket(&refresh).generation() > first.generation());
    assert!(engine.handle(Event::PollTick { id: "givebox-3".into() }).is_empty());
    assert!(engine.handle(Event::PollTick { id: "givebox-1".into() }).is_empty());
}

#[tokio::test]
async fn refresh_failure_keeps_shown_detail() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    let effects = engine.handle(Event::RouteChanged(Route::Place("givebox-3".into())));
    settle(&mut engine, &gateway, effects).await;

    let ticket = detail_ticket(&engine.handle(Event::PollTick { id: "givebox-3".into() }));
    engine.handle(Event::DetailResolved {
        ticket,
        id: "givebox-3".into(),
        result: Err(GatewayError::Network("timeout".into())),
    });
    assert!(matches!(engine.snapshot().detail, Some((_, DetailState::Ready(_)))));
}

#[tokio::test]
async fn unknown_point_is_missing_without_touching_the_list() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    let effects = engine.handle(Event::RouteChanged(Route::Place("givebox-404".into())));
    assert!(viewports(&effects).is_empty());
    assert!(engine.snapshot().selection.is_pending());

    let produced = settle(&mut engine, &gateway, effects).await;
    assert!(viewports(&produced).is_empty());
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.detail, Some(("givebox-404".into(), DetailState::Missing)));
    assert_eq!(snapshot.points_error, None);
    assert_eq!(snapshot.visible_points.len(), 3);
}

#[tokio::test]
async fn detail_resolves_a_point_missing_from_the_list() {
    let outlier = PointDetail {
        id: "givebox-9".into(),
        display_name: "Givebox Gievenbeck".into(),
        address: "Dieckmannstraße 1".into(),
        description: String::new(),
        coordinates: Some(LatLng::new(51.9631, 7.5789)),
        categories: vec!["plants".into()],
        kind: None,
        opening_hours: None,
        preview_image: None,
        images: None,
        contents: None,
    };
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    let ticket = detail_ticket(&engine.handle(Event::RouteChanged(Route::Place("givebox-9".into()))));

    let effects = engine.handle(Event::DetailResolved { ticket, id: "givebox-9".into(), result: Ok(outlier) });
    assert!(matches!(
        viewports(&effects)[..],
        [ViewportTarget::Center { center, .. }] if center == LatLng::new(51.9631, 7.5789)
    ));
    assert_eq!(engine.snapshot().selection.point().map(|p| p.id.as_str()), Some("givebox-9"));
}

// =============================================================
// Categories
// =============================================================

#[tokio::test]
async fn category_chip_toggles() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;

    assert_eq!(navigations(&engine.handle(Event::SetCategory(Some("books".into())))), ["/category/books"]);
    let effects = engine.handle(Event::RouteChanged(Route::Category("books".into())));
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.active_category.as_deref(), Some("books"));
    assert_eq!(snapshot.visible_points.len(), 2);
    assert!(matches!(viewports(&effects)[..], [ViewportTarget::FitBounds { .. }]));

    assert_eq!(navigations(&engine.handle(Event::SetCategory(Some("books".into())))), ["/"]);
    assert_eq!(navigations(&engine.handle(Event::SetCategory(Some("tools".into())))), ["/category/tools"]);
    assert_eq!(navigations(&engine.handle(Event::SetCategory(None))), ["/"]);
}

#[tokio::test]
async fn focus_search_navigates() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    assert_eq!(engine.handle(Event::FocusSearch), [Effect::Navigate("/search".into())]);
}

#[tokio::test]
async fn derived_view_is_stable_between_events() {
    let gateway = FixtureGateway::muenster();
    let mut engine = loaded_engine(&gateway).await;
    engine.handle(Event::RouteChanged(Route::Category("games".into())));
    assert_eq!(engine.derived(), engine.derived());
    assert_eq!(engine.snapshot(), engine.snapshot());
}
