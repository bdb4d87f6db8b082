//! End-to-end play through a loaded timeline.

use campaign_rules::TimePoint;
use timeline_core::{
    ChoiceResolver, EventStore, Progress, Session, TimelineEngine, TimelineError, TimelineGraph,
};

const REPUBLIC: &str = r#"{
    "name": "民国史诗",
    "initial_event": "test_event",
    "events": {
        "test_event": {
            "id": "test_event",
            "title": "测试事件",
            "description": "这是一个测试事件，用于验证事件系统是否正常工作。",
            "year": 1930,
            "month": 1,
            "choices": [
                {
                    "id": "option_1",
                    "text": "选择选项1",
                    "consequences": {"military_power": 10, "political_power": -5, "economic_power": 5}
                },
                {
                    "id": "option_2",
                    "text": "选择选项2",
                    "consequences": {"military_power": -5, "political_power": 10, "economic_power": -5},
                    "next_event": "mukden"
                }
            ]
        },
        "mukden": {
            "id": "mukden",
            "title": "九一八事变",
            "description": "日本关东军发动了奉天事变，意图侵占东北...",
            "year": 1931,
            "month": 9,
            "locations": ["manchuria"],
            "choices": [
                {
                    "id": "no_resistance",
                    "text": "实行不抵抗政策",
                    "consequences": {
                        "military_power": -20,
                        "political_power": -10,
                        "territories": {"japanese": ["manchuria"]}
                    },
                    "next_event": "shanghai"
                },
                {
                    "id": "resist",
                    "text": "立即武力反击",
                    "consequences": {"military_power": -30, "political_power": 10},
                    "next_event": "deleted_long_ago"
                }
            ]
        },
        "shanghai": {
            "id": "shanghai",
            "title": "一二八事变",
            "year": 1932,
            "month": 1
        }
    }
}"#;

fn mukden_store() -> EventStore {
    let mut store = EventStore::load(REPUBLIC).unwrap();
    store.set_initial_event("mukden").unwrap();
    store
}

#[test]
fn test_no_resistance_hands_over_manchuria() {
    let store = mukden_store();
    let engine = TimelineEngine::default();
    let mut state = engine.new_game(&store);

    assert_eq!(
        (state.military_power(), state.political_power(), state.economic_power()),
        (100, 100, 100)
    );

    engine.apply_choice(&store, &mut state, "no_resistance").unwrap();

    assert_eq!(
        (state.military_power(), state.political_power(), state.economic_power()),
        (80, 90, 100)
    );
    assert!(state.controlled_territories().holds("japanese", "manchuria"));
    assert_eq!(state.current_event_id().unwrap().as_str(), "shanghai");
    assert_eq!(engine.progress(&store, &state), Progress::Terminal);
}

#[test]
fn test_grants_never_remove_existing_holdings() {
    let store = mukden_store();
    let engine = TimelineEngine::default();
    let mut state = engine.new_game(&store);
    let before = state.controlled_territories().clone();

    engine.apply_choice(&store, &mut state, "no_resistance").unwrap();

    for (faction, territories) in before.iter() {
        for territory in territories {
            assert!(state.controlled_territories().holds(faction, territory));
        }
    }
    // jiangxi stays contested.
    assert!(state.controlled_territories().holds("central_government", "jiangxi"));
    assert!(state.controlled_territories().holds("communist", "jiangxi"));
}

#[test]
fn test_repaired_link_falls_back_to_next_event_in_time() {
    let store = mukden_store();
    let mukden = store.get_event("mukden").unwrap();
    assert!(mukden.choice("resist").unwrap().next_event.is_none());

    let engine = TimelineEngine::default();
    let mut state = engine.new_game(&store);
    let transition = engine.apply_choice(&store, &mut state, "resist").unwrap();

    assert_eq!(transition.to.unwrap().as_str(), "shanghai");
    assert_eq!(state.military_power(), 70);
    assert_eq!(state.political_power(), 110);
}

#[test]
fn test_full_walk_to_exhaustion() {
    let store = EventStore::load(REPUBLIC).unwrap();
    let engine = TimelineEngine::default();
    let mut state = engine.new_game(&store);

    // option_1 has no link: nearest future from 1930/01 is 1931/09.
    engine.apply_choice(&store, &mut state, "option_1").unwrap();
    assert_eq!(state.current_event_id().unwrap().as_str(), "mukden");
    assert_eq!(state.military_power(), 110);

    engine.apply_choice(&store, &mut state, "no_resistance").unwrap();
    assert_eq!(engine.progress(&store, &state), Progress::Terminal);
    assert!(matches!(
        engine.apply_choice(&store, &mut state, "anything"),
        Err(TimelineError::UnknownChoice { .. })
    ));
}

#[test]
fn test_reset_leaves_store_untouched() {
    let store = EventStore::load(REPUBLIC).unwrap();
    let snapshot = store.clone();
    let engine = TimelineEngine::default();
    let mut state = engine.new_game(&store);
    let fresh = state.clone();

    engine.apply_choice(&store, &mut state, "option_2").unwrap();
    engine.apply_choice(&store, &mut state, "no_resistance").unwrap();
    engine.reset(&store, &mut state);

    assert_eq!(state, fresh);
    assert_eq!(store, snapshot);
    assert_eq!(store.len(), 3);
    assert_eq!(store.initial_event().unwrap().as_str(), "test_event");
}

#[test]
fn test_nearest_future_example() {
    let store = EventStore::load(
        r#"{"events": {
            "a": {"id": "a", "title": "A", "year": 1930, "month": 1},
            "b": {"id": "b", "title": "B", "year": 1930, "month": 6},
            "c": {"id": "c", "title": "C", "year": 1931, "month": 1}
        }}"#,
    )
    .unwrap();
    let resolver = ChoiceResolver::new(&store);

    let next = resolver.nearest_future(TimePoint::new(1930, 1).unwrap());
    assert_eq!(next.unwrap().id.as_str(), "b");
    assert!(resolver.nearest_future(TimePoint::new(1931, 1).unwrap()).is_none());
}

#[test]
fn test_save_and_reload_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let mut store = EventStore::load(REPUBLIC).unwrap();
    store.remove_event("shanghai").unwrap();
    store.save(&path).unwrap();

    let reloaded = EventStore::load_file(&path).unwrap();
    assert_eq!(reloaded, store);
    let mukden = reloaded.get_event("mukden").unwrap();
    assert!(mukden.choice("no_resistance").unwrap().next_event.is_none());

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("九一八事变"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    assert!(matches!(EventStore::load_file(&path), Err(TimelineError::Io(_))));
    assert!(EventStore::load_file_or_empty(&path).unwrap().is_empty());
}

#[test]
fn test_session_edits_show_up_in_graph() {
    let mut session = Session::new(EventStore::load(REPUBLIC).unwrap(), TimelineEngine::default());
    session.choose("option_2").unwrap();

    session
        .edit(|store| store.rename_event("shanghai", "january_28"))
        .unwrap();

    let graph = TimelineGraph::from_store(session.store());
    assert!(graph.edges.iter().any(|e| e.to.as_str() == "january_28"));
    assert_eq!(session.current_event().unwrap().id.as_str(), "mukden");
}
