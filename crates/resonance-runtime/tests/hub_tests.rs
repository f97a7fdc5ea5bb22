//! Dispatch and learning behaviour of the hub.

use resonance_runtime::prelude::*;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

#[test]
fn fresh_pairs_start_symmetric() {
    let hub = Hub::default();
    hub.register_module("A", "mods/a", &["input"], "first").unwrap();
    hub.register_module("B", "mods/b", &["output"], "second").unwrap();

    assert_eq!(hub.bond("A", "B"), INITIAL_BOND);
    assert_eq!(hub.bond("B", "A"), INITIAL_BOND);
    assert_eq!(hub.bond("A", "nobody"), 0.0);
}

#[test]
fn repeated_strengthening_is_bounded() {
    let hub = Hub::default();
    hub.register_module("A", "", &[], "").unwrap();
    hub.register_module("B", "", &[], "").unwrap();

    let mut previous = hub.bond("A", "B");
    for _ in 0..200 {
        hub.strengthen_bond("A", "B", 0.05);
        let current = hub.bond("A", "B");
        assert!(current > previous || current == BOND_CEILING);
        assert!(current <= BOND_CEILING);
        previous = current;
    }
}

#[test]
fn repeated_decay_respects_floor() {
    let hub = Hub::default();
    for name in ["A", "B", "C"] {
        hub.register_module(name, "", &[], "").unwrap();
    }
    hub.strengthen_bond("A", "C", 0.9);

    for _ in 0..500 {
        hub.decay_bonds(0.01);
    }
    for bond in hub.top_bonds(usize::MAX) {
        assert!(bond.weight >= BOND_FLOOR, "{bond:?} fell below the floor");
    }
}

#[test]
fn publish_without_subscribers_returns_empty() {
    let hub = Hub::default();
    hub.register_module("A", "", &[], "").unwrap();

    let results = hub.publish_wave("A", "nobody-listens", Wave::default(), None).unwrap();
    assert!(results.is_empty());
}

#[test]
fn failing_subscriber_does_not_affect_siblings() {
    let hub = Hub::default();
    hub.register_module("Source", "", &[], "").unwrap();
    hub.register_module("S1", "", &[], "").unwrap();
    hub.register_module("S2", "", &[], "").unwrap();

    hub.subscribe_fn("S1", "signal", 1.0, |_| Err("calibration lost".into()))
        .unwrap();
    hub.subscribe_fn("S2", "signal", 1.0, |event| {
        Ok(json!({ "amplitude": event.wave.amplitude }))
    })
    .unwrap();

    let results = hub
        .publish_wave("Source", "signal", Wave::new(10.0, 0.5, 0.0), None)
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(
        serde_json::to_value(&results["S1"]).unwrap(),
        json!({ "error": "calibration lost" })
    );
    assert_eq!(results["S2"].value(), Some(&json!({ "amplitude": 0.5 })));
}

#[test]
fn weak_bond_blocks_delivery() {
    let hub = Hub::default();
    hub.register_module("Source", "", &[], "").unwrap();
    hub.register_module("Quiet", "", &[], "").unwrap();
    hub.weaken_bond("Source", "Quiet", 1.0);
    assert_eq!(hub.bond("Source", "Quiet"), BOND_FLOOR);

    let calls = counter();
    let seen = Arc::clone(&calls);
    hub.subscribe_fn("Quiet", "signal", 1.0, move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Null)
    })
    .unwrap();

    let results = hub.publish_wave("Source", "signal", Wave::default(), None).unwrap();
    assert!(results.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn low_static_weight_blocks_delivery() {
    let hub = Hub::default();
    hub.register_module("Source", "", &[], "").unwrap();
    hub.register_module("Faint", "", &[], "").unwrap();

    let calls = counter();
    let seen = Arc::clone(&calls);
    // 0.4 * 0.1 = 0.04, below the 0.05 threshold
    hub.subscribe_fn("Faint", "signal", 0.4, move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Null)
    })
    .unwrap();

    hub.publish_wave("Source", "signal", Wave::default(), None).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn sensor_actuator_bond_grows_with_traffic() {
    let hub = Hub::default();
    hub.register_module("Sensor", "devices/sensor", &["input"], "reads the world").unwrap();
    hub.register_module("Actuator", "devices/actuator", &["output"], "moves things").unwrap();
    hub.subscribe_fn("Actuator", "signal", 1.0, |_| Ok(json!("ack"))).unwrap();

    for i in 0..50 {
        let wave = Wave::new(1.0, 1.0, i as f64 * 0.1);
        hub.publish_wave("Sensor", "signal", wave, None).unwrap();
    }

    let bond = hub.bond("Sensor", "Actuator");
    assert!(bond > 0.5, "bond only reached {bond}");
    assert_eq!(hub.module("Sensor").unwrap().total_fires, 50);
}

#[test]
fn duplicate_subscriptions_deliver_twice() {
    let hub = Hub::default();
    hub.register_module("Source", "", &[], "").unwrap();
    hub.register_module("Twice", "", &[], "").unwrap();

    let calls = counter();
    for _ in 0..2 {
        let seen = Arc::clone(&calls);
        hub.subscribe_fn("Twice", "signal", 1.0, move |_| {
            Ok(json!(seen.fetch_add(1, Ordering::SeqCst)))
        })
        .unwrap();
    }

    let results = hub.publish_wave("Source", "signal", Wave::default(), None).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(results.len(), 1);
    assert_eq!(results["Twice"].value(), Some(&json!(1)));

    assert_eq!(hub.subscriptions_of("Twice"), vec!["signal"]);
    assert_eq!(hub.unsubscribe("Twice", "signal"), 2);
    assert!(hub.subscriptions_of("Twice").is_empty());
    hub.publish_wave("Source", "signal", Wave::default(), None).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn reregistration_keeps_bonds() {
    let hub = Hub::default();
    hub.register_module("A", "v1", &[], "").unwrap();
    hub.register_module("B", "", &[], "").unwrap();
    hub.strengthen_bond("A", "B", 0.5);
    let learned = hub.bond("A", "B");

    let info = hub.register_module("A", "v2", &["new"], "rewritten").unwrap();
    assert_eq!(info.path, "v2");
    assert_eq!(hub.bond("A", "B"), learned);
    assert_eq!(hub.modules().len(), 2);
    assert_eq!(hub.find_by_capability("new"), vec!["A"]);
}

#[test]
fn co_firing_links_modules_without_subscriptions() {
    let hub = Hub::default();
    for name in ["Left", "Right", "Far"] {
        hub.register_module(name, "", &[], "").unwrap();
    }

    hub.publish_wave("Left", "tick", Wave::default(), None).unwrap();
    hub.publish_wave("Right", "tick", Wave::default(), None).unwrap();

    assert!(hub.bond("Left", "Right") > INITIAL_BOND);
    assert!(hub.bond("Right", "Left") > INITIAL_BOND);
}

#[test]
fn entropy_decay_runs_on_interval() {
    let config = HubConfig::default()
        .with_entropy_interval(3)
        .with_co_fire_window(std::time::Duration::ZERO);
    let hub = Hub::new(config).unwrap();
    for name in ["A", "B", "Idle1", "Idle2"] {
        hub.register_module(name, "", &[], "").unwrap();
    }

    hub.publish_wave("A", "tick", Wave::default(), None).unwrap();
    hub.publish_wave("A", "tick", Wave::default(), None).unwrap();
    assert_eq!(hub.bond("Idle1", "Idle2"), INITIAL_BOND);

    hub.publish_wave("A", "tick", Wave::default(), None).unwrap();
    assert!(hub.bond("Idle1", "Idle2") < INITIAL_BOND);
}

#[test]
fn related_modules_are_sorted() {
    let hub = Hub::default();
    for name in ["Core", "Near", "Nearer", "Far"] {
        hub.register_module(name, "", &[], "").unwrap();
    }
    hub.strengthen_bond("Core", "Near", 0.3);
    hub.strengthen_bond("Core", "Nearer", 0.6);

    let related = hub.get_related_modules("Core", RELATED_THRESHOLD);
    let names: Vec<_> = related.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Nearer", "Near"]);
}

#[test]
fn history_is_bounded() {
    let hub = Hub::new(HubConfig::default().with_history_capacity(4)).unwrap();
    hub.register_module("A", "", &[], "").unwrap();
    for i in 0..10 {
        hub.publish_wave("A", "tick", Wave::default(), Some(json!(i))).unwrap();
    }

    let events = hub.recent_events(100);
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].payload, Some(json!(6)));
    assert_eq!(events[3].payload, Some(json!(9)));
    assert_eq!(hub.get_hub_status().history_size, 4);
    assert_eq!(hub.total_events(), 10);
}
