//! Integration tests for handoff.
//!
//! These tests exercise the public API end to end: wiring, sub-chain
//! dispatch, relinking, and the feeding scenario the crate docs use.

use handoff::{handler, Chain, ChainConfig, ChainError, Handler, HandlerId, Outcome};

/// Route `tracing` output to the test harness. Run with
/// `RUST_LOG=handoff=trace` to see every hop.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Zoo {
    chain: Chain<str, String>,
    monkey: HandlerId,
    squirrel: HandlerId,
    dog: HandlerId,
}

fn eats(animal: &'static str, food: &'static str) -> impl Handler<str, String> {
    handler::when_eq(food, move |f: &str| format!("{animal}: I'll eat the {f}."))
}

/// Monkey > Squirrel > Dog, wired fluently.
fn zoo() -> Zoo {
    init_tracing();

    let mut chain: Chain<str, String> = Chain::new();
    let monkey = chain.add("Monkey", eats("Monkey", "Banana"));
    let squirrel = chain.add("Squirrel", eats("Squirrel", "Nut"));
    let dog = chain.add("Dog", eats("Dog", "MeatBall"));

    chain
        .link(monkey)
        .set_next(squirrel)
        .unwrap()
        .set_next(dog)
        .unwrap();

    Zoo {
        chain,
        monkey,
        squirrel,
        dog,
    }
}

/// Offer each food to `entry` and describe what happened to it.
fn feed(chain: &Chain<str, String>, entry: HandlerId) -> Vec<String> {
    ["Nut", "Banana", "Cup of coffee"]
        .into_iter()
        .map(|food| match chain.dispatch(entry, food).unwrap() {
            Outcome::Handled { response, .. } => response,
            Outcome::Unhandled => format!("{food} was left untouched."),
        })
        .collect()
}

/// Test feeding the whole Monkey > Squirrel > Dog chain.
#[test]
fn test_full_chain_scenario() {
    let zoo = zoo();

    assert_eq!(
        zoo.chain.describe(zoo.monkey).unwrap(),
        "Monkey > Squirrel > Dog"
    );
    assert_eq!(
        feed(&zoo.chain, zoo.monkey),
        vec![
            "Squirrel: I'll eat the Nut.",
            "Monkey: I'll eat the Banana.",
            "Cup of coffee was left untouched.",
        ]
    );
}

/// Test feeding from Squirrel, which never offers food to Monkey.
#[test]
fn test_sub_chain_scenario() {
    let zoo = zoo();

    assert_eq!(zoo.chain.describe(zoo.squirrel).unwrap(), "Squirrel > Dog");
    assert_eq!(
        feed(&zoo.chain, zoo.squirrel),
        vec![
            "Squirrel: I'll eat the Nut.",
            "Banana was left untouched.",
            "Cup of coffee was left untouched.",
        ]
    );
}

/// Test that each outcome names the handler that produced it.
#[test]
fn test_dispatch_attributes_response() {
    let zoo = zoo();

    let nut = zoo.chain.dispatch(zoo.monkey, "Nut").unwrap();
    assert_eq!(nut.handled_by(), Some(zoo.squirrel));

    let banana = zoo.chain.dispatch(zoo.monkey, "Banana").unwrap();
    assert_eq!(banana.handled_by(), Some(zoo.monkey));

    let meatball = zoo.chain.dispatch(zoo.monkey, "MeatBall").unwrap();
    assert_eq!(meatball.handled_by(), Some(zoo.dog));

    assert!(zoo
        .chain
        .dispatch(zoo.monkey, "Cup of coffee")
        .unwrap()
        .is_unhandled());
    assert!(zoo
        .chain
        .dispatch(zoo.squirrel, "Banana")
        .unwrap()
        .is_unhandled());
}

/// Test that handling through a handler reference equals dispatching from it.
#[test]
fn test_handle_matches_dispatch() {
    let zoo = zoo();
    let squirrel = zoo.chain.handler(zoo.squirrel).unwrap();

    for food in ["Nut", "Banana", "MeatBall", "Cup of coffee"] {
        assert_eq!(
            squirrel.handle(food).unwrap(),
            zoo.chain.dispatch(zoo.squirrel, food).unwrap()
        );
    }
}

/// Test that no entry point yields a response from a handler before it.
#[test]
fn test_sub_chain_never_uses_earlier_handlers() {
    let zoo = zoo();
    let order = [zoo.monkey, zoo.squirrel, zoo.dog];
    let foods = ["Banana", "Nut", "MeatBall", "Cup of coffee"];

    for (k, &entry) in order.iter().enumerate() {
        for food in foods {
            if let Some(by) = zoo.chain.dispatch(entry, food).unwrap().handled_by() {
                assert!(
                    order[k..].contains(&by),
                    "{food} from {entry} handled by earlier {by}"
                );
            }
        }
    }
}

/// Test that repeated dispatch gives the same answers and leaves links alone.
#[test]
fn test_repeated_dispatch_is_stable() {
    let zoo = zoo();

    let first = feed(&zoo.chain, zoo.monkey);
    for _ in 0..10 {
        assert_eq!(feed(&zoo.chain, zoo.monkey), first);
    }
    assert_eq!(
        zoo.chain.describe(zoo.monkey).unwrap(),
        "Monkey > Squirrel > Dog"
    );
}

/// Test that fluent wiring links each handler to the next, not all to the head.
#[test]
fn test_fluent_wiring_walks_the_tail() {
    let zoo = zoo();

    assert_eq!(zoo.chain.next_of(zoo.monkey), Some(zoo.squirrel));
    assert_eq!(zoo.chain.next_of(zoo.squirrel), Some(zoo.dog));
    assert_eq!(zoo.chain.next_of(zoo.dog), None);
}

/// Test that replacing a successor cuts off the old tail from that handler.
#[test]
fn test_relink_detaches_old_tail() {
    let mut zoo = zoo();
    let cat = zoo.chain.add("Cat", eats("Cat", "Fish"));

    // Monkey > Cat: Squirrel and Dog are no longer reachable from Monkey.
    zoo.chain.set_next(zoo.monkey, cat).unwrap();

    assert_eq!(zoo.chain.describe(zoo.monkey).unwrap(), "Monkey > Cat");
    assert!(zoo.chain.dispatch(zoo.monkey, "Nut").unwrap().is_unhandled());
    assert!(zoo
        .chain
        .dispatch(zoo.monkey, "MeatBall")
        .unwrap()
        .is_unhandled());
    assert_eq!(
        zoo.chain.dispatch(zoo.monkey, "Fish").unwrap().handled_by(),
        Some(cat)
    );

    // The detached sub-chain still works from its own entry.
    assert_eq!(
        zoo.chain.dispatch(zoo.squirrel, "MeatBall").unwrap().handled_by(),
        Some(zoo.dog)
    );
}

/// Test that two heads sharing a tail both see a change to it.
#[test]
fn test_shared_tail_seen_by_every_entry() {
    let mut chain: Chain<str, String> = Chain::new();
    let monkey = chain.add("Monkey", eats("Monkey", "Banana"));
    let parrot = chain.add("Parrot", eats("Parrot", "Seed"));
    let squirrel = chain.add("Squirrel", eats("Squirrel", "Nut"));
    let dog = chain.add("Dog", eats("Dog", "MeatBall"));

    chain.wire(&[monkey, squirrel, dog]).unwrap();
    chain.set_next(parrot, squirrel).unwrap();

    assert_eq!(chain.describe(monkey).unwrap(), "Monkey > Squirrel > Dog");
    assert_eq!(chain.describe(parrot).unwrap(), "Parrot > Squirrel > Dog");

    // Cutting Squirrel's link is visible from both heads.
    assert_eq!(chain.clear_next(squirrel).unwrap(), Some(dog));
    assert!(chain.dispatch(monkey, "MeatBall").unwrap().is_unhandled());
    assert!(chain.dispatch(parrot, "MeatBall").unwrap().is_unhandled());
    assert_eq!(
        chain.dispatch(parrot, "Nut").unwrap().handled_by(),
        Some(squirrel)
    );
}

/// Test that relinking one path leaves an unrelated entry's path intact.
#[test]
fn test_relink_leaves_unrelated_entries_alone() {
    let mut chain: Chain<str, String> = Chain::new();
    let monkey = chain.add("Monkey", eats("Monkey", "Banana"));
    let squirrel = chain.add("Squirrel", eats("Squirrel", "Nut"));
    let cow = chain.add("Cow", eats("Cow", "Hay"));
    let dog = chain.add("Dog", eats("Dog", "MeatBall"));

    chain.wire(&[monkey, squirrel]).unwrap();
    chain.wire(&[cow, dog]).unwrap();

    chain.set_next(squirrel, dog).unwrap();

    assert_eq!(chain.describe(monkey).unwrap(), "Monkey > Squirrel > Dog");
    assert_eq!(chain.describe(cow).unwrap(), "Cow > Dog");
    assert_eq!(
        chain.dispatch(cow, "Hay").unwrap().handled_by(),
        Some(cow)
    );
}

/// Test that closing a loop is refused and the topology is unchanged.
#[test]
fn test_cycle_rejected_at_link_time() {
    let mut zoo = zoo();

    let err = zoo.chain.set_next(zoo.dog, zoo.monkey).unwrap_err();
    assert!(matches!(err, ChainError::Cycle { .. }));
    assert!(err.to_string().contains("cycle"));

    // Topology is untouched.
    assert_eq!(
        zoo.chain.describe(zoo.monkey).unwrap(),
        "Monkey > Squirrel > Dog"
    );
}

/// Test a JSON config that disables cycle checks and caps hops.
#[test]
fn test_config_from_json_drives_chain() {
    let config = ChainConfig::from_json(r#"{ "check_cycles": false, "max_hops": 4 }"#).unwrap();
    let mut chain: Chain<str, String> = Chain::with_config(config);
    let ping = chain.add("Ping", eats("Ping", "ping"));
    let pong = chain.add("Pong", eats("Pong", "pong"));
    chain.wire(&[ping, pong, ping]).unwrap();

    assert_eq!(
        chain.dispatch(ping, "pong").unwrap().into_response().as_deref(),
        Some("Pong: I'll eat the pong.")
    );
    assert!(matches!(
        chain.dispatch(ping, "nothing"),
        Err(ChainError::HopLimit { limit: 4, .. })
    ));
}

/// Test storing boxed handlers of different kinds in one chain.
#[test]
fn test_boxed_handlers_mix_kinds() {
    let mut chain: Chain<str, String> = Chain::new();
    let kinds: Vec<Box<dyn Handler<str, String>>> = vec![
        Box::new(eats("Monkey", "Banana")),
        Box::new(handler::from_fn(
            |f: &str| f.ends_with("Ball"),
            |f: &str| format!("Dog: I'll chase the {f}."),
        )),
    ];
    let ids: Vec<HandlerId> = kinds
        .into_iter()
        .enumerate()
        .map(|(i, h)| chain.add(format!("h{i}"), h))
        .collect();
    chain.wire(&ids).unwrap();

    assert_eq!(
        chain.dispatch(ids[0], "TennisBall").unwrap().into_response(),
        Some("Dog: I'll chase the TennisBall.".to_string())
    );
}

/// Test that an id issued by another chain is refused even when its index
/// exists in this one.
#[test]
fn test_foreign_handler_id_rejected() {
    let zoo = zoo();
    let mut other: Chain<str, String> = Chain::new();
    let stray = other.add("Stray", eats("Stray", "Nut"));

    assert_eq!(stray.index(), zoo.monkey.index());
    assert!(matches!(
        zoo.chain.dispatch(stray, "Nut"),
        Err(ChainError::UnknownHandler(id)) if id == stray
    ));
    assert_eq!(
        other.dispatch(stray, "Nut").unwrap().into_response().as_deref(),
        Some("Stray: I'll eat the Nut.")
    );
}

/// Test that a failed wire leaves every existing link in place.
#[test]
fn test_failed_wire_changes_nothing() {
    let mut zoo = zoo();
    let cat = zoo.chain.add("Cat", eats("Cat", "Fish"));

    assert!(matches!(
        zoo.chain.wire(&[zoo.dog, cat, zoo.squirrel]),
        Err(ChainError::Cycle { .. })
    ));
    assert_eq!(zoo.chain.next_of(zoo.dog), None);
    assert_eq!(zoo.chain.next_of(cat), None);
    assert_eq!(
        zoo.chain.describe(zoo.monkey).unwrap(),
        "Monkey > Squirrel > Dog"
    );
}
