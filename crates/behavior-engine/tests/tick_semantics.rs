use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use behavior_engine::builder::*;
use behavior_engine::{Behavior, BehaviorTree, RepeaterConfig, Status};

/// Records which leaf did what, in order.
#[derive(Default)]
struct Journal {
    events: Vec<String>,
}

impl Journal {
    fn count(&self, event: &str) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }
}

/// Plays back scripted `process` results, repeating the last one.
struct Scripted {
    name: &'static str,
    script: Vec<Status>,
    next: usize,
    can_start: bool,
}

impl Scripted {
    fn new(name: &'static str, script: &[Status]) -> Self {
        Self {
            name,
            script: script.to_vec(),
            next: 0,
            can_start: true,
        }
    }

    fn refusing(name: &'static str) -> Self {
        Self {
            can_start: false,
            ..Self::new(name, &[Status::Success])
        }
    }
}

impl Behavior<Journal> for Scripted {
    fn init(&mut self, ctx: &mut Journal, _delta: f64) -> bool {
        ctx.events.push(format!("{}:init", self.name));
        self.can_start
    }

    fn process(&mut self, ctx: &mut Journal, _delta: f64) -> Status {
        ctx.events.push(format!("{}:process", self.name));
        let status = self.script[self.next.min(self.script.len() - 1)];
        self.next += 1;
        status
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn tick(tree: &mut BehaviorTree<Journal>, journal: &mut Journal) -> Status {
    tree.tick(journal, 1.0 / 60.0).expect("tree is well formed")
}

#[test]
fn empty_composites_resolve_vacuously() {
    init_tracing();
    let mut journal = Journal::default();

    let mut seq = BehaviorTree::new(sequence());
    assert_eq!(tick(&mut seq, &mut journal), Status::Success);

    let mut sel = BehaviorTree::new(selector());
    assert_eq!(tick(&mut sel, &mut journal), Status::Failure);
}

#[test]
fn sequence_failure_restarts_from_first_child() {
    init_tracing();
    let mut tree = BehaviorTree::new(sequence());
    let root = tree.root();
    tree.add_child(root, leaf(Scripted::new("a", &[Status::Success]))).unwrap();
    tree.add_child(root, leaf(Scripted::new("b", &[Status::Failure]))).unwrap();

    let mut journal = Journal::default();
    assert_eq!(tick(&mut tree, &mut journal), Status::Failure);
    journal.events.clear();

    assert_eq!(tick(&mut tree, &mut journal), Status::Failure);
    assert_eq!(journal.events.first().map(String::as_str), Some("a:init"));
}

#[test]
fn sequence_waits_on_running_child() {
    init_tracing();
    let mut tree = BehaviorTree::new(sequence());
    let root = tree.root();
    let script = [Status::Running, Status::Running, Status::Success];
    tree.add_child(root, leaf(Scripted::new("a", &script))).unwrap();
    tree.add_child(root, leaf(Scripted::new("b", &[Status::Success]))).unwrap();

    let mut journal = Journal::default();
    assert_eq!(tick(&mut tree, &mut journal), Status::Running);
    assert_eq!(tick(&mut tree, &mut journal), Status::Running);
    assert_eq!(journal.count("b:process"), 0);

    assert_eq!(tick(&mut tree, &mut journal), Status::Success);
    assert_eq!(journal.count("a:init"), 1);
    assert_eq!(journal.count("a:process"), 3);
    assert_eq!(journal.count("b:process"), 1);
}

#[test]
fn selector_ticks_fallback_once() {
    init_tracing();
    let mut tree = BehaviorTree::new(selector());
    let root = tree.root();
    tree.add_child(root, leaf(Scripted::new("a", &[Status::Failure]))).unwrap();
    tree.add_child(root, leaf(Scripted::new("b", &[Status::Success]))).unwrap();

    let mut journal = Journal::default();
    assert_eq!(tick(&mut tree, &mut journal), Status::Success);
    assert_eq!(journal.count("b:process"), 1);
}

#[test]
fn inverter_and_succeeder_reshape_results() {
    init_tracing();
    let cases = [
        (Status::Success, Status::Failure, Status::Success),
        (Status::Failure, Status::Success, Status::Success),
        (Status::Running, Status::Running, Status::Running),
    ];

    for (child, inverted, succeeded) in cases {
        let mut journal = Journal::default();

        let mut inv = BehaviorTree::new(inverter());
        inv.add_child(inv.root(), leaf(Scripted::new("c", &[child]))).unwrap();
        assert_eq!(tick(&mut inv, &mut journal), inverted, "inverter({child})");

        let mut suc = BehaviorTree::new(succeeder());
        suc.add_child(suc.root(), leaf(Scripted::new("c", &[child]))).unwrap();
        assert_eq!(tick(&mut suc, &mut journal), succeeded, "succeeder({child})");
    }
}

#[test]
fn repeat_until_fail_stops_on_failure() {
    init_tracing();
    let mut tree = BehaviorTree::new(repeat_until_fail());
    let script = [Status::Success, Status::Success, Status::Failure];
    tree.add_child(tree.root(), leaf(Scripted::new("a", &script))).unwrap();

    let mut journal = Journal::default();
    let results: Vec<_> = (0..3).map(|_| tick(&mut tree, &mut journal)).collect();
    assert_eq!(results, vec![Status::Running, Status::Running, Status::Success]);
}

#[test]
fn bounded_repeater_reruns_a_sequence() {
    init_tracing();
    let mut tree = BehaviorTree::new(repeater(RepeaterConfig::times(2)));
    let seq = tree.add_child(tree.root(), sequence()).unwrap();
    tree.add_child(seq, leaf(Scripted::new("a", &[Status::Success]))).unwrap();
    tree.add_child(seq, leaf(Scripted::new("b", &[Status::Running, Status::Success])))
        .unwrap();

    let mut journal = Journal::default();
    assert_eq!(tick(&mut tree, &mut journal), Status::Running); // b running
    assert_eq!(tick(&mut tree, &mut journal), Status::Running); // 1 of 2 done
    assert_eq!(tick(&mut tree, &mut journal), Status::Success); // 2 of 2 done
    assert_eq!(journal.count("a:process"), 2);
}

#[test]
fn leaf_with_refused_init_never_processes() {
    init_tracing();
    let mut tree = BehaviorTree::new(sequence());
    tree.add_child(tree.root(), leaf(Scripted::refusing("a"))).unwrap();

    let mut journal = Journal::default();
    assert_eq!(tick(&mut tree, &mut journal), Status::Failure);
    assert_eq!(journal.events, vec!["a:init".to_string()]);
}

#[test]
fn leaf_inits_once_per_activation() {
    init_tracing();
    const RUNNING_TICKS: usize = 4;

    let mut script = vec![Status::Running; RUNNING_TICKS];
    script.push(Status::Success);
    script.push(Status::Running);

    let mut tree = BehaviorTree::new(sequence());
    tree.add_child(tree.root(), leaf(Scripted::new("a", &script))).unwrap();

    let mut journal = Journal::default();
    for _ in 0..RUNNING_TICKS {
        assert_eq!(tick(&mut tree, &mut journal), Status::Running);
    }
    assert_eq!(tick(&mut tree, &mut journal), Status::Success);
    assert_eq!(journal.count("a:init"), 1);
    assert_eq!(journal.count("a:process"), RUNNING_TICKS + 1);

    assert_eq!(tick(&mut tree, &mut journal), Status::Running);
    assert_eq!(journal.count("a:init"), 2);
}

#[test]
fn resolved_composite_restarts_at_first_child() {
    init_tracing();
    let mut tree = BehaviorTree::new(sequence());
    let root = tree.root();
    tree.add_child(root, leaf(Scripted::new("a", &[Status::Success]))).unwrap();
    tree.add_child(root, leaf(Scripted::new("b", &[Status::Success]))).unwrap();

    let mut journal = Journal::default();
    assert_eq!(tick(&mut tree, &mut journal), Status::Success);
    assert_eq!(tick(&mut tree, &mut journal), Status::Success);
    assert_eq!(
        journal.events,
        ["a:init", "a:process", "b:init", "b:process"].repeat(2)
    );
}

struct Abandonable {
    resets: Arc<AtomicUsize>,
}

impl Behavior<Journal> for Abandonable {
    fn init(&mut self, ctx: &mut Journal, _delta: f64) -> bool {
        ctx.events.push("walk:init".into());
        true
    }

    fn process(&mut self, _ctx: &mut Journal, _delta: f64) -> Status {
        Status::Running
    }

    fn reset(&mut self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn reset_pass_notifies_abandoned_leaves() {
    init_tracing();
    let resets = Arc::new(AtomicUsize::new(0));
    let mut tree = BehaviorTree::new(selector());
    tree.add_child(
        tree.root(),
        leaf(Abandonable {
            resets: Arc::clone(&resets),
        }),
    )
    .unwrap();

    let mut journal = Journal::default();
    assert_eq!(tick(&mut tree, &mut journal), Status::Running);
    assert_eq!(tick(&mut tree, &mut journal), Status::Running);
    assert_eq!(journal.count("walk:init"), 1);

    tree.reset();
    assert_eq!(resets.load(Ordering::SeqCst), 1);

    assert_eq!(tick(&mut tree, &mut journal), Status::Running);
    assert_eq!(journal.count("walk:init"), 2);
}
